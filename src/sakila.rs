//! The film-rental sample schema (a Sakila subset) with a small deterministic
//! seed dataset, so the nested-result queries run against an in-memory
//! database out of the box.
//!
//! Relationships: films have actors through `film_actor` and categories
//! through `film_category`; a film's copies live in `inventory`, copies are
//! rented in `rental` by customers, and rentals are paid for in `payment`.

use crate::db::Db;
use crate::error::Result;
use crate::insert::insert;
use crate::row;
use crate::schema::table;

table! {
    /// The `actor` table.
    pub struct ActorTable as "actor" {
        actor_id,
        first_name,
        last_name,
    }
    pub static ACTOR;
}

table! {
    /// The `film` table.
    pub struct FilmTable as "film" {
        film_id,
        title,
    }
    pub static FILM;
}

table! {
    /// Film-to-actor association.
    pub struct FilmActorTable as "film_actor" {
        actor_id,
        film_id,
    }
    pub static FILM_ACTOR;
}

table! {
    /// The `category` table.
    pub struct CategoryTable as "category" {
        category_id,
        name,
    }
    pub static CATEGORY;
}

table! {
    /// Film-to-category association.
    pub struct FilmCategoryTable as "film_category" {
        film_id,
        category_id,
    }
    pub static FILM_CATEGORY;
}

table! {
    /// The `customer` table.
    pub struct CustomerTable as "customer" {
        customer_id,
        first_name,
        last_name,
    }
    pub static CUSTOMER;
}

table! {
    /// Copies of films available for rental.
    pub struct InventoryTable as "inventory" {
        inventory_id,
        film_id,
    }
    pub static INVENTORY;
}

table! {
    /// The `rental` table.
    pub struct RentalTable as "rental" {
        rental_id,
        inventory_id,
        customer_id,
    }
    pub static RENTAL;
}

table! {
    /// The `payment` table.
    pub struct PaymentTable as "payment" {
        payment_id,
        rental_id,
        customer_id,
        amount,
        payment_date,
    }
    pub static PAYMENT;
}

const DDL: &str = r#"
CREATE TABLE actor (
    actor_id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL
);
CREATE TABLE film (
    film_id INTEGER PRIMARY KEY,
    title TEXT NOT NULL
);
CREATE TABLE film_actor (
    actor_id INTEGER NOT NULL REFERENCES actor (actor_id),
    film_id INTEGER NOT NULL REFERENCES film (film_id),
    PRIMARY KEY (actor_id, film_id)
);
CREATE TABLE category (
    category_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);
CREATE TABLE film_category (
    film_id INTEGER NOT NULL REFERENCES film (film_id),
    category_id INTEGER NOT NULL REFERENCES category (category_id),
    PRIMARY KEY (film_id, category_id)
);
CREATE TABLE customer (
    customer_id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL
);
CREATE TABLE inventory (
    inventory_id INTEGER PRIMARY KEY,
    film_id INTEGER NOT NULL REFERENCES film (film_id)
);
CREATE TABLE rental (
    rental_id INTEGER PRIMARY KEY,
    inventory_id INTEGER NOT NULL REFERENCES inventory (inventory_id),
    customer_id INTEGER NOT NULL REFERENCES customer (customer_id)
);
CREATE TABLE payment (
    payment_id INTEGER PRIMARY KEY,
    rental_id INTEGER NOT NULL REFERENCES rental (rental_id),
    customer_id INTEGER NOT NULL REFERENCES customer (customer_id),
    amount REAL NOT NULL,
    payment_date TEXT NOT NULL
);
"#;

/// Creates all sample tables.
pub fn create_schema(db: &Db) -> Result<()> {
    db.execute_batch(DDL)
}

/// Loads the deterministic sample dataset.
///
/// Fixture layout worth knowing when reading test assertions:
/// AGENT TRUMAN has no actors and no inventory, so its nested actor and
/// customer sequences are empty; ACADEMY DINOSAUR has two paying customers,
/// one with two payments.
pub fn seed(db: &Db) -> Result<()> {
    db.execute(
        insert(&ACTOR)
            .columns([ACTOR.actor_id, ACTOR.first_name, ACTOR.last_name])
            .values([
                row![1, "PENELOPE", "GUINESS"],
                row![2, "NICK", "WAHLBERG"],
                row![3, "ED", "CHASE"],
            ]),
    )?;

    db.execute(
        insert(&FILM)
            .columns([FILM.film_id, FILM.title])
            .values([
                row![1, "ACADEMY DINOSAUR"],
                row![2, "ACE GOLDFINGER"],
                row![3, "ZORRO ARK"],
                row![4, "AGENT TRUMAN"],
            ]),
    )?;

    db.execute(
        insert(&FILM_ACTOR)
            .columns([FILM_ACTOR.actor_id, FILM_ACTOR.film_id])
            .values([row![1, 1], row![2, 1], row![3, 2], row![2, 3]]),
    )?;

    db.execute(
        insert(&CATEGORY)
            .columns([CATEGORY.category_id, CATEGORY.name])
            .values([row![1, "Action"], row![2, "Comedy"], row![3, "Documentary"]]),
    )?;

    db.execute(
        insert(&FILM_CATEGORY)
            .columns([FILM_CATEGORY.film_id, FILM_CATEGORY.category_id])
            .values([row![1, 3], row![2, 1], row![2, 2], row![3, 1], row![4, 2]]),
    )?;

    db.execute(
        insert(&CUSTOMER)
            .columns([
                CUSTOMER.customer_id,
                CUSTOMER.first_name,
                CUSTOMER.last_name,
            ])
            .values([row![1, "MARY", "SMITH"], row![2, "PATRICIA", "JOHNSON"]]),
    )?;

    db.execute(
        insert(&INVENTORY)
            .columns([INVENTORY.inventory_id, INVENTORY.film_id])
            .values([row![1, 1], row![2, 1], row![3, 2]]),
    )?;

    db.execute(
        insert(&RENTAL)
            .columns([RENTAL.rental_id, RENTAL.inventory_id, RENTAL.customer_id])
            .values([row![1, 1, 1], row![2, 2, 2], row![3, 3, 1]]),
    )?;

    db.execute(
        insert(&PAYMENT)
            .columns([
                PAYMENT.payment_id,
                PAYMENT.rental_id,
                PAYMENT.customer_id,
                PAYMENT.amount,
                PAYMENT.payment_date,
            ])
            .values([
                row![1, 1, 1, 2.99, "2005-05-25"],
                row![2, 1, 1, 0.99, "2005-05-28"],
                row![3, 2, 2, 4.99, "2005-06-01"],
                row![4, 3, 1, 1.99, "2005-06-15"],
            ]),
    )?;

    Ok(())
}
