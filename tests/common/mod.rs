use nestql::db::Db;

/// Opens an in-memory database with the film-rental schema and sample data.
pub fn setup_db() -> Db {
    let db = Db::open_in_memory().expect("open in-memory database");
    nestql::sakila::create_schema(&db).expect("create schema");
    nestql::sakila::seed(&db).expect("seed sample data");
    db
}
