//! Static table and column metadata.
//!
//! Tables are plain structs of [`Column`]s with a `static` instance per table,
//! declared through the `table!` macro. A column knows which table it belongs
//! to, so a reference renders fully qualified wherever it appears — including
//! inside a correlated sub-select, which is what makes multiset correlation
//! predicates work without any extra plumbing.

/// A column reference: table name plus column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub table: &'static str,
    pub name: &'static str,
}

impl Column {
    pub const fn new(table: &'static str, name: &'static str) -> Self {
        Self { table, name }
    }
}

/// Declares a table struct, its `static` instance, and its `ToSql` impl.
///
/// ```ignore
/// table! {
///     /// The `actor` table.
///     pub struct ActorTable as "actor" {
///         actor_id,
///         first_name,
///         last_name,
///     }
///     pub static ACTOR;
/// }
/// ```
macro_rules! table {
    (
        $(#[$meta:meta])*
        $vis:vis struct $table:ident as $name:literal {
            $($col:ident),+ $(,)?
        }
        $static_vis:vis static $instance:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        $vis struct $table {
            $(pub $col: $crate::schema::Column,)+
        }

        impl $table {
            pub const NAME: &'static str = $name;
        }

        impl $crate::sql::ToSql for $table {
            fn to_sql(&self) -> $crate::sql::Sql {
                $crate::sql::Sql::table(Self::NAME)
            }
        }

        $static_vis static $instance: $table = $table {
            $($col: $crate::schema::Column::new($name, stringify!($col)),)+
        };
    };
}

pub(crate) use table;
