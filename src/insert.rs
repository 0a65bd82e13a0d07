//! Minimal INSERT builder, enough to load fixture data through the same
//! fragment machinery the queries use.

use crate::schema::Column;
use crate::sql::{Sql, ToSql};
use crate::value::SqlValue;

/// Starts an INSERT statement for the given table.
pub fn insert(table: impl ToSql) -> Insert {
    Insert {
        table: table.to_sql(),
        columns: Vec::new(),
        rows: Vec::new(),
    }
}

/// An INSERT statement under construction.
#[derive(Debug, Clone)]
pub struct Insert {
    table: Sql,
    columns: Vec<Column>,
    rows: Vec<Vec<SqlValue>>,
}

impl Insert {
    pub fn columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Appends value rows. Each row must match the declared column list;
    /// build rows with the `row!` macro.
    pub fn values(mut self, rows: impl IntoIterator<Item = Vec<SqlValue>>) -> Self {
        self.rows.extend(rows);
        self
    }
}

impl ToSql for Insert {
    fn to_sql(&self) -> Sql {
        assert!(!self.rows.is_empty(), "INSERT requires at least one row");
        assert!(
            self.rows.iter().all(|r| r.len() == self.columns.len()),
            "row arity must match column list"
        );

        let columns = self
            .columns
            .iter()
            .map(|c| Sql::raw(format!(r#""{}""#, c.name)));

        let rows = self.rows.iter().map(|row| {
            let placeholders = row.iter().map(|v| Sql::parameter(v.clone()));
            Sql::raw("(").append(Sql::join(placeholders, ", ")).append_raw(")")
        });

        Sql::raw("INSERT INTO ")
            .append(self.table.clone())
            .append_raw(" (")
            .append(Sql::join(columns, ", "))
            .append_raw(") VALUES ")
            .append(Sql::join(rows, ", "))
    }
}

/// Builds one insert row, converting each value into a [`SqlValue`].
#[macro_export]
macro_rules! row {
    ($($value:expr),* $(,)?) => {
        vec![$($crate::value::SqlValue::from($value)),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::table;

    table! {
        struct ColorTable as "color" {
            id,
            name,
        }
        static COLOR;
    }

    #[test]
    fn insert_renders_multi_row_values() {
        let stmt = insert(&COLOR)
            .columns([COLOR.id, COLOR.name])
            .values([row![1, "red"], row![2, "green"]]);
        let sql = stmt.to_sql();
        assert_eq!(
            sql.sql(),
            r#"INSERT INTO "color" ("id", "name") VALUES (?, ?), (?, ?)"#
        );
        assert_eq!(
            sql.params(),
            vec![
                &SqlValue::Integer(1),
                &SqlValue::Text("red".into()),
                &SqlValue::Integer(2),
                &SqlValue::Text("green".into()),
            ]
        );
    }

    #[test]
    #[should_panic(expected = "at least one row")]
    fn insert_without_rows_refuses_to_render() {
        insert(&COLOR).columns([COLOR.id, COLOR.name]).to_sql();
    }

    #[test]
    #[should_panic(expected = "row arity")]
    fn insert_with_mismatched_row_arity_refuses_to_render() {
        insert(&COLOR)
            .columns([COLOR.id, COLOR.name])
            .values([row![1]])
            .to_sql();
    }
}
