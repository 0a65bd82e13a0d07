//! Nested-result (multiset) mapping.
//!
//! A multiset turns a correlated sub-select into a single scalar column whose
//! value is the ordered sequence of the sub-select's rows, instead of
//! flattening through a join. SQLite has no native MULTISET, so it is emulated
//! with the JSON1 aggregate:
//!
//! ```sql
//! (SELECT coalesce(json_group_array(json_array(v0, v1)), json_array())
//!  FROM (SELECT a AS v0, b AS v1 FROM ... WHERE corr = outer.key) AS t)
//! ```
//!
//! An empty nested sequence is an empty array (`coalesce(.., json_array())`),
//! never NULL. Row order inside the array follows the sub-select's own
//! ORDER BY / GROUP BY; the outer ordering clause orders the outer rows.
//!
//! `json_array` stringifies TEXT arguments, so a projected column that is
//! itself JSON (a nested multiset) is re-entered through `json(..)` to stay an
//! array. The SELECT builder tracks that per projection.

use crate::expr::{Expr, Projection};
use crate::select::SelectFrom;
use crate::sql::Sql;

/// Collects the positional projection of a derived table into one JSON row
/// per source row: `json_array(v0, v1, ..)` with JSON columns re-wrapped.
fn json_row<'a>(names: impl Iterator<Item = (String, &'a bool)>) -> Sql {
    let args = names.map(|(name, is_json)| {
        let column = Sql::raw(name);
        if *is_json {
            Sql::func("json", column)
        } else {
            column
        }
    });
    Sql::func("json_array", Sql::join(args, ", "))
}

/// Wraps a correlated sub-select as a nested ordered sequence.
///
/// The result is a JSON-typed scalar column: an array with one inner array
/// per sub-select row. Decode it with [`crate::row::Json`].
pub fn multiset(sub: SelectFrom) -> Expr {
    let flags: Vec<bool> = sub.projection.iter().map(|e| e.json).collect();
    let row = json_row(flags.iter().enumerate().map(|(i, f)| (format!("v{i}"), f)));

    let collected = Sql::func(
        "coalesce",
        Sql::func("json_group_array", row).append_raw(", json_array()"),
    );

    let wrapped = Sql::raw("SELECT ")
        .append(collected)
        .append_raw(" FROM ")
        .append(sub.to_sql_positional().subquery())
        .append_raw(" AS t");

    Expr::json(wrapped.subquery())
}

/// Aggregate form of [`multiset`]: collects one nested row per input row of
/// the current group, for use alongside GROUP BY and other aggregates.
///
/// Renders `json_group_array(json_array(expr, ..))`.
pub fn multiset_agg(projection: impl Projection) -> Expr {
    let exprs = projection.into_exprs();
    let args = exprs.into_iter().map(|e| {
        if e.json {
            Sql::func("json", e.sql)
        } else {
            e.sql
        }
    });
    Expr::json(Sql::func(
        "json_group_array",
        Sql::func("json_array", Sql::join(args, ", ")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::eq;
    use crate::schema::table;
    use crate::select::select;
    use crate::sql::ToSql;

    table! {
        struct ParentTable as "parent" {
            id,
        }
        static PARENT;
    }

    table! {
        struct ChildTable as "child" {
            parent_id,
            name,
        }
        static CHILD;
    }

    #[test]
    fn multiset_wraps_subselect_with_json_aggregate() {
        let nested = multiset(
            select((CHILD.name,))
                .from(&CHILD)
                .r#where(eq(CHILD.parent_id, PARENT.id)),
        );
        assert_eq!(
            nested.to_sql().sql(),
            r#"(SELECT coalesce(json_group_array(json_array(v0)), json_array()) FROM (SELECT "child"."name" AS v0 FROM "child" WHERE "child"."parent_id" = "parent"."id") AS t)"#
        );
    }

    #[test]
    fn multiset_column_carries_its_alias() {
        let nested = multiset(select((CHILD.name,)).from(&CHILD)).alias("children");
        let sql = nested.to_sql().sql();
        assert!(sql.ends_with(" AS children"), "got: {sql}");
    }

    #[test]
    fn nested_multiset_reenters_json_array_through_json() {
        let inner = multiset(select((CHILD.name,)).from(&CHILD)).alias("names");
        let outer = multiset(select((PARENT.id, inner)).from(&PARENT));
        let sql = outer.to_sql().sql();
        assert!(sql.contains("json_array(v0, json(v1))"), "got: {sql}");
    }

    #[test]
    fn multiset_agg_renders_grouped_json_rows() {
        let agg = multiset_agg((CHILD.parent_id, CHILD.name));
        assert_eq!(
            agg.to_sql().sql(),
            r#"json_group_array(json_array("child"."parent_id", "child"."name"))"#
        );
    }
}
