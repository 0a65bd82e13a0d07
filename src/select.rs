//! Fluent SELECT builder.
//!
//! `select(projection).from(table)` then chain `join` / `r#where` /
//! `group_by` / `order_by` / `limit`. Methods consume `self`; the statement is
//! rendered once, at `to_sql`, with clauses in canonical order.

use crate::expr::{Expr, Projection};
use crate::schema::Column;
use crate::sql::{Sql, ToSql};

/// The kind of JOIN to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinKind {
    #[default]
    Join,
    Inner,
    Left,
}

impl JoinKind {
    fn keyword(self) -> &'static str {
        match self {
            JoinKind::Join => "JOIN",
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
        }
    }
}

#[derive(Debug, Clone)]
struct JoinClause {
    kind: JoinKind,
    table: Sql,
    on: Sql,
}

/// Starts a SELECT statement with the given projection.
pub fn select(projection: impl Projection) -> Select {
    Select {
        projection: projection.into_exprs(),
    }
}

/// A SELECT with a projection but no FROM clause yet.
#[derive(Debug, Clone)]
pub struct Select {
    projection: Vec<Expr>,
}

impl Select {
    pub fn from(self, table: impl ToSql) -> SelectFrom {
        SelectFrom {
            projection: self.projection,
            from: table.to_sql(),
            joins: Vec::new(),
            filter: None,
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: None,
        }
    }
}

/// A complete SELECT statement under construction.
#[derive(Debug, Clone)]
pub struct SelectFrom {
    pub(crate) projection: Vec<Expr>,
    from: Sql,
    joins: Vec<JoinClause>,
    filter: Option<Sql>,
    group_by: Vec<Column>,
    order_by: Vec<Sql>,
    limit: Option<usize>,
}

impl SelectFrom {
    pub fn join(mut self, table: impl ToSql, on: Sql) -> Self {
        self.joins.push(JoinClause {
            kind: JoinKind::Join,
            table: table.to_sql(),
            on,
        });
        self
    }

    pub fn inner_join(mut self, table: impl ToSql, on: Sql) -> Self {
        self.joins.push(JoinClause {
            kind: JoinKind::Inner,
            table: table.to_sql(),
            on,
        });
        self
    }

    pub fn left_join(mut self, table: impl ToSql, on: Sql) -> Self {
        self.joins.push(JoinClause {
            kind: JoinKind::Left,
            table: table.to_sql(),
            on,
        });
        self
    }

    pub fn r#where(mut self, condition: Sql) -> Self {
        self.filter = Some(condition);
        self
    }

    pub fn group_by(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.group_by.extend(columns);
        self
    }

    pub fn order_by(mut self, expressions: impl IntoIterator<Item = Sql>) -> Self {
        self.order_by.extend(expressions);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Renders with each projected expression re-aliased to `v0..vN`.
    ///
    /// Multiset wrapping projects the derived table positionally.
    pub(crate) fn to_sql_positional(&self) -> Sql {
        let projection = self
            .projection
            .iter()
            .enumerate()
            .map(|(i, expr)| expr.render_as(&format!("v{i}")));
        self.render(Sql::join(projection, ", "))
    }

    fn render(&self, projection: Sql) -> Sql {
        let mut sql = Sql::raw("SELECT ").append(projection);
        sql = sql.append_raw(" FROM ").append(self.from.clone());
        for join in &self.joins {
            sql = sql
                .append_raw(" ")
                .append_raw(join.kind.keyword())
                .append_raw(" ")
                .append(join.table.clone())
                .append_raw(" ON ")
                .append(join.on.clone());
        }
        if let Some(filter) = &self.filter {
            sql = sql.append_raw(" WHERE ").append(filter.clone());
        }
        if !self.group_by.is_empty() {
            let columns = self.group_by.iter().map(|c| c.to_sql());
            sql = sql
                .append_raw(" GROUP BY ")
                .append(Sql::join(columns, ", "));
        }
        if !self.order_by.is_empty() {
            sql = sql
                .append_raw(" ORDER BY ")
                .append(Sql::join(self.order_by.iter().cloned(), ", "));
        }
        if let Some(limit) = self.limit {
            sql = sql.append_raw(format!(" LIMIT {limit}"));
        }
        sql
    }
}

impl ToSql for SelectFrom {
    fn to_sql(&self) -> Sql {
        let projection = self.projection.iter().map(Expr::render);
        self.render(Sql::join(projection, ", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{asc, eq, like, ordinal};
    use crate::schema::table;
    use crate::value::SqlValue;

    table! {
        struct ItemTable as "item" {
            id,
            name,
        }
        static ITEM;
    }

    table! {
        struct TagTable as "tag" {
            id,
            item_id,
            label,
        }
        static TAG;
    }

    #[test]
    fn select_from_where_order_limit() {
        let query = select((ITEM.id, ITEM.name))
            .from(&ITEM)
            .r#where(like(ITEM.name, "A%"))
            .order_by([asc(ITEM.name)])
            .limit(5);
        assert_eq!(
            query.to_sql().sql(),
            r#"SELECT "item"."id", "item"."name" FROM "item" WHERE "item"."name" LIKE ? ORDER BY "item"."name" ASC LIMIT 5"#
        );
        assert_eq!(
            query.to_sql().params(),
            vec![&SqlValue::Text("A%".into())]
        );
    }

    #[test]
    fn joins_render_in_declaration_order() {
        let query = select((ITEM.name, TAG.label))
            .from(&ITEM)
            .join(&TAG, eq(ITEM.id, TAG.item_id))
            .order_by([ordinal(1), ordinal(2)]);
        assert_eq!(
            query.to_sql().sql(),
            r#"SELECT "item"."name", "tag"."label" FROM "item" JOIN "tag" ON "item"."id" = "tag"."item_id" ORDER BY 1, 2"#
        );
    }

    #[test]
    fn join_kinds_render_their_keywords() {
        let query = select((ITEM.name,))
            .from(&ITEM)
            .inner_join(&TAG, eq(ITEM.id, TAG.item_id))
            .left_join(&TAG, eq(ITEM.id, TAG.item_id));
        assert_eq!(
            query.to_sql().sql(),
            r#"SELECT "item"."name" FROM "item" INNER JOIN "tag" ON "item"."id" = "tag"."item_id" LEFT JOIN "tag" ON "item"."id" = "tag"."item_id""#
        );
    }

    #[test]
    fn group_by_renders_after_where() {
        let query = select((TAG.item_id,))
            .from(&TAG)
            .r#where(eq(TAG.label, "x"))
            .group_by([TAG.item_id]);
        assert_eq!(
            query.to_sql().sql(),
            r#"SELECT "tag"."item_id" FROM "tag" WHERE "tag"."label" = ? GROUP BY "tag"."item_id""#
        );
    }

    #[test]
    fn positional_rendering_realiases_projection() {
        let query = select((ITEM.id, ITEM.name)).from(&ITEM);
        assert_eq!(
            query.to_sql_positional().sql(),
            r#"SELECT "item"."id" AS v0, "item"."name" AS v1 FROM "item""#
        );
    }
}
