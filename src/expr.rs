//! Conditions, aggregates, and ordering expressions.
//!
//! Conditions are free functions over [`ToSql`] operands. A column on either
//! side renders as a qualified column reference; a plain Rust value becomes a
//! bound parameter. `eq(FILM_ACTOR.film_id, FILM.film_id)` therefore renders a
//! correlated predicate, while `like(FILM.title, "A%")` binds `"A%"`.

use compact_str::CompactString;

use crate::schema::Column;
use crate::sql::{Sql, ToSql};

/// A projected expression: a fragment plus an optional output alias and a
/// marker for JSON-typed results.
///
/// The JSON marker tracks multiset columns so an enclosing multiset can pass
/// them back through `json(..)` instead of letting `json_array` stringify
/// them.
#[derive(Debug, Clone)]
pub struct Expr {
    pub(crate) sql: Sql,
    pub(crate) alias: Option<CompactString>,
    pub(crate) json: bool,
}

impl Expr {
    pub(crate) fn new(sql: Sql) -> Self {
        Self {
            sql,
            alias: None,
            json: false,
        }
    }

    pub(crate) fn json(sql: Sql) -> Self {
        Self {
            sql,
            alias: None,
            json: true,
        }
    }

    /// Sets the output column alias: `expr AS alias`.
    pub fn alias(mut self, alias: impl Into<CompactString>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Renders the expression with its alias, if any.
    pub(crate) fn render(&self) -> Sql {
        match &self.alias {
            Some(alias) => self.sql.clone().alias(alias.clone()),
            None => self.sql.clone(),
        }
    }

    /// Renders the expression with the alias overridden.
    ///
    /// Used by multiset wrapping, which re-aliases the inner projection to
    /// positional names.
    pub(crate) fn render_as(&self, alias: &str) -> Sql {
        self.sql.clone().alias(alias)
    }
}

impl From<Column> for Expr {
    fn from(column: Column) -> Self {
        Expr::new(column.to_sql())
    }
}

impl ToSql for Expr {
    fn to_sql(&self) -> Sql {
        self.render()
    }
}

/// A projection list: one expression or a tuple of mixed columns and
/// expressions.
pub trait Projection {
    fn into_exprs(self) -> Vec<Expr>;
}

impl Projection for Expr {
    fn into_exprs(self) -> Vec<Expr> {
        vec![self]
    }
}

impl Projection for Column {
    fn into_exprs(self) -> Vec<Expr> {
        vec![self.into()]
    }
}

macro_rules! impl_projection_tuple {
    ($($name:ident),+) => {
        impl<$($name),+> Projection for ($($name,)+)
        where
            $($name: Into<Expr>,)+
        {
            #[allow(non_snake_case)]
            fn into_exprs(self) -> Vec<Expr> {
                let ($($name,)+) = self;
                vec![$($name.into(),)+]
            }
        }
    };
}

impl_projection_tuple!(T0);
impl_projection_tuple!(T0, T1);
impl_projection_tuple!(T0, T1, T2);
impl_projection_tuple!(T0, T1, T2, T3);
impl_projection_tuple!(T0, T1, T2, T3, T4);
impl_projection_tuple!(T0, T1, T2, T3, T4, T5);
impl_projection_tuple!(T0, T1, T2, T3, T4, T5, T6);
impl_projection_tuple!(T0, T1, T2, T3, T4, T5, T6, T7);

// =============================================================================
// Conditions
// =============================================================================

fn comparison(left: impl ToSql, operator: &'static str, right: impl ToSql) -> Sql {
    left.to_sql().append_raw(operator).append(right.to_sql())
}

/// Equality condition: `left = right`
pub fn eq(left: impl ToSql, right: impl ToSql) -> Sql {
    comparison(left, " = ", right)
}

/// Inequality condition: `left <> right`
pub fn neq(left: impl ToSql, right: impl ToSql) -> Sql {
    comparison(left, " <> ", right)
}

/// Greater-than condition: `left > right`
pub fn gt(left: impl ToSql, right: impl ToSql) -> Sql {
    comparison(left, " > ", right)
}

/// Greater-than-or-equal condition: `left >= right`
pub fn gte(left: impl ToSql, right: impl ToSql) -> Sql {
    comparison(left, " >= ", right)
}

/// Less-than condition: `left < right`
pub fn lt(left: impl ToSql, right: impl ToSql) -> Sql {
    comparison(left, " < ", right)
}

/// Less-than-or-equal condition: `left <= right`
pub fn lte(left: impl ToSql, right: impl ToSql) -> Sql {
    comparison(left, " <= ", right)
}

/// Pattern-match condition: `left LIKE right`
pub fn like(left: impl ToSql, right: impl ToSql) -> Sql {
    comparison(left, " LIKE ", right)
}

/// Conjunction: `(left AND right)`
pub fn and(left: impl ToSql, right: impl ToSql) -> Sql {
    Sql::raw("(")
        .append(left.to_sql())
        .append_raw(" AND ")
        .append(right.to_sql())
        .append_raw(")")
}

/// Disjunction: `(left OR right)`
pub fn or(left: impl ToSql, right: impl ToSql) -> Sql {
    Sql::raw("(")
        .append(left.to_sql())
        .append_raw(" OR ")
        .append(right.to_sql())
        .append_raw(")")
}

// =============================================================================
// Aggregates
// =============================================================================

/// `sum(expr)` — NULL over an empty set.
pub fn sum(expr: impl ToSql) -> Expr {
    Expr::new(Sql::func("sum", expr.to_sql()))
}

/// `count(expr)` — counts non-null values.
pub fn count(expr: impl ToSql) -> Expr {
    Expr::new(Sql::func("count", expr.to_sql()))
}

/// `count(*)` — counts all rows.
pub fn count_all() -> Expr {
    Expr::new(Sql::raw("count(*)"))
}

/// `min(expr)`
pub fn min(expr: impl ToSql) -> Expr {
    Expr::new(Sql::func("min", expr.to_sql()))
}

/// `max(expr)`
pub fn max(expr: impl ToSql) -> Expr {
    Expr::new(Sql::func("max", expr.to_sql()))
}

// =============================================================================
// Ordering
// =============================================================================

/// Ascending sort: `expr ASC`
pub fn asc(expr: impl ToSql) -> Sql {
    expr.to_sql().append_raw(" ASC")
}

/// Descending sort: `expr DESC`
pub fn desc(expr: impl ToSql) -> Sql {
    expr.to_sql().append_raw(" DESC")
}

/// Sort by projection position, 1-based: `ORDER BY 1, 2`
pub fn ordinal(position: usize) -> Sql {
    Sql::raw(position.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SqlValue;

    #[test]
    fn eq_of_two_columns_is_a_correlated_reference() {
        let fa = Column::new("film_actor", "film_id");
        let film = Column::new("film", "film_id");
        let cond = eq(fa, film);
        assert_eq!(cond.sql(), r#""film_actor"."film_id" = "film"."film_id""#);
        assert!(cond.params().is_empty());
    }

    #[test]
    fn like_binds_pattern_as_parameter() {
        let title = Column::new("film", "title");
        let cond = like(title, "A%");
        assert_eq!(cond.sql(), r#""film"."title" LIKE ?"#);
        assert_eq!(cond.params(), vec![&SqlValue::Text("A%".into())]);
    }

    #[test]
    fn and_parenthesizes() {
        let id = Column::new("film", "film_id");
        let cond = and(eq(id, 1), gt(id, 0));
        assert_eq!(
            cond.sql(),
            r#"("film"."film_id" = ? AND "film"."film_id" > ?)"#
        );
        assert_eq!(cond.params().len(), 2);
    }

    #[test]
    fn comparison_operators_render_with_bound_parameters() {
        let id = Column::new("film", "film_id");
        assert_eq!(neq(id, 1).sql(), r#""film"."film_id" <> ?"#);
        assert_eq!(lt(id, 1).sql(), r#""film"."film_id" < ?"#);
        assert_eq!(lte(id, 1).sql(), r#""film"."film_id" <= ?"#);
        assert_eq!(gte(id, 1).sql(), r#""film"."film_id" >= ?"#);
    }

    #[test]
    fn or_parenthesizes() {
        let id = Column::new("film", "film_id");
        let cond = or(eq(id, 1), eq(id, 2));
        assert_eq!(
            cond.sql(),
            r#"("film"."film_id" = ? OR "film"."film_id" = ?)"#
        );
        assert_eq!(cond.params().len(), 2);
    }

    #[test]
    fn sum_renders_function_call() {
        let amount = Column::new("payment", "amount");
        let total = sum(amount).alias("total");
        assert_eq!(total.render().sql(), r#"sum("payment"."amount") AS total"#);
    }

    #[test]
    fn remaining_aggregates_render_function_calls() {
        let amount = Column::new("payment", "amount");
        assert_eq!(min(amount).render().sql(), r#"min("payment"."amount")"#);
        assert_eq!(max(amount).render().sql(), r#"max("payment"."amount")"#);
        assert_eq!(count(amount).render().sql(), r#"count("payment"."amount")"#);
        assert_eq!(count_all().render().sql(), "count(*)");
    }

    #[test]
    fn desc_renders_descending_sort() {
        let title = Column::new("film", "title");
        assert_eq!(desc(title).sql(), r#""film"."title" DESC"#);
    }

    #[test]
    fn ordinal_renders_bare_position() {
        assert_eq!(ordinal(3).sql(), "3");
        assert_eq!(asc(ordinal(1)).sql(), "1 ASC");
    }
}
