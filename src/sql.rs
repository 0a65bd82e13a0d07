//! SQL fragment assembly.
//!
//! A [`Sql`] is a sequence of chunks that carries statement text and bound
//! parameters together, so a fragment can be composed, nested, and aliased
//! without losing track of parameter order. Rendering with [`Sql::sql`] emits
//! `?` placeholders in the same depth-first order that [`Sql::params`] yields
//! values.

use compact_str::CompactString;
use smallvec::{SmallVec, smallvec};

use crate::schema::Column;
use crate::value::SqlValue;

/// A chunk is one part of an SQL statement.
#[derive(Debug, Clone)]
pub enum SqlChunk {
    Text(CompactString),
    /// A bound parameter, rendered as `?`
    Param(SqlValue),
    /// A nested fragment
    Sql(Box<Sql>),
    /// A column reference, rendered `"table"."column"`
    Column(Column),
    /// A table reference, rendered `"table"`
    Table(&'static str),
    /// An alias wrapping any chunk: `chunk AS alias`
    Alias {
        chunk: Box<SqlChunk>,
        alias: CompactString,
    },
    /// A subquery wrapped in parentheses: `(SELECT ...)`
    Subquery(Box<Sql>),
}

/// A SQL statement or fragment with parameters.
#[derive(Debug, Clone, Default)]
pub struct Sql {
    pub(crate) chunks: SmallVec<[SqlChunk; 4]>,
}

impl Sql {
    /// Creates a new empty fragment.
    pub fn empty() -> Self {
        Sql {
            chunks: SmallVec::new(),
        }
    }

    /// Creates a fragment from a raw string.
    ///
    /// The string is treated as literal SQL text, not a parameter.
    pub fn raw(text: impl AsRef<str>) -> Self {
        Sql {
            chunks: smallvec![SqlChunk::Text(CompactString::new(text.as_ref()))],
        }
    }

    /// Creates a fragment representing a single bound parameter.
    pub fn parameter(value: impl Into<SqlValue>) -> Self {
        Sql {
            chunks: smallvec![SqlChunk::Param(value.into())],
        }
    }

    /// Creates a fragment referencing a column.
    pub fn column(column: Column) -> Self {
        Sql {
            chunks: smallvec![SqlChunk::Column(column)],
        }
    }

    /// Creates a fragment referencing a table.
    pub fn table(name: &'static str) -> Self {
        Sql {
            chunks: smallvec![SqlChunk::Table(name)],
        }
    }

    /// Appends a raw string to this fragment.
    pub fn append_raw(mut self, text: impl AsRef<str>) -> Self {
        self.chunks
            .push(SqlChunk::Text(CompactString::new(text.as_ref())));
        self
    }

    /// Appends another fragment to this one, merging text and parameters.
    pub fn append(mut self, other: impl ToSql) -> Self {
        self.chunks.extend(other.to_sql().chunks);
        self
    }

    /// Joins multiple fragments with a separator.
    ///
    /// The separator goes between fragments, not before the first or after
    /// the last.
    pub fn join<I>(sqls: I, separator: &'static str) -> Sql
    where
        I: IntoIterator<Item = Sql>,
    {
        let mut chunks = SmallVec::new();
        for (i, sql) in sqls.into_iter().enumerate() {
            if i > 0 {
                chunks.push(SqlChunk::Text(CompactString::new(separator)));
            }
            chunks.extend(sql.chunks);
        }
        Sql { chunks }
    }

    /// Renders a function call: `name(args)`.
    pub fn func(name: &'static str, args: Sql) -> Sql {
        Sql::raw(name).append_raw("(").append(args).append_raw(")")
    }

    /// Creates an aliased version of this fragment: `self AS alias`.
    pub fn alias(self, alias: impl Into<CompactString>) -> Sql {
        Sql {
            chunks: smallvec![SqlChunk::Alias {
                chunk: Box::new(SqlChunk::Sql(Box::new(self))),
                alias: alias.into(),
            }],
        }
    }

    /// Wraps this fragment as a parenthesized subquery.
    pub fn subquery(self) -> Sql {
        Sql {
            chunks: smallvec![SqlChunk::Subquery(Box::new(self))],
        }
    }

    /// Returns the SQL text with `?` placeholders for parameters.
    pub fn sql(&self) -> String {
        let mut buf = CompactString::default();
        for chunk in &self.chunks {
            write_chunk(chunk, &mut buf);
        }
        buf.into()
    }

    /// Returns the parameter values in placeholder order.
    pub fn params(&self) -> Vec<&SqlValue> {
        let mut out = Vec::new();
        for chunk in &self.chunks {
            collect_params(chunk, &mut out);
        }
        out
    }
}

fn write_chunk(chunk: &SqlChunk, buf: &mut CompactString) {
    match chunk {
        SqlChunk::Text(text) => buf.push_str(text),
        SqlChunk::Param(_) => buf.push('?'),
        SqlChunk::Sql(sql) => {
            for inner in &sql.chunks {
                write_chunk(inner, buf);
            }
        }
        SqlChunk::Column(column) => {
            buf.push('"');
            buf.push_str(column.table);
            buf.push_str(r#"".""#);
            buf.push_str(column.name);
            buf.push('"');
        }
        SqlChunk::Table(name) => {
            buf.push('"');
            buf.push_str(name);
            buf.push('"');
        }
        SqlChunk::Alias { chunk, alias } => {
            write_chunk(chunk, buf);
            buf.push_str(" AS ");
            buf.push_str(alias);
        }
        SqlChunk::Subquery(sql) => {
            buf.push('(');
            for inner in &sql.chunks {
                write_chunk(inner, buf);
            }
            buf.push(')');
        }
    }
}

fn collect_params<'a>(chunk: &'a SqlChunk, out: &mut Vec<&'a SqlValue>) {
    match chunk {
        SqlChunk::Param(value) => out.push(value),
        SqlChunk::Sql(sql) | SqlChunk::Subquery(sql) => {
            for inner in &sql.chunks {
                collect_params(inner, out);
            }
        }
        SqlChunk::Alias { chunk, .. } => collect_params(chunk, out),
        _ => {}
    }
}

impl std::fmt::Display for Sql {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, r#"sql: "{}", params: {:?}"#, self.sql(), self.params())
    }
}

/// Conversion into a [`Sql`] fragment.
///
/// Columns render as references, plain Rust values become bound parameters.
pub trait ToSql {
    fn to_sql(&self) -> Sql;
}

impl ToSql for Sql {
    fn to_sql(&self) -> Sql {
        self.clone()
    }
}

impl<T: ToSql + ?Sized> ToSql for &T {
    fn to_sql(&self) -> Sql {
        (**self).to_sql()
    }
}

impl ToSql for Column {
    fn to_sql(&self) -> Sql {
        Sql::column(*self)
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> Sql {
        Sql::parameter(self.clone())
    }
}

impl ToSql for str {
    fn to_sql(&self) -> Sql {
        Sql::parameter(self.to_owned())
    }
}

macro_rules! impl_to_sql_param {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ToSql for $ty {
                fn to_sql(&self) -> Sql {
                    Sql::parameter(self.clone())
                }
            }
        )+
    };
}

impl_to_sql_param!(i32, i64, f64, bool, String);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;

    #[test]
    fn raw_and_append() {
        let sql = Sql::raw("SELECT 1").append_raw(" + 1");
        assert_eq!(sql.sql(), "SELECT 1 + 1");
        assert!(sql.params().is_empty());
    }

    #[test]
    fn column_rendering_is_qualified_and_quoted() {
        let col = Column::new("film", "title");
        assert_eq!(col.to_sql().sql(), r#""film"."title""#);
    }

    #[test]
    fn parameters_render_in_order() {
        let sql = Sql::raw("a = ")
            .append(Sql::parameter(1))
            .append_raw(" AND b = ")
            .append(Sql::parameter("x"));
        assert_eq!(sql.sql(), "a = ? AND b = ?");
        assert_eq!(
            sql.params(),
            vec![&SqlValue::Integer(1), &SqlValue::Text("x".into())]
        );
    }

    #[test]
    fn join_interleaves_separator() {
        let sql = Sql::join([Sql::raw("a"), Sql::raw("b"), Sql::raw("c")], ", ");
        assert_eq!(sql.sql(), "a, b, c");
    }

    #[test]
    fn join_of_one_has_no_separator() {
        let sql = Sql::join([Sql::raw("a")], ", ");
        assert_eq!(sql.sql(), "a");
    }

    #[test]
    fn alias_keeps_parameters() {
        let sql = Sql::raw("x + ").append(Sql::parameter(2)).alias("y");
        assert_eq!(sql.sql(), "x + ? AS y");
        assert_eq!(sql.params(), vec![&SqlValue::Integer(2)]);
    }

    #[test]
    fn subquery_wraps_in_parens_and_keeps_parameters() {
        let inner = Sql::raw("SELECT ").append(Sql::parameter(7));
        let sql = Sql::raw("x IN ").append(inner.subquery());
        assert_eq!(sql.sql(), "x IN (SELECT ?)");
        assert_eq!(sql.params(), vec![&SqlValue::Integer(7)]);
    }

    #[test]
    fn func_renders_call() {
        let sql = Sql::func("sum", Sql::column(Column::new("payment", "amount")));
        assert_eq!(sql.sql(), r#"sum("payment"."amount")"#);
    }

    #[test]
    fn empty_fragment_renders_nothing() {
        assert_eq!(Sql::empty().sql(), "");
    }
}
