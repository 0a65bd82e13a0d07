//! Result row decoding.
//!
//! [`FromRow`] maps one result row into a Rust value. Single
//! [`FromSql`](rusqlite::types::FromSql) values and tuples of them decode
//! positionally; value objects implement [`FromRow`] by hand. Multiset
//! columns arrive as JSON text and decode through [`Json`].

use rusqlite::Row;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ValueRef};
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::value::SqlValue;

/// Maps one result row into `Self`.
pub trait FromRow: Sized {
    fn from_row(row: &Row<'_>) -> Result<Self>;
}

macro_rules! impl_from_row_tuple {
    ($($idx:tt : $ty:ident),+) => {
        impl<$($ty: FromSql),+> FromRow for ($($ty,)+) {
            fn from_row(row: &Row<'_>) -> Result<Self> {
                Ok(($(row.get::<_, $ty>($idx)?,)+))
            }
        }
    };
}

impl_from_row_tuple!(0: T0);
impl_from_row_tuple!(0: T0, 1: T1);
impl_from_row_tuple!(0: T0, 1: T1, 2: T2);
impl_from_row_tuple!(0: T0, 1: T1, 2: T2, 3: T3);
impl_from_row_tuple!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);
impl_from_row_tuple!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4, 5: T5);
impl_from_row_tuple!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4, 5: T5, 6: T6);
impl_from_row_tuple!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4, 5: T5, 6: T6, 7: T7);

macro_rules! impl_from_row_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FromRow for $ty {
                fn from_row(row: &Row<'_>) -> Result<Self> {
                    Ok(row.get(0)?)
                }
            }
        )+
    };
}

impl_from_row_scalar!(i32, i64, f64, bool, String, Vec<u8>, SqlValue);

impl<T: FromSql> FromRow for Option<T> {
    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(row.get(0)?)
    }
}

impl<T: DeserializeOwned> FromRow for Json<T> {
    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(row.get(0)?)
    }
}

/// Decodes a multiset TEXT column through serde.
///
/// A multiset renders each nested row as a JSON array of its projected
/// values. serde's derived struct deserializer accepts sequences, so the
/// positional arrays map onto tuples (`Vec<(String, String)>`) or onto named
/// DTO fields (`Vec<Actor>`) directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: DeserializeOwned> FromSql for Json<T> {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        serde_json::from_str(text)
            .map(Json)
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
