/// Type must have new() and as_i64() methods.
/// Also diesel::FromSqlRow and diesel::AsExpression derives are needed.
///
/// ```
/// use simple_backend_model::diesel_i64_wrapper;
///
/// #[derive(
///     Debug,
///     diesel::FromSqlRow,
///     diesel::AsExpression,
/// )]
/// #[diesel(sql_type = diesel::sql_types::BigInt)]
/// pub struct NumberWrapper(i64);
///
/// impl NumberWrapper {
///     pub fn new(number: i64) -> Self {
///         Self(number)
///     }
///
///     pub fn as_i64(&self) -> &i64 {
///        &self.0
///     }
/// }
///
/// diesel_i64_wrapper!(NumberWrapper);
///
/// ```
#[macro_export]
macro_rules! diesel_i64_wrapper {
    ($name:ty) => {
        impl<DB: diesel::backend::Backend>
            diesel::deserialize::FromSql<diesel::sql_types::BigInt, DB> for $name
        where
            i64: diesel::deserialize::FromSql<diesel::sql_types::BigInt, DB>,
        {
            fn from_sql(
                value: <DB as diesel::backend::Backend>::RawValue<'_>,
            ) -> diesel::deserialize::Result<Self> {
                let value = i64::from_sql(value)?;
                Ok(<$name>::new(value))
            }
        }

        impl<DB: diesel::backend::Backend> diesel::serialize::ToSql<diesel::sql_types::BigInt, DB>
            for $name
        where
            i64: diesel::serialize::ToSql<diesel::sql_types::BigInt, DB>,
        {
            fn to_sql<'b>(
                &'b self,
                out: &mut diesel::serialize::Output<'b, '_, DB>,
            ) -> diesel::serialize::Result {
                self.as_i64().to_sql(out)
            }
        }
    };
}

/// Enum type must be `Copy`, have `#[repr(i64)]` and TryFrom<i64>
/// implementation. Also diesel::FromSqlRow and diesel::AsExpression derives
/// are needed.
///
/// ```
/// use simple_backend_model::diesel_i64_try_from;
///
/// #[derive(
///     Clone,
///     Copy,
///     Debug,
///     diesel::FromSqlRow,
///     diesel::AsExpression,
/// )]
/// #[diesel(sql_type = diesel::sql_types::BigInt)]
/// #[repr(i64)]
/// pub enum NumberEnum {
///     Value = 0,
/// }
///
/// impl TryFrom<i64> for NumberEnum {
///     type Error = String;
///
///     fn try_from(value: i64) -> Result<Self, Self::Error> {
///         let number_type = match value {
///             0 => Self::Value,
///             value => return Err(format!("Unknown value {}", value)),
///         };
///
///         Ok(number_type)
///     }
/// }
///
/// diesel_i64_try_from!(NumberEnum);
///
/// ```
#[macro_export]
macro_rules! diesel_i64_try_from {
    ($name:ty) => {
        impl<DB: diesel::backend::Backend>
            diesel::deserialize::FromSql<diesel::sql_types::BigInt, DB> for $name
        where
            i64: diesel::deserialize::FromSql<diesel::sql_types::BigInt, DB>,
        {
            fn from_sql(
                value: <DB as diesel::backend::Backend>::RawValue<'_>,
            ) -> diesel::deserialize::Result<Self> {
                let value = i64::from_sql(value)?;
                TryInto::<$name>::try_into(value).map_err(|e| e.to_string().into())
            }
        }

        impl diesel::serialize::ToSql<diesel::sql_types::BigInt, diesel::sqlite::Sqlite> for $name
        where
            i64: diesel::serialize::ToSql<diesel::sql_types::BigInt, diesel::sqlite::Sqlite>,
        {
            fn to_sql<'b>(
                &'b self,
                out: &mut diesel::serialize::Output<'b, '_, diesel::sqlite::Sqlite>,
            ) -> diesel::serialize::Result {
                let value = *self as i64;
                out.set_value(value);
                Ok(diesel::serialize::IsNull::No)
            }
        }
    };
}
