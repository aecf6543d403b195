#![deny(unsafe_code)]
#![warn(unused_crate_dependencies)]

pub mod current;
mod db_macros;

use std::fmt::Debug;

use diesel_migrations::{EmbeddedMigrations, embed_migrations};
use error_stack::{Result, ResultExt};
pub use model::schema;
pub use simple_backend_database::diesel_db::{DieselConnection, DieselDatabaseError};

pub const DIESEL_MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub trait IntoDatabaseError<Err: error_stack::Context>: ResultExt + Sized {
    fn into_db_error<T: Debug>(self, request_context: T) -> Result<Self::Ok, Err>;
}

impl<Ok> IntoDatabaseError<DieselDatabaseError> for std::result::Result<Ok, diesel::result::Error> {
    #[track_caller]
    fn into_db_error<T: Debug>(
        self,
        request_context: T,
    ) -> Result<<Self as ResultExt>::Ok, DieselDatabaseError> {
        self.change_context(DieselDatabaseError::DieselError)
            .attach_printable_lazy(|| format!("{:?}", request_context))
    }
}
