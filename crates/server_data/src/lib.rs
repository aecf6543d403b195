#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

pub use server_common::{
    data::{DataError, IntoDataError, TransactionError},
    result,
};

pub mod app;
pub mod content;
pub mod db_manager;
pub mod macros;
pub mod read;
pub mod write;
pub mod write_commands;

pub use database::{DieselConnection, DieselDatabaseError};
pub use db_manager::{DatabaseManager, RouterDatabaseReadHandle, RouterDatabaseWriteHandle};
