#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

//! Data types for API and database.

pub use simple_backend_model::UnixTime;

pub mod content;
pub mod member;
pub mod member_admin;
pub mod policy;
pub mod report;
pub mod token;
pub mod validation;
pub mod warning;

pub mod schema;

pub use content::*;
pub use member::*;
pub use member_admin::*;
pub use policy::*;
pub use report::*;
pub use token::*;
pub use validation::*;
pub use warning::*;

pub type Db = diesel::sqlite::Sqlite;
