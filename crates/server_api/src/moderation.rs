//! Routes for all authenticated members

mod report;
pub use report::*;

mod status;
pub use status::*;

mod warning;
pub use warning::*;
