//! Admin only routes. The [crate::utils::AdminCaller] extractor
//! rejects callers without the admin role.

mod member;
pub use member::*;

mod report;
pub use report::*;

mod warning;
pub use warning::*;
