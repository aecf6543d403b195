use std::future::Future;

use model::{AccessToken, CallerIdentity};
pub use server_data::app::*;

use crate::{DataError, result::Result};

pub trait GetAccessTokens {
    /// Resolve the trusted caller identity from the database.
    /// Returns None if the token is unknown.
    fn caller_identity(
        &self,
        token: AccessToken,
    ) -> impl Future<Output = Result<Option<CallerIdentity>, DataError>> + Send;
}

pub trait StateBase: Send + Sync + Clone + 'static {}
