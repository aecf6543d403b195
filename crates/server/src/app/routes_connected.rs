use axum::{Router, middleware};
use server_api::{moderation, moderation_admin, utils::authenticate_with_access_token};

use crate::app::S;

/// Routes which require a valid access token of an active member.
pub struct ConnectedApp {
    state: S,
}

impl ConnectedApp {
    pub fn new(state: S) -> Self {
        Self { state }
    }

    pub fn state(&self) -> S {
        self.state.clone()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .merge(moderation::report_router(self.state()))
            .merge(moderation::status_router(self.state()))
            .merge(moderation::warning_router(self.state()))
            .merge(moderation_admin::admin_report_router(self.state()))
            .merge(moderation_admin::admin_warning_router(self.state()))
            .merge(moderation_admin::admin_member_router(self.state()))
            .route_layer({
                middleware::from_fn_with_state(
                    self.state(),
                    authenticate_with_access_token::<S>,
                )
            })
    }
}
