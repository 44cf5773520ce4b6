//! Roles accessor

use std::sync::Arc;

use reqwest::Method;

use hyperproof_domain::{Result, Role};

use crate::http::Dispatcher;

/// Access to the `/roles` endpoint.
#[derive(Clone)]
pub struct RolesApi {
    dispatcher: Arc<Dispatcher>,
}

impl RolesApi {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Retrieve the roles defined in the organization.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_roles(&self) -> Result<Vec<Role>> {
        self.dispatcher.request(Method::GET, "/roles", &[], None).await
    }

    /// Raw-mode variant of [`Self::get_roles`].
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_roles_raw(&self) -> Result<String> {
        self.dispatcher.request_raw(Method::GET, "/roles", &[], None).await
    }
}
