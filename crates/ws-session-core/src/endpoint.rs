//! Server session synchronisation.
//!
//! The notification is fire-and-forget: the bridge spawns [`notify_server`]
//! and never looks at the outcome. Failures end up in the log only.

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use tracing::{info, warn};
use ws_api_types::{UpdateSessionRequest, UpdateSessionResponse};

use crate::error::NotifyError;

#[async_trait(?Send)]
pub trait SessionEndpoint {
    async fn update_session(
        &self,
        request: &UpdateSessionRequest,
    ) -> Result<UpdateSessionResponse, NotifyError>;
}

pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Runs detached work on the page's event loop.
pub trait Spawner {
    fn spawn_local(&self, task: LocalTask);
}

/// POST the address to the session endpoint and log the outcome. No retry.
pub async fn notify_server(endpoint: &dyn SessionEndpoint, address: &str) -> Result<(), NotifyError> {
    let request = UpdateSessionRequest {
        user_address: address.to_owned(),
    };

    let result = match endpoint.update_session(&request).await {
        Ok(response) if response.success => Ok(()),
        Ok(_) => Err(NotifyError::Rejected),
        Err(err) => Err(err),
    };

    match &result {
        Ok(()) => info!("session updated successfully"),
        Err(NotifyError::Rejected) => warn!("failed to update session"),
        Err(err) => warn!("error updating session: {}", err),
    }

    result
}
