//! HTTP client for the server session endpoint.

use async_trait::async_trait;
use gloo_net::http::Request;
use ws_api_types::{UpdateSessionRequest, UpdateSessionResponse};
use ws_session_core::{NotifyError, SessionEndpoint};

/// POSTs session updates to a same-origin path such as `/update_session`.
pub struct HttpSessionEndpoint {
    url: String,
}

impl HttpSessionEndpoint {
    pub fn new(url: &str) -> Self {
        Self { url: url.to_owned() }
    }
}

#[async_trait(?Send)]
impl SessionEndpoint for HttpSessionEndpoint {
    async fn update_session(
        &self,
        request: &UpdateSessionRequest,
    ) -> Result<UpdateSessionResponse, NotifyError> {
        let response = Request::post(&self.url)
            .json(request)
            .map_err(|e| NotifyError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        // The body decides the outcome, not the status code.
        response
            .json::<UpdateSessionResponse>()
            .await
            .map_err(|e| NotifyError::Decode(format!("{} (status {})", e, response.status())))
    }
}
