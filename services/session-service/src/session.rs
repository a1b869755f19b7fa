//! Browser sessions keyed by an opaque cookie, each holding the wallet
//! address the page last reported. Addresses are stored as given; proving
//! ownership of an address is not part of this service.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;
use ws_api_types::{SessionInfoResponse, UpdateSessionRequest, UpdateSessionResponse};

use crate::{AppState, bad_request, epoch_ms, internal_error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SessionRecord {
    pub(crate) user_address: String,
    pub(crate) updated_at_epoch_ms: u128,
}

impl SessionRecord {
    fn is_live(&self, now: u128, ttl_ms: u128) -> bool {
        now.saturating_sub(self.updated_at_epoch_ms) < ttl_ms
    }
}

/// In-memory sessions. Entries idle for longer than `ttl_ms` are pruned on
/// every write, so abandoned cookies do not accumulate.
pub(crate) struct SessionStore {
    ttl_ms: u128,
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl SessionStore {
    pub(crate) fn new(ttl_ms: u128) -> Self {
        Self {
            ttl_ms,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Store `user_address` under `session_id` if that session is live, else under a new id.
    /// Returns the id used and whether it was newly created.
    pub(crate) async fn upsert(
        &self,
        session_id: Option<&str>,
        user_address: &str,
        now: u128,
    ) -> (String, bool) {
        let record = SessionRecord {
            user_address: user_address.to_owned(),
            updated_at_epoch_ms: now,
        };

        let mut store = self.sessions.write().await;
        let before = store.len();
        store.retain(|_, r| r.is_live(now, self.ttl_ms));
        let pruned = before - store.len();
        if pruned > 0 {
            debug!("pruned {} expired sessions", pruned);
        }

        if let Some(id) = session_id {
            if let Some(existing) = store.get_mut(id) {
                *existing = record;
                return (id.to_owned(), false);
            }
        }

        let id = Uuid::new_v4().to_string();
        store.insert(id.clone(), record);
        (id, true)
    }

    pub(crate) async fn get(&self, session_id: &str, now: u128) -> Option<SessionRecord> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .filter(|r| r.is_live(now, self.ttl_ms))
            .cloned()
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub(crate) async fn remove(&self, session_id: &str) -> Option<SessionRecord> {
        self.sessions.write().await.remove(session_id)
    }
}

/// Value of cookie `name` from the request's `Cookie` headers.
pub(crate) fn session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn set_cookie(response: &mut Response, cookie: String) {
    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(err) => warn!("failed to encode session cookie: {}", err),
    }
}

pub(crate) async fn update_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<UpdateSessionRequest>,
) -> Response {
    let user_address = request.user_address.trim();
    if user_address.is_empty() {
        return bad_request("user_address is required").into_response();
    }

    let now = match epoch_ms() {
        Ok(now) => now,
        Err(err) => return internal_error(err).into_response(),
    };

    let cookie_name = &state.config.cookie_name;
    let existing = session_cookie(&headers, cookie_name);
    let (session_id, created) = state
        .sessions
        .upsert(existing.as_deref(), user_address, now)
        .await;
    info!("session updated for {}", user_address);

    let mut response = Json(UpdateSessionResponse::ok()).into_response();
    if created {
        set_cookie(
            &mut response,
            format!("{cookie_name}={session_id}; Path=/; HttpOnly; SameSite=Lax"),
        );
    }
    response
}

pub(crate) async fn get_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let now = match epoch_ms() {
        Ok(now) => now,
        Err(err) => return internal_error(err).into_response(),
    };

    let record = match session_cookie(&headers, &state.config.cookie_name) {
        Some(id) => state.sessions.get(&id, now).await,
        None => None,
    };

    Json(SessionInfoResponse {
        user_address: record.as_ref().map(|r| r.user_address.clone()),
        updated_at_epoch_ms: record.map(|r| r.updated_at_epoch_ms),
    })
    .into_response()
}

pub(crate) async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let cookie_name = &state.config.cookie_name;
    if let Some(id) = session_cookie(&headers, cookie_name) {
        if state.sessions.remove(&id).await.is_some() {
            info!("session cleared");
        }
    }

    let mut response = Json(UpdateSessionResponse::ok()).into_response();
    set_cookie(
        &mut response,
        format!("{cookie_name}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax"),
    );
    response
}
