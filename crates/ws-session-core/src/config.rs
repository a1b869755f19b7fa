//! Bridge configuration.
//!
//! `Default` matches the page template contract: element ids, marker classes,
//! the address input name and the session endpoint path.

/// Element ids, marker classes and input names the page template provides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomContract {
    pub connect_button_id: String,
    pub wallet_address_id: String,
    pub wallet_info_id: String,
    pub status_container_id: String,
    pub auth_required_class: String,
    pub no_auth_required_class: String,
    pub address_input_name: String,
}

impl Default for DomContract {
    fn default() -> Self {
        Self {
            connect_button_id: "connect-button".to_owned(),
            wallet_address_id: "wallet-address".to_owned(),
            wallet_info_id: "wallet-info".to_owned(),
            status_container_id: "status-messages".to_owned(),
            auth_required_class: "auth-required".to_owned(),
            no_auth_required_class: "no-auth-required".to_owned(),
            address_input_name: "user_address".to_owned(),
        }
    }
}

impl DomContract {
    /// Selector matching every form field that carries the connected address.
    pub fn address_input_selector(&self) -> String {
        format!("input[name=\"{}\"]", self.address_input_name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BridgeConfig {
    pub install_url: String,
    pub install_label: String,
    pub session_endpoint: String,
    /// Lifetime of a status notification before it starts fading.
    pub status_ttl_ms: u64,
    /// Fade duration between expiry and removal.
    pub status_fade_ms: u64,
    pub dom: DomContract,
}

pub const DEFAULT_INSTALL_URL: &str = "https://metamask.io/download.html";
pub const DEFAULT_SESSION_ENDPOINT: &str = "/update_session";
pub const DEFAULT_STATUS_TTL_MS: u64 = 5_000;
pub const DEFAULT_STATUS_FADE_MS: u64 = 150;

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            install_url: DEFAULT_INSTALL_URL.to_owned(),
            install_label: "Install MetaMask".to_owned(),
            session_endpoint: DEFAULT_SESSION_ENDPOINT.to_owned(),
            status_ttl_ms: DEFAULT_STATUS_TTL_MS,
            status_fade_ms: DEFAULT_STATUS_FADE_MS,
            dom: DomContract::default(),
        }
    }
}
