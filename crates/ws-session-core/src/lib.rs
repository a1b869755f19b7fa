//! Wallet session bridge core.
//!
//! Platform-agnostic logic for connecting a page to an injected wallet
//! provider, mirroring the selected account into the page and forwarding it
//! to the server session endpoint. The browser binding lives in
//! `wallet-bridge-wasm`; everything here runs against the capability traits
//! in [`provider`], [`view`] and [`endpoint`], so it is testable without a DOM.

pub mod address;
pub mod bridge;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod presentation;
pub mod provider;
pub mod session;
pub mod status;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use address::short_address;
pub use bridge::Bridge;
pub use config::{BridgeConfig, DomContract};
pub use endpoint::{SessionEndpoint, Spawner, notify_server};
pub use error::{NotifyError, ProviderError};
pub use presentation::Presentation;
pub use provider::{ProviderEvent, ProviderEventHandler, WalletProvider};
pub use session::SessionState;
pub use status::{Severity, StatusBoard, StatusMessage};
pub use view::PageView;
