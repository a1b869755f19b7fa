//! Injected wallet provider capability.

use async_trait::async_trait;
use std::rc::Rc;

use crate::error::ProviderError;

pub const METHOD_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
pub const METHOD_PERSONAL_SIGN: &str = "personal_sign";

pub const EVENT_ACCOUNTS_CHANGED: &str = "accountsChanged";
pub const EVENT_CHAIN_CHANGED: &str = "chainChanged";

/// Provider-level notifications the bridge subscribes to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderEvent {
    AccountsChanged(Vec<String>),
    ChainChanged(String),
}

pub type ProviderEventHandler = Rc<dyn Fn(ProviderEvent)>;

/// The browser-injected wallet object, or a stand-in for it.
#[async_trait(?Send)]
pub trait WalletProvider {
    /// True iff a wallet-capable provider has been injected.
    fn is_wallet_provider(&self) -> bool;

    /// Address the provider already has selected, if any.
    fn selected_address(&self) -> Option<String>;

    /// Ask for account access. May prompt the user.
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError>;

    /// Ask for a personal-message signature by `address`.
    async fn personal_sign(&self, message: &str, address: &str) -> Result<String, ProviderError>;

    /// Deliver `accountsChanged` and `chainChanged` notifications to `handler`.
    fn subscribe(&self, handler: ProviderEventHandler);
}
