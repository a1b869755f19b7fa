//! The wallet session bridge controller.
//!
//! Owns the page's [`SessionState`] and drives the view, provider and session
//! endpoint through their capability traits. Everything runs on the page's
//! single event loop: state sits in a `RefCell` and is never borrowed across
//! an `.await`.
//!
//! States: `Disconnected` → `Connected(address)`. A non-empty account list with
//! a new first address (re)connects, an empty list disconnects, and the same
//! address again is a no-op.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::address::short_address;
use crate::config::BridgeConfig;
use crate::endpoint::{SessionEndpoint, Spawner, notify_server};
use crate::error::ProviderError;
use crate::presentation::Presentation;
use crate::provider::{ProviderEvent, WalletProvider};
use crate::session::SessionState;
use crate::status::Severity;
use crate::view::PageView;

pub const CONNECT_REJECTED_MESSAGE: &str = "Please connect to MetaMask to use this dApp";
pub const NO_ACCOUNTS_MESSAGE: &str = "Please connect to MetaMask";

pub struct Bridge {
    config: BridgeConfig,
    provider: Rc<dyn WalletProvider>,
    view: Rc<dyn PageView>,
    endpoint: Rc<dyn SessionEndpoint>,
    spawner: Rc<dyn Spawner>,
    state: RefCell<SessionState>,
    connecting: Cell<bool>,
}

impl Bridge {
    pub fn new(
        config: BridgeConfig,
        provider: Rc<dyn WalletProvider>,
        view: Rc<dyn PageView>,
        endpoint: Rc<dyn SessionEndpoint>,
        spawner: Rc<dyn Spawner>,
    ) -> Rc<Self> {
        Rc::new(Self {
            config,
            provider,
            view,
            endpoint,
            spawner,
            state: RefCell::new(SessionState::Disconnected),
            connecting: Cell::new(false),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn current_account(&self) -> Option<String> {
        self.state.borrow().current_account().map(str::to_owned)
    }

    pub fn is_connected(&self) -> bool {
        self.state.borrow().is_connected()
    }

    pub fn is_connecting(&self) -> bool {
        self.connecting.get()
    }

    pub fn detect_provider(&self) -> bool {
        self.provider.is_wallet_provider()
    }

    /// Wire the page to the provider.
    ///
    /// Without a provider the primary action becomes an install link and this
    /// returns false. Otherwise the connect action and provider listeners are
    /// attached, and an already-selected address is connected right away.
    pub async fn initialize(self: &Rc<Self>) -> bool {
        if !self.detect_provider() {
            info!("no wallet provider detected; showing install prompt");
            self.view
                .show_install_prompt(&self.config.install_label, &self.config.install_url);
            return false;
        }

        let weak = Rc::downgrade(self);
        let spawner = Rc::clone(&self.spawner);
        self.view.on_connect_requested(Rc::new(move || {
            if let Some(bridge) = weak.upgrade() {
                spawner.spawn_local(Box::pin(async move {
                    bridge.connect().await;
                }));
            }
        }));

        let weak = Rc::downgrade(self);
        self.provider.subscribe(Rc::new(move |event| {
            if let Some(bridge) = weak.upgrade() {
                bridge.handle_provider_event(event);
            }
        }));

        if let Some(selected) = self.provider.selected_address() {
            debug!("provider already has {} selected", selected);
            self.connect().await;
        }

        true
    }

    /// Request account access from the provider.
    ///
    /// Attempts are serialized: while one is outstanding the action is disabled
    /// and further calls return false without reaching the provider.
    pub async fn connect(&self) -> bool {
        if self.connecting.replace(true) {
            debug!("connect already in progress; ignoring");
            return false;
        }
        self.view.set_connect_enabled(false);

        let result = self.provider.request_accounts().await;

        self.connecting.set(false);
        self.view.set_connect_enabled(true);

        match result {
            Ok(accounts) => {
                self.handle_accounts_changed(&accounts);
                true
            }
            Err(err) if err.is_user_rejected() => {
                info!("user rejected account access: {}", err);
                self.show_status(CONNECT_REJECTED_MESSAGE, Severity::Warning);
                false
            }
            Err(err) => {
                warn!("failed to connect to wallet: {}", err);
                self.show_status(&format!("Error connecting to MetaMask: {err}"), Severity::Error);
                false
            }
        }
    }

    pub fn handle_provider_event(&self, event: ProviderEvent) {
        match event {
            ProviderEvent::AccountsChanged(accounts) => self.handle_accounts_changed(&accounts),
            ProviderEvent::ChainChanged(chain) => {
                info!("chain changed to {}; reloading page", chain);
                self.view.reload();
            }
        }
    }

    pub fn handle_accounts_changed(&self, accounts: &[String]) {
        let Some(address) = accounts.first() else {
            info!("wallet reported no accounts; disconnecting");
            self.state.replace(SessionState::Disconnected);
            self.view.set_wallet_address("");
            self.view.fill_address_inputs("");
            self.update_ui(false);
            self.show_status(NO_ACCOUNTS_MESSAGE, Severity::Warning);
            return;
        };

        if self.state.borrow().is_current(address) {
            return;
        }

        self.state.replace(SessionState::Connected(address.clone()));
        info!("connected account {}", address);

        let display = short_address(address);
        self.view.set_wallet_address(&display);
        self.view.fill_address_inputs(address);
        self.update_ui(true);
        self.spawn_session_update(address);
        self.show_status(&format!("Connected: {display}"), Severity::Success);
    }

    pub fn update_ui(&self, connected: bool) {
        self.view.render(&Presentation::for_connection(connected));
    }

    /// Fire-and-forget sync of the server session. The result is only logged.
    pub fn spawn_session_update(&self, address: &str) {
        let endpoint = Rc::clone(&self.endpoint);
        let address = address.to_owned();
        self.spawner.spawn_local(Box::pin(async move {
            let _ = notify_server(endpoint.as_ref(), &address).await;
        }));
    }

    pub fn show_status(&self, text: &str, severity: Severity) -> bool {
        let shown = self.view.show_status(text, severity);
        if !shown {
            debug!("status container missing; dropped {} message", severity.as_str());
        }
        shown
    }

    /// Ask the provider to sign `message` with the connected account.
    ///
    /// Any failure, user rejection included, shows one generic error.
    pub async fn sign_message(&self, message: &str) -> Option<String> {
        let result = match self.current_account() {
            Some(account) => self.provider.personal_sign(message, &account).await,
            None => Err(ProviderError::NotConnected),
        };

        match result {
            Ok(signature) => Some(signature),
            Err(err) => {
                warn!("failed to sign message: {}", err);
                self.show_status(&format!("Error signing message: {err}"), Severity::Error);
                None
            }
        }
    }
}
