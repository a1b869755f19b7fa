//! In-memory stand-ins for the provider, page, session endpoint and executor.

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use tokio::sync::oneshot;
use ws_api_types::{UpdateSessionRequest, UpdateSessionResponse};

use crate::bridge::Bridge;
use crate::config::BridgeConfig;
use crate::endpoint::{LocalTask, SessionEndpoint, Spawner};
use crate::error::{NotifyError, ProviderError};
use crate::presentation::Presentation;
use crate::provider::{ProviderEvent, ProviderEventHandler, WalletProvider};
use crate::status::{Severity, StatusBoard};
use crate::view::PageView;

pub(crate) struct FakeProvider {
    injected: bool,
    selected: Option<String>,
    accounts: RefCell<VecDeque<Result<Vec<String>, ProviderError>>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    account_requests: Cell<usize>,
    signature: RefCell<Option<Result<String, ProviderError>>>,
    sign_requests: RefCell<Vec<(String, String)>>,
    handler: RefCell<Option<ProviderEventHandler>>,
}

impl FakeProvider {
    fn build(injected: bool) -> Self {
        Self {
            injected,
            selected: None,
            accounts: RefCell::new(VecDeque::new()),
            gate: RefCell::new(None),
            account_requests: Cell::new(0),
            signature: RefCell::new(None),
            sign_requests: RefCell::new(Vec::new()),
            handler: RefCell::new(None),
        }
    }

    pub(crate) fn injected() -> Self {
        Self::build(true)
    }

    pub(crate) fn absent() -> Self {
        Self::build(false)
    }

    pub(crate) fn with_selected(mut self, address: &str) -> Self {
        self.selected = Some(address.to_owned());
        self
    }

    pub(crate) fn push_accounts(&self, result: Result<Vec<String>, ProviderError>) {
        self.accounts.borrow_mut().push_back(result);
    }

    /// Make the next account request wait until `gate` resolves.
    pub(crate) fn hold_next_request(&self, gate: oneshot::Receiver<()>) {
        self.gate.replace(Some(gate));
    }

    pub(crate) fn set_signature(&self, result: Result<String, ProviderError>) {
        self.signature.replace(Some(result));
    }

    pub(crate) fn account_requests(&self) -> usize {
        self.account_requests.get()
    }

    pub(crate) fn sign_requests(&self) -> Vec<(String, String)> {
        self.sign_requests.borrow().clone()
    }

    pub(crate) fn is_subscribed(&self) -> bool {
        self.handler.borrow().is_some()
    }

    pub(crate) fn emit(&self, event: ProviderEvent) {
        let handler = self.handler.borrow().clone();
        if let Some(handler) = handler {
            handler(event);
        }
    }
}

#[async_trait(?Send)]
impl WalletProvider for FakeProvider {
    fn is_wallet_provider(&self) -> bool {
        self.injected
    }

    fn selected_address(&self) -> Option<String> {
        self.selected.clone()
    }

    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        self.account_requests.set(self.account_requests.get() + 1);
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let next = self.accounts.borrow_mut().pop_front();
        next.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn personal_sign(&self, message: &str, address: &str) -> Result<String, ProviderError> {
        self.sign_requests
            .borrow_mut()
            .push((message.to_owned(), address.to_owned()));
        let result = self.signature.borrow().clone();
        result.unwrap_or_else(|| Err(ProviderError::Unavailable))
    }

    fn subscribe(&self, handler: ProviderEventHandler) {
        self.handler.replace(Some(handler));
    }
}

pub(crate) struct FakeView {
    has_status_container: bool,
    install_prompt: RefCell<Option<(String, String)>>,
    connect_handler: RefCell<Option<Rc<dyn Fn()>>>,
    connect_enabled: Cell<bool>,
    wallet_address: RefCell<Option<String>>,
    address_inputs: RefCell<Vec<String>>,
    presentation: RefCell<Option<Presentation>>,
    render_count: Cell<usize>,
    statuses: RefCell<StatusBoard<()>>,
    clock_ms: Cell<u64>,
    reloads: Cell<usize>,
}

impl FakeView {
    pub(crate) fn with_inputs(count: usize) -> Self {
        Self {
            has_status_container: true,
            install_prompt: RefCell::new(None),
            connect_handler: RefCell::new(None),
            connect_enabled: Cell::new(true),
            wallet_address: RefCell::new(None),
            address_inputs: RefCell::new(vec![String::new(); count]),
            presentation: RefCell::new(None),
            render_count: Cell::new(0),
            statuses: RefCell::new(StatusBoard::new(BridgeConfig::default().status_ttl_ms)),
            clock_ms: Cell::new(0),
            reloads: Cell::new(0),
        }
    }

    pub(crate) fn without_status_container() -> Self {
        Self {
            has_status_container: false,
            ..Self::with_inputs(0)
        }
    }

    pub(crate) fn click_connect(&self) {
        let handler = self.connect_handler.borrow().clone();
        if let Some(handler) = handler {
            handler();
        }
    }

    pub(crate) fn has_connect_handler(&self) -> bool {
        self.connect_handler.borrow().is_some()
    }

    pub(crate) fn install_prompt(&self) -> Option<(String, String)> {
        self.install_prompt.borrow().clone()
    }

    pub(crate) fn connect_enabled(&self) -> bool {
        self.connect_enabled.get()
    }

    pub(crate) fn wallet_address(&self) -> Option<String> {
        self.wallet_address.borrow().clone()
    }

    pub(crate) fn address_inputs(&self) -> Vec<String> {
        self.address_inputs.borrow().clone()
    }

    pub(crate) fn presentation(&self) -> Option<Presentation> {
        self.presentation.borrow().clone()
    }

    pub(crate) fn render_count(&self) -> usize {
        self.render_count.get()
    }

    pub(crate) fn statuses(&self) -> Vec<(String, Severity)> {
        self.statuses
            .borrow()
            .messages()
            .map(|m| (m.text.clone(), m.severity))
            .collect()
    }

    pub(crate) fn reloads(&self) -> usize {
        self.reloads.get()
    }
}

impl PageView for FakeView {
    fn show_install_prompt(&self, label: &str, install_url: &str) {
        self.install_prompt
            .replace(Some((label.to_owned(), install_url.to_owned())));
    }

    fn on_connect_requested(&self, handler: Rc<dyn Fn()>) {
        self.connect_handler.replace(Some(handler));
    }

    fn set_connect_enabled(&self, enabled: bool) {
        self.connect_enabled.set(enabled);
    }

    fn set_wallet_address(&self, display: &str) {
        self.wallet_address.replace(Some(display.to_owned()));
    }

    fn fill_address_inputs(&self, address: &str) {
        for input in self.address_inputs.borrow_mut().iter_mut() {
            *input = address.to_owned();
        }
    }

    fn render(&self, presentation: &Presentation) {
        self.presentation.replace(Some(presentation.clone()));
        self.render_count.set(self.render_count.get() + 1);
    }

    fn show_status(&self, text: &str, severity: Severity) -> bool {
        if !self.has_status_container {
            return false;
        }
        let now = self.clock_ms.get();
        self.statuses.borrow_mut().post(text, severity, now, ());
        self.clock_ms.set(now + 1);
        true
    }

    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }
}

pub(crate) struct FakeEndpoint {
    result: Result<UpdateSessionResponse, NotifyError>,
    requests: RefCell<Vec<UpdateSessionRequest>>,
}

impl FakeEndpoint {
    pub(crate) fn responding(response: UpdateSessionResponse) -> Self {
        Self {
            result: Ok(response),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn failing(err: NotifyError) -> Self {
        Self {
            result: Err(err),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn addresses(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|r| r.user_address.clone())
            .collect()
    }
}

#[async_trait(?Send)]
impl SessionEndpoint for FakeEndpoint {
    async fn update_session(
        &self,
        request: &UpdateSessionRequest,
    ) -> Result<UpdateSessionResponse, NotifyError> {
        self.requests.borrow_mut().push(request.clone());
        self.result.clone()
    }
}

/// Collects spawned tasks so tests decide when detached work runs.
#[derive(Default)]
pub(crate) struct QueueSpawner {
    tasks: RefCell<Vec<LocalTask>>,
}

impl QueueSpawner {
    pub(crate) fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Run queued tasks, including ones they spawn, until the queue is empty.
    pub(crate) async fn run_all(&self) {
        loop {
            let batch: Vec<LocalTask> = self.tasks.borrow_mut().drain(..).collect();
            if batch.is_empty() {
                break;
            }
            for task in batch {
                task.await;
            }
        }
    }
}

impl Spawner for QueueSpawner {
    fn spawn_local(&self, task: LocalTask) {
        self.tasks.borrow_mut().push(task);
    }
}

pub(crate) struct Harness {
    pub(crate) provider: Rc<FakeProvider>,
    pub(crate) view: Rc<FakeView>,
    pub(crate) endpoint: Rc<FakeEndpoint>,
    pub(crate) spawner: Rc<QueueSpawner>,
    pub(crate) bridge: Rc<Bridge>,
}

impl Harness {
    pub(crate) fn new(provider: FakeProvider, view: FakeView) -> Self {
        Self::with_endpoint(provider, view, FakeEndpoint::responding(UpdateSessionResponse::ok()))
    }

    pub(crate) fn with_endpoint(provider: FakeProvider, view: FakeView, endpoint: FakeEndpoint) -> Self {
        let provider = Rc::new(provider);
        let view = Rc::new(view);
        let endpoint = Rc::new(endpoint);
        let spawner = Rc::new(QueueSpawner::default());
        let bridge = Bridge::new(
            BridgeConfig::default(),
            provider.clone(),
            view.clone(),
            endpoint.clone(),
            spawner.clone(),
        );
        Self {
            provider,
            view,
            endpoint,
            spawner,
            bridge,
        }
    }
}
