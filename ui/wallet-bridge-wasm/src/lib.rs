//! Wallet Session Bridge WASM front end.
//!
//! Binds the platform-agnostic bridge in `ws-session-core` to the browser:
//! the injected `window.ethereum` provider, the page template's DOM and the
//! `/update_session` endpoint.

pub mod api;
pub mod dom;
pub mod logging;
pub mod provider;
pub mod state;
pub mod view;

use std::rc::Rc;
use tracing::info;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use ws_session_core::{Bridge, BridgeConfig};

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();
    logging::init();

    let document = dom::document();
    if document.ready_state() == "loading" {
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            wasm_bindgen_futures::spawn_local(init());
        }) as Box<dyn FnMut(_)>);
        document.add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref())?;
        cb.forget();
    } else {
        init().await;
    }

    Ok(())
}

async fn init() {
    let config = BridgeConfig::default();
    let bridge = Bridge::new(
        config.clone(),
        Rc::new(provider::InjectedProvider::from_window()),
        Rc::new(view::DomView::new(&config)),
        Rc::new(api::HttpSessionEndpoint::new(&config.session_endpoint)),
        Rc::new(state::LocalSpawner),
    );
    state::set_bridge(Rc::clone(&bridge));

    let ready = bridge.initialize().await;
    info!("wallet bridge initialized; provider available: {}", ready);
}

/// Request account access. Resolves to `false` if the bridge is not running,
/// a connect is already pending, or the wallet refused.
#[wasm_bindgen]
pub async fn connect_wallet() -> Result<JsValue, JsValue> {
    let connected = match state::bridge() {
        Some(bridge) => bridge.connect().await,
        None => false,
    };
    Ok(JsValue::from_bool(connected))
}

/// Sign `message` with the connected account. Resolves to the signature or `null`.
#[wasm_bindgen]
pub async fn sign_message(message: String) -> Result<JsValue, JsValue> {
    let signature = match state::bridge() {
        Some(bridge) => bridge.sign_message(&message).await,
        None => None,
    };
    Ok(signature.map(JsValue::from).unwrap_or(JsValue::NULL))
}

#[wasm_bindgen]
pub fn current_account() -> Option<String> {
    state::bridge().and_then(|bridge| bridge.current_account())
}

#[wasm_bindgen]
pub fn is_connected() -> bool {
    state::bridge().is_some_and(|bridge| bridge.is_connected())
}
