//! Binding to the browser-injected `window.ethereum` provider.

use async_trait::async_trait;
use js_sys::{Array, Function, Object, Promise, Reflect};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use ws_session_core::provider::{
    EVENT_ACCOUNTS_CHANGED, EVENT_CHAIN_CHANGED, METHOD_PERSONAL_SIGN, METHOD_REQUEST_ACCOUNTS,
};
use ws_session_core::{ProviderError, ProviderEvent, ProviderEventHandler, WalletProvider};

pub struct InjectedProvider {
    ethereum: Option<JsValue>,
}

impl InjectedProvider {
    pub fn from_window() -> Self {
        let ethereum = Reflect::get(&crate::dom::window(), &JsValue::from_str("ethereum"))
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null());
        Self { ethereum }
    }

    fn property(&self, name: &str) -> Option<JsValue> {
        let ethereum = self.ethereum.as_ref()?;
        Reflect::get(ethereum, &JsValue::from_str(name)).ok()
    }

    /// `ethereum.request({ method, params })`, awaited.
    async fn request(&self, method: &str, params: Option<Array>) -> Result<JsValue, ProviderError> {
        let ethereum = self.ethereum.as_ref().ok_or(ProviderError::Unavailable)?;

        let args = Object::new();
        Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method))
            .map_err(provider_error)?;
        if let Some(params) = params {
            Reflect::set(&args, &JsValue::from_str("params"), &params).map_err(provider_error)?;
        }

        let request: Function = Reflect::get(ethereum, &JsValue::from_str("request"))
            .map_err(provider_error)?
            .dyn_into()
            .map_err(|_| ProviderError::InvalidResponse("request is not a function".to_owned()))?;

        let promise: Promise = request
            .call1(ethereum, &args)
            .map_err(provider_error)?
            .dyn_into()
            .map_err(|_| ProviderError::InvalidResponse("request did not return a promise".to_owned()))?;

        JsFuture::from(promise).await.map_err(provider_error)
    }

    fn listen(&self, event: &str, callback: Closure<dyn FnMut(JsValue)>) {
        let Some(ethereum) = self.ethereum.as_ref() else {
            return;
        };
        let on = self.property("on").and_then(|f| f.dyn_into::<Function>().ok());
        match on {
            Some(on) => {
                if let Err(err) = on.call2(ethereum, &JsValue::from_str(event), callback.as_ref()) {
                    warn!("failed to subscribe to {}: {:?}", event, err);
                }
            }
            None => warn!("provider has no event subscription; {} ignored", event),
        }
        callback.forget();
    }
}

/// Map a rejected provider promise to a `ProviderError` by its `code` and `message`.
fn provider_error(err: JsValue) -> ProviderError {
    let code = Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|c| c.as_f64())
        .map(|c| c as i64);
    let message = Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    ProviderError::from_rpc(code, message)
}

fn decode_accounts(value: JsValue) -> Result<Vec<String>, ProviderError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| ProviderError::InvalidResponse(e.to_string()))
}

#[async_trait(?Send)]
impl WalletProvider for InjectedProvider {
    fn is_wallet_provider(&self) -> bool {
        self.property("isMetaMask").and_then(|v| v.as_bool()) == Some(true)
    }

    fn selected_address(&self) -> Option<String> {
        self.property("selectedAddress").and_then(|v| v.as_string())
    }

    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        let value = self.request(METHOD_REQUEST_ACCOUNTS, None).await?;
        decode_accounts(value)
    }

    async fn personal_sign(&self, message: &str, address: &str) -> Result<String, ProviderError> {
        let params = Array::of2(&JsValue::from_str(message), &JsValue::from_str(address));
        let value = self.request(METHOD_PERSONAL_SIGN, Some(params)).await?;
        value
            .as_string()
            .ok_or_else(|| ProviderError::InvalidResponse("signature is not a string".to_owned()))
    }

    fn subscribe(&self, handler: ProviderEventHandler) {
        let on_accounts = handler.clone();
        let accounts_cb = Closure::wrap(Box::new(move |value: JsValue| {
            match decode_accounts(value) {
                Ok(accounts) => on_accounts(ProviderEvent::AccountsChanged(accounts)),
                Err(err) => warn!("ignoring malformed accountsChanged payload: {}", err),
            }
        }) as Box<dyn FnMut(JsValue)>);
        self.listen(EVENT_ACCOUNTS_CHANGED, accounts_cb);

        let chain_cb = Closure::wrap(Box::new(move |value: JsValue| {
            handler(ProviderEvent::ChainChanged(value.as_string().unwrap_or_default()));
        }) as Box<dyn FnMut(JsValue)>);
        self.listen(EVENT_CHAIN_CHANGED, chain_cb);
    }
}
