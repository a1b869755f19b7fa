//! Page view over the template's DOM contract.
//!
//! Status notifications follow the alert markup of the page stylesheet:
//! `alert alert-<severity> alert-dismissible fade show`. Each one owns its own
//! timer, so overlapping notifications never cancel each other.

use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use ws_session_core::{
    BridgeConfig, DomContract, PageView, Presentation, Severity, StatusBoard, StatusMessage,
};

use crate::dom;

pub struct DomView {
    dom: DomContract,
    fade_ms: u32,
    board: Rc<RefCell<StatusBoard<Element>>>,
}

impl DomView {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            dom: config.dom.clone(),
            fade_ms: millis(config.status_fade_ms),
            board: Rc::new(RefCell::new(StatusBoard::new(config.status_ttl_ms))),
        }
    }

    fn connect_button(&self) -> Option<Element> {
        dom::by_id(&self.dom.connect_button_id)
    }

    fn build_alert(&self, text: &str, severity: Severity) -> Result<(Element, Element), JsValue> {
        let alert = dom::create_element("div")?;
        alert.set_class_name(&format!(
            "alert {} alert-dismissible fade show",
            severity.alert_class()
        ));
        alert.set_attribute("role", "alert")?;

        let body = dom::create_element("span")?;
        dom::set_text(&body, text);
        alert.append_child(&body)?;

        let close = dom::create_element("button")?;
        close.set_attribute("type", "button")?;
        close.set_class_name("btn-close");
        close.set_attribute("data-bs-dismiss", "alert")?;
        close.set_attribute("aria-label", "Close")?;
        alert.append_child(&close)?;

        Ok((alert, close))
    }

    /// Fade the alert once it expires, then drop it from the page.
    fn schedule_expiry(&self, message: &StatusMessage) {
        let board = Rc::clone(&self.board);
        let id = message.id;
        let delay = millis(message.remaining_ms(dom::now_ms()));
        let fade = self.fade_ms;
        Timeout::new(delay, move || {
            let entry = board.borrow_mut().remove(id);
            if let Some((_, alert)) = entry {
                dom::remove_class(&alert, "show");
                Timeout::new(fade, move || alert.remove()).forget();
            }
        })
        .forget();
    }
}

/// Timer delays are `u32` milliseconds; longer configured values saturate.
fn millis(ms: u64) -> u32 {
    u32::try_from(ms).unwrap_or(u32::MAX)
}

impl PageView for DomView {
    fn show_install_prompt(&self, label: &str, install_url: &str) {
        let Some(button) = self.connect_button() else {
            return;
        };
        dom::set_text(&button, label);
        let url = install_url.to_owned();
        dom::on_click(&button, move || {
            let _ = dom::window().open_with_url_and_target(&url, "_blank");
        });
    }

    fn on_connect_requested(&self, handler: Rc<dyn Fn()>) {
        if let Some(button) = self.connect_button() {
            dom::on_click(&button, move || handler());
        }
    }

    fn set_connect_enabled(&self, enabled: bool) {
        let Some(button) = self.connect_button() else {
            return;
        };
        if enabled {
            let _ = button.remove_attribute("disabled");
        } else {
            let _ = button.set_attribute("disabled", "");
        }
    }

    fn set_wallet_address(&self, display: &str) {
        if let Some(el) = dom::by_id(&self.dom.wallet_address_id) {
            dom::set_text(&el, display);
        }
    }

    fn fill_address_inputs(&self, address: &str) {
        for input in dom::input_fields(&self.dom.address_input_selector()) {
            input.set_value(address);
        }
    }

    fn render(&self, presentation: &Presentation) {
        if let Some(button) = self.connect_button() {
            dom::set_text(&button, presentation.connect_label);
            dom::add_class(&button, presentation.button_class_add);
            dom::remove_class(&button, presentation.button_class_remove);
        }
        if let Some(info) = dom::by_id(&self.dom.wallet_info_id) {
            dom::set_visible(&info, presentation.wallet_info_visible);
        }
        for el in dom::by_class(&self.dom.auth_required_class) {
            dom::set_visible(&el, presentation.auth_required_visible);
        }
        for el in dom::by_class(&self.dom.no_auth_required_class) {
            dom::set_visible(&el, presentation.no_auth_required_visible);
        }
    }

    fn show_status(&self, text: &str, severity: Severity) -> bool {
        let Some(container) = dom::by_id(&self.dom.status_container_id) else {
            return false;
        };

        let (alert, close) = match self.build_alert(text, severity) {
            Ok(parts) => parts,
            Err(err) => {
                debug!("failed to build status alert: {:?}", err);
                return false;
            }
        };
        if container.append_child(&alert).is_err() {
            return false;
        }

        let message = self
            .board
            .borrow_mut()
            .post(text, severity, dom::now_ms(), alert.clone());

        let board = Rc::clone(&self.board);
        let id = message.id;
        dom::on_click(&close, move || {
            let entry = board.borrow_mut().remove(id);
            if let Some((_, alert)) = entry {
                alert.remove();
            }
        });

        self.schedule_expiry(&message);
        true
    }

    fn reload(&self) {
        let _ = dom::window().location().reload();
    }
}
