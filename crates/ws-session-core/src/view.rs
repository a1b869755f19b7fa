use std::rc::Rc;

use crate::presentation::Presentation;
use crate::status::Severity;

/// The page surface the bridge drives.
///
/// Implementations must tolerate missing regions; only the status container
/// reports its absence, because `show_status` is defined as a no-op then.
pub trait PageView {
    /// Turn the primary action into a link to the wallet installation page.
    fn show_install_prompt(&self, label: &str, install_url: &str);

    /// Run `handler` whenever the primary action is triggered.
    fn on_connect_requested(&self, handler: Rc<dyn Fn()>);

    /// Enable or disable the primary action while a connect attempt is pending.
    fn set_connect_enabled(&self, enabled: bool);

    /// Show the shortened address. An empty string clears it.
    fn set_wallet_address(&self, display: &str);

    /// Mirror `address` into every address-carrying form field. An empty
    /// string clears them.
    fn fill_address_inputs(&self, address: &str);

    fn render(&self, presentation: &Presentation);

    /// Append a notification. Returns false if the status container is absent.
    fn show_status(&self, text: &str, severity: Severity) -> bool;

    fn reload(&self);
}
