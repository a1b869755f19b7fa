//! Connected / disconnected presentation of the fixed UI regions.

pub const CONNECTED_LABEL: &str = "Connected";
pub const DISCONNECTED_LABEL: &str = "Connect Wallet";

/// Everything `update_ui` writes to the page, derived only from the connection flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    pub connect_label: &'static str,
    pub button_class_add: &'static str,
    pub button_class_remove: &'static str,
    pub wallet_info_visible: bool,
    pub auth_required_visible: bool,
    pub no_auth_required_visible: bool,
}

impl Presentation {
    pub fn for_connection(connected: bool) -> Self {
        if connected {
            Self {
                connect_label: CONNECTED_LABEL,
                button_class_add: "btn-success",
                button_class_remove: "btn-primary",
                wallet_info_visible: true,
                auth_required_visible: true,
                no_auth_required_visible: false,
            }
        } else {
            Self {
                connect_label: DISCONNECTED_LABEL,
                button_class_add: "btn-primary",
                button_class_remove: "btn-success",
                wallet_info_visible: false,
                auth_required_visible: false,
                no_auth_required_visible: true,
            }
        }
    }
}

/// CSS `display` value for a visibility flag.
pub fn display_value(visible: bool) -> &'static str {
    if visible { "block" } else { "none" }
}
