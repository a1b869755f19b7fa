/// Connection state of the page.
///
/// The connected flag and the current account are both read off this enum,
/// so one can never be set without the other.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Disconnected,
    Connected(String),
}

impl SessionState {
    pub fn current_account(&self) -> Option<&str> {
        match self {
            SessionState::Disconnected => None,
            SessionState::Connected(address) => Some(address),
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, SessionState::Connected(_))
    }

    pub fn is_current(&self, address: &str) -> bool {
        self.current_account() == Some(address)
    }
}
