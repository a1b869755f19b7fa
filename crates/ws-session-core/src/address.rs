/// Characters kept from the start of an address.
const HEAD_CHARS: usize = 6;
/// Index from which the tail of an address is kept (last 4 of a 42-char hex address).
const TAIL_START: usize = 38;

/// Display form of an address: `first6...last4` for a standard hex address.
///
/// Works on characters, so short or non-ASCII input degrades instead of panicking:
/// anything shorter than the tail offset simply has an empty tail.
pub fn short_address(address: &str) -> String {
    let head: String = address.chars().take(HEAD_CHARS).collect();
    let tail: String = address.chars().skip(TAIL_START).collect();
    format!("{head}...{tail}")
}
