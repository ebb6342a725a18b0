use anyhow::{Result, bail};

/// Server suffix for one-to-one chats.
const USER_SERVER: &str = "s.whatsapp.net";
/// Legacy user suffix still used by older tooling.
const LEGACY_USER_SERVER: &str = "c.us";

/// Normalize a caller-supplied chat id into a JID string.
///
/// - `…@g.us` and `…@s.whatsapp.net` pass through
/// - `…@c.us` is rewritten to `…@s.whatsapp.net`
/// - a bare phone number (`+55 11 98765-4321`) becomes `5511987654321@s.whatsapp.net`
pub fn normalize_chat_id(raw: &str) -> Result<String> {
    let raw = raw.trim();
    match raw.split_once('@') {
        Some((user, server)) => {
            if user.is_empty() || server.is_empty() {
                bail!("invalid chat id '{raw}'");
            }
            if server == LEGACY_USER_SERVER {
                Ok(format!("{user}@{USER_SERVER}"))
            } else {
                Ok(raw.to_string())
            }
        },
        None => {
            let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
            let allowed = |c: char| c.is_ascii_digit() || " +-()".contains(c);
            if digits.is_empty() || !raw.chars().all(allowed) {
                bail!("invalid chat id '{raw}'");
            }
            Ok(format!("{digits}@{USER_SERVER}"))
        },
    }
}
