//! Small helpers shared by the D-Bus backend and the core.

use log::warn;
use std::borrow::Cow;
use std::str;

/// Decode SSID bytes for comparison and display, defaulting to an empty
/// string if the bytes are not valid UTF-8.
pub(crate) fn decode_ssid_or_empty(bytes: &[u8]) -> Cow<'static, str> {
    if bytes.is_empty() {
        return Cow::Borrowed("");
    }

    match str::from_utf8(bytes) {
        Ok(s) => Cow::Owned(s.to_owned()),
        Err(e) => {
            warn!("Invalid UTF-8 in SSID: {e}");
            Cow::Borrowed("")
        }
    }
}

/// Macro to convert a `Result` into `false` with error logging.
///
/// Used at the boolean boundary of the facade: the error is logged with the
/// given context and the enclosing function returns `false`.
///
/// Usage: `let v = or_false!(result, "context message");`
#[macro_export]
macro_rules! or_false {
    ($result:expr, $context:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => {
                log::warn!("{}: {}", $context, e);
                return false;
            }
        }
    };
}
