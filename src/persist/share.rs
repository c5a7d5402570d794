//! Share tokens: buffers only, packed into a URL fragment.
//!
//! ```text
//! {h, c, j} --JSON--> UTF-8 bytes --base64--> "#p=" + token
//! ```
//!
//! Preferences stay out of the token so a shared snippet does not carry
//! the sharer's theme or auto-run choice.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use serde_json::Value;

use crate::project::ProjectState;

/// Fragment marker that introduces a share token.
pub const SHARE_MARKER: &str = "#p=";

/// Standard alphabet, padded on encode, padding optional on decode.
const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Serialize)]
struct SharePayload<'a> {
    h: &'a str,
    c: &'a str,
    j: &'a str,
}

/// The buffers carried by a share token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedBuffers {
    pub markup: String,
    pub style: String,
    pub script: String,
}

pub fn to_share_token(state: &ProjectState) -> String {
    let payload = SharePayload {
        h: &state.markup,
        c: &state.style,
        j: &state.script,
    };
    let json = serde_json::to_string(&payload).unwrap_or_default();
    format!("{SHARE_MARKER}{}", ENGINE.encode(json.as_bytes()))
}

/// Decode a share fragment.
///
/// Accepts `#p=…`, or any URL whose fragment is `p=…`. Returns `None` for
/// a missing marker, bad base64, invalid UTF-8 or anything but a JSON object.
pub fn from_share_token(input: &str) -> Option<SharedBuffers> {
    let fragment = extract_fragment(input.trim())?;
    let encoded = fragment.strip_prefix(&SHARE_MARKER[1..])?;

    let encoded = percent_decode_str(encoded).decode_utf8().ok()?;
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    let bytes = ENGINE.decode(compact.as_bytes()).ok()?;
    let json = String::from_utf8(bytes).ok()?;
    let Value::Object(map) = serde_json::from_str::<Value>(&json).ok()? else {
        return None;
    };

    let boot = ProjectState::bootstrap();
    let text = |key: &str, default: &str| {
        map.get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };

    Some(SharedBuffers {
        markup: text("h", &boot.markup),
        style: text("c", &boot.style),
        script: text("j", &boot.script),
    })
}

/// Fragment part (without `#`) of a bare fragment or a full URL.
fn extract_fragment(input: &str) -> Option<&str> {
    if let Some(fragment) = input.strip_prefix('#') {
        return Some(fragment);
    }
    // Full URL: everything after the first '#'
    let (_, fragment) = input.split_once('#')?;
    Some(fragment)
}

/// Build a share link from a base location (its fragment is replaced).
pub fn share_url(base: &url::Url, state: &ProjectState) -> String {
    let mut base = base.clone();
    base.set_fragment(None);
    format!("{}{}", base, to_share_token(state))
}
