//! Preview document composition.
//!
//! Builds one self-contained HTML document from the three buffers:
//!
//! ```text
//! <head>  <style>{style}</style>
//! <body>  {markup}
//!         <script>bridge</script>
//!         <script>try { {script} } catch (e) { console.error(..) }</script>
//! ```
//!
//! The bridge element always precedes the user script, so every console
//! call made by user code is already intercepted.

use crate::bridge::Transport;

/// Compose with the frame-hosted bridge (`parent.postMessage`).
pub fn compose(markup: &str, style: &str, script: &str) -> String {
    compose_with(Transport::ParentFrame, markup, style, script)
}

/// Compose with a specific bridge transport.
pub fn compose_with(transport: Transport, markup: &str, style: &str, script: &str) -> String {
    let bridge = transport.script_tag();
    let style = escape_raw_text(style, "style");
    let script = escape_raw_text(script, "script");

    format!(
        r#"<!doctype html>
<html>
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width,initial-scale=1" />
<style>{style}</style>
</head>
<body>
{markup}
{bridge}
<script>
try{{
{script}
}}catch(e){{
  console.error(e && (e.stack || e.message) || e);
}}
</script>
</body>
</html>"#
    )
}

/// Keep raw text from terminating its `<style>`/`<script>` element early.
///
/// `</script` becomes `<\/script`, which is the same text to the script
/// engine (and to CSS, where the escape is ignored inside strings and
/// comments the same way).
fn escape_raw_text<'a>(text: &'a str, tag: &str) -> std::borrow::Cow<'a, str> {
    let needle_len = tag.len() + 2;
    let bytes = text.as_bytes();
    let closes_at = |i: usize| {
        bytes[i..].len() >= needle_len
            && bytes[i] == b'<'
            && bytes[i + 1] == b'/'
            && bytes[i + 2..i + needle_len].eq_ignore_ascii_case(tag.as_bytes())
    };

    if !(0..bytes.len()).any(closes_at) {
        return std::borrow::Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;
    for i in (0..bytes.len()).filter(|&i| closes_at(i)) {
        out.push_str(&text[last..i + 1]);
        out.push('\\');
        last = i + 1;
    }
    out.push_str(&text[last..]);
    std::borrow::Cow::Owned(out)
}
