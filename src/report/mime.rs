use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;

const BOUNDARY: &str = "boundaryboundary";

/// Builds a multipart/alternative message by hand: a UTF-8 plain-text part
/// and a base64-encoded HTML part, with an RFC 2047 encoded subject.
pub fn build_mime(
    to: &str,
    from: &str,
    sender_name: &str,
    subject: &str,
    text_body: &str,
    html_body: &str,
) -> String {
    let encoded_subject = format!("=?UTF-8?B?{}?=", STANDARD.encode(subject));
    [
        "MIME-Version: 1.0".to_string(),
        format!("To: {}", to),
        format!("From: \"{}\" <{}>", sender_name, from),
        format!("Subject: {}", encoded_subject),
        format!("Content-Type: multipart/alternative; boundary={}", BOUNDARY),
        String::new(),
        format!("--{}", BOUNDARY),
        "Content-Type: text/plain; charset=UTF-8".to_string(),
        String::new(),
        text_body.to_string(),
        String::new(),
        format!("--{}", BOUNDARY),
        "Content-Type: text/html; charset=UTF-8".to_string(),
        "Content-Transfer-Encoding: base64".to_string(),
        String::new(),
        STANDARD.encode(html_body),
        String::new(),
        format!("--{}--", BOUNDARY),
    ]
    .join("\r\n")
}

/// Web-safe base64 of the full message, as the send endpoint expects.
pub fn encode_raw(mime: &str) -> String {
    URL_SAFE.encode(mime)
}
