use std::borrow::Cow;

const MAX_ERROR_BODY_CHARS: usize = 200;
const REDACTED: &str = "[REDACTED]";

const MARKER_PATTERNS: [&str; 8] = [
    "Authorization: Bearer ",
    "authorization: bearer ",
    "api_key=",
    "token=",
    "password=",
    "\"api_key\":\"",
    "\"token\":\"",
    "\"password\":\"",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=')
}

fn redact_after(scrubbed: &mut String, marker: &str) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let value_start = search_from + rel + marker.len();
        let value_len: usize = scrubbed[value_start..]
            .chars()
            .take_while(|c| is_secret_char(*c))
            .map(char::len_utf8)
            .sum();

        if value_len == 0 {
            search_from = value_start;
            continue;
        }

        scrubbed.replace_range(value_start..value_start + value_len, REDACTED);
        search_from = value_start + REDACTED.len();
    }
}

/// Redact credential-looking values that workflow error pages tend to echo.
pub fn scrub_secrets(input: &str) -> Cow<'_, str> {
    if !MARKER_PATTERNS.iter().any(|marker| input.contains(marker)) {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for marker in MARKER_PATTERNS {
        redact_after(&mut scrubbed, marker);
    }
    Cow::Owned(scrubbed)
}

/// Scrub and truncate an error body before it is logged or surfaced.
pub fn sanitize_error_body(input: &str) -> String {
    let scrubbed = scrub_secrets(input.trim());

    if scrubbed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return scrubbed.into_owned();
    }

    let truncated: String = scrubbed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    format!("{truncated}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_body_is_borrowed() {
        assert!(matches!(scrub_secrets("workflow failed"), Cow::Borrowed(_)));
    }

    #[test]
    fn redacts_marker_values() {
        let body = r#"{"message":"bad","token":"abc123","password":"hunter2"}"#;
        let scrubbed = sanitize_error_body(body);
        assert!(!scrubbed.contains("abc123"));
        assert!(!scrubbed.contains("hunter2"));
        assert!(scrubbed.contains(REDACTED));
    }

    #[test]
    fn redacts_bearer_header_echo() {
        let scrubbed = sanitize_error_body("Authorization: Bearer eyJhbGci.sig rejected");
        assert_eq!(scrubbed, "Authorization: Bearer [REDACTED] rejected");
    }

    #[test]
    fn bare_marker_is_left_alone() {
        assert_eq!(sanitize_error_body("token= missing"), "token= missing");
    }

    #[test]
    fn truncates_long_bodies_on_char_boundary() {
        let body = "é".repeat(300);
        let sanitized = sanitize_error_body(&body);
        assert!(sanitized.ends_with("..."));
        assert_eq!(sanitized.chars().count(), MAX_ERROR_BODY_CHARS + 3);
    }
}
