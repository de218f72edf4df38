//! Input Classification and Sanitization
//!
//! Pure predicates over trimmed strings plus sanitization helpers.
//! All functions are deterministic; the sanitizers are idempotent
//! (`sanitize(sanitize(x)) == sanitize(x)`).

use std::net::IpAddr;

/// Check basic email shape: one `@`, non-empty local part, dotted
/// domain with an alphabetic TLD of at least two characters.
pub fn is_email(s: &str) -> bool {
    let s = s.trim();
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return false;
    }

    if domain.is_empty() || !domain.contains('.') {
        return false;
    }
    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return false;
    }
    if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
        return false;
    }
    if domain.starts_with('-') || domain.ends_with('-') {
        return false;
    }

    // TLD must be alphabetic, two characters or more
    match domain.rsplit_once('.') {
        Some((_, tld)) => tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()),
        None => false,
    }
}

/// E.164-like phone shape: optional `+`, 8 to 15 digits, no leading zero
pub fn is_phone(s: &str) -> bool {
    let s = s.trim();
    let digits = s.strip_prefix('+').unwrap_or(s);
    if !(8..=15).contains(&digits.len()) {
        return false;
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    !digits.starts_with('0')
}

/// Integer string: optional sign followed by ASCII digits
pub fn is_number(s: &str) -> bool {
    let s = s.trim();
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// IPv4 or IPv6 literal
pub fn is_valid_ip(s: &str) -> bool {
    s.trim().parse::<IpAddr>().is_ok()
}

/// Strip control characters and trim surrounding whitespace.
///
/// Characters are removed rather than escaped so applying the function
/// twice yields the same result.
pub fn sanitize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// [`sanitize`] plus removal of HTML-significant characters
pub fn sanitize_string(s: &str) -> String {
    let stripped: String = s
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '<' | '>' | '"' | '\'' | '`' | '&'))
        .collect();
    stripped.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_email_valid() {
        assert!(is_email("user@example.com"));
        assert!(is_email("user.name@example.co.jp"));
        assert!(is_email("user+tag@example.com"));
        assert!(is_email("  user@example.com  ")); // trimmed first
    }

    #[test]
    fn test_is_email_invalid() {
        assert!(!is_email(""));
        assert!(!is_email("userexample.com"));
        assert!(!is_email("user@"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("user@@example.com"));
        assert!(!is_email("user@example"));
        assert!(!is_email("user@example..com"));
        assert!(!is_email("user@example.c"));
        assert!(!is_email("user@example.123"));
        assert!(!is_email("user@-example.com"));
    }

    #[test]
    fn test_is_phone() {
        assert!(is_phone("+14155552671"));
        assert!(is_phone("14155552671"));
        assert!(is_phone("  +2348012345678 "));
        assert!(!is_phone("+0123456789")); // leading zero
        assert!(!is_phone("12345")); // too short
        assert!(!is_phone("+1234567890123456")); // too long
        assert!(!is_phone("+1415555abcd"));
        assert!(!is_phone(""));
    }

    #[test]
    fn test_is_number() {
        assert!(is_number("12345"));
        assert!(is_number("-42"));
        assert!(is_number("+7"));
        assert!(!is_number(""));
        assert!(!is_number("12.5"));
        assert!(!is_number("abc"));
        assert!(!is_number("-"));
    }

    #[test]
    fn test_is_valid_ip() {
        assert!(is_valid_ip("192.168.1.1"));
        assert!(is_valid_ip("::1"));
        assert!(is_valid_ip("2001:db8::8a2e:370:7334"));
        assert!(!is_valid_ip("999.1.1.1"));
        assert!(!is_valid_ip("not-an-ip"));
        assert!(!is_valid_ip(""));
    }

    #[test]
    fn test_sanitize_strips_control_chars() {
        assert_eq!(sanitize("hel\x00lo\n"), "hello");
        assert_eq!(sanitize("  padded  "), "padded");
    }

    #[test]
    fn test_sanitize_string_strips_html_chars() {
        assert_eq!(sanitize_string("<script>x</script>"), "scriptx/script");
        assert_eq!(sanitize_string("a \"quoted\" name"), "a quoted name");
        assert_eq!(sanitize_string("Tom & Jerry"), "Tom  Jerry");
    }

    #[test]
    fn test_sanitize_idempotent() {
        for input in ["hello", "  a<b>&c\x1b  ", "", "plain text", "\t\n"] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once);

            let once = sanitize_string(input);
            assert_eq!(sanitize_string(&once), once);
        }
    }
}
