//! Request-source normalization
//!
//! Turns an inbound request's network/device metadata into the stable
//! [`RequestSource`] shape used for session and audit records. The data
//! is advisory context, not security-critical: malformed or missing
//! fields degrade to defaults and never produce an error.

use std::net::IpAddr;

use axum::http::{HeaderMap, header};
use serde::{Deserialize, Serialize};

use crate::validate::{is_valid_ip, sanitize};

/// Sentinel platform label when the platform cannot be determined
pub const PLATFORM_OTHER: &str = "other";

/// Raw request-metadata bag, all fields optional
#[derive(Debug, Clone, Default)]
pub struct RawSource {
    pub ip: Option<String>,
    pub browser: Option<String>,
    pub version: Option<String>,
    pub platform: Option<String>,
    pub referrer: Option<String>,
}

/// Normalized request-source descriptor
///
/// Serialized as the `platform_details` snapshot of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSource {
    pub ip: String,
    pub browser: String,
    pub version: String,
    pub platform: String,
    pub referrer: String,
}

impl Default for RequestSource {
    fn default() -> Self {
        Self::from_raw(RawSource::default())
    }
}

impl RequestSource {
    /// Normalize a raw metadata bag.
    ///
    /// Missing fields become empty strings, except `platform` which
    /// falls back to [`PLATFORM_OTHER`]. An IP that does not parse is
    /// dropped rather than recorded.
    pub fn from_raw(raw: RawSource) -> Self {
        let ip = raw
            .ip
            .filter(|ip| is_valid_ip(ip))
            .map(|ip| ip.trim().to_string())
            .unwrap_or_default();

        let platform = raw
            .platform
            .map(|p| sanitize(&p))
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| PLATFORM_OTHER.to_string());

        Self {
            ip,
            browser: raw.browser.map(|b| sanitize(&b)).unwrap_or_default(),
            version: raw.version.map(|v| sanitize(&v)).unwrap_or_default(),
            platform,
            referrer: raw.referrer.map(|r| sanitize(&r)).unwrap_or_default(),
        }
    }
}

/// Extract a [`RequestSource`] from HTTP headers and the connection IP
pub fn extract_request_source(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> RequestSource {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let (browser, version, platform) = parse_user_agent(user_agent);

    let referrer = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    RequestSource::from_raw(RawSource {
        ip: extract_client_ip(headers, direct_ip).map(|ip| ip.to_string()),
        browser,
        version,
        platform,
        referrer,
    })
}

/// Extract the client IP address.
///
/// Checks the X-Forwarded-For header first (reverse proxy setups), then
/// falls back to the direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    direct_ip
}

/// Best-effort User-Agent token matching.
///
/// Returns (browser, version, platform); anything unrecognized stays
/// `None` and gets defaulted by [`RequestSource::from_raw`].
fn parse_user_agent(ua: &str) -> (Option<String>, Option<String>, Option<String>) {
    if ua.is_empty() {
        return (None, None, None);
    }

    // Order matters: Edge and Opera UAs also contain "Chrome",
    // Chrome UAs also contain "Safari".
    const BROWSERS: &[(&str, &str)] = &[
        ("Edg/", "Edge"),
        ("OPR/", "Opera"),
        ("Firefox/", "Firefox"),
        ("Chrome/", "Chrome"),
        ("Safari/", "Safari"),
    ];

    let mut browser = None;
    let mut version = None;
    for (token, name) in BROWSERS {
        if let Some(idx) = ua.find(token) {
            browser = Some((*name).to_string());
            let rest = &ua[idx + token.len()..];
            let v: String = rest
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            if !v.is_empty() {
                version = Some(v);
            }
            break;
        }
    }

    const PLATFORMS: &[(&str, &str)] = &[
        ("Android", "android"),
        ("iPhone", "ios"),
        ("iPad", "ios"),
        ("Windows", "windows"),
        ("Mac OS X", "macos"),
        ("Macintosh", "macos"),
        ("Linux", "linux"),
    ];

    let platform = PLATFORMS
        .iter()
        .find(|(token, _)| ua.contains(token))
        .map(|(_, name)| (*name).to_string());

    (browser, version, platform)
}
