//! Long URL validation
//!
//! Pure acceptance check run on every candidate URL before it reaches the
//! store. Nothing here touches the network: hosts are never resolved and
//! there is no blocklist.

use std::net::IpAddr;

use thiserror::Error;
use url::{ParseError, Url};

/// Reasons a long URL is refused
///
/// The `Display` output is what clients see in the 400 response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("url is required")]
    EmptyUrl,

    #[error("url is not a valid URI")]
    MalformedUri,

    #[error("url scheme must be http or https, got {0:?}")]
    UnsupportedScheme(String),

    #[error("url must contain a host")]
    MissingHost,

    #[error("url host is invalid")]
    InvalidHost,
}

/// Validates a candidate long URL
///
/// Checks, in order:
/// 1. Input is not blank after trimming
/// 2. Input starts with a well-formed scheme
/// 3. Scheme is exactly `http` or `https`
/// 4. A host is present after `//`
/// 5. The host is not just a port (`http://:8080`)
/// 6. The rest of the input parses as an absolute URI
///
/// Hosts that parse as IP literals are accepted as-is; anything else is a
/// domain name and accepted without further restriction.
///
/// # Example
///
/// ```
/// # use urlshort::validator::{validate_url, ValidationError};
/// assert!(validate_url("https://example.com").is_ok());
/// assert_eq!(validate_url("http://:8080"), Err(ValidationError::InvalidHost));
/// assert_eq!(validate_url("http:example.com"), Err(ValidationError::MissingHost));
/// ```
pub fn validate_url(input: &str) -> Result<(), ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    let (scheme, rest) = split_scheme(input).ok_or(ValidationError::MalformedUri)?;
    check_scheme(&scheme.to_ascii_lowercase())?;

    // WHATWG parsing invents an authority for inputs such as `http:host` or
    // `http:\\host`, so the host is located on the raw input instead.
    let authority = rest
        .strip_prefix("//")
        .ok_or(ValidationError::MissingHost)?
        .split(['/', '\\', '?', '#'])
        .next()
        .unwrap_or_default();
    // Drop userinfo, the host starts after the last '@'
    let host_and_port = authority.rsplit('@').next().unwrap_or_default();

    if host_and_port.is_empty() {
        return Err(ValidationError::MissingHost);
    }
    if host_and_port.starts_with(':') {
        return Err(ValidationError::InvalidHost);
    }

    let host = strip_port(host_and_port);
    let is_ip = host.parse::<IpAddr>().is_ok();

    match Url::parse(input) {
        Ok(_) => {}
        // Numeric last label that is not an IPv4 address, e.g. `example.123`:
        // still a domain name as far as this service is concerned.
        Err(ParseError::InvalidIpv4Address) if !is_ip => {}
        Err(ParseError::EmptyHost) => return Err(ValidationError::MissingHost),
        Err(_) => return Err(ValidationError::MalformedUri),
    }

    if is_ip {
        tracing::debug!(host, "accepted ip host");
    } else {
        tracing::debug!(host, "accepted domain host");
    }
    Ok(())
}

fn check_scheme(scheme: &str) -> Result<(), ValidationError> {
    match scheme {
        "http" | "https" => Ok(()),
        other => Err(ValidationError::UnsupportedScheme(other.to_string())),
    }
}

/// Splits `scheme:rest`, requiring an RFC 3986 scheme
fn split_scheme(input: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = input.split_once(':')?;
    let mut chars = scheme.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let valid = starts_with_letter
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    valid.then_some((scheme, rest))
}

/// Host part of `host[:port]` or `[v6]:port`, brackets removed
fn strip_port(host_and_port: &str) -> &str {
    if let Some(bracketed) = host_and_port.strip_prefix('[') {
        return bracketed.split(']').next().unwrap_or_default();
    }
    match host_and_port.rsplit_once(':') {
        Some((host, _port)) => host,
        None => host_and_port,
    }
}
