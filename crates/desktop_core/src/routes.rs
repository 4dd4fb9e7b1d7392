//! Bidirectional codec between window records and the `w`/`state` query params.

use std::collections::HashMap;

use platform_host::ContentRecord;
use thiserror::Error;

use crate::model::{DesktopState, WindowConfig, WindowRecord};
use crate::strategy::{strategy_for_identifier, strategy_for_kind};

/// Plain-data result of the async content-resolution phase, keyed by path.
pub type ResolvedContent = HashMap<String, ContentRecord>;

/// Problems found while decoding window identifiers from a URL.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteIssue {
    /// The identifier matches no registered window strategy or is malformed.
    #[error("unknown window identifier: {identifier}")]
    UnknownIdentifier {
        /// The offending identifier as it appeared in the URL.
        identifier: String,
    },
    /// A path-shaped identifier names content absent from the index.
    #[error("no indexed content at {path} for {identifier}")]
    MissingContent {
        /// The identifier that referenced the missing content.
        identifier: String,
        /// The index path that failed to resolve.
        path: String,
    },
}

/// Serializes one window to its URL identifier via its kind strategy.
///
/// Pure and deterministic: an unchanged record always yields the same
/// identifier. Returns `None` for records with no stable identity.
pub fn serialize_window(record: &WindowRecord) -> Option<String> {
    strategy_for_kind(record.kind).identifier_for(record)
}

/// Serializes the visible window list, ascending z-order, to a canonical URL.
///
/// Windows that serialize to `None` are omitted. An opaque `state` value from
/// the current URL is carried through unchanged.
pub fn serialize_windows_to_url(state: &DesktopState, opaque_state: Option<&str>) -> String {
    let mut params: Vec<String> = Vec::new();
    for window in state.visible_windows() {
        if let Some(identifier) = serialize_window(window) {
            params.push(format!("w={}", encode_component(&identifier)));
        }
    }
    if let Some(opaque) = opaque_state.filter(|value| !value.is_empty()) {
        params.push(format!("state={}", encode_component(opaque)));
    }
    if params.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", params.join("&"))
    }
}

/// Extracts the ordered `w` identifiers from a query string.
///
/// A single value shaped like a JSON array is parsed and flattened, covering
/// routers that re-encode repeated params into one value.
pub fn parse_window_identifiers(search: &str) -> Vec<String> {
    let mut identifiers = Vec::new();
    for pair in search
        .trim_start_matches('?')
        .split('&')
        .filter(|part| !part.is_empty())
    {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key != "w" {
            continue;
        }
        let decoded = decode_component(value);
        if decoded.starts_with('[') && decoded.ends_with(']') {
            if let Ok(flattened) = serde_json::from_str::<Vec<String>>(&decoded) {
                identifiers.extend(flattened);
                continue;
            }
        }
        if !decoded.is_empty() {
            identifiers.push(decoded);
        }
    }
    identifiers
}

/// Extracts the opaque `state` param, when present and non-empty.
pub fn parse_state_param(search: &str) -> Option<String> {
    for pair in search
        .trim_start_matches('?')
        .split('&')
        .filter(|part| !part.is_empty())
    {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key == "state" && !value.is_empty() {
            return Some(decode_component(value));
        }
    }
    None
}

/// Rebuilds the path-and-query URL a raw query string came from, in the same
/// form [`serialize_windows_to_url`] produces.
pub fn url_from_search(search: &str) -> String {
    let query = search.trim_start_matches('?');
    if query.is_empty() {
        "/".to_string()
    } else {
        format!("/?{query}")
    }
}

/// Lists the index paths that must be resolved before configs can be built.
pub fn content_paths_for(identifiers: &[String]) -> Vec<String> {
    let mut paths: Vec<String> = Vec::new();
    for identifier in identifiers {
        let Some(strategy) = strategy_for_identifier(identifier) else {
            continue;
        };
        if let Some(path) = strategy.content_path(identifier) {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }
    paths
}

/// Builds ordered window configs from identifiers plus resolved content.
///
/// Unknown or unresolvable identifiers become issues instead of configs;
/// callers decide how each issue is surfaced.
pub fn build_window_configs(
    identifiers: &[String],
    resolved: &ResolvedContent,
) -> (Vec<WindowConfig>, Vec<RouteIssue>) {
    let mut configs = Vec::new();
    let mut issues = Vec::new();
    for identifier in identifiers {
        let Some(strategy) = strategy_for_identifier(identifier) else {
            issues.push(RouteIssue::UnknownIdentifier {
                identifier: identifier.clone(),
            });
            continue;
        };
        match strategy.parse_identifier(identifier, resolved) {
            Ok(config) => configs.push(WindowConfig {
                identifier: identifier.clone(),
                config,
            }),
            Err(issue) => issues.push(issue),
        }
    }
    (configs, issues)
}

fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b':' | b'/' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(high), Some(low)) => {
                        out.push(high << 4 | low);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8(out)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}
