use crate::{contact::MESSAGE_TIMEOUT, logging::LogLevel};
use std::time::Duration;
use url::Url;

pub const CONTACT_ENDPOINT_ATTR: &str = "data-contact-endpoint";
pub const MESSAGE_TIMEOUT_ATTR: &str = "data-message-timeout-ms";
pub const SCROLL_DEBOUNCE_ATTR: &str = "data-scroll-debounce-ms";
pub const LOG_LEVEL_ATTR: &str = "data-log-level";

const DEFAULT_SCROLL_DEBOUNCE_MS: u64 = 100;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const MESSAGE_TIMEOUT_MS_BOUNDS: (u64, u64) = (1_000, 60_000);
const SCROLL_DEBOUNCE_MS_BOUNDS: (u64, u64) = (0, 1_000);

/// Page-level settings, read from `data-*` attributes on the mount element.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub contact_endpoint: Option<Url>,
    pub message_timeout: Duration,
    pub scroll_debounce: Duration,
    pub log_level: LogLevel,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl SiteConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let message_timeout_ms = parse_u64_with_bounds(
            lookup(MESSAGE_TIMEOUT_ATTR),
            u64::try_from(MESSAGE_TIMEOUT.as_millis()).unwrap_or(u64::MAX),
            MESSAGE_TIMEOUT_MS_BOUNDS,
        );
        let scroll_debounce_ms = parse_u64_with_bounds(
            lookup(SCROLL_DEBOUNCE_ATTR),
            DEFAULT_SCROLL_DEBOUNCE_MS,
            SCROLL_DEBOUNCE_MS_BOUNDS,
        );
        let log_level = parse_non_empty_string(lookup(LOG_LEVEL_ATTR))
            .and_then(|value| LogLevel::parse(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            contact_endpoint: parse_http_url(lookup(CONTACT_ENDPOINT_ATTR)),
            message_timeout: Duration::from_millis(message_timeout_ms),
            scroll_debounce: Duration::from_millis(scroll_debounce_ms),
            log_level,
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_element(element: &web_sys::Element) -> Self {
        Self::from_lookup(|name| element.get_attribute(name))
    }
}

fn parse_u64_with_bounds(raw: Option<String>, default: u64, bounds: (u64, u64)) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_non_empty_string(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_http_url(raw: Option<String>) -> Option<Url> {
    let value = parse_non_empty_string(raw)?;
    let parsed = Url::parse(&value).ok()?;

    if parsed.scheme() == "http" || parsed.scheme() == "https" {
        Some(parsed)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> SiteConfig {
        let attributes: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        SiteConfig::from_lookup(|name| attributes.get(name).cloned())
    }

    #[test]
    fn defaults_apply_without_attributes() {
        let config = SiteConfig::default();

        assert_eq!(config.contact_endpoint, None);
        assert_eq!(config.message_timeout, Duration::from_secs(5));
        assert_eq!(config.scroll_debounce, Duration::from_millis(100));
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn attributes_override_defaults() {
        let config = config_from(&[
            (CONTACT_ENDPOINT_ATTR, " https://formspree.io/f/abc "),
            (MESSAGE_TIMEOUT_ATTR, "8000"),
            (SCROLL_DEBOUNCE_ATTR, "50"),
            (LOG_LEVEL_ATTR, "debug"),
        ]);

        assert_eq!(
            config.contact_endpoint.as_ref().map(Url::as_str),
            Some("https://formspree.io/f/abc")
        );
        assert_eq!(config.message_timeout, Duration::from_secs(8));
        assert_eq!(config.scroll_debounce, Duration::from_millis(50));
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn out_of_bounds_numbers_fall_back() {
        let config = config_from(&[
            (MESSAGE_TIMEOUT_ATTR, "10"),
            (SCROLL_DEBOUNCE_ATTR, "not-a-number"),
        ]);

        assert_eq!(config.message_timeout, Duration::from_secs(5));
        assert_eq!(config.scroll_debounce, Duration::from_millis(100));
    }

    #[test]
    fn non_http_endpoints_are_rejected() {
        for raw in ["mailto:me@example.com", "/relative/path", "   "] {
            let config = config_from(&[(CONTACT_ENDPOINT_ATTR, raw)]);
            assert_eq!(config.contact_endpoint, None, "{raw}");
        }
    }
}
