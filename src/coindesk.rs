//! CoinDesk index history URLs
//!
//! All three history URLs in `env` share one query and differ only in the
//! path segment after `/historical/`. This module knows that shape: it can
//! rebuild a URL for a given key and cut one back into its parts.

use core::fmt::Write;

use heapless::String;

use crate::config::EnvKey;
use crate::env;
use crate::error::ConfigError;

pub const BASE_URL: &str = "https://data-api.coindesk.com/index/cc/v1/historical/";

// Query parameters, in the order they appear in the URL
pub const MARKET: &str = "cadli";
pub const INSTRUMENT: &str = "BTC-USD";
pub const LIMIT: u32 = 30;
pub const AGGREGATE: u32 = 1;
pub const FILL: bool = true;
pub const APPLY_MAPPING: bool = true;
pub const RESPONSE_FORMAT: &str = "JSON";

/// Capacity of a built history URL (base + query + key).
pub const HISTORY_URL_CAP: usize = 256;

const API_KEY_PARAM: &str = "&api_key=";

/// Candle size of a history query.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Granularity {
    Hours,
    Days,
    Minutes,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [Granularity::Hours, Granularity::Days, Granularity::Minutes];

    /// Path segment after `/historical/`.
    pub fn path_segment(self) -> &'static str {
        match self {
            Granularity::Hours => "hours",
            Granularity::Days => "days",
            Granularity::Minutes => "minutes",
        }
    }

    pub fn from_segment(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.path_segment() == s)
    }
}

/// The compiled-in URL for `g`.
pub fn history_url_for(g: Granularity) -> &'static str {
    match g {
        Granularity::Hours => env::COINDESK_API_URL_30H,
        Granularity::Days => env::COINDESK_API_URL_30D,
        Granularity::Minutes => env::COINDESK_API_URL_30M,
    }
}

/// Build a history URL for `g` authenticated with `api_key`.
/// The key is inserted as-is, so characters needing escaping are rejected.
pub fn history_url(g: Granularity, api_key: &str) -> Result<String<HISTORY_URL_CAP>, ConfigError> {
    if api_key.is_empty() {
        return Err(ConfigError::EmptyValue(EnvKey::CoindeskApiKey));
    }
    if api_key
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '&' | '#' | '?' | '=' | '%' | '/'))
    {
        return Err(ConfigError::InvalidValue(EnvKey::CoindeskApiKey));
    }

    let mut s: String<HISTORY_URL_CAP> = String::new();
    write!(
        s,
        "{}{}?market={}&instrument={}&limit={}&aggregate={}&fill={}&apply_mapping={}&response_format={}{}{}",
        BASE_URL,
        g.path_segment(),
        MARKET,
        INSTRUMENT,
        LIMIT,
        AGGREGATE,
        FILL,
        APPLY_MAPPING,
        RESPONSE_FORMAT,
        API_KEY_PARAM,
        api_key,
    )
    .map_err(|_| ConfigError::CapacityExceeded)?;
    Ok(s)
}

/// A history URL cut into its parts.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct HistoryUrl<'a> {
    pub granularity: Granularity,
    /// Query without the trailing `&api_key=...`
    pub query: &'a str,
    pub api_key: &'a str,
}

/// Parse a URL of the shape produced by [`history_url`].
/// `api_key` must be the last query parameter.
pub fn parse_history_url(url: &str) -> Option<HistoryUrl<'_>> {
    let rest = url.strip_prefix(BASE_URL)?;
    let (segment, q) = rest.split_once('?')?;
    let granularity = Granularity::from_segment(segment)?;
    let idx = q.rfind(API_KEY_PARAM)?;
    let api_key = &q[idx + API_KEY_PARAM.len()..];
    if api_key.contains('&') {
        return None;
    }
    Some(HistoryUrl { granularity, query: &q[..idx], api_key })
}
