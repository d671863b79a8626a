//! Environment configuration (edit before flashing)
//!
//! Replace every `YOUR_*` placeholder with the real value.
//! Do not commit real credentials. After filling this in locally, run
//! `git update-index --skip-worktree src/env.rs` so the secrets stay out of git.
//!
//! The CoinDesk key is written once in `coindesk_api_key!` and the three
//! history URLs pick it up at compile time.

/// WiFi SSID used for connection.
pub const WIFI_SSID: &str = "YOUR_WIFI_SSID";

/// WiFi password (PSK).
pub const WIFI_PASSWORD: &str = "YOUR_WIFI_PASSWORD";

/// Bitstamp BTC/USD ticker
pub const BTC_API_URL: &str = "https://api.bitstamp.net/v2/ticker/btcusd/";

// CoinDesk API key. Edit the literal here, not the URLs below.
macro_rules! coindesk_api_key {
    () => {
        "YOUR_COINDESK_API_KEY"
    };
}

macro_rules! coindesk_history_url {
    ($segment:literal) => {
        concat!(
            "https://data-api.coindesk.com/index/cc/v1/historical/",
            $segment,
            "?market=cadli&instrument=BTC-USD&limit=30&aggregate=1&fill=true&apply_mapping=true&response_format=JSON&api_key=",
            coindesk_api_key!()
        )
    };
}

/// CoinDesk API key.
pub const COINDESK_API_KEY: &str = coindesk_api_key!();

/// Last 30 hours, hourly candles.
pub const COINDESK_API_URL_30H: &str = coindesk_history_url!("hours");

/// Last 30 days, daily candles.
pub const COINDESK_API_URL_30D: &str = coindesk_history_url!("days");

/// Last 30 minutes, per-minute candles.
pub const COINDESK_API_URL_30M: &str = coindesk_history_url!("minutes");

/// YouTube Data API key
pub const ENV_KEY: &str = "YOUR_YOUTUBE_API_KEY";

/// YouTube channel to show statistics for
pub const YOUTUBE_CHANNEL_ID: &str = "YOUR_YOUTUBE_CHANNEL_ID";
