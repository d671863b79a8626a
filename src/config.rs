//! Typed view over the `env` constants, with a pre-flight check
//!
//! Firmware calls [`EnvConfig::validate`] once at boot, before joining
//! WiFi, so a build flashed with template values fails loudly instead of
//! as an opaque auth error from some remote API.

use core::fmt;

use crate::coindesk::{self, Granularity};
use crate::env;
use crate::error::ConfigError;
use crate::format::mask_secret;
use crate::url::{query_param, split_url};

/// Prefix shared by every template value.
pub const PLACEHOLDER_PREFIX: &str = "YOUR_";

/// One configuration entry.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EnvKey {
    WifiSsid,
    WifiPassword,
    BtcApiUrl,
    CoindeskApiKey,
    CoindeskApiUrl30H,
    CoindeskApiUrl30D,
    CoindeskApiUrl30M,
    YoutubeApiKey,
    YoutubeChannelId,
}

impl EnvKey {
    pub const ALL: [EnvKey; 9] = [
        EnvKey::WifiSsid,
        EnvKey::WifiPassword,
        EnvKey::BtcApiUrl,
        EnvKey::CoindeskApiKey,
        EnvKey::CoindeskApiUrl30H,
        EnvKey::CoindeskApiUrl30D,
        EnvKey::CoindeskApiUrl30M,
        EnvKey::YoutubeApiKey,
        EnvKey::YoutubeChannelId,
    ];

    /// Name of the entry in the configuration template.
    pub fn name(self) -> &'static str {
        match self {
            EnvKey::WifiSsid => "WIFI_SSID",
            EnvKey::WifiPassword => "WIFI_PASSWORD",
            EnvKey::BtcApiUrl => "BTC_API_URL",
            EnvKey::CoindeskApiKey => "COINDESK_API_KEY",
            EnvKey::CoindeskApiUrl30H => "COINDESK_API_URL_30H",
            EnvKey::CoindeskApiUrl30D => "COINDESK_API_URL_30D",
            EnvKey::CoindeskApiUrl30M => "COINDESK_API_URL_30M",
            EnvKey::YoutubeApiKey => "env_key",
            EnvKey::YoutubeChannelId => "youtube_channel_id",
        }
    }

    /// Secrets are masked whenever a value is logged. History URLs count
    /// because they carry the CoinDesk key.
    pub fn is_secret(self) -> bool {
        matches!(
            self,
            EnvKey::WifiPassword
                | EnvKey::CoindeskApiKey
                | EnvKey::CoindeskApiUrl30H
                | EnvKey::CoindeskApiUrl30D
                | EnvKey::CoindeskApiUrl30M
                | EnvKey::YoutubeApiKey
        )
    }

    pub fn is_url(self) -> bool {
        matches!(self, EnvKey::BtcApiUrl) || self.granularity().is_some()
    }

    /// Granularity of a CoinDesk history entry, None for the rest.
    pub fn granularity(self) -> Option<Granularity> {
        match self {
            EnvKey::CoindeskApiUrl30H => Some(Granularity::Hours),
            EnvKey::CoindeskApiUrl30D => Some(Granularity::Days),
            EnvKey::CoindeskApiUrl30M => Some(Granularity::Minutes),
            _ => None,
        }
    }
}

/// True if `v` is a template value, or a URL whose `api_key` still is one.
pub fn is_placeholder(v: &str) -> bool {
    v.starts_with(PLACEHOLDER_PREFIX)
        || query_param(v, "api_key").is_some_and(|k| k.starts_with(PLACEHOLDER_PREFIX))
}

/// Every configuration value, borrowed.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct EnvConfig<'a> {
    pub wifi_ssid: &'a str,
    pub wifi_password: &'a str,
    pub btc_api_url: &'a str,
    pub coindesk_api_key: &'a str,
    pub coindesk_api_url_30h: &'a str,
    pub coindesk_api_url_30d: &'a str,
    pub coindesk_api_url_30m: &'a str,
    pub youtube_api_key: &'a str,
    pub youtube_channel_id: &'a str,
}

impl EnvConfig<'static> {
    /// The values compiled in from `env`.
    pub const fn compiled() -> Self {
        Self {
            wifi_ssid: env::WIFI_SSID,
            wifi_password: env::WIFI_PASSWORD,
            btc_api_url: env::BTC_API_URL,
            coindesk_api_key: env::COINDESK_API_KEY,
            coindesk_api_url_30h: env::COINDESK_API_URL_30H,
            coindesk_api_url_30d: env::COINDESK_API_URL_30D,
            coindesk_api_url_30m: env::COINDESK_API_URL_30M,
            youtube_api_key: env::ENV_KEY,
            youtube_channel_id: env::YOUTUBE_CHANNEL_ID,
        }
    }
}

impl<'a> EnvConfig<'a> {
    pub fn get(&self, key: EnvKey) -> &'a str {
        match key {
            EnvKey::WifiSsid => self.wifi_ssid,
            EnvKey::WifiPassword => self.wifi_password,
            EnvKey::BtcApiUrl => self.btc_api_url,
            EnvKey::CoindeskApiKey => self.coindesk_api_key,
            EnvKey::CoindeskApiUrl30H => self.coindesk_api_url_30h,
            EnvKey::CoindeskApiUrl30D => self.coindesk_api_url_30d,
            EnvKey::CoindeskApiUrl30M => self.coindesk_api_url_30m,
            EnvKey::YoutubeApiKey => self.youtube_api_key,
            EnvKey::YoutubeChannelId => self.youtube_channel_id,
        }
    }

    /// History URL for `g`.
    pub fn history_url(&self, g: Granularity) -> &'a str {
        match g {
            Granularity::Hours => self.coindesk_api_url_30h,
            Granularity::Days => self.coindesk_api_url_30d,
            Granularity::Minutes => self.coindesk_api_url_30m,
        }
    }

    /// Keys still holding a template value, in [`EnvKey::ALL`] order.
    pub fn unfilled(&self) -> impl Iterator<Item = EnvKey> + '_ {
        EnvKey::ALL.into_iter().filter(move |k| is_placeholder(self.get(*k)))
    }

    /// Check every entry; returns the first problem in [`EnvKey::ALL`] order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for key in EnvKey::ALL {
            self.check(key)?;
        }
        Ok(())
    }

    fn check(&self, key: EnvKey) -> Result<(), ConfigError> {
        let v = self.get(key);
        if v.is_empty() {
            return Err(ConfigError::EmptyValue(key));
        }
        if is_placeholder(v) {
            return Err(ConfigError::Placeholder(key));
        }
        if key == EnvKey::CoindeskApiKey {
            // The key goes into the history URLs verbatim; minutes is the longest segment.
            coindesk::history_url(Granularity::Minutes, v).map_err(|_| ConfigError::InvalidValue(key))?;
        }
        if key.is_url() && !split_url(v).is_some_and(|p| p.secure) {
            return Err(ConfigError::InvalidUrl(key));
        }
        if let Some(g) = key.granularity() {
            let parsed = coindesk::parse_history_url(v).ok_or(ConfigError::GranularityMismatch(key))?;
            if parsed.api_key != self.coindesk_api_key {
                return Err(ConfigError::KeyMismatch(key));
            }
            let expected = coindesk::history_url(g, self.coindesk_api_key)
                .map_err(|_| ConfigError::InvalidValue(EnvKey::CoindeskApiKey))?;
            if parsed.granularity != g || v != expected.as_str() {
                return Err(ConfigError::GranularityMismatch(key));
            }
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl EnvConfig<'_> {
    /// Log the configuration (secrets masked) and any problem with it.
    /// Returns the result of [`EnvConfig::validate`].
    pub fn report(&self) -> Result<(), ConfigError> {
        let res = self.validate();
        match res {
            Ok(()) => defmt::info!("env: {}", self),
            Err(e) => {
                for key in self.unfilled() {
                    defmt::warn!("env: {} not filled in", key.name());
                }
                defmt::error!("env: {}", e);
            }
        }
        res
    }
}

impl fmt::Debug for EnvConfig<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("EnvConfig");
        for key in EnvKey::ALL {
            let v = self.get(key);
            if key.is_secret() {
                d.field(key.name(), &mask_secret(v).as_str());
            } else {
                d.field(key.name(), &v);
            }
        }
        d.finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EnvConfig<'_> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "EnvConfig {{");
        for key in EnvKey::ALL {
            let v = self.get(key);
            if key.is_secret() {
                defmt::write!(f, " {}={}", key.name(), mask_secret(v).as_str());
            } else {
                defmt::write!(f, " {}={}", key.name(), v);
            }
        }
        defmt::write!(f, " }}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const KEY: &str = "3f9c1e0a7b";

    fn filled(urls: &[String; 3]) -> EnvConfig<'_> {
        EnvConfig {
            wifi_ssid: "home-ap",
            wifi_password: "correct horse",
            btc_api_url: env::BTC_API_URL,
            coindesk_api_key: KEY,
            coindesk_api_url_30h: &urls[0],
            coindesk_api_url_30d: &urls[1],
            coindesk_api_url_30m: &urls[2],
            youtube_api_key: "AIzaSyExample",
            youtube_channel_id: "UC_x5XG1OV2P6uZZ5FSM9Ttw",
        }
    }

    fn urls_for(key: &str) -> [String; 3] {
        Granularity::ALL.map(|g| coindesk::history_url(g, key).unwrap().as_str().to_string())
    }

    #[test]
    fn template_values_are_unfilled() {
        let stale = urls_for("YOUR_COINDESK_API_KEY");
        let cfg = EnvConfig {
            wifi_ssid: "YOUR_WIFI_SSID",
            wifi_password: "YOUR_WIFI_PASSWORD",
            btc_api_url: env::BTC_API_URL,
            coindesk_api_key: "YOUR_COINDESK_API_KEY",
            coindesk_api_url_30h: &stale[0],
            coindesk_api_url_30d: &stale[1],
            coindesk_api_url_30m: &stale[2],
            youtube_api_key: "YOUR_YOUTUBE_API_KEY",
            youtube_channel_id: "YOUR_YOUTUBE_CHANNEL_ID",
        };
        assert_eq!(cfg.validate(), Err(ConfigError::Placeholder(EnvKey::WifiSsid)));
        let unfilled: Vec<EnvKey> = cfg.unfilled().collect();
        assert_eq!(
            unfilled,
            vec![
                EnvKey::WifiSsid,
                EnvKey::WifiPassword,
                EnvKey::CoindeskApiKey,
                EnvKey::CoindeskApiUrl30H,
                EnvKey::CoindeskApiUrl30D,
                EnvKey::CoindeskApiUrl30M,
                EnvKey::YoutubeApiKey,
                EnvKey::YoutubeChannelId,
            ]
        );
    }

    #[test]
    fn compiled_unfilled_follows_env() {
        let cfg = EnvConfig::compiled();
        let expected: Vec<EnvKey> = EnvKey::ALL
            .into_iter()
            .filter(|k| is_placeholder(cfg.get(*k)))
            .collect();
        assert_eq!(cfg.unfilled().collect::<Vec<_>>(), expected);
        if let Some(first) = expected.first() {
            assert_eq!(cfg.validate(), Err(ConfigError::Placeholder(*first)));
        }
    }

    #[test]
    fn filled_config_validates() {
        let urls = urls_for(KEY);
        let cfg = filled(&urls);
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!(cfg.unfilled().count(), 0);
        assert_eq!(cfg.history_url(Granularity::Days), urls[1].as_str());
    }

    #[test]
    fn get_follows_names() {
        let cfg = EnvConfig::compiled();
        assert_eq!(cfg.get(EnvKey::YoutubeApiKey), env::ENV_KEY);
        assert_eq!(cfg.get(EnvKey::CoindeskApiUrl30M), env::COINDESK_API_URL_30M);
        assert_eq!(EnvKey::YoutubeChannelId.name(), "youtube_channel_id");
    }

    #[test]
    fn empty_value_reported_first() {
        let urls = urls_for(KEY);
        let mut cfg = filled(&urls);
        cfg.youtube_channel_id = "";
        cfg.wifi_password = "";
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyValue(EnvKey::WifiPassword)));
    }

    #[test]
    fn placeholder_key_inside_url() {
        let stale = urls_for("YOUR_COINDESK_API_KEY");
        let urls = urls_for(KEY);
        let mut cfg = filled(&urls);
        cfg.coindesk_api_url_30d = &stale[1];
        assert!(is_placeholder(cfg.coindesk_api_url_30d));
        assert_eq!(cfg.validate(), Err(ConfigError::Placeholder(EnvKey::CoindeskApiUrl30D)));
    }

    #[test]
    fn key_mismatch() {
        let other = urls_for("somethingelse");
        let urls = urls_for(KEY);
        let mut cfg = filled(&urls);
        cfg.coindesk_api_url_30m = &other[2];
        assert_eq!(cfg.validate(), Err(ConfigError::KeyMismatch(EnvKey::CoindeskApiUrl30M)));
    }

    #[test]
    fn swapped_granularity() {
        let urls = urls_for(KEY);
        let mut cfg = filled(&urls);
        cfg.coindesk_api_url_30h = &urls[1];
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::GranularityMismatch(EnvKey::CoindeskApiUrl30H))
        );
    }

    #[test]
    fn changed_query_is_mismatch() {
        let urls = urls_for(KEY);
        let tweaked = urls[1].replace("limit=30", "limit=60");
        let mut cfg = filled(&urls);
        cfg.coindesk_api_url_30d = &tweaked;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::GranularityMismatch(EnvKey::CoindeskApiUrl30D))
        );
    }

    #[test]
    fn api_key_needing_escaping_names_the_key() {
        let urls = urls_for(KEY).map(|u| u.replace(KEY, "ab cd"));
        let mut cfg = filled(&urls);
        cfg.coindesk_api_key = "ab cd";
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidValue(EnvKey::CoindeskApiKey)));
    }

    #[test]
    fn overlong_api_key_names_the_key() {
        let long = "k".repeat(coindesk::HISTORY_URL_CAP);
        let urls = urls_for(KEY).map(|u| u.replace(KEY, &long));
        let mut cfg = filled(&urls);
        cfg.coindesk_api_key = &long;
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidValue(EnvKey::CoindeskApiKey)));
    }

    #[test]
    fn plain_http_history_url_rejected() {
        let urls = urls_for(KEY);
        let insecure = urls[0].replacen("https://", "http://", 1);
        let mut cfg = filled(&urls);
        cfg.coindesk_api_url_30h = &insecure;
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidUrl(EnvKey::CoindeskApiUrl30H)));
    }

    #[test]
    fn plain_http_rejected() {
        let urls = urls_for(KEY);
        let mut cfg = filled(&urls);
        cfg.btc_api_url = "http://api.bitstamp.net/v2/ticker/btcusd/";
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidUrl(EnvKey::BtcApiUrl)));
    }

    #[test]
    fn debug_masks_secrets() {
        let urls = urls_for(KEY);
        let cfg = filled(&urls);
        let s = format!("{:?}", cfg);
        assert!(s.contains("WIFI_SSID: \"home-ap\""));
        assert!(s.contains("WIFI_PASSWORD: \"co***\""));
        assert!(!s.contains("correct horse"));
        assert!(!s.contains(KEY));
        assert!(!s.contains("AIzaSyExample"));
    }

    #[test]
    fn placeholder_detection() {
        assert!(is_placeholder("YOUR_WIFI_SSID"));
        assert!(!is_placeholder("home-ap"));
        assert!(!is_placeholder(env::BTC_API_URL));
    }
}
