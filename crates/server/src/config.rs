use std::net::SocketAddr;

use anyhow::Context;
use finance_tracker_core::models::settings::{MarketSettings, PriceSource};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub static_dir: String,
    pub log_format: String,
    pub market: MarketSettings,
}

impl Config {
    /// Read `FT_*` variables, after loading a `.env` file if one exists.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let listen_addr: SocketAddr = var("FT_LISTEN_ADDR", "127.0.0.1:5000")
            .parse()
            .context("Invalid FT_LISTEN_ADDR")?;
        let db_path = var("FT_DB_PATH", "./datafile.db");
        let static_dir = var("FT_STATIC_DIR", "./static");
        let log_format = var("FT_LOG_FORMAT", "text");
        let price_source: PriceSource = var("FT_PRICE_SOURCE", "twse")
            .parse()
            .context("Invalid FT_PRICE_SOURCE")?;
        let yahoo_suffix = var("FT_YAHOO_SUFFIX", ".TW");

        Ok(Self {
            listen_addr,
            db_path,
            static_dir,
            log_format,
            market: MarketSettings {
                price_source,
                yahoo_suffix,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:5000");
        assert_eq!(config.db_path, "./datafile.db");
        assert_eq!(config.static_dir, "./static");
        assert_eq!(config.market, MarketSettings::default());
    }

    #[test]
    fn yahoo_source() {
        let config = config_from(&[("FT_PRICE_SOURCE", "Yahoo"), ("FT_YAHOO_SUFFIX", ".TWO")]).unwrap();
        assert_eq!(config.market.price_source, PriceSource::Yahoo);
        assert_eq!(config.market.yahoo_suffix, ".TWO");
    }

    #[test]
    fn bad_listen_addr_is_an_error() {
        assert!(config_from(&[("FT_LISTEN_ADDR", "not-an-addr")]).is_err());
    }

    #[test]
    fn unknown_price_source_is_an_error() {
        assert!(config_from(&[("FT_PRICE_SOURCE", "bloomberg")]).is_err());
    }
}
