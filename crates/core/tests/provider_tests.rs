// ═══════════════════════════════════════════════════════════════════
// Provider Tests: response parsing and registry wiring
// (no network access)
// ═══════════════════════════════════════════════════════════════════

use finance_tracker_core::errors::CoreError;
use finance_tracker_core::models::settings::{MarketSettings, PriceSource};
use finance_tracker_core::providers::registry::ProviderRegistry;
use finance_tracker_core::providers::rter::RterProvider;
use finance_tracker_core::providers::twse::TwseProvider;
use finance_tracker_core::providers::yahoo_finance::YahooFinanceProvider;

// ═══════════════════════════════════════════════════════════════════
// rter.info
// ═══════════════════════════════════════════════════════════════════

mod rter {
    use super::*;

    #[test]
    fn parses_usd_twd_rate() {
        let body = r#"{
            "USDTWD": {"Exrate": 32.415, "UTC": "2024-05-20 08:00:00"},
            "USDJPY": {"Exrate": 155.7, "UTC": "2024-05-20 08:00:00"}
        }"#;
        assert_eq!(RterProvider::parse_rate(body).unwrap(), 32.415);
    }

    #[test]
    fn malformed_neighbour_entry_is_ignored() {
        let body = r#"{"USDTWD": {"Exrate": 31.9}, "USDXXX": {"Exrate": "n/a"}}"#;
        assert_eq!(RterProvider::parse_rate(body).unwrap(), 31.9);
    }

    #[test]
    fn missing_pair_is_an_api_error() {
        let body = r#"{"USDJPY": {"Exrate": 155.7}}"#;
        let err = RterProvider::parse_rate(body).unwrap_err();
        assert!(matches!(err, CoreError::Api { .. }));
        assert!(err.to_string().contains("USDTWD"));
    }

    #[test]
    fn non_positive_rate_is_rejected() {
        assert!(RterProvider::parse_rate(r#"{"USDTWD": {"Exrate": 0}}"#).is_err());
        assert!(RterProvider::parse_rate(r#"{"USDTWD": {"Exrate": -1.0}}"#).is_err());
    }

    #[test]
    fn garbage_body_is_an_api_error() {
        let err = RterProvider::parse_rate("<html>busy</html>").unwrap_err();
        assert!(err.is_upstream());
    }
}

// ═══════════════════════════════════════════════════════════════════
// TWSE STOCK_DAY
// ═══════════════════════════════════════════════════════════════════

mod twse {
    use super::*;

    const REPORT: &str = r#"{
        "stat": "OK",
        "date": "20240520",
        "fields": ["日期","成交股數","成交金額","開盤價","最高價","最低價","收盤價","漲跌價差","成交筆數"],
        "data": [
            ["113/05/16","30,112,233","24,000,000,000","800.00","805.00","795.00","801.00","+3.00","40,000"],
            ["113/05/17","28,000,000","23,000,000,000","801.00","812.00","800.00","1,025.00","+9.00","38,000"]
        ]
    }"#;

    #[test]
    fn latest_close_is_last_row() {
        assert_eq!(TwseProvider::parse_latest_close("2330", REPORT).unwrap(), 1025.0);
    }

    #[test]
    fn empty_report_means_no_price() {
        let body = r#"{"stat": "OK", "data": []}"#;
        let err = TwseProvider::parse_latest_close("2330", body).unwrap_err();
        assert!(matches!(err, CoreError::PriceNotAvailable { ref ticker } if ticker == "2330"));
        assert!(err.is_upstream());
    }

    #[test]
    fn rejected_query_is_an_api_error() {
        let body = r#"{"stat": "很抱歉，沒有符合條件的資料!"}"#;
        let err = TwseProvider::parse_latest_close("9999", body).unwrap_err();
        assert!(matches!(err, CoreError::Api { .. }));
    }

    #[test]
    fn short_row_is_an_api_error() {
        let body = r#"{"stat": "OK", "data": [["113/05/17", "1"]]}"#;
        let err = TwseProvider::parse_latest_close("2330", body).unwrap_err();
        assert!(err.to_string().contains("columns"));
    }

    #[test]
    fn no_trade_marker_is_an_api_error() {
        let body = r#"{"stat": "OK", "data": [["113/05/17","0","0","--","--","--","--","X0.00","0"]]}"#;
        assert!(TwseProvider::parse_latest_close("2330", body).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Yahoo Finance / Registry
// ═══════════════════════════════════════════════════════════════════

mod registry {
    use super::*;

    #[test]
    fn yahoo_symbol_appends_suffix() {
        let provider = YahooFinanceProvider::new(".TW").unwrap();
        assert_eq!(provider.yahoo_symbol("2330"), "2330.TW");
        assert_eq!(provider.yahoo_symbol("6488.TWO"), "6488.TWO");
    }

    #[test]
    fn empty_suffix_passes_through() {
        let provider = YahooFinanceProvider::new("").unwrap();
        assert_eq!(provider.yahoo_symbol("AAPL"), "AAPL");
    }

    #[test]
    fn default_settings_use_twse() {
        let registry = ProviderRegistry::from_settings(&MarketSettings::default()).unwrap();
        assert_eq!(registry.exchange_rate_provider().name(), "tw.rter.info");
        assert_eq!(registry.stock_price_provider().name(), "TWSE");
    }

    #[test]
    fn yahoo_settings_use_yahoo() {
        let settings = MarketSettings {
            price_source: PriceSource::Yahoo,
            yahoo_suffix: ".TW".into(),
        };
        let registry = ProviderRegistry::from_settings(&settings).unwrap();
        assert_eq!(registry.stock_price_provider().name(), "Yahoo Finance");
    }
}
