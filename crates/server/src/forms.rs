//! Submitted HTML form payloads and their conversion into ledger inserts.
//!
//! Empty fields count as absent. Absent amounts default to 0, an absent
//! note to "", an absent date to `today`.

use chrono::NaiveDate;
use finance_tracker_core::models::cash::NewCashEntry;
use finance_tracker_core::models::stock::NewStockTransaction;
use serde::Deserialize;

use crate::error::ApiError;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Default, Deserialize)]
pub struct CashForm {
    #[serde(rename = "taiwanese-dollars")]
    pub taiwanese_dollars: Option<String>,
    #[serde(rename = "us-dollars")]
    pub us_dollars: Option<String>,
    pub note: Option<String>,
    pub date: Option<String>,
}

impl CashForm {
    pub fn into_entry(self, today: NaiveDate) -> Result<NewCashEntry, ApiError> {
        let taiwanese_dollars = parse_or(&self.taiwanese_dollars, "taiwanese-dollars", 0i64)?;
        let us_dollars = parse_or(&self.us_dollars, "us-dollars", 0f64)?;
        let note = present(&self.note).unwrap_or_default().to_string();
        let date = parse_date(&self.date, today)?;
        Ok(NewCashEntry::new(taiwanese_dollars, us_dollars, note, date))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StockForm {
    #[serde(rename = "stock-id")]
    pub stock_id: Option<String>,
    #[serde(rename = "stock-num")]
    pub stock_num: Option<String>,
    #[serde(rename = "stock-price")]
    pub stock_price: Option<String>,
    #[serde(rename = "processing-fee")]
    pub processing_fee: Option<String>,
    pub tax: Option<String>,
    pub date: Option<String>,
}

impl StockForm {
    pub fn into_transaction(self, today: NaiveDate) -> Result<NewStockTransaction, ApiError> {
        let ticker = required(&self.stock_id, "stock-id")?;
        let share_count: i64 = parse_required(&self.stock_num, "stock-num")?;
        let unit_price: f64 = parse_required(&self.stock_price, "stock-price")?;
        let processing_fee = parse_or(&self.processing_fee, "processing-fee", 0i64)?;
        let tax = parse_or(&self.tax, "tax", 0i64)?;
        let date = parse_date(&self.date, today)?;
        Ok(NewStockTransaction::new(ticker, share_count, unit_price, date)
            .with_frictions(processing_fee, tax))
    }
}

/// Body of the delete forms.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    pub id: Option<String>,
}

impl DeleteForm {
    pub fn id(&self) -> Result<i64, ApiError> {
        parse_required(&self.id, "id")
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, ApiError> {
    present(value).ok_or_else(|| ApiError::BadRequest(format!("Missing field '{name}'")))
}

fn parse_required<T: std::str::FromStr>(value: &Option<String>, name: &str) -> Result<T, ApiError> {
    let raw = required(value, name)?;
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Field '{name}' is not a valid number: '{raw}'")))
}

fn parse_or<T: std::str::FromStr>(value: &Option<String>, name: &str, default: T) -> Result<T, ApiError> {
    match present(value) {
        Some(_) => parse_required(value, name),
        None => Ok(default),
    }
}

fn parse_date(value: &Option<String>, today: NaiveDate) -> Result<NaiveDate, ApiError> {
    match present(value) {
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
            ApiError::BadRequest(format!("Field 'date' must be YYYY-MM-DD, got '{raw}'"))
        }),
        None => Ok(today),
    }
}
