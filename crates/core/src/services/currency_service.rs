use crate::errors::CoreError;

/// Converts the USD cash total into New Taiwan dollars for display.
///
/// The conversion is one-way and never stored: the result is floored to a
/// whole dollar, not rounded.
pub struct CurrencyService;

impl CurrencyService {
    pub fn new() -> Self {
        Self
    }

    /// Reject rates that cannot be a real USD/TWD quote.
    pub fn validate_rate(&self, rate: f64) -> Result<(), CoreError> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Exchange rate must be a non-negative number, got {rate}"
            )));
        }
        Ok(())
    }

    /// `floor(usd × rate)`.
    /// E.g., usd_to_ntd(100.5, 32.1) → 3226
    pub fn usd_to_ntd(&self, usd: f64, rate: f64) -> Result<i64, CoreError> {
        self.validate_rate(rate)?;
        if !usd.is_finite() || usd < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "USD amount must be a non-negative number, got {usd}"
            )));
        }
        Ok((usd * rate).floor() as i64)
    }
}

impl Default for CurrencyService {
    fn default() -> Self {
        Self::new()
    }
}
