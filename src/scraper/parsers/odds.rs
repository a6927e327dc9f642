//! Odds and payout normalization.

use crate::error::ExtractError;

/// Converts odds strings to decimal values.
pub struct OddsParser;

impl OddsParser {
    /// Parse a decimal or mixed-number fraction ("2.5", "5/2", "3 1/2").
    ///
    /// A negative whole part flips the sign of the fraction, so "-1 1/2"
    /// is -1.5.
    pub fn to_decimal(text: &str) -> Result<f64, ExtractError> {
        let text = text.trim();
        if let Ok(value) = text.parse::<f64>() {
            return Ok(value);
        }

        let invalid = || ExtractError::InvalidOdds(text.to_string());

        let mut parts = text.split('/');
        let (num, denom) = match (parts.next(), parts.next(), parts.next()) {
            (Some(num), Some(denom), None) => (num, denom),
            _ => return Err(invalid()),
        };

        // "3 1" -> whole 3, numerator 1
        let (whole, num) = match num.split_once(' ') {
            Some((leading, rest)) if !rest.contains(' ') => {
                (leading.parse::<f64>().unwrap_or(0.0), rest)
            }
            _ => (0.0, num),
        };

        let num: f64 = num.parse().map_err(|_| invalid())?;
        let denom: f64 = denom.parse().map_err(|_| invalid())?;
        let frac = num / denom;

        Ok(if whole < 0.0 { whole - frac } else { whole + frac })
    }

    /// Parse a payout cell. A lone dash or a blank cell means nothing was paid.
    pub fn parse_payout(text: &str) -> Result<f64, ExtractError> {
        let text = text.trim();
        if text.is_empty() || text == "-" {
            return Ok(0.0);
        }
        let cleaned = text.replace(['$', ','], "");
        cleaned
            .trim()
            .parse::<f64>()
            .map_err(|_| ExtractError::InvalidNumber {
                field: "payout",
                value: text.to_string(),
            })
    }
}
