use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quote returned by the pricing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEstimate {
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl fmt::Display for PriceEstimate {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "${}", self.price)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::PriceEstimate;

    #[test]
    fn deserializes_fractional_price() {
        let estimate: PriceEstimate = serde_json::from_str(r#"{"price": 125.5}"#).unwrap();
        assert_eq!(estimate.price, dec!(125.5));
    }

    #[test]
    fn display_prefixes_dollar_sign() {
        let estimate = PriceEstimate { price: dec!(99.95) };
        assert_eq!(estimate.to_string(), "$99.95");
    }
}
