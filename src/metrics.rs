use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::tokens::TokenConfig;

/// One displayed APY cell. Percentages are stored already scaled by 100 and
/// rounded to the two decimals that get shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApyValue {
    Percent(Decimal),
    NotAvailable,
    Error,
}

impl ApyValue {
    /// `None` when the scaled value does not fit in a `Decimal`.
    pub fn from_fraction(fraction: Decimal) -> Option<ApyValue> {
        fraction.checked_mul(Decimal::ONE_HUNDRED).map(|pct| {
            ApyValue::Percent(pct.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        })
    }

    pub fn percent(&self) -> Option<Decimal> {
        match self {
            ApyValue::Percent(d) => Some(*d),
            _ => None,
        }
    }

    /// Ordering key: sentinels count as zero.
    pub fn sort_key(&self) -> Decimal {
        self.percent().unwrap_or(Decimal::ZERO)
    }
}

impl fmt::Display for ApyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApyValue::Percent(d) => format!("{:.2}%", d),
            ApyValue::NotAvailable => "N/A".to_owned(),
            ApyValue::Error => "Error".to_owned(),
        };
        f.pad(&s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetrics {
    pub token: TokenConfig,
    pub current_apy: ApyValue,
    pub seven_day_avg_apy: ApyValue,
    pub thirty_day_avg_apy: ApyValue,
}

impl TokenMetrics {
    pub fn failed(token: TokenConfig) -> TokenMetrics {
        TokenMetrics {
            token,
            current_apy: ApyValue::Error,
            seven_day_avg_apy: ApyValue::Error,
            thirty_day_avg_apy: ApyValue::Error,
        }
    }

    pub fn unavailable(token: TokenConfig) -> TokenMetrics {
        TokenMetrics {
            token,
            current_apy: ApyValue::NotAvailable,
            seven_day_avg_apy: ApyValue::NotAvailable,
            thirty_day_avg_apy: ApyValue::NotAvailable,
        }
    }
}
