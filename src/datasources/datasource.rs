use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

#[async_trait]
pub trait YieldHistorySource: Sync + Send {
    async fn get_history(
        &self,
        mint: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<YieldSample>>;
}

/// A single period from the yield history, `apy` as a plain fraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YieldSample {
    pub end_block_time: DateTime<Utc>,
    pub apy: Decimal,
}
