use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use futures::join;
use futures::FutureExt;
use log::warn;
use rust_decimal::Decimal;

use super::datasource::{YieldHistorySource, YieldSample};
use crate::metrics::{ApyValue, TokenMetrics};
use crate::tokens::TokenConfig;

pub struct Aggregator {
    source: Arc<dyn YieldHistorySource>,
}

impl Aggregator {
    pub fn new(source: Arc<dyn YieldHistorySource>) -> Aggregator {
        Aggregator { source }
    }

    /// One row per configured token, in configuration order. Never fails:
    /// broken tokens come back with `Error` cells.
    pub async fn fetch_all(&self, tokens: &[TokenConfig]) -> Vec<TokenMetrics> {
        let now = Utc::now();
        join_all(tokens.iter().map(|t| self.token_metrics(*t, now))).await
    }

    /// A panic while fetching or reducing is contained to this token.
    pub async fn token_metrics(&self, token: TokenConfig, now: DateTime<Utc>) -> TokenMetrics {
        match AssertUnwindSafe(self.run_query(&token, now))
            .catch_unwind()
            .await
        {
            Ok(Ok(metrics)) => metrics,
            Ok(Err(e)) => {
                warn!("{}: {:#}", token.name, e);
                TokenMetrics::failed(token)
            }
            Err(_) => {
                warn!("{}: aggregation panicked", token.name);
                TokenMetrics::failed(token)
            }
        }
    }

    async fn run_query(&self, token: &TokenConfig, now: DateTime<Utc>) -> Result<TokenMetrics> {
        let (week, month) = join!(
            self.source
                .get_history(token.mint, now - Duration::days(7), now),
            self.source
                .get_history(token.mint, now - Duration::days(30), now),
        );
        let mut week = week?;
        let month = month?;

        let mut metrics = TokenMetrics::unavailable(*token);
        if !week.is_empty() {
            week.sort_by_key(|s| s.end_block_time);
            let latest = week.last().ok_or(anyhow!("empty 7-day history"))?;
            metrics.current_apy = percent(latest.apy)?;
            metrics.seven_day_avg_apy = percent(mean(&week)?)?;
        }
        if !month.is_empty() {
            metrics.thirty_day_avg_apy = percent(mean(&month)?)?;
        }
        Ok(metrics)
    }
}

fn percent(fraction: Decimal) -> Result<ApyValue> {
    ApyValue::from_fraction(fraction).ok_or(anyhow!("APY {} out of range", fraction))
}

fn mean(samples: &[YieldSample]) -> Result<Decimal> {
    let sum = samples
        .iter()
        .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(s.apy))
        .ok_or(anyhow!("APY sum overflowed"))?;
    sum.checked_div(Decimal::from(samples.len()))
        .ok_or(anyhow!("Cannot average {} samples", samples.len()))
}
