use std::{str::FromStr, sync::Arc};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use log::{debug, info};
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;

use super::datasource::{YieldHistorySource, YieldSample};

pub struct StakingYieldsApi {
    client: Arc<Client>,
    base_url: String,
}

impl StakingYieldsApi {
    pub fn new(client: Arc<Client>, base_url: String) -> StakingYieldsApi {
        StakingYieldsApi { client, base_url }
    }

    fn history_url(&self, mint: &str) -> String {
        format!("{}/staking-yields/tokens/{}/history", self.base_url, mint)
    }
}

#[async_trait]
impl YieldHistorySource for StakingYieldsApi {
    async fn get_history(
        &self,
        mint: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<YieldSample>> {
        let url = self.history_url(mint);
        info!("Querying yield history: {} {} .. {}", url, start, end);
        let resp_payload = self
            .client
            .get(&url)
            .query(&[
                ("start", start.to_rfc3339_opts(SecondsFormat::Millis, true)),
                ("end", end.to_rfc3339_opts(SecondsFormat::Millis, true)),
            ])
            .send()
            .await?;
        let status = resp_payload.status();
        debug!("Yield history response code for {}: {}", mint, status);
        if !status.is_success() {
            return Err(anyhow!("Staking yields: HTTP {} for {}", status, mint));
        }
        let response: JsonValue = resp_payload.json().await?;
        parse_history(&response)
    }
}

/// Maps the wire schema (`[{endBlockTime, apy}, ...]`) onto [`YieldSample`]s.
/// One malformed entry fails the whole response.
pub fn parse_history(response: &JsonValue) -> Result<Vec<YieldSample>> {
    response
        .as_array()
        .ok_or(anyhow!("Staking yields: result is not array"))?
        .iter()
        .map(parse_sample)
        .collect()
}

fn parse_sample(entry: &JsonValue) -> Result<YieldSample> {
    Ok(YieldSample {
        end_block_time: parse_timestamp(&entry["endBlockTime"])?,
        apy: parse_decimal(&entry["apy"])?,
    })
}

fn parse_timestamp(value: &JsonValue) -> Result<DateTime<Utc>> {
    match value {
        JsonValue::String(s) => Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc)),
        JsonValue::Number(n) => n
            .as_i64()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .ok_or(anyhow!("Staking yields: bad endBlockTime {}", n)),
        _ => Err(anyhow!("Failed to parse endBlockTime: {}", value)),
    }
}

fn parse_decimal(value: &JsonValue) -> Result<Decimal> {
    let text = match value {
        JsonValue::String(s) => s.trim().to_owned(),
        // go through the textual form so no binary float rounding sneaks in
        JsonValue::Number(n) => n.to_string(),
        _ => return Err(anyhow!("Failed to parse apy: {}", value)),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| anyhow!("Failed to parse apy {:?}: {}", text, e))
}
