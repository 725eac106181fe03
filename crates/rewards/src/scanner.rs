// Copyright 2026 Boundless Foundation, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Chunked, bounded-concurrency log scanning with snapshot checkpoints.
//!
//! A batch walks `start_block..=end_block` in chunks of `chunk_size + 1` blocks. Up to
//! `concurrency` chunks are queried at once. After each group of chunks joins, everything
//! collected so far is written to the batch's snapshot file, so an interrupted scan loses at
//! most one group.

use std::{
    future::Future,
    path::{Path, PathBuf},
    time::Duration,
};

use alloy::rpc::types::Log;
use futures_util::future::try_join_all;

use crate::{
    collateral::CollateralKind,
    config::{defaults, DepositConfig, StakingConfig},
    decode::EventDecoder,
    deployment::Deployment,
    error::{ConfigError, ScanError},
    events::CapturedEvent,
    snapshot::write_snapshot,
    source::{EventQuery, EventSource},
};

/// Snapshot file of the oracle price batch.
pub const PRICES_FILE: &str = "collateralPrices.json";
/// Snapshot file of the governance token transfer batch.
pub const GOV_TOKEN_TRANSFERS_FILE: &str = "govTokenTransfers.json";
/// Name of the price batch.
pub const PRICE_BATCH: &str = "price";
/// Name of the governance token transfer batch.
pub const GOV_TOKEN_BATCH: &str = "gov-token-transfers";

/// Snapshot file of a collateral module batch, e.g. `WETH-module.json`.
pub fn module_file(kind: CollateralKind) -> String {
    format!("{}-module.json", kind.name())
}

/// A named group of queries scanned over the same range into one snapshot file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanBatch {
    pub name: String,
    pub file_name: String,
    pub start_block: u64,
    pub end_block: u64,
    pub concurrency: usize,
    pub queries: Vec<EventQuery>,
}

/// Progress of one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    pub start_block: u64,
    pub end_block: u64,
    /// First block not yet covered by `events`.
    pub next_block: u64,
    pub events: Vec<CapturedEvent>,
}

impl ScanState {
    fn new(start_block: u64, end_block: u64) -> Self {
        Self { start_block, end_block, next_block: start_block, events: Vec::new() }
    }

    fn progress(&self) -> f64 {
        let total = (self.end_block + 1).saturating_sub(self.start_block).max(1);
        (self.next_block - self.start_block) as f64 * 100.0 / total as f64
    }
}

/// Exponential backoff for transient query failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per query, including the first.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: defaults::max_attempts(),
            base_delay: Duration::from_millis(defaults::base_delay_ms()),
            max_delay: Duration::from_millis(defaults::max_delay_ms()),
        }
    }
}

impl RetryPolicy {
    /// Wait after the failed attempt number `attempt` (1-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Inclusive `(from, to)` ranges covering `start..=end`, each at most `chunk_size + 1` long.
pub fn chunk_ranges(start: u64, end: u64, chunk_size: u64) -> impl Iterator<Item = (u64, u64)> {
    let step = chunk_size.saturating_add(1);
    std::iter::successors(Some(start).filter(|from| *from <= end), move |from| {
        from.checked_add(step).filter(|next| *next <= end)
    })
    .map(move |from| (from, from.saturating_add(chunk_size).min(end)))
}

pub struct Scanner<S> {
    source: S,
    deployment: Deployment,
    chunk_size: u64,
    retry: RetryPolicy,
    output_dir: PathBuf,
}

impl<S: EventSource> Scanner<S> {
    pub fn new(
        source: S,
        deployment: Deployment,
        chunk_size: u64,
        retry: RetryPolicy,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self { source, deployment, chunk_size, retry, output_dir: output_dir.into() }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn snapshot_path(&self, batch: &ScanBatch) -> PathBuf {
        self.output_dir.join(&batch.file_name)
    }

    /// Scan one batch to completion. The snapshot file holds every event found so far after
    /// each join point, and everything once this returns `Ok`.
    pub async fn scan_batch(&self, batch: &ScanBatch) -> Result<ScanState, ScanError> {
        let path = self.snapshot_path(batch);
        let concurrency = batch.concurrency.max(1);
        tracing::info!(
            "Starting {} batch: blocks {}-{}, {} queries per chunk",
            batch.name,
            batch.start_block,
            batch.end_block,
            batch.queries.len()
        );

        let mut state = ScanState::new(batch.start_block, batch.end_block);
        let mut pending = Vec::with_capacity(concurrency);
        for (from, to) in chunk_ranges(batch.start_block, batch.end_block, self.chunk_size) {
            pending.push(self.scan_chunk(batch, from, to));
            if pending.len() >= concurrency {
                self.join_and_flush(batch, &mut state, std::mem::take(&mut pending), &path).await?;
            }
        }
        self.join_and_flush(batch, &mut state, pending, &path).await?;

        tracing::info!(
            "Finished {} batch: {} events @ {}",
            batch.name,
            state.events.len(),
            path.display()
        );
        Ok(state)
    }

    async fn join_and_flush<F>(
        &self,
        batch: &ScanBatch,
        state: &mut ScanState,
        chunks: Vec<F>,
        path: &Path,
    ) -> Result<(), ScanError>
    where
        F: Future<Output = Result<(u64, Vec<CapturedEvent>), ScanError>>,
    {
        for (to, events) in try_join_all(chunks).await? {
            state.events.extend(events);
            state.next_block = to + 1;
        }
        write_snapshot(path, &state.events).await?;
        tracing::info!(
            "{}: scanned up to block {} ({:.2}%), {} events",
            batch.name,
            state.next_block.saturating_sub(1),
            state.progress(),
            state.events.len()
        );
        Ok(())
    }

    /// Run every query of the batch over one chunk and decode the results in log order.
    async fn scan_chunk(
        &self,
        batch: &ScanBatch,
        from: u64,
        to: u64,
    ) -> Result<(u64, Vec<CapturedEvent>), ScanError> {
        tracing::debug!("Querying {} for blocks {}-{}", batch.name, from, to);
        let results =
            try_join_all(batch.queries.iter().map(|query| self.query_with_retry(query, from, to)))
                .await?;

        let mut logs: Vec<(EventDecoder, Log)> = batch
            .queries
            .iter()
            .zip(results)
            .flat_map(|(query, logs)| logs.into_iter().map(move |log| (query.decoder, log)))
            .collect();
        logs.sort_by_key(|(_, log)| (log.block_number, log.transaction_index, log.log_index));

        let events = logs
            .iter()
            .filter_map(|(decoder, log)| decoder.decode(log, &self.deployment))
            .collect();
        Ok((to, events))
    }

    async fn query_with_retry(
        &self,
        query: &EventQuery,
        from: u64,
        to: u64,
    ) -> Result<Vec<Log>, ScanError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let err = match self.source.query(query, from, to).await {
                Ok(logs) => {
                    if attempt > 1 {
                        tracing::info!(
                            "{} {}-{} succeeded after {} attempts",
                            query.name,
                            from,
                            to,
                            attempt
                        );
                    }
                    return Ok(logs);
                }
                Err(err) => err,
            };

            if !err.is_transient() {
                tracing::error!("{} {}-{} failed: {}", query.name, from, to, err);
                return Err(ScanError::Query { query: query.name.clone(), from, to, source: err });
            }
            if attempt >= self.retry.max_attempts {
                tracing::error!(
                    "Aborting {} {}-{} after {} attempts",
                    query.name,
                    from,
                    to,
                    attempt
                );
                return Err(ScanError::RetriesExhausted {
                    query: query.name.clone(),
                    from,
                    to,
                    attempts: attempt,
                    source: err,
                });
            }

            let delay = self.retry.delay(attempt);
            tracing::warn!(
                "{} {}-{} failed: {}, attempt number {}, retrying in {}ms",
                query.name,
                from,
                to,
                err,
                attempt,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }
    }
}

/// Batches of the deposit pipeline: oracle prices, then one per collateral module.
pub fn deposit_batches(config: &DepositConfig, deployment: &Deployment) -> Vec<ScanBatch> {
    let end_block = config.scan_end_block();
    let mut batches = vec![ScanBatch {
        name: PRICE_BATCH.to_string(),
        file_name: PRICES_FILE.to_string(),
        start_block: config.price_batch.start_block,
        end_block,
        concurrency: config.price_batch.concurrency,
        queries: vec![EventQuery::new(
            "DiaOraclePriceUpdated",
            deployment.price_oracle_address,
            EventDecoder::OraclePrice,
        )],
    }];

    for kind in CollateralKind::ALL {
        let module = deployment.modules[kind];
        let batch = config.modules.get(kind);
        let label = title_case(kind.name());
        batches.push(ScanBatch {
            name: kind.name().to_lowercase(),
            file_name: module_file(kind),
            start_block: batch.start_block,
            end_block,
            concurrency: batch.concurrency,
            queries: vec![
                EventQuery::new(
                    format!("ActivePool{label}CollAmountUpdated"),
                    module.active_pool,
                    EventDecoder::ActivePoolBalance,
                ),
                EventQuery::new(
                    format!("BorrowerOperations{label}VaultUpdated"),
                    module.borrower_operations,
                    EventDecoder::VaultUpdate,
                ),
                EventQuery::new(
                    format!("VaultManager{label}VaultUpdated"),
                    module.vault_manager,
                    EventDecoder::VaultUpdate,
                ),
            ],
        });
    }
    batches
}

/// The single batch of the staking pipeline.
pub fn staking_batches(config: &StakingConfig, deployment: &Deployment) -> Vec<ScanBatch> {
    vec![ScanBatch {
        name: GOV_TOKEN_BATCH.to_string(),
        file_name: GOV_TOKEN_TRANSFERS_FILE.to_string(),
        start_block: config.init_block,
        end_block: config.scan_end_block(),
        concurrency: config.concurrency,
        queries: vec![EventQuery::new(
            "GovTokenTransfer",
            deployment.gov_token_address,
            EventDecoder::TokenTransfer,
        )],
    }]
}

/// Keep only the named batches, in pipeline order. An empty selection keeps everything.
pub fn select_batches(
    batches: Vec<ScanBatch>,
    names: &[String],
) -> Result<Vec<ScanBatch>, ConfigError> {
    if names.is_empty() {
        return Ok(batches);
    }
    if let Some(unknown) =
        names.iter().find(|name| !batches.iter().any(|b| b.name.eq_ignore_ascii_case(name)))
    {
        return Err(ConfigError::UnknownBatch(unknown.clone()));
    }
    Ok(batches
        .into_iter()
        .filter(|batch| names.iter().any(|name| batch.name.eq_ignore_ascii_case(name)))
        .collect())
}

/// `WASTR` -> `Wastr`.
fn title_case(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
