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


mod common;

use std::time::Duration;

use alloy::primitives::{Address, U256};
use common::{holder, transfer_log, MockEventSource};
use incentive_rewards::{
    config::StakingConfig,
    error::QueryError,
    scanner::{staking_batches, GOV_TOKEN_TRANSFERS_FILE},
    snapshot::read_snapshot,
    CapturedEvent, Deployment, RetryPolicy, ScanBatch, ScanError, Scanner,
};
use tempfile::tempdir;
use tracing_test::traced_test;

const QUERY: &str = "GovTokenTransfer";

fn fast_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(4),
    }
}

fn transfer_batch(end_block: u64, concurrency: usize) -> ScanBatch {
    let config = StakingConfig {
        init_block: 0,
        scan_end_block: Some(end_block),
        concurrency,
        ..Default::default()
    };
    staking_batches(&config, &Deployment::astar()).remove(0)
}

fn minted(blocks: &[u64]) -> MockEventSource {
    let token = Deployment::astar().gov_token_address;
    let logs = blocks
        .iter()
        .map(|block| transfer_log(token, *block, Address::ZERO, holder(1), *block))
        .collect();
    MockEventSource::default().with_logs(QUERY, logs)
}

#[tokio::test]
#[traced_test]
async fn scans_every_chunk_and_flushes_each_window() {
    let dir = tempdir().unwrap();
    let source = minted(&[1, 7, 12, 25, 26]);
    let scanner = Scanner::new(source, Deployment::astar(), 4, fast_retry(3), dir.path());

    let state = scanner.scan_batch(&transfer_batch(25, 4)).await.unwrap();

    let blocks: Vec<u64> = state.events.iter().map(CapturedEvent::block).collect();
    assert_eq!(blocks, vec![1, 7, 12, 25]);
    assert_eq!(state.next_block, 26);

    // Six chunks of five blocks, the last one clipped to the scan end.
    assert!(logs_contain("scanned up to block 19"));
    assert!(logs_contain("scanned up to block 25"));

    let snapshot = read_snapshot(&dir.path().join(GOV_TOKEN_TRANSFERS_FILE)).await.unwrap();
    assert_eq!(snapshot, state.events);
}

#[tokio::test]
async fn chunk_boundaries_follow_chunk_size() {
    let dir = tempdir().unwrap();
    let scanner = Scanner::new(minted(&[]), Deployment::astar(), 4, fast_retry(3), dir.path());
    scanner.scan_batch(&transfer_batch(12, 2)).await.unwrap();

    let mut ranges: Vec<(u64, u64)> =
        scanner_calls(&scanner).into_iter().map(|(_, from, to)| (from, to)).collect();
    ranges.sort();
    assert_eq!(ranges, vec![(0, 4), (5, 9), (10, 12)]);
}

fn scanner_calls(scanner: &Scanner<MockEventSource>) -> Vec<(String, u64, u64)> {
    scanner.source().calls()
}

#[tokio::test]
#[traced_test]
async fn transient_errors_are_retried() {
    let dir = tempdir().unwrap();
    let source = minted(&[6]).failing(
        QUERY,
        5,
        vec![
            QueryError::Transient("429 Too Many Requests".into()),
            QueryError::Transient("timeout".into()),
        ],
    );
    let scanner = Scanner::new(source, Deployment::astar(), 4, fast_retry(3), dir.path());

    let state = scanner.scan_batch(&transfer_batch(9, 2)).await.unwrap();
    assert_eq!(state.events.len(), 1);
    assert!(logs_contain("retrying in"));
    assert!(logs_contain("succeeded after 3 attempts"));
}

#[tokio::test]
async fn exhausted_retries_fail_the_batch() {
    let dir = tempdir().unwrap();
    let errors = vec![QueryError::Transient("rate limit".into()); 5];
    let source = minted(&[]).failing(QUERY, 0, errors);
    let scanner = Scanner::new(source, Deployment::astar(), 4, fast_retry(2), dir.path());

    let err = scanner.scan_batch(&transfer_batch(4, 1)).await.unwrap_err();
    match err {
        ScanError::RetriesExhausted { query, from, to, attempts, .. } => {
            assert_eq!((query.as_str(), from, to, attempts), (QUERY, 0, 4, 2));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn permanent_error_keeps_flushed_events() {
    let dir = tempdir().unwrap();
    let source = minted(&[2, 6])
        .failing(QUERY, 5, vec![QueryError::Permanent("invalid block range".into())]);
    let scanner = Scanner::new(source, Deployment::astar(), 4, fast_retry(5), dir.path());

    let err = scanner.scan_batch(&transfer_batch(9, 1)).await.unwrap_err();
    assert!(matches!(err, ScanError::Query { from: 5, to: 9, .. }));

    let snapshot = read_snapshot(&dir.path().join(GOV_TOKEN_TRANSFERS_FILE)).await.unwrap();
    assert_eq!(
        snapshot,
        vec![CapturedEvent::TokenTransfer {
            block: 2,
            from: Address::ZERO,
            to: holder(1),
            amount: U256::from(2),
        }]
    );
}

#[tokio::test]
async fn empty_range_still_writes_a_snapshot() {
    let dir = tempdir().unwrap();
    let scanner = Scanner::new(minted(&[]), Deployment::astar(), 4, fast_retry(1), dir.path());
    let mut batch = transfer_batch(10, 1);
    batch.start_block = 11;

    let state = scanner.scan_batch(&batch).await.unwrap();
    assert!(state.events.is_empty());
    let snapshot = read_snapshot(&dir.path().join(GOV_TOKEN_TRANSFERS_FILE)).await.unwrap();
    assert!(snapshot.is_empty());
}

#[tokio::test]
async fn logs_from_other_contracts_are_dropped() {
    let dir = tempdir().unwrap();
    let impostor = Address::with_last_byte(0xee);
    let source = MockEventSource::default().with_logs(
        QUERY,
        vec![transfer_log(impostor, 3, Address::ZERO, holder(2), 10)],
    );
    let scanner = Scanner::new(source, Deployment::astar(), 4, fast_retry(1), dir.path());
    let state = scanner.scan_batch(&transfer_batch(4, 1)).await.unwrap();
    assert!(state.events.is_empty());
}
