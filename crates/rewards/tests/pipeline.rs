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
    build_recipient_list, calculate_staking_rewards,
    config::StakingConfig,
    math::WAD,
    recipients::RecipientInfo,
    scanner::staking_batches,
    snapshot::{read_snapshot, read_user_rewards, write_recipient_list, write_user_rewards},
    verify_totals, Deployment, EventStream, RetryPolicy, Scanner, RECIPIENT_LIST_FILE,
    USER_REWARDS_FILE,
};
use tempfile::tempdir;

#[tokio::test]
async fn scan_calculate_and_build_recipients() {
    let dir = tempdir().unwrap();
    let deployment = Deployment::astar();
    let token = deployment.gov_token_address;

    let config = StakingConfig {
        init_block: 10,
        reward_start_block: 20,
        reward_end_block: 29,
        total_rewards: "10".to_string(),
        scan_end_block: Some(29),
        concurrency: 2,
    };
    let source = MockEventSource::default().with_logs(
        "GovTokenTransfer",
        vec![
            transfer_log(token, 12, Address::ZERO, holder(1), 300),
            transfer_log(token, 15, holder(1), holder(2), 100),
            transfer_log(token, 25, holder(2), holder(3), 100),
            // Past the reward window and the scan range.
            transfer_log(token, 40, Address::ZERO, holder(4), 1_000),
        ],
    );
    let retry = RetryPolicy {
        max_attempts: 2,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(1),
    };
    let scanner = Scanner::new(source, deployment.clone(), 5, retry, dir.path());

    let batch = staking_batches(&config, &deployment).remove(0);
    let state = scanner.scan_batch(&batch).await.unwrap();
    assert_eq!(state.events.len(), 3);

    let events = read_snapshot(&scanner.snapshot_path(&batch)).await.unwrap();
    let schedule = config.schedule().unwrap();
    let totals = calculate_staking_rewards(&EventStream::new(events), &schedule).unwrap();

    // One token per block. Holder 1 keeps 2/3 throughout, holder 2 hands its third to
    // holder 3 at block 25.
    let two_thirds = U256::from(666_666_666_666_666_666u64);
    let one_third = U256::from(333_333_333_333_333_333u64);
    assert_eq!(totals[&holder(1)], two_thirds * U256::from(10));
    assert_eq!(totals[&holder(2)], one_third * U256::from(5));
    assert_eq!(totals[&holder(3)], one_third * U256::from(5));
    assert!(!totals.contains_key(&holder(4)));

    let rewards_path = dir.path().join(USER_REWARDS_FILE);
    write_user_rewards(&rewards_path, &totals).await.unwrap();
    let reloaded = read_user_rewards(&rewards_path).await.unwrap();
    assert_eq!(reloaded, totals);

    let verification = verify_totals(&reloaded, &schedule);
    assert_eq!(verification.expected, WAD * U256::from(10));
    assert_eq!(verification.shortfall, U256::from(10));
    assert!(verification.within_bounds());

    let list = build_recipient_list(&reloaded);
    let list_path = dir.path().join(RECIPIENT_LIST_FILE);
    write_recipient_list(&list_path, &list).await.unwrap();

    let written: serde_json::Value =
        serde_json::from_slice(&tokio::fs::read(&list_path).await.unwrap()).unwrap();
    let recipients = written["recipients"].as_array().unwrap();
    assert_eq!(recipients.len(), 3);
    assert_eq!(recipients[0]["userAddress"], format!("{:#x}", holder(1)));
    assert_eq!(recipients[0]["airdropAmount"], (two_thirds * U256::from(10)).to_string());

    let parsed: Vec<RecipientInfo> =
        serde_json::from_value(written["recipients"].clone()).unwrap();
    assert_eq!(parsed, list.recipients);
}
