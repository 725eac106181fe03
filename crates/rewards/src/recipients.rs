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


//! Airdrop recipient list and reward total verification.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{math::WAD, replay::RewardSchedule, UserTotalRewards};

/// One airdrop entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientInfo {
    /// Lowercase hex address.
    pub user_address: String,
    pub recipient_id: u64,
    pub is_recipient: bool,
    /// Base-10 integer amount in base units.
    pub airdrop_amount: String,
    pub deployed_lockup_contract_address: Address,
}

impl RecipientInfo {
    pub fn new(user: Address, amount: U256) -> Self {
        Self {
            user_address: format!("{user:#x}"),
            recipient_id: 0,
            is_recipient: true,
            airdrop_amount: amount.to_string(),
            deployed_lockup_contract_address: Address::ZERO,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientList {
    pub recipients: Vec<RecipientInfo>,
}

/// One entry per participant, in address order.
pub fn build_recipient_list(rewards: &UserTotalRewards) -> RecipientList {
    RecipientList {
        recipients: rewards
            .iter()
            .map(|(user, amount)| RecipientInfo::new(*user, *amount))
            .collect(),
    }
}

/// Distributed total compared with the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardVerification {
    pub expected: U256,
    pub actual: U256,
    /// `expected - actual`, zero when over-distributed.
    pub shortfall: U256,
    /// Largest shortfall floor division can explain. Blocks of the window in which nobody
    /// held any weight pay nothing and are not covered.
    pub rounding_bound: U256,
}

impl RewardVerification {
    /// Nothing was over-distributed and the gap is explained by rounding.
    pub fn within_bounds(&self) -> bool {
        !self.is_over_distributed() && self.shortfall <= self.rounding_bound
    }

    /// More than the budget was handed out. Floor division can never cause this.
    pub fn is_over_distributed(&self) -> bool {
        self.actual > self.expected
    }
}

/// Sum the totals and bound the rounding loss.
///
/// Each block loses at most `budget mod blocks` once through the per-block floor, and each
/// participant at most `rpb / 10^18 + 2` base units per block through the two floored
/// divisions of the share computation.
pub fn verify_totals(rewards: &UserTotalRewards, schedule: &RewardSchedule) -> RewardVerification {
    let expected = schedule.total_rewards();
    let actual = rewards.values().fold(U256::ZERO, |sum, amount| sum.saturating_add(*amount));
    let blocks = U256::from(schedule.blocks_in_window());
    let rpb = schedule.reward_per_block();
    let participants = U256::from(rewards.len());

    let per_block_floor = expected.saturating_sub(rpb.saturating_mul(blocks));
    let per_share = rpb / WAD + U256::from(2);
    let rounding_bound = per_block_floor
        .saturating_add(blocks.saturating_mul(participants).saturating_mul(per_share));

    let verification = RewardVerification {
        expected,
        actual,
        shortfall: expected.saturating_sub(actual),
        rounding_bound,
    };
    tracing::info!(
        "Expected amount: {}, actual amount: {}, shortfall: {} (bound {})",
        verification.expected,
        verification.actual,
        verification.shortfall,
        verification.rounding_bound
    );
    verification
}
