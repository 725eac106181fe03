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

//! Governance token holdings and staking incentive accrual.

use std::collections::BTreeMap;

use alloy::primitives::{Address, U256};

use crate::{
    error::ReplayError,
    events::CapturedEvent,
    math::pro_rata_share,
    replay::{EventStream, RewardSchedule},
    UserTotalRewards,
};

/// Token balances rebuilt from `Transfer` events.
///
/// `total_supply` always equals the sum of `balances`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenLedger {
    balances: BTreeMap<Address, U256>,
    total_supply: U256,
}

impl TokenLedger {
    pub fn balance_of(&self, holder: &Address) -> U256 {
        self.balances.get(holder).copied().unwrap_or_default()
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Every address that ever received tokens, with its current balance.
    pub fn balances(&self) -> impl Iterator<Item = (&Address, &U256)> {
        self.balances.iter()
    }

    /// Apply a mint (from zero), burn (to zero) or plain transfer.
    pub fn apply(&mut self, event: &CapturedEvent) -> Result<(), ReplayError> {
        let CapturedEvent::TokenTransfer { block, from, to, amount } = event else {
            return Err(ReplayError::UnexpectedEvent { block: event.block(), event: event.kind() });
        };
        let (block, amount) = (*block, *amount);

        if from.is_zero() {
            self.total_supply = self
                .total_supply
                .checked_add(amount)
                .ok_or(ReplayError::SupplyOverflow { block })?;
        } else {
            self.debit(block, *from, amount)?;
        }

        if to.is_zero() {
            self.total_supply = self.total_supply.checked_sub(amount).ok_or(
                ReplayError::NegativeSupply { block, supply: self.total_supply, amount },
            )?;
        } else {
            let balance = self.balances.entry(*to).or_default();
            *balance = balance
                .checked_add(amount)
                .ok_or(ReplayError::BalanceOverflow { block, account: *to })?;
        }
        Ok(())
    }

    fn debit(&mut self, block: u64, account: Address, amount: U256) -> Result<(), ReplayError> {
        let balance = self.balances.entry(account).or_default();
        *balance = balance.checked_sub(amount).ok_or(ReplayError::NegativeBalance {
            block,
            account,
            balance: *balance,
            amount,
        })?;
        Ok(())
    }

    /// Rewards of every holder for `block`. Empty when nothing is in circulation.
    pub fn block_rewards(
        &self,
        block: u64,
        reward_per_block: U256,
    ) -> Result<Vec<(Address, U256)>, ReplayError> {
        if self.total_supply.is_zero() {
            return Ok(Vec::new());
        }
        self.balances
            .iter()
            .filter(|(_, balance)| !balance.is_zero())
            .map(|(holder, balance)| {
                pro_rata_share(reward_per_block, *balance, self.total_supply)
                    .map(|reward| (*holder, reward))
                    .ok_or(ReplayError::RewardOverflow { block })
            })
            .collect()
    }
}

/// Replays governance token transfers over `init_block..=reward_end_block` and returns the
/// total reward per holder.
pub fn calculate_staking_rewards(
    transfers: &EventStream,
    schedule: &RewardSchedule,
) -> Result<UserTotalRewards, ReplayError> {
    let reward_per_block = schedule.reward_per_block();
    tracing::info!(
        "Replaying {} token transfers for blocks {}-{} ({} per block)",
        transfers.len(),
        schedule.init_block(),
        schedule.reward_end_block(),
        reward_per_block
    );

    let mut ledger = TokenLedger::default();
    let mut totals = UserTotalRewards::new();
    let mut cursor = transfers.cursor();

    for block in schedule.blocks() {
        for event in cursor.advance_through(block) {
            ledger.apply(event)?;
        }
        if schedule.is_reward_block(block) {
            for (holder, reward) in ledger.block_rewards(block, reward_per_block)? {
                let total = totals.entry(holder).or_default();
                *total = total.checked_add(reward).ok_or(ReplayError::RewardOverflow { block })?;
            }
        }
        schedule.report_progress(block);
    }

    tracing::info!("Staking replay done: {} holders rewarded", totals.len());
    Ok(totals)
}
