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

//! Deposit incentive accrual.
//!
//! Replays oracle prices, active pool balances and vault balances block by block. Every block
//! of the reward window splits a fixed budget between vault owners by the USD value of their
//! collateral relative to the USD value of everything in the pools.

use std::collections::BTreeMap;

use alloy::primitives::{Address, U256};

use crate::{
    collateral::{CollateralKind, PerCollateral},
    error::ReplayError,
    events::CapturedEvent,
    math::{oracle_price_scale, pow10, pro_rata_share, WAD},
    replay::{EventStream, RewardSchedule},
    UserTotalRewards,
};

/// Input event streams of the deposit replay.
#[derive(Debug, Clone, Default)]
pub struct DepositStreams {
    pub prices: EventStream,
    pub modules: PerCollateral<EventStream>,
}

impl DepositStreams {
    pub fn new(prices: Vec<CapturedEvent>, modules: PerCollateral<Vec<CapturedEvent>>) -> Self {
        Self { prices: EventStream::new(prices), modules: modules.map(EventStream::new) }
    }
}

/// Prices, pool balances and vault balances as of the last applied block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepositState {
    prices: PerCollateral<U256>,
    pools: PerCollateral<U256>,
    participants: BTreeMap<Address, PerCollateral<U256>>,
}

impl DepositState {
    /// Latest price of `kind`, scaled to 18 decimals.
    pub fn price(&self, kind: CollateralKind) -> U256 {
        self.prices[kind]
    }

    pub fn pool_amount(&self, kind: CollateralKind) -> U256 {
        self.pools[kind]
    }

    pub fn participant_balance(&self, participant: &Address, kind: CollateralKind) -> U256 {
        self.participants.get(participant).map(|b| b[kind]).unwrap_or_default()
    }

    pub fn participants(&self) -> impl Iterator<Item = &Address> {
        self.participants.keys()
    }

    pub fn apply(&mut self, event: &CapturedEvent) -> Result<(), ReplayError> {
        match event {
            CapturedEvent::PriceUpdate { block, price, pair } => {
                let kind = pair.collateral();
                self.prices[kind] = price
                    .checked_mul(oracle_price_scale())
                    .ok_or(ReplayError::Overflow { block: *block, collateral: kind })?;
            }
            CapturedEvent::PoolBalanceUpdate { collateral, amount, .. } => {
                self.pools[*collateral] = *amount;
            }
            CapturedEvent::ParticipantBalanceUpdate { collateral, participant, balance, .. } => {
                self.participants.entry(*participant).or_default()[*collateral] = *balance;
            }
            CapturedEvent::TokenTransfer { block, .. } => {
                return Err(ReplayError::UnexpectedEvent { block: *block, event: event.kind() });
            }
        }
        Ok(())
    }

    /// USD value of all pooled collateral, 18 decimals.
    pub fn pool_value(&self, block: u64) -> Result<U256, ReplayError> {
        self.weighted_value(&self.pools, block)
    }

    /// Rewards of every participant for `block`, given the per-block budget.
    ///
    /// Participants whose collateral is worth nothing at current prices get no entry.
    pub fn block_rewards(
        &self,
        block: u64,
        reward_per_block: U256,
    ) -> Result<Vec<(Address, U256)>, ReplayError> {
        let denominator = self.pool_value(block)?;
        let mut rewards = Vec::new();
        for (participant, balances) in &self.participants {
            let numerator = self.weighted_value(balances, block)?;
            if numerator.is_zero() {
                continue;
            }
            if denominator.is_zero() {
                return Err(ReplayError::ZeroDenominator {
                    block,
                    participant: *participant,
                    numerator,
                });
            }
            let reward = pro_rata_share(reward_per_block, numerator, denominator)
                .ok_or(ReplayError::RewardOverflow { block })?;
            rewards.push((*participant, reward));
        }
        Ok(rewards)
    }

    fn weighted_value(
        &self,
        amounts: &PerCollateral<U256>,
        block: u64,
    ) -> Result<U256, ReplayError> {
        let mut total = U256::ZERO;
        for (kind, amount) in amounts.iter() {
            let value = collateral_value(*amount, self.prices[kind], kind)
                .ok_or(ReplayError::Overflow { block, collateral: kind })?;
            total = total
                .checked_add(value)
                .ok_or(ReplayError::Overflow { block, collateral: kind })?;
        }
        Ok(total)
    }
}

/// USD value (18 decimals) of `amount` base units of `kind` at an 18-decimal `price`.
///
/// `amount * price * 10^(18 - precision) / 10^18`. `None` on overflow.
pub fn collateral_value(amount: U256, price: U256, kind: CollateralKind) -> Option<U256> {
    if amount.is_zero() || price.is_zero() {
        return Some(U256::ZERO);
    }
    let scaled = amount.checked_mul(price)?.checked_mul(pow10(18 - kind.precision()))?;
    Some(scaled / WAD)
}

/// Replays the deposit streams over `init_block..=reward_end_block` and returns the total
/// reward per participant.
pub fn calculate_deposit_rewards(
    streams: &DepositStreams,
    schedule: &RewardSchedule,
) -> Result<UserTotalRewards, ReplayError> {
    let reward_per_block = schedule.reward_per_block();
    tracing::info!(
        "Replaying deposit events for blocks {}-{} ({} per block)",
        schedule.init_block(),
        schedule.reward_end_block(),
        reward_per_block
    );

    let mut state = DepositState::default();
    let mut totals = UserTotalRewards::new();
    let mut price_cursor = streams.prices.cursor();
    let mut module_cursors = PerCollateral::from_fn(|kind| streams.modules[kind].cursor());

    for block in schedule.blocks() {
        for event in price_cursor.advance_through(block) {
            state.apply(event)?;
        }
        for kind in CollateralKind::ALL {
            for event in module_cursors[kind].advance_through(block) {
                state.apply(event)?;
            }
        }

        if schedule.is_reward_block(block) {
            for (participant, reward) in state.block_rewards(block, reward_per_block)? {
                let total = totals.entry(participant).or_default();
                *total = total.checked_add(reward).ok_or(ReplayError::RewardOverflow { block })?;
            }
        }
        schedule.report_progress(block);
    }

    tracing::info!("Deposit replay done: {} participants rewarded", totals.len());
    Ok(totals)
}
