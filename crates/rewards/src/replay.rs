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

//! Block-ordered event streams and the cursors the accrual engines step through them with.

use alloy::primitives::U256;

use crate::{
    error::ConfigError,
    events::{sort_by_block, CapturedEvent},
};

/// Number of blocks between two progress log lines.
const PROGRESS_INTERVAL: u64 = 50_000;

/// Events sorted ascending by block, emission order preserved within a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStream(Vec<CapturedEvent>);

impl EventStream {
    pub fn new(mut events: Vec<CapturedEvent>) -> Self {
        sort_by_block(&mut events);
        Self(events)
    }

    pub fn events(&self) -> &[CapturedEvent] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn cursor(&self) -> EventCursor<'_> {
        EventCursor { events: &self.0, next: 0 }
    }
}

impl From<Vec<CapturedEvent>> for EventStream {
    fn from(events: Vec<CapturedEvent>) -> Self {
        Self::new(events)
    }
}

/// Read position in an [EventStream].
pub(crate) struct EventCursor<'a> {
    events: &'a [CapturedEvent],
    next: usize,
}

impl<'a> EventCursor<'a> {
    /// Advance past every event at or before `block` and return them.
    pub(crate) fn advance_through(&mut self, block: u64) -> &'a [CapturedEvent] {
        let start = self.next;
        while self.next < self.events.len() && self.events[self.next].block() <= block {
            self.next += 1;
        }
        &self.events[start..self.next]
    }
}

/// Block range and budget of one incentive program. All bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardSchedule {
    init_block: u64,
    reward_start_block: u64,
    reward_end_block: u64,
    total_rewards: U256,
}

impl RewardSchedule {
    pub fn new(
        init_block: u64,
        reward_start_block: u64,
        reward_end_block: u64,
        total_rewards: U256,
    ) -> Result<Self, ConfigError> {
        if reward_start_block >= reward_end_block {
            return Err(ConfigError::EmptyRewardWindow {
                start: reward_start_block,
                end: reward_end_block,
            });
        }
        if init_block > reward_start_block {
            return Err(ConfigError::LateReplayStart {
                init: init_block,
                reward_start: reward_start_block,
            });
        }
        Ok(Self { init_block, reward_start_block, reward_end_block, total_rewards })
    }

    pub fn init_block(&self) -> u64 {
        self.init_block
    }

    pub fn reward_start_block(&self) -> u64 {
        self.reward_start_block
    }

    pub fn reward_end_block(&self) -> u64 {
        self.reward_end_block
    }

    pub fn total_rewards(&self) -> U256 {
        self.total_rewards
    }

    pub fn blocks_in_window(&self) -> u64 {
        self.reward_end_block + 1 - self.reward_start_block
    }

    /// Floor of the budget over the window length.
    pub fn reward_per_block(&self) -> U256 {
        self.total_rewards / U256::from(self.blocks_in_window())
    }

    pub fn is_reward_block(&self, block: u64) -> bool {
        (self.reward_start_block..=self.reward_end_block).contains(&block)
    }

    pub(crate) fn blocks(&self) -> std::ops::RangeInclusive<u64> {
        self.init_block..=self.reward_end_block
    }

    pub(crate) fn report_progress(&self, block: u64) {
        let done = block - self.init_block;
        if done % PROGRESS_INTERVAL == 0 || block == self.reward_end_block {
            let total = self.reward_end_block + 1 - self.init_block;
            tracing::info!(
                "Calculation progress: {:.2}% (block {})",
                (done + 1) as f64 * 100.0 / total as f64,
                block
            );
        }
    }
}
