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


//! Operator configuration, loaded from TOML. Every field defaults to the parameters of the
//! historical Astar incentive programs.

use std::{path::Path, time::Duration};

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

use crate::{
    collateral::CollateralKind, error::ConfigError, math::parse_units, replay::RewardSchedule,
    scanner::RetryPolicy,
};

pub mod defaults {
    pub const fn chunk_size() -> u64 {
        1000
    }

    pub const fn max_attempts() -> u32 {
        5
    }

    pub const fn base_delay_ms() -> u64 {
        1000
    }

    pub const fn max_delay_ms() -> u64 {
        120_000
    }

    pub const fn deposit_init_block() -> u64 {
        910_000
    }

    pub const fn deposit_reward_start_block() -> u64 {
        915_779
    }

    pub const fn deposit_reward_end_block() -> u64 {
        1_530_000
    }

    pub fn deposit_total_rewards() -> String {
        "60000000".to_string()
    }

    pub const fn staking_init_block() -> u64 {
        crate::deployment::ASTAR_GOV_TOKEN_DEPLOYMENT_BLOCK
    }

    pub const fn staking_reward_start_block() -> u64 {
        915_820
    }

    pub const fn staking_reward_end_block() -> u64 {
        1_738_250
    }

    pub fn staking_total_rewards() -> String {
        "3333333.333333333333333333".to_string()
    }

    pub const fn staking_concurrency() -> usize {
        5
    }
}

/// Chunking and retry settings shared by every scan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Blocks per query beyond the first; each chunk spans `chunk_size + 1` blocks.
    #[serde(default = "defaults::chunk_size")]
    pub chunk_size: u64,
    #[serde(default = "defaults::max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "defaults::base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "defaults::max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            chunk_size: defaults::chunk_size(),
            max_attempts: defaults::max_attempts(),
            base_delay_ms: defaults::base_delay_ms(),
            max_delay_ms: defaults::max_delay_ms(),
        }
    }
}

impl ScanConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
        }
    }
}

/// Where a scan batch starts and how many chunks it keeps in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BatchConfig {
    pub start_block: u64,
    pub concurrency: usize,
}

impl BatchConfig {
    pub const fn new(start_block: u64, concurrency: usize) -> Self {
        Self { start_block, concurrency }
    }
}

/// One [BatchConfig] per collateral module. Missing modules keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModuleBatches {
    #[serde(rename = "BUSD")]
    pub busd: BatchConfig,
    #[serde(rename = "DAI")]
    pub dai: BatchConfig,
    #[serde(rename = "DOT")]
    pub dot: BatchConfig,
    #[serde(rename = "USDC")]
    pub usdc: BatchConfig,
    #[serde(rename = "USDT")]
    pub usdt: BatchConfig,
    #[serde(rename = "WASTR")]
    pub wastr: BatchConfig,
    #[serde(rename = "WBTC")]
    pub wbtc: BatchConfig,
    #[serde(rename = "WETH")]
    pub weth: BatchConfig,
}

impl ModuleBatches {
    pub fn get(&self, kind: CollateralKind) -> BatchConfig {
        match kind {
            CollateralKind::Busd => self.busd,
            CollateralKind::Dai => self.dai,
            CollateralKind::Dot => self.dot,
            CollateralKind::Usdc => self.usdc,
            CollateralKind::Usdt => self.usdt,
            CollateralKind::Wastr => self.wastr,
            CollateralKind::Wbtc => self.wbtc,
            CollateralKind::Weth => self.weth,
        }
    }
}

impl Default for ModuleBatches {
    // Each module is scanned from shortly before its contracts were deployed.
    fn default() -> Self {
        Self {
            busd: BatchConfig::new(1_040_000, 4),
            dai: BatchConfig::new(1_120_000, 3),
            dot: BatchConfig::new(1_190_000, 3),
            usdc: BatchConfig::new(1_260_000, 3),
            usdt: BatchConfig::new(1_500_000, 3),
            wastr: BatchConfig::new(910_000, 2),
            wbtc: BatchConfig::new(1_340_000, 3),
            weth: BatchConfig::new(1_230_000, 3),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DepositConfig {
    /// First replayed block. Also the start of the price scan.
    #[serde(default = "defaults::deposit_init_block")]
    pub init_block: u64,
    #[serde(default = "defaults::deposit_reward_start_block")]
    pub reward_start_block: u64,
    /// Last rewarded block. Also the end of every deposit scan.
    #[serde(default = "defaults::deposit_reward_end_block")]
    pub reward_end_block: u64,
    /// Budget in whole tokens, decimal string with up to 18 fractional digits.
    #[serde(default = "defaults::deposit_total_rewards")]
    pub total_rewards: String,
    #[serde(default = "default_price_batch")]
    pub price_batch: BatchConfig,
    #[serde(default)]
    pub modules: ModuleBatches,
}

fn default_price_batch() -> BatchConfig {
    BatchConfig::new(defaults::deposit_init_block(), 5)
}

impl Default for DepositConfig {
    fn default() -> Self {
        Self {
            init_block: defaults::deposit_init_block(),
            reward_start_block: defaults::deposit_reward_start_block(),
            reward_end_block: defaults::deposit_reward_end_block(),
            total_rewards: defaults::deposit_total_rewards(),
            price_batch: default_price_batch(),
            modules: ModuleBatches::default(),
        }
    }
}

impl DepositConfig {
    pub fn schedule(&self) -> Result<RewardSchedule, ConfigError> {
        RewardSchedule::new(
            self.init_block,
            self.reward_start_block,
            self.reward_end_block,
            parse_budget(&self.total_rewards)?,
        )
    }

    pub fn scan_end_block(&self) -> u64 {
        self.reward_end_block
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StakingConfig {
    /// First replayed and first scanned block: the governance token deployment block.
    #[serde(default = "defaults::staking_init_block")]
    pub init_block: u64,
    #[serde(default = "defaults::staking_reward_start_block")]
    pub reward_start_block: u64,
    #[serde(default = "defaults::staking_reward_end_block")]
    pub reward_end_block: u64,
    #[serde(default = "defaults::staking_total_rewards")]
    pub total_rewards: String,
    /// Last scanned block. Defaults to the reward end block.
    #[serde(default)]
    pub scan_end_block: Option<u64>,
    #[serde(default = "defaults::staking_concurrency")]
    pub concurrency: usize,
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            init_block: defaults::staking_init_block(),
            reward_start_block: defaults::staking_reward_start_block(),
            reward_end_block: defaults::staking_reward_end_block(),
            total_rewards: defaults::staking_total_rewards(),
            scan_end_block: None,
            concurrency: defaults::staking_concurrency(),
        }
    }
}

impl StakingConfig {
    pub fn schedule(&self) -> Result<RewardSchedule, ConfigError> {
        RewardSchedule::new(
            self.init_block,
            self.reward_start_block,
            self.reward_end_block,
            parse_budget(&self.total_rewards)?,
        )
    }

    pub fn scan_end_block(&self) -> u64 {
        self.scan_end_block.unwrap_or(self.reward_end_block)
    }
}

/// Top-level operator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IncentivesConfig {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub deposit: DepositConfig,
    #[serde(default)]
    pub staking: StakingConfig,
}

impl IncentivesConfig {
    /// Load and validate the config from disk
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::Load { path: path.to_path_buf(), message: e.to_string() })?;
        let config: Self = toml::from_str(&data)
            .map_err(|e| ConfigError::Load { path: path.to_path_buf(), message: e.to_string() })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that must pass before any scan or replay starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.chunk_size == 0 {
            return Err(ConfigError::Zero("scan.chunk_size"));
        }
        if self.scan.max_attempts == 0 {
            return Err(ConfigError::Zero("scan.max_attempts"));
        }

        self.deposit.schedule()?;
        let deposit_batches = std::iter::once(("deposit.price_batch", self.deposit.price_batch))
            .chain(
                CollateralKind::ALL.map(|kind| ("deposit.modules", self.deposit.modules.get(kind))),
            );
        for (name, batch) in deposit_batches {
            if batch.concurrency == 0 {
                return Err(ConfigError::Zero(name));
            }
            if batch.start_block > self.deposit.scan_end_block() {
                return Err(ConfigError::EmptyScanRange {
                    start: batch.start_block,
                    end: self.deposit.scan_end_block(),
                });
            }
        }
        if self.deposit.price_batch.start_block > self.deposit.reward_start_block {
            return Err(ConfigError::LateReplayStart {
                init: self.deposit.price_batch.start_block,
                reward_start: self.deposit.reward_start_block,
            });
        }

        self.staking.schedule()?;
        if self.staking.concurrency == 0 {
            return Err(ConfigError::Zero("staking.concurrency"));
        }
        if self.staking.init_block > self.staking.scan_end_block() {
            return Err(ConfigError::EmptyScanRange {
                start: self.staking.init_block,
                end: self.staking.scan_end_block(),
            });
        }
        Ok(())
    }
}

fn parse_budget(amount: &str) -> Result<U256, ConfigError> {
    parse_units(amount).ok_or_else(|| ConfigError::InvalidAmount(amount.to_string()))
}
