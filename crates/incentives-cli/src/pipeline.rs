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


use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use incentive_rewards::{
    calculate_deposit_rewards, calculate_staking_rewards,
    scanner::{deposit_batches, module_file, staking_batches, GOV_TOKEN_TRANSFERS_FILE, PRICES_FILE},
    snapshot::read_snapshot,
    CapturedEvent, CollateralKind, ConfigError, Deployment, DepositStreams, EventStream,
    IncentivesConfig, PerCollateral, RewardSchedule, ScanBatch, UserTotalRewards,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    Deposit,
    Staking,
}

impl Pipeline {
    pub fn name(self) -> &'static str {
        match self {
            Pipeline::Deposit => "deposit",
            Pipeline::Staking => "staking",
        }
    }

    pub fn data_dir(self, base: &Path) -> PathBuf {
        base.join(self.name())
    }

    pub fn batches(self, config: &IncentivesConfig, deployment: &Deployment) -> Vec<ScanBatch> {
        match self {
            Pipeline::Deposit => deposit_batches(&config.deposit, deployment),
            Pipeline::Staking => staking_batches(&config.staking, deployment),
        }
    }

    pub fn schedule(self, config: &IncentivesConfig) -> Result<RewardSchedule, ConfigError> {
        match self {
            Pipeline::Deposit => config.deposit.schedule(),
            Pipeline::Staking => config.staking.schedule(),
        }
    }

    /// Load the pipeline's snapshots from `dir` and replay them.
    pub async fn calculate(
        self,
        dir: &Path,
        schedule: &RewardSchedule,
    ) -> Result<UserTotalRewards> {
        match self {
            Pipeline::Deposit => {
                let prices = load(&dir.join(PRICES_FILE)).await?;
                let mut modules = PerCollateral::<Vec<CapturedEvent>>::default();
                for kind in CollateralKind::ALL {
                    modules[kind] = load(&dir.join(module_file(kind))).await?;
                }
                let streams = DepositStreams::new(prices, modules);
                calculate_deposit_rewards(&streams, schedule)
                    .context("deposit reward replay failed")
            }
            Pipeline::Staking => {
                let transfers = load(&dir.join(GOV_TOKEN_TRANSFERS_FILE)).await?;
                calculate_staking_rewards(&EventStream::new(transfers), schedule)
                    .context("staking reward replay failed")
            }
        }
    }
}

async fn load(path: &Path) -> Result<Vec<CapturedEvent>> {
    read_snapshot(path)
        .await
        .with_context(|| format!("failed to read snapshot {}; run the scan first", path.display()))
}
