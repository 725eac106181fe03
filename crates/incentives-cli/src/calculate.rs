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


use std::path::Path;

use anyhow::{ensure, Context, Result};
use clap::{Args, ValueEnum};
use incentive_rewards::{
    build_recipient_list,
    snapshot::{read_user_rewards, write_recipient_list, write_user_rewards},
    verify_totals, IncentivesConfig, RECIPIENT_LIST_FILE, USER_REWARDS_FILE,
};

use crate::{
    gate::{self, Gate},
    pipeline::Pipeline,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Phase {
    /// Replay the snapshots and write the per-user totals.
    Calculate,
    /// Compare the written totals with the budget.
    Verify,
    /// Build the airdrop recipient list from the written totals.
    Recipients,
}

impl Phase {
    fn name(self) -> &'static str {
        match self {
            Phase::Calculate => "calculate",
            Phase::Verify => "verify",
            Phase::Recipients => "recipients",
        }
    }
}

#[derive(Args, Debug)]
pub struct CalculateArgs {
    /// Comma-separated phases to run. They always run in pipeline order.
    #[clap(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [Phase::Calculate, Phase::Verify, Phase::Recipients]
    )]
    pub phases: Vec<Phase>,
    /// Ask before each phase.
    #[clap(long, default_value_t = false)]
    pub interactive: bool,
}

pub async fn run(
    pipeline: Pipeline,
    config: &IncentivesConfig,
    dir: &Path,
    args: &CalculateArgs,
) -> Result<()> {
    let schedule = pipeline.schedule(config)?;
    let rewards_path = dir.join(USER_REWARDS_FILE);

    let mut phases = args.phases.clone();
    phases.sort();
    phases.dedup();

    for phase in phases {
        match gate::ask(phase.name(), args.interactive)? {
            Gate::Run => {}
            Gate::Skip => {
                tracing::info!("Skipping {} phase", phase.name());
                continue;
            }
            Gate::End => return Ok(()),
        }

        match phase {
            Phase::Calculate => {
                let totals = pipeline.calculate(dir, &schedule).await?;
                write_user_rewards(&rewards_path, &totals).await?;
            }
            Phase::Verify => {
                let totals = read_user_rewards(&rewards_path)
                    .await
                    .context("failed to read reward totals; run the calculate phase first")?;
                let verification = verify_totals(&totals, &schedule);
                ensure!(
                    !verification.is_over_distributed(),
                    "{} reward totals exceed the budget: expected {}, distributed {}",
                    pipeline.name(),
                    verification.expected,
                    verification.actual
                );
                if !verification.within_bounds() {
                    // Blocks in which nobody held weight pay nothing.
                    tracing::warn!(
                        "{} rewards fall short of the budget by {} (rounding bound {}); \
                         check for reward blocks without any weight",
                        pipeline.name(),
                        verification.shortfall,
                        verification.rounding_bound
                    );
                }
            }
            Phase::Recipients => {
                let totals = read_user_rewards(&rewards_path)
                    .await
                    .context("failed to read reward totals; run the calculate phase first")?;
                let list = build_recipient_list(&totals);
                write_recipient_list(&dir.join(RECIPIENT_LIST_FILE), &list).await?;
            }
        }
    }
    Ok(())
}
