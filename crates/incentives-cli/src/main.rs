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


use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use incentive_rewards::IncentivesConfig;

mod calculate;
mod gate;
mod pipeline;
mod scan;

use calculate::CalculateArgs;
use pipeline::Pipeline;
use scan::ScanArgs;

/// Scan incentive events and compute deposit and staking rewards.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct MainArgs {
    /// TOML config file. Built-in defaults are used when omitted.
    #[clap(long, env = "INCENTIVES_CONFIG", global = true)]
    config: Option<PathBuf>,
    /// Directory holding snapshots and outputs, one subdirectory per pipeline.
    #[clap(long, env = "INCENTIVES_DATA_DIR", default_value = "data", global = true)]
    data_dir: PathBuf,
    /// Whether to log in JSON format.
    #[clap(long, env, default_value_t = false, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Collateral deposit incentives
    #[command(subcommand)]
    Deposit(Action),
    /// Governance token staking incentives
    #[command(subcommand)]
    Staking(Action),
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Scan chain events into snapshot files
    Scan(ScanArgs),
    /// Replay snapshots, verify the totals and build the recipient list
    Calculate(CalculateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Loaded before parsing so `.env` can supply RPC_URL and friends.
    let dotenv = dotenvy::dotenv();
    let args = MainArgs::parse();

    if args.log_json {
        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment variables from {:?}", path),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => bail!("failed to load .env file: {}", e),
    }

    run(args).await
}

async fn run(args: MainArgs) -> Result<()> {
    let config = load_config(args.config.as_deref()).await?;
    let (pipeline, action) = match args.command {
        Command::Deposit(action) => (Pipeline::Deposit, action),
        Command::Staking(action) => (Pipeline::Staking, action),
    };
    let dir = pipeline.data_dir(&args.data_dir);

    match action {
        Action::Scan(scan_args) => scan::run(pipeline, &config, &dir, &scan_args).await,
        Action::Calculate(calc_args) => {
            calculate::run(pipeline, &config, &dir, &calc_args).await
        }
    }
}

async fn load_config(path: Option<&std::path::Path>) -> Result<IncentivesConfig> {
    match path {
        Some(path) => {
            let config = IncentivesConfig::load(path)
                .await
                .with_context(|| format!("failed to load config {}", path.display()))?;
            tracing::info!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => {
            let config = IncentivesConfig::default();
            config.validate().context("built-in config is invalid")?;
            tracing::debug!("Using built-in config");
            Ok(config)
        }
    }
}
