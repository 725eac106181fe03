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

use alloy::providers::ProviderBuilder;
use anyhow::{Context, Result};
use clap::Args;
use incentive_rewards::{
    scanner::select_batches, Deployment, IncentivesConfig, ProviderEventSource, Scanner,
};
use url::Url;

use crate::{
    gate::{self, Gate},
    pipeline::Pipeline,
};

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// URL of the RPC endpoint.
    #[clap(long, env = "RPC_URL")]
    pub rpc_url: Url,
    /// Comma-separated batch names to scan. All batches when omitted.
    #[clap(long, value_delimiter = ',')]
    pub batches: Vec<String>,
    /// Ask before each batch.
    #[clap(long, default_value_t = false)]
    pub interactive: bool,
}

pub async fn run(
    pipeline: Pipeline,
    config: &IncentivesConfig,
    dir: &Path,
    args: &ScanArgs,
) -> Result<()> {
    let deployment = Deployment::default();
    let batches = select_batches(pipeline.batches(config, &deployment), &args.batches)?;

    let provider = ProviderBuilder::new().connect_http(args.rpc_url.clone());
    let scanner = Scanner::new(
        ProviderEventSource::new(provider),
        deployment,
        config.scan.chunk_size,
        config.scan.retry_policy(),
        dir,
    );

    tracing::info!("Scanning {} {} batches into {}", batches.len(), pipeline.name(), dir.display());
    for batch in &batches {
        match gate::ask(&batch.name, args.interactive)? {
            Gate::Run => {}
            Gate::Skip => {
                tracing::info!("Skipping {} batch", batch.name);
                continue;
            }
            Gate::End => return Ok(()),
        }
        let state = scanner
            .scan_batch(batch)
            .await
            .with_context(|| format!("{} batch failed", batch.name))?;
        tracing::info!(
            "{} batch done: {} events in {}",
            batch.name,
            state.events.len(),
            scanner.snapshot_path(batch).display()
        );
    }
    Ok(())
}
