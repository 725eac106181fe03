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

//! JSON files shared between the scan, calculate and recipient phases.

use std::{collections::BTreeMap, path::Path, str::FromStr};

use alloy::primitives::{Address, U256};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    big_number::BigNumber,
    error::SnapshotError,
    events::{sort_by_block, CapturedEvent},
    recipients::RecipientList,
    UserTotalRewards,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRef<'a> {
    queried_state: &'a [CapturedEvent],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotFile {
    queried_state: Vec<StoredEvent>,
}

/// Transfer records written by older tooling carry no `event` tag.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredEvent {
    Tagged(CapturedEvent),
    UntaggedTransfer {
        block: u64,
        from: Address,
        to: Address,
        #[serde(with = "crate::big_number")]
        amount: U256,
    },
}

impl From<StoredEvent> for CapturedEvent {
    fn from(event: StoredEvent) -> Self {
        match event {
            StoredEvent::Tagged(event) => event,
            StoredEvent::UntaggedTransfer { block, from, to, amount } => {
                CapturedEvent::TokenTransfer { block, from, to, amount }
            }
        }
    }
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| SnapshotError::Io { path: parent.to_path_buf(), source })?;
    }
    let data = serde_json::to_vec_pretty(value)
        .map_err(|source| SnapshotError::Json { path: path.to_path_buf(), source })?;
    tokio::fs::write(path, data)
        .await
        .map_err(|source| SnapshotError::Io { path: path.to_path_buf(), source })
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SnapshotError> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|source| SnapshotError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_slice(&data)
        .map_err(|source| SnapshotError::Json { path: path.to_path_buf(), source })
}

/// Overwrite `path` with `{ "queriedState": [...] }`.
pub async fn write_snapshot(path: &Path, events: &[CapturedEvent]) -> Result<(), SnapshotError> {
    write_json(path, &SnapshotRef { queried_state: events }).await?;
    tracing::debug!("Wrote {} events to {}", events.len(), path.display());
    Ok(())
}

/// Load a snapshot, sorted by block with file order kept within a block.
pub async fn read_snapshot(path: &Path) -> Result<Vec<CapturedEvent>, SnapshotError> {
    let file: SnapshotFile = read_json(path).await?;
    let mut events: Vec<CapturedEvent> = file.queried_state.into_iter().map(Into::into).collect();
    sort_by_block(&mut events);
    tracing::debug!("Loaded {} events from {}", events.len(), path.display());
    Ok(events)
}

/// Write totals keyed by lowercase hex address.
pub async fn write_user_rewards(
    path: &Path,
    rewards: &UserTotalRewards,
) -> Result<(), SnapshotError> {
    let encoded: BTreeMap<String, BigNumber> =
        rewards.iter().map(|(addr, amount)| (format!("{addr:#x}"), BigNumber(*amount))).collect();
    write_json(path, &encoded).await?;
    tracing::info!("Wrote rewards of {} participants to {}", rewards.len(), path.display());
    Ok(())
}

pub async fn read_user_rewards(path: &Path) -> Result<UserTotalRewards, SnapshotError> {
    let encoded: BTreeMap<String, BigNumber> = read_json(path).await?;
    encoded
        .into_iter()
        .map(|(addr, amount)| {
            Address::from_str(&addr)
                .map(|addr| (addr, amount.0))
                .map_err(|_| SnapshotError::InvalidAddress(addr))
        })
        .collect()
}

pub async fn write_recipient_list(path: &Path, list: &RecipientList) -> Result<(), SnapshotError> {
    write_json(path, list).await?;
    tracing::info!("Wrote {} recipients to {}", list.recipients.len(), path.display());
    Ok(())
}
