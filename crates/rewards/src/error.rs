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

use alloy::primitives::{Address, U256};
use thiserror::Error;

use crate::collateral::CollateralKind;

/// Failure of a single log query against the event source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Rate limiting, timeouts and dropped connections. Worth retrying.
    #[error("transient query error: {0}")]
    Transient(String),

    #[error("permanent query error: {0}")]
    Permanent(String),
}

impl QueryError {
    pub fn is_transient(&self) -> bool {
        matches!(self, QueryError::Transient(_))
    }
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid participant address {0:?} in rewards file")]
    InvalidAddress(String),
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("query {query} for blocks {from}-{to} failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        query: String,
        from: u64,
        to: u64,
        attempts: u32,
        #[source]
        source: QueryError,
    },

    #[error("query {query} for blocks {from}-{to} failed: {source}")]
    Query {
        query: String,
        from: u64,
        to: u64,
        #[source]
        source: QueryError,
    },

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// A state the replay must never reach. Aborts the replay instead of producing wrong numbers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("block {block}: participant {participant} has weighted stake {numerator} but the pool is empty")]
    ZeroDenominator { block: u64, participant: Address, numerator: U256 },

    #[error("block {block}: balance of {account} would go negative ({balance} - {amount})")]
    NegativeBalance { block: u64, account: Address, balance: U256, amount: U256 },

    #[error("block {block}: total supply would go negative ({supply} - {amount})")]
    NegativeSupply { block: u64, supply: U256, amount: U256 },

    #[error("block {block}: arithmetic overflow while valuing {collateral}")]
    Overflow { block: u64, collateral: CollateralKind },

    #[error("block {block}: token supply overflows")]
    SupplyOverflow { block: u64 },

    #[error("block {block}: balance of {account} overflows")]
    BalanceOverflow { block: u64, account: Address },

    #[error("block {block}: arithmetic overflow in reward computation")]
    RewardOverflow { block: u64 },

    #[error("block {block}: {event} event does not belong in this replay")]
    UnexpectedEvent { block: u64, event: &'static str },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("reward start block {start} must be smaller than reward end block {end}")]
    EmptyRewardWindow { start: u64, end: u64 },

    #[error("replay must start no later than the reward window ({init} > {reward_start})")]
    LateReplayStart { init: u64, reward_start: u64 },

    #[error("scan start block {start} must not be after scan end block {end}")]
    EmptyScanRange { start: u64, end: u64 },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("invalid reward amount {0:?}")]
    InvalidAmount(String),

    #[error("unknown batch {0:?}")]
    UnknownBatch(String),

    #[error("failed to read config {path}: {message}")]
    Load { path: PathBuf, message: String },
}
