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


//! Deposit and staking incentive reward calculation.
//!
//! The pipeline has three stages:
//!
//! 1. [scanner]: query historical logs in chunks, decode them into [CapturedEvent]s and
//!    checkpoint them into JSON snapshots.
//! 2. [deposit] and [staking]: replay the snapshots block by block and split a fixed
//!    per-block budget pro rata between participants.
//! 3. [recipients]: turn the totals into an airdrop recipient list and check them against
//!    the budget.

use std::collections::BTreeMap;

use alloy::primitives::{Address, U256};

pub mod big_number;
pub mod collateral;
pub mod config;
pub mod contracts;
pub mod decode;
pub mod deployment;
pub mod deposit;
pub mod error;
pub mod events;
pub mod math;
pub mod recipients;
pub mod replay;
pub mod scanner;
pub mod snapshot;
pub mod source;
pub mod staking;

pub use collateral::{CollateralKind, PerCollateral, PricePair};
pub use config::IncentivesConfig;
pub use deployment::Deployment;
pub use deposit::{calculate_deposit_rewards, DepositStreams};
pub use error::{ConfigError, QueryError, ReplayError, ScanError, SnapshotError};
pub use events::CapturedEvent;
pub use recipients::{build_recipient_list, verify_totals, RecipientList, RewardVerification};
pub use replay::{EventStream, RewardSchedule};
pub use scanner::{RetryPolicy, ScanBatch, Scanner};
pub use source::{EventQuery, EventSource, ProviderEventSource};
pub use staking::calculate_staking_rewards;

/// Accumulated reward per participant, in base units of the reward token.
pub type UserTotalRewards = BTreeMap<Address, U256>;

/// File the accrual engines write their totals to.
pub const USER_REWARDS_FILE: &str = "userTotalRewardAmounts.json";
/// File the recipient list is written to.
pub const RECIPIENT_LIST_FILE: &str = "recipientList.json";
