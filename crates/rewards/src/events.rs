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

//! Typed records decoded from on-chain logs.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::collateral::{CollateralKind, PricePair};

/// A decoded log entry, as stored in a snapshot file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum CapturedEvent {
    /// Oracle price for a pair, in the oracle's 8-decimal fixed point.
    #[serde(rename = "OracleUpdate")]
    PriceUpdate {
        block: u64,
        #[serde(with = "crate::big_number")]
        price: U256,
        #[serde(rename = "collateralPair")]
        pair: PricePair,
    },
    /// Protocol-wide amount of a collateral held by the active pool.
    #[serde(rename = "ActivePoolCOLBalanceUpdated")]
    PoolBalanceUpdate {
        block: u64,
        #[serde(rename = "collateralName")]
        collateral: CollateralKind,
        #[serde(rename = "collAmount", with = "crate::big_number")]
        amount: U256,
    },
    /// New collateral balance of a single vault owner.
    #[serde(rename = "VaultUpdated")]
    ParticipantBalanceUpdate {
        block: u64,
        #[serde(rename = "collateralName")]
        collateral: CollateralKind,
        #[serde(rename = "userAddress")]
        participant: Address,
        #[serde(rename = "collateralBalance", with = "crate::big_number")]
        balance: U256,
    },
    /// Governance token transfer; mints come from and burns go to the zero address.
    #[serde(rename = "Transfer")]
    TokenTransfer {
        block: u64,
        from: Address,
        to: Address,
        #[serde(with = "crate::big_number")]
        amount: U256,
    },
}

impl CapturedEvent {
    pub fn block(&self) -> u64 {
        match self {
            CapturedEvent::PriceUpdate { block, .. }
            | CapturedEvent::PoolBalanceUpdate { block, .. }
            | CapturedEvent::ParticipantBalanceUpdate { block, .. }
            | CapturedEvent::TokenTransfer { block, .. } => *block,
        }
    }

    /// Short name used in logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            CapturedEvent::PriceUpdate { .. } => "PriceUpdate",
            CapturedEvent::PoolBalanceUpdate { .. } => "PoolBalanceUpdate",
            CapturedEvent::ParticipantBalanceUpdate { .. } => "ParticipantBalanceUpdate",
            CapturedEvent::TokenTransfer { .. } => "TokenTransfer",
        }
    }
}

/// Stable sort by block. Events within a block keep their emission order.
pub fn sort_by_block(events: &mut [CapturedEvent]) {
    events.sort_by_key(CapturedEvent::block);
}
