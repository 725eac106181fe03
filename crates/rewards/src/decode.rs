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


//! Pure conversion of raw logs into [CapturedEvent]s.

use alloy::{
    primitives::{B256, U256},
    rpc::types::Log,
    sol_types::SolEvent,
};

use crate::{
    collateral::PricePair,
    contracts::{IActivePool, IDiaOracle, IGovToken, IVaultUpdates},
    deployment::{Deployment, ModuleContract},
    events::CapturedEvent,
};

/// Handler for one event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDecoder {
    OraclePrice,
    ActivePoolBalance,
    VaultUpdate,
    TokenTransfer,
}

impl EventDecoder {
    /// Topic0 of the event this decoder handles.
    pub fn signature(self) -> B256 {
        match self {
            EventDecoder::OraclePrice => IDiaOracle::OracleUpdate::SIGNATURE_HASH,
            EventDecoder::ActivePoolBalance => {
                IActivePool::ActivePoolCOLBalanceUpdated::SIGNATURE_HASH
            }
            EventDecoder::VaultUpdate => IVaultUpdates::VaultUpdated::SIGNATURE_HASH,
            EventDecoder::TokenTransfer => IGovToken::Transfer::SIGNATURE_HASH,
        }
    }

    /// Decode a log. Logs without a block number, that fail ABI decoding, that come from an
    /// address the deployment does not expect, or that price an untracked pair yield `None`.
    pub fn decode(self, log: &Log, deployment: &Deployment) -> Option<CapturedEvent> {
        let Some(block) = log.block_number else {
            tracing::trace!("Dropping log without block number from {}", log.inner.address);
            return None;
        };
        let emitter = log.inner.address;

        let event = match self {
            EventDecoder::OraclePrice => {
                if emitter != deployment.price_oracle_address {
                    return unexpected_source(self, log);
                }
                let decoded = decode_as::<IDiaOracle::OracleUpdate>(log)?;
                let Ok(pair) = decoded.key.parse::<PricePair>() else {
                    tracing::trace!(
                        "Dropping price for untracked pair {} at block {block}",
                        decoded.key
                    );
                    return None;
                };
                CapturedEvent::PriceUpdate { block, pair, price: U256::from(decoded.value) }
            }
            EventDecoder::ActivePoolBalance => {
                let Some((collateral, ModuleContract::ActivePool)) =
                    deployment.module_contract(emitter)
                else {
                    return unexpected_source(self, log);
                };
                let decoded = decode_as::<IActivePool::ActivePoolCOLBalanceUpdated>(log)?;
                CapturedEvent::PoolBalanceUpdate { block, collateral, amount: decoded._COL }
            }
            EventDecoder::VaultUpdate => {
                let collateral = match deployment.module_contract(emitter) {
                    Some((
                        kind,
                        ModuleContract::BorrowerOperations | ModuleContract::VaultManager,
                    )) => kind,
                    _ => return unexpected_source(self, log),
                };
                let decoded = decode_as::<IVaultUpdates::VaultUpdated>(log)?;
                CapturedEvent::ParticipantBalanceUpdate {
                    block,
                    collateral,
                    participant: decoded._borrower,
                    balance: decoded._coll,
                }
            }
            EventDecoder::TokenTransfer => {
                if emitter != deployment.gov_token_address {
                    return unexpected_source(self, log);
                }
                let decoded = decode_as::<IGovToken::Transfer>(log)?;
                CapturedEvent::TokenTransfer {
                    block,
                    from: decoded.from,
                    to: decoded.to,
                    amount: decoded.value,
                }
            }
        };
        Some(event)
    }
}

fn decode_as<E: SolEvent>(log: &Log) -> Option<E> {
    match log.log_decode::<E>() {
        Ok(decoded) => Some(decoded.inner.data),
        Err(err) => {
            tracing::trace!(
                "Dropping undecodable {} log at block {:?}: {err}",
                E::SIGNATURE,
                log.block_number
            );
            None
        }
    }
}

fn unexpected_source(decoder: EventDecoder, log: &Log) -> Option<CapturedEvent> {
    tracing::trace!(
        "Dropping {decoder:?} log from unexpected address {} at block {:?}",
        log.inner.address,
        log.block_number
    );
    None
}
