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


//! Where logs come from.

use alloy::{
    primitives::{Address, B256},
    providers::Provider,
    rpc::types::{BlockNumberOrTag, Filter, Log},
    transports::{RpcError, TransportErrorKind},
};
use async_trait::async_trait;

use crate::{decode::EventDecoder, error::QueryError};

/// JSON-RPC error codes providers use for throttling and timeouts.
const TRANSIENT_RPC_CODES: [i64; 3] = [429, -32005, -32090];

/// One (contract, event) pair to scan for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    /// Label used in logs and errors, e.g. `VaultManagerWethVaultUpdated`.
    pub name: String,
    pub address: Address,
    pub decoder: EventDecoder,
    /// Optional filter on the first indexed argument.
    pub topic1: Option<B256>,
}

impl EventQuery {
    pub fn new(name: impl Into<String>, address: Address, decoder: EventDecoder) -> Self {
        Self { name: name.into(), address, decoder, topic1: None }
    }

    pub fn with_topic1(self, topic1: B256) -> Self {
        Self { topic1: Some(topic1), ..self }
    }

    pub fn signature(&self) -> B256 {
        self.decoder.signature()
    }

    /// Log filter for `from_block..=to_block`.
    pub fn filter(&self, from_block: u64, to_block: u64) -> Filter {
        let filter = Filter::new()
            .address(self.address)
            .event_signature(self.signature())
            .from_block(BlockNumberOrTag::Number(from_block))
            .to_block(BlockNumberOrTag::Number(to_block));
        match self.topic1 {
            Some(topic) => filter.topic1(topic),
            None => filter,
        }
    }
}

/// A source of historical logs.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Logs matching `query` in `from_block..=to_block`.
    async fn query(
        &self,
        query: &EventQuery,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<Log>, QueryError>;
}

/// [EventSource] backed by `eth_getLogs` on an alloy provider.
#[derive(Clone, Debug)]
pub struct ProviderEventSource<P> {
    provider: P,
}

impl<P> ProviderEventSource<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P: Provider> EventSource for ProviderEventSource<P> {
    async fn query(
        &self,
        query: &EventQuery,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<Log>, QueryError> {
        let filter = query.filter(from_block, to_block);
        self.provider.get_logs(&filter).await.map_err(classify_rpc_error)
    }
}

/// Transport failures, empty responses and throttling are transient. Everything else is not.
pub fn classify_rpc_error(err: RpcError<TransportErrorKind>) -> QueryError {
    let transient = match &err {
        RpcError::Transport(_) | RpcError::NullResp => true,
        RpcError::ErrorResp(payload) => {
            let message = payload.message.to_lowercase();
            TRANSIENT_RPC_CODES.contains(&payload.code)
                || message.contains("rate limit")
                || message.contains("too many requests")
                || message.contains("timeout")
        }
        _ => false,
    };
    if transient {
        QueryError::Transient(err.to_string())
    } else {
        QueryError::Permanent(err.to_string())
    }
}
