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


#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

use alloy::{
    primitives::{Address, Log as PrimitiveLog, U256},
    rpc::types::Log,
    sol_types::SolEvent,
};
use async_trait::async_trait;
use incentive_rewards::{
    contracts::IGovToken, error::QueryError, EventQuery, EventSource,
};

pub fn rpc_log<E: SolEvent>(emitter: Address, block: u64, event: &E) -> Log {
    Log {
        inner: PrimitiveLog { address: emitter, data: event.encode_log_data() },
        block_number: Some(block),
        ..Default::default()
    }
}

pub fn transfer_log(token: Address, block: u64, from: Address, to: Address, amount: u64) -> Log {
    rpc_log(token, block, &IGovToken::Transfer { from, to, value: U256::from(amount) })
}

pub fn holder(n: u8) -> Address {
    Address::with_last_byte(n)
}

/// In-memory [EventSource] with scripted failures.
#[derive(Default)]
pub struct MockEventSource {
    logs: HashMap<String, Vec<Log>>,
    failures: Mutex<HashMap<(String, u64), VecDeque<QueryError>>>,
    calls: Mutex<Vec<(String, u64, u64)>>,
}

impl MockEventSource {
    pub fn with_logs(mut self, query: &str, logs: Vec<Log>) -> Self {
        self.logs.entry(query.to_string()).or_default().extend(logs);
        self
    }

    /// Fail the queries of `query` starting at `from_block` with `errors`, in order.
    pub fn failing(self, query: &str, from_block: u64, errors: Vec<QueryError>) -> Self {
        self.failures
            .lock()
            .unwrap()
            .entry((query.to_string(), from_block))
            .or_default()
            .extend(errors);
        self
    }

    pub fn calls(&self) -> Vec<(String, u64, u64)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSource for MockEventSource {
    async fn query(
        &self,
        query: &EventQuery,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<Log>, QueryError> {
        self.calls.lock().unwrap().push((query.name.clone(), from_block, to_block));

        let scripted = self
            .failures
            .lock()
            .unwrap()
            .get_mut(&(query.name.clone(), from_block))
            .and_then(VecDeque::pop_front);
        if let Some(err) = scripted {
            return Err(err);
        }

        Ok(self
            .logs
            .get(&query.name)
            .into_iter()
            .flatten()
            .filter(|log| {
                log.block_number.is_some_and(|block| (from_block..=to_block).contains(&block))
            })
            .cloned()
            .collect())
    }
}
