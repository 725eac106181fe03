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


mod common;

use alloy::primitives::{Address, U256};
use common::{holder, rpc_log};
use incentive_rewards::{
    calculate_deposit_rewards, calculate_staking_rewards,
    contracts::{IActivePool, IDiaOracle, IVaultUpdates},
    decode::EventDecoder,
    math::WAD,
    staking::TokenLedger,
    verify_totals, CapturedEvent, CollateralKind, Deployment, DepositStreams, EventStream,
    PerCollateral, PricePair, RewardSchedule,
};
use proptest::prelude::*;

fn mint(block: u64, to: Address, amount: U256) -> CapturedEvent {
    CapturedEvent::TokenTransfer { block, from: Address::ZERO, to, amount }
}

fn send(block: u64, from: Address, to: Address, amount: U256) -> CapturedEvent {
    CapturedEvent::TokenTransfer { block, from, to, amount }
}

#[test]
fn exact_fractions_distribute_the_whole_budget() {
    let stream = EventStream::new(vec![
        mint(100, holder(1), U256::from(25)),
        mint(100, holder(2), U256::from(75)),
    ]);
    let budget = WAD * U256::from(400);
    let schedule = RewardSchedule::new(100, 101, 200, budget).unwrap();

    let totals = calculate_staking_rewards(&stream, &schedule).unwrap();
    assert_eq!(totals[&holder(1)], WAD * U256::from(100));
    assert_eq!(totals[&holder(2)], WAD * U256::from(300));

    let verification = verify_totals(&totals, &schedule);
    assert_eq!(verification.actual, budget);
    assert!(verification.within_bounds());
}

#[test]
fn replay_is_idempotent() {
    let stream = EventStream::new(vec![
        mint(1, holder(1), U256::from(7)),
        send(3, holder(1), holder(2), U256::from(3)),
        mint(5, holder(3), U256::from(11)),
        send(8, holder(3), Address::ZERO, U256::from(4)),
    ]);
    let schedule = RewardSchedule::new(0, 2, 10, U256::from(999_999)).unwrap();

    let first = calculate_staking_rewards(&stream, &schedule).unwrap();
    let second = calculate_staking_rewards(&stream, &schedule).unwrap();
    assert_eq!(first, second);
    assert!(verify_totals(&first, &schedule).within_bounds());
}

#[test]
fn holders_emptied_before_the_window_never_appear() {
    let stream = EventStream::new(vec![
        mint(1, holder(1), U256::from(10)),
        send(2, holder(1), holder(2), U256::from(10)),
        mint(3, holder(3), U256::ZERO),
    ]);
    let schedule = RewardSchedule::new(0, 5, 9, U256::from(1000)).unwrap();
    let totals = calculate_staking_rewards(&stream, &schedule).unwrap();
    assert_eq!(totals.keys().copied().collect::<Vec<_>>(), vec![holder(2)]);
    assert!(totals.values().all(|amount| !amount.is_zero()));
}

#[test]
fn untracked_price_pairs_change_nothing() {
    let deployment = Deployment::astar();
    let oracle = deployment.price_oracle_address;
    let weth = deployment.modules[CollateralKind::Weth];
    let price = |block, key: &str, value: u128| {
        rpc_log(
            oracle,
            block,
            &IDiaOracle::OracleUpdate { key: key.to_string(), value, timestamp: 0 },
        )
    };

    let tracked = vec![price(1, "ETH/USD", 200_000_000_000), price(4, "ETH/USD", 210_000_000_000)];
    let mut noisy = tracked.clone();
    noisy.push(price(2, "GLMR/USD", 1));
    noisy.push(price(3, "WETH/USD", 5));

    let module = vec![
        rpc_log(
            weth.active_pool,
            1,
            &IActivePool::ActivePoolCOLBalanceUpdated { _COL: WAD * U256::from(3) },
        ),
        rpc_log(
            weth.vault_manager,
            1,
            &IVaultUpdates::VaultUpdated {
                _borrower: holder(1),
                _debt: U256::ZERO,
                _coll: WAD,
                _stake: WAD,
                _operation: 0,
            },
        ),
        rpc_log(
            weth.borrower_operations,
            1,
            &IVaultUpdates::VaultUpdated {
                _borrower: holder(2),
                _debt: U256::ZERO,
                _coll: WAD * U256::from(2),
                _stake: WAD * U256::from(2),
                _operation: 0,
            },
        ),
    ];
    let mut module_events = PerCollateral::<Vec<CapturedEvent>>::default();
    module_events[CollateralKind::Weth] = module
        .iter()
        .map(|log| {
            let decoder = if log.inner.address == weth.active_pool {
                EventDecoder::ActivePoolBalance
            } else {
                EventDecoder::VaultUpdate
            };
            decoder.decode(log, &deployment).unwrap()
        })
        .collect();

    let decode_prices = |logs: &[alloy::rpc::types::Log]| -> Vec<CapturedEvent> {
        logs.iter().filter_map(|log| EventDecoder::OraclePrice.decode(log, &deployment)).collect()
    };
    assert_eq!(decode_prices(&noisy).len(), 2);

    let schedule = RewardSchedule::new(0, 1, 6, WAD * U256::from(6)).unwrap();
    let clean = DepositStreams::new(decode_prices(&tracked), module_events.clone());
    let polluted = DepositStreams::new(decode_prices(&noisy), module_events);
    let expected = calculate_deposit_rewards(&clean, &schedule).unwrap();
    assert_eq!(calculate_deposit_rewards(&polluted, &schedule).unwrap(), expected);

    // One third and two thirds of each block's single token.
    assert_eq!(expected[&holder(1)], U256::from(333_333_333_333_333_333u64) * U256::from(6));
    assert_eq!(expected[&holder(2)], U256::from(666_666_666_666_666_666u64) * U256::from(6));
}

#[test]
fn deposit_totals_are_within_rounding_bounds() {
    let mut modules = PerCollateral::<Vec<CapturedEvent>>::default();
    modules[CollateralKind::Usdc] = vec![
        CapturedEvent::PoolBalanceUpdate {
            block: 2,
            collateral: CollateralKind::Usdc,
            amount: U256::from(3_000_000u64),
        },
        CapturedEvent::ParticipantBalanceUpdate {
            block: 2,
            collateral: CollateralKind::Usdc,
            participant: holder(1),
            balance: U256::from(1_000_000u64),
        },
        CapturedEvent::ParticipantBalanceUpdate {
            block: 2,
            collateral: CollateralKind::Usdc,
            participant: holder(2),
            balance: U256::from(2_000_000u64),
        },
    ];
    let prices = vec![CapturedEvent::PriceUpdate {
        block: 1,
        pair: PricePair::UsdcUsd,
        price: U256::from(100_000_000u64),
    }];
    let schedule = RewardSchedule::new(0, 2, 8, U256::from(1_000_003u64)).unwrap();
    let streams = DepositStreams::new(prices, modules);
    let totals = calculate_deposit_rewards(&streams, &schedule).unwrap();

    let verification = verify_totals(&totals, &schedule);
    assert!(verification.shortfall > U256::ZERO);
    assert!(verification.within_bounds(), "{verification:?}");
}

#[derive(Debug, Clone)]
enum LedgerOp {
    Mint { to: u8, amount: u64 },
    Transfer { from: u8, to: u8, amount: u64 },
    Burn { from: u8, amount: u64 },
}

fn ledger_op() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        (1u8..6, 0u64..1_000).prop_map(|(to, amount)| LedgerOp::Mint { to, amount }),
        (1u8..6, 1u8..6, 0u64..1_500)
            .prop_map(|(from, to, amount)| LedgerOp::Transfer { from, to, amount }),
        (1u8..6, 0u64..1_500).prop_map(|(from, amount)| LedgerOp::Burn { from, amount }),
    ]
}

fn to_event(block: u64, op: &LedgerOp) -> CapturedEvent {
    match *op {
        LedgerOp::Mint { to, amount } => mint(block, holder(to), U256::from(amount)),
        LedgerOp::Transfer { from, to, amount } => {
            send(block, holder(from), holder(to), U256::from(amount))
        }
        LedgerOp::Burn { from, amount } => {
            send(block, holder(from), Address::ZERO, U256::from(amount))
        }
    }
}

proptest! {
    #[test]
    fn supply_equals_sum_of_balances(ops in prop::collection::vec(ledger_op(), 1..80)) {
        let mut ledger = TokenLedger::default();
        for (block, op) in ops.iter().enumerate() {
            let event = to_event(block as u64, op);
            let before = ledger.clone();
            let result = ledger.apply(&event);

            let sum = ledger.balances().fold(U256::ZERO, |acc, (_, balance)| acc + *balance);
            prop_assert_eq!(ledger.total_supply(), sum);

            if let CapturedEvent::TokenTransfer { from, amount, .. } = event {
                let overdraft = !from.is_zero() && before.balance_of(&from) < amount;
                prop_assert_eq!(result.is_err(), overdraft);
                if overdraft {
                    prop_assert_eq!(ledger.total_supply(), before.total_supply());
                }
            }
        }
    }

    #[test]
    fn per_block_rewards_never_exceed_budget(
        balances in prop::collection::vec(1u64..1_000_000, 1..8),
        budget in 1u64..u64::MAX,
    ) {
        let events = balances
            .iter()
            .enumerate()
            .map(|(i, balance)| mint(0, holder(i as u8 + 1), U256::from(*balance)))
            .collect();
        let schedule = RewardSchedule::new(0, 1, 4, U256::from(budget)).unwrap();
        let totals = calculate_staking_rewards(&EventStream::new(events), &schedule).unwrap();
        let verification = verify_totals(&totals, &schedule);
        prop_assert!(verification.within_bounds(), "{:?}", verification);
    }
}
