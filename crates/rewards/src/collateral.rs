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

//! Collateral kinds accepted by the lending protocol and the oracle pairs that price them.

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// A deposit asset tracked by the lending protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CollateralKind {
    Busd,
    Dai,
    Dot,
    Usdc,
    Usdt,
    Wastr,
    Wbtc,
    Weth,
}

impl CollateralKind {
    /// Every supported kind, in table order.
    pub const ALL: [CollateralKind; 8] = [
        CollateralKind::Busd,
        CollateralKind::Dai,
        CollateralKind::Dot,
        CollateralKind::Usdc,
        CollateralKind::Usdt,
        CollateralKind::Wastr,
        CollateralKind::Wbtc,
        CollateralKind::Weth,
    ];

    /// Token decimals of the collateral.
    pub const fn precision(self) -> u8 {
        match self {
            CollateralKind::Busd => 18,
            CollateralKind::Dai => 18,
            CollateralKind::Dot => 10,
            CollateralKind::Usdc => 6,
            CollateralKind::Usdt => 6,
            CollateralKind::Wastr => 18,
            CollateralKind::Wbtc => 8,
            CollateralKind::Weth => 18,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CollateralKind::Busd => "BUSD",
            CollateralKind::Dai => "DAI",
            CollateralKind::Dot => "DOT",
            CollateralKind::Usdc => "USDC",
            CollateralKind::Usdt => "USDT",
            CollateralKind::Wastr => "WASTR",
            CollateralKind::Wbtc => "WBTC",
            CollateralKind::Weth => "WETH",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CollateralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown collateral kind: {0}")]
pub struct UnknownCollateral(pub String);

impl FromStr for CollateralKind {
    type Err = UnknownCollateral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CollateralKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCollateral(s.to_string()))
    }
}

/// An oracle price key, e.g. `ETH/USD`.
///
/// Only the pairs that price a supported collateral exist. Anything else published by the
/// oracle fails to parse and is dropped at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricePair {
    #[serde(rename = "BUSD/USD")]
    BusdUsd,
    #[serde(rename = "DAI/USD")]
    DaiUsd,
    #[serde(rename = "DOT/USD")]
    DotUsd,
    #[serde(rename = "USDC/USD")]
    UsdcUsd,
    #[serde(rename = "USDT/USD")]
    UsdtUsd,
    #[serde(rename = "ASTR/USD")]
    AstrUsd,
    #[serde(rename = "BTC/USD")]
    BtcUsd,
    #[serde(rename = "ETH/USD")]
    EthUsd,
}

impl PricePair {
    pub const ALL: [PricePair; 8] = [
        PricePair::BusdUsd,
        PricePair::DaiUsd,
        PricePair::DotUsd,
        PricePair::UsdcUsd,
        PricePair::UsdtUsd,
        PricePair::AstrUsd,
        PricePair::BtcUsd,
        PricePair::EthUsd,
    ];

    /// The oracle key string.
    pub const fn key(self) -> &'static str {
        match self {
            PricePair::BusdUsd => "BUSD/USD",
            PricePair::DaiUsd => "DAI/USD",
            PricePair::DotUsd => "DOT/USD",
            PricePair::UsdcUsd => "USDC/USD",
            PricePair::UsdtUsd => "USDT/USD",
            PricePair::AstrUsd => "ASTR/USD",
            PricePair::BtcUsd => "BTC/USD",
            PricePair::EthUsd => "ETH/USD",
        }
    }

    /// The collateral this pair prices. The wrapped assets are quoted by their native symbol.
    pub const fn collateral(self) -> CollateralKind {
        match self {
            PricePair::BusdUsd => CollateralKind::Busd,
            PricePair::DaiUsd => CollateralKind::Dai,
            PricePair::DotUsd => CollateralKind::Dot,
            PricePair::UsdcUsd => CollateralKind::Usdc,
            PricePair::UsdtUsd => CollateralKind::Usdt,
            PricePair::AstrUsd => CollateralKind::Wastr,
            PricePair::BtcUsd => CollateralKind::Wbtc,
            PricePair::EthUsd => CollateralKind::Weth,
        }
    }
}

impl fmt::Display for PricePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PricePair {
    type Err = UnknownCollateral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PricePair::ALL
            .into_iter()
            .find(|pair| pair.key() == s)
            .ok_or_else(|| UnknownCollateral(s.to_string()))
    }
}

/// A value for each collateral kind, stored in a fixed array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PerCollateral<T>([T; 8]);

impl<T> PerCollateral<T> {
    pub fn from_fn(mut f: impl FnMut(CollateralKind) -> T) -> Self {
        Self(CollateralKind::ALL.map(&mut f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (CollateralKind, &T)> {
        CollateralKind::ALL.into_iter().zip(self.0.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    /// Convert every value in place, moving it out of `self`.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PerCollateral<U> {
        PerCollateral(self.0.map(f))
    }
}

impl<T> Index<CollateralKind> for PerCollateral<T> {
    type Output = T;

    fn index(&self, kind: CollateralKind) -> &T {
        &self.0[kind.index()]
    }
}

impl<T> IndexMut<CollateralKind> for PerCollateral<T> {
    fn index_mut(&mut self, kind: CollateralKind) -> &mut T {
        &mut self.0[kind.index()]
    }
}
