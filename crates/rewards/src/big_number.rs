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

//! The `{ "type": "BigNumber", "hex": "0x.." }` encoding used for 256-bit values in every
//! JSON file this crate reads or writes.

use alloy::primitives::U256;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

const BIG_NUMBER_TAG: &str = "BigNumber";

/// A `U256` that serializes with the tagged hex encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct BigNumber(pub U256);

impl From<U256> for BigNumber {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<BigNumber> for U256 {
    fn from(value: BigNumber) -> Self {
        value.0
    }
}

#[derive(Serialize, Deserialize)]
struct Tagged {
    #[serde(rename = "type")]
    kind: String,
    hex: String,
}

/// Even-length `0x` prefixed hex, `0x00` for zero.
pub fn to_hex(value: U256) -> String {
    let digits = format!("{value:x}");
    if digits.len() % 2 == 1 {
        format!("0x0{digits}")
    } else {
        format!("0x{digits}")
    }
}

pub fn from_hex(hex: &str) -> Result<U256, String> {
    let digits = hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X")).unwrap_or(hex);
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16).map_err(|e| format!("invalid BigNumber hex {hex:?}: {e}"))
}

impl Serialize for BigNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Tagged { kind: BIG_NUMBER_TAG.to_string(), hex: to_hex(self.0) }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BigNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tagged = Tagged::deserialize(deserializer)?;
        if tagged.kind != BIG_NUMBER_TAG {
            return Err(D::Error::custom(format!(
                "expected type {BIG_NUMBER_TAG:?}, got {:?}",
                tagged.kind
            )));
        }
        from_hex(&tagged.hex).map(BigNumber).map_err(D::Error::custom)
    }
}

/// `#[serde(with = "big_number")]` adapter for `U256` fields.
pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    BigNumber(*value).serialize(serializer)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    BigNumber::deserialize(deserializer).map(|n| n.0)
}
