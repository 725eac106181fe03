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

//! 18-decimal fixed-point helpers. Every multiply happens before the matching divide.

use alloy::primitives::U256;

/// 10^18.
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Decimals of the on-chain price oracle.
pub const ORACLE_DECIMALS: u8 = 8;

pub fn pow10(exp: u8) -> U256 {
    U256::from(10u64).pow(U256::from(exp))
}

/// Factor that lifts an oracle price to 18 decimals (10^10).
pub fn oracle_price_scale() -> U256 {
    pow10(18 - ORACLE_DECIMALS)
}

/// `per_block * (numerator * WAD / denominator) / WAD`.
///
/// Returns `None` on overflow or a zero denominator.
pub fn pro_rata_share(per_block: U256, numerator: U256, denominator: U256) -> Option<U256> {
    let fraction = numerator.checked_mul(WAD)?.checked_div(denominator)?;
    Some(per_block.checked_mul(fraction)? / WAD)
}

/// Parse a decimal token amount such as `"3333333.333333333333333333"` into 18-decimal base
/// units.
pub fn parse_units(amount: &str) -> Option<U256> {
    let amount = amount.trim().replace('_', "");
    let (whole, frac) = match amount.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (amount.as_str(), ""),
    };
    if frac.len() > 18 || (whole.is_empty() && frac.is_empty()) {
        return None;
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    let whole = if whole.is_empty() { U256::ZERO } else { U256::from_str_radix(whole, 10).ok()? };
    let frac = if frac.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(frac, 10).ok()?.checked_mul(pow10(18 - frac.len() as u8))?
    };
    whole.checked_mul(WAD)?.checked_add(frac)
}
