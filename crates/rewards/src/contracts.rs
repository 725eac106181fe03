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


//! Event ABIs of the contracts the scanner reads.

alloy::sol! {
    /// DIA price oracle. `value` has 8 decimals.
    interface IDiaOracle {
        event OracleUpdate(string key, uint128 value, uint128 timestamp);
    }

    interface IActivePool {
        event ActivePoolCOLBalanceUpdated(uint256 _COL);
    }

    /// Emitted by both BorrowerOperations and VaultManager.
    interface IVaultUpdates {
        event VaultUpdated(
            address indexed _borrower,
            uint256 _debt,
            uint256 _coll,
            uint256 _stake,
            uint8 _operation
        );
    }

    interface IGovToken {
        event Transfer(address indexed from, address indexed to, uint256 value);
    }
}
