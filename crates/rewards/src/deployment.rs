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


use alloy::primitives::{address, Address};

use crate::collateral::{CollateralKind, PerCollateral};

/// Contracts of one collateral module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollateralModule {
    pub active_pool: Address,
    pub borrower_operations: Address,
    pub vault_manager: Address,
}

/// Which module contract emitted a log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModuleContract {
    ActivePool,
    BorrowerOperations,
    VaultManager,
}

/// Block in which the governance token was deployed on Astar. No transfer predates it.
pub const ASTAR_GOV_TOKEN_DEPLOYMENT_BLOCK: u64 = 912_772;

/// Addresses of a deployment of the lending protocol and its governance token.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deployment {
    /// Address of the DIA price oracle.
    pub price_oracle_address: Address,
    pub gov_token_address: Address,
    pub modules: PerCollateral<CollateralModule>,
}

impl Deployment {
    /// Collateral kind and role of a module contract, if `address` is one.
    pub fn module_contract(&self, address: Address) -> Option<(CollateralKind, ModuleContract)> {
        self.modules.iter().find_map(|(kind, module)| {
            if module.active_pool == address {
                Some((kind, ModuleContract::ActivePool))
            } else if module.borrower_operations == address {
                Some((kind, ModuleContract::BorrowerOperations))
            } else if module.vault_manager == address {
                Some((kind, ModuleContract::VaultManager))
            } else {
                None
            }
        })
    }

    /// The deployment on Astar mainnet.
    pub fn astar() -> Self {
        Self {
            price_oracle_address: address!("0xD7B7dc549A4C3E1113c9Ab92A82A31368082BCAc"),
            gov_token_address: address!("0x97f6B7A15A77479F3EC331C6A93cbf599EC851A8"),
            modules: PerCollateral::from_fn(astar_module),
        }
    }
}

impl Default for Deployment {
    fn default() -> Self {
        Self::astar()
    }
}

fn astar_module(kind: CollateralKind) -> CollateralModule {
    let (active_pool, borrower_operations, vault_manager) = match kind {
        CollateralKind::Busd => (
            address!("0x892af684Afd5fCee1023f7811C35fd695Bf0cd6f"),
            address!("0xBC92e40740a2f7728FF279e98b8C040cc3826645"),
            address!("0xf31Fb1458607A7a7CF8Eb474283E9CBE0Bbd9DEB"),
        ),
        CollateralKind::Dai => (
            address!("0xCE90059FbCEc696634981945600d642A79e262aD"),
            address!("0xD514f010FEbC8C252386c36df80e629a9cDb7F51"),
            address!("0xcABF68A491B3B7D8Cf844847C987484ebBbD9525"),
        ),
        CollateralKind::Dot => (
            address!("0x8cd0b101838b082133e25eEb76C916Ae2AC56f36"),
            address!("0xf3F2783cbe0f58DDA6Fc77c5f0bC8494BbCaEbf3"),
            address!("0x75A21e01075F110c169E3ba126D9aFa04fA86573"),
        ),
        CollateralKind::Usdc => (
            address!("0x5070d543654D866964C44E610a3b7f85fcAf2859"),
            address!("0x139fE8B6bEE75218c8c4A701537370a7Fe08CE00"),
            address!("0xebb648434dE9be4C8462e94DAEF275D8ee14C955"),
        ),
        CollateralKind::Usdt => (
            address!("0x74dFF63491B39E5fFE0Be44Ee3B23F674C27DB7c"),
            address!("0x086A4EEA3bFDA105CC8dbCcecF7693d5ABFf88B7"),
            address!("0xf5c3a571Bdc10d3d6cf19da700B7796204a13a37"),
        ),
        CollateralKind::Wastr => (
            address!("0x70724b57618548eE97623146F76206033E67086e"),
            address!("0x75Ef1B48eFCb1839457E9978623bf75657821B8d"),
            address!("0x0cF3E16948418649498b59c336ba38678842E2d4"),
        ),
        CollateralKind::Wbtc => (
            address!("0x1685E4f68FD9A50246ce92F0eb07a977591F5Ba2"),
            address!("0xC8fA59fe571E489a39D54753F6DD06cAca1335fA"),
            address!("0x7D40F75fF98b5048A5EbBb556D1353a0Eba4102b"),
        ),
        CollateralKind::Weth => (
            address!("0x5Ec419F08602caE5e4C591dE65bD640d66673035"),
            address!("0x6F0dF12909eca6bf17C0102c6B6ee30aA0fbBBBc"),
            address!("0x3fb40643a0B8338495Bd86301966a5780eAEAbb4"),
        ),
    };
    CollateralModule { active_pool, borrower_operations, vault_manager }
}
