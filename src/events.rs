//! Events for the LoopVault protocol (CEP-88 compliant)

use odra::prelude::*;
use odra::casper_types::U512;

/// Emitted when a user deposits collateral into the vault
#[odra::event]
pub struct Deposited {
    pub user: Address,
    pub amount: U512,
    pub staked: U512,
}

/// Emitted when a user withdraws collateral from the vault
#[odra::event]
pub struct Withdrawn {
    pub user: Address,
    pub amount: U512,
    pub staked: U512,
}

/// Emitted when a user harvests pending rewards
#[odra::event]
pub struct Harvested {
    pub user: Address,
    pub amount: U512,
}

/// Emitted when a user borrows against their stake
#[odra::event]
pub struct Borrowed {
    pub user: Address,
    pub amount: U512,
    pub borrowed: U512,
}

/// Emitted when a user repays outstanding debt
#[odra::event]
pub struct Repaid {
    pub user: Address,
    pub amount: U512,
    pub borrowed: U512,
}

/// Emitted when a user loops their stake to maximum leverage
#[odra::event]
pub struct Looped {
    pub user: Address,
    pub base_staked: U512,
    pub staked: U512,
    pub borrowed: U512,
}

/// Emitted when a position is liquidated
#[odra::event]
pub struct Liquidated {
    pub liquidator: Address,
    pub user: Address,
    pub seized: U512,
    pub debt_wiped: U512,
}

/// Emitted when the vault is paused
#[odra::event]
pub struct Paused {
    pub by: Address,
}

/// Emitted when the vault is unpaused
#[odra::event]
pub struct Unpaused {
    pub by: Address,
}
