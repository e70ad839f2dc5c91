//! Error definitions for the LoopVault protocol

use odra::prelude::*;

/// Vault and token errors
#[odra::odra_error]
pub enum Error {
    /// Reentrancy lock is already held
    ReentrantCall = 1,
    /// Contract is currently paused
    ContractPaused = 2,
    /// Caller is not the owner
    NotOwner = 3,
    /// Amount must be greater than zero
    ZeroAmount = 4,
    /// Withdraw amount exceeds staked balance
    InsufficientStake = 5,
    /// Borrow would exceed the collateral factor
    ExceedsCollateralFactor = 6,
    /// Remaining stake would no longer cover outstanding debt
    UndercollateralizedWithdraw = 7,
    /// Position already carries debt, repay before looping
    ExistingDebt = 8,
    /// No staked balance to loop on
    NoBaseStake = 9,
    /// No pending reward to harvest
    NothingToHarvest = 10,
    /// Liquidation target has no debt
    NoDebt = 11,
    /// Position is healthy, cannot liquidate
    PositionHealthy = 12,
    /// Caller is not the vault token controller
    NotController = 13,
    /// Controller address not set
    ControllerNotSet = 14,
    /// Caller is not the authorized minter
    NotMinter = 15,
    /// Minter address not set
    MinterNotSet = 16,
    /// Token address not set
    TokenNotSet = 17,
    /// Owner address not set
    OwnerNotSet = 18,
}

/// Checked-arithmetic errors
#[odra::odra_error]
pub enum MathError {
    /// Addition or multiplication overflowed the 512-bit range
    Overflow = 100,
    /// Subtraction underflowed below zero
    Underflow = 101,
    /// Division by zero
    DivideByZero = 102,
}
