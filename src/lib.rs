//! LoopVault - Leveraged loop staking for Casper Network
//!
//! This crate provides a single-asset staking-and-lending vault where users
//! can:
//! - Deposit the vault token and earn emissions pro-rata
//! - Borrow the vault token against their own stake
//! - Loop to near-maximum leverage in one call
//! - Liquidate positions whose health falls below the threshold

#![no_std]

extern crate alloc;

pub mod errors;
pub mod events;
pub mod math;
pub mod reward_token;
pub mod vault_core;
pub mod vault_token;

// Re-export main types for external use
pub use errors::*;
pub use events::*;
pub use reward_token::RewardToken;
pub use vault_core::{PoolInfo, Position, VaultCore};
pub use vault_token::VaultToken;

// Re-export generated types only when not building for wasm32 target
#[cfg(not(target_arch = "wasm32"))]
pub use reward_token::{RewardTokenHostRef, RewardTokenInitArgs};
#[cfg(not(target_arch = "wasm32"))]
pub use vault_core::{VaultCoreHostRef, VaultCoreInitArgs};
#[cfg(not(target_arch = "wasm32"))]
pub use vault_token::{VaultTokenHostRef, VaultTokenInitArgs};
