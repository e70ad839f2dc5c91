//! Test utilities and helpers for LoopVault protocol tests

use odra::casper_types::{U256, U512};
use odra::host::{Deployer, HostEnv, HostRef};
use odra::prelude::*;

use loopvault::reward_token::{RewardToken, RewardTokenHostRef, RewardTokenInitArgs};
use loopvault::vault_core::{VaultCore, VaultCoreHostRef, VaultCoreInitArgs};
use loopvault::vault_token::{VaultToken, VaultTokenHostRef, VaultTokenInitArgs};

/// Constants mirrored from the contracts
pub const PRECISION: u64 = 1_000_000_000_000;
pub const COLLATERAL_FACTOR: u64 = 150;
pub const LIQUIDATION_THRESHOLD: u64 = 110;
pub const INTEREST_RATE_BPS: u64 = 5;
pub const BPS_BASE: u64 = 10_000;

/// Emission rate (reward tokens per unit of block time) used by the test pool
pub const REWARD_RATE: u64 = 4;

/// Collateral seeded to each of the accounts 1..=3 at setup
pub const STARTING_BALANCE: u64 = 1_000_000_000_000;

/// Deploy and wire the vault core, its collateral token and its reward token.
///
/// The vault token starts under admin control so test accounts can be funded;
/// mint/burn control is handed to the deployed core before returning.
pub fn setup() -> (
    HostEnv,
    VaultCoreHostRef,
    VaultTokenHostRef,
    RewardTokenHostRef,
    Address,
) {
    setup_with_rate(U512::from(REWARD_RATE))
}

pub fn setup_with_rate(
    reward_rate: U512,
) -> (
    HostEnv,
    VaultCoreHostRef,
    VaultTokenHostRef,
    RewardTokenHostRef,
    Address,
) {
    let env = odra_test::env();
    let admin = env.get_account(0);

    env.set_caller(admin);
    let mut vault_token = VaultToken::deploy(&env, VaultTokenInitArgs { controller: admin });
    let mut reward_token = RewardToken::deploy(&env, RewardTokenInitArgs { minter: admin });

    let core = VaultCore::deploy(
        &env,
        VaultCoreInitArgs {
            vault_token: vault_token.address(),
            reward_token: reward_token.address(),
            reward_rate,
        },
    );

    // Fund user accounts while the admin still controls minting
    for i in 1..4 {
        let user = env.get_account(i);
        env.set_caller(admin);
        vault_token.mint(user, U512::from(STARTING_BALANCE));
        env.set_caller(user);
        vault_token.approve(core.address(), U256::MAX);
    }

    // Hand token control to the core
    env.set_caller(admin);
    vault_token.set_controller(core.address());
    reward_token.set_minter(core.address());

    (env, core, vault_token, reward_token, admin)
}

/// Helper to read a balance as u64 for easier assertions
pub fn balance_u64(token: &VaultTokenHostRef, owner: Address) -> u64 {
    token.balance_of(owner).as_u64()
}
