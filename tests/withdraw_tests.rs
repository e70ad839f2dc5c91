//! Withdraw tests for the LoopVault protocol

mod test_utils;

use odra::casper_types::U512;
use odra::host::HostRef;
use odra::prelude::*;

use loopvault::errors::Error;
use loopvault::events::Withdrawn;

use test_utils::*;

#[test]
fn test_withdraw_partial() {
    let (env, mut core, _vault_token, _reward_token, _admin) = setup();
    let user = env.get_account(1);

    env.set_caller(user);
    core.deposit(U512::from(1_000_000u64));
    let remaining = core.withdraw(U512::from(300_000u64));

    assert_eq!(remaining, U512::from(700_000u64));
    assert_eq!(core.get_user_info(user).staked, U512::from(700_000u64));
    assert_eq!(core.get_total_staked(), U512::from(700_000u64));
}

#[test]
fn test_withdraw_insufficient_stake_reverts() {
    let (env, mut core, _vault_token, _reward_token, _admin) = setup();
    let user = env.get_account(1);

    env.set_caller(user);
    core.deposit(U512::from(1_000u64));
    let result = core.try_withdraw(U512::from(1_001u64));

    assert!(result.is_err(), "Overdrawn withdraw should fail");
    assert_eq!(result.unwrap_err(), Error::InsufficientStake.into());
}

#[test]
fn test_withdraw_when_paused_reverts() {
    let (env, mut core, _vault_token, _reward_token, admin) = setup();
    let user = env.get_account(1);

    env.set_caller(user);
    core.deposit(U512::from(1_000u64));

    env.set_caller(admin);
    core.set_paused(true);

    env.set_caller(user);
    let result = core.try_withdraw(U512::from(1_000u64));

    assert!(result.is_err(), "Withdraw while paused should fail");
    assert_eq!(result.unwrap_err(), Error::ContractPaused.into());
}

#[test]
fn test_roundtrip_zero_elapsed_restores_everything() {
    let (env, mut core, vault_token, reward_token, _admin) = setup();
    let user = env.get_account(1);

    env.set_caller(user);
    core.deposit(U512::from(1_000_000u64));
    let remaining = core.withdraw(U512::from(1_000_000u64));

    // No time elapsed: totals restored, no reward minted
    assert_eq!(remaining, U512::zero());
    assert_eq!(core.get_user_info(user).staked, U512::zero());
    assert_eq!(core.get_total_staked(), U512::zero());
    assert_eq!(reward_token.balance_of(user), 0u64.into());
    assert_eq!(balance_u64(&vault_token, user), STARTING_BALANCE);
    assert_eq!(balance_u64(&vault_token, core.address()), 0);
}

#[test]
fn test_withdraw_undercollateralized_reverts() {
    let (env, mut core, _vault_token, _reward_token, _admin) = setup();
    let user = env.get_account(1);

    env.set_caller(user);
    core.deposit(U512::from(1_500u64));
    core.borrow(U512::from(1_000u64));

    // Remaining 1_499 caps borrowing at 999 < 1_000
    let result = core.try_withdraw(U512::from(1u64));

    assert!(result.is_err(), "Withdraw below the collateral floor should fail");
    assert_eq!(
        result.unwrap_err(),
        Error::UndercollateralizedWithdraw.into()
    );
}

#[test]
fn test_withdraw_with_debt_allowed_at_boundary() {
    let (env, mut core, _vault_token, _reward_token, _admin) = setup();
    let user = env.get_account(1);

    env.set_caller(user);
    core.deposit(U512::from(3_000u64));
    core.borrow(U512::from(1_000u64));

    // Remaining 1_500 still covers 1_000 at the collateral factor
    let remaining = core.withdraw(U512::from(1_500u64));
    assert_eq!(remaining, U512::from(1_500u64));

    // One more unit would leave the cap at 999
    let result = core.try_withdraw(U512::from(1u64));
    assert!(result.is_err());
    assert_eq!(
        result.unwrap_err(),
        Error::UndercollateralizedWithdraw.into()
    );
}

#[test]
fn test_withdraw_settles_pending_reward() {
    let (env, mut core, _vault_token, reward_token, _admin) = setup();
    let user = env.get_account(1);

    env.set_caller(user);
    core.deposit(U512::from(1_000_000u64));

    env.advance_block_time(500);

    env.set_caller(user);
    core.withdraw(U512::from(500_000u64));

    assert_eq!(
        reward_token.balance_of(user),
        (500u64 * REWARD_RATE).into(),
        "Settlement on withdraw should mint the pending reward"
    );
    assert_eq!(core.pending_reward(user), U512::zero());
}

#[test]
fn test_withdraw_emits_event() {
    let (env, mut core, _vault_token, _reward_token, _admin) = setup();
    let user = env.get_account(1);

    env.set_caller(user);
    core.deposit(U512::from(800_000u64));
    core.withdraw(U512::from(300_000u64));

    let expected = Withdrawn {
        user,
        amount: U512::from(300_000u64),
        staked: U512::from(500_000u64),
    };
    assert!(
        env.emitted_event(&core, expected),
        "Should emit Withdrawn event"
    );
}
