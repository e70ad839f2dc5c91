//! VaultCore - leveraged loop-staking vault
//!
//! A single-asset staking pool with built-in borrowing:
//! - Depositors earn emissions pro-rata via a reward-per-share accumulator
//! - Stakers can borrow the vault token against their own stake
//! - One-click looping re-stakes borrowed capital up to the collateral cap
//! - Positions accrue simple interest and are liquidated when health drops
//!
//! Collateral and debt are the same asset, so no price oracle is involved.

use odra::prelude::*;
use odra::casper_types::U512;
use odra::ContractRef;

use crate::errors::Error;
use crate::events::{
    Borrowed, Deposited, Harvested, Liquidated, Looped, Paused, Repaid, Unpaused, Withdrawn,
};
use crate::math;
use crate::reward_token::RewardTokenContractRef;
use crate::vault_token::VaultTokenContractRef;

/// Per-user ledger record
#[odra::odra_type]
pub struct Position {
    /// Collateral credited to this user inside the pool
    pub staked: U512,
    /// Accumulator snapshot at last reward settlement, scaled by PRECISION
    pub reward_debt: U512,
    /// Outstanding debt, same unit as collateral
    pub borrowed: U512,
    /// Block time of the last interest accrual
    pub last_accrual_time: u64,
}

/// Pool-level state snapshot
#[odra::odra_type]
pub struct PoolInfo {
    pub total_staked: U512,
    pub acc_reward_per_share: U512,
    pub last_reward_time: u64,
    pub reward_rate: U512,
}

/// VaultCore - pool ledger and action surface
#[odra::module]
pub struct VaultCore {
    // Token references
    vault_token: Var<Address>,
    reward_token: Var<Address>,

    // Pool state
    total_staked: Var<U512>,
    acc_reward_per_share: Var<U512>,
    last_reward_time: Var<u64>,
    reward_rate: Var<U512>,

    // Per-user positions
    positions: Mapping<Address, Position>,

    // Guards
    locked: Var<bool>,
    paused: Var<bool>,

    // Admin
    owner: Var<Address>,
}

// Constants
const PRECISION: u64 = 1_000_000_000_000; // accumulator scale, 1e12
const COLLATERAL_FACTOR: u64 = 150; // percent, borrow up to ~66.6% of stake
const LIQUIDATION_THRESHOLD: u64 = 110; // percent
const LIQUIDATION_BONUS: u64 = 105; // percent of stake seized, capped at stake
const INTEREST_RATE_BPS: u64 = 5; // per unit of block time
const BPS_BASE: u64 = 10_000;
const MAX_LOOPS: u32 = 3;

#[odra::module]
impl VaultCore {
    /// Initialize the vault
    ///
    /// # Arguments
    /// * `vault_token` - Address of the collateral/receipt token contract
    /// * `reward_token` - Address of the emission token contract
    /// * `reward_rate` - Reward tokens emitted per unit of block time
    pub fn init(&mut self, vault_token: Address, reward_token: Address, reward_rate: U512) {
        self.vault_token.set(vault_token);
        self.reward_token.set(reward_token);
        self.reward_rate.set(reward_rate);
        self.owner.set(self.env().caller());
        self.total_staked.set(U512::zero());
        self.acc_reward_per_share.set(U512::zero());
        self.last_reward_time.set(self.env().get_block_time());
        self.locked.set(false);
        self.paused.set(false);
    }

    // ============ USER ACTIONS ============

    /// Deposit collateral into the pool
    ///
    /// Settles pending reward, pulls `amount` vault tokens from the caller
    /// and mints the same amount back as a 1:1 receipt.
    pub fn deposit(&mut self, amount: U512) -> U512 {
        self.acquire_lock();
        self.require_not_paused();
        if amount == U512::zero() {
            self.env().revert(Error::ZeroAmount);
        }

        let caller = self.env().caller();
        self.update_pool();
        self.accrue_interest(&caller);

        let pos = self.load_position(&caller);
        let acc = self.acc_reward_per_share.get_or_default();

        // Settle before the balance change
        if pos.staked > U512::zero() {
            let pending = self.pending_amount(&pos, acc);
            if pending > U512::zero() {
                self.mint_reward(caller, pending);
            }
        }

        self.pull_collateral(caller, amount);

        let new_staked = math::add(&self.env(), pos.staked, amount);
        let new_debt = self.notional_reward(new_staked, acc);
        self.positions.set(
            &caller,
            Position {
                staked: new_staked,
                reward_debt: new_debt,
                borrowed: pos.borrowed,
                last_accrual_time: pos.last_accrual_time,
            },
        );
        let new_total = math::add(&self.env(), self.total_staked.get_or_default(), amount);
        self.total_staked.set(new_total);

        // Mint vault receipt tokens 1:1
        self.mint_receipt(caller, amount);

        self.env().emit_event(Deposited {
            user: caller,
            amount,
            staked: new_staked,
        });
        self.release_lock();
        new_staked
    }

    /// Withdraw collateral from the pool
    ///
    /// Rejected if the remaining stake would no longer cover outstanding
    /// debt at the collateral factor.
    pub fn withdraw(&mut self, amount: U512) -> U512 {
        self.acquire_lock();
        self.require_not_paused();

        let caller = self.env().caller();
        self.update_pool();
        self.accrue_interest(&caller);

        let pos = self.load_position(&caller);
        if pos.staked < amount {
            self.env().revert(Error::InsufficientStake);
        }

        let new_staked = math::sub(&self.env(), pos.staked, amount);
        if pos.borrowed > U512::zero() && pos.borrowed > self.max_borrow(new_staked) {
            self.env().revert(Error::UndercollateralizedWithdraw);
        }

        // Settle against the pre-withdraw stake
        let acc = self.acc_reward_per_share.get_or_default();
        let pending = self.pending_amount(&pos, acc);
        if pending > U512::zero() {
            self.mint_reward(caller, pending);
        }

        let new_debt = self.notional_reward(new_staked, acc);
        self.positions.set(
            &caller,
            Position {
                staked: new_staked,
                reward_debt: new_debt,
                borrowed: pos.borrowed,
                last_accrual_time: pos.last_accrual_time,
            },
        );
        let new_total = math::sub(&self.env(), self.total_staked.get_or_default(), amount);
        self.total_staked.set(new_total);

        self.burn_receipt(caller, amount);
        self.send_collateral(caller, amount);

        self.env().emit_event(Withdrawn {
            user: caller,
            amount,
            staked: new_staked,
        });
        self.release_lock();
        new_staked
    }

    /// Harvest pending rewards
    pub fn harvest(&mut self) -> U512 {
        self.acquire_lock();

        let caller = self.env().caller();
        self.update_pool();
        self.accrue_interest(&caller);

        let pos = self.load_position(&caller);
        let acc = self.acc_reward_per_share.get_or_default();
        let pending = self.pending_amount(&pos, acc);
        if pending == U512::zero() {
            self.env().revert(Error::NothingToHarvest);
        }

        let new_debt = self.notional_reward(pos.staked, acc);
        self.positions.set(
            &caller,
            Position {
                staked: pos.staked,
                reward_debt: new_debt,
                borrowed: pos.borrowed,
                last_accrual_time: pos.last_accrual_time,
            },
        );
        self.mint_reward(caller, pending);

        self.env().emit_event(Harvested {
            user: caller,
            amount: pending,
        });
        self.release_lock();
        pending
    }

    /// Borrow vault tokens against the caller's own stake
    pub fn borrow(&mut self, amount: U512) -> U512 {
        self.acquire_lock();
        self.require_not_paused();

        let caller = self.env().caller();
        self.accrue_interest(&caller);

        let pos = self.load_position(&caller);
        let new_borrowed = math::add(&self.env(), pos.borrowed, amount);
        if new_borrowed > self.max_borrow(pos.staked) {
            self.env().revert(Error::ExceedsCollateralFactor);
        }

        self.positions.set(
            &caller,
            Position {
                staked: pos.staked,
                reward_debt: pos.reward_debt,
                borrowed: new_borrowed,
                last_accrual_time: self.env().get_block_time(),
            },
        );
        self.send_collateral(caller, amount);

        self.env().emit_event(Borrowed {
            user: caller,
            amount,
            borrowed: new_borrowed,
        });
        self.release_lock();
        new_borrowed
    }

    /// Repay outstanding debt
    ///
    /// Repays `min(amount, borrowed)` after interest accrual; the rest of
    /// `amount` is never pulled.
    pub fn repay(&mut self, amount: U512) -> U512 {
        self.acquire_lock();

        let caller = self.env().caller();
        self.accrue_interest(&caller);

        let pos = self.load_position(&caller);
        let repaid = if amount < pos.borrowed { amount } else { pos.borrowed };
        self.pull_collateral(caller, repaid);

        let new_borrowed = math::sub(&self.env(), pos.borrowed, repaid);
        self.positions.set(
            &caller,
            Position {
                staked: pos.staked,
                reward_debt: pos.reward_debt,
                borrowed: new_borrowed,
                last_accrual_time: self.env().get_block_time(),
            },
        );

        self.env().emit_event(Repaid {
            user: caller,
            amount: repaid,
            borrowed: new_borrowed,
        });
        self.release_lock();
        new_borrowed
    }

    /// Loop the caller's stake to maximum leverage
    ///
    /// Runs up to MAX_LOOPS iterations; each borrows the remaining headroom
    /// under the collateral factor and re-stakes it in place. No tokens move:
    /// borrow-and-restake nets to zero against the vault's own custody, only
    /// the final accounting is persisted.
    pub fn loop_max(&mut self) -> (U512, U512) {
        self.acquire_lock();
        self.require_not_paused();

        let caller = self.env().caller();
        self.update_pool();
        self.accrue_interest(&caller);

        let pos = self.load_position(&caller);
        if pos.staked == U512::zero() {
            self.env().revert(Error::NoBaseStake);
        }
        if pos.borrowed > U512::zero() {
            self.env().revert(Error::ExistingDebt);
        }

        let base_staked = pos.staked;
        let mut staked = pos.staked;
        let mut borrowed = pos.borrowed;

        for _ in 0..MAX_LOOPS {
            let cap = self.max_borrow(staked);
            if cap <= borrowed {
                break;
            }
            let borrowable = math::sub(&self.env(), cap, borrowed);
            borrowed = math::add(&self.env(), borrowed, borrowable);
            staked = math::add(&self.env(), staked, borrowable);
        }

        let acc = self.acc_reward_per_share.get_or_default();
        let new_debt = self.notional_reward(staked, acc);
        self.positions.set(
            &caller,
            Position {
                staked,
                reward_debt: new_debt,
                borrowed,
                last_accrual_time: self.env().get_block_time(),
            },
        );

        // Only the newly looped stake is added; the base was already counted
        let added = math::sub(&self.env(), staked, base_staked);
        let new_total = math::add(&self.env(), self.total_staked.get_or_default(), added);
        self.total_staked.set(new_total);

        self.env().emit_event(Looped {
            user: caller,
            base_staked,
            staked,
            borrowed,
        });
        self.release_lock();
        (staked, borrowed)
    }

    /// Liquidate an unhealthy position
    ///
    /// Seizes the target's stake (bonus-capped at the full stake), wipes the
    /// position and pays the liquidator out of pool custody.
    pub fn liquidate(&mut self, target: Address) -> U512 {
        self.acquire_lock();

        let caller = self.env().caller();
        self.update_pool();
        self.accrue_interest(&target);

        let pos = self.load_position(&target);
        if pos.borrowed == U512::zero() {
            self.env().revert(Error::NoDebt);
        }
        if !self.is_liquidatable(pos.staked, pos.borrowed) {
            self.env().revert(Error::PositionHealthy);
        }

        let bonus = math::div(
            &self.env(),
            math::mul(&self.env(), pos.staked, U512::from(LIQUIDATION_BONUS)),
            U512::from(100u64),
        );
        let seized = if bonus < pos.staked { bonus } else { pos.staked };

        // Wipe the target position
        self.positions.set(
            &target,
            Position {
                staked: U512::zero(),
                reward_debt: U512::zero(),
                borrowed: U512::zero(),
                last_accrual_time: 0,
            },
        );
        let new_total = math::sub(&self.env(), self.total_staked.get_or_default(), pos.staked);
        self.total_staked.set(new_total);

        self.send_collateral(caller, seized);

        self.env().emit_event(Liquidated {
            liquidator: caller,
            user: target,
            seized,
            debt_wiped: pos.borrowed,
        });
        self.release_lock();
        seized
    }

    // ============ ADMIN ============

    /// Toggle the pause flag - owner only
    pub fn set_paused(&mut self, flag: bool) {
        self.acquire_lock();
        self.require_owner();
        self.paused.set(flag);
        if flag {
            self.env().emit_event(Paused {
                by: self.env().caller(),
            });
        } else {
            self.env().emit_event(Unpaused {
                by: self.env().caller(),
            });
        }
        self.release_lock();
    }

    // ============ VIEW FUNCTIONS ============

    /// Pending reward for `user`, projected to the current block time
    ///
    /// Computes the accumulator refresh without persisting it.
    pub fn pending_reward(&self, user: Address) -> U512 {
        let pos = self.load_position(&user);
        let total = self.total_staked.get_or_default();
        let mut acc = self.acc_reward_per_share.get_or_default();

        let now = self.env().get_block_time();
        let last = self.last_reward_time.get_or_default();
        if now > last && total > U512::zero() {
            let elapsed = U512::from(now - last);
            let reward = math::mul(&self.env(), elapsed, self.reward_rate.get_or_default());
            let scaled = math::mul(&self.env(), reward, U512::from(PRECISION));
            acc = math::add(&self.env(), acc, math::div(&self.env(), scaled, total));
        }

        self.pending_amount(&pos, acc)
    }

    /// The stored ledger record for `user`
    pub fn get_user_info(&self, user: Address) -> Position {
        self.load_position(&user)
    }

    /// Pool-level state
    pub fn get_pool_info(&self) -> PoolInfo {
        PoolInfo {
            total_staked: self.total_staked.get_or_default(),
            acc_reward_per_share: self.acc_reward_per_share.get_or_default(),
            last_reward_time: self.last_reward_time.get_or_default(),
            reward_rate: self.reward_rate.get_or_default(),
        }
    }

    /// Distance from liquidation, scaled by PRECISION
    ///
    /// Values below PRECISION mean the position is liquidatable; U512::MAX
    /// when there is no debt.
    pub fn get_health_factor(&self, user: Address) -> U512 {
        let pos = self.load_position(&user);
        if pos.borrowed == U512::zero() {
            return U512::MAX;
        }
        let num = math::mul(
            &self.env(),
            math::mul(&self.env(), pos.staked, U512::from(100u64)),
            U512::from(PRECISION),
        );
        let den = math::mul(&self.env(), pos.borrowed, U512::from(LIQUIDATION_THRESHOLD));
        math::div(&self.env(), num, den)
    }

    /// Remaining borrow headroom for `user` at the stored stake and debt
    pub fn get_max_borrow(&self, user: Address) -> U512 {
        let pos = self.load_position(&user);
        let cap = self.max_borrow(pos.staked);
        if cap > pos.borrowed {
            math::sub(&self.env(), cap, pos.borrowed)
        } else {
            U512::zero()
        }
    }

    pub fn get_total_staked(&self) -> U512 {
        self.total_staked.get_or_default()
    }

    pub fn get_reward_rate(&self) -> U512 {
        self.reward_rate.get_or_default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get_or_default()
    }

    pub fn get_owner(&self) -> Option<Address> {
        self.owner.get()
    }

    pub fn get_vault_token(&self) -> Option<Address> {
        self.vault_token.get()
    }

    pub fn get_reward_token(&self) -> Option<Address> {
        self.reward_token.get()
    }

    // ============ POOL ACCUMULATOR ============

    /// Refresh the reward-per-share accumulator up to the current block time
    ///
    /// Must run before any mutation that touches total_staked or settles a
    /// user's pending reward, so all users accrue at a uniform rate.
    fn update_pool(&mut self) {
        let now = self.env().get_block_time();
        let last = self.last_reward_time.get_or_default();
        if now <= last {
            return;
        }
        let total = self.total_staked.get_or_default();
        if total == U512::zero() {
            // Idle pool accrues nothing
            self.last_reward_time.set(now);
            return;
        }
        let elapsed = U512::from(now - last);
        let reward = math::mul(&self.env(), elapsed, self.reward_rate.get_or_default());
        let scaled = math::mul(&self.env(), reward, U512::from(PRECISION));
        let delta = math::div(&self.env(), scaled, total);
        let new_acc = math::add(&self.env(), self.acc_reward_per_share.get_or_default(), delta);
        self.acc_reward_per_share.set(new_acc);
        self.last_reward_time.set(now);
    }

    // ============ INTEREST & COLLATERAL ENGINE ============

    /// Accrue simple interest on `user`'s outstanding debt
    ///
    /// Linear in elapsed block time since the last accrual; compounding only
    /// happens across successive triggering actions.
    fn accrue_interest(&mut self, user: &Address) {
        let pos = self.load_position(user);
        if pos.borrowed == U512::zero() {
            return;
        }
        let now = self.env().get_block_time();
        if pos.last_accrual_time >= now {
            return;
        }
        let elapsed = U512::from(now - pos.last_accrual_time);
        let rated = math::mul(&self.env(), pos.borrowed, U512::from(INTEREST_RATE_BPS));
        let interest = math::div(
            &self.env(),
            math::mul(&self.env(), rated, elapsed),
            U512::from(BPS_BASE),
        );
        let new_borrowed = math::add(&self.env(), pos.borrowed, interest);
        self.positions.set(
            user,
            Position {
                staked: pos.staked,
                reward_debt: pos.reward_debt,
                borrowed: new_borrowed,
                last_accrual_time: now,
            },
        );
    }

    /// Total debt allowed against `staked` collateral
    fn max_borrow(&self, staked: U512) -> U512 {
        math::div(
            &self.env(),
            math::mul(&self.env(), staked, U512::from(100u64)),
            U512::from(COLLATERAL_FACTOR),
        )
    }

    /// Exact cross-multiplied health comparison, no intermediate truncation
    fn is_liquidatable(&self, staked: U512, borrowed: U512) -> bool {
        let lhs = math::mul(&self.env(), staked, U512::from(100u64));
        let rhs = math::mul(&self.env(), borrowed, U512::from(LIQUIDATION_THRESHOLD));
        borrowed > U512::zero() && lhs < rhs
    }

    // ============ ACCOUNT LEDGER HELPERS ============

    fn load_position(&self, user: &Address) -> Position {
        self.positions.get(user).unwrap_or(Position {
            staked: U512::zero(),
            reward_debt: U512::zero(),
            borrowed: U512::zero(),
            last_accrual_time: 0,
        })
    }

    /// `staked * acc / PRECISION` - the notional cumulative reward
    fn notional_reward(&self, staked: U512, acc: U512) -> U512 {
        math::div(
            &self.env(),
            math::mul(&self.env(), staked, acc),
            U512::from(PRECISION),
        )
    }

    fn pending_amount(&self, pos: &Position, acc: U512) -> U512 {
        let notional = self.notional_reward(pos.staked, acc);
        math::sub(&self.env(), notional, pos.reward_debt)
    }

    // ============ GUARDS ============

    fn acquire_lock(&mut self) {
        if self.locked.get_or_default() {
            self.env().revert(Error::ReentrantCall);
        }
        self.locked.set(true);
    }

    fn release_lock(&mut self) {
        self.locked.set(false);
    }

    fn require_not_paused(&self) {
        if self.paused.get_or_default() {
            self.env().revert(Error::ContractPaused);
        }
    }

    fn require_owner(&self) {
        let owner = self
            .owner
            .get()
            .unwrap_or_revert_with(&self.env(), Error::OwnerNotSet);
        if self.env().caller() != owner {
            self.env().revert(Error::NotOwner);
        }
    }

    // ============ TOKEN CALLS ============

    fn vault_token_address(&self) -> Address {
        self.vault_token
            .get()
            .unwrap_or_revert_with(&self.env(), Error::TokenNotSet)
    }

    fn reward_token_address(&self) -> Address {
        self.reward_token
            .get()
            .unwrap_or_revert_with(&self.env(), Error::TokenNotSet)
    }

    /// Pull collateral from `from` into pool custody
    fn pull_collateral(&self, from: Address, amount: U512) {
        let token = self.vault_token_address();
        VaultTokenContractRef::new(self.env(), token).transfer_from(
            from,
            self.env().self_address(),
            amount.as_u128().into(),
        );
    }

    /// Send collateral out of pool custody
    fn send_collateral(&self, to: Address, amount: U512) {
        let token = self.vault_token_address();
        VaultTokenContractRef::new(self.env(), token).transfer(to, amount.as_u128().into());
    }

    /// Mint vault receipt tokens via cross-contract call
    fn mint_receipt(&self, to: Address, amount: U512) {
        let token = self.vault_token_address();
        VaultTokenContractRef::new(self.env(), token).mint(to, amount);
    }

    /// Burn vault receipt tokens via cross-contract call
    fn burn_receipt(&self, from: Address, amount: U512) {
        let token = self.vault_token_address();
        VaultTokenContractRef::new(self.env(), token).burn(from, amount);
    }

    /// Mint reward tokens via cross-contract call
    ///
    /// The pool never custodies reward tokens, it only authorizes minting.
    fn mint_reward(&self, to: Address, amount: U512) {
        let token = self.reward_token_address();
        RewardTokenContractRef::new(self.env(), token).mint(to, amount);
    }
}
