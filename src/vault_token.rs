//! Vault token - CEP-18 collateral token of the vault
//!
//! Doubles as the deposit receipt: the vault pulls collateral on deposit and
//! mints the same amount back 1:1, burning it again on withdraw. Mint and
//! burn are restricted to the controller (the vault core contract).

use odra::prelude::*;
use odra::casper_types::{U256, U512};
use odra_modules::cep18_token::Cep18;

use crate::errors::Error;

/// LVT - collateral and receipt token for the LoopVault protocol
#[odra::module]
pub struct VaultToken {
    /// CEP-18 token implementation
    cep18: SubModule<Cep18>,
    /// Address authorized to mint/burn (the vault core contract)
    controller: Var<Address>,
}

#[odra::module]
impl VaultToken {
    /// Initialize the vault token
    pub fn init(&mut self, controller: Address) {
        self.cep18.init(
            "LoopVault Token".to_string(),
            "LVT".to_string(),
            9,
            U256::zero(),
        );
        self.controller.set(controller);
    }

    /// Mint vault tokens - only callable by the controller
    /// Converts U512 to U256 for CEP-18 compatibility
    pub fn mint(&mut self, to: Address, amount: U512) {
        self.require_controller();
        let amount_u256 = U256::from(amount.as_u128());
        self.cep18.raw_mint(&to, &amount_u256);
    }

    /// Burn vault tokens - only callable by the controller
    pub fn burn(&mut self, from: Address, amount: U512) {
        self.require_controller();
        let amount_u256 = U256::from(amount.as_u128());
        self.cep18.raw_burn(&from, &amount_u256);
    }

    /// Hand mint/burn control to a new controller
    pub fn set_controller(&mut self, new_controller: Address) {
        self.require_controller();
        self.controller.set(new_controller);
    }

    /// Transfer tokens - standard CEP-18 passthrough
    pub fn transfer(&mut self, to: Address, amount: U256) {
        self.cep18.transfer(&to, &amount);
    }

    /// Approve spender - standard CEP-18 passthrough
    pub fn approve(&mut self, spender: Address, amount: U256) {
        self.cep18.approve(&spender, &amount);
    }

    /// Transfer from - standard CEP-18 passthrough
    pub fn transfer_from(&mut self, owner: Address, to: Address, amount: U256) {
        self.cep18.transfer_from(&owner, &to, &amount);
    }

    /// Get token balance - standard CEP-18 view
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.cep18.balance_of(&owner)
    }

    /// Get allowance - standard CEP-18 view
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.cep18.allowance(&owner, &spender)
    }

    /// Get total supply
    pub fn total_supply(&self) -> U256 {
        self.cep18.total_supply()
    }

    /// Get token name
    pub fn name(&self) -> String {
        self.cep18.name()
    }

    /// Get token symbol
    pub fn symbol(&self) -> String {
        self.cep18.symbol()
    }

    /// Get token decimals
    pub fn decimals(&self) -> u8 {
        self.cep18.decimals()
    }

    /// Get current controller address
    pub fn get_controller(&self) -> Option<Address> {
        self.controller.get()
    }

    // Internal functions

    fn require_controller(&self) {
        let controller = self
            .controller
            .get()
            .unwrap_or_revert_with(&self.env(), Error::ControllerNotSet);
        if self.env().caller() != controller {
            self.env().revert(Error::NotController);
        }
    }
}
