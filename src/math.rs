//! Checked 512-bit arithmetic.
//!
//! Every arithmetic step in the ledger goes through these four operations;
//! any overflow, underflow or zero divisor reverts the whole action.

use odra::casper_types::U512;
use odra::ContractEnv;

use crate::errors::MathError;

pub fn add(env: &ContractEnv, a: U512, b: U512) -> U512 {
    match a.checked_add(b) {
        Some(v) => v,
        None => env.revert(MathError::Overflow),
    }
}

pub fn sub(env: &ContractEnv, a: U512, b: U512) -> U512 {
    match a.checked_sub(b) {
        Some(v) => v,
        None => env.revert(MathError::Underflow),
    }
}

pub fn mul(env: &ContractEnv, a: U512, b: U512) -> U512 {
    match a.checked_mul(b) {
        Some(v) => v,
        None => env.revert(MathError::Overflow),
    }
}

pub fn div(env: &ContractEnv, a: U512, b: U512) -> U512 {
    match a.checked_div(b) {
        Some(v) => v,
        None => env.revert(MathError::DivideByZero),
    }
}
