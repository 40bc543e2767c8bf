pub mod accounts;
pub mod metadata;
pub mod pda;
pub mod validation;
pub mod vault;

use anchor_lang::prelude::*;
use crate::constants::BASIS_POINTS_DENOMINATOR;
use crate::errors::EscrowError;

pub fn safe_add(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b).ok_or(EscrowError::MathOverflow.into())
}

pub fn safe_sub(a: u64, b: u64) -> Result<u64> {
    a.checked_sub(b).ok_or(EscrowError::MathOverflow.into())
}

/// Fee in basis points, rounded down. Widened to u128 so any u64 amount is accepted.
pub fn calculate_fee(amount: u64, fee_bps: u16) -> Result<u64> {
    let fee = (amount as u128)
        .checked_mul(fee_bps as u128)
        .ok_or(EscrowError::MathOverflow)?
        / BASIS_POINTS_DENOMINATOR as u128;
    u64::try_from(fee).map_err(|_| EscrowError::MathOverflow.into())
}
