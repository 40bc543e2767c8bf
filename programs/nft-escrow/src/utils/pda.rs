use anchor_lang::prelude::*;
use anchor_lang::solana_program::pubkey::{MAX_SEEDS, MAX_SEED_LEN};
use crate::constants::*;
use crate::errors::EscrowError;

/// Derives a program address and its bump for `seeds`.
///
/// Seed limits are checked up front so oversized input fails with
/// `InvalidSeeds` instead of exhausting the bump search. One seed slot is
/// reserved for the bump itself.
pub fn derive(seeds: &[&[u8]]) -> Result<(Pubkey, u8)> {
    require!(seeds.len() < MAX_SEEDS, EscrowError::InvalidSeeds);
    require!(
        seeds.iter().all(|seed| seed.len() <= MAX_SEED_LEN),
        EscrowError::InvalidSeeds
    );

    Pubkey::try_find_program_address(seeds, &crate::ID)
        .ok_or(error!(EscrowError::InvalidSeeds))
}

pub fn marketplace_address(authority: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(&[MARKETPLACE_SEED, authority.as_ref()])
}

pub fn treasury_address(marketplace: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(&[TREASURY_SEED, marketplace.as_ref()])
}

pub fn user_account_address(user: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(&[USER_ACCOUNT_SEED, user.as_ref()])
}

pub fn listing_address(marketplace: &Pubkey, asset_id: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(&[marketplace.as_ref(), asset_id.as_ref()])
}
