//! Custodial escrow marketplace for freshly minted NFTs.
//!
//! Each instruction is one Solana transaction: it commits every account write
//! and CPI together or none of them.

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod instructions;
pub mod state;
pub mod utils;

pub use instructions::*;

declare_id!("9DHzi91ErQqtz3trZTrtHVb2XHf8yJkQfDfRUMHTGks4");

#[program]
pub mod nft_escrow {
    use super::*;

    pub fn initialize_marketplace(ctx: Context<InitializeMarketplace>, fee_bps: u16) -> Result<()> {
        instructions::initialize_marketplace::initialize_marketplace(ctx, fee_bps)
    }

    pub fn register_user(ctx: Context<RegisterUser>) -> Result<()> {
        instructions::register_user::register_user(ctx)
    }

    pub fn mint_and_list(
        ctx: Context<MintAndList>,
        name: String,
        symbol: String,
        price: u64,
        card_metadata: String,
        image_url: String,
    ) -> Result<()> {
        instructions::mint_and_list::mint_and_list(ctx, name, symbol, price, card_metadata, image_url)
    }

    pub fn purchase(ctx: Context<Purchase>) -> Result<()> {
        instructions::purchase::purchase(ctx)
    }

    pub fn cancel_listing(ctx: Context<CancelListing>) -> Result<()> {
        instructions::cancel_listing::cancel_listing(ctx)
    }

    pub fn withdraw_treasury(ctx: Context<WithdrawTreasury>, amount: u64) -> Result<()> {
        instructions::withdraw_treasury::withdraw_treasury(ctx, amount)
    }
}

#[cfg(test)]
mod tests;
