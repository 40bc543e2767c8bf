use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::{get_associated_token_address_with_program_id, AssociatedToken},
    token_interface::{Mint, TokenAccount, TokenInterface},
};
use crate::constants::*;
use crate::errors::EscrowError;
use crate::state::{CancelPlan, ListingAccount, MarketplaceConfig, UserAccount};
use crate::utils::vault::{release_and_close, VaultRelease};

#[derive(Accounts)]
pub struct CancelListing<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [MARKETPLACE_SEED, marketplace.authority.as_ref()],
        bump = marketplace.bump,
    )]
    pub marketplace: Account<'info, MarketplaceConfig>,

    #[account(
        mut,
        seeds = [marketplace.key().as_ref(), listing.asset_id.as_ref()],
        bump = listing.bump,
        has_one = marketplace,
    )]
    pub listing: Account<'info, ListingAccount>,

    // Keyed by the recorded owner so a foreign signer reaches the NotOwner check
    #[account(
        mut,
        seeds = [USER_ACCOUNT_SEED, listing.owner.as_ref()],
        bump = owner_account.bump,
    )]
    pub owner_account: Account<'info, UserAccount>,

    #[account(address = listing.asset_id)]
    pub nft_mint: InterfaceAccount<'info, Mint>,

    /// CHECK: the listing's token account; only read after the status check
    #[account(
        mut,
        address = get_associated_token_address_with_program_id(
            &listing.key(),
            &nft_mint.key(),
            &token_program.key(),
        ) @ EscrowError::VaultMismatch,
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = nft_mint,
        associated_token::authority = owner,
        associated_token::token_program = token_program,
    )]
    pub owner_ata: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn cancel_listing(ctx: Context<CancelListing>) -> Result<()> {
    let plan = CancelPlan::prepare(&ctx.accounts.listing, ctx.accounts.owner.key())?;

    let accounts = ctx.accounts;
    release_and_close(
        VaultRelease {
            token_program: accounts.token_program.to_account_info(),
            vault: accounts.vault.to_account_info(),
            mint: accounts.nft_mint.to_account_info(),
            destination: accounts.owner_ata.to_account_info(),
            rent_recipient: accounts.owner.to_account_info(),
            listing: accounts.listing.to_account_info(),
        },
        &accounts.listing,
        accounts.nft_mint.decimals,
    )?;

    plan.apply(
        &mut *accounts.listing,
        &mut *accounts.marketplace,
        &mut *accounts.owner_account,
    )?;

    emit!(ListingCancelled {
        owner: plan.owner,
        asset_id: accounts.listing.asset_id,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Listing cancelled for asset {}", accounts.listing.asset_id);

    Ok(())
}

#[event]
pub struct ListingCancelled {
    pub owner: Pubkey,
    pub asset_id: Pubkey,
    pub timestamp: i64,
}
