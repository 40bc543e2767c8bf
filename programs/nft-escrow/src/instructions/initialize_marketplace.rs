use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;
use crate::constants::*;
use crate::errors::EscrowError;
use crate::state::{MarketplaceConfig, Treasury};
use crate::utils::accounts::{create_pda_account, store_account};
use crate::utils::validation::validate_fee;

#[derive(Accounts)]
pub struct InitializeMarketplace<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    /// CHECK: derived from ["marketplace", authority] and created by the handler
    #[account(mut)]
    pub marketplace: UncheckedAccount<'info>,

    /// CHECK: derived from ["treasury", marketplace] and created by the handler
    #[account(mut)]
    pub treasury: UncheckedAccount<'info>,

    /// Collection every card listed here is placed in
    pub collection_mint: InterfaceAccount<'info, Mint>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_marketplace(ctx: Context<InitializeMarketplace>, fee_bps: u16) -> Result<()> {
    validate_fee(fee_bps)?;

    let authority = ctx.accounts.authority.to_account_info();
    let marketplace = ctx.accounts.marketplace.to_account_info();
    let treasury = ctx.accounts.treasury.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();

    let authority_key = authority.key();
    let marketplace_key = marketplace.key();

    let bump = create_pda_account(
        &authority,
        &marketplace,
        &system_program,
        &[MARKETPLACE_SEED, authority_key.as_ref()],
        MarketplaceConfig::SPACE,
        EscrowError::AlreadyExists,
    )?;
    let treasury_bump = create_pda_account(
        &authority,
        &treasury,
        &system_program,
        &[TREASURY_SEED, marketplace_key.as_ref()],
        Treasury::SPACE,
        EscrowError::AlreadyExists,
    )?;

    let collection = ctx.accounts.collection_mint.key();
    let config = MarketplaceConfig::new(
        authority_key,
        treasury.key(),
        collection,
        fee_bps,
        bump,
        treasury_bump,
    )?;
    store_account(&marketplace, &config)?;
    store_account(&treasury, &Treasury::new(marketplace_key, treasury_bump))?;

    emit!(MarketplaceInitialized {
        authority: authority_key,
        marketplace: marketplace_key,
        treasury: treasury.key(),
        collection,
        fee_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Marketplace initialized with fee: {}bps", fee_bps);

    Ok(())
}

#[event]
pub struct MarketplaceInitialized {
    pub authority: Pubkey,
    pub marketplace: Pubkey,
    pub treasury: Pubkey,
    pub collection: Pubkey,
    pub fee_bps: u16,
    pub timestamp: i64,
}
