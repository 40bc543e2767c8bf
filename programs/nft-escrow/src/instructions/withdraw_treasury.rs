use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::EscrowError;
use crate::state::{MarketplaceConfig, Treasury};
use crate::utils::{safe_add, safe_sub};

#[derive(Accounts)]
pub struct WithdrawTreasury<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [MARKETPLACE_SEED, marketplace.authority.as_ref()],
        bump = marketplace.bump,
        has_one = authority @ EscrowError::Unauthorized,
        has_one = treasury,
    )]
    pub marketplace: Account<'info, MarketplaceConfig>,

    #[account(
        mut,
        seeds = [TREASURY_SEED, marketplace.key().as_ref()],
        bump = treasury.bump,
        has_one = marketplace,
    )]
    pub treasury: Account<'info, Treasury>,
}

pub fn withdraw_treasury(ctx: Context<WithdrawTreasury>, amount: u64) -> Result<()> {
    let treasury_info = ctx.accounts.treasury.to_account_info();
    let authority_info = ctx.accounts.authority.to_account_info();

    let rent_exempt_minimum = Rent::get()?.minimum_balance(treasury_info.data_len());
    let treasury_lamports = treasury_info.lamports();
    ctx.accounts
        .treasury
        .record_withdrawal(amount, treasury_lamports, rent_exempt_minimum)?;

    // Program-owned, so lamports move directly instead of through the system program
    let treasury_balance = safe_sub(treasury_lamports, amount)?;
    let authority_balance = safe_add(authority_info.lamports(), amount)?;
    **treasury_info.try_borrow_mut_lamports()? = treasury_balance;
    **authority_info.try_borrow_mut_lamports()? = authority_balance;

    emit!(TreasuryWithdrawn {
        authority: authority_info.key(),
        treasury: treasury_info.key(),
        amount,
        remaining: treasury_balance,
        outstanding_fees: ctx.accounts.treasury.outstanding(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Withdrew {} lamports from treasury", amount);

    Ok(())
}

#[event]
pub struct TreasuryWithdrawn {
    pub authority: Pubkey,
    pub treasury: Pubkey,
    pub amount: u64,
    pub remaining: u64,
    pub outstanding_fees: u64,
    pub timestamp: i64,
}
