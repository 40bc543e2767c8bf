use anchor_lang::prelude::*;
use crate::constants::USER_ACCOUNT_SEED;
use crate::errors::EscrowError;
use crate::state::UserAccount;
use crate::utils::accounts::{create_pda_account, store_account};

#[derive(Accounts)]
pub struct RegisterUser<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    /// CHECK: derived from ["user_account", user] and created by the handler
    #[account(mut)]
    pub user_account: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn register_user(ctx: Context<RegisterUser>) -> Result<()> {
    let user = ctx.accounts.user.to_account_info();
    let user_account = ctx.accounts.user_account.to_account_info();
    let user_key = user.key();

    // A second registration must fail, never reset the counters
    let bump = create_pda_account(
        &user,
        &user_account,
        &ctx.accounts.system_program.to_account_info(),
        &[USER_ACCOUNT_SEED, user_key.as_ref()],
        UserAccount::SPACE,
        EscrowError::AlreadyRegistered,
    )?;
    store_account(&user_account, &UserAccount::new(user_key, bump))?;

    emit!(UserRegistered {
        user: user_key,
        user_account: user_account.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("User {} registered", user_key);

    Ok(())
}

#[event]
pub struct UserRegistered {
    pub user: Pubkey,
    pub user_account: Pubkey,
    pub timestamp: i64,
}
