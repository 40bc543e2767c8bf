use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use anchor_spl::{
    associated_token::{get_associated_token_address_with_program_id, AssociatedToken},
    token_interface::{Mint, TokenAccount, TokenInterface},
};
use crate::constants::*;
use crate::errors::EscrowError;
use crate::state::{ListingAccount, MarketplaceConfig, SaleLedger, SalePlan, SaleSplit, Treasury, UserAccount};
use crate::utils::accounts::{load_registered_user, store_account};
use crate::utils::vault::{release_and_close, VaultRelease};

#[derive(Accounts)]
pub struct Purchase<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

    /// CHECK: the buyer's user account, loaded by the handler so an
    /// unregistered buyer gets `NotRegistered`
    #[account(mut)]
    pub buyer_account: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [MARKETPLACE_SEED, marketplace.authority.as_ref()],
        bump = marketplace.bump,
        has_one = treasury,
    )]
    pub marketplace: Account<'info, MarketplaceConfig>,

    #[account(
        mut,
        seeds = [TREASURY_SEED, marketplace.key().as_ref()],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,

    #[account(
        mut,
        seeds = [marketplace.key().as_ref(), listing.asset_id.as_ref()],
        bump = listing.bump,
        has_one = marketplace,
    )]
    pub listing: Account<'info, ListingAccount>,

    #[account(mut, address = listing.owner @ EscrowError::SellerMismatch)]
    pub seller: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [USER_ACCOUNT_SEED, listing.owner.as_ref()],
        bump = seller_account.bump,
    )]
    pub seller_account: Account<'info, UserAccount>,

    #[account(address = listing.asset_id)]
    pub nft_mint: InterfaceAccount<'info, Mint>,

    /// CHECK: the listing's token account; already closed once the listing
    /// leaves Active, so it is only read after the status check
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
        payer = buyer,
        associated_token::mint = nft_mint,
        associated_token::authority = buyer,
        associated_token::token_program = token_program,
    )]
    pub buyer_ata: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Purchase<'info> {
    fn pay(&self, split: &SaleSplit) -> Result<()> {
        if split.seller_proceeds > 0 {
            system_program::transfer(
                CpiContext::new(
                    self.system_program.to_account_info(),
                    Transfer {
                        from: self.buyer.to_account_info(),
                        to: self.seller.to_account_info(),
                    },
                ),
                split.seller_proceeds,
            )?;
        }

        if split.fee > 0 {
            system_program::transfer(
                CpiContext::new(
                    self.system_program.to_account_info(),
                    Transfer {
                        from: self.buyer.to_account_info(),
                        to: self.treasury.to_account_info(),
                    },
                ),
                split.fee,
            )?;
        }

        Ok(())
    }

    fn release_to_buyer(&self) -> Result<()> {
        release_and_close(
            VaultRelease {
                token_program: self.token_program.to_account_info(),
                vault: self.vault.to_account_info(),
                mint: self.nft_mint.to_account_info(),
                destination: self.buyer_ata.to_account_info(),
                rent_recipient: self.seller.to_account_info(),
                listing: self.listing.to_account_info(),
            },
            &self.listing,
            self.nft_mint.decimals,
        )
    }
}

pub fn purchase(ctx: Context<Purchase>) -> Result<()> {
    let buyer_key = ctx.accounts.buyer.key();
    let buyer_info = ctx.accounts.buyer.to_account_info();
    let rent_reserve = Rent::get()?.minimum_balance(buyer_info.data_len());

    // Every check runs before value or the asset moves
    let plan = SalePlan::prepare(
        &ctx.accounts.listing,
        &ctx.accounts.marketplace,
        buyer_key,
        buyer_info.lamports(),
        rent_reserve,
    )?;
    let mut buyer_account = load_registered_user(&ctx.accounts.buyer_account, &buyer_key)?;

    let accounts = ctx.accounts;
    accounts.pay(&plan.split)?;
    accounts.release_to_buyer()?;

    plan.apply(SaleLedger {
        listing: &mut *accounts.listing,
        marketplace: &mut *accounts.marketplace,
        treasury: &mut *accounts.treasury,
        seller: &mut *accounts.seller_account,
        buyer: &mut buyer_account,
    })?;
    store_account(&accounts.buyer_account, &buyer_account)?;

    emit!(ListingSold {
        buyer: plan.buyer,
        seller: plan.seller,
        asset_id: accounts.listing.asset_id,
        price: plan.split.price,
        marketplace_fee: plan.split.fee,
        seller_proceeds: plan.split.seller_proceeds,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!(
        "Listing sold for {} lamports ({} to treasury)",
        plan.split.price,
        plan.split.fee
    );

    Ok(())
}

#[event]
pub struct ListingSold {
    pub buyer: Pubkey,
    pub seller: Pubkey,
    pub asset_id: Pubkey,
    pub price: u64,
    pub marketplace_fee: u64,
    pub seller_proceeds: u64,
    pub timestamp: i64,
}
