use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    metadata::{
        create_master_edition_v3, create_metadata_accounts_v3, CreateMasterEditionV3,
        CreateMetadataAccountsV3, Metadata,
    },
    token_interface::{mint_to, transfer_checked, Mint, MintTo, TokenAccount, TokenInterface, TransferChecked},
};
use crate::constants::*;
use crate::errors::EscrowError;
use crate::state::{commit_new_listing, ListingAccount, ListingParams, MarketplaceConfig};
use crate::utils::accounts::{create_pda_account, load_registered_user, store_account};
use crate::utils::metadata::listing_metadata;

#[derive(Accounts)]
pub struct MintAndList<'info> {
    #[account(mut)]
    pub maker: Signer<'info>,

    /// CHECK: the maker's user account, loaded by the handler so an
    /// unregistered maker gets `NotRegistered`
    #[account(mut)]
    pub user_account: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [MARKETPLACE_SEED, marketplace.authority.as_ref()],
        bump = marketplace.bump,
    )]
    pub marketplace: Account<'info, MarketplaceConfig>,

    #[account(
        init,
        payer = maker,
        mint::decimals = NFT_DECIMALS,
        mint::authority = maker,
        mint::freeze_authority = maker,
        mint::token_program = token_program,
    )]
    pub nft_mint: InterfaceAccount<'info, Mint>,

    #[account(address = marketplace.collection @ EscrowError::CollectionMismatch)]
    pub collection_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = maker,
        associated_token::mint = nft_mint,
        associated_token::authority = maker,
        associated_token::token_program = token_program,
    )]
    pub maker_ata: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: derived from [marketplace, nft_mint] and created by the handler
    #[account(mut)]
    pub listing: UncheckedAccount<'info>,

    // Escrow: only the listing PDA can move this unit
    #[account(
        init,
        payer = maker,
        associated_token::mint = nft_mint,
        associated_token::authority = listing,
        associated_token::token_program = token_program,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: created by the token metadata program
    #[account(
        mut,
        seeds = [b"metadata", metadata_program.key().as_ref(), nft_mint.key().as_ref()],
        seeds::program = metadata_program.key(),
        bump,
    )]
    pub metadata: UncheckedAccount<'info>,

    /// CHECK: created by the token metadata program
    #[account(
        mut,
        seeds = [
            b"metadata",
            metadata_program.key().as_ref(),
            nft_mint.key().as_ref(),
            b"edition",
        ],
        seeds::program = metadata_program.key(),
        bump,
    )]
    pub master_edition: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub metadata_program: Program<'info, Metadata>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

impl<'info> MintAndList<'info> {
    fn mint_unit(&self) -> Result<()> {
        mint_to(
            CpiContext::new(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.nft_mint.to_account_info(),
                    to: self.maker_ata.to_account_info(),
                    authority: self.maker.to_account_info(),
                },
            ),
            NFT_SUPPLY,
        )
    }

    fn create_metadata(&self, params: &ListingParams) -> Result<()> {
        let data = listing_metadata(params, self.maker.key(), self.collection_mint.key());

        create_metadata_accounts_v3(
            CpiContext::new(
                self.metadata_program.to_account_info(),
                CreateMetadataAccountsV3 {
                    metadata: self.metadata.to_account_info(),
                    mint: self.nft_mint.to_account_info(),
                    mint_authority: self.maker.to_account_info(),
                    payer: self.maker.to_account_info(),
                    update_authority: self.maker.to_account_info(),
                    system_program: self.system_program.to_account_info(),
                    rent: self.rent.to_account_info(),
                },
            ),
            data,
            false, // immutable once minted
            true,
            None,
        )
    }

    // Moves mint authority to the edition, so supply stays at exactly one
    fn create_master_edition(&self) -> Result<()> {
        create_master_edition_v3(
            CpiContext::new(
                self.metadata_program.to_account_info(),
                CreateMasterEditionV3 {
                    edition: self.master_edition.to_account_info(),
                    mint: self.nft_mint.to_account_info(),
                    update_authority: self.maker.to_account_info(),
                    mint_authority: self.maker.to_account_info(),
                    payer: self.maker.to_account_info(),
                    metadata: self.metadata.to_account_info(),
                    token_program: self.token_program.to_account_info(),
                    system_program: self.system_program.to_account_info(),
                    rent: self.rent.to_account_info(),
                },
            ),
            Some(MASTER_EDITION_MAX_SUPPLY),
        )
    }

    fn create_listing_account(&self) -> Result<u8> {
        let marketplace_key = self.marketplace.key();
        let mint_key = self.nft_mint.key();

        create_pda_account(
            &self.maker.to_account_info(),
            &self.listing.to_account_info(),
            &self.system_program.to_account_info(),
            &[marketplace_key.as_ref(), mint_key.as_ref()],
            ListingAccount::SPACE,
            EscrowError::DuplicateListing,
        )
    }

    fn deposit_into_vault(&self) -> Result<()> {
        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.maker_ata.to_account_info(),
                    mint: self.nft_mint.to_account_info(),
                    to: self.vault.to_account_info(),
                    authority: self.maker.to_account_info(),
                },
            ),
            NFT_SUPPLY,
            self.nft_mint.decimals,
        )
    }
}

pub fn mint_and_list(
    ctx: Context<MintAndList>,
    name: String,
    symbol: String,
    price: u64,
    card_metadata: String,
    image_url: String,
) -> Result<()> {
    let params = ListingParams {
        name,
        symbol,
        price,
        card_metadata,
        image_url,
    };
    params.validate()?;

    let maker_key = ctx.accounts.maker.key();
    let mut owner = load_registered_user(&ctx.accounts.user_account, &maker_key)?;

    let accounts = ctx.accounts;
    accounts.mint_unit()?;
    accounts.create_metadata(&params)?;
    accounts.create_master_edition()?;
    let bump = accounts.create_listing_account()?;
    accounts.deposit_into_vault()?;

    let listing = ListingAccount::new(
        accounts.marketplace.key(),
        maker_key,
        accounts.nft_mint.key(),
        params,
        Clock::get()?.unix_timestamp,
        bump,
    )?;
    store_account(&accounts.listing, &listing)?;

    commit_new_listing(&mut *accounts.marketplace, &mut owner)?;
    store_account(&accounts.user_account, &owner)?;

    emit!(ListingCreated {
        owner: maker_key,
        listing: accounts.listing.key(),
        asset_id: listing.asset_id,
        price: listing.price,
        timestamp: listing.created_at,
    });

    msg!("Listing created for asset {} at price {}", listing.asset_id, listing.price);

    Ok(())
}

#[event]
pub struct ListingCreated {
    pub owner: Pubkey,
    pub listing: Pubkey,
    pub asset_id: Pubkey,
    pub price: u64,
    pub timestamp: i64,
}
