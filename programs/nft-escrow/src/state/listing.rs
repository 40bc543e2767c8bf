use anchor_lang::prelude::*;
use crate::errors::EscrowError;
use crate::utils::validation::{validate_listing_metadata, validate_price};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum ListingStatus {
    Active,
    Sold,
    Cancelled,
}

impl ListingStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ListingStatus::Active)
    }
}

/// The two ways a unit may leave the vault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    Sale { buyer: Pubkey },
    Cancel { caller: Pubkey },
}

#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct ListingAccount {
    pub marketplace: Pubkey,       // 32 bytes
    pub owner: Pubkey,             // 32 bytes - seller, fixed at creation
    pub asset_id: Pubkey,          // 32 bytes - NFT mint
    pub price: u64,                // 8 bytes - lamports
    pub status: ListingStatus,     // 1 byte
    #[max_len(32)]
    pub name: String,
    #[max_len(10)]
    pub symbol: String,
    #[max_len(200)]
    pub card_metadata: String,
    #[max_len(200)]
    pub image_url: String,
    pub created_at: i64,           // 8 bytes - Unix timestamp
    pub bump: u8,                  // 1 byte
}

/// Everything the seller supplies for a new listing.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct ListingParams {
    pub name: String,
    pub symbol: String,
    pub price: u64,
    pub card_metadata: String,
    pub image_url: String,
}

impl ListingParams {
    pub fn validate(&self) -> Result<()> {
        validate_price(self.price)?;
        validate_listing_metadata(&self.name, &self.symbol, &self.card_metadata, &self.image_url)
    }
}

impl ListingAccount {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    pub fn new(
        marketplace: Pubkey,
        owner: Pubkey,
        asset_id: Pubkey,
        params: ListingParams,
        created_at: i64,
        bump: u8,
    ) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            marketplace,
            owner,
            asset_id,
            price: params.price,
            status: ListingStatus::Active,
            name: params.name,
            symbol: params.symbol,
            card_metadata: params.card_metadata,
            image_url: params.image_url,
            created_at,
            bump,
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == ListingStatus::Active
    }

    /// Escrow capability check. The vault is owned by this listing's PDA, so
    /// the program signs for it only after this returns `Ok`.
    pub fn authorize_release(&self, release: &Release) -> Result<()> {
        require!(self.is_active(), EscrowError::ListingNotActive);
        match release {
            Release::Sale { buyer } => {
                require_keys_neq!(*buyer, self.owner, EscrowError::SelfPurchaseNotAllowed);
            }
            Release::Cancel { caller } => {
                require_keys_eq!(*caller, self.owner, EscrowError::NotOwner);
            }
        }
        Ok(())
    }

    /// Active -> Sold | Cancelled. Terminal states never move again.
    pub fn transition(&mut self, to: ListingStatus) -> Result<()> {
        require!(self.is_active() && to.is_terminal(), EscrowError::ListingNotActive);
        self.status = to;
        Ok(())
    }
}
