//! Unit-of-work for every escrow transition that touches more than one account.
//!
//! `prepare` runs every check and computes the effect before any CPI is made.
//! `apply` stages the writes on copies and only commits them once all of them
//! succeeded, so a failing counter never leaves the other records half updated.

use anchor_lang::prelude::*;
use crate::errors::EscrowError;
use crate::utils::safe_add;
use super::{
    ListingAccount, ListingStatus, MarketplaceConfig, Release, SaleSplit, Treasury, UserAccount,
};

/// Records written by a sale.
pub struct SaleLedger<'a> {
    pub listing: &'a mut ListingAccount,
    pub marketplace: &'a mut MarketplaceConfig,
    pub treasury: &'a mut Treasury,
    pub seller: &'a mut UserAccount,
    pub buyer: &'a mut UserAccount,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SalePlan {
    pub buyer: Pubkey,
    pub seller: Pubkey,
    pub split: SaleSplit,
}

impl SalePlan {
    /// The buyer must either spend their whole balance or keep at least
    /// `rent_reserve` lamports after paying.
    pub fn prepare(
        listing: &ListingAccount,
        marketplace: &MarketplaceConfig,
        buyer: Pubkey,
        buyer_lamports: u64,
        rent_reserve: u64,
    ) -> Result<Self> {
        listing.authorize_release(&Release::Sale { buyer })?;
        let split = marketplace.split_price(listing.price)?;
        require!(
            buyer_lamports == split.price || buyer_lamports >= safe_add(split.price, rent_reserve)?,
            EscrowError::InsufficientFunds
        );

        Ok(Self {
            buyer,
            seller: listing.owner,
            split,
        })
    }

    pub fn apply(&self, ledger: SaleLedger<'_>) -> Result<()> {
        require_keys_eq!(ledger.seller.authority, self.seller, EscrowError::SellerMismatch);
        require_keys_eq!(ledger.buyer.authority, self.buyer, EscrowError::NotRegistered);

        let mut listing = ledger.listing.clone();
        let mut marketplace = ledger.marketplace.clone();
        let mut treasury = ledger.treasury.clone();
        let mut seller = ledger.seller.clone();
        let mut buyer = ledger.buyer.clone();

        listing.transition(ListingStatus::Sold)?;
        marketplace.record_sale(self.split.price)?;
        treasury.record_fee(self.split.fee)?;
        seller.record_sale()?;
        buyer.record_purchase()?;

        *ledger.listing = listing;
        *ledger.marketplace = marketplace;
        *ledger.treasury = treasury;
        *ledger.seller = seller;
        *ledger.buyer = buyer;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CancelPlan {
    pub owner: Pubkey,
}

impl CancelPlan {
    pub fn prepare(listing: &ListingAccount, caller: Pubkey) -> Result<Self> {
        listing.authorize_release(&Release::Cancel { caller })?;
        Ok(Self { owner: caller })
    }

    pub fn apply(
        &self,
        listing: &mut ListingAccount,
        marketplace: &mut MarketplaceConfig,
        owner: &mut UserAccount,
    ) -> Result<()> {
        require_keys_eq!(owner.authority, self.owner, EscrowError::NotOwner);

        let mut staged_listing = listing.clone();
        let mut staged_marketplace = marketplace.clone();
        let mut staged_owner = owner.clone();

        staged_listing.transition(ListingStatus::Cancelled)?;
        staged_marketplace.record_cancellation()?;
        staged_owner.record_cancellation()?;

        *listing = staged_listing;
        *marketplace = staged_marketplace;
        *owner = staged_owner;
        Ok(())
    }
}

/// Counter effects of a freshly created listing.
pub fn commit_new_listing(
    marketplace: &mut MarketplaceConfig,
    owner: &mut UserAccount,
) -> Result<()> {
    let mut staged_marketplace = marketplace.clone();
    let mut staged_owner = owner.clone();

    staged_marketplace.record_listing()?;
    staged_owner.record_listing()?;

    *marketplace = staged_marketplace;
    *owner = staged_owner;
    Ok(())
}
