use anchor_lang::prelude::*;
use crate::utils::{calculate_fee, safe_add, safe_sub, validation::validate_fee};

#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct MarketplaceConfig {
    pub authority: Pubkey,         // 32 bytes
    pub treasury: Pubkey,          // 32 bytes
    pub collection: Pubkey,        // 32 bytes - collection mint every listed NFT joins
    pub fee_bps: u16,              // 2 bytes - marketplace fee (basis points)
    pub active_listings: u64,      // 8 bytes
    pub total_sales: u64,          // 8 bytes
    pub total_volume: u64,         // 8 bytes - lamports traded
    pub bump: u8,                  // 1 byte
    pub treasury_bump: u8,         // 1 byte
}

/// How a sale price is divided between the treasury and the seller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaleSplit {
    pub price: u64,
    pub fee: u64,
    pub seller_proceeds: u64,
}

impl MarketplaceConfig {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    pub fn new(
        authority: Pubkey,
        treasury: Pubkey,
        collection: Pubkey,
        fee_bps: u16,
        bump: u8,
        treasury_bump: u8,
    ) -> Result<Self> {
        validate_fee(fee_bps)?;
        Ok(Self {
            authority,
            treasury,
            collection,
            fee_bps,
            active_listings: 0,
            total_sales: 0,
            total_volume: 0,
            bump,
            treasury_bump,
        })
    }

    /// Fee is rounded down, so `fee + seller_proceeds == price` always holds.
    pub fn split_price(&self, price: u64) -> Result<SaleSplit> {
        let fee = calculate_fee(price, self.fee_bps)?;
        Ok(SaleSplit {
            price,
            fee,
            seller_proceeds: safe_sub(price, fee)?,
        })
    }

    pub fn record_listing(&mut self) -> Result<()> {
        self.active_listings = safe_add(self.active_listings, 1)?;
        Ok(())
    }

    pub fn record_cancellation(&mut self) -> Result<()> {
        self.active_listings = safe_sub(self.active_listings, 1)?;
        Ok(())
    }

    pub fn record_sale(&mut self, price: u64) -> Result<()> {
        self.active_listings = safe_sub(self.active_listings, 1)?;
        self.total_sales = safe_add(self.total_sales, 1)?;
        self.total_volume = safe_add(self.total_volume, price)?;
        Ok(())
    }
}
