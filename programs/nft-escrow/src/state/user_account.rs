use anchor_lang::prelude::*;
use crate::utils::{safe_add, safe_sub};

#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct UserAccount {
    pub authority: Pubkey,         // 32 bytes
    pub nft_listed: u64,           // 8 bytes - currently active listings
    pub nft_sold: u64,             // 8 bytes
    pub nft_bought: u64,           // 8 bytes
    pub bump: u8,                  // 1 byte
}

impl UserAccount {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    pub fn new(authority: Pubkey, bump: u8) -> Self {
        Self {
            authority,
            nft_listed: 0,
            nft_sold: 0,
            nft_bought: 0,
            bump,
        }
    }

    pub fn record_listing(&mut self) -> Result<()> {
        self.nft_listed = safe_add(self.nft_listed, 1)?;
        Ok(())
    }

    pub fn record_cancellation(&mut self) -> Result<()> {
        self.nft_listed = safe_sub(self.nft_listed, 1)?;
        Ok(())
    }

    /// A sold listing is no longer active, so it leaves `nft_listed` too.
    pub fn record_sale(&mut self) -> Result<()> {
        self.nft_listed = safe_sub(self.nft_listed, 1)?;
        self.nft_sold = safe_add(self.nft_sold, 1)?;
        Ok(())
    }

    pub fn record_purchase(&mut self) -> Result<()> {
        self.nft_bought = safe_add(self.nft_bought, 1)?;
        Ok(())
    }
}
