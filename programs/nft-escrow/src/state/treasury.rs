use anchor_lang::prelude::*;
use crate::errors::EscrowError;
use crate::utils::safe_add;

/// Program-owned fee vault. Its lamports above the rent-exempt minimum are the
/// marketplace's withdrawable revenue.
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Treasury {
    pub marketplace: Pubkey,       // 32 bytes
    pub total_collected: u64,      // 8 bytes
    pub total_withdrawn: u64,      // 8 bytes
    pub bump: u8,                  // 1 byte
}

impl Treasury {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    pub fn new(marketplace: Pubkey, bump: u8) -> Self {
        Self {
            marketplace,
            total_collected: 0,
            total_withdrawn: 0,
            bump,
        }
    }

    pub fn record_fee(&mut self, fee: u64) -> Result<()> {
        self.total_collected = safe_add(self.total_collected, fee)?;
        Ok(())
    }

    pub fn withdrawable(lamports: u64, rent_exempt_minimum: u64) -> u64 {
        lamports.saturating_sub(rent_exempt_minimum)
    }

    /// Checks `amount` against what the account can give up and records it.
    pub fn record_withdrawal(
        &mut self,
        amount: u64,
        lamports: u64,
        rent_exempt_minimum: u64,
    ) -> Result<()> {
        require!(amount > 0, EscrowError::InvalidAmount);
        require!(
            amount <= Self::withdrawable(lamports, rent_exempt_minimum),
            EscrowError::InsufficientTreasuryBalance
        );
        self.total_withdrawn = safe_add(self.total_withdrawn, amount)?;
        Ok(())
    }

    /// Fees collected but not yet withdrawn. Lamports sent to the treasury
    /// directly are withdrawable too, so this bottoms out at zero.
    pub fn outstanding(&self) -> u64 {
        self.total_collected.saturating_sub(self.total_withdrawn)
    }
}
