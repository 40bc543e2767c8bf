use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::EscrowError;

pub fn validate_fee(fee_bps: u16) -> Result<()> {
    require!(fee_bps <= MAX_FEE_BPS, EscrowError::InvalidFee);
    Ok(())
}

pub fn validate_price(price: u64) -> Result<()> {
    require!(price > 0, EscrowError::InvalidPrice);
    Ok(())
}

fn validate_text(input: &str, max_len: usize, required: bool) -> Result<()> {
    require!(!required || !input.is_empty(), EscrowError::EmptyField);
    require!(input.len() <= max_len, EscrowError::MetadataTooLong);
    Ok(())
}

/// Length rules for everything copied into the metadata account and the listing.
pub fn validate_listing_metadata(
    name: &str,
    symbol: &str,
    card_metadata: &str,
    image_url: &str,
) -> Result<()> {
    validate_text(name, MAX_NAME_LENGTH, true)?;
    validate_text(symbol, MAX_SYMBOL_LENGTH, true)?;
    validate_text(card_metadata, MAX_CARD_METADATA_LENGTH, false)?;
    validate_text(image_url, MAX_URI_LENGTH, false)?;
    Ok(())
}
