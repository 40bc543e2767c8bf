// Seeds
pub const MARKETPLACE_SEED: &[u8] = b"marketplace";
pub const TREASURY_SEED: &[u8] = b"treasury";
pub const USER_ACCOUNT_SEED: &[u8] = b"user_account";

// Fees
pub const BASIS_POINTS_DENOMINATOR: u64 = 10_000;
pub const MAX_FEE_BPS: u16 = 10_000;                // 100%

// Metadata caps (Metaplex limits for name/symbol/uri)
pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;
pub const MAX_CARD_METADATA_LENGTH: usize = 200;

// Every listed asset is a single indivisible unit
pub const NFT_DECIMALS: u8 = 0;
pub const NFT_SUPPLY: u64 = 1;
pub const MASTER_EDITION_MAX_SUPPLY: u64 = 0;
