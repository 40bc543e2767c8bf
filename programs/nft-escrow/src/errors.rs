use anchor_lang::prelude::*;

#[error_code]
pub enum EscrowError {
    #[msg("Fee must be between 0 and 10000 basis points")]
    InvalidFee,

    #[msg("Price must be greater than zero")]
    InvalidPrice,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Metadata field exceeds its maximum length")]
    MetadataTooLong,

    #[msg("Metadata field must not be empty")]
    EmptyField,

    #[msg("Seeds cannot be used to derive an address")]
    InvalidSeeds,

    #[msg("Account does not match its derived address")]
    AddressMismatch,

    #[msg("Marketplace already exists for this authority")]
    AlreadyExists,

    #[msg("User is already registered")]
    AlreadyRegistered,

    #[msg("Asset is already listed on this marketplace")]
    DuplicateListing,

    #[msg("User is not registered")]
    NotRegistered,

    #[msg("Listing is not active")]
    ListingNotActive,

    #[msg("Only the listing owner can do this")]
    NotOwner,

    #[msg("Cannot buy your own listing")]
    SelfPurchaseNotAllowed,

    #[msg("Seller account does not match the listing owner")]
    SellerMismatch,

    #[msg("Vault does not belong to this listing")]
    VaultMismatch,

    #[msg("Collection mint does not match the marketplace collection")]
    CollectionMismatch,

    #[msg("Unauthorized access")]
    Unauthorized,

    #[msg("Insufficient funds")]
    InsufficientFunds,

    #[msg("Treasury balance too low for this withdrawal")]
    InsufficientTreasuryBalance,

    #[msg("Math overflow")]
    MathOverflow,
}
