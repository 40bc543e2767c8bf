use anchor_lang::prelude::*;
use anchor_spl::metadata::mpl_token_metadata::types::{Collection, Creator, DataV2};
use crate::state::ListingParams;

/// Token metadata for a listed card. The maker is the sole verified creator.
/// The card joins `collection` unverified; the collection authority verifies
/// membership in its own transaction.
pub fn listing_metadata(params: &ListingParams, creator: Pubkey, collection: Pubkey) -> DataV2 {
    DataV2 {
        name: params.name.clone(),
        symbol: params.symbol.clone(),
        uri: params.image_url.clone(),
        seller_fee_basis_points: 0,
        creators: Some(vec![Creator {
            address: creator,
            verified: true,
            share: 100,
        }]),
        collection: Some(Collection {
            verified: false,
            key: collection,
        }),
        uses: None,
    }
}
