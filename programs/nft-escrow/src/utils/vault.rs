use anchor_lang::prelude::*;
use anchor_spl::token_interface::{close_account, transfer_checked, CloseAccount, TransferChecked};
use crate::constants::NFT_SUPPLY;
use crate::state::ListingAccount;

/// Accounts needed to move the escrowed unit out and shut the vault.
pub struct VaultRelease<'info> {
    pub token_program: AccountInfo<'info>,
    pub vault: AccountInfo<'info>,
    pub mint: AccountInfo<'info>,
    pub destination: AccountInfo<'info>,
    pub rent_recipient: AccountInfo<'info>,
    pub listing: AccountInfo<'info>,
}

/// Sends the single unit to `destination` and closes the vault, both signed by
/// the listing PDA. Callers must have passed `ListingAccount::authorize_release`.
pub fn release_and_close(
    accounts: VaultRelease<'_>,
    listing: &ListingAccount,
    decimals: u8,
) -> Result<()> {
    let seeds: &[&[u8]] = &[
        listing.marketplace.as_ref(),
        listing.asset_id.as_ref(),
        &[listing.bump],
    ];
    let signer = &[seeds];

    transfer_checked(
        CpiContext::new_with_signer(
            accounts.token_program.clone(),
            TransferChecked {
                from: accounts.vault.clone(),
                mint: accounts.mint,
                to: accounts.destination,
                authority: accounts.listing.clone(),
            },
            signer,
        ),
        NFT_SUPPLY,
        decimals,
    )?;

    close_account(CpiContext::new_with_signer(
        accounts.token_program,
        CloseAccount {
            account: accounts.vault,
            destination: accounts.rent_recipient,
            authority: accounts.listing,
        },
        signer,
    ))
}
