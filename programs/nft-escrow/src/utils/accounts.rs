use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};
use crate::errors::EscrowError;
use crate::state::UserAccount;
use crate::utils::pda;

/// An address is free when nothing has been allocated or assigned there yet.
/// Lamports alone do not count: anyone can fund a derived address.
pub fn is_uninitialized(owner: &Pubkey, data_len: usize) -> bool {
    owner == &system_program::ID && data_len == 0
}

/// Creates a program-owned account of `space` bytes at the address derived from
/// `seeds`, paid for by `payer`. Returns the bump.
///
/// Fails with `exists` when the address already holds an account and with
/// `AddressMismatch` when `target` is not the derived address.
pub fn create_pda_account<'info>(
    payer: &AccountInfo<'info>,
    target: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    seeds: &[&[u8]],
    space: usize,
    exists: EscrowError,
) -> Result<u8> {
    let (address, bump) = pda::derive(seeds)?;
    require_keys_eq!(target.key(), address, EscrowError::AddressMismatch);

    if !is_uninitialized(target.owner, target.data_len()) {
        return Err(exists.into());
    }

    let bump_seed = [bump];
    let mut signer_seeds = seeds.to_vec();
    signer_seeds.push(&bump_seed);
    let signer = &[&signer_seeds[..]];

    let rent = Rent::get()?.minimum_balance(space);
    let current_lamports = target.lamports();

    if current_lamports == 0 {
        system_program::create_account(
            CpiContext::new_with_signer(
                system_program.clone(),
                CreateAccount {
                    from: payer.clone(),
                    to: target.clone(),
                },
                signer,
            ),
            rent,
            space as u64,
            &crate::ID,
        )?;
    } else {
        // Pre-funded address: top up, then allocate and assign ourselves
        let top_up = rent.saturating_sub(current_lamports);
        if top_up > 0 {
            system_program::transfer(
                CpiContext::new(
                    system_program.clone(),
                    Transfer {
                        from: payer.clone(),
                        to: target.clone(),
                    },
                ),
                top_up,
            )?;
        }
        system_program::allocate(
            CpiContext::new_with_signer(
                system_program.clone(),
                Allocate {
                    account_to_allocate: target.clone(),
                },
                signer,
            ),
            space as u64,
        )?;
        system_program::assign(
            CpiContext::new_with_signer(
                system_program.clone(),
                Assign {
                    account_to_assign: target.clone(),
                },
                signer,
            ),
            &crate::ID,
        )?;
    }

    Ok(bump)
}

/// Reads a program account, failing with `missing` if it was never created.
pub fn load_account<T: AccountDeserialize + Owner>(
    info: &AccountInfo,
    missing: EscrowError,
) -> Result<T> {
    if info.owner != &T::owner() || info.data_is_empty() {
        return Err(missing.into());
    }
    let data = info.try_borrow_data()?;
    let account = T::try_deserialize(&mut &data[..])?;
    Ok(account)
}

/// Loads `user`'s statistics account, which must sit at its derived address.
pub fn load_registered_user(info: &AccountInfo, user: &Pubkey) -> Result<UserAccount> {
    let (address, _) = pda::user_account_address(user)?;
    require_keys_eq!(info.key(), address, EscrowError::AddressMismatch);
    load_account(info, EscrowError::NotRegistered)
}

/// Writes `value` (discriminator included) back into the account data.
pub fn store_account<T: AccountSerialize>(info: &AccountInfo, value: &T) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    value.try_serialize(&mut writer)?;
    Ok(())
}
