//! W3Bucket entry points.
//!
//! Every mutating call is a single atomic transaction: any `Err` or panic
//! reverts all storage writes and token movements made by the call.

use soroban_sdk::{Address, BytesN, Env, String, Vec, contractimpl, panic_with_error, token};

use crate::errors::Error;
use crate::events;
use crate::rbac::{self, Role};
use crate::storage::{self, BucketEdition, EditionParams, EditionPrice};
use crate::{W3Bucket, W3BucketArgs, W3BucketClient, W3BucketContract};

fn require_not_paused(e: &Env) -> Result<(), Error> {
    if storage::is_paused(e) {
        return Err(Error::ContractPaused);
    }
    Ok(())
}

/// Owner lookup plus owner-or-approved authorization for `operator`.
fn require_owner_or_approved(e: &Env, token_id: u64, operator: &Address) -> Result<Address, Error> {
    let owner = storage::token_owner(e, token_id).ok_or(Error::NonExistentToken)?;
    if owner != *operator && storage::approved(e, token_id).as_ref() != Some(operator) {
        return Err(Error::NotOwnerOrApproved);
    }
    Ok(owner)
}

fn do_transfer(e: &Env, from: &Address, to: &Address, token_id: u64) {
    storage::clear_approved(e, token_id);
    storage::move_token(e, token_id, from, to);
    events::Transfer {
        from: from.clone(),
        to: to.clone(),
        token_id,
    }
    .publish(e);
}

#[contractimpl]
impl W3BucketContract for W3Bucket {
    fn __constructor(e: &Env, admin: Address, name: String, symbol: String) {
        storage::set_metadata(e, &name, &symbol);

        // Mirrors the deploy-time initializer: the deployer starts with
        // every role and hands them out from there.
        rbac::grant_unchecked(e, Role::DefaultAdmin, &admin, &admin);
        rbac::grant_unchecked(e, Role::EditionsAdmin, &admin, &admin);
        rbac::grant_unchecked(e, Role::Pauser, &admin, &admin);
        rbac::grant_unchecked(e, Role::Withdrawer, &admin, &admin);
        rbac::grant_unchecked(e, Role::Upgrader, &admin, &admin);
    }

    // editions and prices

    fn set_bucket_editions(
        e: &Env,
        caller: Address,
        editions: Vec<EditionParams>,
    ) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_role(e, Role::EditionsAdmin, &caller)?;

        let mut submitted_ids: Vec<u64> = Vec::new(e);
        for params in editions.iter() {
            submitted_ids.push_back(params.edition_id);
        }

        // Known editions absent from this batch go inactive. Minted counts
        // and price tables are retained, never deleted.
        let mut ids = storage::edition_ids(e);
        for id in ids.iter() {
            if !submitted_ids.contains(id) {
                if let Some(mut edition) = storage::load_edition(e, id) {
                    if edition.active {
                        edition.active = false;
                        storage::save_edition(e, &edition);
                    }
                }
            }
        }

        for params in editions.iter() {
            let edition = match storage::load_edition(e, params.edition_id) {
                Some(existing) => BucketEdition {
                    edition_id: params.edition_id,
                    active: true,
                    capacity_in_gigabytes: params.capacity_in_gigabytes,
                    max_mintable_supply: params.max_mintable_supply,
                    current_supply_minted: existing.current_supply_minted,
                },
                None => {
                    ids.push_back(params.edition_id);
                    BucketEdition {
                        edition_id: params.edition_id,
                        active: true,
                        capacity_in_gigabytes: params.capacity_in_gigabytes,
                        max_mintable_supply: params.max_mintable_supply,
                        current_supply_minted: 0,
                    }
                }
            };
            storage::save_edition(e, &edition);

            events::EditionUpdated {
                edition_id: params.edition_id,
                capacity_in_gigabytes: params.capacity_in_gigabytes,
                max_mintable_supply: params.max_mintable_supply,
            }
            .publish(e);
        }
        storage::save_edition_ids(e, &ids);

        Ok(())
    }

    fn get_bucket_editions(e: &Env, include_inactive: bool) -> Vec<BucketEdition> {
        let mut editions = Vec::new(e);
        for id in storage::edition_ids(e).iter() {
            if let Some(edition) = storage::load_edition(e, id) {
                if include_inactive || edition.active {
                    editions.push_back(edition);
                }
            }
        }
        editions
    }

    fn set_bucket_edition_prices(
        e: &Env,
        caller: Address,
        edition_id: u64,
        prices: Vec<EditionPrice>,
    ) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_role(e, Role::EditionsAdmin, &caller)?;

        if storage::load_edition(e, edition_id).is_none() {
            return Err(Error::UnknownEdition);
        }

        let mut table = storage::edition_prices(e, edition_id);
        for entry in prices.iter() {
            // Prices are amounts of a Stellar asset; a negative amount can
            // never be charged, so it is rejected up front. The whole batch
            // reverts, leaving the table as it was.
            if entry.price < 0 {
                return Err(Error::InvalidPrice);
            }
            table.set(entry.currency.clone(), entry.price);
            events::EditionPriceUpdated {
                edition_id,
                currency: entry.currency,
                price: entry.price,
            }
            .publish(e);
        }
        storage::save_edition_prices(e, edition_id, &table);

        Ok(())
    }

    fn get_bucket_edition_prices(e: &Env, edition_id: u64) -> Vec<EditionPrice> {
        let mut prices = Vec::new(e);
        for (currency, price) in storage::edition_prices(e, edition_id).iter() {
            prices.push_back(EditionPrice { currency, price });
        }
        prices
    }

    // mint and treasury

    fn mint(
        e: &Env,
        payer: Address,
        to: Address,
        edition_id: u64,
        currency: Address,
        token_uri: String,
        payment: i128,
    ) -> Result<u64, Error> {
        require_not_paused(e)?;
        payer.require_auth();

        let mut edition = match storage::load_edition(e, edition_id) {
            Some(edition) if edition.active => edition,
            _ => return Err(Error::InvalidEdition),
        };

        let price = storage::edition_prices(e, edition_id)
            .get(currency.clone())
            .ok_or(Error::InvalidCurrency)?;

        if edition.current_supply_minted >= edition.max_mintable_supply {
            return Err(Error::SupplyExceeded);
        }

        // Exact match required, not merely sufficient.
        if payment != price {
            return Err(Error::InsufficientPayment);
        }

        if price > 0 {
            token::Client::new(e, &currency).transfer(
                &payer,
                &e.current_contract_address(),
                &price,
            );
        }
        storage::add_to_currency_balance(e, &currency, price)?;

        edition.current_supply_minted = edition
            .current_supply_minted
            .checked_add(1)
            .ok_or(Error::MathOverflow)?;
        storage::save_edition(e, &edition);

        let token_id = storage::take_next_token_id(e)?;
        storage::insert_token(e, token_id, &to);
        storage::set_token_uri(e, token_id, &token_uri);

        events::Mint {
            to,
            edition_id,
            token_id,
        }
        .publish(e);

        Ok(token_id)
    }

    fn withdraw(e: &Env, caller: Address, to: Address, currency: Address) -> Result<i128, Error> {
        caller.require_auth();
        rbac::require_role(e, Role::Withdrawer, &caller)?;

        let amount = storage::drain_currency_balance(e, &currency);
        if amount > 0 {
            token::Client::new(e, &currency).transfer(
                &e.current_contract_address(),
                &to,
                &amount,
            );
        }

        events::Withdraw {
            to,
            currency,
            amount,
        }
        .publish(e);

        Ok(amount)
    }

    fn currency_balance(e: &Env, currency: Address) -> i128 {
        storage::currency_balance(e, &currency)
    }

    // pausability

    fn pause(e: &Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_role(e, Role::Pauser, &caller)?;
        if storage::is_paused(e) {
            return Err(Error::InvalidPauseState);
        }
        storage::set_paused(e, true);
        events::Paused { caller }.publish(e);
        Ok(())
    }

    fn unpause(e: &Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_role(e, Role::Pauser, &caller)?;
        if !storage::is_paused(e) {
            return Err(Error::InvalidPauseState);
        }
        storage::set_paused(e, false);
        events::Unpaused { caller }.publish(e);
        Ok(())
    }

    fn is_paused(e: &Env) -> bool {
        storage::is_paused(e)
    }

    // access control

    fn has_role(e: &Env, role: Role, account: Address) -> bool {
        rbac::has_role(e, role, &account)
    }

    fn grant_role(e: &Env, caller: Address, role: Role, account: Address) -> Result<(), Error> {
        rbac::grant_role(e, &caller, role, &account)
    }

    fn revoke_role(e: &Env, caller: Address, role: Role, account: Address) -> Result<(), Error> {
        rbac::revoke_role(e, &caller, role, &account)
    }

    fn renounce_role(e: &Env, caller: Address, role: Role) {
        rbac::renounce_role(e, &caller, role)
    }

    fn get_role_member(e: &Env, role: Role, index: u32) -> Result<Address, Error> {
        rbac::get_role_member(e, role, index)
    }

    fn get_role_member_count(e: &Env, role: Role) -> u32 {
        rbac::get_role_member_count(e, role)
    }

    fn get_role_admin(_e: &Env, role: Role) -> Role {
        rbac::get_role_admin(role)
    }

    // ownership ledger

    fn balance_of(e: &Env, owner: Address) -> u32 {
        storage::owned_tokens(e, &owner).len()
    }

    fn owner_of(e: &Env, token_id: u64) -> Address {
        storage::token_owner(e, token_id)
            .unwrap_or_else(|| panic_with_error!(e, Error::NonExistentToken))
    }

    fn token_uri(e: &Env, token_id: u64) -> String {
        storage::token_uri(e, token_id)
            .unwrap_or_else(|| panic_with_error!(e, Error::NonExistentToken))
    }

    fn total_supply(e: &Env) -> u32 {
        storage::all_tokens(e).len()
    }

    fn token_of_owner_by_index(e: &Env, owner: Address, index: u32) -> Result<u64, Error> {
        storage::owned_tokens(e, &owner)
            .get(index)
            .ok_or(Error::IndexOutOfBounds)
    }

    fn token_by_index(e: &Env, index: u32) -> Result<u64, Error> {
        storage::all_tokens(e).get(index).ok_or(Error::IndexOutOfBounds)
    }

    fn transfer(e: &Env, from: Address, to: Address, token_id: u64) -> Result<(), Error> {
        require_not_paused(e)?;
        from.require_auth();

        let owner = storage::token_owner(e, token_id).ok_or(Error::NonExistentToken)?;
        if owner != from {
            return Err(Error::NotOwnerOrApproved);
        }
        do_transfer(e, &from, &to, token_id);
        Ok(())
    }

    fn transfer_from(
        e: &Env,
        spender: Address,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<(), Error> {
        require_not_paused(e)?;
        spender.require_auth();

        let owner = require_owner_or_approved(e, token_id, &spender)?;
        if owner != from {
            return Err(Error::NotOwnerOrApproved);
        }
        do_transfer(e, &from, &to, token_id);
        Ok(())
    }

    fn approve(e: &Env, caller: Address, approved: Address, token_id: u64) -> Result<(), Error> {
        caller.require_auth();

        let owner = storage::token_owner(e, token_id).ok_or(Error::NonExistentToken)?;
        if owner != caller {
            return Err(Error::NotOwnerOrApproved);
        }
        storage::set_approved(e, token_id, &approved);
        events::Approve {
            owner,
            token_id,
            approved,
        }
        .publish(e);
        Ok(())
    }

    fn get_approved(e: &Env, token_id: u64) -> Option<Address> {
        storage::approved(e, token_id)
    }

    fn burn(e: &Env, caller: Address, token_id: u64) -> Result<(), Error> {
        require_not_paused(e)?;
        caller.require_auth();

        let owner = require_owner_or_approved(e, token_id, &caller)?;
        // The edition's minted count stays as-is: burned supply is not
        // returned to the cap.
        storage::remove_token(e, token_id, &owner);
        events::Burn {
            from: owner,
            token_id,
        }
        .publish(e);
        Ok(())
    }

    fn name(e: &Env) -> String {
        storage::name(e).unwrap_or_else(|| panic_with_error!(e, Error::UnsetMetadata))
    }

    fn symbol(e: &Env) -> String {
        storage::symbol(e).unwrap_or_else(|| panic_with_error!(e, Error::UnsetMetadata))
    }

    // upgrade

    fn upgrade(e: &Env, caller: Address, new_wasm_hash: BytesN<32>) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_role(e, Role::Upgrader, &caller)?;
        e.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }
}
