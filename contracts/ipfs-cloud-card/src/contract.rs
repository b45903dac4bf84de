//! IPFSCloudCard entry points.

use soroban_sdk::{
    Address, BytesN, Env, String, Vec, contractimpl, contracttype, panic_with_error,
};

use crate::errors::Error;
use crate::events;
use crate::{IPFSCloudCard, IPFSCloudCardArgs, IPFSCloudCardClient, IPFSCloudCardContract, Role};

#[contracttype]
pub enum DataKey {
    Name,
    Symbol,
    Uri,
    Paused,
    NextTokenId,
}

#[contracttype]
pub enum CardStorageKey {
    RoleMembers(Role),
    Owner(u64),
    Approved(u64),
    OwnedTokens(Address),
    AllTokens,
}

// role helpers

fn role_members(e: &Env, role: Role) -> Vec<Address> {
    e.storage()
        .persistent()
        .get(&CardStorageKey::RoleMembers(role))
        .unwrap_or_else(|| Vec::new(e))
}

fn save_role_members(e: &Env, role: Role, members: &Vec<Address>) {
    e.storage()
        .persistent()
        .set(&CardStorageKey::RoleMembers(role), members);
}

fn require_role(e: &Env, role: Role, account: &Address) -> Result<(), Error> {
    if role_members(e, role).contains(account) {
        Ok(())
    } else {
        Err(Error::Unauthorized)
    }
}

fn grant_unchecked(e: &Env, role: Role, account: &Address, caller: &Address) {
    let mut members = role_members(e, role);
    if !members.contains(account) {
        members.push_back(account.clone());
        save_role_members(e, role, &members);
        events::RoleGranted {
            role,
            account: account.clone(),
            caller: caller.clone(),
        }
        .publish(e);
    }
}

fn remove_member(e: &Env, role: Role, account: &Address, caller: &Address) {
    let mut members = role_members(e, role);
    if let Some(index) = members.first_index_of(account) {
        members.remove(index);
        save_role_members(e, role, &members);
        events::RoleRevoked {
            role,
            account: account.clone(),
            caller: caller.clone(),
        }
        .publish(e);
    }
}

// ledger helpers

fn is_paused(e: &Env) -> bool {
    e.storage().instance().get(&DataKey::Paused).unwrap_or(false)
}

fn require_not_paused(e: &Env) -> Result<(), Error> {
    if is_paused(e) {
        return Err(Error::ContractPaused);
    }
    Ok(())
}

fn token_owner(e: &Env, token_id: u64) -> Option<Address> {
    e.storage().persistent().get(&CardStorageKey::Owner(token_id))
}

fn owned_tokens(e: &Env, owner: &Address) -> Vec<u64> {
    e.storage()
        .persistent()
        .get(&CardStorageKey::OwnedTokens(owner.clone()))
        .unwrap_or_else(|| Vec::new(e))
}

fn save_owned_tokens(e: &Env, owner: &Address, tokens: &Vec<u64>) {
    e.storage()
        .persistent()
        .set(&CardStorageKey::OwnedTokens(owner.clone()), tokens);
}

fn all_tokens(e: &Env) -> Vec<u64> {
    e.storage()
        .persistent()
        .get(&CardStorageKey::AllTokens)
        .unwrap_or_else(|| Vec::new(e))
}

fn mint_one(e: &Env, to: &Address) -> Result<u64, Error> {
    // Sequential ids from 0, matching the collection's existing numbering.
    let token_id: u64 = e.storage().instance().get(&DataKey::NextTokenId).unwrap_or(0);
    let next = token_id.checked_add(1).ok_or(Error::MathOverflow)?;
    e.storage().instance().set(&DataKey::NextTokenId, &next);

    e.storage().persistent().set(&CardStorageKey::Owner(token_id), to);

    let mut owned = owned_tokens(e, to);
    owned.push_back(token_id);
    save_owned_tokens(e, to, &owned);

    let mut all = all_tokens(e);
    all.push_back(token_id);
    e.storage().persistent().set(&CardStorageKey::AllTokens, &all);

    events::Mint {
        to: to.clone(),
        token_id,
    }
    .publish(e);

    Ok(token_id)
}

fn do_transfer(e: &Env, from: &Address, to: &Address, token_id: u64) {
    e.storage().persistent().remove(&CardStorageKey::Approved(token_id));

    let mut from_owned = owned_tokens(e, from);
    if let Some(index) = from_owned.first_index_of(token_id) {
        from_owned.remove(index);
        save_owned_tokens(e, from, &from_owned);
    }
    let mut to_owned = owned_tokens(e, to);
    to_owned.push_back(token_id);
    save_owned_tokens(e, to, &to_owned);

    e.storage().persistent().set(&CardStorageKey::Owner(token_id), to);

    events::Transfer {
        from: from.clone(),
        to: to.clone(),
        token_id,
    }
    .publish(e);
}

fn require_owner_or_approved(e: &Env, token_id: u64, operator: &Address) -> Result<Address, Error> {
    let owner = token_owner(e, token_id).ok_or(Error::NonExistentToken)?;
    let approved: Option<Address> = e.storage().persistent().get(&CardStorageKey::Approved(token_id));
    if owner != *operator && approved.as_ref() != Some(operator) {
        return Err(Error::NotOwnerOrApproved);
    }
    Ok(owner)
}

#[contractimpl]
impl IPFSCloudCardContract for IPFSCloudCard {
    fn __constructor(e: &Env, admin: Address, name: String, symbol: String, uri: String) {
        e.storage().instance().set(&DataKey::Name, &name);
        e.storage().instance().set(&DataKey::Symbol, &symbol);
        e.storage().instance().set(&DataKey::Uri, &uri);

        grant_unchecked(e, Role::DefaultAdmin, &admin, &admin);
        grant_unchecked(e, Role::Minter, &admin, &admin);
        grant_unchecked(e, Role::Pauser, &admin, &admin);
        grant_unchecked(e, Role::Upgrader, &admin, &admin);
    }

    fn safe_mint(e: &Env, caller: Address, to: Address) -> Result<u64, Error> {
        require_not_paused(e)?;
        caller.require_auth();
        require_role(e, Role::Minter, &caller)?;

        mint_one(e, &to)
    }

    fn safe_batch_mint(e: &Env, caller: Address, to: Address, count: u32) -> Result<(), Error> {
        require_not_paused(e)?;
        caller.require_auth();
        require_role(e, Role::Minter, &caller)?;
        if count == 0 {
            return Err(Error::InvalidAmount);
        }

        for _ in 0..count {
            mint_one(e, &to)?;
        }
        Ok(())
    }

    fn burn(e: &Env, caller: Address, token_id: u64) -> Result<(), Error> {
        require_not_paused(e)?;
        caller.require_auth();

        let owner = require_owner_or_approved(e, token_id, &caller)?;

        e.storage().persistent().remove(&CardStorageKey::Owner(token_id));
        e.storage().persistent().remove(&CardStorageKey::Approved(token_id));

        let mut owned = owned_tokens(e, &owner);
        if let Some(index) = owned.first_index_of(token_id) {
            owned.remove(index);
            save_owned_tokens(e, &owner, &owned);
        }
        let mut all = all_tokens(e);
        if let Some(index) = all.first_index_of(token_id) {
            all.remove(index);
            e.storage().persistent().set(&CardStorageKey::AllTokens, &all);
        }

        events::Burn {
            from: owner,
            token_id,
        }
        .publish(e);
        Ok(())
    }

    fn transfer(e: &Env, from: Address, to: Address, token_id: u64) -> Result<(), Error> {
        require_not_paused(e)?;
        from.require_auth();

        let owner = token_owner(e, token_id).ok_or(Error::NonExistentToken)?;
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

        let owner = token_owner(e, token_id).ok_or(Error::NonExistentToken)?;
        if owner != caller {
            return Err(Error::NotOwnerOrApproved);
        }
        e.storage()
            .persistent()
            .set(&CardStorageKey::Approved(token_id), &approved);
        events::Approve {
            owner,
            token_id,
            approved,
        }
        .publish(e);
        Ok(())
    }

    fn get_approved(e: &Env, token_id: u64) -> Option<Address> {
        e.storage().persistent().get(&CardStorageKey::Approved(token_id))
    }

    fn balance_of(e: &Env, owner: Address) -> u32 {
        owned_tokens(e, &owner).len()
    }

    fn owner_of(e: &Env, token_id: u64) -> Address {
        token_owner(e, token_id).unwrap_or_else(|| panic_with_error!(e, Error::NonExistentToken))
    }

    fn total_supply(e: &Env) -> u32 {
        all_tokens(e).len()
    }

    fn token_of_owner_by_index(e: &Env, owner: Address, index: u32) -> Result<u64, Error> {
        owned_tokens(e, &owner).get(index).ok_or(Error::IndexOutOfBounds)
    }

    // pausability

    fn pause(e: &Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        require_role(e, Role::Pauser, &caller)?;
        if is_paused(e) {
            return Err(Error::InvalidPauseState);
        }
        e.storage().instance().set(&DataKey::Paused, &true);
        events::Paused { caller }.publish(e);
        Ok(())
    }

    fn unpause(e: &Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        require_role(e, Role::Pauser, &caller)?;
        if !is_paused(e) {
            return Err(Error::InvalidPauseState);
        }
        e.storage().instance().set(&DataKey::Paused, &false);
        events::Unpaused { caller }.publish(e);
        Ok(())
    }

    fn is_paused(e: &Env) -> bool {
        is_paused(e)
    }

    // access control

    fn has_role(e: &Env, role: Role, account: Address) -> bool {
        role_members(e, role).contains(&account)
    }

    fn grant_role(e: &Env, caller: Address, role: Role, account: Address) -> Result<(), Error> {
        caller.require_auth();
        require_role(e, Role::DefaultAdmin, &caller)?;
        grant_unchecked(e, role, &account, &caller);
        Ok(())
    }

    fn revoke_role(e: &Env, caller: Address, role: Role, account: Address) -> Result<(), Error> {
        caller.require_auth();
        require_role(e, Role::DefaultAdmin, &caller)?;
        remove_member(e, role, &account, &caller);
        Ok(())
    }

    fn renounce_role(e: &Env, caller: Address, role: Role) {
        caller.require_auth();
        remove_member(e, role, &caller, &caller);
    }

    fn get_role_member(e: &Env, role: Role, index: u32) -> Result<Address, Error> {
        role_members(e, role).get(index).ok_or(Error::IndexOutOfBounds)
    }

    fn get_role_member_count(e: &Env, role: Role) -> u32 {
        role_members(e, role).len()
    }

    fn get_role_admin(_e: &Env, _role: Role) -> Role {
        Role::DefaultAdmin
    }

    // metadata

    fn name(e: &Env) -> String {
        e.storage()
            .instance()
            .get(&DataKey::Name)
            .unwrap_or_else(|| panic_with_error!(e, Error::UnsetMetadata))
    }

    fn symbol(e: &Env) -> String {
        e.storage()
            .instance()
            .get(&DataKey::Symbol)
            .unwrap_or_else(|| panic_with_error!(e, Error::UnsetMetadata))
    }

    fn token_uri(e: &Env, token_id: u64) -> String {
        if token_owner(e, token_id).is_none() {
            panic_with_error!(e, Error::NonExistentToken);
        }
        e.storage()
            .instance()
            .get(&DataKey::Uri)
            .unwrap_or_else(|| panic_with_error!(e, Error::UnsetMetadata))
    }

    // upgrade

    fn upgrade(e: &Env, caller: Address, new_wasm_hash: BytesN<32>) -> Result<(), Error> {
        caller.require_auth();
        require_role(e, Role::Upgrader, &caller)?;
        e.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }
}
