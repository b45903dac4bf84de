//! Storage keys and typed accessors.
//!
//! Singletons (metadata, pause flag, token id counter) live in instance
//! storage; editions, prices, token records and currency balances live in
//! persistent storage keyed by `BucketStorageKey`. Existing key variants
//! must never change meaning across upgrades; new state gets new variants.

use soroban_sdk::{Address, Env, Map, String, Vec, contracttype};

use crate::errors::Error;

/// A named, capped category of mintable buckets.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BucketEdition {
    pub edition_id: u64,
    pub active: bool,
    pub capacity_in_gigabytes: u64,
    pub max_mintable_supply: u64,
    pub current_supply_minted: u64,
}

/// One entry of a `set_bucket_editions` batch.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EditionParams {
    pub edition_id: u64,
    pub capacity_in_gigabytes: u64,
    pub max_mintable_supply: u64,
}

/// A configured (currency, price) pair of an edition.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EditionPrice {
    pub currency: Address,
    pub price: i128,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Name,
    Symbol,
    Paused,
    NextTokenId,
}

#[contracttype]
#[derive(Clone)]
pub enum BucketStorageKey {
    EditionIds,
    Edition(u64),
    EditionPrices(u64),
    CurrencyBalance(Address),
    Owner(u64),
    TokenUri(u64),
    Approved(u64),
    OwnedTokens(Address),
    AllTokens,
}

// metadata / pause

pub fn set_metadata(e: &Env, name: &String, symbol: &String) {
    e.storage().instance().set(&DataKey::Name, name);
    e.storage().instance().set(&DataKey::Symbol, symbol);
}

pub fn name(e: &Env) -> Option<String> {
    e.storage().instance().get(&DataKey::Name)
}

pub fn symbol(e: &Env) -> Option<String> {
    e.storage().instance().get(&DataKey::Symbol)
}

pub fn is_paused(e: &Env) -> bool {
    e.storage().instance().get(&DataKey::Paused).unwrap_or(false)
}

pub fn set_paused(e: &Env, paused: bool) {
    e.storage().instance().set(&DataKey::Paused, &paused);
}

// editions and prices

pub fn edition_ids(e: &Env) -> Vec<u64> {
    e.storage()
        .persistent()
        .get(&BucketStorageKey::EditionIds)
        .unwrap_or_else(|| Vec::new(e))
}

pub fn save_edition_ids(e: &Env, ids: &Vec<u64>) {
    e.storage().persistent().set(&BucketStorageKey::EditionIds, ids);
}

pub fn load_edition(e: &Env, edition_id: u64) -> Option<BucketEdition> {
    e.storage().persistent().get(&BucketStorageKey::Edition(edition_id))
}

pub fn save_edition(e: &Env, edition: &BucketEdition) {
    e.storage()
        .persistent()
        .set(&BucketStorageKey::Edition(edition.edition_id), edition);
}

pub fn edition_prices(e: &Env, edition_id: u64) -> Map<Address, i128> {
    e.storage()
        .persistent()
        .get(&BucketStorageKey::EditionPrices(edition_id))
        .unwrap_or_else(|| Map::new(e))
}

pub fn save_edition_prices(e: &Env, edition_id: u64, prices: &Map<Address, i128>) {
    e.storage()
        .persistent()
        .set(&BucketStorageKey::EditionPrices(edition_id), prices);
}

// currency balances

pub fn currency_balance(e: &Env, currency: &Address) -> i128 {
    e.storage()
        .persistent()
        .get(&BucketStorageKey::CurrencyBalance(currency.clone()))
        .unwrap_or(0)
}

pub fn add_to_currency_balance(e: &Env, currency: &Address, amount: i128) -> Result<(), Error> {
    let balance = currency_balance(e, currency)
        .checked_add(amount)
        .ok_or(Error::MathOverflow)?;
    e.storage()
        .persistent()
        .set(&BucketStorageKey::CurrencyBalance(currency.clone()), &balance);
    Ok(())
}

/// Read and zero the tracked balance of `currency` in one step.
pub fn drain_currency_balance(e: &Env, currency: &Address) -> i128 {
    let balance = currency_balance(e, currency);
    if balance != 0 {
        e.storage()
            .persistent()
            .set(&BucketStorageKey::CurrencyBalance(currency.clone()), &0i128);
    }
    balance
}

// token ledger

/// Next sequential token id, starting at 1. Ids are never reused.
pub fn take_next_token_id(e: &Env) -> Result<u64, Error> {
    let id: u64 = e.storage().instance().get(&DataKey::NextTokenId).unwrap_or(1);
    let next = id.checked_add(1).ok_or(Error::MathOverflow)?;
    e.storage().instance().set(&DataKey::NextTokenId, &next);
    Ok(id)
}

pub fn token_owner(e: &Env, token_id: u64) -> Option<Address> {
    e.storage().persistent().get(&BucketStorageKey::Owner(token_id))
}

pub fn set_token_owner(e: &Env, token_id: u64, owner: &Address) {
    e.storage().persistent().set(&BucketStorageKey::Owner(token_id), owner);
}

pub fn token_uri(e: &Env, token_id: u64) -> Option<String> {
    e.storage().persistent().get(&BucketStorageKey::TokenUri(token_id))
}

pub fn set_token_uri(e: &Env, token_id: u64, uri: &String) {
    e.storage().persistent().set(&BucketStorageKey::TokenUri(token_id), uri);
}

pub fn approved(e: &Env, token_id: u64) -> Option<Address> {
    e.storage().persistent().get(&BucketStorageKey::Approved(token_id))
}

pub fn set_approved(e: &Env, token_id: u64, approved: &Address) {
    e.storage()
        .persistent()
        .set(&BucketStorageKey::Approved(token_id), approved);
}

pub fn clear_approved(e: &Env, token_id: u64) {
    e.storage().persistent().remove(&BucketStorageKey::Approved(token_id));
}

pub fn owned_tokens(e: &Env, owner: &Address) -> Vec<u64> {
    e.storage()
        .persistent()
        .get(&BucketStorageKey::OwnedTokens(owner.clone()))
        .unwrap_or_else(|| Vec::new(e))
}

pub fn save_owned_tokens(e: &Env, owner: &Address, tokens: &Vec<u64>) {
    e.storage()
        .persistent()
        .set(&BucketStorageKey::OwnedTokens(owner.clone()), tokens);
}

pub fn all_tokens(e: &Env) -> Vec<u64> {
    e.storage()
        .persistent()
        .get(&BucketStorageKey::AllTokens)
        .unwrap_or_else(|| Vec::new(e))
}

pub fn save_all_tokens(e: &Env, tokens: &Vec<u64>) {
    e.storage().persistent().set(&BucketStorageKey::AllTokens, tokens);
}

/// Record a freshly minted token in the ownership and enumeration tables.
pub fn insert_token(e: &Env, token_id: u64, owner: &Address) {
    set_token_owner(e, token_id, owner);

    let mut owned = owned_tokens(e, owner);
    owned.push_back(token_id);
    save_owned_tokens(e, owner, &owned);

    let mut all = all_tokens(e);
    all.push_back(token_id);
    save_all_tokens(e, &all);
}

/// Move `token_id` between the per-owner enumeration lists.
pub fn move_token(e: &Env, token_id: u64, from: &Address, to: &Address) {
    let mut from_owned = owned_tokens(e, from);
    if let Some(index) = from_owned.first_index_of(token_id) {
        from_owned.remove(index);
        save_owned_tokens(e, from, &from_owned);
    }

    let mut to_owned = owned_tokens(e, to);
    to_owned.push_back(token_id);
    save_owned_tokens(e, to, &to_owned);

    set_token_owner(e, token_id, to);
}

/// Drop every record of `token_id`. The id is retired, not recycled.
pub fn remove_token(e: &Env, token_id: u64, owner: &Address) {
    e.storage().persistent().remove(&BucketStorageKey::Owner(token_id));
    e.storage().persistent().remove(&BucketStorageKey::TokenUri(token_id));
    clear_approved(e, token_id);

    let mut owned = owned_tokens(e, owner);
    if let Some(index) = owned.first_index_of(token_id) {
        owned.remove(index);
        save_owned_tokens(e, owner, &owned);
    }

    let mut all = all_tokens(e);
    if let Some(index) = all.first_index_of(token_id) {
        all.remove(index);
        save_all_tokens(e, &all);
    }
}
