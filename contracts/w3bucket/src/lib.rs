#![no_std]

use soroban_sdk::{Address, BytesN, Env, String, Vec, contract, contractmeta};

contractmeta!(key = "Description", val = "W3Bucket - Web3 storage bucket NFT");

mod contract;
mod errors;
mod events;
mod rbac;
mod storage;


pub use errors::Error;
pub use rbac::Role;
pub use storage::{BucketEdition, EditionParams, EditionPrice};

#[contract]
pub struct W3Bucket;

pub trait W3BucketContract {
    /// Set collection metadata and grant every role to `admin`.
    fn __constructor(e: &Env, admin: Address, name: String, symbol: String);

    // editions and prices

    /// Upsert bucket editions in one batch.
    ///
    /// Every submitted edition ends up active with the given capacity and
    /// supply cap; a previously known edition keeps its minted count. Any
    /// known edition missing from `editions` is deactivated, retaining its
    /// minted count and prices.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `caller` - Must hold `Role::EditionsAdmin`.
    /// * `editions` - The complete set of editions that should be active.
    ///
    /// # Events
    ///
    /// One `EditionUpdated` per submitted entry.
    fn set_bucket_editions(e: &Env, caller: Address, editions: Vec<EditionParams>)
    -> Result<(), Error>;

    /// Return all editions, or only active ones. Order is unspecified.
    fn get_bucket_editions(e: &Env, include_inactive: bool) -> Vec<BucketEdition>;

    /// Upsert one price per currency for `edition_id`.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `caller` - Must hold `Role::EditionsAdmin`.
    /// * `edition_id` - Must have been created before, active or not.
    /// * `prices` - Currency/price pairs; at most one price per currency.
    ///   Prices must be non-negative; zero means free of charge.
    ///
    /// # Events
    ///
    /// One `EditionPriceUpdated` per entry.
    fn set_bucket_edition_prices(
        e: &Env,
        caller: Address,
        edition_id: u64,
        prices: Vec<EditionPrice>,
    ) -> Result<(), Error>;

    /// Return the configured currency/price pairs for `edition_id`.
    fn get_bucket_edition_prices(e: &Env, edition_id: u64) -> Vec<EditionPrice>;

    // mint and treasury

    /// Mint a bucket of `edition_id` to `to`, paying in `currency`.
    ///
    /// Open to any payer, subject to payment. The offered `payment` must
    /// equal the configured price exactly; the funds are pulled from
    /// `payer` through the currency's token contract and credited to the
    /// contract's balance for that currency.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `payer` - Account paying the mint price; must authorize the call.
    /// * `to` - Account receiving the bucket token.
    /// * `edition_id` - Must be a known, active edition.
    /// * `currency` - Token contract of the payment asset.
    /// * `token_uri` - Metadata URI recorded for the new token.
    /// * `payment` - Offered amount, checked for exact match with the price.
    ///
    /// # Returns
    ///
    /// The sequential id of the minted token.
    fn mint(
        e: &Env,
        payer: Address,
        to: Address,
        edition_id: u64,
        currency: Address,
        token_uri: String,
        payment: i128,
    ) -> Result<u64, Error>;

    /// Sweep the contract's entire held balance of `currency` to `to`.
    ///
    /// Restricted to `Role::Withdrawer`. Deliberately not pause-gated so
    /// funds stay recoverable during an emergency stop.
    fn withdraw(e: &Env, caller: Address, to: Address, currency: Address) -> Result<i128, Error>;

    /// The contract's tracked balance of `currency`.
    fn currency_balance(e: &Env, currency: Address) -> i128;

    // pausability

    /// Halt mint, burn and transfer. Fails with `InvalidPauseState` if
    /// already paused. Restricted to `Role::Pauser`.
    fn pause(e: &Env, caller: Address) -> Result<(), Error>;

    /// Lift the pause. Fails with `InvalidPauseState` if not paused.
    /// Restricted to `Role::Pauser`.
    fn unpause(e: &Env, caller: Address) -> Result<(), Error>;

    fn is_paused(e: &Env) -> bool;

    // access control

    fn has_role(e: &Env, role: Role, account: Address) -> bool;

    /// Grant `role` to `account`. `caller` must hold the role's admin role.
    fn grant_role(e: &Env, caller: Address, role: Role, account: Address) -> Result<(), Error>;

    /// Revoke `role` from `account`. `caller` must hold the role's admin role.
    fn revoke_role(e: &Env, caller: Address, role: Role, account: Address) -> Result<(), Error>;

    /// Give up one's own `role`. No admin check.
    fn renounce_role(e: &Env, caller: Address, role: Role);

    fn get_role_member(e: &Env, role: Role, index: u32) -> Result<Address, Error>;

    fn get_role_member_count(e: &Env, role: Role) -> u32;

    fn get_role_admin(e: &Env, role: Role) -> Role;

    // ownership ledger

    /// Returns the number of tokens in `owner`'s account.
    fn balance_of(e: &Env, owner: Address) -> u32;

    /// Returns the address of the owner of the given `token_id`.
    ///
    /// # Notes
    ///
    /// If the token does not exist, this function is expected to panic.
    fn owner_of(e: &Env, token_id: u64) -> Address;

    /// Returns the Uniform Resource Identifier (URI) for `token_id` token.
    ///
    /// # Notes
    ///
    /// If the token does not exist, this function is expected to panic.
    fn token_uri(e: &Env, token_id: u64) -> String;

    fn total_supply(e: &Env) -> u32;

    /// Enumerate `owner`'s tokens; `index` is in `0..balance_of(owner)`.
    fn token_of_owner_by_index(e: &Env, owner: Address, index: u32) -> Result<u64, Error>;

    /// Enumerate all live tokens; `index` is in `0..total_supply()`.
    fn token_by_index(e: &Env, index: u32) -> Result<u64, Error>;

    /// Transfer `token_id` from `from` to `to`. `from` must own the token
    /// and authorize the call.
    fn transfer(e: &Env, from: Address, to: Address, token_id: u64) -> Result<(), Error>;

    /// Transfer on behalf of the owner. `spender` must be the owner or the
    /// token's approved spender.
    fn transfer_from(
        e: &Env,
        spender: Address,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<(), Error>;

    /// Approve `approved` to transfer `token_id`. Owner only; any previous
    /// approval is replaced.
    fn approve(e: &Env, caller: Address, approved: Address, token_id: u64) -> Result<(), Error>;

    fn get_approved(e: &Env, token_id: u64) -> Option<Address>;

    /// Destroy `token_id` permanently. Owner or approved spender only.
    /// The originating edition's minted count is not decremented; supply
    /// cap is never returned.
    fn burn(e: &Env, caller: Address, token_id: u64) -> Result<(), Error>;

    /// Returns the token collection name.
    fn name(e: &Env) -> String;

    /// Returns the token collection symbol.
    fn symbol(e: &Env) -> String;

    // upgrade

    /// Swap the executable to `new_wasm_hash`, keeping all storage.
    ///
    /// Restricted to `Role::Upgrader`. Replacement code must treat the
    /// storage layout as additive-only: existing keys keep their meaning.
    fn upgrade(e: &Env, caller: Address, new_wasm_hash: BytesN<32>) -> Result<(), Error>;
}
