#![no_std]

use soroban_sdk::{Address, BytesN, Env, String, contract, contractmeta, contracttype};

contractmeta!(key = "Description", val = "IPFS Cloud Card NFT");

mod contract;
mod errors;
mod events;


pub use errors::Error;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    DefaultAdmin = 0,
    Minter = 1,
    Pauser = 2,
    Upgrader = 3,
}

#[contract]
pub struct IPFSCloudCard;

pub trait IPFSCloudCardContract {
    /// Set collection metadata and grant every role to `admin`.
    fn __constructor(e: &Env, admin: Address, name: String, symbol: String, uri: String);

    /// Mint the next card to `to`.
    ///
    /// Token ids are sequential starting at 0 and never reused.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `caller` - Must hold `Role::Minter`.
    /// * `to` - Account of the token's owner.
    ///
    /// # Returns
    ///
    /// The id of the minted token.
    fn safe_mint(e: &Env, caller: Address, to: Address) -> Result<u64, Error>;

    /// Mint `count` cards to `to` in one transaction.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `caller` - Must hold `Role::Minter`.
    /// * `to` - Account receiving all `count` tokens.
    /// * `count` - Number of tokens; must be non-zero.
    fn safe_batch_mint(e: &Env, caller: Address, to: Address, count: u32) -> Result<(), Error>;

    /// Destroy `token_id` permanently. Owner or approved spender only.
    fn burn(e: &Env, caller: Address, token_id: u64) -> Result<(), Error>;

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

    /// Approve `approved` to transfer `token_id`. Owner only.
    fn approve(e: &Env, caller: Address, approved: Address, token_id: u64) -> Result<(), Error>;

    fn get_approved(e: &Env, token_id: u64) -> Option<Address>;

    /// Returns the number of tokens in `owner`'s account.
    fn balance_of(e: &Env, owner: Address) -> u32;

    /// Returns the address of the owner of the given `token_id`.
    ///
    /// # Notes
    ///
    /// If the token does not exist, this function is expected to panic.
    fn owner_of(e: &Env, token_id: u64) -> Address;

    fn total_supply(e: &Env) -> u32;

    /// Enumerate `owner`'s tokens; `index` is in `0..balance_of(owner)`.
    fn token_of_owner_by_index(e: &Env, owner: Address, index: u32) -> Result<u64, Error>;

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

    // metadata

    /// Returns the token collection name.
    fn name(e: &Env) -> String;

    /// Returns the token collection symbol.
    fn symbol(e: &Env) -> String;

    /// Returns the collection-level metadata URI for `token_id`.
    ///
    /// # Notes
    ///
    /// If the token does not exist, this function is expected to panic.
    fn token_uri(e: &Env, token_id: u64) -> String;

    // upgrade

    /// Swap the executable to `new_wasm_hash`, keeping all storage.
    /// Restricted to `Role::Upgrader`.
    fn upgrade(e: &Env, caller: Address, new_wasm_hash: BytesN<32>) -> Result<(), Error>;
}
