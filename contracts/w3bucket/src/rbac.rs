//! Enumerable role registry gating every privileged entry point.
//!
//! Membership is kept as an ordered `Vec<Address>` per role so callers can
//! enumerate members by index. `DefaultAdmin` administers every role,
//! including itself.

use soroban_sdk::{Address, Env, Vec, contracttype};

use crate::errors::Error;
use crate::events;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    DefaultAdmin = 0,
    EditionsAdmin = 1,
    Pauser = 2,
    Withdrawer = 3,
    Upgrader = 4,
}

#[contracttype]
#[derive(Clone)]
enum RbacKey {
    Members(Role),
}

fn members(e: &Env, role: Role) -> Vec<Address> {
    e.storage()
        .persistent()
        .get(&RbacKey::Members(role))
        .unwrap_or_else(|| Vec::new(e))
}

fn save_members(e: &Env, role: Role, members: &Vec<Address>) {
    e.storage().persistent().set(&RbacKey::Members(role), members);
}

pub fn has_role(e: &Env, role: Role, account: &Address) -> bool {
    members(e, role).contains(account)
}

/// Fails with `Unauthorized` unless `account` holds `role`.
pub fn require_role(e: &Env, role: Role, account: &Address) -> Result<(), Error> {
    if has_role(e, role, account) {
        Ok(())
    } else {
        Err(Error::Unauthorized)
    }
}

/// The role whose members may grant and revoke `role`.
///
/// Admin assignments are fixed at `DefaultAdmin` for every role, itself
/// included.
pub fn get_role_admin(_role: Role) -> Role {
    Role::DefaultAdmin
}

/// Add `account` to `role` without an admin check. Constructor use only.
pub fn grant_unchecked(e: &Env, role: Role, account: &Address, caller: &Address) {
    let mut list = members(e, role);
    if !list.contains(account) {
        list.push_back(account.clone());
        save_members(e, role, &list);
        events::RoleGranted {
            role,
            account: account.clone(),
            caller: caller.clone(),
        }
        .publish(e);
    }
}

/// Grant `role` to `account`. `caller` must hold the role's admin role.
///
/// Granting a role an account already holds is a no-op and emits nothing.
pub fn grant_role(e: &Env, caller: &Address, role: Role, account: &Address) -> Result<(), Error> {
    caller.require_auth();
    require_role(e, get_role_admin(role), caller)?;
    grant_unchecked(e, role, account, caller);
    Ok(())
}

/// Revoke `role` from `account`. `caller` must hold the role's admin role.
pub fn revoke_role(e: &Env, caller: &Address, role: Role, account: &Address) -> Result<(), Error> {
    caller.require_auth();
    require_role(e, get_role_admin(role), caller)?;
    remove_member(e, role, account, caller);
    Ok(())
}

/// Self-revoke `role`. No admin check; anyone may give up their own roles.
pub fn renounce_role(e: &Env, caller: &Address, role: Role) {
    caller.require_auth();
    remove_member(e, role, caller, caller);
}

fn remove_member(e: &Env, role: Role, account: &Address, caller: &Address) {
    let mut list = members(e, role);
    if let Some(index) = list.first_index_of(account) {
        list.remove(index);
        save_members(e, role, &list);
        events::RoleRevoked {
            role,
            account: account.clone(),
            caller: caller.clone(),
        }
        .publish(e);
    }
}

pub fn get_role_member(e: &Env, role: Role, index: u32) -> Result<Address, Error> {
    members(e, role).get(index).ok_or(Error::IndexOutOfBounds)
}

pub fn get_role_member_count(e: &Env, role: Role) -> u32 {
    members(e, role).len()
}
