//! # Access control
//!
//! Capability checks for the three privilege levels the protocol knows:
//!
//! - **Admin set**: a flat membership set seeded at `init`. Admins run the
//!   registry, bank and schedule commands and may co-opt or remove other
//!   admins. Every gated entry point takes the calling principal explicitly
//!   and authenticates it here; there is no ambient "current caller".
//! - **Minter**: a single designated principal, narrower than the admin
//!   set, allowed only to clear pending claim balances after settling them.
//! - **Escape hatch caller**: configured at `init`, checked in `sweep_all`;
//!   intentionally independent of the admin set.
//!
//! Role storage lives in [`AccessKey`]; the escape-hatch principals are init
//! configuration and live in `storage::DataKey`.

use soroban_sdk::{contracttype, panic_with_error, Address, Env, Vec};

use crate::{storage, Error};

/// Access-control storage keys (Instance tier).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AccessKey {
    /// Membership flag for the admin set.
    Admin(Address),
    /// The designated minter principal, if set.
    Minter,
}

/// Seed the admin set at init. Duplicate entries are harmless.
pub fn init_admins(env: &Env, admins: &Vec<Address>) {
    if admins.is_empty() {
        panic_with_error!(env, Error::InvalidParameter);
    }
    for admin in admins.iter() {
        env.storage()
            .instance()
            .set(&AccessKey::Admin(admin), &true);
    }
    storage::bump_instance(env);
}

pub fn is_admin(env: &Env, who: &Address) -> bool {
    env.storage()
        .instance()
        .get(&AccessKey::Admin(who.clone()))
        .unwrap_or(false)
}

/// Authenticate `caller` and require admin membership.
pub fn require_admin(env: &Env, caller: &Address) {
    caller.require_auth();
    if !is_admin(env, caller) {
        panic_with_error!(env, Error::NotAuthorized);
    }
}

/// Add a new admin. Fails on an existing member so a typo'd re-grant is
/// visible to the caller.
pub fn add_admin(env: &Env, admin: &Address) {
    if is_admin(env, admin) {
        panic_with_error!(env, Error::InvalidParameter);
    }
    env.storage()
        .instance()
        .set(&AccessKey::Admin(admin.clone()), &true);
    storage::bump_instance(env);
}

pub fn remove_admin(env: &Env, admin: &Address) {
    if !is_admin(env, admin) {
        panic_with_error!(env, Error::InvalidParameter);
    }
    env.storage()
        .instance()
        .remove(&AccessKey::Admin(admin.clone()));
}

pub fn set_minter(env: &Env, minter: &Address) {
    env.storage().instance().set(&AccessKey::Minter, minter);
    storage::bump_instance(env);
}

pub fn minter(env: &Env) -> Option<Address> {
    env.storage().instance().get(&AccessKey::Minter)
}

/// Authenticate `caller` and require it to be the designated minter.
pub fn require_minter(env: &Env, caller: &Address) {
    caller.require_auth();
    match minter(env) {
        Some(m) if &m == caller => {}
        _ => panic_with_error!(env, Error::NotAuthorized),
    }
}

/// Authenticate `caller` and require it to be the escape-hatch caller.
pub fn require_escape_caller(env: &Env, caller: &Address) {
    caller.require_auth();
    if storage::escape_caller(env) != *caller {
        panic_with_error!(env, Error::NotAuthorized);
    }
}
