//! # Trust registry
//!
//! Admission control and pending-balance bookkeeping for contributors.
//!
//! The registry exclusively owns [`Contributor`] records. Removal is a soft
//! delete: the admission flag and record go away, but settlement balances in
//! the bank are retained. Pending claim balances are only mutable while the
//! contributor has not exercised any prior entitlement; once the external
//! claim asset shows a nonzero balance for the address, admin adjustment is
//! refused to prevent double-crediting and only the designated minter may
//! clear.

use soroban_sdk::{panic_with_error, token, Address, Env, Vec};

use crate::types::Contributor;
use crate::{events, storage, Error};

/// Admit a contributor with a trust ceiling and optional starting pending
/// balance.
pub fn register(env: &Env, address: &Address, max_trust: i128, pending_balance: i128) {
    if max_trust <= 0 || pending_balance < 0 {
        panic_with_error!(env, Error::InvalidParameter);
    }
    if storage::load_contributor(env, address).is_some() {
        panic_with_error!(env, Error::AlreadyRegistered);
    }
    let mut list = storage::contributor_list(env);
    list.push_back(address.clone());
    storage::save_contributor_list(env, &list);
    storage::save_contributor(
        env,
        &Contributor {
            address: address.clone(),
            max_trust,
            pending_balance,
        },
    );
    events::contributor_added(env, address, max_trust);
}

/// Batch admission. Atomic: the first duplicate or bad parameter aborts the
/// whole invocation, leaving no partial registration.
pub fn register_batch(
    env: &Env,
    addresses: &Vec<Address>,
    max_trusts: &Vec<i128>,
    pending_balances: &Vec<i128>,
) {
    if addresses.len() != max_trusts.len() || addresses.len() != pending_balances.len() {
        panic_with_error!(env, Error::ArityMismatch);
    }
    for i in 0..addresses.len() {
        register(
            env,
            &addresses.get_unchecked(i),
            max_trusts.get_unchecked(i),
            pending_balances.get_unchecked(i),
        );
    }
}

pub fn remove(env: &Env, address: &Address) {
    if storage::load_contributor(env, address).is_none() {
        panic_with_error!(env, Error::NotRegistered);
    }
    storage::remove_contributor(env, address);
    let mut list = storage::contributor_list(env);
    if let Some(index) = list.first_index_of(address.clone()) {
        let _ = list.remove(index);
        storage::save_contributor_list(env, &list);
    }
    events::contributor_removed(env, address);
}

pub fn remove_batch(env: &Env, addresses: &Vec<Address>) {
    for address in addresses.iter() {
        remove(env, &address);
    }
}

/// Set a pending claim balance outright.
pub fn set_pending(env: &Env, address: &Address, value: i128) {
    if value < 0 {
        panic_with_error!(env, Error::InvalidParameter);
    }
    let mut contributor = load(env, address);
    require_claim_inactive(env, address);
    contributor.pending_balance = value;
    storage::save_contributor(env, &contributor);
    events::pending_balance_changed(env, address, value);
}

/// Increase a pending claim balance by `delta`.
pub fn add_pending(env: &Env, address: &Address, delta: i128) {
    if delta <= 0 {
        panic_with_error!(env, Error::InvalidParameter);
    }
    let mut contributor = load(env, address);
    require_claim_inactive(env, address);
    contributor.pending_balance += delta;
    storage::save_contributor(env, &contributor);
    events::pending_balance_changed(env, address, contributor.pending_balance);
}

pub fn set_pending_batch(env: &Env, addresses: &Vec<Address>, values: &Vec<i128>) {
    if addresses.len() != values.len() {
        panic_with_error!(env, Error::ArityMismatch);
    }
    for i in 0..addresses.len() {
        set_pending(env, &addresses.get_unchecked(i), values.get_unchecked(i));
    }
}

pub fn add_pending_batch(env: &Env, addresses: &Vec<Address>, deltas: &Vec<i128>) {
    if addresses.len() != deltas.len() {
        panic_with_error!(env, Error::ArityMismatch);
    }
    for i in 0..addresses.len() {
        add_pending(env, &addresses.get_unchecked(i), deltas.get_unchecked(i));
    }
}

/// Credit a pending balance from the entitlement-redemption flow. Unlike the
/// admin mutations this skips the claim-asset guard: the credit is backed by
/// capital that just moved to the vault, not a manual adjustment.
pub fn credit_pending(env: &Env, address: &Address, delta: i128) {
    let mut contributor = load(env, address);
    contributor.pending_balance += delta;
    storage::save_contributor(env, &contributor);
    events::pending_balance_changed(env, address, contributor.pending_balance);
}

/// Zero the pending balance and report the cleared amount. Caller capability
/// (the minter) is checked at the entry point.
pub fn clear_pending(env: &Env, address: &Address) -> i128 {
    let mut contributor = load(env, address);
    let cleared = contributor.pending_balance;
    contributor.pending_balance = 0;
    storage::save_contributor(env, &contributor);
    events::pending_balance_cleared(env, address, cleared);
    cleared
}

pub fn is_contributor(env: &Env, address: &Address) -> bool {
    storage::load_contributor(env, address).is_some()
}

/// Trust ceiling of `address`, 0 when not registered.
pub fn max_trust_of(env: &Env, address: &Address) -> i128 {
    storage::load_contributor(env, address)
        .map(|c| c.max_trust)
        .unwrap_or(0)
}

/// Pending claim balance of `address`, 0 when not registered.
pub fn pending_of(env: &Env, address: &Address) -> i128 {
    storage::load_contributor(env, address)
        .map(|c| c.pending_balance)
        .unwrap_or(0)
}

/// Contributor addresses in registration order.
pub fn contributors(env: &Env) -> Vec<Address> {
    storage::contributor_list(env)
}

/// Full contributor records in registration order.
pub fn contributor_info(env: &Env) -> Vec<Contributor> {
    let mut info = Vec::new(env);
    for address in storage::contributor_list(env).iter() {
        info.push_back(load(env, &address));
    }
    info
}

fn load(env: &Env, address: &Address) -> Contributor {
    match storage::load_contributor(env, address) {
        Some(contributor) => contributor,
        None => panic_with_error!(env, Error::NotRegistered),
    }
}

/// Refuse pending-balance mutation once the contributor holds any of the
/// external claim asset.
fn require_claim_inactive(env: &Env, address: &Address) {
    if let Some(claim) = storage::claim_token(env) {
        let held = token::Client::new(env, &claim).balance(address);
        if held != 0 {
            panic_with_error!(env, Error::MembershipActivated);
        }
    }
}
