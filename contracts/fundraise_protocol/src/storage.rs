//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key                | Type             | Description                         |
//! |--------------------|------------------|-------------------------------------|
//! | `State`            | `FundraiseState` | Fundraise lifecycle state           |
//! | `BaseToken`        | `Address`        | Settlement (base) asset contract    |
//! | `ClaimToken`       | `Address`        | External claim asset (optional)     |
//! | `VaultAddress`     | `Address`        | Reserved principal for the vault    |
//! | `TotalAddress`     | `Address`        | Reserved principal for the total    |
//! | `DrainReceiver`    | `Address`        | Receives drained vault funds        |
//! | `EscapeCaller`     | `Address`        | May trigger the emergency sweep     |
//! | `EscapeDest`       | `Address`        | Receives swept funds                |
//! | `IterationCount`   | `u32`            | Number of configured iterations     |
//! | `ActiveIteration`  | `u32`            | Active index; absent before start   |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                      | Type           | Description                      |
//! |--------------------------|----------------|----------------------------------|
//! | `Iteration(idx)`         | `Iteration`    | Phase parameters and received    |
//! | `Contributor(addr)`      | `Contributor`  | Trust registry record            |
//! | `ContributorList`        | `Vec<Address>` | Registration order               |
//! | `Balance(kind)`          | `i128`         | Bank account balance             |
//! | `Entitlement(addr)`      | `i128`         | Outstanding reward entitlement   |
//! | `EntitlementSupply(idx)` | `i128`         | Entitlement supply per iteration |
//! | `Contribution(addr, idx)`| `i128`         | Contributed base, net of refunds |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{AccountKind, Contributor, FundraiseState, Iteration, ProtocolConfig};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys except access-control entries, which live in
/// `AccessKey` inside `access.rs`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Fundraise lifecycle state (Instance).
    State,
    /// Base settlement asset contract address (Instance).
    BaseToken,
    /// External claim asset contract address, if configured (Instance).
    ClaimToken,
    /// Reserved principal mapped to `AccountKind::Vault` (Instance).
    VaultAddress,
    /// Reserved principal mapped to `AccountKind::Total` (Instance).
    TotalAddress,
    /// Receiver of drained vault funds (Instance).
    DrainReceiver,
    /// Escape-hatch caller principal (Instance).
    EscapeCaller,
    /// Escape-hatch destination principal (Instance).
    EscapeDest,
    /// Number of configured iterations (Instance).
    IterationCount,
    /// Index of the active iteration; absent until the fundraise starts (Instance).
    ActiveIteration,
    /// Iteration parameters and received total, keyed by index (Persistent).
    Iteration(u32),
    /// Trust registry record keyed by contributor address (Persistent).
    Contributor(Address),
    /// Contributor addresses in registration order (Persistent).
    ContributorList,
    /// Bank balance keyed by account kind (Persistent).
    Balance(AccountKind),
    /// Outstanding reward entitlement per holder (Persistent).
    Entitlement(Address),
    /// Outstanding entitlement supply per iteration (Persistent).
    EntitlementSupply(u32),
    /// Base amount an address has contributed against an iteration, net of
    /// refunds (Persistent).
    Contribution(Address, u32),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn state(env: &Env) -> Option<FundraiseState> {
    env.storage().instance().get(&DataKey::State)
}

pub fn set_state(env: &Env, state: &FundraiseState) {
    env.storage().instance().set(&DataKey::State, state);
    bump_instance(env);
}

pub fn base_token(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::BaseToken)
        .expect("base token not set")
}

/// Store the base asset and principal configuration at init.
pub fn set_config(env: &Env, config: &ProtocolConfig) {
    let instance = env.storage().instance();
    instance.set(&DataKey::BaseToken, &config.base_token);
    instance.set(&DataKey::VaultAddress, &config.vault_address);
    instance.set(&DataKey::TotalAddress, &config.total_address);
    instance.set(&DataKey::DrainReceiver, &config.drain_vault_receiver);
    instance.set(&DataKey::EscapeCaller, &config.escape_hatch_caller);
    instance.set(&DataKey::EscapeDest, &config.escape_hatch_destination);
    bump_instance(env);
}

pub fn claim_token(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::ClaimToken)
}

pub fn set_claim_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::ClaimToken, token);
    bump_instance(env);
}

pub fn vault_address(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::VaultAddress)
        .expect("vault address not set")
}

pub fn total_address(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::TotalAddress)
        .expect("total address not set")
}

pub fn drain_receiver(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::DrainReceiver)
        .expect("drain receiver not set")
}

pub fn escape_caller(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::EscapeCaller)
        .expect("escape hatch caller not set")
}

pub fn escape_destination(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::EscapeDest)
        .expect("escape hatch destination not set")
}

pub fn iteration_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::IterationCount)
        .unwrap_or(0)
}

pub fn set_iteration_count(env: &Env, count: u32) {
    env.storage()
        .instance()
        .set(&DataKey::IterationCount, &count);
    bump_instance(env);
}

pub fn active_iteration(env: &Env) -> Option<u32> {
    env.storage().instance().get(&DataKey::ActiveIteration)
}

pub fn set_active_iteration(env: &Env, index: u32) {
    env.storage()
        .instance()
        .set(&DataKey::ActiveIteration, &index);
    bump_instance(env);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn load_iteration(env: &Env, index: u32) -> Option<Iteration> {
    let key = DataKey::Iteration(index);
    let it: Option<Iteration> = env.storage().persistent().get(&key);
    if it.is_some() {
        bump_persistent(env, &key);
    }
    it
}

pub fn save_iteration(env: &Env, index: u32, iteration: &Iteration) {
    let key = DataKey::Iteration(index);
    env.storage().persistent().set(&key, iteration);
    bump_persistent(env, &key);
}

pub fn load_contributor(env: &Env, address: &Address) -> Option<Contributor> {
    let key = DataKey::Contributor(address.clone());
    let con: Option<Contributor> = env.storage().persistent().get(&key);
    if con.is_some() {
        bump_persistent(env, &key);
    }
    con
}

pub fn save_contributor(env: &Env, contributor: &Contributor) {
    let key = DataKey::Contributor(contributor.address.clone());
    env.storage().persistent().set(&key, contributor);
    bump_persistent(env, &key);
}

pub fn remove_contributor(env: &Env, address: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Contributor(address.clone()));
}

pub fn contributor_list(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::ContributorList)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn save_contributor_list(env: &Env, list: &Vec<Address>) {
    let key = DataKey::ContributorList;
    env.storage().persistent().set(&key, list);
    bump_persistent(env, &key);
}

pub fn balance(env: &Env, kind: &AccountKind) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(kind.clone()))
        .unwrap_or(0)
}

pub fn set_balance(env: &Env, kind: &AccountKind, amount: i128) {
    let key = DataKey::Balance(kind.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}

/// An account is "known" once any balance entry has been written for it,
/// including a zero balance after a full withdrawal.
pub fn has_balance_entry(env: &Env, kind: &AccountKind) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Balance(kind.clone()))
}

pub fn entitlement(env: &Env, holder: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Entitlement(holder.clone()))
        .unwrap_or(0)
}

pub fn set_entitlement(env: &Env, holder: &Address, amount: i128) {
    let key = DataKey::Entitlement(holder.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}

pub fn entitlement_supply(env: &Env, index: u32) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::EntitlementSupply(index))
        .unwrap_or(0)
}

pub fn set_entitlement_supply(env: &Env, index: u32, amount: i128) {
    let key = DataKey::EntitlementSupply(index);
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}

pub fn contribution(env: &Env, address: &Address, index: u32) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Contribution(address.clone(), index))
        .unwrap_or(0)
}

pub fn set_contribution(env: &Env, address: &Address, index: u32, amount: i128) {
    let key = DataKey::Contribution(address.clone(), index);
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}
