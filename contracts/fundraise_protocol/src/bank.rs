//! # Settlement bank
//!
//! Per-account ledger of the base asset, backed by the contract's actual
//! token holding. Three account kinds exist (see [`AccountKind`]): normal
//! per-contributor accounts, the `Vault` bucket of committed capital, and
//! the `Total` accumulator mirroring overall inflow.
//!
//! Invariant across all operations:
//! `balance(Total) == sum of balance(Normal(_)) + balance(Vault)`.
//!
//! The escape hatch (`sweep_all`) is the one path that moves tokens without
//! touching the internal ledger; it exists for catastrophic recovery only.

use soroban_sdk::{panic_with_error, token, Address, Env};

use crate::types::AccountKind;
use crate::{storage, Error};

/// Classify an address against the configured reserved principals.
pub fn account_kind(env: &Env, address: &Address) -> AccountKind {
    if *address == storage::vault_address(env) {
        AccountKind::Vault
    } else if *address == storage::total_address(env) {
        AccountKind::Total
    } else {
        AccountKind::Normal(address.clone())
    }
}

/// Classify and reject reserved sentinels.
fn require_normal(env: &Env, address: &Address) -> AccountKind {
    match account_kind(env, address) {
        kind @ AccountKind::Normal(_) => kind,
        _ => panic_with_error!(env, Error::ReservedAddress),
    }
}

/// Pull `amount` of the base asset from `from` and credit its account.
pub fn deposit(env: &Env, from: &Address, amount: i128) {
    if amount <= 0 {
        panic_with_error!(env, Error::InvalidParameter);
    }
    let kind = require_normal(env, from);
    token::Client::new(env, &storage::base_token(env)).transfer(
        from,
        &env.current_contract_address(),
        &amount,
    );
    credit(env, &kind, amount);
    credit(env, &AccountKind::Total, amount);
}

/// Debit `to`'s account and pay the base asset back out.
pub fn withdraw(env: &Env, to: &Address, amount: i128) {
    if amount <= 0 {
        panic_with_error!(env, Error::InvalidParameter);
    }
    let kind = require_normal(env, to);
    debit(env, &kind, amount);
    debit(env, &AccountKind::Total, amount);
    token::Client::new(env, &storage::base_token(env)).transfer(
        &env.current_contract_address(),
        to,
        &amount,
    );
}

/// Move committed capital from a normal account into the vault bucket.
/// Tokens stay in the contract; `Total` is unchanged.
pub fn move_to_vault(env: &Env, from: &Address, amount: i128) {
    if amount <= 0 {
        panic_with_error!(env, Error::InvalidParameter);
    }
    let kind = require_normal(env, from);
    debit(env, &kind, amount);
    credit(env, &AccountKind::Vault, amount);
}

/// Pay the whole vault bucket out to the configured drain receiver.
pub fn drain_vault(env: &Env) -> i128 {
    let amount = storage::balance(env, &AccountKind::Vault);
    if amount > 0 {
        storage::set_balance(env, &AccountKind::Vault, 0);
        debit(env, &AccountKind::Total, amount);
        token::Client::new(env, &storage::base_token(env)).transfer(
            &env.current_contract_address(),
            &storage::drain_receiver(env),
            &amount,
        );
    }
    amount
}

/// Transfer the contract's entire base-asset holding to the escape-hatch
/// destination. Internal bookkeeping is deliberately left untouched; this is
/// a last-resort recovery path, not an accounting operation.
pub fn sweep_all(env: &Env) -> i128 {
    let client = token::Client::new(env, &storage::base_token(env));
    let held = client.balance(&env.current_contract_address());
    if held > 0 {
        client.transfer(
            &env.current_contract_address(),
            &storage::escape_destination(env),
            &held,
        );
    }
    held
}

/// Ledger balance of `address`. Reserved principals report their bucket.
pub fn balance_of(env: &Env, address: &Address) -> i128 {
    storage::balance(env, &account_kind(env, address))
}

/// True once any balance entry was ever written for the address, including
/// a zero balance after a full withdrawal.
pub fn is_account(env: &Env, address: &Address) -> bool {
    storage::has_balance_entry(env, &account_kind(env, address))
}

fn credit(env: &Env, kind: &AccountKind, amount: i128) {
    storage::set_balance(env, kind, storage::balance(env, kind) + amount);
}

fn debit(env: &Env, kind: &AccountKind, amount: i128) {
    let held = storage::balance(env, kind);
    if amount > held {
        panic_with_error!(env, Error::InsufficientBalance);
    }
    storage::set_balance(env, kind, held - amount);
}
