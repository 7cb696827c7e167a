//! # Events
//!
//! Payload structs and publish helpers for every observable state change.
//! Topics are short symbols plus the affected principal or iteration index,
//! so an off-chain consumer can filter without decoding payloads.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// A contributor was admitted to the trust registry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributorAdded {
    pub address: Address,
    pub max_trust: i128,
}

/// A contributor's admission was revoked. Ledger balances are retained.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributorRemoved {
    pub address: Address,
}

/// A pending claim balance was set or adjusted by an admin.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingBalanceChanged {
    pub address: Address,
    pub pending_balance: i128,
}

/// The minter settled and cleared a pending claim balance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingBalanceCleared {
    pub address: Address,
    pub cleared: i128,
}

/// The fundraise left `Created` and the first iteration went active.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundraiseStarted {
    pub iteration: u32,
}

/// The active iteration advanced.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IterationSwitched {
    pub from: u32,
    pub to: u32,
}

/// The active iteration crossed its soft cap for the first time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SoftCapReached {
    pub iteration: u32,
    pub at: u64,
}

/// A contribution was accepted, with the clipped surplus reported.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionAccepted {
    pub contributor: Address,
    pub accepted: i128,
    pub surplus: i128,
    pub reward: i128,
}

/// A pre-lock contribution was reversed and paid back.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionRefunded {
    pub contributor: Address,
    pub amount: i128,
    pub reward_burned: i128,
}

/// Reward entitlement was issued against the active iteration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntitlementMinted {
    pub to: Address,
    pub iteration: u32,
    pub amount: i128,
}

/// Entitlement was retired; the backing base amount moved to the vault.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntitlementRedeemed {
    pub contributor: Address,
    pub amount: i128,
    pub base_amount: i128,
}

/// Base asset entered a bank account.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposited {
    pub account: Address,
    pub amount: i128,
}

/// Base asset left a bank account.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawn {
    pub account: Address,
    pub amount: i128,
}

/// The vault bucket was paid out to the configured receiver.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultDrained {
    pub receiver: Address,
    pub amount: i128,
}

/// The escape hatch moved the entire base-asset reserve out.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscapeHatchSwept {
    pub destination: Address,
    pub amount: i128,
}

pub fn contributor_added(env: &Env, address: &Address, max_trust: i128) {
    env.events().publish(
        (symbol_short!("added"), address.clone()),
        ContributorAdded {
            address: address.clone(),
            max_trust,
        },
    );
}

pub fn contributor_removed(env: &Env, address: &Address) {
    env.events().publish(
        (symbol_short!("removed"), address.clone()),
        ContributorRemoved {
            address: address.clone(),
        },
    );
}

pub fn pending_balance_changed(env: &Env, address: &Address, pending_balance: i128) {
    env.events().publish(
        (symbol_short!("pending"), address.clone()),
        PendingBalanceChanged {
            address: address.clone(),
            pending_balance,
        },
    );
}

pub fn pending_balance_cleared(env: &Env, address: &Address, cleared: i128) {
    env.events().publish(
        (symbol_short!("cleared"), address.clone()),
        PendingBalanceCleared {
            address: address.clone(),
            cleared,
        },
    );
}

pub fn fundraise_started(env: &Env, iteration: u32) {
    env.events().publish(
        (symbol_short!("started"),),
        FundraiseStarted { iteration },
    );
}

pub fn iteration_switched(env: &Env, from: u32, to: u32) {
    env.events()
        .publish((symbol_short!("switched"), to), IterationSwitched { from, to });
}

pub fn soft_cap_reached(env: &Env, iteration: u32, at: u64) {
    env.events().publish(
        (symbol_short!("softcap"), iteration),
        SoftCapReached { iteration, at },
    );
}

pub fn contribution_accepted(
    env: &Env,
    contributor: &Address,
    accepted: i128,
    surplus: i128,
    reward: i128,
) {
    env.events().publish(
        (symbol_short!("contrib"), contributor.clone()),
        ContributionAccepted {
            contributor: contributor.clone(),
            accepted,
            surplus,
            reward,
        },
    );
}

pub fn contribution_refunded(env: &Env, contributor: &Address, amount: i128, reward_burned: i128) {
    env.events().publish(
        (symbol_short!("refund"), contributor.clone()),
        ContributionRefunded {
            contributor: contributor.clone(),
            amount,
            reward_burned,
        },
    );
}

pub fn entitlement_minted(env: &Env, to: &Address, iteration: u32, amount: i128) {
    env.events().publish(
        (symbol_short!("ent_mint"), to.clone()),
        EntitlementMinted {
            to: to.clone(),
            iteration,
            amount,
        },
    );
}

pub fn entitlement_redeemed(env: &Env, contributor: &Address, amount: i128, base_amount: i128) {
    env.events().publish(
        (symbol_short!("ent_rdm"), contributor.clone()),
        EntitlementRedeemed {
            contributor: contributor.clone(),
            amount,
            base_amount,
        },
    );
}

pub fn deposited(env: &Env, account: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("deposit"), account.clone()),
        Deposited {
            account: account.clone(),
            amount,
        },
    );
}

pub fn withdrawn(env: &Env, account: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("withdraw"), account.clone()),
        Withdrawn {
            account: account.clone(),
            amount,
        },
    );
}

pub fn vault_drained(env: &Env, receiver: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("drained"),),
        VaultDrained {
            receiver: receiver.clone(),
            amount,
        },
    );
}

pub fn escape_hatch_swept(env: &Env, destination: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("swept"),),
        EscapeHatchSwept {
            destination: destination.clone(),
            amount,
        },
    );
}
