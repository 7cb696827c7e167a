//! # Fundraise Protocol Contract
//!
//! Root crate of the **phased fundraising ledger**. It exposes the single
//! Soroban contract [`FundraiseController`] whose entry points cover the full
//! fundraise lifecycle:
//!
//! | Phase          | Entry Point(s)                                        |
//! |----------------|-------------------------------------------------------|
//! | Bootstrap      | [`FundraiseController::init`]                         |
//! | Admin / roles  | `add_admin`, `remove_admin`, `renounce_admin`, `set_minter`, `set_claim_token` |
//! | Registry       | `register_contributor(s)`, `remove_contributor(s)`, pending-balance commands |
//! | Fundraise      | `start_fundraise`, `contribute`, `refund`, `switch_iteration` |
//! | Entitlements   | `mint`, `redeem_entitlement`, `clear_pending_balance` |
//! | Bank           | `deposit`, `withdraw`, `drain_vault`, `sweep_all`     |
//! | Queries        | iteration, registry, bank and entitlement accessors   |
//!
//! ## Architecture
//!
//! Authorization is fully delegated to [`access`]. Storage access is fully
//! delegated to [`storage`]. Phase, registry and bank semantics live in
//! [`schedule`], [`registry`] and [`bank`]; this file contains **only** the
//! public entry points, their cross-component composition and event
//! emissions. Fallible entry points return `Result<_, Error>`; failures
//! raised deeper in the call tree abort the invocation the same way, so
//! multi-component flows apply atomically or not at all. Every mutating
//! entry point authenticates the calling principal it receives as its first
//! argument.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, Vec};

mod access;
mod bank;
mod events;
mod registry;
mod schedule;
mod storage;
mod types;

#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_lifecycle;

pub use types::{
    AccountKind, ContributionReceipt, Contributor, FundraiseState, Iteration, ProtocolConfig,
    Ratio,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Validation
    InvalidParameter        = 1,
    ArityMismatch           = 2,
    AlreadyRegistered       = 3,
    NotRegistered           = 4,
    ReservedAddress         = 5,
    IterationNotFound       = 6,
    // Authorization
    NotAuthorized           = 7,
    AlreadyInitialized      = 8,
    // State
    AlreadyStarted          = 9,
    NotStarted              = 10,
    EmptySchedule           = 11,
    NoNextIteration         = 12,
    PhaseInactive           = 13,
    SoftCapLocked           = 14,
    SoftCapNotReached       = 15,
    MembershipActivated     = 16,
    UnredeemedEntitlements  = 17,
    // Capacity
    HardCapReached          = 18,
    TrustLimitReached       = 19,
    InsufficientBalance     = 20,
    InsufficientPhaseBalance = 21,
    InsufficientEntitlement = 22,
}

#[contract]
pub struct FundraiseController;

#[contractimpl]
impl FundraiseController {
    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract: iteration schedule, admin set, base asset
    /// and reserved principals.
    ///
    /// Must be called exactly once immediately after deployment; subsequent
    /// calls fail with `AlreadyInitialized`. The first admin must sign.
    ///
    /// - Iteration parameters are parallel vectors in phase order; at least
    ///   one iteration is required and all four vectors must agree in length.
    /// - `config.vault_address` / `config.total_address` are the reserved
    ///   ledger sentinels; they may never be deposit or withdrawal targets.
    /// - `config.escape_hatch_caller` may sweep the whole base-asset reserve
    ///   to `config.escape_hatch_destination` at any time, independent of the
    ///   admins.
    pub fn init(
        env: Env,
        admins: Vec<Address>,
        numerators: Vec<i128>,
        denominators: Vec<i128>,
        soft_caps: Vec<i128>,
        hard_caps: Vec<i128>,
        config: ProtocolConfig,
    ) -> Result<(), Error> {
        if storage::state(&env).is_some() {
            return Err(Error::AlreadyInitialized);
        }
        if admins.is_empty() {
            return Err(Error::InvalidParameter);
        }
        admins.get_unchecked(0).require_auth();

        if numerators.is_empty() {
            return Err(Error::EmptySchedule);
        }
        if numerators.len() != denominators.len()
            || numerators.len() != soft_caps.len()
            || numerators.len() != hard_caps.len()
        {
            return Err(Error::ArityMismatch);
        }
        if config.vault_address == config.total_address {
            return Err(Error::InvalidParameter);
        }

        access::init_admins(&env, &admins);
        storage::set_config(&env, &config);
        for i in 0..numerators.len() {
            schedule::add(
                &env,
                numerators.get_unchecked(i),
                denominators.get_unchecked(i),
                soft_caps.get_unchecked(i),
                hard_caps.get_unchecked(i),
            );
        }
        storage::set_state(&env, &FundraiseState::Created);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Admin set, minter, claim token
    // ─────────────────────────────────────────────────────────

    pub fn add_admin(env: Env, caller: Address, admin: Address) -> Result<(), Error> {
        access::require_admin(&env, &caller);
        access::add_admin(&env, &admin);
        Ok(())
    }

    pub fn remove_admin(env: Env, caller: Address, admin: Address) -> Result<(), Error> {
        access::require_admin(&env, &caller);
        access::remove_admin(&env, &admin);
        Ok(())
    }

    /// Give up one's own admin membership.
    pub fn renounce_admin(env: Env, caller: Address) -> Result<(), Error> {
        access::require_admin(&env, &caller);
        access::remove_admin(&env, &caller);
        Ok(())
    }

    pub fn is_admin(env: Env, address: Address) -> bool {
        access::is_admin(&env, &address)
    }

    /// Designate the minter principal: the only caller allowed to clear
    /// pending claim balances. A narrower capability than the admin set.
    pub fn set_minter(env: Env, caller: Address, minter: Address) -> Result<(), Error> {
        access::require_admin(&env, &caller);
        access::set_minter(&env, &minter);
        Ok(())
    }

    pub fn get_minter(env: Env) -> Option<Address> {
        access::minter(&env)
    }

    /// Configure the external claim asset consulted by the
    /// `MembershipActivated` guard on pending-balance mutation.
    pub fn set_claim_token(env: Env, caller: Address, token: Address) -> Result<(), Error> {
        access::require_admin(&env, &caller);
        storage::set_claim_token(&env, &token);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Trust registry
    // ─────────────────────────────────────────────────────────

    /// Admit a contributor with a trust ceiling. Emits `ContributorAdded`.
    pub fn register_contributor(
        env: Env,
        caller: Address,
        address: Address,
        max_trust: i128,
        pending_balance: i128,
    ) -> Result<(), Error> {
        access::require_admin(&env, &caller);
        registry::register(&env, &address, max_trust, pending_balance);
        Ok(())
    }

    /// Batch admission; all-or-nothing.
    pub fn register_contributors(
        env: Env,
        caller: Address,
        addresses: Vec<Address>,
        max_trusts: Vec<i128>,
        pending_balances: Vec<i128>,
    ) -> Result<(), Error> {
        access::require_admin(&env, &caller);
        registry::register_batch(&env, &addresses, &max_trusts, &pending_balances);
        Ok(())
    }

    pub fn remove_contributor(env: Env, caller: Address, address: Address) -> Result<(), Error> {
        access::require_admin(&env, &caller);
        registry::remove(&env, &address);
        Ok(())
    }

    pub fn remove_contributors(
        env: Env,
        caller: Address,
        addresses: Vec<Address>,
    ) -> Result<(), Error> {
        access::require_admin(&env, &caller);
        registry::remove_batch(&env, &addresses);
        Ok(())
    }

    pub fn set_pending_balance(
        env: Env,
        caller: Address,
        address: Address,
        value: i128,
    ) -> Result<(), Error> {
        access::require_admin(&env, &caller);
        registry::set_pending(&env, &address, value);
        Ok(())
    }

    pub fn add_pending_balance(
        env: Env,
        caller: Address,
        address: Address,
        delta: i128,
    ) -> Result<(), Error> {
        access::require_admin(&env, &caller);
        registry::add_pending(&env, &address, delta);
        Ok(())
    }

    pub fn set_pending_balances(
        env: Env,
        caller: Address,
        addresses: Vec<Address>,
        values: Vec<i128>,
    ) -> Result<(), Error> {
        access::require_admin(&env, &caller);
        registry::set_pending_batch(&env, &addresses, &values);
        Ok(())
    }

    pub fn add_pending_balances(
        env: Env,
        caller: Address,
        addresses: Vec<Address>,
        deltas: Vec<i128>,
    ) -> Result<(), Error> {
        access::require_admin(&env, &caller);
        registry::add_pending_batch(&env, &addresses, &deltas);
        Ok(())
    }

    /// Zero a contributor's pending claim balance and report the cleared
    /// amount. Restricted to the designated minter.
    pub fn clear_pending_balance(
        env: Env,
        caller: Address,
        address: Address,
    ) -> Result<i128, Error> {
        access::require_minter(&env, &caller);
        Ok(registry::clear_pending(&env, &address))
    }

    pub fn is_contributor(env: Env, address: Address) -> bool {
        registry::is_contributor(&env, &address)
    }

    pub fn get_max_trust(env: Env, address: Address) -> i128 {
        registry::max_trust_of(&env, &address)
    }

    pub fn get_pending_balance(env: Env, address: Address) -> i128 {
        registry::pending_of(&env, &address)
    }

    /// Contributor addresses in registration order.
    pub fn get_contributors(env: Env) -> Vec<Address> {
        registry::contributors(&env)
    }

    /// Full contributor records in registration order.
    pub fn get_contributor_info(env: Env) -> Vec<Contributor> {
        registry::contributor_info(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Iteration schedule
    // ─────────────────────────────────────────────────────────

    /// Append a new iteration to the schedule. Does not affect the active
    /// index.
    pub fn add_iteration(
        env: Env,
        caller: Address,
        numerator: i128,
        denominator: i128,
        soft_cap: i128,
        hard_cap: i128,
    ) -> Result<u32, Error> {
        access::require_admin(&env, &caller);
        Ok(schedule::add(&env, numerator, denominator, soft_cap, hard_cap))
    }

    pub fn get_fundraise_state(env: Env) -> FundraiseState {
        storage::state(&env).unwrap_or(FundraiseState::Created)
    }

    /// Index of the active iteration, or `None` before the fundraise starts.
    pub fn get_active_iteration(env: Env) -> Option<u32> {
        schedule::current(&env)
    }

    pub fn get_iteration_cnt(env: Env) -> u32 {
        schedule::count(&env)
    }

    pub fn get_iteration(env: Env, index: u32) -> Result<Iteration, Error> {
        Ok(schedule::load(&env, index))
    }

    /// All iterations in phase order.
    pub fn get_iterations(env: Env) -> Vec<Iteration> {
        schedule::all(&env)
    }

    /// Conversion ratio of the active iteration.
    pub fn conversion_ratio(env: Env) -> Result<Ratio, Error> {
        let (numerator, denominator) = schedule::conversion_ratio(&env);
        Ok(Ratio {
            numerator,
            denominator,
        })
    }

    pub fn is_iteration_active(env: Env, index: u32) -> bool {
        schedule::is_active(&env, index)
    }

    // ─────────────────────────────────────────────────────────
    // Fundraise lifecycle
    // ─────────────────────────────────────────────────────────

    /// Start the fundraise: `Created → Started`, activating iteration 0 and
    /// opening contribution acceptance. Callable once.
    pub fn start_fundraise(env: Env, caller: Address) -> Result<(), Error> {
        access::require_admin(&env, &caller);
        match storage::state(&env) {
            Some(FundraiseState::Created) => {}
            _ => return Err(Error::AlreadyStarted),
        }
        let index = schedule::start_first(&env);
        storage::set_state(&env, &FundraiseState::Started);
        events::fundraise_started(&env, index);
        Ok(())
    }

    /// Advance to the next iteration.
    ///
    /// The active phase must be complete: its soft cap reached and every
    /// entitlement issued against it retired. The entitlement-supply check is
    /// the cross-component invariant binding the schedule's phase index to
    /// issuance tracking.
    pub fn switch_iteration(env: Env, caller: Address) -> Result<(), Error> {
        access::require_admin(&env, &caller);
        Self::require_started(&env)?;
        let index = schedule::require_active(&env);
        let iteration = schedule::load(&env, index);
        if iteration.soft_cap_reached_at.is_none() {
            return Err(Error::SoftCapNotReached);
        }
        if storage::entitlement_supply(&env, index) != 0 {
            return Err(Error::UnredeemedEntitlements);
        }
        let next = schedule::next(&env);
        events::iteration_switched(&env, index, next);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Contribution flow
    // ─────────────────────────────────────────────────────────

    /// Contribute `amount` of the base asset against the active iteration.
    ///
    /// Admission and trust limits come from the registry, cap accounting from
    /// the schedule; only the accepted amount is pulled from the contributor,
    /// so clipped surplus never needs refunding. Reward entitlement is issued
    /// at the active conversion ratio against the contributor's cumulative
    /// phase total, so repeated contributions and partial refunds always
    /// round the same way. The full accepted/surplus/reward split is returned
    /// and emitted.
    pub fn contribute(
        env: Env,
        contributor: Address,
        amount: i128,
    ) -> Result<ContributionReceipt, Error> {
        contributor.require_auth();
        if amount <= 0 {
            return Err(Error::InvalidParameter);
        }
        Self::require_started(&env)?;
        if !registry::is_contributor(&env, &contributor) {
            return Err(Error::NotRegistered);
        }

        let headroom =
            registry::max_trust_of(&env, &contributor) - bank::balance_of(&env, &contributor);
        if headroom <= 0 {
            return Err(Error::TrustLimitReached);
        }

        let index = schedule::require_active(&env);
        let result = schedule::contribute(&env, amount.min(headroom));
        let surplus = amount - result.accepted;

        let (numerator, denominator) = schedule::conversion_ratio(&env);
        let previous = storage::contribution(&env, &contributor, index);
        let total = previous + result.accepted;
        let reward = total * numerator / denominator - previous * numerator / denominator;
        storage::set_contribution(&env, &contributor, index, total);

        bank::deposit(&env, &contributor, result.accepted);
        Self::mint_entitlement(&env, &contributor, index, reward);

        if result.soft_cap_crossed {
            events::soft_cap_reached(&env, index, env.ledger().timestamp());
        }
        events::contribution_accepted(&env, &contributor, result.accepted, surplus, reward);

        Ok(ContributionReceipt {
            accepted: result.accepted,
            surplus,
            reward,
        })
    }

    /// Reverse a contribution of `amount` base units before the active
    /// iteration's soft cap is reached; the matching entitlement is burned
    /// and the base asset paid back.
    ///
    /// The burn is the difference between the entitlement owed for the old
    /// and the new cumulative phase total, so after a full refund (in any
    /// number of steps) exactly the minted amount has been burned.
    pub fn refund(env: Env, contributor: Address, amount: i128) -> Result<(), Error> {
        contributor.require_auth();
        if amount <= 0 {
            return Err(Error::InvalidParameter);
        }
        Self::require_started(&env)?;
        let index = schedule::require_active(&env);

        let previous = storage::contribution(&env, &contributor, index);
        if amount > previous {
            return Err(Error::InsufficientPhaseBalance);
        }
        let remaining = previous - amount;
        let (numerator, denominator) = schedule::conversion_ratio(&env);
        let reward_burned =
            previous * numerator / denominator - remaining * numerator / denominator;

        schedule::redeem(&env, amount);
        Self::burn_entitlement(&env, &contributor, index, reward_burned)?;
        storage::set_contribution(&env, &contributor, index, remaining);
        bank::withdraw(&env, &contributor, amount);

        events::contribution_refunded(&env, &contributor, amount, reward_burned);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Entitlements
    // ─────────────────────────────────────────────────────────

    /// Issue reward entitlement against the active iteration directly.
    /// The holder must be a registered contributor: retiring the supply goes
    /// through `redeem_entitlement`, which settles into the registry's
    /// pending balance, so an unregistered holder would strand the supply
    /// and block `switch_iteration` forever.
    pub fn mint(env: Env, caller: Address, to: Address, amount: i128) -> Result<(), Error> {
        access::require_admin(&env, &caller);
        if amount <= 0 {
            return Err(Error::InvalidParameter);
        }
        if !registry::is_contributor(&env, &to) {
            return Err(Error::NotRegistered);
        }
        let index = schedule::require_active(&env);
        Self::mint_entitlement(&env, &to, index, amount);
        events::entitlement_minted(&env, &to, index, amount);
        Ok(())
    }

    /// Retire `amount` of the caller's entitlement: the backing base asset
    /// moves from the contributor's bank account into the vault bucket and
    /// the claim amount is credited as a pending balance for the minter to
    /// settle. Returns the base amount committed.
    pub fn redeem_entitlement(
        env: Env,
        contributor: Address,
        amount: i128,
    ) -> Result<i128, Error> {
        contributor.require_auth();
        if amount <= 0 {
            return Err(Error::InvalidParameter);
        }
        Self::require_started(&env)?;
        let index = schedule::require_active(&env);
        let (numerator, denominator) = schedule::conversion_ratio(&env);
        let base_amount = amount * denominator / numerator;

        Self::burn_entitlement(&env, &contributor, index, amount)?;
        bank::move_to_vault(&env, &contributor, base_amount);
        registry::credit_pending(&env, &contributor, amount);

        events::entitlement_redeemed(&env, &contributor, amount, base_amount);
        Ok(base_amount)
    }

    pub fn get_entitlement(env: Env, holder: Address) -> i128 {
        storage::entitlement(&env, &holder)
    }

    /// Outstanding entitlement supply issued against iteration `index`.
    pub fn get_entitlement_supply(env: Env, index: u32) -> i128 {
        storage::entitlement_supply(&env, index)
    }

    // ─────────────────────────────────────────────────────────
    // Settlement bank
    // ─────────────────────────────────────────────────────────

    /// Pull `amount` of the base asset from `from` into its bank account.
    /// Both the admin and the account owner must sign: the token transfer
    /// out of `from` requires the owner's authorization.
    pub fn deposit(env: Env, caller: Address, from: Address, amount: i128) -> Result<(), Error> {
        access::require_admin(&env, &caller);
        from.require_auth();
        bank::deposit(&env, &from, amount);
        events::deposited(&env, &from, amount);
        Ok(())
    }

    /// Pay `amount` of the base asset back out of `to`'s bank account.
    pub fn withdraw(env: Env, caller: Address, to: Address, amount: i128) -> Result<(), Error> {
        access::require_admin(&env, &caller);
        bank::withdraw(&env, &to, amount);
        events::withdrawn(&env, &to, amount);
        Ok(())
    }

    /// Pay the whole vault bucket out to the configured drain receiver.
    pub fn drain_vault(env: Env, caller: Address) -> Result<i128, Error> {
        access::require_admin(&env, &caller);
        let amount = bank::drain_vault(&env);
        events::vault_drained(&env, &storage::drain_receiver(&env), amount);
        Ok(amount)
    }

    /// Emergency sweep of the contract's entire base-asset reserve to the
    /// escape-hatch destination. Restricted to the escape-hatch caller;
    /// deliberately independent of the admin set.
    pub fn sweep_all(env: Env, caller: Address) -> Result<i128, Error> {
        access::require_escape_caller(&env, &caller);
        let amount = bank::sweep_all(&env);
        events::escape_hatch_swept(&env, &storage::escape_destination(&env), amount);
        Ok(amount)
    }

    pub fn get_token_balance(env: Env, address: Address) -> i128 {
        bank::balance_of(&env, &address)
    }

    pub fn is_account(env: Env, address: Address) -> bool {
        bank::is_account(&env, &address)
    }

    // ─────────────────────────────────────────────────────────
    // Internal composition helpers
    // ─────────────────────────────────────────────────────────

    fn require_started(env: &Env) -> Result<(), Error> {
        match storage::state(env) {
            Some(FundraiseState::Started) => Ok(()),
            _ => Err(Error::NotStarted),
        }
    }

    fn mint_entitlement(env: &Env, to: &Address, index: u32, amount: i128) {
        if amount == 0 {
            return;
        }
        storage::set_entitlement(env, to, storage::entitlement(env, to) + amount);
        storage::set_entitlement_supply(
            env,
            index,
            storage::entitlement_supply(env, index) + amount,
        );
    }

    fn burn_entitlement(env: &Env, from: &Address, index: u32, amount: i128) -> Result<(), Error> {
        if amount == 0 {
            return Ok(());
        }
        let held = storage::entitlement(env, from);
        if amount > held {
            return Err(Error::InsufficientEntitlement);
        }
        storage::set_entitlement(env, from, held - amount);
        storage::set_entitlement_supply(
            env,
            index,
            storage::entitlement_supply(env, index) - amount,
        );
        Ok(())
    }
}
