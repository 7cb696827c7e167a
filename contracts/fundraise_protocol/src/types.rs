//! # Types
//!
//! Shared data structures used across all modules of the fundraise protocol.
//!
//! ## Design decisions
//!
//! ### Account kinds instead of sentinel constants
//!
//! The settlement bank keeps two reserved bookkeeping buckets besides the
//! normal per-contributor accounts: a `Vault` that accumulates committed
//! capital and a `Total` accumulator mirroring overall inflow. Rather than
//! comparing against magic addresses, the ledger is keyed by the closed
//! [`AccountKind`] variant; the two reserved principal addresses configured
//! at `init` map onto `Vault` / `Total` and are rejected as deposit or
//! withdrawal targets.
//!
//! ### Fundraise lifecycle as a Finite-State Machine
//!
//! [`FundraiseState`] enforces a strict forward-only lifecycle:
//!
//! ```text
//! Created ──► Started
//! ```
//!
//! The transition happens exactly once (`start_fundraise`); contribution
//! acceptance is gated on `Started`.

use soroban_sdk::{contracttype, Address};

/// Base asset and principal configuration, fixed at `init`.
///
/// Bundled into one value because Soroban entry points accept at most ten
/// arguments and `init` also takes the admin set and the iteration vectors.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtocolConfig {
    /// Settlement (base) asset contract.
    pub base_token: Address,
    /// Reserved principal classified as [`AccountKind::Vault`].
    pub vault_address: Address,
    /// Reserved principal classified as [`AccountKind::Total`].
    pub total_address: Address,
    /// Receives the vault bucket when it is drained.
    pub drain_vault_receiver: Address,
    /// May sweep the contract's whole base-asset holding at any time.
    pub escape_hatch_caller: Address,
    /// Receives swept funds.
    pub escape_hatch_destination: Address,
}

/// Lifecycle state of the fundraise as a whole.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FundraiseState {
    /// Deployed and configured, not yet accepting contributions.
    Created,
    /// First iteration running; contributions accepted.
    Started,
}

/// A single fundraising phase with its own conversion rate and caps.
///
/// Appended by an admin, mutated only while it is the active iteration,
/// never deleted. `total_received` moves up through `contribute` and down
/// through `redeem` only.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Iteration {
    /// Conversion rate numerator (reward units per `denominator` base units).
    pub numerator: i128,
    /// Conversion rate denominator.
    pub denominator: i128,
    /// Threshold beyond which the phase is deemed committed; reaching it
    /// locks redemption for the rest of the phase.
    pub soft_cap: i128,
    /// Absolute ceiling the phase's received amount cannot exceed.
    pub hard_cap: i128,
    /// Base-asset amount currently held against this phase.
    pub total_received: i128,
    /// Ledger timestamp of the first contribution that crossed the soft cap.
    /// Set at most once; never cleared.
    pub soft_cap_reached_at: Option<u64>,
}

/// An admitted contributor, owned exclusively by the trust registry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contributor {
    /// Principal identity of the contributor.
    pub address: Address,
    /// Ceiling on the contributor's settled base-asset holding.
    pub max_trust: i128,
    /// Claim-asset amount provisionally credited, awaiting settlement by
    /// the designated minter.
    pub pending_balance: i128,
}

/// Ledger account classification.
///
/// `Vault` and `Total` are reserved bookkeeping buckets; only `Normal`
/// accounts can be deposit or withdrawal targets.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AccountKind {
    /// A regular per-contributor account.
    Normal(Address),
    /// Committed capital, paid out only through `drain_vault`.
    Vault,
    /// Accumulator mirroring total bank inflow minus outflow.
    Total,
}

/// Active conversion ratio, as returned by `conversion_ratio`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ratio {
    pub numerator: i128,
    pub denominator: i128,
}

/// Outcome of a contribution, reported back to the caller.
///
/// `accepted + surplus` always equals the requested amount: value clipped by
/// the trust limit or the phase hard cap is reported, never silently dropped.
/// Only the accepted amount is pulled from the contributor.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionReceipt {
    /// Base-asset amount credited against the active iteration.
    pub accepted: i128,
    /// Requested amount that was not accepted (trust or cap headroom).
    pub surplus: i128,
    /// Reward-asset entitlement issued for the accepted amount.
    pub reward: i128,
}
