//! # Iteration schedule
//!
//! Ordered list of fundraising phases and the active-index state machine.
//! The index only moves forward: `start_first` sets it to 0 exactly once,
//! `next` advances by one and never skips or resets.
//!
//! Cap accounting lives here so the controller can reuse it for both the
//! forward flow (`contribute`) and the reversal flow (`redeem`); whether a
//! phase is *complete* (soft cap reached, entitlements retired) is the
//! controller's concern, checked before it calls [`next`].

use soroban_sdk::{panic_with_error, Env, Vec};

use crate::types::Iteration;
use crate::{storage, Error};

/// Result of a cap-checked contribution.
pub struct Accepted {
    /// Amount credited against the active iteration.
    pub accepted: i128,
    /// Amount over the hard cap, reported back instead of dropped.
    pub surplus: i128,
    /// True iff this contribution crossed the soft cap for the first time.
    pub soft_cap_crossed: bool,
}

/// Append a new iteration. Does not touch the active index.
pub fn add(env: &Env, numerator: i128, denominator: i128, soft_cap: i128, hard_cap: i128) -> u32 {
    if numerator <= 0 || denominator <= 0 || soft_cap < 0 || soft_cap > hard_cap {
        panic_with_error!(env, Error::InvalidParameter);
    }
    let index = storage::iteration_count(env);
    storage::save_iteration(
        env,
        index,
        &Iteration {
            numerator,
            denominator,
            soft_cap,
            hard_cap,
            total_received: 0,
            soft_cap_reached_at: None,
        },
    );
    storage::set_iteration_count(env, index + 1);
    index
}

/// Activate iteration 0. Callable once per schedule lifetime.
pub fn start_first(env: &Env) -> u32 {
    if storage::active_iteration(env).is_some() {
        panic_with_error!(env, Error::AlreadyStarted);
    }
    if storage::iteration_count(env) == 0 {
        panic_with_error!(env, Error::EmptySchedule);
    }
    storage::set_active_iteration(env, 0);
    0
}

/// Advance the active index by one.
pub fn next(env: &Env) -> u32 {
    let current = match storage::active_iteration(env) {
        Some(index) => index,
        None => panic_with_error!(env, Error::NoNextIteration),
    };
    if current + 1 >= storage::iteration_count(env) {
        panic_with_error!(env, Error::NoNextIteration);
    }
    storage::set_active_iteration(env, current + 1);
    current + 1
}

/// Index of the active iteration, failing with `PhaseInactive` if none.
pub fn require_active(env: &Env) -> u32 {
    match storage::active_iteration(env) {
        Some(index) => index,
        None => panic_with_error!(env, Error::PhaseInactive),
    }
}

/// Cap-checked contribution against the active iteration.
///
/// Accepts up to the remaining hard-cap headroom and reports the rest as
/// surplus. Stamps the soft-cap timestamp exactly once, on the first
/// contribution that lifts `total_received` to or above the soft cap.
pub fn contribute(env: &Env, amount: i128) -> Accepted {
    if amount <= 0 {
        panic_with_error!(env, Error::InvalidParameter);
    }
    let index = require_active(env);
    let mut iteration = load(env, index);

    let remaining = iteration.hard_cap - iteration.total_received;
    if remaining == 0 {
        panic_with_error!(env, Error::HardCapReached);
    }
    let accepted = amount.min(remaining);
    let surplus = amount - accepted;

    iteration.total_received += accepted;
    let mut soft_cap_crossed = false;
    if iteration.soft_cap_reached_at.is_none() && iteration.total_received >= iteration.soft_cap {
        iteration.soft_cap_reached_at = Some(env.ledger().timestamp());
        soft_cap_crossed = true;
    }
    storage::save_iteration(env, index, &iteration);

    Accepted {
        accepted,
        surplus,
        soft_cap_crossed,
    }
}

/// Reverse a contribution before the phase is committed.
///
/// Once the soft cap is reached the phase is economically "successful" and
/// redemption is locked for good.
pub fn redeem(env: &Env, amount: i128) {
    if amount <= 0 {
        panic_with_error!(env, Error::InvalidParameter);
    }
    let index = require_active(env);
    let mut iteration = load(env, index);

    if iteration.soft_cap_reached_at.is_some() {
        panic_with_error!(env, Error::SoftCapLocked);
    }
    if amount > iteration.total_received {
        panic_with_error!(env, Error::InsufficientPhaseBalance);
    }
    iteration.total_received -= amount;
    storage::save_iteration(env, index, &iteration);
}

pub fn current(env: &Env) -> Option<u32> {
    storage::active_iteration(env)
}

/// Conversion ratio of the active iteration.
pub fn conversion_ratio(env: &Env) -> (i128, i128) {
    let iteration = load(env, require_active(env));
    (iteration.numerator, iteration.denominator)
}

/// True iff `index` is the designated current phase. Independent of whether
/// the phase still accepts contributions.
pub fn is_active(env: &Env, index: u32) -> bool {
    storage::active_iteration(env) == Some(index)
}

pub fn count(env: &Env) -> u32 {
    storage::iteration_count(env)
}

pub fn load(env: &Env, index: u32) -> Iteration {
    match storage::load_iteration(env, index) {
        Some(iteration) => iteration,
        None => panic_with_error!(env, Error::IterationNotFound),
    }
}

/// All iterations in phase order.
pub fn all(env: &Env) -> Vec<Iteration> {
    let mut iterations = Vec::new(env);
    for index in 0..storage::iteration_count(env) {
        iterations.push_back(load(env, index));
    }
    iterations
}
