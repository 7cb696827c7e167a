extern crate std;

use soroban_sdk::{testutils::Address as _, token, vec, Address, Env, Vec};

use crate::{
    Error, FundraiseController, FundraiseControllerClient, FundraiseState, ProtocolConfig,
};

struct Ctx {
    env: Env,
    client: FundraiseControllerClient<'static>,
    admin: Address,
    base_sac: token::StellarAssetClient<'static>,
}

fn amounts(env: &Env, values: &[i128]) -> Vec<i128> {
    let mut v = Vec::new(env);
    for value in values {
        v.push_back(*value);
    }
    v
}

/// The five-iteration production schedule used by the deployment fixtures.
const NUMERATORS: [i128; 5] = [5, 2, 3, 5, 1];
const DENOMINATORS: [i128; 5] = [2, 1, 2, 4, 1];
const SOFT_CAPS: [i128; 5] = [984_000, 796_000, 1_170_000, 820_000, 2_950_000];
const HARD_CAPS: [i128; 5] = [1_250_000, 1_000_000, 1_500_000, 1_000_000, 3_750_000];

fn setup() -> Ctx {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(FundraiseController, ());
    let client = FundraiseControllerClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);

    client.init(
        &vec![&env, admin.clone()],
        &amounts(&env, &NUMERATORS),
        &amounts(&env, &DENOMINATORS),
        &amounts(&env, &SOFT_CAPS),
        &amounts(&env, &HARD_CAPS),
        &ProtocolConfig {
            base_token: sac.address(),
            vault_address: Address::generate(&env),
            total_address: Address::generate(&env),
            drain_vault_receiver: Address::generate(&env),
            escape_hatch_caller: Address::generate(&env),
            escape_hatch_destination: Address::generate(&env),
        },
    );

    Ctx {
        base_sac: token::StellarAssetClient::new(&env, &sac.address()),
        env,
        client,
        admin,
    }
}

/// Build an uninitialised contract and attempt `init` with the given shape,
/// expecting `expected`.
fn expect_init_error(
    admin_count: u32,
    numerators: &[i128],
    denominators: &[i128],
    soft_caps: &[i128],
    hard_caps: &[i128],
    vault_equals_total: bool,
    expected: Error,
) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(FundraiseController, ());
    let client = FundraiseControllerClient::new(&env, &contract_id);
    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);

    let mut admins = Vec::new(&env);
    for _ in 0..admin_count {
        admins.push_back(Address::generate(&env));
    }
    let vault = Address::generate(&env);
    let total = if vault_equals_total {
        vault.clone()
    } else {
        Address::generate(&env)
    };

    let result = client.try_init(
        &admins,
        &amounts(&env, numerators),
        &amounts(&env, denominators),
        &amounts(&env, soft_caps),
        &amounts(&env, hard_caps),
        &ProtocolConfig {
            base_token: sac.address(),
            vault_address: vault,
            total_address: total,
            drain_vault_receiver: Address::generate(&env),
            escape_hatch_caller: Address::generate(&env),
            escape_hatch_destination: Address::generate(&env),
        },
    );
    assert_eq!(result, Err(Ok(expected)));
}

#[test]
fn test_init_requires_iterations() {
    expect_init_error(1, &[], &[], &[], &[], false, Error::EmptySchedule);
}

#[test]
fn test_init_requires_matching_parameter_arity() {
    expect_init_error(
        1,
        &[1, 2, 3, 4],
        &[10],
        &[1_000, 2_000, 3_000, 4_000],
        &[10_000, 20_000, 30_000, 40_000],
        false,
        Error::ArityMismatch,
    );
}

#[test]
fn test_init_requires_admins() {
    expect_init_error(
        0,
        &[1],
        &[1],
        &[1_000],
        &[10_000],
        false,
        Error::InvalidParameter,
    );
}

#[test]
fn test_init_rejects_colliding_sentinels() {
    expect_init_error(
        1,
        &[1],
        &[1],
        &[1_000],
        &[10_000],
        true,
        Error::InvalidParameter,
    );
}

#[test]
fn test_init_callable_once() {
    let ctx = setup();
    let token_admin = Address::generate(&ctx.env);
    let sac = ctx.env.register_stellar_asset_contract_v2(token_admin);

    let result = ctx.client.try_init(
        &vec![&ctx.env, ctx.admin.clone()],
        &amounts(&ctx.env, &[1]),
        &amounts(&ctx.env, &[1]),
        &amounts(&ctx.env, &[1_000]),
        &amounts(&ctx.env, &[10_000]),
        &ProtocolConfig {
            base_token: sac.address(),
            vault_address: Address::generate(&ctx.env),
            total_address: Address::generate(&ctx.env),
            drain_vault_receiver: Address::generate(&ctx.env),
            escape_hatch_caller: Address::generate(&ctx.env),
            escape_hatch_destination: Address::generate(&ctx.env),
        },
    );
    assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
}

#[test]
fn test_starting_state() {
    let ctx = setup();
    assert_eq!(ctx.client.get_fundraise_state(), FundraiseState::Created);
    assert_eq!(ctx.client.get_active_iteration(), None);
    assert!(!ctx.client.is_iteration_active(&0));
}

#[test]
fn test_deployed_with_configured_iterations() {
    let ctx = setup();
    assert_eq!(ctx.client.get_iteration_cnt(), 5);

    let iterations = ctx.client.get_iterations();
    assert_eq!(iterations.len(), 5);
    for i in 0..iterations.len() {
        let iteration = iterations.get_unchecked(i);
        assert_eq!(iteration.numerator, NUMERATORS[i as usize]);
        assert_eq!(iteration.denominator, DENOMINATORS[i as usize]);
        assert_eq!(iteration.soft_cap, SOFT_CAPS[i as usize]);
        assert_eq!(iteration.hard_cap, HARD_CAPS[i as usize]);
        assert_eq!(iteration.total_received, 0);
        assert_eq!(iteration.soft_cap_reached_at, None);
    }
}

#[test]
fn test_start_fundraise() {
    let ctx = setup();

    let other = Address::generate(&ctx.env);
    assert_eq!(
        ctx.client.try_start_fundraise(&other),
        Err(Ok(Error::NotAuthorized))
    );

    ctx.client.start_fundraise(&ctx.admin);
    assert_eq!(ctx.client.get_fundraise_state(), FundraiseState::Started);
    assert_eq!(ctx.client.get_active_iteration(), Some(0));
    assert!(ctx.client.is_iteration_active(&0));

    assert_eq!(
        ctx.client.try_start_fundraise(&ctx.admin),
        Err(Ok(Error::AlreadyStarted))
    );
}

#[test]
fn test_switch_requires_soft_cap() {
    let ctx = setup();
    ctx.client.start_fundraise(&ctx.admin);

    assert_eq!(
        ctx.client.try_switch_iteration(&ctx.admin),
        Err(Ok(Error::SoftCapNotReached))
    );
}

#[test]
fn test_switch_requires_all_entitlements_redeemed() {
    let ctx = setup();
    ctx.client.start_fundraise(&ctx.admin);

    let contributor = Address::generate(&ctx.env);
    ctx.client
        .register_contributor(&ctx.admin, &contributor, &10_000_000, &0);
    ctx.base_sac.mint(&contributor, &10_000_000);

    // Clear the soft cap; the issued entitlement is still outstanding.
    ctx.client.contribute(&contributor, &SOFT_CAPS[0]);

    assert_eq!(
        ctx.client.try_switch_iteration(&ctx.admin),
        Err(Ok(Error::UnredeemedEntitlements))
    );
}

#[test]
fn test_admin_mint_blocks_switch() {
    let ctx = setup();
    ctx.client.start_fundraise(&ctx.admin);

    let contributor = Address::generate(&ctx.env);
    ctx.client
        .register_contributor(&ctx.admin, &contributor, &10_000_000, &0);
    ctx.base_sac.mint(&contributor, &10_000_000);
    ctx.client.contribute(&contributor, &SOFT_CAPS[0]);
    ctx.client
        .redeem_entitlement(&contributor, &ctx.client.get_entitlement(&contributor));

    // Admin-issued entitlement alone keeps the phase open.
    let holder = Address::generate(&ctx.env);
    ctx.client
        .register_contributor(&ctx.admin, &holder, &1_000, &0);
    ctx.client.mint(&ctx.admin, &holder, &1_000_000);
    assert_eq!(ctx.client.get_entitlement_supply(&0), 1_000_000);

    assert_eq!(
        ctx.client.try_switch_iteration(&ctx.admin),
        Err(Ok(Error::UnredeemedEntitlements))
    );
}

#[test]
fn test_mint_requires_registered_holder() {
    let ctx = setup();
    ctx.client.start_fundraise(&ctx.admin);

    // Entitlement for a stranger could never be retired through redemption,
    // so issuance is refused up front.
    let stranger = Address::generate(&ctx.env);
    assert_eq!(
        ctx.client.try_mint(&ctx.admin, &stranger, &100),
        Err(Ok(Error::NotRegistered))
    );
    assert_eq!(ctx.client.get_entitlement_supply(&0), 0);
}

#[test]
fn test_full_iteration_handover() {
    let ctx = setup();
    ctx.client.start_fundraise(&ctx.admin);

    let contributor = Address::generate(&ctx.env);
    ctx.client
        .register_contributor(&ctx.admin, &contributor, &10_000_000, &0);
    ctx.base_sac.mint(&contributor, &10_000_000);

    // Iteration 0: ratio 5/2, soft cap 984_000.
    let receipt = ctx.client.contribute(&contributor, &984_000);
    assert_eq!(receipt.accepted, 984_000);
    assert_eq!(receipt.reward, 984_000 * 5 / 2);

    let base_committed = ctx
        .client
        .redeem_entitlement(&contributor, &receipt.reward);
    assert_eq!(base_committed, receipt.reward * 2 / 5);
    assert_eq!(ctx.client.get_entitlement_supply(&0), 0);
    assert_eq!(
        ctx.client.get_pending_balance(&contributor),
        receipt.reward
    );

    ctx.client.switch_iteration(&ctx.admin);
    assert_eq!(ctx.client.get_active_iteration(), Some(1));
    assert!(!ctx.client.is_iteration_active(&0));
    assert!(ctx.client.is_iteration_active(&1));

    // The new phase starts with a clean received total.
    assert_eq!(ctx.client.get_iteration(&1).total_received, 0);
    let ratio = ctx.client.conversion_ratio();
    assert_eq!(ratio.numerator, 2);
    assert_eq!(ratio.denominator, 1);
}

#[test]
fn test_redeem_entitlement_requires_holding() {
    let ctx = setup();
    ctx.client.start_fundraise(&ctx.admin);

    let contributor = Address::generate(&ctx.env);
    ctx.client
        .register_contributor(&ctx.admin, &contributor, &10_000_000, &0);
    ctx.base_sac.mint(&contributor, &10_000_000);

    let receipt = ctx.client.contribute(&contributor, &100_000);
    assert_eq!(
        ctx.client
            .try_redeem_entitlement(&contributor, &(receipt.reward + 1)),
        Err(Ok(Error::InsufficientEntitlement))
    );
}

#[test]
fn test_minter_settles_redeemed_entitlements() {
    let ctx = setup();
    ctx.client.start_fundraise(&ctx.admin);

    let contributor = Address::generate(&ctx.env);
    ctx.client
        .register_contributor(&ctx.admin, &contributor, &10_000_000, &0);
    ctx.base_sac.mint(&contributor, &10_000_000);

    let receipt = ctx.client.contribute(&contributor, &400_000);
    ctx.client
        .redeem_entitlement(&contributor, &receipt.reward);

    let minter = Address::generate(&ctx.env);
    ctx.client.set_minter(&ctx.admin, &minter);
    let cleared = ctx.client.clear_pending_balance(&minter, &contributor);
    assert_eq!(cleared, receipt.reward);
    assert_eq!(ctx.client.get_pending_balance(&contributor), 0);
}
