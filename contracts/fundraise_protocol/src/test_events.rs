extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    token, vec, Address, Env, IntoVal, TryIntoVal, Vec,
};

use crate::events::{
    ContributionAccepted, ContributorAdded, EntitlementRedeemed, EscapeHatchSwept,
    FundraiseStarted, SoftCapReached,
};
use crate::{FundraiseController, FundraiseControllerClient, ProtocolConfig};

struct Ctx {
    env: Env,
    client: FundraiseControllerClient<'static>,
    admin: Address,
    base_sac: token::StellarAssetClient<'static>,
    escape_caller: Address,
    escape_dest: Address,
}

fn amounts(env: &Env, values: &[i128]) -> Vec<i128> {
    let mut v = Vec::new(env);
    for value in values {
        v.push_back(*value);
    }
    v
}

fn setup() -> Ctx {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(FundraiseController, ());
    let client = FundraiseControllerClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    let escape_caller = Address::generate(&env);
    let escape_dest = Address::generate(&env);

    client.init(
        &vec![&env, admin.clone()],
        &amounts(&env, &[1]),
        &amounts(&env, &[1]),
        &amounts(&env, &[10_000]),
        &amounts(&env, &[100_000]),
        &ProtocolConfig {
            base_token: sac.address(),
            vault_address: Address::generate(&env),
            total_address: Address::generate(&env),
            drain_vault_receiver: Address::generate(&env),
            escape_hatch_caller: escape_caller.clone(),
            escape_hatch_destination: escape_dest.clone(),
        },
    );

    Ctx {
        base_sac: token::StellarAssetClient::new(&env, &sac.address()),
        env,
        client,
        admin,
        escape_caller,
        escape_dest,
    }
}

#[test]
fn test_contributor_added_event() {
    let ctx = setup();
    let contributor = Address::generate(&ctx.env);

    ctx.client
        .register_contributor(&ctx.admin, &contributor, &5_000, &0);

    let last_event = ctx.env.events().all().last().unwrap();
    assert_eq!(last_event.0, ctx.client.address);
    assert_eq!(
        last_event.1,
        vec![
            &ctx.env,
            symbol_short!("added").into_val(&ctx.env),
            contributor.clone().into_val(&ctx.env),
        ]
    );
    let payload: ContributorAdded = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        payload,
        ContributorAdded {
            address: contributor,
            max_trust: 5_000,
        }
    );
}

#[test]
fn test_fundraise_started_event() {
    let ctx = setup();
    ctx.client.start_fundraise(&ctx.admin);

    let last_event = ctx.env.events().all().last().unwrap();
    assert_eq!(last_event.0, ctx.client.address);
    assert_eq!(
        last_event.1,
        vec![&ctx.env, symbol_short!("started").into_val(&ctx.env)]
    );
    let payload: FundraiseStarted = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(payload, FundraiseStarted { iteration: 0 });
}

#[test]
fn test_contribution_emits_acceptance_and_soft_cap() {
    let ctx = setup();
    ctx.env.ledger().with_mut(|li| li.timestamp = 7_777);
    ctx.client.start_fundraise(&ctx.admin);

    let contributor = Address::generate(&ctx.env);
    ctx.client
        .register_contributor(&ctx.admin, &contributor, &1_000_000, &0);
    ctx.base_sac.mint(&contributor, &1_000_000);

    // Crosses the 10_000 soft cap in one call.
    ctx.client.contribute(&contributor, &15_000);

    let events = ctx.env.events().all();
    let last_event = events.last().unwrap();
    assert_eq!(last_event.0, ctx.client.address);
    assert_eq!(
        last_event.1,
        vec![
            &ctx.env,
            symbol_short!("contrib").into_val(&ctx.env),
            contributor.clone().into_val(&ctx.env),
        ]
    );
    let payload: ContributionAccepted = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        payload,
        ContributionAccepted {
            contributor,
            accepted: 15_000,
            surplus: 0,
            reward: 15_000,
        }
    );

    // The soft-cap event precedes the acceptance event.
    let soft_cap_event = events.get_unchecked(events.len() - 2);
    assert_eq!(
        soft_cap_event.1,
        vec![
            &ctx.env,
            symbol_short!("softcap").into_val(&ctx.env),
            0u32.into_val(&ctx.env),
        ]
    );
    let payload: SoftCapReached = soft_cap_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        payload,
        SoftCapReached {
            iteration: 0,
            at: 7_777,
        }
    );
}

#[test]
fn test_entitlement_redeemed_event() {
    let ctx = setup();
    ctx.client.start_fundraise(&ctx.admin);

    let contributor = Address::generate(&ctx.env);
    ctx.client
        .register_contributor(&ctx.admin, &contributor, &1_000_000, &0);
    ctx.base_sac.mint(&contributor, &1_000_000);
    ctx.client.contribute(&contributor, &2_000);

    ctx.client.redeem_entitlement(&contributor, &2_000);

    let last_event = ctx.env.events().all().last().unwrap();
    assert_eq!(last_event.0, ctx.client.address);
    assert_eq!(
        last_event.1,
        vec![
            &ctx.env,
            symbol_short!("ent_rdm").into_val(&ctx.env),
            contributor.clone().into_val(&ctx.env),
        ]
    );
    let payload: EntitlementRedeemed = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        payload,
        EntitlementRedeemed {
            contributor,
            amount: 2_000,
            base_amount: 2_000,
        }
    );
}

#[test]
fn test_escape_hatch_swept_event() {
    let ctx = setup();
    let holder = Address::generate(&ctx.env);
    ctx.base_sac.mint(&holder, &3_000);
    ctx.client.deposit(&ctx.admin, &holder, &3_000);

    ctx.client.sweep_all(&ctx.escape_caller);

    let last_event = ctx.env.events().all().last().unwrap();
    assert_eq!(last_event.0, ctx.client.address);
    assert_eq!(
        last_event.1,
        vec![&ctx.env, symbol_short!("swept").into_val(&ctx.env)]
    );
    let payload: EscapeHatchSwept = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        payload,
        EscapeHatchSwept {
            destination: ctx.escape_dest.clone(),
            amount: 3_000,
        }
    );
}
