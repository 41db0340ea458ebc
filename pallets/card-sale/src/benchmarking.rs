#![cfg(feature = "runtime-benchmarks")]

extern crate alloc;

use crate::*;
use alloc::vec;
use alloc::vec::Vec;
use frame::prelude::*;
use polkadot_sdk::frame_benchmarking::{account, v2::*};
use polkadot_sdk::frame_system::RawOrigin;
use primitives::params;

#[benchmarks]
mod benches {
  use super::*;

  const SEED_WORD: [u8; 32] = [7u8; 32];

  fn seed_campaign<T: Config>() {
    Prices::<T>::put(params::TIER_PRICES);
    BonusTickets::<T>::put(params::TIER_BONUS_TICKETS);
    Targets::<T>::put(params::MILESTONE_TARGETS);
    let team: T::AccountId = account("team", 0, 0);
    TeamAccount::<T>::put(&team);
    T::BenchmarkHelper::setup_collectible_classes().expect("collectible classes must exist");
  }

  fn funded_buyer<T: Config>(index: u32, amount: u128) -> T::AccountId {
    let who: T::AccountId = account("buyer", index, 0);
    T::BenchmarkHelper::fund_payment(&who, amount).expect("buyer funding");
    who
  }

  fn buy_units<T: Config>(
    index: u32,
    tier: u8,
    quantity: u32,
    referrer: Option<T::AccountId>,
  ) -> T::AccountId {
    let cost = params::TIER_PRICES[tier as usize].saturating_mul(quantity.into());
    let who = funded_buyer::<T>(index, cost);
    Pallet::<T>::buy(RawOrigin::Signed(who.clone()).into(), tier, quantity, referrer)
      .expect("setup purchase");
    who
  }

  fn cross_first_milestone<T: Config>() -> T::AccountId {
    // 750 top-tier units land exactly on the first milestone.
    buy_units::<T>(1_000, 3, 750, None)
  }

  fn run_to_pending_draw<T: Config>() -> (T::AccountId, u64) {
    for index in 0..4 {
      buy_units::<T>(2_000 + index, 3, 200, None);
    }
    let provider: T::AccountId = account("provider", 0, 0);
    RandomnessProvider::<T>::put(&provider);
    Pallet::<T>::stop_sale(RawOrigin::Root.into()).expect("stop sale");
    Pallet::<T>::start_draw(RawOrigin::Root.into()).expect("start draw");
    Pallet::<T>::select_winners(RawOrigin::Root.into()).expect("randomness request");
    let request_id = PendingDrawRequest::<T>::get().expect("request pending");
    (provider, request_id)
  }

  fn run_to_awarded<T: Config>() -> T::AccountId {
    let (provider, request_id) = run_to_pending_draw::<T>();
    Pallet::<T>::fulfill_randomness(
      RawOrigin::Signed(provider).into(),
      request_id,
      vec![SEED_WORD],
    )
    .expect("winner resolution");
    Winners::<T>::get()[3].account.clone()
  }

  #[benchmark]
  fn buy() {
    seed_campaign::<T>();
    let referrer: T::AccountId = account("referrer", 0, 0);
    Referrers::<T>::insert(&referrer, ());
    let cost = params::TIER_PRICES[3].saturating_mul(750);
    let caller = funded_buyer::<T>(0, cost);

    // Milestone-crossing purchase with a referrer: every payout leg runs.
    #[extrinsic_call]
    buy(RawOrigin::Signed(caller.clone()), 3, 750, Some(referrer));

    assert_eq!(TotalRaised::<T>::get(), params::MILESTONE_TARGETS[0]);
    assert!(Accounts::<T>::get(&caller).spent > 0);
  }

  #[benchmark]
  fn buy_to() {
    seed_campaign::<T>();
    let referrer: T::AccountId = account("referrer", 0, 0);
    Referrers::<T>::insert(&referrer, ());
    let recipient: T::AccountId = account("recipient", 0, 0);
    let cost = params::TIER_PRICES[3].saturating_mul(750);
    let caller = funded_buyer::<T>(0, cost);

    #[extrinsic_call]
    buy_to(
      RawOrigin::Signed(caller),
      recipient.clone(),
      3,
      750,
      Some(referrer),
    );

    assert!(Accounts::<T>::get(&recipient).spent > 0);
  }

  #[benchmark]
  fn claim_ref_rewards() {
    seed_campaign::<T>();
    let referrer: T::AccountId = account("referrer", 0, 0);
    Referrers::<T>::insert(&referrer, ());
    buy_units::<T>(0, 1, 5, Some(referrer.clone()));
    cross_first_milestone::<T>();
    assert!(Accounts::<T>::get(&referrer).ref_rewards > 0);

    #[extrinsic_call]
    claim_ref_rewards(RawOrigin::Signed(referrer.clone()));

    assert_eq!(Accounts::<T>::get(&referrer).ref_rewards, 0);
  }

  #[benchmark]
  fn claim_ref_rewards_batch() {
    seed_campaign::<T>();
    let mut users: Vec<T::AccountId> = Vec::new();
    for index in 0..T::MaxBatch::get() {
      let referrer: T::AccountId = account("referrer", index, 0);
      Referrers::<T>::insert(&referrer, ());
      buy_units::<T>(index, 1, 5, Some(referrer.clone()));
      users.push(referrer);
    }
    cross_first_milestone::<T>();

    #[extrinsic_call]
    claim_ref_rewards_batch(RawOrigin::Root, users.clone());

    for user in &users {
      assert_eq!(Accounts::<T>::get(user).ref_rewards, 0);
    }
  }

  #[benchmark]
  fn gift_tickets() {
    let recipients: Vec<T::AccountId> = (0..T::MaxBatch::get())
      .map(|index| account("recipient", index, 0))
      .collect();
    let amounts: Vec<u64> = recipients.iter().map(|_| 10).collect();

    #[extrinsic_call]
    gift_tickets(RawOrigin::Root, recipients, amounts);
  }

  #[benchmark]
  fn stop_sale() {
    seed_campaign::<T>();

    #[extrinsic_call]
    stop_sale(RawOrigin::Root);

    assert!(SaleStopped::<T>::get());
  }

  #[benchmark]
  fn start_buyback() {
    seed_campaign::<T>();
    buy_units::<T>(0, 0, 1, None);
    Pallet::<T>::stop_sale(RawOrigin::Root.into()).expect("stop sale");

    #[extrinsic_call]
    start_buyback(RawOrigin::Root);

    assert!(BuybackStarted::<T>::get());
  }

  #[benchmark]
  fn buyback() {
    seed_campaign::<T>();
    let caller = buy_units::<T>(0, 1, 5, None);
    Pallet::<T>::stop_sale(RawOrigin::Root.into()).expect("stop sale");
    Pallet::<T>::start_buyback(RawOrigin::Root.into()).expect("start buyback");

    #[extrinsic_call]
    buyback(RawOrigin::Signed(caller.clone()));

    assert_eq!(Accounts::<T>::get(&caller).spent, 0);
  }

  #[benchmark]
  fn buyback_batch() {
    seed_campaign::<T>();
    let users: Vec<T::AccountId> = (0..T::MaxBatch::get())
      .map(|index| buy_units::<T>(index, 0, 1, None))
      .collect();
    Pallet::<T>::stop_sale(RawOrigin::Root.into()).expect("stop sale");
    Pallet::<T>::start_buyback(RawOrigin::Root.into()).expect("start buyback");

    #[extrinsic_call]
    buyback_batch(RawOrigin::Root, users);

    assert_eq!(Buyers::<T>::get(), 0);
  }

  #[benchmark]
  fn start_draw() {
    seed_campaign::<T>();
    cross_first_milestone::<T>();
    Pallet::<T>::stop_sale(RawOrigin::Root.into()).expect("stop sale");

    #[extrinsic_call]
    start_draw(RawOrigin::Root);

    assert!(DrawStarted::<T>::get());
  }

  #[benchmark]
  fn select_winners() {
    seed_campaign::<T>();
    cross_first_milestone::<T>();
    let provider: T::AccountId = account("provider", 0, 0);
    RandomnessProvider::<T>::put(&provider);
    Pallet::<T>::stop_sale(RawOrigin::Root.into()).expect("stop sale");
    Pallet::<T>::start_draw(RawOrigin::Root.into()).expect("start draw");

    #[extrinsic_call]
    select_winners(RawOrigin::Root);

    assert!(PendingDrawRequest::<T>::get().is_some());
  }

  #[benchmark]
  fn fulfill_randomness() {
    seed_campaign::<T>();
    let (provider, request_id) = run_to_pending_draw::<T>();

    #[extrinsic_call]
    fulfill_randomness(RawOrigin::Signed(provider), request_id, vec![SEED_WORD]);

    assert!(WinnersAwarded::<T>::get());
    assert_eq!(Winners::<T>::get().len() as u32, params::DRAW_WINNERS);
  }

  #[benchmark]
  fn withdraw() {
    seed_campaign::<T>();
    cross_first_milestone::<T>();
    // Raise a little beyond the reserve so the reconciliation pays out.
    buy_units::<T>(1_001, 0, 1, None);
    Pallet::<T>::stop_sale(RawOrigin::Root.into()).expect("stop sale");

    #[extrinsic_call]
    withdraw(RawOrigin::Root);
  }

  #[benchmark]
  fn burn_prize() {
    seed_campaign::<T>();
    let winner = run_to_awarded::<T>();

    #[extrinsic_call]
    burn_prize(RawOrigin::Signed(winner));

    assert!(CarPrizeClaimed::<T>::get());
  }

  #[benchmark]
  fn withdraw_car_prize() {
    seed_campaign::<T>();
    run_to_awarded::<T>();

    #[extrinsic_call]
    withdraw_car_prize(RawOrigin::Root);

    assert!(CarPrizeClaimed::<T>::get());
  }

  #[benchmark]
  fn add_admin() {
    let who: T::AccountId = account("admin", 0, 0);

    #[extrinsic_call]
    add_admin(RawOrigin::Root, who.clone());

    assert!(Admins::<T>::contains_key(&who));
  }

  #[benchmark]
  fn remove_admin() {
    let who: T::AccountId = account("admin", 0, 0);
    Admins::<T>::insert(&who, ());

    #[extrinsic_call]
    remove_admin(RawOrigin::Root, who.clone());

    assert!(!Admins::<T>::contains_key(&who));
  }

  #[benchmark]
  fn add_referrer() {
    let who: T::AccountId = account("referrer", 0, 0);

    #[extrinsic_call]
    add_referrer(RawOrigin::Root, who.clone());

    assert!(Referrers::<T>::contains_key(&who));
  }

  #[benchmark]
  fn remove_referrer() {
    let who: T::AccountId = account("referrer", 0, 0);
    Referrers::<T>::insert(&who, ());

    #[extrinsic_call]
    remove_referrer(RawOrigin::Root, who.clone());

    assert!(!Referrers::<T>::contains_key(&who));
  }

  #[benchmark]
  fn set_team_account() {
    let who: T::AccountId = account("team", 0, 0);

    #[extrinsic_call]
    set_team_account(RawOrigin::Root, who.clone());

    assert_eq!(TeamAccount::<T>::get(), Some(who));
  }

  #[benchmark]
  fn set_randomness_provider() {
    let who: T::AccountId = account("provider", 0, 0);

    #[extrinsic_call]
    set_randomness_provider(RawOrigin::Root, who.clone());

    assert_eq!(RandomnessProvider::<T>::get(), Some(who));
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
