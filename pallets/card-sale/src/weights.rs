#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use core::marker::PhantomData;
use polkadot_sdk::frame_support::{
  traits::Get,
  weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
  fn buy(quantity: u32) -> Weight;
  fn buy_to(quantity: u32) -> Weight;
  fn claim_ref_rewards() -> Weight;
  fn claim_ref_rewards_batch(users: u32) -> Weight;
  fn gift_tickets(recipients: u32) -> Weight;
  fn stop_sale() -> Weight;
  fn start_buyback() -> Weight;
  fn buyback() -> Weight;
  fn buyback_batch(users: u32) -> Weight;
  fn start_draw() -> Weight;
  fn select_winners() -> Weight;
  fn fulfill_randomness() -> Weight;
  fn withdraw() -> Weight;
  fn burn_prize() -> Weight;
  fn withdraw_car_prize() -> Weight;
  fn add_admin() -> Weight;
  fn remove_admin() -> Weight;
  fn add_referrer() -> Weight;
  fn remove_referrer() -> Weight;
  fn set_team_account() -> Weight;
  fn set_randomness_provider() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config + crate::Config> WeightInfo for SubstrateWeight<T> {
  fn buy(quantity: u32) -> Weight {
    // One mint per card unit plus the ticket batch and up to three transfers.
    let units = u64::from(quantity);
    Weight::from_parts(
      40_000_000u64.saturating_add(units.saturating_mul(3_000_000)),
      3200u64.saturating_add(units.saturating_mul(64)),
    )
    .saturating_add(T::DbWeight::get().reads(12))
    .saturating_add(T::DbWeight::get().writes(units.saturating_add(10)))
  }

  fn buy_to(quantity: u32) -> Weight {
    Self::buy(quantity)
  }

  fn claim_ref_rewards() -> Weight {
    Weight::from_parts(25_000_000, 1800)
      .saturating_add(T::DbWeight::get().reads(4))
      .saturating_add(T::DbWeight::get().writes(4))
  }

  fn claim_ref_rewards_batch(users: u32) -> Weight {
    let bounded = u64::from(users.min(T::MaxBatch::get()));
    Weight::from_parts(
      15_000_000u64.saturating_add(bounded.saturating_mul(20_000_000)),
      1400u64.saturating_add(bounded.saturating_mul(128)),
    )
    .saturating_add(T::DbWeight::get().reads(3u64.saturating_add(bounded.saturating_mul(3))))
    .saturating_add(T::DbWeight::get().writes(bounded.saturating_mul(4)))
  }

  fn gift_tickets(recipients: u32) -> Weight {
    let bounded = u64::from(recipients.min(T::MaxBatch::get()));
    Weight::from_parts(
      12_000_000u64.saturating_add(bounded.saturating_mul(8_000_000)),
      1200u64.saturating_add(bounded.saturating_mul(96)),
    )
    .saturating_add(T::DbWeight::get().reads(3))
    .saturating_add(T::DbWeight::get().writes(bounded.saturating_mul(2)))
  }

  fn stop_sale() -> Weight {
    Weight::from_parts(12_000_000, 900)
      .saturating_add(T::DbWeight::get().reads(3))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn start_buyback() -> Weight {
    Weight::from_parts(14_000_000, 1100)
      .saturating_add(T::DbWeight::get().reads(6))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn buyback() -> Weight {
    Weight::from_parts(28_000_000, 2000)
      .saturating_add(T::DbWeight::get().reads(5))
      .saturating_add(T::DbWeight::get().writes(5))
  }

  fn buyback_batch(users: u32) -> Weight {
    let bounded = u64::from(users.min(T::MaxBatch::get()));
    Weight::from_parts(
      15_000_000u64.saturating_add(bounded.saturating_mul(24_000_000)),
      1400u64.saturating_add(bounded.saturating_mul(128)),
    )
    .saturating_add(T::DbWeight::get().reads(3u64.saturating_add(bounded.saturating_mul(3))))
    .saturating_add(T::DbWeight::get().writes(bounded.saturating_mul(5)))
  }

  fn start_draw() -> Weight {
    Weight::from_parts(16_000_000, 1300)
      .saturating_add(T::DbWeight::get().reads(7))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn select_winners() -> Weight {
    Weight::from_parts(20_000_000, 1400)
      .saturating_add(T::DbWeight::get().reads(5))
      .saturating_add(T::DbWeight::get().writes(2))
  }

  fn fulfill_randomness() -> Weight {
    // Four slots, each bounded by the duplicate-avoidance retry limit, plus
    // one prize mint per slot.
    Weight::from_parts(180_000_000, 6000)
      .saturating_add(T::DbWeight::get().reads(24))
      .saturating_add(T::DbWeight::get().writes(12))
  }

  fn withdraw() -> Weight {
    Weight::from_parts(30_000_000, 2200)
      .saturating_add(T::DbWeight::get().reads(8))
      .saturating_add(T::DbWeight::get().writes(4))
  }

  fn burn_prize() -> Weight {
    Weight::from_parts(35_000_000, 2400)
      .saturating_add(T::DbWeight::get().reads(8))
      .saturating_add(T::DbWeight::get().writes(6))
  }

  fn withdraw_car_prize() -> Weight {
    Weight::from_parts(30_000_000, 2200)
      .saturating_add(T::DbWeight::get().reads(7))
      .saturating_add(T::DbWeight::get().writes(4))
  }

  fn add_admin() -> Weight {
    Weight::from_parts(8_000_000, 600)
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn remove_admin() -> Weight {
    Weight::from_parts(8_000_000, 600)
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn add_referrer() -> Weight {
    Weight::from_parts(8_000_000, 600)
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn remove_referrer() -> Weight {
    Weight::from_parts(8_000_000, 600)
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn set_team_account() -> Weight {
    Weight::from_parts(8_000_000, 600)
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn set_randomness_provider() -> Weight {
    Weight::from_parts(8_000_000, 600)
      .saturating_add(T::DbWeight::get().writes(1))
  }
}

impl WeightInfo for () {
  fn buy(quantity: u32) -> Weight {
    let units = u64::from(quantity);
    Weight::from_parts(40_000_000u64.saturating_add(units.saturating_mul(3_000_000)), 3200)
  }
  fn buy_to(quantity: u32) -> Weight { Self::buy(quantity) }
  fn claim_ref_rewards() -> Weight { Weight::from_parts(25_000_000, 1800) }
  fn claim_ref_rewards_batch(users: u32) -> Weight {
    let bounded = u64::from(users.min(100));
    Weight::from_parts(15_000_000u64.saturating_add(bounded.saturating_mul(20_000_000)), 1400)
  }
  fn gift_tickets(recipients: u32) -> Weight {
    let bounded = u64::from(recipients.min(100));
    Weight::from_parts(12_000_000u64.saturating_add(bounded.saturating_mul(8_000_000)), 1200)
  }
  fn stop_sale() -> Weight { Weight::from_parts(12_000_000, 900) }
  fn start_buyback() -> Weight { Weight::from_parts(14_000_000, 1100) }
  fn buyback() -> Weight { Weight::from_parts(28_000_000, 2000) }
  fn buyback_batch(users: u32) -> Weight {
    let bounded = u64::from(users.min(100));
    Weight::from_parts(15_000_000u64.saturating_add(bounded.saturating_mul(24_000_000)), 1400)
  }
  fn start_draw() -> Weight { Weight::from_parts(16_000_000, 1300) }
  fn select_winners() -> Weight { Weight::from_parts(20_000_000, 1400) }
  fn fulfill_randomness() -> Weight { Weight::from_parts(180_000_000, 6000) }
  fn withdraw() -> Weight { Weight::from_parts(30_000_000, 2200) }
  fn burn_prize() -> Weight { Weight::from_parts(35_000_000, 2400) }
  fn withdraw_car_prize() -> Weight { Weight::from_parts(30_000_000, 2200) }
  fn add_admin() -> Weight { Weight::from_parts(8_000_000, 600) }
  fn remove_admin() -> Weight { Weight::from_parts(8_000_000, 600) }
  fn add_referrer() -> Weight { Weight::from_parts(8_000_000, 600) }
  fn remove_referrer() -> Weight { Weight::from_parts(8_000_000, 600) }
  fn set_team_account() -> Weight { Weight::from_parts(8_000_000, 600) }
  fn set_randomness_provider() -> Weight { Weight::from_parts(8_000_000, 600) }
}
