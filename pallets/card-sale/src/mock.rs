extern crate alloc;

use crate as pallet_card_sale;
use alloc::vec::Vec;
use polkadot_sdk::frame_support::{
  PalletId, construct_runtime, derive_impl,
  traits::{ConstU32, ConstU128, Get, Randomness},
};
use polkadot_sdk::frame_system::{self, EnsureRoot};
use polkadot_sdk::sp_runtime::{
  BuildStorage, DispatchError, Permill,
  testing::H256,
  traits::{BlakeTwo256, Hash, IdentityLookup},
};
use primitives::{Balance, collectible, pallet_ids, well_known};
use std::cell::RefCell;
use std::collections::BTreeMap;

pub const TEAM: u64 = 900;
pub const PROVIDER: u64 = 901;
pub const ADMIN: u64 = 902;

/// Campaign configuration for tests: reference prices and milestones, a
/// certificate cutoff of three buyers so the snapshot freeze is reachable,
/// and a batch bound of four.
pub const TEST_PRICES: [Balance; 4] = [5, 20, 50, 100];
pub const TEST_BONUS_TICKETS: [u32; 4] = [1, 5, 15, 35];
pub const TEST_TARGETS: [Balance; 3] = [75_000, 190_000, 300_000];

// State containers for stateful mocks
thread_local! {
  // Sequential ticket ledger: ticket id -> owner, ids contiguous from 1
  pub static TICKET_OWNERS: RefCell<BTreeMap<u64, u64>> = const { RefCell::new(BTreeMap::new()) };
  pub static TICKET_TOTAL: RefCell<u64> = const { RefCell::new(0) };

  // Request ids handed out by the mock randomness provider
  pub static RANDOMNESS_REQUESTS: RefCell<Vec<u64>> = const { RefCell::new(Vec::new()) };
}

/// Number of tickets held by `who` in the mock ledger.
pub fn tickets_of(who: u64) -> u64 {
  TICKET_OWNERS.with(|owners| {
    owners
      .borrow()
      .values()
      .filter(|owner| **owner == who)
      .count() as u64
  })
}

/// Request ids issued so far, oldest first.
pub fn randomness_requests() -> Vec<u64> {
  RANDOMNESS_REQUESTS.with(|requests| requests.borrow().clone())
}

pub fn usdt_balance(who: u64) -> u128 {
  use polkadot_sdk::frame_support::traits::fungibles::Inspect;
  <Assets as Inspect<u64>>::balance(well_known::USDT, &who)
}

pub fn card_balance(who: u64, class: u32) -> u128 {
  use polkadot_sdk::frame_support::traits::fungibles::Inspect;
  <Assets as Inspect<u64>>::balance(class, &who)
}

pub fn custody_balance() -> u128 {
  usdt_balance(CardSale::account_id())
}

/// Cards of any class held by `who` within one tier's design range.
pub fn tier_card_balance(who: u64, tier: u32) -> u128 {
  (0..collectible::CLASSES_PER_TIER)
    .map(|slot| card_balance(who, collectible::card_class(tier, slot)))
    .sum()
}

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    Assets: polkadot_sdk::pallet_assets,
    CardSale: pallet_card_sale,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
  type Block = Block;
  type AccountId = u64;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Hash = H256;
  type Hashing = BlakeTwo256;
  type AccountData = polkadot_sdk::pallet_balances::AccountData<u128>;
}

impl polkadot_sdk::pallet_balances::Config for Test {
  type MaxLocks = ();
  type MaxReserves = ();
  type ReserveIdentifier = [u8; 8];
  type Balance = u128;
  type DustRemoval = ();
  type RuntimeEvent = RuntimeEvent;
  type ExistentialDeposit = ConstU128<1>;
  type AccountStore = System;
  type WeightInfo = ();
  type FreezeIdentifier = ();
  type MaxFreezes = ();
  type RuntimeHoldReason = ();
  type RuntimeFreezeReason = ();
  type DoneSlashHandler = ();
}

impl polkadot_sdk::pallet_assets::Config for Test {
  type RuntimeEvent = RuntimeEvent;
  type Balance = u128;
  type AssetId = u32;
  type AssetIdParameter = u32;
  type Currency = Balances;
  type CreateOrigin = polkadot_sdk::frame_support::traits::AsEnsureOriginWithArg<
    frame_system::EnsureSigned<Self::AccountId>,
  >;
  type ForceOrigin = frame_system::EnsureRoot<Self::AccountId>;
  type AssetDeposit = ConstU128<1>;
  type AssetAccountDeposit = ConstU128<1>;
  type MetadataDepositBase = ConstU128<1>;
  type MetadataDepositPerByte = ConstU128<1>;
  type ApprovalDeposit = ConstU128<1>;
  type StringLimit = ConstU32<50>;
  type Freezer = ();
  type Extra = ();
  type ReserveData = ();
  type CallbackHandle = ();
  type WeightInfo = ();
  type RemoveItemsLimit = ConstU32<5>;
  type Holder = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = AssetBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct AssetBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl polkadot_sdk::pallet_assets::BenchmarkHelper<u32, ()> for AssetBenchmarkHelper {
  fn create_asset_id_parameter(id: u32) -> u32 {
    id
  }
  fn create_reserve_id_parameter(_id: u32) -> () {
    ()
  }
}

pub struct MockTickets;
impl pallet_card_sale::TicketInventory<u64> for MockTickets {
  fn mint_into(who: &u64, count: u64) -> Result<u64, DispatchError> {
    TICKET_TOTAL.with(|total| {
      let mut total = total.borrow_mut();
      let first = *total + 1;
      TICKET_OWNERS.with(|owners| {
        let mut owners = owners.borrow_mut();
        for id in first..first + count {
          owners.insert(id, *who);
        }
      });
      *total += count;
      Ok(first)
    })
  }

  fn owner_of(ticket: u64) -> Option<u64> {
    TICKET_OWNERS.with(|owners| owners.borrow().get(&ticket).copied())
  }

  fn total_issued() -> u64 {
    TICKET_TOTAL.with(|total| *total.borrow())
  }

  fn tickets_of(who: &u64) -> u64 {
    tickets_of(*who)
  }
}

pub struct MockDrawRandomness;
impl pallet_card_sale::DrawRandomness for MockDrawRandomness {
  fn request(_words: u32) -> Result<u64, DispatchError> {
    RANDOMNESS_REQUESTS.with(|requests| {
      let mut requests = requests.borrow_mut();
      let id = requests.len() as u64 + 1;
      requests.push(id);
      Ok(id)
    })
  }
}

/// Deterministic per-subject entropy so card rolls are reproducible in tests.
pub struct TestEntropy;
impl Randomness<H256, u64> for TestEntropy {
  fn random(subject: &[u8]) -> (H256, u64) {
    (BlakeTwo256::hash(subject), System::block_number())
  }
}

pub struct CardSalePalletId;
impl Get<PalletId> for CardSalePalletId {
  fn get() -> PalletId {
    PalletId(*pallet_ids::CARD_SALE_PALLET_ID)
  }
}

pub struct ReferralRate;
impl Get<Permill> for ReferralRate {
  fn get() -> Permill {
    Permill::from_percent(5)
  }
}

pub struct TeamRate;
impl Get<Permill> for TeamRate {
  fn get() -> Permill {
    Permill::from_percent(20)
  }
}

impl pallet_card_sale::Config for Test {
  type Assets = Assets;
  type Tickets = MockTickets;
  type DrawRandomness = MockDrawRandomness;
  type ClassEntropy = TestEntropy;
  type ManagerOrigin = EnsureRoot<u64>;
  type PalletId = CardSalePalletId;
  type PaymentAsset = ConstU32<{ well_known::USDT }>;
  type ReferralRate = ReferralRate;
  type TeamRate = TeamRate;
  type CertificateBuyerLimit = ConstU32<3>;
  type MaxBatch = ConstU32<4>;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = CardSaleBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct CardSaleBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl pallet_card_sale::BenchmarkHelper<u64> for CardSaleBenchmarkHelper {
  fn fund_payment(who: &u64, amount: u128) -> polkadot_sdk::sp_runtime::DispatchResult {
    use polkadot_sdk::frame_support::traits::fungibles::Mutate;
    <Assets as Mutate<u64>>::mint_into(well_known::USDT, who, amount).map(|_| ())
  }

  fn setup_collectible_classes() -> polkadot_sdk::sp_runtime::DispatchResult {
    // All collectible classes already exist in the test genesis.
    Ok(())
  }
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  // USDT plus every collectible class, owned by account 1, sufficient, min_bal 1
  let mut assets: Vec<(u32, u64, bool, u128)> = alloc::vec![(well_known::USDT, 1, true, 1)];
  assets.extend(collectible::all_classes().map(|class| (class, 1, true, 1)));
  // Six funded buyers, enough to cross every milestone
  let accounts: Vec<(u32, u64, u128)> = (1..=6)
    .map(|account| (well_known::USDT, account, 1_000_000))
    .collect();

  polkadot_sdk::pallet_assets::GenesisConfig::<Test> {
    assets,
    metadata: alloc::vec![],
    accounts,
    reserves: alloc::vec![],
    next_asset_id: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  pallet_card_sale::GenesisConfig::<Test> {
    prices: TEST_PRICES,
    bonus_tickets: TEST_BONUS_TICKETS,
    targets: TEST_TARGETS,
    team_account: Some(TEAM),
    randomness_provider: Some(PROVIDER),
    admins: alloc::vec![ADMIN],
    referrers: alloc::vec![],
  }
  .assimilate_storage(&mut t)
  .unwrap();

  // Reset State
  TICKET_OWNERS.with(|owners| owners.borrow_mut().clear());
  TICKET_TOTAL.with(|total| *total.borrow_mut() = 0);
  RANDOMNESS_REQUESTS.with(|requests| requests.borrow_mut().clear());

  t.into()
}

/// Same funding and assets, but no team wallet, provider, or admins.
pub fn new_test_ext_without_roles() -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  let mut assets: Vec<(u32, u64, bool, u128)> = alloc::vec![(well_known::USDT, 1, true, 1)];
  assets.extend(collectible::all_classes().map(|class| (class, 1, true, 1)));
  let accounts: Vec<(u32, u64, u128)> = (1..=6)
    .map(|account| (well_known::USDT, account, 1_000_000))
    .collect();

  polkadot_sdk::pallet_assets::GenesisConfig::<Test> {
    assets,
    metadata: alloc::vec![],
    accounts,
    reserves: alloc::vec![],
    next_asset_id: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  pallet_card_sale::GenesisConfig::<Test> {
    prices: TEST_PRICES,
    bonus_tickets: TEST_BONUS_TICKETS,
    targets: TEST_TARGETS,
    team_account: None,
    randomness_provider: None,
    admins: alloc::vec![],
    referrers: alloc::vec![],
  }
  .assimilate_storage(&mut t)
  .unwrap();

  TICKET_OWNERS.with(|owners| owners.borrow_mut().clear());
  TICKET_TOTAL.with(|total| *total.borrow_mut() = 0);
  RANDOMNESS_REQUESTS.with(|requests| requests.borrow_mut().clear());

  t.into()
}
