//! Card Sale Pallet
//!
//! Campaign core for a fixed-supply collectible card sale denominated in a
//! stable payment token: tiered pricing with bonus raffle tickets, referral
//! commissions, milestone-gated reward release, a buyback safety valve for
//! failed campaigns, and a randomness-driven prize draw over the ticket
//! ledger.
//!
//! All raised funds sit in the pallet's custody account until they are paid
//! out as referral commissions, team revenue, buyback refunds, or the
//! car-prize redemption. Every dispatchable executes transactionally, so a
//! failed guard or transfer leaves no partial state behind.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod adapters;
pub use adapters::{DrawRandomness, TicketInventory};

pub mod weights;
pub use weights::WeightInfo;

#[cfg(test)]
pub mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

/// Helper for benchmarking
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId> {
  fn fund_payment(who: &AccountId, amount: u128) -> frame::deps::sp_runtime::DispatchResult;
  fn setup_collectible_classes() -> frame::deps::sp_runtime::DispatchResult;
}

#[frame::pallet]
pub mod pallet {
  use super::{DrawRandomness, TicketInventory, WeightInfo};
  use alloc::vec::Vec;
  use frame::deps::{
    frame_support::traits::{
      Randomness,
      fungibles::{Inspect as FungiblesInspect, Mutate as FungiblesMutate},
      tokens::{Fortitude, Precision, Preservation},
    },
    sp_runtime::{
      DispatchError, Permill,
      traits::{AccountIdConversion, Hash},
    },
  };
  use frame::prelude::*;
  use primitives::{AssetInspector, AssetKind, Balance, collectible, params};

  /// Per-address campaign account, created lazily on first purchase.
  #[derive(
    Clone, Encode, Decode, DefaultNoBound, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen,
  )]
  pub struct UserAccount<AccountId> {
    /// Cumulative payment-token units spent; zero marks a first purchase.
    pub spent: Balance,
    /// Write-once referrer, recorded on the first purchase that cites one.
    pub referrer: Option<AccountId>,
    /// Escrowed, unclaimed referral rewards owed to this address.
    pub ref_rewards: Balance,
  }

  /// One resolved winner slot of the prize draw.
  #[derive(Clone, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
  pub struct Winner<AccountId> {
    pub account: AccountId,
    pub prize_class: u32,
    pub ticket: u64,
  }

  /// Configuration trait for the card sale pallet
  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// The assets pallet holding the payment token and the collectible classes
    type Assets: FungiblesInspect<Self::AccountId, AssetId = u32, Balance = u128>
      + FungiblesMutate<Self::AccountId, AssetId = u32, Balance = u128>;

    /// Sequential raffle-ticket ledger
    type Tickets: TicketInventory<Self::AccountId>;

    /// Asynchronous randomness source for the prize draw
    type DrawRandomness: DrawRandomness;

    /// Weak block-derived entropy for tier-local card design rolls.
    ///
    /// Explicitly presale-grade: designs within a tier are interchangeable in
    /// price and rights, so miner/collator influence over this source carries
    /// no monetary asymmetry. Must not be reused for anything that does.
    type ClassEntropy: Randomness<Self::Hash, BlockNumberFor<Self>>;

    /// Origin allowed to manage roles, withdraw team funds, and configure accounts
    type ManagerOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    /// The pallet ID, from which the custody account is derived
    #[pallet::constant]
    type PalletId: Get<PalletId>;

    /// Asset ID of the stable payment token
    #[pallet::constant]
    type PaymentAsset: Get<u32>;

    /// Referral commission rate applied to every purchase
    #[pallet::constant]
    type ReferralRate: Get<Permill>;

    /// Team revenue rate applied below the final milestone
    #[pallet::constant]
    type TeamRate: Get<Permill>;

    /// Unique-buyer cutoff for the certificate draw pool snapshot
    #[pallet::constant]
    type CertificateBuyerLimit: Get<u32>;

    /// Upper bound on batch call lengths
    #[pallet::constant]
    type MaxBatch: Get<u32>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;

    /// Helper for benchmarking
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper<Self::AccountId>;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(_);

  /// Sale phase flag: no further purchases once set.
  #[pallet::storage]
  #[pallet::getter(fn sale_stopped)]
  pub type SaleStopped<T> = StorageValue<_, bool, ValueQuery>;

  /// Buyback phase flag: refunds open, draw branch permanently closed.
  #[pallet::storage]
  #[pallet::getter(fn buyback_started)]
  pub type BuybackStarted<T> = StorageValue<_, bool, ValueQuery>;

  /// Draw phase flag: winner selection open, buyback branch permanently closed.
  #[pallet::storage]
  #[pallet::getter(fn draw_started)]
  pub type DrawStarted<T> = StorageValue<_, bool, ValueQuery>;

  /// Set once the randomness callback has resolved all winner slots.
  #[pallet::storage]
  #[pallet::getter(fn winners_awarded)]
  pub type WinnersAwarded<T> = StorageValue<_, bool, ValueQuery>;

  /// Set once the car prize has been redeemed by a winner or swept by the team.
  #[pallet::storage]
  #[pallet::getter(fn car_prize_claimed)]
  pub type CarPrizeClaimed<T> = StorageValue<_, bool, ValueQuery>;

  /// Payment-token units collected from sales. Never decreases.
  #[pallet::storage]
  #[pallet::getter(fn total_raised)]
  pub type TotalRaised<T> = StorageValue<_, Balance, ValueQuery>;

  /// Team rewards accrued across all purchases and withdrawals.
  #[pallet::storage]
  #[pallet::getter(fn total_team_rewards)]
  pub type TotalTeamRewards<T> = StorageValue<_, Balance, ValueQuery>;

  /// Team rewards actually transferred out of custody.
  #[pallet::storage]
  #[pallet::getter(fn total_team_rewards_claimed)]
  pub type TotalTeamRewardsClaimed<T> = StorageValue<_, Balance, ValueQuery>;

  /// Referral rewards accrued across all purchases, claimed or not.
  #[pallet::storage]
  #[pallet::getter(fn total_ref_rewards)]
  pub type TotalRefRewards<T> = StorageValue<_, Balance, ValueQuery>;

  /// Referral rewards actually transferred out of custody.
  #[pallet::storage]
  #[pallet::getter(fn total_ref_rewards_claimed)]
  pub type TotalRefRewardsClaimed<T> = StorageValue<_, Balance, ValueQuery>;

  /// Refunds paid out during the buyback phase.
  #[pallet::storage]
  #[pallet::getter(fn total_buyback_paid)]
  pub type TotalBuybackPaid<T> = StorageValue<_, Balance, ValueQuery>;

  /// Count of distinct addresses with nonzero spend.
  #[pallet::storage]
  #[pallet::getter(fn buyers)]
  pub type Buyers<T> = StorageValue<_, u32, ValueQuery>;

  /// Ticket-total snapshot delimiting the certificate draw pool.
  ///
  /// Refreshed after every purchase while the buyer count is at or below
  /// `CertificateBuyerLimit`; frozen once the count exceeds it.
  #[pallet::storage]
  #[pallet::getter(fn tickets_for_certificate)]
  pub type TicketsForCertificate<T> = StorageValue<_, u64, ValueQuery>;

  /// Card unit price per tier. Set at genesis, immutable thereafter.
  #[pallet::storage]
  #[pallet::getter(fn prices)]
  pub type Prices<T> = StorageValue<_, [Balance; 4], ValueQuery>;

  /// Raffle tickets granted per card unit, per tier. Set at genesis.
  #[pallet::storage]
  #[pallet::getter(fn bonus_tickets)]
  pub type BonusTickets<T> = StorageValue<_, [u32; 4], ValueQuery>;

  /// Funding milestones. Set at genesis, strictly increasing.
  #[pallet::storage]
  #[pallet::getter(fn targets)]
  pub type Targets<T> = StorageValue<_, [Balance; 3], ValueQuery>;

  /// Per-address campaign accounts.
  #[pallet::storage]
  #[pallet::getter(fn accounts)]
  pub type Accounts<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, UserAccount<T::AccountId>, ValueQuery>;

  /// Wallet receiving team revenue and the car-prize sweep.
  #[pallet::storage]
  #[pallet::getter(fn team_account)]
  pub type TeamAccount<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

  /// Account allowed to submit randomness callbacks.
  #[pallet::storage]
  #[pallet::getter(fn randomness_provider)]
  pub type RandomnessProvider<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

  /// Operational admin set, managed by the manager origin.
  #[pallet::storage]
  pub type Admins<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, (), OptionQuery>;

  /// Registered referrers eligible for commissions.
  #[pallet::storage]
  pub type Referrers<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, (), OptionQuery>;

  /// Outstanding randomness request awaiting its callback.
  ///
  /// Re-issuing a request supersedes the previous one; a callback carrying a
  /// superseded ID is rejected as stale.
  #[pallet::storage]
  #[pallet::getter(fn pending_draw_request)]
  pub type PendingDrawRequest<T> = StorageValue<_, u64, OptionQuery>;

  /// Resolved winner slots, in draw order.
  #[pallet::storage]
  #[pallet::getter(fn winners)]
  pub type Winners<T: Config> = StorageValue<
    _,
    BoundedVec<Winner<T::AccountId>, ConstU32<{ params::DRAW_WINNERS }>>,
    ValueQuery,
  >;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// Cards were purchased.
    CardsPurchased {
      buyer: T::AccountId,
      tier: u8,
      quantity: u32,
      cost: Balance,
      tickets: u64,
    },
    /// A referrer was permanently recorded for a buyer.
    ReferrerRecorded {
      buyer: T::AccountId,
      referrer: T::AccountId,
    },
    /// A referral reward was escrowed below the first milestone.
    ReferralRewardAccrued {
      referrer: T::AccountId,
      amount: Balance,
    },
    /// Escrowed and current referral rewards were paid out.
    ReferralRewardPaid {
      referrer: T::AccountId,
      amount: Balance,
    },
    /// Accrued team rewards were transferred to the team wallet.
    TeamRewardPaid { amount: Balance },
    /// The reconciling team withdrawal was paid out.
    TeamWithdrawal { amount: Balance },
    /// The sale was stopped.
    SaleStopped { total_raised: Balance },
    /// The buyback phase was opened for refunds.
    BuybackStarted { total_raised: Balance },
    /// A buyer's full spend was refunded.
    BuybackPaid { who: T::AccountId, amount: Balance },
    /// The draw phase was opened.
    DrawStarted { total_tickets: u64 },
    /// Draw randomness was requested from the provider.
    RandomnessRequested { request_id: u64 },
    /// A winner slot was resolved.
    WinnerSelected {
      slot: u32,
      account: T::AccountId,
      prize_class: u32,
      ticket: u64,
    },
    /// All winner slots were resolved and prizes minted.
    WinnersAwarded,
    /// Raffle tickets were gifted by an admin.
    TicketsGifted { who: T::AccountId, amount: u64 },
    /// A winning car unit was burned for the prize payout.
    CarPrizeRedeemed { who: T::AccountId, amount: Balance },
    /// The unredeemed car prize was swept to the team wallet.
    CarPrizeSwept { amount: Balance },
    /// An admin was added.
    AdminAdded { who: T::AccountId },
    /// An admin was removed.
    AdminRemoved { who: T::AccountId },
    /// A referrer was registered.
    ReferrerAdded { who: T::AccountId },
    /// A referrer was removed.
    ReferrerRemoved { who: T::AccountId },
    /// The team wallet was configured.
    TeamAccountSet { who: T::AccountId },
    /// The randomness provider was configured.
    RandomnessProviderSet { who: T::AccountId },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Tier index outside the configured price table
    InvalidTier,
    /// Purchase or gift quantity of zero
    ZeroQuantity,
    /// Batch argument vectors differ in length
    BatchLengthMismatch,
    /// Batch exceeds the configured bound
    BatchTooLarge,
    /// Team wallet has not been configured
    TeamAccountNotSet,
    /// Sale has already been stopped
    SaleAlreadyStopped,
    /// Operation requires the sale to be stopped first
    SaleNotStopped,
    /// Buyback phase has already started
    BuybackAlreadyStarted,
    /// Buyback phase has not started
    BuybackNotStarted,
    /// Draw phase has already started
    DrawAlreadyStarted,
    /// Draw phase has not started
    DrawNotStarted,
    /// Winners have already been awarded
    WinnersAlreadyAwarded,
    /// Winners have not been awarded yet
    WinnersNotAwarded,
    /// First funding milestone has not been reached
    MilestoneNotReached,
    /// First funding milestone has already been reached
    MilestoneAlreadyReached,
    /// Caller is neither an admin nor the manager origin
    NotAdmin,
    /// Randomness callback from an account other than the provider
    UnauthorizedFulfillment,
    /// Randomness provider has not been configured
    RandomnessProviderNotSet,
    /// No randomness request is pending
    NoPendingDrawRequest,
    /// Callback request ID does not match the pending request
    StaleRandomnessRequest,
    /// Randomness callback carried no words
    EmptyRandomness,
    /// Draw pool holds no tickets
    NoTicketsIssued,
    /// A winner slot exhausted its duplicate-avoidance retries
    DrawAttemptsExhausted,
    /// A drawn ticket has no recorded owner
    UnknownTicket,
    /// More winner slots resolved than the draw defines
    TooManyWinners,
    /// Caller holds no winning car unit
    NoWinningCard,
    /// Car prize has already been redeemed or swept
    CarPrizeAlreadyClaimed,
    /// Nothing for the team to withdraw
    NothingToWithdraw,
    /// No spend recorded to refund
    NothingToRefund,
    /// Arithmetic overflow during accounting
    ArithmeticOverflow,
  }

  #[pallet::genesis_config]
  pub struct GenesisConfig<T: Config> {
    pub prices: [Balance; 4],
    pub bonus_tickets: [u32; 4],
    pub targets: [Balance; 3],
    pub team_account: Option<T::AccountId>,
    pub randomness_provider: Option<T::AccountId>,
    pub admins: Vec<T::AccountId>,
    pub referrers: Vec<T::AccountId>,
  }

  impl<T: Config> Default for GenesisConfig<T> {
    fn default() -> Self {
      Self {
        prices: params::TIER_PRICES,
        bonus_tickets: params::TIER_BONUS_TICKETS,
        targets: params::MILESTONE_TARGETS,
        team_account: None,
        randomness_provider: None,
        admins: Vec::new(),
        referrers: Vec::new(),
      }
    }
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      assert!(
        self.prices.iter().all(|price| *price > 0),
        "tier prices must be nonzero"
      );
      assert!(
        self.targets.windows(2).all(|pair| pair[0] < pair[1]),
        "milestone targets must be strictly increasing"
      );
      assert!(
        AssetKind::Local(T::PaymentAsset::get()).is_stable(),
        "payment asset must live in the stablecoin namespace"
      );

      Prices::<T>::put(self.prices);
      BonusTickets::<T>::put(self.bonus_tickets);
      Targets::<T>::put(self.targets);
      if let Some(team) = &self.team_account {
        TeamAccount::<T>::put(team);
      }
      if let Some(provider) = &self.randomness_provider {
        RandomnessProvider::<T>::put(provider);
      }
      for admin in &self.admins {
        Admins::<T>::insert(admin, ());
      }
      for referrer in &self.referrers {
        Referrers::<T>::insert(referrer, ());
      }

      // Keep the custody account alive even while its balances are empty.
      frame_system::Pallet::<T>::inc_providers(&Pallet::<T>::account_id());
    }
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Buy `quantity` card units of `tier`, optionally citing a referrer.
    ///
    /// Pulls the full cost into campaign custody, splits out referral and
    /// team rewards, mints the card units and the tier's bonus raffle
    /// tickets to the caller.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::buy(*quantity))]
    pub fn buy(
      origin: OriginFor<T>,
      tier: u8,
      quantity: u32,
      referrer: Option<T::AccountId>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_purchase(&who, &who, tier, quantity, referrer)
    }

    /// Buy card units for `recipient`, paid by the caller.
    ///
    /// The recipient receives the units, tickets, spend record, and referrer
    /// binding; the caller only pays.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::buy_to(*quantity))]
    pub fn buy_to(
      origin: OriginFor<T>,
      recipient: T::AccountId,
      tier: u8,
      quantity: u32,
      referrer: Option<T::AccountId>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_purchase(&who, &recipient, tier, quantity, referrer)
    }

    /// Claim the caller's escrowed referral rewards.
    ///
    /// Available once the first milestone is reached. Claiming an empty
    /// balance is a no-op rather than an error, so repeated claims are safe.
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::claim_ref_rewards())]
    pub fn claim_ref_rewards(origin: OriginFor<T>) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(
        Self::milestone_reached(TotalRaised::<T>::get()).is_some(),
        Error::<T>::MilestoneNotReached
      );
      Self::do_claim_ref_rewards(&who)?;
      Ok(())
    }

    /// Push escrowed referral rewards out to a list of referrers.
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::claim_ref_rewards_batch(users.len() as u32))]
    pub fn claim_ref_rewards_batch(
      origin: OriginFor<T>,
      users: Vec<T::AccountId>,
    ) -> DispatchResult {
      Self::ensure_admin(origin)?;
      ensure!(
        users.len() as u32 <= T::MaxBatch::get(),
        Error::<T>::BatchTooLarge
      );
      ensure!(
        Self::milestone_reached(TotalRaised::<T>::get()).is_some(),
        Error::<T>::MilestoneNotReached
      );
      for user in &users {
        Self::do_claim_ref_rewards(user)?;
      }
      Ok(())
    }

    /// Gift raffle tickets to a list of recipients without payment.
    ///
    /// Closed once the draw has started so the pool stays stable between
    /// the randomness request and its resolution.
    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::gift_tickets(recipients.len() as u32))]
    pub fn gift_tickets(
      origin: OriginFor<T>,
      recipients: Vec<T::AccountId>,
      amounts: Vec<u64>,
    ) -> DispatchResult {
      Self::ensure_admin(origin)?;
      ensure!(!DrawStarted::<T>::get(), Error::<T>::DrawAlreadyStarted);
      ensure!(
        recipients.len() == amounts.len(),
        Error::<T>::BatchLengthMismatch
      );
      ensure!(
        recipients.len() as u32 <= T::MaxBatch::get(),
        Error::<T>::BatchTooLarge
      );
      for (recipient, amount) in recipients.iter().zip(amounts.iter()) {
        ensure!(*amount > 0, Error::<T>::ZeroQuantity);
        T::Tickets::mint_into(recipient, *amount)?;
        Self::deposit_event(Event::TicketsGifted {
          who: recipient.clone(),
          amount: *amount,
        });
      }
      Ok(())
    }

    /// Stop the sale permanently. No further purchases are accepted.
    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::stop_sale())]
    pub fn stop_sale(origin: OriginFor<T>) -> DispatchResult {
      Self::ensure_admin(origin)?;
      ensure!(!SaleStopped::<T>::get(), Error::<T>::SaleAlreadyStopped);
      SaleStopped::<T>::put(true);
      Self::deposit_event(Event::SaleStopped {
        total_raised: TotalRaised::<T>::get(),
      });
      Ok(())
    }

    /// Open the buyback phase for a campaign that missed its first milestone.
    ///
    /// Mutually exclusive with the draw branch; the transition is one-way.
    #[pallet::call_index(6)]
    #[pallet::weight(T::WeightInfo::start_buyback())]
    pub fn start_buyback(origin: OriginFor<T>) -> DispatchResult {
      Self::ensure_admin(origin)?;
      ensure!(SaleStopped::<T>::get(), Error::<T>::SaleNotStopped);
      ensure!(!BuybackStarted::<T>::get(), Error::<T>::BuybackAlreadyStarted);
      ensure!(!DrawStarted::<T>::get(), Error::<T>::DrawAlreadyStarted);
      let raised = TotalRaised::<T>::get();
      ensure!(
        Self::milestone_reached(raised).is_none(),
        Error::<T>::MilestoneAlreadyReached
      );
      BuybackStarted::<T>::put(true);
      Self::deposit_event(Event::BuybackStarted {
        total_raised: raised,
      });
      Ok(())
    }

    /// Refund the caller's entire recorded spend from custody.
    #[pallet::call_index(7)]
    #[pallet::weight(T::WeightInfo::buyback())]
    pub fn buyback(origin: OriginFor<T>) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(BuybackStarted::<T>::get(), Error::<T>::BuybackNotStarted);
      let refunded = Self::do_buyback(&who)?;
      ensure!(refunded > 0, Error::<T>::NothingToRefund);
      Ok(())
    }

    /// Push buyback refunds out to a list of buyers.
    ///
    /// Addresses without recorded spend are skipped so one empty account
    /// cannot abort an operational sweep.
    #[pallet::call_index(8)]
    #[pallet::weight(T::WeightInfo::buyback_batch(users.len() as u32))]
    pub fn buyback_batch(origin: OriginFor<T>, users: Vec<T::AccountId>) -> DispatchResult {
      Self::ensure_admin(origin)?;
      ensure!(BuybackStarted::<T>::get(), Error::<T>::BuybackNotStarted);
      ensure!(
        users.len() as u32 <= T::MaxBatch::get(),
        Error::<T>::BatchTooLarge
      );
      for user in &users {
        Self::do_buyback(user)?;
      }
      Ok(())
    }

    /// Open the draw phase for a campaign that reached its first milestone.
    #[pallet::call_index(9)]
    #[pallet::weight(T::WeightInfo::start_draw())]
    pub fn start_draw(origin: OriginFor<T>) -> DispatchResult {
      Self::ensure_admin(origin)?;
      ensure!(SaleStopped::<T>::get(), Error::<T>::SaleNotStopped);
      ensure!(!BuybackStarted::<T>::get(), Error::<T>::BuybackAlreadyStarted);
      ensure!(!DrawStarted::<T>::get(), Error::<T>::DrawAlreadyStarted);
      ensure!(
        Self::milestone_reached(TotalRaised::<T>::get()).is_some(),
        Error::<T>::MilestoneNotReached
      );
      DrawStarted::<T>::put(true);
      Self::deposit_event(Event::DrawStarted {
        total_tickets: T::Tickets::total_issued(),
      });
      Ok(())
    }

    /// Request draw randomness from the configured provider.
    ///
    /// Does not transition phase by itself; winners are awarded when the
    /// provider's callback arrives. Re-issuing supersedes an unanswered
    /// request.
    #[pallet::call_index(10)]
    #[pallet::weight(T::WeightInfo::select_winners())]
    pub fn select_winners(origin: OriginFor<T>) -> DispatchResult {
      Self::ensure_admin(origin)?;
      ensure!(DrawStarted::<T>::get(), Error::<T>::DrawNotStarted);
      ensure!(
        !WinnersAwarded::<T>::get(),
        Error::<T>::WinnersAlreadyAwarded
      );
      ensure!(
        RandomnessProvider::<T>::get().is_some(),
        Error::<T>::RandomnessProviderNotSet
      );
      let request_id = T::DrawRandomness::request(1)?;
      PendingDrawRequest::<T>::put(request_id);
      Self::deposit_event(Event::RandomnessRequested { request_id });
      Ok(())
    }

    /// Randomness callback: resolve all winner slots from the first word.
    ///
    /// Only the configured provider may call this, only for the currently
    /// pending request, and only once; a duplicate or stale callback fails
    /// without touching state.
    #[pallet::call_index(11)]
    #[pallet::weight(T::WeightInfo::fulfill_randomness())]
    pub fn fulfill_randomness(
      origin: OriginFor<T>,
      request_id: u64,
      words: Vec<[u8; 32]>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(
        RandomnessProvider::<T>::get().as_ref() == Some(&who),
        Error::<T>::UnauthorizedFulfillment
      );
      ensure!(DrawStarted::<T>::get(), Error::<T>::DrawNotStarted);
      ensure!(
        !WinnersAwarded::<T>::get(),
        Error::<T>::WinnersAlreadyAwarded
      );
      let pending = PendingDrawRequest::<T>::get().ok_or(Error::<T>::NoPendingDrawRequest)?;
      ensure!(pending == request_id, Error::<T>::StaleRandomnessRequest);
      let seed = words.first().copied().ok_or(Error::<T>::EmptyRandomness)?;

      Self::resolve_winners(seed)?;

      PendingDrawRequest::<T>::kill();
      WinnersAwarded::<T>::put(true);
      Self::deposit_event(Event::WinnersAwarded);
      Ok(())
    }

    /// Reconciling team withdrawal.
    ///
    /// Entitlement is recomputed from scratch: the team rate applied to the
    /// car-prize reserve, plus everything raised beyond the reserve once the
    /// sale is stopped, minus all referral rewards ever accrued and all team
    /// payouts already made.
    #[pallet::call_index(12)]
    #[pallet::weight(T::WeightInfo::withdraw())]
    pub fn withdraw(origin: OriginFor<T>) -> DispatchResult {
      T::ManagerOrigin::ensure_origin(origin)?;
      let raised = TotalRaised::<T>::get();
      let reserve = Self::car_prize_reserve(raised).ok_or(Error::<T>::MilestoneNotReached)?;

      let mut entitlement = T::TeamRate::get().mul_floor(reserve);
      if SaleStopped::<T>::get() {
        entitlement = entitlement.saturating_add(raised.saturating_sub(reserve));
      }
      let amount = entitlement
        .checked_sub(TotalRefRewards::<T>::get())
        .and_then(|left| left.checked_sub(TotalTeamRewardsClaimed::<T>::get()))
        .filter(|amount| *amount > 0)
        .ok_or(Error::<T>::NothingToWithdraw)?;

      let team = TeamAccount::<T>::get().ok_or(Error::<T>::TeamAccountNotSet)?;
      T::Assets::transfer(
        T::PaymentAsset::get(),
        &Self::account_id(),
        &team,
        amount,
        Preservation::Expendable,
      )?;
      TotalTeamRewards::<T>::mutate(|total| *total = total.saturating_add(amount));
      TotalTeamRewardsClaimed::<T>::mutate(|total| *total = total.saturating_add(amount));
      Self::deposit_event(Event::TeamWithdrawal { amount });
      Ok(())
    }

    /// Burn a winning car unit for the car-prize payout.
    #[pallet::call_index(13)]
    #[pallet::weight(T::WeightInfo::burn_prize())]
    pub fn burn_prize(origin: OriginFor<T>) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(WinnersAwarded::<T>::get(), Error::<T>::WinnersNotAwarded);
      ensure!(
        !CarPrizeClaimed::<T>::get(),
        Error::<T>::CarPrizeAlreadyClaimed
      );
      let raised = TotalRaised::<T>::get();
      let milestone = Self::milestone_reached(raised).ok_or(Error::<T>::MilestoneNotReached)?;
      let class = collectible::car_class(milestone);
      ensure!(
        T::Assets::balance(class, &who) >= 1,
        Error::<T>::NoWinningCard
      );

      T::Assets::burn_from(
        class,
        &who,
        1,
        Preservation::Expendable,
        Precision::Exact,
        Fortitude::Polite,
      )?;
      let reserve = Targets::<T>::get()[milestone as usize];
      let amount = Self::car_prize_payout(reserve);
      T::Assets::transfer(
        T::PaymentAsset::get(),
        &Self::account_id(),
        &who,
        amount,
        Preservation::Expendable,
      )?;
      CarPrizeClaimed::<T>::put(true);
      Self::deposit_event(Event::CarPrizeRedeemed { who, amount });
      Ok(())
    }

    /// Sweep the unredeemed car prize to the team wallet.
    ///
    /// Backstop for a winner that never redeems; only available once winners
    /// are awarded, and mutually exclusive with redemption.
    #[pallet::call_index(14)]
    #[pallet::weight(T::WeightInfo::withdraw_car_prize())]
    pub fn withdraw_car_prize(origin: OriginFor<T>) -> DispatchResult {
      T::ManagerOrigin::ensure_origin(origin)?;
      ensure!(WinnersAwarded::<T>::get(), Error::<T>::WinnersNotAwarded);
      ensure!(
        !CarPrizeClaimed::<T>::get(),
        Error::<T>::CarPrizeAlreadyClaimed
      );
      let raised = TotalRaised::<T>::get();
      let reserve = Self::car_prize_reserve(raised).ok_or(Error::<T>::MilestoneNotReached)?;
      let amount = Self::car_prize_payout(reserve);
      let team = TeamAccount::<T>::get().ok_or(Error::<T>::TeamAccountNotSet)?;
      T::Assets::transfer(
        T::PaymentAsset::get(),
        &Self::account_id(),
        &team,
        amount,
        Preservation::Expendable,
      )?;
      CarPrizeClaimed::<T>::put(true);
      Self::deposit_event(Event::CarPrizeSwept { amount });
      Ok(())
    }

    /// Add an operational admin.
    #[pallet::call_index(15)]
    #[pallet::weight(T::WeightInfo::add_admin())]
    pub fn add_admin(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
      T::ManagerOrigin::ensure_origin(origin)?;
      Admins::<T>::insert(&who, ());
      Self::deposit_event(Event::AdminAdded { who });
      Ok(())
    }

    /// Remove an operational admin.
    #[pallet::call_index(16)]
    #[pallet::weight(T::WeightInfo::remove_admin())]
    pub fn remove_admin(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
      T::ManagerOrigin::ensure_origin(origin)?;
      Admins::<T>::remove(&who);
      Self::deposit_event(Event::AdminRemoved { who });
      Ok(())
    }

    /// Register a referrer eligible for commissions.
    #[pallet::call_index(17)]
    #[pallet::weight(T::WeightInfo::add_referrer())]
    pub fn add_referrer(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
      T::ManagerOrigin::ensure_origin(origin)?;
      Referrers::<T>::insert(&who, ());
      Self::deposit_event(Event::ReferrerAdded { who });
      Ok(())
    }

    /// Remove a referrer. Already-recorded bindings keep pointing at the
    /// removed account but stop earning commissions.
    #[pallet::call_index(18)]
    #[pallet::weight(T::WeightInfo::remove_referrer())]
    pub fn remove_referrer(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
      T::ManagerOrigin::ensure_origin(origin)?;
      Referrers::<T>::remove(&who);
      Self::deposit_event(Event::ReferrerRemoved { who });
      Ok(())
    }

    /// Configure the team wallet.
    #[pallet::call_index(19)]
    #[pallet::weight(T::WeightInfo::set_team_account())]
    pub fn set_team_account(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
      T::ManagerOrigin::ensure_origin(origin)?;
      TeamAccount::<T>::put(&who);
      Self::deposit_event(Event::TeamAccountSet { who });
      Ok(())
    }

    /// Configure the randomness provider account.
    #[pallet::call_index(20)]
    #[pallet::weight(T::WeightInfo::set_randomness_provider())]
    pub fn set_randomness_provider(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
      T::ManagerOrigin::ensure_origin(origin)?;
      RandomnessProvider::<T>::put(&who);
      Self::deposit_event(Event::RandomnessProviderSet { who });
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// Campaign custody account holding raised funds until payout.
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    /// Accept the manager origin or a signed member of the admin set.
    fn ensure_admin(origin: OriginFor<T>) -> DispatchResult {
      match T::ManagerOrigin::try_origin(origin) {
        Ok(_) => Ok(()),
        Err(origin) => {
          let who = ensure_signed(origin)?;
          ensure!(Admins::<T>::contains_key(&who), Error::<T>::NotAdmin);
          Ok(())
        }
      }
    }

    /// Highest milestone index reached by `raised`, if any.
    pub fn milestone_reached(raised: Balance) -> Option<u32> {
      let targets = Targets::<T>::get();
      (0..targets.len())
        .rev()
        .find(|index| raised >= targets[*index])
        .map(|index| index as u32)
    }

    /// Car-prize reserve: the highest milestone target at or below `raised`.
    pub fn car_prize_reserve(raised: Balance) -> Option<Balance> {
      Self::milestone_reached(raised).map(|index| Targets::<T>::get()[index as usize])
    }

    /// Fraction of the reserve not earmarked as team revenue.
    fn car_prize_payout(reserve: Balance) -> Balance {
      reserve.saturating_sub(T::TeamRate::get().mul_floor(reserve))
    }

    fn do_purchase(
      payer: &T::AccountId,
      buyer: &T::AccountId,
      tier: u8,
      quantity: u32,
      referrer_hint: Option<T::AccountId>,
    ) -> DispatchResult {
      ensure!(!SaleStopped::<T>::get(), Error::<T>::SaleAlreadyStopped);
      ensure!(
        (tier as u32) < collectible::CARD_TIERS,
        Error::<T>::InvalidTier
      );
      ensure!(quantity > 0, Error::<T>::ZeroQuantity);

      let price = Prices::<T>::get()[tier as usize];
      let cost = price
        .checked_mul(quantity as Balance)
        .ok_or(Error::<T>::ArithmeticOverflow)?;
      T::Assets::transfer(
        T::PaymentAsset::get(),
        payer,
        &Self::account_id(),
        cost,
        Preservation::Expendable,
      )?;

      let mut account = Accounts::<T>::get(buyer);
      if account.spent == 0 {
        Buyers::<T>::mutate(|count| *count = count.saturating_add(1));
      }

      let raised_before = TotalRaised::<T>::get();
      let raised = raised_before
        .checked_add(cost)
        .ok_or(Error::<T>::ArithmeticOverflow)?;
      TotalRaised::<T>::put(raised);

      let ref_reward = Self::apply_referral_split(buyer, &mut account, referrer_hint, cost, raised)?;
      Self::apply_team_split(cost, ref_reward, raised_before, raised)?;

      account.spent = account
        .spent
        .checked_add(cost)
        .ok_or(Error::<T>::ArithmeticOverflow)?;
      Accounts::<T>::insert(buyer, account);

      for unit in 0..quantity {
        let class = Self::roll_card_class(buyer, tier, raised, unit);
        T::Assets::mint_into(class, buyer, 1)?;
      }

      let tickets = (BonusTickets::<T>::get()[tier as usize] as u64)
        .checked_mul(quantity as u64)
        .ok_or(Error::<T>::ArithmeticOverflow)?;
      if tickets > 0 {
        T::Tickets::mint_into(buyer, tickets)?;
      }

      if Buyers::<T>::get() <= T::CertificateBuyerLimit::get() {
        TicketsForCertificate::<T>::put(T::Tickets::total_issued());
      }

      Self::deposit_event(Event::CardsPurchased {
        buyer: buyer.clone(),
        tier,
        quantity,
        cost,
        tickets,
      });
      Ok(())
    }

    /// Referral leg of a purchase. Returns the reward carved out of `cost`.
    ///
    /// A recorded referrer always overrides the hint; an unregistered or
    /// self-referring candidate earns nothing. Below the first milestone the
    /// reward is escrowed on the referrer's account, afterwards any escrowed
    /// balance is flushed together with the new reward in a single payment.
    fn apply_referral_split(
      buyer: &T::AccountId,
      account: &mut UserAccount<T::AccountId>,
      referrer_hint: Option<T::AccountId>,
      cost: Balance,
      raised: Balance,
    ) -> Result<Balance, DispatchError> {
      let candidate = account.referrer.clone().or(referrer_hint);
      let Some(referrer) = candidate else {
        return Ok(0);
      };
      if referrer == *buyer || !Referrers::<T>::contains_key(&referrer) {
        return Ok(0);
      }
      if account.referrer.is_none() && account.spent == 0 {
        account.referrer = Some(referrer.clone());
        Self::deposit_event(Event::ReferrerRecorded {
          buyer: buyer.clone(),
          referrer: referrer.clone(),
        });
      }

      let reward = T::ReferralRate::get().mul_floor(cost);
      TotalRefRewards::<T>::mutate(|total| *total = total.saturating_add(reward));

      if raised < Targets::<T>::get()[0] {
        Accounts::<T>::mutate(&referrer, |entry| {
          entry.ref_rewards = entry.ref_rewards.saturating_add(reward);
        });
        Self::deposit_event(Event::ReferralRewardAccrued {
          referrer,
          amount: reward,
        });
      } else {
        let escrowed = Accounts::<T>::get(&referrer).ref_rewards;
        let payout = escrowed.saturating_add(reward);
        if payout > 0 {
          T::Assets::transfer(
            T::PaymentAsset::get(),
            &Self::account_id(),
            &referrer,
            payout,
            Preservation::Expendable,
          )?;
          Accounts::<T>::mutate(&referrer, |entry| entry.ref_rewards = 0);
          TotalRefRewardsClaimed::<T>::mutate(|total| *total = total.saturating_add(payout));
          Self::deposit_event(Event::ReferralRewardPaid {
            referrer,
            amount: payout,
          });
        }
      }
      Ok(reward)
    }

    /// Team leg of a purchase.
    ///
    /// The gross team share depends on where the raised total sits relative
    /// to the final milestone: 20% below it, 100% above it, and a split rate
    /// for the single purchase that straddles the boundary (the overshoot is
    /// no longer reserved for the prize pool and flows to the team whole).
    /// The same escrow-then-release policy as referral rewards applies,
    /// gated on the first milestone.
    fn apply_team_split(
      cost: Balance,
      ref_reward: Balance,
      raised_before: Balance,
      raised: Balance,
    ) -> DispatchResult {
      let targets = Targets::<T>::get();
      let final_target = targets[2];

      let gross = if raised < final_target {
        T::TeamRate::get().mul_floor(cost)
      } else if raised_before < final_target {
        let overshoot = raised.saturating_sub(final_target);
        let within = cost.saturating_sub(overshoot);
        T::TeamRate::get()
          .mul_floor(within)
          .saturating_add(overshoot)
      } else {
        cost
      };
      let share = gross
        .checked_sub(ref_reward)
        .ok_or(Error::<T>::ArithmeticOverflow)?;
      TotalTeamRewards::<T>::mutate(|total| *total = total.saturating_add(share));

      if raised >= targets[0] {
        let accrued = TotalTeamRewards::<T>::get();
        let claimed = TotalTeamRewardsClaimed::<T>::get();
        let payable = accrued.saturating_sub(claimed);
        if payable > 0 {
          let team = TeamAccount::<T>::get().ok_or(Error::<T>::TeamAccountNotSet)?;
          T::Assets::transfer(
            T::PaymentAsset::get(),
            &Self::account_id(),
            &team,
            payable,
            Preservation::Expendable,
          )?;
          TotalTeamRewardsClaimed::<T>::put(accrued);
          Self::deposit_event(Event::TeamRewardPaid { amount: payable });
        }
      }
      Ok(())
    }

    /// Pay out a referrer's escrowed balance. Empty balances are a no-op.
    fn do_claim_ref_rewards(who: &T::AccountId) -> Result<Balance, DispatchError> {
      let amount = Accounts::<T>::get(who).ref_rewards;
      if amount == 0 {
        return Ok(0);
      }
      T::Assets::transfer(
        T::PaymentAsset::get(),
        &Self::account_id(),
        who,
        amount,
        Preservation::Expendable,
      )?;
      Accounts::<T>::mutate(who, |entry| entry.ref_rewards = 0);
      TotalRefRewardsClaimed::<T>::mutate(|total| *total = total.saturating_add(amount));
      Self::deposit_event(Event::ReferralRewardPaid {
        referrer: who.clone(),
        amount,
      });
      Ok(amount)
    }

    /// Refund a buyer's full spend and erase it. Returns the refunded amount.
    fn do_buyback(who: &T::AccountId) -> Result<Balance, DispatchError> {
      let mut account = Accounts::<T>::get(who);
      let refund = account.spent;
      if refund == 0 {
        return Ok(0);
      }
      T::Assets::transfer(
        T::PaymentAsset::get(),
        &Self::account_id(),
        who,
        refund,
        Preservation::Expendable,
      )?;
      account.spent = 0;
      Accounts::<T>::insert(who, account);
      Buyers::<T>::mutate(|count| *count = count.saturating_sub(1));
      TotalBuybackPaid::<T>::mutate(|total| *total = total.saturating_add(refund));
      Self::deposit_event(Event::BuybackPaid {
        who: who.clone(),
        amount: refund,
      });
      Ok(refund)
    }

    /// Resolve all winner slots from one random seed.
    ///
    /// Winner `i` is the holder of ticket `H(seed, iteration) mod pool + 1`,
    /// where the pool for the three certificate slots is the frozen
    /// early-buyer snapshot and the pool for the car slot is the full ticket
    /// ledger. A candidate duplicating an earlier winner advances the
    /// iteration and retries, bounded per slot.
    fn resolve_winners(seed: [u8; 32]) -> DispatchResult {
      let certificate_pool = TicketsForCertificate::<T>::get();
      let full_pool = T::Tickets::total_issued();
      ensure!(
        certificate_pool > 0 && full_pool > 0,
        Error::<T>::NoTicketsIssued
      );
      let milestone = Self::milestone_reached(TotalRaised::<T>::get())
        .ok_or(Error::<T>::MilestoneNotReached)?;

      let mut winners: BoundedVec<Winner<T::AccountId>, ConstU32<{ params::DRAW_WINNERS }>> =
        BoundedVec::new();
      let mut iteration: u32 = 0;

      for slot in 0..params::DRAW_WINNERS {
        let (pool, prize_class) = if slot < params::CERTIFICATE_WINNERS {
          (certificate_pool, collectible::certificate_class())
        } else {
          (full_pool, collectible::car_class(milestone))
        };

        let mut attempts: u32 = 0;
        let (account, ticket) = loop {
          ensure!(
            attempts < params::DRAW_MAX_ATTEMPTS,
            Error::<T>::DrawAttemptsExhausted
          );
          let digest = T::Hashing::hash_of(&(seed, iteration));
          iteration = iteration.saturating_add(1);
          attempts = attempts.saturating_add(1);

          let ticket = Self::entropy_mod(digest.as_ref(), pool).saturating_add(1);
          let owner = T::Tickets::owner_of(ticket).ok_or(Error::<T>::UnknownTicket)?;
          if winners.iter().any(|winner| winner.account == owner) {
            continue;
          }
          break (owner, ticket);
        };

        T::Assets::mint_into(prize_class, &account, 1)?;
        winners
          .try_push(Winner {
            account: account.clone(),
            prize_class,
            ticket,
          })
          .map_err(|_| Error::<T>::TooManyWinners)?;
        Self::deposit_event(Event::WinnerSelected {
          slot,
          account,
          prize_class,
          ticket,
        });
      }

      Winners::<T>::put(winners);
      Ok(())
    }

    /// Roll the card design within a tier from weak block entropy.
    fn roll_card_class(buyer: &T::AccountId, tier: u8, raised: Balance, unit: u32) -> u32 {
      let subject = (buyer, tier, raised, unit).encode();
      let (digest, _) = T::ClassEntropy::random(&subject);
      let slot = Self::entropy_mod(digest.as_ref(), collectible::CLASSES_PER_TIER as u64) as u32;
      collectible::card_class(tier as u32, slot)
    }

    /// Reduce a digest to `0..modulus` via its first 16 bytes.
    fn entropy_mod(bytes: &[u8], modulus: u64) -> u64 {
      if modulus == 0 {
        return 0;
      }
      let mut acc: u128 = 0;
      for byte in bytes.iter().take(16) {
        acc = (acc << 8) | u128::from(*byte);
      }
      (acc % u128::from(modulus)) as u64
    }
  }
}
