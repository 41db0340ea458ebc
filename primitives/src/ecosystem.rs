//! Ecosystem Constants for the Card Campaign
//!
//! This module centralizes all system-level constants, including pallet IDs for
//! deriving campaign custody accounts and the fundamental economic parameters of
//! the card sale.
//!
//! These constants are the single source of truth for campaign configuration and
//! are re-used across all runtime configurations via the primitives crate.

/// Balance type alias for consistency across ecosystem
pub type Balance = u128;

/// Pallet identifiers for deriving pallet-owned accounts.
///
/// These IDs are used by Polkadot SDK's `PalletId::into_account_truncating()`
/// to deterministically generate accounts for pallet-specific operations.
///
/// Using `modl` prefix (Substrate standard) ensures type safety and prevents collision with user accounts.
pub mod pallet_ids {
  /// Card Sale pallet ID (campaign custody account holding raised funds)
  pub const CARD_SALE_PALLET_ID: &[u8; 8] = b"cardsale";

  /// Raffle Tickets pallet ID (sequential ticket ledger)
  pub const RAFFLE_TICKETS_PALLET_ID: &[u8; 8] = b"rafftick";
}

/// Campaign parameters defining economic constants and thresholds.
///
/// These parameters are global across all pallets and coordinate the
/// economic properties of the campaign.
pub mod params {
  use super::Balance;
  use sp_arithmetic::Permill;

  /// One unit of the stable payment token (6 decimals).
  pub const STABLE_UNIT: Balance = 1_000_000;

  /// Card unit price per tier, in payment-token units.
  ///
  /// Tier index doubles as the index into `TIER_BONUS_TICKETS`; both tables
  /// are fixed at genesis and immutable thereafter.
  pub const TIER_PRICES: [Balance; 4] = [
    5 * STABLE_UNIT,
    20 * STABLE_UNIT,
    50 * STABLE_UNIT,
    100 * STABLE_UNIT,
  ];

  /// Raffle tickets granted per card unit, per tier.
  pub const TIER_BONUS_TICKETS: [u32; 4] = [1, 5, 15, 35];

  /// Funding milestones, in payment-token units.
  ///
  /// Crossing the first milestone releases escrowed rewards and unlocks the
  /// draw branch; the highest milestone reached sizes the car-prize reserve.
  pub const MILESTONE_TARGETS: [Balance; 3] = [
    75_000 * STABLE_UNIT,
    190_000 * STABLE_UNIT,
    300_000 * STABLE_UNIT,
  ];

  /// Referral commission on every purchase (5%).
  pub const REFERRAL_RATE: Permill = Permill::from_percent(5);

  /// Team share of every purchase while below the final milestone (20%).
  ///
  /// The complement of this rate is the fraction of the car-prize reserve
  /// paid out when a winning car unit is burned.
  pub const TEAM_RATE: Permill = Permill::from_percent(20);

  /// Unique-buyer cutoff for the certificate draw pool.
  ///
  /// The ticket snapshot keeps refreshing while the buyer count is at or
  /// below this limit and freezes permanently once it is exceeded.
  pub const CERTIFICATE_BUYER_LIMIT: u32 = 1_000;

  /// Winners drawn from the certificate pool.
  pub const CERTIFICATE_WINNERS: u32 = 3;

  /// Total winner slots per draw (certificate winners plus one car winner).
  pub const DRAW_WINNERS: u32 = 4;

  /// Retry bound per winner slot when a drawn ticket duplicates an already
  /// selected winner. An exhausted slot aborts the whole draw resolution so
  /// the request can be re-issued.
  pub const DRAW_MAX_ATTEMPTS: u32 = 64;

  /// Upper bound on batch call lengths (reward claims, buyback sweeps, gifts).
  pub const MAX_BATCH: u32 = 100;
}
