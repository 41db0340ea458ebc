use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// This enum serves as the single source of truth for asset types across all pallets,
/// enabling type-safe interactions between the card sale, ticket ledger, and other actors.
///
/// - `Native`: The system's native token (managed by pallet-balances).
/// - `Local(u32)`: Local synthetic assets (managed by pallet-assets).
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Default,
  Encode,
  Eq,
  MaxEncodedLen,
  Ord,
  PartialEq,
  PartialOrd,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub enum AssetKind {
  /// Native token managed by pallet-balances
  #[default]
  Native,
  /// Local asset managed by pallet-assets
  Local(u32),
}

impl From<u32> for AssetKind {
  fn from(asset_id: u32) -> Self {
    AssetKind::Local(asset_id)
  }
}

// Bitmask Architecture for Asset Classification
//
// 32-bit ID Structure:
// [ 4 bits: Type ] [ 28 bits: Index/ID ]
//
// Types:
// 0x0... -> Native (Reserved, though AssetKind::Native is usually used)
// 0x1... -> Standard Tokens (DOT, KSM, etc.)
// 0x2... -> Stablecoins (USDT, USDC, etc.)
// 0x3... -> Collectible classes (campaign cards and prizes)

pub const MASK_TYPE: u32 = 0xF000_0000;
pub const MASK_INDEX: u32 = 0x0FFF_FFFF;

pub const TYPE_STD: u32 = 0x1000_0000;
pub const TYPE_STABLE: u32 = 0x2000_0000;
pub const TYPE_COLLECTIBLE: u32 = 0x3000_0000;

/// Helper trait to inspect AssetKind properties
pub trait AssetInspector {
  fn is_native(&self) -> bool;
  fn local_id(&self) -> Option<u32>;

  // Bitmask checks
  fn is_std(&self) -> bool;
  fn is_stable(&self) -> bool;
  fn is_collectible(&self) -> bool;
}

impl AssetInspector for AssetKind {
  fn is_native(&self) -> bool {
    matches!(self, AssetKind::Native)
  }

  fn local_id(&self) -> Option<u32> {
    match self {
      AssetKind::Local(id) => Some(*id),
      _ => None,
    }
  }

  fn is_std(&self) -> bool {
    match self {
      AssetKind::Local(id) => (id & MASK_TYPE) == TYPE_STD,
      _ => false,
    }
  }

  fn is_stable(&self) -> bool {
    match self {
      AssetKind::Local(id) => (id & MASK_TYPE) == TYPE_STABLE,
      _ => false,
    }
  }

  fn is_collectible(&self) -> bool {
    match self {
      AssetKind::Local(id) => (id & MASK_TYPE) == TYPE_COLLECTIBLE,
      _ => false,
    }
  }
}

/// Helper to construct compile-time IDs
const fn make_id(type_mask: u32, index: u32) -> u32 {
  type_mask | (index & MASK_INDEX)
}

/// Well-known asset constants serving as system defaults
pub mod well_known {
  use super::*;

  // Standard Tokens (0x1...)
  pub const DOT: u32 = make_id(TYPE_STD, 1);
  pub const KSM: u32 = make_id(TYPE_STD, 2);

  // Stablecoins (0x2...)
  pub const USDT: u32 = make_id(TYPE_STABLE, 1);
  pub const USDC: u32 = make_id(TYPE_STABLE, 2);
  pub const DAI: u32 = make_id(TYPE_STABLE, 3);
}

/// Collectible class layout for the card campaign (0x3... namespace).
///
/// Classes are laid out as a fixed table: 12 purchasable card classes
/// (4 tiers x 3 interchangeable designs per tier), followed by 3 car-prize
/// classes (one per funding milestone), followed by a single certificate
/// class awarded in the secondary draw.
pub mod collectible {
  use super::*;

  /// Number of purchasable card tiers
  pub const CARD_TIERS: u32 = 4;

  /// Interchangeable card designs within one tier
  pub const CLASSES_PER_TIER: u32 = 3;

  /// Car-prize classes, one per funding milestone
  pub const CAR_CLASSES: u32 = 3;

  const CARD_CLASS_COUNT: u32 = CARD_TIERS * CLASSES_PER_TIER;
  const CERTIFICATE_INDEX: u32 = CARD_CLASS_COUNT + CAR_CLASSES + 1;

  /// Total number of collectible classes in the campaign
  pub const CLASS_COUNT: u32 = CERTIFICATE_INDEX;

  /// Asset ID of a purchasable card class.
  ///
  /// Tiers occupy contiguous index ranges: tier 0 owns indices 1..=3,
  /// tier 1 owns 4..=6, and so on. `slot` picks one of the designs
  /// within the tier.
  pub const fn card_class(tier: u32, slot: u32) -> u32 {
    make_id(TYPE_COLLECTIBLE, tier * CLASSES_PER_TIER + slot + 1)
  }

  /// Asset ID of the car-prize class for a given milestone index (0..=2)
  pub const fn car_class(milestone: u32) -> u32 {
    make_id(TYPE_COLLECTIBLE, CARD_CLASS_COUNT + milestone + 1)
  }

  /// Asset ID of the certificate-prize class
  pub const fn certificate_class() -> u32 {
    make_id(TYPE_COLLECTIBLE, CERTIFICATE_INDEX)
  }

  /// All collectible class IDs in table order
  pub fn all_classes() -> impl Iterator<Item = u32> {
    (1..=CLASS_COUNT).map(|index| make_id(TYPE_COLLECTIBLE, index))
  }
}
