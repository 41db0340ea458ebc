//! Adapter traits for the Card Sale pallet
//!
//! Two traits abstract the external collaborators of the sale: the sequential
//! raffle-ticket ledger and the asynchronous randomness source. They keep the
//! pallet fully generic over how tickets are stored and where draw entropy
//! comes from, independent of any runtime implementation.

use frame::prelude::*;

/// Sequential raffle-ticket ledger.
///
/// Ticket IDs are issued contiguously starting from 1, so every ID in
/// `1..=total_issued()` resolves to an owner. The draw engine relies on this
/// to map a drawn index onto a holder.
pub trait TicketInventory<AccountId> {
  /// Mint `count` sequential tickets to `who`, returning the first issued ID.
  fn mint_into(who: &AccountId, count: u64) -> Result<u64, DispatchError>;

  /// Holder of a ticket, if the ID has been issued.
  fn owner_of(ticket: u64) -> Option<AccountId>;

  /// Total number of tickets issued so far.
  fn total_issued() -> u64;

  /// Number of tickets held by `who`.
  fn tickets_of(who: &AccountId) -> u64;
}

/// Asynchronous draw randomness source.
///
/// `request` is fire-and-forget: the pallet records the returned request ID
/// and waits for the designated provider account to submit the random words
/// through the `fulfill_randomness` call.
pub trait DrawRandomness {
  /// Request `words` random words, returning a request ID for the callback.
  fn request(words: u32) -> Result<u64, DispatchError>;
}

/// No-op `TicketInventory` for configurations where tickets are not wired up.
impl<AccountId> TicketInventory<AccountId> for () {
  fn mint_into(_: &AccountId, _: u64) -> Result<u64, DispatchError> {
    Err(DispatchError::Other("TicketInventory not configured"))
  }

  fn owner_of(_: u64) -> Option<AccountId> {
    None
  }

  fn total_issued() -> u64 {
    0
  }

  fn tickets_of(_: &AccountId) -> u64 {
    0
  }
}

/// No-op `DrawRandomness` for configurations without a randomness provider.
impl DrawRandomness for () {
  fn request(_: u32) -> Result<u64, DispatchError> {
    Err(DispatchError::Other("DrawRandomness not configured"))
  }
}
