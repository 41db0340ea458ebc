//! Raffle Tickets Pallet
//!
//! Append-only sequential ticket ledger backing the card-sale prize draw.
//! Tickets are issued in contiguous runs starting from id 1, so every id up
//! to the issued total resolves to a holder. The ledger exposes no
//! extrinsics; it is driven entirely by the sale pallet through the
//! `TicketInventory` trait.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

#[cfg(test)]
pub mod mock;

#[frame::pallet]
pub mod pallet {
  use frame::prelude::*;
  use pallet_card_sale::TicketInventory;

  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {}

  #[pallet::pallet]
  pub struct Pallet<T>(_);

  #[pallet::type_value]
  pub fn FirstTicketId<T: Config>() -> u64 {
    1
  }

  /// Id the next issued ticket will receive.
  #[pallet::storage]
  #[pallet::getter(fn next_ticket_id)]
  pub type NextTicketId<T: Config> = StorageValue<_, u64, ValueQuery, FirstTicketId<T>>;

  /// Holder of each issued ticket.
  #[pallet::storage]
  #[pallet::getter(fn ticket_owner)]
  pub type TicketOwners<T: Config> =
    StorageMap<_, Blake2_128Concat, u64, T::AccountId, OptionQuery>;

  /// Tickets held per account.
  #[pallet::storage]
  #[pallet::getter(fn owned_count)]
  pub type OwnedCount<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, u64, ValueQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// A contiguous run of tickets was issued.
    TicketsIssued {
      owner: T::AccountId,
      first_id: u64,
      count: u64,
    },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Requested a ticket run of length zero
    ZeroTicketCount,
    /// Ticket id space exhausted
    ArithmeticOverflow,
  }

  impl<T: Config> TicketInventory<T::AccountId> for Pallet<T> {
    fn mint_into(who: &T::AccountId, count: u64) -> Result<u64, DispatchError> {
      ensure!(count > 0, Error::<T>::ZeroTicketCount);
      let first = NextTicketId::<T>::get();
      let next = first
        .checked_add(count)
        .ok_or(Error::<T>::ArithmeticOverflow)?;
      for id in first..next {
        TicketOwners::<T>::insert(id, who);
      }
      OwnedCount::<T>::mutate(who, |owned| *owned = owned.saturating_add(count));
      NextTicketId::<T>::put(next);
      Self::deposit_event(Event::TicketsIssued {
        owner: who.clone(),
        first_id: first,
        count,
      });
      Ok(first)
    }

    fn owner_of(ticket: u64) -> Option<T::AccountId> {
      TicketOwners::<T>::get(ticket)
    }

    fn total_issued() -> u64 {
      NextTicketId::<T>::get().saturating_sub(1)
    }

    fn tickets_of(who: &T::AccountId) -> u64 {
      OwnedCount::<T>::get(who)
    }
  }
}
