// Polimec Blockchain – https://www.polimec.org/
// Copyright (C) Polimec 2022. All rights reserved.

// The Polimec Blockchain is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Polimec Blockchain is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Reputation Pallet
//!
//! Keeps the reputation polls used to weight regulators during the rating of a milestone.
//!
//! ## Overview
//!
//! A poll is first *requested* by the system (usually the milestones pallet when a milestone is
//! activated). Anyone can then *start* it inside its start window. Investors register to get a
//! vote limit, measured in project tokens for purchaser polls and in the native currency
//! otherwise, and spend it voting for regulators on a given objective type.
//!
//! Cast votes stay frozen in the voter's account until the poll ends, so the same holdings cannot
//! back votes of a second voter in the same poll. Native currency is frozen through
//! [`FreezeReason::VoteLimit`]. Project tokens are frozen by this pallet acting as the
//! `pallet_assets` [`FrozenBalance`](pallet_assets::FrozenBalance) hook.
//!
//! The accumulated votes of a regulator for an objective type are read by the milestones pallet
//! through [`ReputationProvider`] when the regulator bids on an objective.
//!
//! ## Extrinsics
//! [`register_poll_request`](crate::pallet::Pallet::register_poll_request)
//! [`start_poll`](crate::pallet::Pallet::start_poll)
//! [`register_voter`](crate::pallet::Pallet::register_voter)
//! [`vote`](crate::pallet::Pallet::vote)
//! [`release_votes`](crate::pallet::Pallet::release_votes)
//!
//! ## Example Configuration
//!
//! ```ignore
//! impl pallet_reputation::Config for Runtime {
//! 	type AdminOrigin = EnsureRoot<AccountId>;
//! 	type MaxFrozenPolls = ConstU32<16>;
//! 	type NativeCurrency = Balances;
//! 	type PollDelayLength = ConstU32<{ 10 * MINUTES }>;
//! 	type PollLength = ConstU32<{ 3 * WEEKS }>;
//! 	type ProjectTokens = ContributionTokens;
//! 	type RuntimeEvent = RuntimeEvent;
//! 	type RuntimeFreezeReason = RuntimeFreezeReason;
//! 	type WeightInfo = pallet_reputation::weights::SubstrateWeight<Runtime>;
//! }
//!
//! impl pallet_assets::Config<ContributionTokensInstance> for Runtime {
//! 	type Freezer = Reputation;
//! 	// ...
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;
pub use polimec_common::{AssetId, Balance, ObjectiveType, PollId, ReputationProvider};

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;
mod functions;
pub mod weights;

#[cfg(test)]
mod mock;

pub type AccountIdOf<T> = <T as frame_system::Config>::AccountId;

#[frame_support::pallet]
pub mod pallet {
	use super::*;
	use crate::weights::WeightInfo;
	use frame_support::{
		pallet_prelude::*,
		traits::{fungible, fungibles},
	};
	use frame_system::pallet_prelude::*;

	/// A poll that may be started by anyone inside `[min_start, max_start]`.
	#[derive(Clone, Copy, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
	pub struct PollRequest<BlockNumber> {
		pub min_start: BlockNumber,
		pub max_start: BlockNumber,
		/// Vote limits come from `token` holdings instead of the native currency.
		pub for_purchaser: bool,
		pub token: Option<AssetId>,
	}

	/// Voting is open in `[start, end)`.
	#[derive(Clone, Copy, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
	pub struct PollInfo<BlockNumber> {
		pub start: BlockNumber,
		pub end: BlockNumber,
	}

	#[derive(Default, Clone, Copy, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
	pub struct VoteLimit {
		pub total: Balance,
		pub used: Balance,
	}

	impl VoteLimit {
		pub fn remaining(&self) -> Balance {
			self.total.saturating_sub(self.used)
		}
	}

	/// A poll the voter registered for. Its used votes are frozen while the poll is open.
	#[derive(Clone, Copy, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
	pub struct VoteFreeze {
		pub poll_id: PollId,
		/// `None` for native currency polls.
		pub token: Option<AssetId>,
	}

	#[pallet::config]
	pub trait Config: frame_system::Config {
		/// Origin allowed to request system polls.
		type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

		/// Polls a voter can hold frozen votes in at the same time.
		#[pallet::constant]
		type MaxFrozenPolls: Get<u32>;

		/// Vote limits of non purchaser polls are taken from this currency.
		type NativeCurrency: fungible::Inspect<Self::AccountId, Balance = Balance>
			+ fungible::MutateFreeze<Self::AccountId, Id = Self::RuntimeFreezeReason>;

		/// Blocks between starting a poll and the moment it accepts votes.
		#[pallet::constant]
		type PollDelayLength: Get<BlockNumberFor<Self>>;

		/// Blocks a poll accepts votes for.
		#[pallet::constant]
		type PollLength: Get<BlockNumberFor<Self>>;

		/// Vote limits of purchaser polls are taken from these assets.
		type ProjectTokens: fungibles::Inspect<Self::AccountId, AssetId = AssetId, Balance = Balance>;

		type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

		type RuntimeFreezeReason: From<FreezeReason>;

		/// A type representing the weights required by the dispatchables of this pallet.
		type WeightInfo: WeightInfo;
	}

	#[pallet::pallet]
	pub struct Pallet<T>(_);

	#[pallet::composite_enum]
	pub enum FreezeReason {
		/// Native currency backing votes of a running poll.
		#[codec(index = 0)]
		VoteLimit,
	}

	#[pallet::storage]
	pub type PollRequests<T: Config> = StorageMap<_, Blake2_128Concat, PollId, PollRequest<BlockNumberFor<T>>>;

	#[pallet::storage]
	pub type Polls<T: Config> = StorageMap<_, Blake2_128Concat, PollId, PollInfo<BlockNumberFor<T>>>;

	#[pallet::storage]
	pub type VoteLimits<T: Config> =
		StorageDoubleMap<_, Blake2_128Concat, PollId, Blake2_128Concat, AccountIdOf<T>, VoteLimit>;

	/// Polls each voter registered for and that may still hold some of its funds frozen.
	#[pallet::storage]
	pub type VoteFreezes<T: Config> =
		StorageMap<_, Blake2_128Concat, AccountIdOf<T>, BoundedVec<VoteFreeze, T::MaxFrozenPolls>, ValueQuery>;

	/// Votes received by a regulator for an objective type.
	#[pallet::storage]
	pub type VotesForRegulator<T: Config> = StorageNMap<
		_,
		(
			NMapKey<Blake2_128Concat, PollId>,
			NMapKey<Blake2_128Concat, AccountIdOf<T>>,
			NMapKey<Blake2_128Concat, ObjectiveType>,
		),
		Balance,
		ValueQuery,
	>;

	/// Votes cast by a voter, per regulator and objective type.
	#[pallet::storage]
	pub type VotesByVoter<T: Config> = StorageNMap<
		_,
		(
			NMapKey<Blake2_128Concat, PollId>,
			NMapKey<Blake2_128Concat, AccountIdOf<T>>,
			NMapKey<Blake2_128Concat, AccountIdOf<T>>,
			NMapKey<Blake2_128Concat, ObjectiveType>,
		),
		Balance,
		ValueQuery,
	>;

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config> {
		PollRequested {
			poll_id: PollId,
			min_start: BlockNumberFor<T>,
			max_start: BlockNumberFor<T>,
			for_purchaser: bool,
		},
		PollStarted {
			poll_id: PollId,
			start: BlockNumberFor<T>,
			end: BlockNumberFor<T>,
		},
		VoterRegistered {
			poll_id: PollId,
			voter: AccountIdOf<T>,
			vote_limit: Balance,
		},
		Voted {
			poll_id: PollId,
			voter: AccountIdOf<T>,
			regulator: AccountIdOf<T>,
			objective_type: ObjectiveType,
			votes: Balance,
		},
		/// The votes of an ended poll no longer freeze the voter's funds.
		VotesReleased {
			poll_id: PollId,
			voter: AccountIdOf<T>,
		},
	}

	#[pallet::error]
	pub enum Error<T> {
		/// The start window is empty, `min_start` must be lower than `max_start`.
		InvalidPollWindow,
		/// A purchaser poll needs the project token to measure vote limits.
		MissingPollToken,
		/// A request for this poll already exists.
		PollAlreadyRequested,
		/// No request was registered for this poll.
		PollNotRequested,
		/// The start window of the poll did not open yet.
		PollStartTooEarly,
		/// The start window of the poll already closed.
		PollStartTooLate,
		PollAlreadyStarted,
		PollNotStarted,
		/// Votes are only accepted between the start and the end of the poll.
		PollNotActive,
		/// The poll ended, vote limits can no longer be granted.
		PollExpired,
		VoterAlreadyRegistered,
		/// The voter holds nothing that could back a vote limit.
		NothingToVoteWith,
		/// The voter did not register for this poll.
		VoterNotRegistered,
		ZeroVotes,
		/// The votes exceed what is left of the voter's limit.
		InsufficientVotes,
		/// The voter no longer holds the funds that would back these votes.
		InsufficientHoldings,
		/// The voter already holds frozen votes in too many polls.
		TooManyFrozenPolls,
		/// Votes stay frozen until the poll can no longer accept them.
		PollNotClosed,
		/// The voter has nothing frozen for this poll.
		NothingToRelease,
	}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// Request a poll on behalf of the system.
		#[pallet::call_index(0)]
		#[pallet::weight(T::WeightInfo::register_poll_request())]
		pub fn register_poll_request(
			origin: OriginFor<T>,
			poll_id: PollId,
			min_start: BlockNumberFor<T>,
			max_start: BlockNumberFor<T>,
			for_purchaser: bool,
			token: Option<AssetId>,
		) -> DispatchResult {
			T::AdminOrigin::ensure_origin(origin)?;
			Self::do_register_poll_request(poll_id, min_start, max_start, for_purchaser, token)
		}

		#[pallet::call_index(1)]
		#[pallet::weight(T::WeightInfo::start_poll())]
		pub fn start_poll(origin: OriginFor<T>, poll_id: PollId) -> DispatchResult {
			let caller = ensure_signed(origin)?;
			Self::do_start_poll(&caller, poll_id)
		}

		/// Snapshot the caller's holdings as their vote limit for `poll_id`.
		#[pallet::call_index(2)]
		#[pallet::weight(T::WeightInfo::register_voter())]
		pub fn register_voter(origin: OriginFor<T>, poll_id: PollId) -> DispatchResult {
			let voter = ensure_signed(origin)?;
			Self::do_register_voter(voter, poll_id)
		}

		#[pallet::call_index(3)]
		#[pallet::weight(T::WeightInfo::vote())]
		pub fn vote(
			origin: OriginFor<T>,
			poll_id: PollId,
			regulator: AccountIdOf<T>,
			objective_type: ObjectiveType,
			votes: Balance,
		) -> DispatchResult {
			let voter = ensure_signed(origin)?;
			Self::do_vote(voter, poll_id, regulator, objective_type, votes)
		}

		/// Unfreeze what the caller voted with in a poll that ended.
		///
		/// Project tokens are released on their own once the poll ends. Native currency needs this call.
		#[pallet::call_index(4)]
		#[pallet::weight(T::WeightInfo::release_votes())]
		pub fn release_votes(origin: OriginFor<T>, poll_id: PollId) -> DispatchResult {
			let voter = ensure_signed(origin)?;
			Self::do_release_votes(voter, poll_id)
		}
	}
}
