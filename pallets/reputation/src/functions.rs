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

use crate::{
	AccountIdOf, AssetId, Balance, Config, Error, Event, FreezeReason, ObjectiveType, Pallet, PollId, PollInfo,
	PollRequest, PollRequests, Polls, ReputationProvider, VoteFreeze, VoteFreezes, VoteLimit, VoteLimits, VotesByVoter,
	VotesForRegulator,
};
use frame_support::{
	ensure,
	pallet_prelude::*,
	traits::{fungible, fungible::MutateFreeze, fungibles},
};
use frame_system::pallet_prelude::BlockNumberFor;
use sp_runtime::traits::{Saturating, Zero};

impl<T: Config> Pallet<T> {
	pub fn do_register_poll_request(
		poll_id: PollId,
		min_start: BlockNumberFor<T>,
		max_start: BlockNumberFor<T>,
		for_purchaser: bool,
		token: Option<AssetId>,
	) -> DispatchResult {
		ensure!(min_start < max_start, Error::<T>::InvalidPollWindow);
		ensure!(!for_purchaser || token.is_some(), Error::<T>::MissingPollToken);
		ensure!(!PollRequests::<T>::contains_key(poll_id), Error::<T>::PollAlreadyRequested);

		PollRequests::<T>::insert(poll_id, PollRequest { min_start, max_start, for_purchaser, token });

		log::debug!(target: "pallet_reputation", "poll {:?} requested for [{:?}, {:?}]", poll_id, min_start, max_start);
		Self::deposit_event(Event::PollRequested { poll_id, min_start, max_start, for_purchaser });
		Ok(())
	}

	pub fn do_start_poll(caller: &AccountIdOf<T>, poll_id: PollId) -> DispatchResult {
		let request = PollRequests::<T>::get(poll_id).ok_or(Error::<T>::PollNotRequested)?;
		let now = <frame_system::Pallet<T>>::block_number();

		ensure!(!Polls::<T>::contains_key(poll_id), Error::<T>::PollAlreadyStarted);
		ensure!(now >= request.min_start, Error::<T>::PollStartTooEarly);
		ensure!(now <= request.max_start, Error::<T>::PollStartTooLate);

		let start = now.saturating_add(T::PollDelayLength::get());
		let end = start.saturating_add(T::PollLength::get());
		Polls::<T>::insert(poll_id, PollInfo { start, end });

		log::debug!(target: "pallet_reputation", "poll {:?} started by {:?}", poll_id, caller);
		Self::deposit_event(Event::PollStarted { poll_id, start, end });
		Ok(())
	}

	pub fn do_register_voter(voter: AccountIdOf<T>, poll_id: PollId) -> DispatchResult {
		let request = PollRequests::<T>::get(poll_id).ok_or(Error::<T>::PollNotRequested)?;
		ensure!(!Self::poll_expired(poll_id), Error::<T>::PollExpired);
		ensure!(!VoteLimits::<T>::contains_key(poll_id, &voter), Error::<T>::VoterAlreadyRegistered);

		let (vote_limit, token) = Self::holdings(&request, &voter)?;
		ensure!(!vote_limit.is_zero(), Error::<T>::NothingToVoteWith);

		let mut freezes = VoteFreezes::<T>::get(&voter);
		freezes.retain(|freeze| !Self::poll_closed(freeze.poll_id));
		freezes.try_push(VoteFreeze { poll_id, token }).map_err(|_| Error::<T>::TooManyFrozenPolls)?;

		VoteLimits::<T>::insert(poll_id, &voter, VoteLimit { total: vote_limit, used: Zero::zero() });
		VoteFreezes::<T>::insert(&voter, freezes);
		Self::refresh_native_freeze(&voter)?;

		Self::deposit_event(Event::VoterRegistered { poll_id, voter, vote_limit });
		Ok(())
	}

	pub fn do_vote(
		voter: AccountIdOf<T>,
		poll_id: PollId,
		regulator: AccountIdOf<T>,
		objective_type: ObjectiveType,
		votes: Balance,
	) -> DispatchResult {
		let poll = Polls::<T>::get(poll_id).ok_or(Error::<T>::PollNotStarted)?;
		let now = <frame_system::Pallet<T>>::block_number();
		ensure!(poll.start <= now && now < poll.end, Error::<T>::PollNotActive);
		ensure!(!votes.is_zero(), Error::<T>::ZeroVotes);

		let mut limit = VoteLimits::<T>::get(poll_id, &voter).ok_or(Error::<T>::VoterNotRegistered)?;
		ensure!(votes <= limit.remaining(), Error::<T>::InsufficientVotes);
		let request = PollRequests::<T>::get(poll_id).ok_or(Error::<T>::PollNotRequested)?;
		let (holdings, token) = Self::holdings(&request, &voter)?;
		limit.used = limit.used.saturating_add(votes);
		ensure!(limit.used <= holdings, Error::<T>::InsufficientHoldings);

		VoteLimits::<T>::insert(poll_id, &voter, limit);
		if token.is_none() {
			Self::refresh_native_freeze(&voter)?;
		}
		VotesForRegulator::<T>::mutate((poll_id, &regulator, objective_type), |total| {
			*total = total.saturating_add(votes)
		});
		VotesByVoter::<T>::mutate((poll_id, &voter, &regulator, objective_type), |total| {
			*total = total.saturating_add(votes)
		});

		Self::deposit_event(Event::Voted { poll_id, voter, regulator, objective_type, votes });
		Ok(())
	}

	pub fn do_release_votes(voter: AccountIdOf<T>, poll_id: PollId) -> DispatchResult {
		ensure!(Self::poll_closed(poll_id), Error::<T>::PollNotClosed);

		let mut freezes = VoteFreezes::<T>::get(&voter);
		let registered = freezes.len();
		freezes.retain(|freeze| freeze.poll_id != poll_id);
		ensure!(freezes.len() < registered, Error::<T>::NothingToRelease);

		if freezes.is_empty() {
			VoteFreezes::<T>::remove(&voter);
		} else {
			VoteFreezes::<T>::insert(&voter, freezes);
		}
		Self::refresh_native_freeze(&voter)?;

		Self::deposit_event(Event::VotesReleased { poll_id, voter });
		Ok(())
	}

	/// What `who` holds of the currency measuring vote limits of the poll, and which asset it is.
	fn holdings(
		request: &PollRequest<BlockNumberFor<T>>,
		who: &AccountIdOf<T>,
	) -> Result<(Balance, Option<AssetId>), DispatchError> {
		match (request.for_purchaser, request.token) {
			(true, Some(token)) =>
				Ok((<T::ProjectTokens as fungibles::Inspect<_>>::balance(token, who), Some(token))),
			(true, None) => Err(Error::<T>::MissingPollToken.into()),
			(false, _) => Ok((<T::NativeCurrency as fungible::Inspect<_>>::balance(who), None)),
		}
	}

	/// Votes `who` cast with `token` (native currency for `None`) that are still frozen.
	///
	/// The same holdings back every poll of a voter, so the largest use counts, not the sum.
	pub fn frozen_votes(who: &AccountIdOf<T>, token: Option<AssetId>) -> Balance {
		VoteFreezes::<T>::get(who)
			.iter()
			.filter(|freeze| freeze.token == token && !Self::poll_closed(freeze.poll_id))
			.filter_map(|freeze| VoteLimits::<T>::get(freeze.poll_id, who))
			.map(|limit| limit.used)
			.max()
			.unwrap_or_default()
	}

	fn refresh_native_freeze(who: &AccountIdOf<T>) -> DispatchResult {
		let reason: T::RuntimeFreezeReason = FreezeReason::VoteLimit.into();
		let frozen = Self::frozen_votes(who, None);
		if frozen.is_zero() {
			T::NativeCurrency::thaw(&reason, who)
		} else {
			T::NativeCurrency::set_freeze(&reason, who, frozen)
		}
	}

	/// A poll is closed once it can no longer take votes: it ended, or it was never started in time.
	pub fn poll_closed(poll_id: PollId) -> bool {
		let now = <frame_system::Pallet<T>>::block_number();
		match Polls::<T>::get(poll_id) {
			Some(poll) => now >= poll.end,
			None => PollRequests::<T>::get(poll_id).map_or(true, |request| now > request.max_start),
		}
	}

	/// Votes `regulator` received for `objective_type` in `poll_id`.
	pub fn voting_result(poll_id: PollId, regulator: &AccountIdOf<T>, objective_type: ObjectiveType) -> Balance {
		VotesForRegulator::<T>::get((poll_id, regulator, objective_type))
	}

	/// What is left of the vote limit of `voter`, zero if not registered.
	pub fn available_votes(poll_id: PollId, voter: &AccountIdOf<T>) -> Balance {
		VoteLimits::<T>::get(poll_id, voter).map(|limit| limit.remaining()).unwrap_or_default()
	}

	/// A poll expires once its voting period ended. Polls that never started are not expired.
	pub fn poll_expired(poll_id: PollId) -> bool {
		Polls::<T>::get(poll_id).is_some_and(|poll| <frame_system::Pallet<T>>::block_number() >= poll.end)
	}
}

impl<T: Config> ReputationProvider<AccountIdOf<T>, BlockNumberFor<T>> for Pallet<T> {
	fn register_poll_request(
		poll_id: PollId,
		min_start: BlockNumberFor<T>,
		max_start: BlockNumberFor<T>,
		for_purchaser: bool,
		token: Option<AssetId>,
	) -> DispatchResult {
		Self::do_register_poll_request(poll_id, min_start, max_start, for_purchaser, token)
	}

	fn vote_weight(poll_id: &PollId, regulator: &AccountIdOf<T>, objective_type: &ObjectiveType) -> Balance {
		Self::voting_result(*poll_id, regulator, *objective_type)
	}
}

impl<T: Config> pallet_assets::FrozenBalance<AssetId, AccountIdOf<T>, Balance> for Pallet<T> {
	fn frozen_balance(asset: AssetId, who: &AccountIdOf<T>) -> Option<Balance> {
		let frozen = Self::frozen_votes(who, Some(asset));
		(!frozen.is_zero()).then_some(frozen)
	}

	fn died(asset: AssetId, who: &AccountIdOf<T>) {
		if VoteFreezes::<T>::contains_key(who) {
			VoteFreezes::<T>::mutate(who, |freezes| freezes.retain(|freeze| freeze.token != Some(asset)));
		}
	}
}
