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

// If you feel like getting in touch with us, you can do so at info@polimec.org
#![cfg(feature = "runtime-benchmarks")]
use super::*;

#[allow(unused)]
use crate::Pallet as Reputation;
use frame_benchmarking::v2::*;
use frame_support::traits::{fungible, EnsureOrigin, Get};
use frame_system::{pallet_prelude::BlockNumberFor, RawOrigin};
use sp_runtime::traits::{One, Saturating};

const POLL: PollId = PollId::new(0, 1);
const OBJECTIVE_TYPE: ObjectiveType = [1u8; 32];
const VOTER_FUNDS: Balance = 1_000_000_000_000_000_000;
const VOTES: Balance = 1_000_000_000;

fn assert_last_event<T: Config>(generic_event: <T as Config>::RuntimeEvent) {
	frame_system::Pallet::<T>::assert_last_event(generic_event.into());
}

/// Requests a native currency poll startable right away.
fn request_native_poll<T: Config>(poll_id: PollId) {
	let now = frame_system::Pallet::<T>::block_number();
	Reputation::<T>::do_register_poll_request(poll_id, now, now.saturating_add(One::one()), false, None)
		.expect("poll ids are unused and the window is not empty");
}

fn start_native_poll<T: Config>(poll_id: PollId) -> PollInfo<BlockNumberFor<T>> {
	request_native_poll::<T>(poll_id);
	let starter: T::AccountId = account("starter", 0, 0);
	Reputation::<T>::do_start_poll(&starter, poll_id).expect("the poll was just requested");
	Polls::<T>::get(poll_id).expect("the poll was just started")
}

/// Registers `voter` in every open poll it can hold but one, so the next registration scans a full list.
fn fill_vote_freezes<T: Config>(voter: &T::AccountId) {
	for milestone_id in 1..T::MaxFrozenPolls::get() {
		let poll_id = PollId::new(1, milestone_id);
		request_native_poll::<T>(poll_id);
		Reputation::<T>::do_register_voter(voter.clone(), poll_id).expect("the voter holds native currency");
	}
}

#[benchmarks(
	where
	T::NativeCurrency: fungible::Mutate<T::AccountId>,
)]
mod benchmarks {
	use super::*;

	#[benchmark]
	fn register_poll_request() -> Result<(), BenchmarkError> {
		let origin = T::AdminOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;
		let now = frame_system::Pallet::<T>::block_number();
		let max_start = now.saturating_add(One::one());

		#[extrinsic_call]
		register_poll_request(origin as T::RuntimeOrigin, POLL, now, max_start, false, None);

		assert_last_event::<T>(
			Event::<T>::PollRequested { poll_id: POLL, min_start: now, max_start, for_purchaser: false }.into(),
		);
		Ok(())
	}

	#[benchmark]
	fn start_poll() {
		let caller: T::AccountId = whitelisted_caller();
		request_native_poll::<T>(POLL);

		#[extrinsic_call]
		start_poll(RawOrigin::Signed(caller), POLL);

		assert!(Polls::<T>::contains_key(POLL));
	}

	#[benchmark]
	fn register_voter() {
		let voter: T::AccountId = whitelisted_caller();
		<T::NativeCurrency as fungible::Mutate<_>>::set_balance(&voter, VOTER_FUNDS);
		fill_vote_freezes::<T>(&voter);
		request_native_poll::<T>(POLL);

		#[extrinsic_call]
		register_voter(RawOrigin::Signed(voter.clone()), POLL);

		assert_last_event::<T>(Event::<T>::VoterRegistered { poll_id: POLL, voter, vote_limit: VOTER_FUNDS }.into());
	}

	#[benchmark]
	fn vote() {
		let voter: T::AccountId = whitelisted_caller();
		let regulator: T::AccountId = account("regulator", 0, 0);
		<T::NativeCurrency as fungible::Mutate<_>>::set_balance(&voter, VOTER_FUNDS);
		fill_vote_freezes::<T>(&voter);
		let poll = start_native_poll::<T>(POLL);
		Reputation::<T>::do_register_voter(voter.clone(), POLL).expect("the voter holds native currency");
		frame_system::Pallet::<T>::set_block_number(poll.start);

		#[extrinsic_call]
		vote(RawOrigin::Signed(voter.clone()), POLL, regulator.clone(), OBJECTIVE_TYPE, VOTES);

		assert_eq!(Reputation::<T>::voting_result(POLL, &regulator, OBJECTIVE_TYPE), VOTES);
		assert_eq!(Reputation::<T>::frozen_votes(&voter, None), VOTES);
	}

	#[benchmark]
	fn release_votes() {
		let voter: T::AccountId = whitelisted_caller();
		let regulator: T::AccountId = account("regulator", 0, 0);
		<T::NativeCurrency as fungible::Mutate<_>>::set_balance(&voter, VOTER_FUNDS);
		let poll = start_native_poll::<T>(POLL);
		Reputation::<T>::do_register_voter(voter.clone(), POLL).expect("the voter holds native currency");
		frame_system::Pallet::<T>::set_block_number(poll.start);
		Reputation::<T>::do_vote(voter.clone(), POLL, regulator, OBJECTIVE_TYPE, VOTES).expect("the poll is open");
		frame_system::Pallet::<T>::set_block_number(poll.end);

		#[extrinsic_call]
		release_votes(RawOrigin::Signed(voter.clone()), POLL);

		assert_eq!(Reputation::<T>::frozen_votes(&voter, None), 0);
		assert_last_event::<T>(Event::<T>::VotesReleased { poll_id: POLL, voter }.into());
	}

	impl_benchmark_test_suite!(Reputation, crate::mock::ExtBuilder::default().build(), crate::mock::Test);
}
