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
use crate::Pallet as PolimecMilestones;
use alloc::vec::Vec;
use frame_benchmarking::v2::*;
use frame_support::{
	traits::{fungible::Mutate as FungibleMutate, fungibles::Mutate as FungiblesMutate, EnsureOrigin, Get},
	BoundedVec,
};
use frame_system::{pallet_prelude::BlockNumberFor, RawOrigin};
use polimec_common::time;
use sp_arithmetic::traits::{One, Saturating};

const PROJECT_ID: ProjectId = 1;
const PRICE: Balance = 10;
const COLLECTED: Balance = 1_000_000_000_000_000;
const WEI_LOCKED: Balance = 1_000_000_000_000;
const MAX_REWARD: Balance = 1_000_000;
const VOTE_WEIGHT: Balance = 1_000;
const PURCHASED: Balance = 10_000_000;
const OBJECTIVE_TYPE: ObjectiveType = [1u8; 32];

fn assert_last_event<T: Config>(generic_event: <T as Config>::RuntimeEvent) {
	frame_system::Pallet::<T>::assert_last_event(generic_event.into());
}

fn objective_id(index: u32) -> ObjectiveId {
	let mut id = [0u8; 32];
	id[..4].copy_from_slice(&index.to_le_bytes());
	id
}

fn now<T: Config>() -> BlockNumberFor<T> {
	frame_system::Pallet::<T>::block_number()
}

/// Long enough for the rating stage to run in full before the refund stage opens.
fn milestone_length<T: Config>() -> BlockNumberFor<T> {
	T::RatingStageMaxStartTimeFromEnd::get()
		.saturating_add(T::RatingStageLength::get())
		.saturating_add(T::RefundStageMinStartTimeFromEnd::get())
		.saturating_add(100u32.into())
}

/// Registers the project with a funded ether collector. Returns its founder.
fn create_project<T: Config>() -> AccountIdOf<T> {
	let founder: AccountIdOf<T> = account("founder", 0, 0);
	T::BenchmarkHelper::create_project(PROJECT_ID, &founder, PRICE);
	T::ProjectRegistry::set_project_state(PROJECT_ID, ProjectState::AppAccepted).expect("the registry accepts the state");
	<T::Currency as FungibleMutate<_>>::set_balance(&T::Collectors::ether_collector(PROJECT_ID), COLLECTED);
	founder
}

#[allow(clippy::type_complexity)]
fn objectives<T: Config>(
	count: u32,
) -> (
	BoundedVec<ObjectiveId, T::MaxObjectivesPerMilestone>,
	BoundedVec<ObjectiveType, T::MaxObjectivesPerMilestone>,
	BoundedVec<Balance, T::MaxObjectivesPerMilestone>,
) {
	let ids: Vec<ObjectiveId> = (0..count).map(objective_id).collect();
	let types: Vec<ObjectiveType> = (0..count).map(|_| OBJECTIVE_TYPE).collect();
	let rewards: Vec<Balance> = (0..count).map(|_| MAX_REWARD).collect();
	(
		ids.try_into().expect("count is within the objective bound"),
		types.try_into().expect("count is within the objective bound"),
		rewards.try_into().expect("count is within the objective bound"),
	)
}

fn add_milestone<T: Config>(founder: &AccountIdOf<T>, objective_count: u32) -> MilestoneId {
	let (ids, types, rewards) = objectives::<T>(objective_count);
	PolimecMilestones::<T>::do_add_milestone(founder, PROJECT_ID, milestone_length::<T>(), ids, types, rewards)
		.expect("the project accepts milestones");
	MilestoneCount::<T>::get(PROJECT_ID)
}

/// Activates the milestone now. Returns its deadline.
fn activate<T: Config>(founder: &AccountIdOf<T>, milestone_id: MilestoneId) -> BlockNumberFor<T> {
	if !T::ProjectRegistry::project_state(PROJECT_ID).accepts_activation() {
		T::ProjectRegistry::set_project_state(PROJECT_ID, ProjectState::TokenSale)
			.expect("the registry accepts the state");
	}
	let min_start = now::<T>().saturating_add(One::one());
	let max_start = min_start.saturating_add(One::one());
	PolimecMilestones::<T>::do_activate(founder, PROJECT_ID, milestone_id, WEI_LOCKED, min_start, max_start)
		.expect("the collector covers the pledge");
	Milestones::<T>::get(PROJECT_ID, milestone_id)
		.and_then(|milestone| milestone.deadline())
		.expect("the milestone was just activated")
}

/// Activated milestone with every objective open for bidding. Returns its id, deadline and rating window.
fn rating_milestone<T: Config>(
	founder: &AccountIdOf<T>,
	objective_count: u32,
) -> (MilestoneId, BlockNumberFor<T>, RatingStageInfo<BlockNumberFor<T>>) {
	let milestone_id = add_milestone::<T>(founder, objective_count);
	let deadline = activate::<T>(founder, milestone_id);
	PolimecMilestones::<T>::do_start_rating_stage(founder, PROJECT_ID, milestone_id)
		.expect("the rating stage starts right after activation");
	let rating = RatingStages::<T>::get(PROJECT_ID, milestone_id).expect("the rating stage was just started");
	(milestone_id, deadline, rating)
}

fn place_bid<T: Config>(regulator: &AccountIdOf<T>, milestone_id: MilestoneId, objective: ObjectiveId) {
	T::BenchmarkHelper::set_vote_weight(PollId::new(PROJECT_ID, milestone_id), regulator, OBJECTIVE_TYPE, VOTE_WEIGHT);
	PolimecMilestones::<T>::do_bid(regulator.clone(), PROJECT_ID, milestone_id, objective).expect("bidding is open");
}

/// Fills the objective with bids of generated regulators, leaving `free` slots.
fn fill_bids<T: Config>(milestone_id: MilestoneId, objective: ObjectiveId, free: u32) {
	for index in 0..T::MaxRegulatorsPerObjective::get().saturating_sub(free) {
		let regulator: AccountIdOf<T> = account("regulator", index, 0);
		place_bid::<T>(&regulator, milestone_id, objective);
	}
}

fn regulator_origin<T: Config>() -> Result<(T::RuntimeOrigin, AccountIdOf<T>), BenchmarkError> {
	let origin = T::RegulatorOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;
	let regulator = T::RegulatorOrigin::ensure_origin(origin.clone()).map_err(|_| BenchmarkError::Weightless)?;
	Ok((origin, regulator))
}

/// Milestone in its refund stage, opened from the rating stage by a purchaser holding project tokens.
fn refunding_milestone<T: Config>(founder: &AccountIdOf<T>) -> (MilestoneId, AccountIdOf<T>) {
	let purchaser: AccountIdOf<T> = account("purchaser", 0, 0);
	let token = T::ProjectRegistry::project_token(PROJECT_ID).expect("the project has a token");
	<T::ProjectTokens as FungiblesMutate<_>>::mint_into(token, &purchaser, PURCHASED).expect("the token exists");

	let (milestone_id, deadline, _) = rating_milestone::<T>(founder, T::MaxObjectivesPerMilestone::get());
	frame_system::Pallet::<T>::set_block_number(time::before(deadline, T::RefundStageMinStartTimeFromEnd::get()));
	PolimecMilestones::<T>::do_start_refund_stage(purchaser.clone(), PROJECT_ID, milestone_id)
		.expect("the refund stage is open");
	(milestone_id, purchaser)
}

#[benchmarks]
mod benchmarks {
	use super::*;

	#[benchmark]
	fn add_milestone() {
		let founder = create_project::<T>();
		let (ids, types, rewards) = objectives::<T>(T::MaxObjectivesPerMilestone::get());
		let length = milestone_length::<T>();

		#[extrinsic_call]
		add_milestone(RawOrigin::Signed(founder), PROJECT_ID, length, ids, types, rewards);

		assert_last_event::<T>(Event::<T>::MilestoneAdded { project_id: PROJECT_ID, milestone_id: 1, length }.into());
	}

	#[benchmark]
	fn activate() {
		let founder = create_project::<T>();
		let milestone_id = super::add_milestone::<T>(&founder, T::MaxObjectivesPerMilestone::get());
		T::ProjectRegistry::set_project_state(PROJECT_ID, ProjectState::TokenSale).expect("the registry accepts the state");
		let min_start = now::<T>().saturating_add(One::one());
		let max_start = min_start.saturating_add(One::one());

		#[extrinsic_call]
		activate(RawOrigin::Signed(founder), PROJECT_ID, milestone_id, WEI_LOCKED, min_start, max_start);

		assert_eq!(LockedFunds::<T>::get(PROJECT_ID), WEI_LOCKED);
		assert_eq!(T::ProjectRegistry::project_state(PROJECT_ID), ProjectState::Milestone);
	}

	#[benchmark]
	fn start_rating_stage() {
		let founder = create_project::<T>();
		let milestone_id = super::add_milestone::<T>(&founder, T::MaxObjectivesPerMilestone::get());
		super::activate::<T>(&founder, milestone_id);

		#[extrinsic_call]
		start_rating_stage(RawOrigin::Signed(founder), PROJECT_ID, milestone_id);

		assert!(RatingStages::<T>::contains_key(PROJECT_ID, milestone_id));
		assert!(Objectives::<T>::contains_key((PROJECT_ID, milestone_id, objective_id(0))));
	}

	#[benchmark]
	fn start_refund_stage() {
		let founder = create_project::<T>();
		let purchaser: AccountIdOf<T> = account("purchaser", 0, 0);
		let token = T::ProjectRegistry::project_token(PROJECT_ID).expect("the project has a token");
		<T::ProjectTokens as FungiblesMutate<_>>::mint_into(token, &purchaser, PURCHASED).expect("the token exists");
		let milestone_id = super::add_milestone::<T>(&founder, 1);
		let deadline = super::activate::<T>(&founder, milestone_id);
		frame_system::Pallet::<T>::set_block_number(time::before(deadline, T::RefundStageMinStartTimeFromEnd::get()));

		#[extrinsic_call]
		start_refund_stage(RawOrigin::Signed(purchaser.clone()), PROJECT_ID, milestone_id);

		assert_last_event::<T>(
			Event::<T>::RefundStageStarted { project_id: PROJECT_ID, milestone_id, caller: purchaser }.into(),
		);
	}

	// Every objective of the first milestone holds finalized, unwithdrawn bids. The other milestones
	// are read when checking whether the project completes.
	#[benchmark]
	fn admin_finalize(m: Linear<1, { <T as Config>::MaxMilestones::get() }>) {
		let founder = create_project::<T>();
		let objective_count = T::MaxObjectivesPerMilestone::get();
		let (milestone_id, deadline, rating) = rating_milestone::<T>(&founder, objective_count);
		for index in 0..objective_count {
			fill_bids::<T>(milestone_id, objective_id(index), 0);
		}
		for _ in 1..m {
			super::add_milestone::<T>(&founder, 1);
		}
		frame_system::Pallet::<T>::set_block_number(rating.end);
		PolimecMilestones::<T>::do_finalize_all_bids(&founder, PROJECT_ID, milestone_id).expect("bidding closed");
		frame_system::Pallet::<T>::set_block_number(deadline);

		#[extrinsic_call]
		admin_finalize(RawOrigin::Signed(founder), PROJECT_ID, milestone_id);

		let milestone = Milestones::<T>::get(PROJECT_ID, milestone_id).expect("the milestone exists");
		assert_eq!(milestone.state, MilestoneState::Completion);
		assert_eq!(LockedFunds::<T>::get(PROJECT_ID), milestone.still_locked());
	}

	#[benchmark]
	fn bid() -> Result<(), BenchmarkError> {
		let (origin, regulator) = regulator_origin::<T>()?;
		let founder = create_project::<T>();
		let (milestone_id, _, _) = rating_milestone::<T>(&founder, 1);
		let objective = objective_id(0);
		fill_bids::<T>(milestone_id, objective, 1);
		T::BenchmarkHelper::set_vote_weight(PollId::new(PROJECT_ID, milestone_id), &regulator, OBJECTIVE_TYPE, VOTE_WEIGHT);

		#[extrinsic_call]
		bid(origin as T::RuntimeOrigin, PROJECT_ID, milestone_id, objective);

		assert_last_event::<T>(
			Event::<T>::BidPlaced {
				project_id: PROJECT_ID,
				milestone_id,
				objective_id: objective,
				regulator,
				vote_weight: VOTE_WEIGHT,
			}
			.into(),
		);
		Ok(())
	}

	#[benchmark]
	fn back_out_from_bid() -> Result<(), BenchmarkError> {
		let (origin, regulator) = regulator_origin::<T>()?;
		let founder = create_project::<T>();
		let (milestone_id, _, _) = rating_milestone::<T>(&founder, 1);
		let objective = objective_id(0);
		fill_bids::<T>(milestone_id, objective, 1);
		place_bid::<T>(&regulator, milestone_id, objective);

		#[extrinsic_call]
		back_out_from_bid(origin as T::RuntimeOrigin, PROJECT_ID, milestone_id, objective);

		assert!(!Bids::<T>::contains_key((PROJECT_ID, milestone_id, objective, &regulator)));
		assert_last_event::<T>(
			Event::<T>::BidWithdrawn { project_id: PROJECT_ID, milestone_id, objective_id: objective, regulator }
				.into(),
		);
		Ok(())
	}

	#[benchmark]
	fn finalize_bid_for_objective() {
		let founder = create_project::<T>();
		let (milestone_id, _, rating) = rating_milestone::<T>(&founder, 1);
		let objective = objective_id(0);
		fill_bids::<T>(milestone_id, objective, 0);
		frame_system::Pallet::<T>::set_block_number(rating.end);

		#[extrinsic_call]
		finalize_bid_for_objective(RawOrigin::Signed(founder), PROJECT_ID, milestone_id, objective);

		let objective = Objectives::<T>::get((PROJECT_ID, milestone_id, objective)).expect("the objective exists");
		assert!(objective.finalized);
		assert_eq!(objective.reward_pool, MAX_REWARD);
	}

	#[benchmark]
	fn finalize_all_bids(n: Linear<1, { <T as Config>::MaxObjectivesPerMilestone::get() }>) {
		let founder = create_project::<T>();
		let (milestone_id, _, rating) = rating_milestone::<T>(&founder, n);
		frame_system::Pallet::<T>::set_block_number(rating.end);

		#[extrinsic_call]
		finalize_all_bids(RawOrigin::Signed(founder), PROJECT_ID, milestone_id);

		for index in 0..n {
			let objective =
				Objectives::<T>::get((PROJECT_ID, milestone_id, objective_id(index))).expect("the objective exists");
			assert!(objective.finalized);
		}
	}

	#[benchmark]
	fn withdraw_regulation_reward() {
		let founder = create_project::<T>();
		let (milestone_id, _, rating) = rating_milestone::<T>(&founder, 1);
		let objective = objective_id(0);
		fill_bids::<T>(milestone_id, objective, 0);
		let regulator: AccountIdOf<T> = account("regulator", 0, 0);
		frame_system::Pallet::<T>::set_block_number(rating.end);
		PolimecMilestones::<T>::do_finalize_bid_for_objective(&founder, PROJECT_ID, milestone_id, objective)
			.expect("bidding closed");
		let (_, amount) = PolimecMilestones::<T>::regulation_rewards_info(PROJECT_ID, milestone_id, objective, &regulator);

		#[extrinsic_call]
		withdraw_regulation_reward(RawOrigin::Signed(regulator.clone()), PROJECT_ID, milestone_id, objective);

		assert_last_event::<T>(
			Event::<T>::RegulationRewardWithdrawn {
				project_id: PROJECT_ID,
				milestone_id,
				objective_id: objective,
				regulator,
				amount,
			}
			.into(),
		);
	}

	// Objectives under rating keep their maximum reward out of the refundable pledge.
	#[benchmark]
	fn refund() {
		let founder = create_project::<T>();
		let (milestone_id, purchaser) = refunding_milestone::<T>(&founder);

		#[extrinsic_call]
		refund(RawOrigin::Signed(purchaser.clone()), PROJECT_ID, milestone_id, PURCHASED);

		let refund = Refunds::<T>::get((PROJECT_ID, milestone_id, &purchaser)).expect("the refund was recorded");
		assert_eq!(refund.currency_amount, PURCHASED / PRICE);
	}

	#[benchmark]
	fn withdraw_refund() {
		let founder = create_project::<T>();
		let (milestone_id, purchaser) = refunding_milestone::<T>(&founder);
		PolimecMilestones::<T>::do_refund(purchaser.clone(), PROJECT_ID, milestone_id, PURCHASED)
			.expect("the pledge covers the refund");
		let available_at = now::<T>().saturating_add(T::RefundDuration::get());
		frame_system::Pallet::<T>::set_block_number(available_at);

		#[extrinsic_call]
		withdraw_refund(RawOrigin::Signed(purchaser.clone()), PROJECT_ID, milestone_id);

		assert_last_event::<T>(
			Event::<T>::RefundWithdrawn { project_id: PROJECT_ID, milestone_id, purchaser, amount: PURCHASED / PRICE }
				.into(),
		);
	}

	impl_benchmark_test_suite!(PolimecMilestones, crate::mock::ExtBuilder::default().build(), crate::mock::Test);
}
