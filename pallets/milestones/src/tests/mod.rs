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

use super::*;
use crate::mock::*;
use frame_support::{
	assert_noop, assert_ok,
	traits::{
		fungible::{Inspect as FungibleInspect, Mutate as FungibleMutate},
		fungibles::{Inspect as FungiblesInspect, Mutate as FungiblesMutate},
		Get,
	},
	BoundedVec,
};
use sp_runtime::{DispatchError, DispatchResult};

#[path = "1_milestone.rs"]
mod milestone;
#[path = "4_refunds.rs"]
mod refunds;
#[path = "2_rating.rs"]
mod rating;
#[path = "3_rewards.rs"]
mod rewards;

const TECH: ObjectiveType = [1u8; 32];
const DESIGN: ObjectiveType = [2u8; 32];
const OBJECTIVE_1: ObjectiveId = [11u8; 32];
const OBJECTIVE_2: ObjectiveId = [12u8; 32];
const MAX_REWARD_1: Balance = 100;
const MAX_REWARD_2: Balance = 200;

const MILESTONE_LENGTH: u64 = 365 * DAY;
const WEI_LOCKED: Balance = 10_000;

fn bounded<T, S: Get<u32>>(items: Vec<T>) -> BoundedVec<T, S> {
	BoundedVec::try_from(items).ok().expect("test vectors fit the bounds")
}

fn add_milestone(length: u64, objectives: Vec<(ObjectiveId, ObjectiveType, Balance)>) -> DispatchResult {
	let (ids, rest): (Vec<_>, Vec<_>) = objectives.into_iter().map(|(id, kind, reward)| (id, (kind, reward))).unzip();
	let (types, rewards): (Vec<_>, Vec<_>) = rest.into_iter().unzip();
	PolimecMilestones::add_milestone(RuntimeOrigin::signed(FOUNDER), PROJECT_ID, length, bounded(ids), bounded(types), bounded(rewards))
}

/// Adds a year long milestone with a technical and a design objective.
fn add_default_milestone() -> MilestoneId {
	assert_ok!(add_milestone(
		MILESTONE_LENGTH,
		vec![(OBJECTIVE_1, TECH, MAX_REWARD_1), (OBJECTIVE_2, DESIGN, MAX_REWARD_2)]
	));
	MilestoneCount::<Test>::get(PROJECT_ID)
}

fn activate(milestone_id: MilestoneId, wei_locked: Balance) -> DispatchResult {
	let now = System::block_number();
	PolimecMilestones::activate(RuntimeOrigin::signed(FOUNDER), PROJECT_ID, milestone_id, wei_locked, now + 1, now + 100)
}

/// Opens the token sale, then adds and activates the default milestone. Returns its id and deadline.
fn active_milestone() -> (MilestoneId, u64) {
	MockProjectRegistry::set_state(PROJECT_ID, ProjectState::TokenSale);
	let milestone_id = add_default_milestone();
	assert_ok!(activate(milestone_id, WEI_LOCKED));
	(milestone_id, System::block_number() + MILESTONE_LENGTH)
}

/// Runs the reputation poll of the milestone: 60 technical votes for regulator A, 40 for regulator B.
fn vote_for_regulators(milestone_id: MilestoneId) {
	let poll_id = PollId::new(PROJECT_ID, milestone_id);
	System::set_block_number(System::block_number() + 1);
	assert_ok!(Reputation::start_poll(RuntimeOrigin::signed(NOBODY), poll_id));
	let poll = pallet_reputation::Polls::<Test>::get(poll_id).expect("poll was just started");
	System::set_block_number(poll.start);

	for (investor, regulator, votes) in [(INVESTOR_1, REGULATOR_A, 60), (INVESTOR_2, REGULATOR_B, 40)] {
		assert_ok!(Reputation::register_voter(RuntimeOrigin::signed(investor), poll_id));
		assert_ok!(Reputation::vote(RuntimeOrigin::signed(investor), poll_id, regulator, TECH, votes));
	}
}

/// Active milestone with a poll behind it, rating stage started 35 days before the deadline.
/// Returns the milestone id, its deadline and the start of the rating stage.
fn rating_milestone() -> (MilestoneId, u64, u64) {
	let (milestone_id, deadline) = active_milestone();
	vote_for_regulators(milestone_id);
	let rating_start = deadline - 35 * DAY;
	System::set_block_number(rating_start);
	assert_ok!(PolimecMilestones::start_rating_stage(RuntimeOrigin::signed(FOUNDER), PROJECT_ID, milestone_id));
	(milestone_id, deadline, rating_start)
}

fn bid(regulator: AccountId, milestone_id: MilestoneId, objective_id: ObjectiveId) -> DispatchResult {
	PolimecMilestones::bid(RuntimeOrigin::signed(regulator), PROJECT_ID, milestone_id, objective_id)
}

/// Rating milestone where regulators A and B bid on the technical objective, finalized half way
/// through the rating stage. The objective pool is then 50, split 30 for A and 20 for B.
fn finalized_milestone() -> (MilestoneId, u64) {
	let (milestone_id, deadline, rating_start) = rating_milestone();
	assert_ok!(bid(REGULATOR_A, milestone_id, OBJECTIVE_1));
	assert_ok!(bid(REGULATOR_B, milestone_id, OBJECTIVE_1));
	System::set_block_number(rating_start + 14 * DAY);
	assert_ok!(PolimecMilestones::finalize_bid_for_objective(
		RuntimeOrigin::signed(FOUNDER),
		PROJECT_ID,
		milestone_id,
		OBJECTIVE_1
	));
	(milestone_id, deadline)
}

/// Active milestone moved to its refund stage by a purchaser, two weeks before the deadline.
fn refunding_milestone() -> (MilestoneId, u64) {
	let (milestone_id, deadline) = active_milestone();
	System::set_block_number(deadline - 14 * DAY);
	assert_ok!(PolimecMilestones::start_refund_stage(RuntimeOrigin::signed(PURCHASER), PROJECT_ID, milestone_id));
	(milestone_id, deadline)
}

fn collector_balance() -> Balance {
	<Balances as FungibleInspect<AccountId>>::balance(&ETHER_COLLECTOR)
}

fn token_balance(who: AccountId) -> Balance {
	<Assets as FungiblesInspect<AccountId>>::balance(PROJECT_TOKEN, &who)
}
