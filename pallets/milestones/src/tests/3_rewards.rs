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

fn withdraw(regulator: AccountId, milestone_id: MilestoneId, objective_id: ObjectiveId) -> DispatchResult {
	PolimecMilestones::withdraw_regulation_reward(RuntimeOrigin::signed(regulator), PROJECT_ID, milestone_id, objective_id)
}

mod withdrawals {
	use super::*;

	#[test]
	fn regulators_withdraw_their_share_once() {
		ExtBuilder::default().build().execute_with(|| {
			let (milestone_id, _) = finalized_milestone();
			assert_eq!(
				PolimecMilestones::regulation_rewards_info(PROJECT_ID, milestone_id, OBJECTIVE_1, &REGULATOR_A),
				(true, 30)
			);

			assert_ok!(withdraw(REGULATOR_A, milestone_id, OBJECTIVE_1));
			System::assert_last_event(
				Event::RegulationRewardWithdrawn {
					project_id: PROJECT_ID,
					milestone_id,
					objective_id: OBJECTIVE_1,
					regulator: REGULATOR_A,
					amount: 30,
				}
				.into(),
			);
			assert_eq!(Balances::balance(&REGULATOR_A), 30);
			assert_eq!(collector_balance(), COLLECTED - 30);
			assert_eq!(LockedFunds::<Test>::get(PROJECT_ID), WEI_LOCKED - 30);
			assert_eq!(Milestones::<Test>::get(PROJECT_ID, milestone_id).unwrap().wei_released, 30);

			// Paid rewards read as nothing left to withdraw.
			assert_eq!(
				PolimecMilestones::regulation_rewards_info(PROJECT_ID, milestone_id, OBJECTIVE_1, &REGULATOR_A),
				(true, 0)
			);
			assert_noop!(withdraw(REGULATOR_A, milestone_id, OBJECTIVE_1), Error::<Test>::RewardAlreadyWithdrawn);

			assert_ok!(withdraw(REGULATOR_B, milestone_id, OBJECTIVE_1));
			assert_eq!(Balances::balance(&REGULATOR_B), 20);
			let objective = Objectives::<Test>::get((PROJECT_ID, milestone_id, OBJECTIVE_1)).unwrap();
			assert_eq!(objective.reward_paid, objective.reward_pool);
		});
	}

	#[test]
	fn rewards_need_a_finalized_objective_and_a_bid() {
		ExtBuilder::default().build().execute_with(|| {
			let (milestone_id, _, _) = rating_milestone();
			assert_ok!(bid(REGULATOR_A, milestone_id, OBJECTIVE_1));
			assert_eq!(
				PolimecMilestones::regulation_rewards_info(PROJECT_ID, milestone_id, OBJECTIVE_1, &REGULATOR_A),
				(false, 0)
			);
			assert_noop!(withdraw(REGULATOR_A, milestone_id, OBJECTIVE_1), Error::<Test>::ObjectiveNotFinalized);
			assert_noop!(withdraw(REGULATOR_C, milestone_id, OBJECTIVE_1), Error::<Test>::NoBidFound);
			assert_noop!(withdraw(REGULATOR_A, milestone_id, [99u8; 32]), Error::<Test>::ObjectiveNotFound);
		});
	}

	#[test]
	fn bids_without_votes_earn_nothing() {
		ExtBuilder::default().build().execute_with(|| {
			let (milestone_id, deadline, _) = rating_milestone();
			assert_ok!(bid(REGULATOR_A, milestone_id, OBJECTIVE_2));
			System::set_block_number(deadline - <Test as Config>::RatingFinalizeWindowFromEnd::get());
			assert_ok!(PolimecMilestones::finalize_all_bids(RuntimeOrigin::signed(FOUNDER), PROJECT_ID, milestone_id));

			assert_eq!(
				PolimecMilestones::regulation_rewards_info(PROJECT_ID, milestone_id, OBJECTIVE_2, &REGULATOR_A),
				(true, 0)
			);
			assert_noop!(withdraw(REGULATOR_A, milestone_id, OBJECTIVE_2), Error::<Test>::NothingToWithdraw);
		});
	}

	#[test]
	fn underfunded_collector_delays_the_payout() {
		ExtBuilder::default().build().execute_with(|| {
			let (milestone_id, _) = finalized_milestone();
			Balances::set_balance(&ETHER_COLLECTOR, 10);
			assert_noop!(withdraw(REGULATOR_A, milestone_id, OBJECTIVE_1), Error::<Test>::CollectorUnderfunded);

			Balances::set_balance(&ETHER_COLLECTOR, COLLECTED);
			assert_ok!(withdraw(REGULATOR_A, milestone_id, OBJECTIVE_1));
			assert_eq!(Balances::balance(&REGULATOR_A), 30);
		});
	}
}

mod locked_funds {
	use super::*;

	#[test]
	fn completion_keeps_unpaid_rewards_locked() {
		ExtBuilder::default().build().execute_with(|| {
			let (milestone_id, deadline) = finalized_milestone();
			assert_ok!(withdraw(REGULATOR_A, milestone_id, OBJECTIVE_1));

			System::set_block_number(deadline);
			assert_ok!(PolimecMilestones::admin_finalize(RuntimeOrigin::signed(NOBODY), PROJECT_ID, milestone_id));
			System::assert_last_event(
				Event::MilestoneFinalized { project_id: PROJECT_ID, milestone_id, unlocked: WEI_LOCKED - 30 - 20 }
					.into(),
			);
			assert_eq!(LockedFunds::<Test>::get(PROJECT_ID), 20);

			// Rewards stay withdrawable after completion.
			assert_ok!(withdraw(REGULATOR_B, milestone_id, OBJECTIVE_1));
			assert_eq!(LockedFunds::<Test>::get(PROJECT_ID), 0);
			assert_eq!(PolimecMilestones::collector_free_balance(PROJECT_ID), COLLECTED - 50);
		});
	}

	#[test]
	fn completion_releases_rounding_dust() {
		ExtBuilder::default().build().execute_with(|| {
			let (milestone_id, deadline, rating_start) = rating_milestone();
			assert_ok!(bid(REGULATOR_A, milestone_id, OBJECTIVE_1));
			assert_ok!(bid(REGULATOR_B, milestone_id, OBJECTIVE_1));

			// 51% of the rating stage: a pool of 51 split 30.6 and 20.4.
			let rating_length = <Test as Config>::RatingStageLength::get();
			System::set_block_number(rating_start + rating_length * 51 / 100);
			assert_ok!(PolimecMilestones::finalize_bid_for_objective(
				RuntimeOrigin::signed(FOUNDER),
				PROJECT_ID,
				milestone_id,
				OBJECTIVE_1
			));
			let objective = Objectives::<Test>::get((PROJECT_ID, milestone_id, OBJECTIVE_1)).unwrap();
			assert_eq!(objective.reward_pool, 51);
			assert_eq!(
				PolimecMilestones::regulation_rewards_info(PROJECT_ID, milestone_id, OBJECTIVE_1, &REGULATOR_A),
				(true, 30)
			);
			assert_eq!(
				PolimecMilestones::regulation_rewards_info(PROJECT_ID, milestone_id, OBJECTIVE_1, &REGULATOR_B),
				(true, 20)
			);

			System::set_block_number(deadline);
			assert_ok!(PolimecMilestones::admin_finalize(RuntimeOrigin::signed(NOBODY), PROJECT_ID, milestone_id));
			System::assert_last_event(
				Event::MilestoneFinalized { project_id: PROJECT_ID, milestone_id, unlocked: WEI_LOCKED - 50 }.into(),
			);
			assert_eq!(LockedFunds::<Test>::get(PROJECT_ID), 50);

			assert_ok!(withdraw(REGULATOR_A, milestone_id, OBJECTIVE_1));
			assert_ok!(withdraw(REGULATOR_B, milestone_id, OBJECTIVE_1));
			assert_eq!(LockedFunds::<Test>::get(PROJECT_ID), 0);
			assert_eq!(PolimecMilestones::collector_free_balance(PROJECT_ID), COLLECTED - 50);
		});
	}
}

mod shares {
	use super::*;

	fn finalized_objective(total_votes: Balance, reward_pool: Balance) -> ObjectiveInfo<Test> {
		let mut objective = ObjectiveInfo::<Test>::new(1, TECH, reward_pool);
		objective.total_votes = total_votes;
		objective.reward_pool = reward_pool;
		objective.finalized = true;
		objective
	}

	#[test]
	fn shares_are_proportional_to_the_votes() {
		let objective = finalized_objective(100, 50);
		assert_eq!(objective.regulation_reward(60), 30);
		assert_eq!(objective.regulation_reward(40), 20);
		assert_eq!(objective.regulation_reward(0), 0);
	}

	#[test]
	fn rounding_never_pays_more_than_the_pool() {
		let objective = finalized_objective(3, 10);
		let paid: Balance = (0..3).map(|_| objective.regulation_reward(1)).sum();
		assert_eq!(paid, 9);

		let objective = finalized_objective(7, 1_000_003);
		let paid: Balance = [1, 2, 4].iter().map(|votes| objective.regulation_reward(*votes)).sum();
		assert!(paid <= objective.reward_pool);
	}

	#[test]
	fn nothing_is_owed_before_finalization_or_without_votes() {
		let mut objective = finalized_objective(100, 50);
		objective.finalized = false;
		assert_eq!(objective.regulation_reward(60), 0);

		let objective = finalized_objective(0, 50);
		assert_eq!(objective.regulation_reward(0), 0);
	}
}
