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

impl<T: Config> Pallet<T> {
	/// Called by user extrinsic
	/// Pays a regulator its share of a finalized objective, out of the project's ether collector.
	///
	/// # Storage access
	/// * [`Bids`] - Flagging the reward as withdrawn. The bid itself is kept.
	/// * [`Objectives`] - Tracking what was paid out of the pool.
	/// * [`Milestones`], [`LockedFunds`] - Releasing the payout from the milestone pledge.
	pub fn do_withdraw_regulation_reward(
		regulator: AccountIdOf<T>,
		project_id: ProjectId,
		milestone_id: MilestoneId,
		objective_id: ObjectiveId,
	) -> DispatchResult {
		// * Get variables *
		let mut milestone = Self::milestone(project_id, milestone_id)?;
		let mut objective =
			Objectives::<T>::get((project_id, milestone_id, objective_id)).ok_or(Error::<T>::ObjectiveNotFound)?;
		let mut bid = Bids::<T>::get((project_id, milestone_id, objective_id, &regulator)).ok_or(Error::<T>::NoBidFound)?;

		// * Validity checks *
		ensure!(objective.finalized, Error::<T>::ObjectiveNotFinalized);
		ensure!(!bid.reward_withdrawn, Error::<T>::RewardAlreadyWithdrawn);
		let amount = objective.regulation_reward(bid.vote_weight);
		ensure!(!amount.is_zero(), Error::<T>::NothingToWithdraw);

		// * Transfer funds *
		Self::pay_from_collector(project_id, &regulator, amount)?;

		// * Update storage *
		bid.reward_withdrawn = true;
		objective.reward_paid = objective.reward_paid.saturating_add(amount);
		Self::release_funds(project_id, &mut milestone, amount);
		Bids::<T>::insert((project_id, milestone_id, objective_id, &regulator), bid);
		Objectives::<T>::insert((project_id, milestone_id, objective_id), objective);
		Milestones::<T>::insert(project_id, milestone_id, milestone);

		// * Emit events *
		Self::deposit_event(Event::RegulationRewardWithdrawn { project_id, milestone_id, objective_id, regulator, amount });
		Ok(())
	}

	/// Whether the objective is finalized, and the reward `regulator` can still withdraw from it.
	///
	/// The amount reads zero once withdrawn, it never reports what was already paid.
	pub fn regulation_rewards_info(
		project_id: ProjectId,
		milestone_id: MilestoneId,
		objective_id: ObjectiveId,
		regulator: &AccountIdOf<T>,
	) -> (bool, Balance) {
		let Some(objective) = Objectives::<T>::get((project_id, milestone_id, objective_id)) else {
			return (false, Zero::zero());
		};
		let amount = match Bids::<T>::get((project_id, milestone_id, objective_id, regulator)) {
			Some(bid) if !bid.reward_withdrawn => objective.regulation_reward(bid.vote_weight),
			_ => Zero::zero(),
		};
		(objective.finalized, amount)
	}
}
