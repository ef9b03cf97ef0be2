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
	/// Registers the objectives of a milestone for rating and opens bidding in `[start, end)`.
	///
	/// Runs once per milestone, from [`do_start_rating_stage`](Self::do_start_rating_stage).
	pub(crate) fn do_start_rating(
		project_id: ProjectId,
		milestone_id: MilestoneId,
		start: BlockNumberFor<T>,
		end: BlockNumberFor<T>,
		milestone: &MilestoneInfo<T>,
	) -> DispatchResult {
		ensure!(!RatingStages::<T>::contains_key(project_id, milestone_id), Error::<T>::RatingAlreadyStarted);
		ensure!(start < end, Error::<T>::InvalidRatingWindow);

		RatingStages::<T>::insert(project_id, milestone_id, RatingStageInfo { start, end });
		let objectives =
			milestone.objective_ids.iter().zip(milestone.objective_types.iter()).zip(milestone.max_rewards.iter());
		for (index, ((objective_id, objective_type), max_reward)) in (1u32..).zip(objectives) {
			Objectives::<T>::insert(
				(project_id, milestone_id, objective_id),
				ObjectiveInfo::<T>::new(index, *objective_type, *max_reward),
			);
		}

		log::debug!(
			target: "pallet_milestones::rating",
			"rating of {}/{} open in [{:?}, {:?}) for {} objectives",
			project_id,
			milestone_id,
			start,
			end,
			milestone.objective_ids.len()
		);
		Ok(())
	}

	/// Called by user extrinsic
	/// Records the bid of a regulator on an objective, staking its current reputation votes.
	///
	/// # Storage access
	/// * [`RatingStages`] - Checking the bidding window.
	/// * [`Objectives`] - Appending the regulator and adding its votes to the total.
	/// * [`Bids`] - Storing the vote weight snapshot.
	pub fn do_bid(
		regulator: AccountIdOf<T>,
		project_id: ProjectId,
		milestone_id: MilestoneId,
		objective_id: ObjectiveId,
	) -> DispatchResult {
		// * Get variables *
		let rating = RatingStages::<T>::get(project_id, milestone_id).ok_or(Error::<T>::RatingNotStarted)?;
		let mut objective =
			Objectives::<T>::get((project_id, milestone_id, objective_id)).ok_or(Error::<T>::ObjectiveNotFound)?;
		let now = <frame_system::Pallet<T>>::block_number();

		// * Validity checks *
		ensure!(rating.start <= now && now < rating.end, Error::<T>::BiddingClosed);
		ensure!(!objective.finalized, Error::<T>::ObjectiveAlreadyFinalized);
		ensure!(
			!Bids::<T>::contains_key((project_id, milestone_id, objective_id, &regulator)),
			Error::<T>::AlreadyBid
		);

		// * Calculate new variables *
		let vote_weight = T::Reputation::vote_weight(
			&PollId::new(project_id, milestone_id),
			&regulator,
			&objective.objective_type,
		);
		objective.regulators.try_push(regulator.clone()).map_err(|_| Error::<T>::TooManyRegulators)?;
		objective.total_votes = objective.total_votes.checked_add(vote_weight).ok_or(Error::<T>::BadMath)?;

		// * Update storage *
		Objectives::<T>::insert((project_id, milestone_id, objective_id), objective);
		Bids::<T>::insert(
			(project_id, milestone_id, objective_id, &regulator),
			BidInfo { vote_weight, reward_withdrawn: false },
		);

		// * Emit events *
		Self::deposit_event(Event::BidPlaced { project_id, milestone_id, objective_id, regulator, vote_weight });
		Ok(())
	}

	/// Called by user extrinsic
	/// Retracts a bid before its objective is finalized.
	pub fn do_back_out_from_bid(
		regulator: AccountIdOf<T>,
		project_id: ProjectId,
		milestone_id: MilestoneId,
		objective_id: ObjectiveId,
	) -> DispatchResult {
		let mut objective =
			Objectives::<T>::get((project_id, milestone_id, objective_id)).ok_or(Error::<T>::ObjectiveNotFound)?;
		ensure!(!objective.finalized, Error::<T>::ObjectiveAlreadyFinalized);
		let bid = Bids::<T>::get((project_id, milestone_id, objective_id, &regulator)).ok_or(Error::<T>::NoBidFound)?;

		objective.regulators.retain(|bidder| bidder != &regulator);
		objective.total_votes = objective.total_votes.saturating_sub(bid.vote_weight);

		Objectives::<T>::insert((project_id, milestone_id, objective_id), objective);
		Bids::<T>::remove((project_id, milestone_id, objective_id, &regulator));

		Self::deposit_event(Event::BidWithdrawn { project_id, milestone_id, objective_id, regulator });
		Ok(())
	}

	/// Called by user extrinsic
	/// Closes the bidding of one objective and fixes its reward pool.
	pub fn do_finalize_bid_for_objective(
		caller: &AccountIdOf<T>,
		project_id: ProjectId,
		milestone_id: MilestoneId,
		objective_id: ObjectiveId,
	) -> DispatchResult {
		let rating = Self::ensure_can_finalize(caller, project_id, milestone_id)?;
		let objective =
			Objectives::<T>::get((project_id, milestone_id, objective_id)).ok_or(Error::<T>::ObjectiveNotFound)?;
		ensure!(!objective.finalized, Error::<T>::ObjectiveAlreadyFinalized);

		Self::finalize_objective(project_id, milestone_id, objective_id, objective, &rating);
		Ok(())
	}

	/// Called by user extrinsic
	/// Finalizes every objective of the milestone that is still open.
	pub fn do_finalize_all_bids(
		caller: &AccountIdOf<T>,
		project_id: ProjectId,
		milestone_id: MilestoneId,
	) -> DispatchResult {
		let rating = Self::ensure_can_finalize(caller, project_id, milestone_id)?;
		let milestone = Self::milestone(project_id, milestone_id)?;

		let mut finalized = 0u32;
		for objective_id in milestone.objective_ids.iter() {
			let Some(objective) = Objectives::<T>::get((project_id, milestone_id, objective_id)) else { continue };
			if objective.finalized {
				continue;
			}
			Self::finalize_objective(project_id, milestone_id, *objective_id, objective, &rating);
			finalized = finalized.saturating_add(1);
		}
		ensure!(finalized > 0, Error::<T>::NothingToFinalize);
		Ok(())
	}

	/// Founder checks shared by both finalization calls.
	///
	/// Finalization opens when the bidding window closes, or earlier once the milestone enters its
	/// last `RatingFinalizeWindowFromEnd` blocks.
	fn ensure_can_finalize(
		caller: &AccountIdOf<T>,
		project_id: ProjectId,
		milestone_id: MilestoneId,
	) -> Result<RatingStageInfo<BlockNumberFor<T>>, DispatchError> {
		Self::ensure_project_owner(caller, project_id)?;
		let milestone = Self::milestone(project_id, milestone_id)?;
		ensure!(milestone.state != MilestoneState::Completion, Error::<T>::MilestoneAlreadyCompleted);
		let rating = RatingStages::<T>::get(project_id, milestone_id).ok_or(Error::<T>::RatingNotStarted)?;
		let deadline = milestone.deadline().ok_or(Error::<T>::MilestoneNotActivated)?;

		let now = <frame_system::Pallet<T>>::block_number();
		let finalize_window_open = now >= time::before(deadline, T::RatingFinalizeWindowFromEnd::get());
		ensure!(now >= rating.end || finalize_window_open, Error::<T>::FinalizeNotAllowedYet);
		Ok(rating)
	}

	/// The pool is the maximum reward scaled by the elapsed fraction of the rating stage length.
	fn finalize_objective(
		project_id: ProjectId,
		milestone_id: MilestoneId,
		objective_id: ObjectiveId,
		mut objective: ObjectiveInfo<T>,
		rating: &RatingStageInfo<BlockNumberFor<T>>,
	) {
		let now = <frame_system::Pallet<T>>::block_number();
		let elapsed = time::elapsed_fraction(rating.start, now, T::RatingStageLength::get());
		let reward_pool = elapsed.mul_floor(objective.max_reward);

		objective.finalized = true;
		objective.finalized_at = Some(now);
		objective.reward_pool = reward_pool;
		let total_votes = objective.total_votes;
		Objectives::<T>::insert((project_id, milestone_id, objective_id), objective);

		log::debug!(
			target: "pallet_milestones::rating",
			"objective {:?} of {}/{} finalized with a pool of {} ({:?} of the rating stage elapsed)",
			objective_id,
			project_id,
			milestone_id,
			reward_pool,
			elapsed
		);
		Self::deposit_event(Event::ObjectiveFinalized {
			project_id,
			milestone_id,
			objective_id,
			reward_pool,
			total_votes,
		});
	}
}
