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
use itertools::Itertools;

impl<T: Config> Pallet<T> {
	/// Called by user extrinsic
	/// Appends an `Inactive` milestone to the project roadmap.
	///
	/// # Storage access
	/// * [`MilestoneCount`] - Assigning the next 1-based milestone id.
	/// * [`Milestones`] - Storing the new milestone.
	pub fn do_add_milestone(
		caller: &AccountIdOf<T>,
		project_id: ProjectId,
		length: BlockNumberFor<T>,
		objective_ids: BoundedVec<ObjectiveId, T::MaxObjectivesPerMilestone>,
		objective_types: BoundedVec<ObjectiveType, T::MaxObjectivesPerMilestone>,
		max_rewards: BoundedVec<Balance, T::MaxObjectivesPerMilestone>,
	) -> DispatchResult {
		// * Validity checks *
		Self::ensure_project_owner(caller, project_id)?;
		ensure!(
			T::ProjectRegistry::project_state(project_id).accepts_new_milestones(),
			Error::<T>::ProjectNotAcceptingMilestones
		);
		ensure!(!length.is_zero(), Error::<T>::ZeroMilestoneLength);
		ensure!(!objective_ids.is_empty(), Error::<T>::NoObjectives);
		ensure!(
			objective_ids.len() == objective_types.len() && objective_ids.len() == max_rewards.len(),
			Error::<T>::ObjectiveLengthMismatch
		);
		ensure!(objective_ids.iter().sorted().dedup().count() == objective_ids.len(), Error::<T>::DuplicateObjective);

		let milestone_count = MilestoneCount::<T>::get(project_id);
		ensure!(milestone_count < T::MaxMilestones::get(), Error::<T>::TooManyMilestones);
		let milestone_id = milestone_count.checked_add(1).ok_or(Error::<T>::BadMath)?;

		// * Update storage *
		let milestone = MilestoneInfo::<T> {
			length,
			objective_ids,
			objective_types,
			max_rewards,
			wei_locked: Zero::zero(),
			wei_released: Zero::zero(),
			pending_refunds: Zero::zero(),
			state: MilestoneState::Inactive,
			activation: None,
		};
		Milestones::<T>::insert(project_id, milestone_id, milestone);
		MilestoneCount::<T>::insert(project_id, milestone_id);

		// * Emit events *
		Self::deposit_event(Event::MilestoneAdded { project_id, milestone_id, length });
		Ok(())
	}

	/// Called by user extrinsic
	/// Locks `wei_locked` of the collected currency and moves the milestone to `InProgress`.
	///
	/// # Storage access
	/// * [`Milestones`] - Recording the pledge, the activation window and the deadline.
	/// * [`LockedFunds`] - Reserving the pledge against other activations.
	///
	/// # Side effects
	/// * Requests the reputation poll of the milestone, for holders of the project token.
	/// * Moves the project to [`ProjectState::Milestone`].
	pub fn do_activate(
		caller: &AccountIdOf<T>,
		project_id: ProjectId,
		milestone_id: MilestoneId,
		wei_locked: Balance,
		min_start: BlockNumberFor<T>,
		max_start: BlockNumberFor<T>,
	) -> DispatchResult {
		// * Get variables *
		let mut milestone = Self::milestone(project_id, milestone_id)?;
		let project_state = T::ProjectRegistry::project_state(project_id);
		let now = <frame_system::Pallet<T>>::block_number();

		// * Validity checks *
		Self::ensure_project_owner(caller, project_id)?;
		ensure!(milestone.state == MilestoneState::Inactive, Error::<T>::MilestoneAlreadyActivated);
		ensure!(project_state.accepts_activation(), Error::<T>::ProjectNotInTokenSale);
		let token = Self::project_token(project_id)?;

		let deadline = now.checked_add(&milestone.length).ok_or(Error::<T>::BadMath)?;
		ensure!(now < min_start && min_start < max_start && max_start < deadline, Error::<T>::InvalidActivationWindow);

		let total_max_rewards = milestone
			.max_rewards
			.iter()
			.try_fold(Balance::zero(), |total, reward| total.checked_add(*reward))
			.ok_or(Error::<T>::BadMath)?;
		ensure!(total_max_rewards <= wei_locked, Error::<T>::RewardsExceedLockedFunds);
		ensure!(Self::collector_free_balance(project_id) >= wei_locked, Error::<T>::InsufficientCollectorFunds);

		// * Update storage *
		LockedFunds::<T>::try_mutate(project_id, |locked| -> DispatchResult {
			*locked = locked.checked_add(wei_locked).ok_or(Error::<T>::BadMath)?;
			Ok(())
		})?;
		milestone.wei_locked = wei_locked;
		milestone.state = MilestoneState::InProgress;
		milestone.activation = Some(Activation { min_start, max_start, start: now, deadline });
		Milestones::<T>::insert(project_id, milestone_id, milestone);

		T::Reputation::register_poll_request(
			PollId::new(project_id, milestone_id),
			min_start,
			max_start,
			true,
			Some(token),
		)?;
		if project_state != ProjectState::Milestone {
			T::ProjectRegistry::set_project_state(project_id, ProjectState::Milestone)?;
		}

		// * Emit events *
		log::debug!(
			target: "pallet_milestones::milestone",
			"milestone {}/{} activated at {:?} until {:?}",
			project_id,
			milestone_id,
			now,
			deadline
		);
		Self::deposit_event(Event::MilestoneActivated { project_id, milestone_id, wei_locked, start: now, deadline });
		Ok(())
	}

	/// Called by user extrinsic
	/// Moves an `InProgress` milestone to `RatingStage` and opens bidding on its objectives.
	pub fn do_start_rating_stage(
		caller: &AccountIdOf<T>,
		project_id: ProjectId,
		milestone_id: MilestoneId,
	) -> DispatchResult {
		// * Get variables *
		let mut milestone = Self::milestone(project_id, milestone_id)?;
		let now = <frame_system::Pallet<T>>::block_number();

		// * Validity checks *
		Self::ensure_project_owner(caller, project_id)?;
		ensure!(milestone.state == MilestoneState::InProgress, Error::<T>::MilestoneNotInProgress);
		let deadline = milestone.deadline().ok_or(Error::<T>::MilestoneNotActivated)?;
		ensure!(
			now <= time::before(deadline, T::RatingStageMaxStartTimeFromEnd::get()),
			Error::<T>::RatingStageCutoffPassed
		);

		// * Calculate new variables *
		let end = now.checked_add(&T::RatingStageLength::get()).ok_or(Error::<T>::BadMath)?;

		// * Update storage *
		Self::do_start_rating(project_id, milestone_id, now, end, &milestone)?;
		milestone.state = MilestoneState::RatingStage;
		Milestones::<T>::insert(project_id, milestone_id, milestone);

		// * Emit events *
		Self::deposit_event(Event::RatingStageStarted { project_id, milestone_id, start: now, end });
		Ok(())
	}

	/// Called by user extrinsic
	/// Moves the milestone to `RefundStage`. Callable by any holder of the project token.
	pub fn do_start_refund_stage(
		caller: AccountIdOf<T>,
		project_id: ProjectId,
		milestone_id: MilestoneId,
	) -> DispatchResult {
		// * Get variables *
		let mut milestone = Self::milestone(project_id, milestone_id)?;
		let now = <frame_system::Pallet<T>>::block_number();

		// * Validity checks *
		ensure!(milestone.state != MilestoneState::RefundStage, Error::<T>::RefundStageAlreadyStarted);
		ensure!(
			matches!(milestone.state, MilestoneState::InProgress | MilestoneState::RatingStage),
			Error::<T>::MilestoneNotRefundable
		);
		let token = Self::project_token(project_id)?;
		ensure!(
			!<T::ProjectTokens as FungiblesInspect<_>>::balance(token, &caller).is_zero(),
			Error::<T>::NotPurchaser
		);
		let deadline = milestone.deadline().ok_or(Error::<T>::MilestoneNotActivated)?;
		ensure!(
			now >= time::before(deadline, T::RefundStageMinStartTimeFromEnd::get()),
			Error::<T>::RefundStageTooEarly
		);
		ensure!(now < deadline, Error::<T>::RefundWindowClosed);

		// * Update storage *
		milestone.state = MilestoneState::RefundStage;
		Milestones::<T>::insert(project_id, milestone_id, milestone);

		// * Emit events *
		Self::deposit_event(Event::RefundStageStarted { project_id, milestone_id, caller });
		Ok(())
	}

	/// Called by user extrinsic
	/// Completes a milestone once its deadline passed, from whatever stage it reached.
	///
	/// The pledge stops counting as locked, except the unwithdrawn shares of finalized objectives and
	/// the currency owed to purchasers who asked for a refund. Completing the last open milestone
	/// completes the project.
	pub fn do_admin_finalize(project_id: ProjectId, milestone_id: MilestoneId) -> DispatchResult {
		// * Get variables *
		let mut milestone = Self::milestone(project_id, milestone_id)?;
		let now = <frame_system::Pallet<T>>::block_number();

		// * Validity checks *
		let deadline = milestone.deadline().ok_or(Error::<T>::MilestoneNotActivated)?;
		ensure!(milestone.state != MilestoneState::Completion, Error::<T>::MilestoneAlreadyCompleted);
		ensure!(now >= deadline, Error::<T>::DeadlineNotReached);

		// * Calculate new variables *
		// Objectives left open can no longer be finalized, only withdrawable shares stay owed.
		let unpaid_rewards = milestone
			.objective_ids
			.iter()
			.filter_map(|objective_id| {
				Objectives::<T>::get((project_id, milestone_id, objective_id)).map(|objective| (objective_id, objective))
			})
			.filter(|(_, objective)| objective.finalized)
			.fold(Balance::zero(), |total, (objective_id, objective)| {
				total.saturating_add(Self::unpaid_rewards(project_id, milestone_id, objective_id, &objective))
			});
		let owed = unpaid_rewards.saturating_add(milestone.pending_refunds);
		let releasable = milestone.still_locked().saturating_sub(owed);
		let unlocked = Self::release_funds(project_id, &mut milestone, releasable);

		// * Update storage *
		milestone.state = MilestoneState::Completion;
		Milestones::<T>::insert(project_id, milestone_id, milestone);

		let all_completed = Milestones::<T>::iter_prefix_values(project_id)
			.all(|milestone| milestone.state == MilestoneState::Completion);
		if all_completed {
			T::ProjectRegistry::set_project_state(project_id, ProjectState::Complete)?;
		}

		// * Emit events *
		log::debug!(
			target: "pallet_milestones::milestone",
			"milestone {}/{} completed, {} unlocked, {} still owed",
			project_id,
			milestone_id,
			unlocked,
			owed
		);
		Self::deposit_event(Event::MilestoneFinalized { project_id, milestone_id, unlocked });
		Ok(())
	}
}
