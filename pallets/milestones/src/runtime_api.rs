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

#[allow(clippy::wildcard_imports)]
use crate::*;
use alloc::vec::Vec;
use frame_support::traits::fungible;
use frame_system::pallet_prelude::BlockNumberFor;
use itertools::Itertools;

sp_api::decl_runtime_apis! {
	#[api_version(1)]
	pub trait MilestoneInformation<T: Config> {
		/// Get the stage a milestone reached. `Inactive` for unknown milestones.
		fn milestone_state(project_id: ProjectId, milestone_id: MilestoneId) -> MilestoneState;

		/// Get the full record of a milestone.
		fn milestone_info(project_id: ProjectId, milestone_id: MilestoneId) -> Option<MilestoneInfo<T>>;

		/// Get the registry data of a project together with its locked funds.
		fn project_info(project_id: ProjectId) -> ProjectInfo<AccountIdOf<T>>;

		/// Get the refund requested by a purchaser on a milestone.
		fn refund_info(project_id: ProjectId, milestone_id: MilestoneId, purchaser: AccountIdOf<T>) -> Option<RefundInfo<BlockNumberFor<T>>>;
	}

	#[api_version(1)]
	pub trait RegulationInformation<T: Config> {
		/// Get the rating record of an objective.
		fn objective_info(project_id: ProjectId, milestone_id: MilestoneId, objective_id: ObjectiveId) -> Option<ObjectiveInfo<T>>;

		/// Get the bidders of an objective, its votes and its reward pool.
		fn objective_regulation_info(project_id: ProjectId, milestone_id: MilestoneId, objective_id: ObjectiveId) -> Option<ObjectiveRegulationInfo<AccountIdOf<T>>>;

		/// Get whether an objective is finalized and the reward a regulator can still withdraw from it.
		fn regulation_rewards_info(project_id: ProjectId, milestone_id: MilestoneId, objective_id: ObjectiveId, regulator: AccountIdOf<T>) -> (bool, Balance);

		/// Get the same information for every objective a regulator bid on, in objective order.
		fn regulation_rewards_for_regulator(project_id: ProjectId, milestone_id: MilestoneId, regulator: AccountIdOf<T>) -> Vec<(ObjectiveId, bool, Balance)>;
	}
}

impl<T: Config> Pallet<T> {
	pub fn milestone_state(project_id: ProjectId, milestone_id: MilestoneId) -> MilestoneState {
		Milestones::<T>::get(project_id, milestone_id).map(|milestone| milestone.state).unwrap_or_default()
	}

	pub fn milestone_info(project_id: ProjectId, milestone_id: MilestoneId) -> Option<MilestoneInfo<T>> {
		Milestones::<T>::get(project_id, milestone_id)
	}

	pub fn project_info(project_id: ProjectId) -> ProjectInfo<AccountIdOf<T>> {
		let collector = T::Collectors::ether_collector(project_id);
		ProjectInfo {
			owner: T::ProjectRegistry::project_owner(project_id),
			state: T::ProjectRegistry::project_state(project_id),
			token: T::ProjectRegistry::project_token(project_id),
			milestone_count: MilestoneCount::<T>::get(project_id),
			locked_funds: LockedFunds::<T>::get(project_id),
			collector_balance: <T::Currency as fungible::Inspect<_>>::balance(&collector),
		}
	}

	pub fn refund_info(
		project_id: ProjectId,
		milestone_id: MilestoneId,
		purchaser: &AccountIdOf<T>,
	) -> Option<RefundInfo<BlockNumberFor<T>>> {
		Refunds::<T>::get((project_id, milestone_id, purchaser))
	}

	pub fn objective_info(
		project_id: ProjectId,
		milestone_id: MilestoneId,
		objective_id: ObjectiveId,
	) -> Option<ObjectiveInfo<T>> {
		Objectives::<T>::get((project_id, milestone_id, objective_id))
	}

	pub fn objective_regulation_info(
		project_id: ProjectId,
		milestone_id: MilestoneId,
		objective_id: ObjectiveId,
	) -> Option<ObjectiveRegulationInfo<AccountIdOf<T>>> {
		Objectives::<T>::get((project_id, milestone_id, objective_id)).map(|objective| ObjectiveRegulationInfo {
			regulators: objective.regulators.into_inner(),
			total_votes: objective.total_votes,
			finalized: objective.finalized,
			reward_pool: objective.reward_pool,
		})
	}

	pub fn regulation_rewards_for_regulator(
		project_id: ProjectId,
		milestone_id: MilestoneId,
		regulator: &AccountIdOf<T>,
	) -> Vec<(ObjectiveId, bool, Balance)> {
		let Some(milestone) = Milestones::<T>::get(project_id, milestone_id) else { return Vec::new() };
		milestone
			.objective_ids
			.into_iter()
			.filter(|objective_id| Bids::<T>::contains_key((project_id, milestone_id, *objective_id, regulator)))
			.map(|objective_id| {
				let (finalized, amount) =
					Self::regulation_rewards_info(project_id, milestone_id, objective_id, regulator);
				(objective_id, finalized, amount)
			})
			.collect_vec()
	}
}
