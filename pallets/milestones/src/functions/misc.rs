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

// Helpers shared by the milestone, rating, reward and refund stages.
impl<T: Config> Pallet<T> {
	pub(crate) fn ensure_project_owner(caller: &AccountIdOf<T>, project_id: ProjectId) -> DispatchResult {
		let owner = T::ProjectRegistry::project_owner(project_id).ok_or(Error::<T>::ProjectNotFound)?;
		ensure!(&owner == caller, Error::<T>::NotProjectOwner);
		Ok(())
	}

	pub(crate) fn project_token(project_id: ProjectId) -> Result<AssetId, DispatchError> {
		T::ProjectRegistry::project_token(project_id).ok_or(Error::<T>::ProjectTokenNotFound.into())
	}

	pub(crate) fn milestone(
		project_id: ProjectId,
		milestone_id: MilestoneId,
	) -> Result<MilestoneInfo<T>, DispatchError> {
		Milestones::<T>::get(project_id, milestone_id).ok_or(Error::<T>::MilestoneNotFound.into())
	}

	/// Currency of the ether collector that no activated milestone claims.
	pub fn collector_free_balance(project_id: ProjectId) -> Balance {
		let collector = T::Collectors::ether_collector(project_id);
		<T::Currency as FungibleInspect<_>>::balance(&collector).saturating_sub(LockedFunds::<T>::get(project_id))
	}

	/// Pay `amount` out of the ether collector of `project_id`.
	///
	/// Fails without side effects when the collector cannot cover it. The payout stays pending and can be
	/// retried once the collector is topped up.
	pub(crate) fn pay_from_collector(project_id: ProjectId, to: &AccountIdOf<T>, amount: Balance) -> DispatchResult {
		let collector = T::Collectors::ether_collector(project_id);
		let available =
			<T::Currency as FungibleInspect<_>>::reducible_balance(&collector, Preservation::Expendable, Fortitude::Polite);
		if available < amount {
			log::warn!(
				target: "pallet_milestones",
				"collector of project {} holds {} but {} is due",
				project_id,
				available,
				amount
			);
			return Err(Error::<T>::CollectorUnderfunded.into());
		}
		<T::Currency as FungibleMutate<_>>::transfer(&collector, to, amount, Preservation::Expendable)?;
		Ok(())
	}

	/// Shares of a finalized objective its bidders did not withdraw yet.
	///
	/// Rounding dust of the proportional split is not part of it.
	pub(crate) fn unpaid_rewards(
		project_id: ProjectId,
		milestone_id: MilestoneId,
		objective_id: &ObjectiveId,
		objective: &ObjectiveInfo<T>,
	) -> Balance {
		objective
			.regulators
			.iter()
			.filter_map(|regulator| Bids::<T>::get((project_id, milestone_id, objective_id, regulator)))
			.filter(|bid| !bid.reward_withdrawn)
			.fold(Balance::zero(), |total, bid| total.saturating_add(objective.regulation_reward(bid.vote_weight)))
	}

	/// Part of the milestone pledge regulators can still claim.
	///
	/// Objectives under rating may pay up to their maximum reward, finalized ones what their bidders did
	/// not withdraw.
	pub(crate) fn reserved_rewards(
		project_id: ProjectId,
		milestone_id: MilestoneId,
		milestone: &MilestoneInfo<T>,
	) -> Balance {
		milestone
			.objective_ids
			.iter()
			.filter_map(|objective_id| {
				Objectives::<T>::get((project_id, milestone_id, objective_id)).map(|objective| (objective_id, objective))
			})
			.fold(Balance::zero(), |total, (objective_id, objective)| {
				let reserved = if objective.finalized {
					Self::unpaid_rewards(project_id, milestone_id, objective_id, &objective)
				} else {
					objective.max_reward
				};
				total.saturating_add(reserved)
			})
	}

	/// Stop counting up to `amount` of the milestone's pledge in the project's locked funds.
	pub(crate) fn release_funds(project_id: ProjectId, milestone: &mut MilestoneInfo<T>, amount: Balance) -> Balance {
		let released = amount.min(milestone.still_locked());
		milestone.wei_released = milestone.wei_released.saturating_add(released);
		LockedFunds::<T>::mutate(project_id, |locked| *locked = locked.saturating_sub(released));
		released
	}
}
