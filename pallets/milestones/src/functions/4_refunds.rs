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
	/// Moves `token_amount` project tokens of the purchaser to the token collector and records the
	/// currency owed in exchange, withdrawable after the refund cool-down.
	///
	/// Refunds are paid out of the milestone pledge only. What regulators can still claim from it is
	/// kept aside.
	///
	/// # Storage access
	/// * [`Refunds`] - One entry per purchaser and milestone.
	/// * [`Milestones`] - Tracking the currency owed to purchasers.
	pub fn do_refund(
		purchaser: AccountIdOf<T>,
		project_id: ProjectId,
		milestone_id: MilestoneId,
		token_amount: Balance,
	) -> DispatchResult {
		// * Get variables *
		let mut milestone = Self::milestone(project_id, milestone_id)?;
		let token = Self::project_token(project_id)?;
		let now = <frame_system::Pallet<T>>::block_number();

		// * Validity checks *
		ensure!(milestone.state == MilestoneState::RefundStage, Error::<T>::MilestoneNotInRefundStage);
		ensure!(!token_amount.is_zero(), Error::<T>::ZeroRefundAmount);
		ensure!(!Refunds::<T>::contains_key((project_id, milestone_id, &purchaser)), Error::<T>::AlreadyRefunded);
		ensure!(
			<T::ProjectTokens as FungiblesInspect<_>>::balance(token, &purchaser) >= token_amount,
			Error::<T>::InsufficientProjectTokens
		);

		// * Calculate new variables *
		let average_price = T::TokenSale::average_price(project_id);
		ensure!(!average_price.is_zero(), Error::<T>::AveragePriceNotSet);
		let currency_amount = token_amount.checked_div(average_price).ok_or(Error::<T>::BadMath)?;
		ensure!(!currency_amount.is_zero(), Error::<T>::RefundAmountTooLow);
		let refundable = milestone
			.still_locked()
			.saturating_sub(Self::reserved_rewards(project_id, milestone_id, &milestone))
			.saturating_sub(milestone.pending_refunds);
		ensure!(currency_amount <= refundable, Error::<T>::RefundExceedsLockedFunds);
		let available_at = now.checked_add(&T::RefundDuration::get()).ok_or(Error::<T>::BadMath)?;

		// * Transfer funds *
		<T::ProjectTokens as FungiblesMutate<_>>::transfer(
			token,
			&purchaser,
			&T::Collectors::token_collector(project_id),
			token_amount,
			Preservation::Expendable,
		)?;

		// * Update storage *
		milestone.pending_refunds = milestone.pending_refunds.saturating_add(currency_amount);
		Milestones::<T>::insert(project_id, milestone_id, milestone);
		Refunds::<T>::insert(
			(project_id, milestone_id, &purchaser),
			RefundInfo { token_amount, currency_amount, available_at, withdrawn: false },
		);

		// * Emit events *
		log::debug!(
			target: "pallet_milestones::refunds",
			"{} tokens of project {} surrendered for {} at price {}",
			token_amount,
			project_id,
			currency_amount,
			average_price
		);
		Self::deposit_event(Event::RefundRequested {
			project_id,
			milestone_id,
			purchaser,
			token_amount,
			currency_amount,
			available_at,
		});
		Ok(())
	}

	/// Called by user extrinsic
	/// Pays the currency owed by a refund once its cool-down is over.
	///
	/// The entry is flagged as withdrawn and kept.
	pub fn do_withdraw_refund(
		purchaser: AccountIdOf<T>,
		project_id: ProjectId,
		milestone_id: MilestoneId,
	) -> DispatchResult {
		// * Get variables *
		let mut milestone = Self::milestone(project_id, milestone_id)?;
		let mut refund =
			Refunds::<T>::get((project_id, milestone_id, &purchaser)).ok_or(Error::<T>::NoRefundFound)?;
		let now = <frame_system::Pallet<T>>::block_number();

		// * Validity checks *
		ensure!(!refund.withdrawn, Error::<T>::RefundAlreadyWithdrawn);
		ensure!(now >= refund.available_at, Error::<T>::RefundNotAvailableYet);

		// * Transfer funds *
		let amount = refund.currency_amount;
		Self::pay_from_collector(project_id, &purchaser, amount)?;

		// * Update storage *
		refund.withdrawn = true;
		milestone.pending_refunds = milestone.pending_refunds.saturating_sub(amount);
		Self::release_funds(project_id, &mut milestone, amount);
		Refunds::<T>::insert((project_id, milestone_id, &purchaser), refund);
		Milestones::<T>::insert(project_id, milestone_id, milestone);

		// * Emit events *
		Self::deposit_event(Event::RefundWithdrawn { project_id, milestone_id, purchaser, amount });
		Ok(())
	}
}
