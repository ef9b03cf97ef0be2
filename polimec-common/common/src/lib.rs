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

#![cfg_attr(not(feature = "std"), no_std)]

use core::marker::PhantomData;
use frame_support::{pallet_prelude::*, PalletId};
use sp_runtime::traits::AccountIdConversion;

pub mod projects;
pub mod time;

pub use projects::{AssetId, Balance, MilestoneId, ObjectiveId, ObjectiveType, PollId, ProjectId, ProjectState};
pub use time::{DAYS, HOURS, MINUTES, MONTHS, WEEKS};

/// This determines the average expected block time that we are targeting.
pub const MILLISECS_PER_BLOCK: u64 = 6000;

/// Read and write access to the project registry that owns the project lifecycle.
///
/// The milestone pallet never stores owners or tokens itself, it always asks the registry.
pub trait ProjectRegistry<AccountId> {
	/// The founder that is allowed to drive the milestones of `project_id`.
	fn project_owner(project_id: ProjectId) -> Option<AccountId>;

	/// Current lifecycle state. Unknown ids report [`ProjectState::NotExist`].
	fn project_state(project_id: ProjectId) -> ProjectState;

	/// The asset id of the token sold by the project, once it has one.
	fn project_token(project_id: ProjectId) -> Option<AssetId>;

	fn set_project_state(project_id: ProjectId, state: ProjectState) -> DispatchResult;
}

/// Price information recorded by the token sale of a project.
pub trait ProvideAveragePrice {
	/// Project tokens bought per unit of currency, averaged over the whole sale.
	///
	/// Returns zero while the sale has not been finalized.
	fn average_price(project_id: ProjectId) -> Balance;
}

/// The escrow accounts holding the funds raised by a project.
pub trait Collectors<AccountId> {
	/// Account holding the currency raised by the sale.
	fn ether_collector(project_id: ProjectId) -> AccountId;

	/// Account holding project tokens surrendered for refunds.
	fn token_collector(project_id: ProjectId) -> AccountId;
}

/// Derives both collectors of a project as sub-accounts of a pallet id.
pub struct SubAccountCollectors<Id>(PhantomData<Id>);
impl<AccountId: Encode + Decode, Id: Get<PalletId>> Collectors<AccountId> for SubAccountCollectors<Id> {
	fn ether_collector(project_id: ProjectId) -> AccountId {
		Id::get().into_sub_account_truncating((b"ethr", project_id))
	}

	fn token_collector(project_id: ProjectId) -> AccountId {
		Id::get().into_sub_account_truncating((b"tokn", project_id))
	}
}

/// Reputation-weighted votes that investors delegate to regulators.
pub trait ReputationProvider<AccountId, BlockNumber> {
	/// Request a poll that anyone may start between `min_start` and `max_start`.
	///
	/// When `for_purchaser` is set, vote limits are measured in `token` holdings instead of the
	/// native currency.
	fn register_poll_request(
		poll_id: PollId,
		min_start: BlockNumber,
		max_start: BlockNumber,
		for_purchaser: bool,
		token: Option<AssetId>,
	) -> DispatchResult;

	/// Votes accumulated by `regulator` for `objective_type` in `poll_id`.
	fn vote_weight(poll_id: &PollId, regulator: &AccountId, objective_type: &ObjectiveType) -> Balance;
}
