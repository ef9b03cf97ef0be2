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

use crate::{AccountIdOf, Config};
use alloc::vec::Vec;
use frame_support::{pallet_prelude::*, CloneNoBound, EqNoBound, PartialEqNoBound, RuntimeDebugNoBound};
use frame_system::pallet_prelude::BlockNumberFor;
use polimec_common::{AssetId, Balance, ObjectiveId, ObjectiveType, ProjectState};
use sp_arithmetic::{traits::Zero, Perquintill};

/// Stages of a milestone, in the only order they can be reached.
#[derive(Default, Clone, Copy, Encode, Decode, Eq, PartialEq, PartialOrd, Ord, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub enum MilestoneState {
	#[default]
	#[codec(index = 0)]
	Inactive,
	#[codec(index = 1)]
	InProgress,
	#[codec(index = 2)]
	RatingStage,
	#[codec(index = 3)]
	RefundStage,
	#[codec(index = 4)]
	Completion,
}

#[derive(Clone, Copy, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct Activation<BlockNumber> {
	pub min_start: BlockNumber,
	pub max_start: BlockNumber,
	/// Block of the activation.
	pub start: BlockNumber,
	/// `start + length`.
	pub deadline: BlockNumber,
}

#[derive(Encode, Decode, CloneNoBound, PartialEqNoBound, EqNoBound, RuntimeDebugNoBound, TypeInfo, MaxEncodedLen)]
#[scale_info(skip_type_params(T))]
#[codec(mel_bound())]
pub struct MilestoneInfo<T: Config> {
	pub length: BlockNumberFor<T>,
	pub objective_ids: BoundedVec<ObjectiveId, T::MaxObjectivesPerMilestone>,
	pub objective_types: BoundedVec<ObjectiveType, T::MaxObjectivesPerMilestone>,
	pub max_rewards: BoundedVec<Balance, T::MaxObjectivesPerMilestone>,
	/// Currency pledged on activation. Never changes afterwards.
	pub wei_locked: Balance,
	/// Part of `wei_locked` no longer counted in the project's locked funds.
	pub wei_released: Balance,
	/// Currency owed to purchasers by refunds not withdrawn yet.
	pub pending_refunds: Balance,
	pub state: MilestoneState,
	pub activation: Option<Activation<BlockNumberFor<T>>>,
}

impl<T: Config> MilestoneInfo<T> {
	pub fn deadline(&self) -> Option<BlockNumberFor<T>> {
		self.activation.as_ref().map(|activation| activation.deadline)
	}

	pub fn still_locked(&self) -> Balance {
		self.wei_locked.saturating_sub(self.wei_released)
	}
}

/// Bidding is open in `[start, end)`.
#[derive(Clone, Copy, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct RatingStageInfo<BlockNumber> {
	pub start: BlockNumber,
	pub end: BlockNumber,
}

#[derive(Encode, Decode, CloneNoBound, PartialEqNoBound, EqNoBound, RuntimeDebugNoBound, TypeInfo, MaxEncodedLen)]
#[scale_info(skip_type_params(T))]
#[codec(mel_bound())]
pub struct ObjectiveInfo<T: Config> {
	/// 1-based position of the objective in its milestone.
	pub index: u32,
	pub objective_type: ObjectiveType,
	pub max_reward: Balance,
	/// Sum of the vote weights of every current bidder.
	pub total_votes: Balance,
	pub finalized: bool,
	pub finalized_at: Option<BlockNumberFor<T>>,
	/// Set on finalization, split between the bidders.
	pub reward_pool: Balance,
	pub reward_paid: Balance,
	/// Bidders in bidding order.
	pub regulators: BoundedVec<AccountIdOf<T>, T::MaxRegulatorsPerObjective>,
}

impl<T: Config> ObjectiveInfo<T> {
	pub fn new(index: u32, objective_type: ObjectiveType, max_reward: Balance) -> Self {
		Self {
			index,
			objective_type,
			max_reward,
			total_votes: Zero::zero(),
			finalized: false,
			finalized_at: None,
			reward_pool: Zero::zero(),
			reward_paid: Zero::zero(),
			regulators: BoundedVec::new(),
		}
	}

	/// Share of the reward pool earned by a bid of `vote_weight`.
	///
	/// Zero before finalization and when nobody holding votes bid.
	pub fn regulation_reward(&self, vote_weight: Balance) -> Balance {
		if !self.finalized || self.total_votes.is_zero() {
			return Zero::zero();
		}
		Perquintill::from_rational(vote_weight, self.total_votes).mul_floor(self.reward_pool)
	}
}

#[derive(Default, Clone, Copy, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct BidInfo {
	/// Reputation votes of the regulator for the objective type, taken when bidding.
	pub vote_weight: Balance,
	pub reward_withdrawn: bool,
}

#[derive(Clone, Copy, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct RefundInfo<BlockNumber> {
	/// Project tokens moved to the token collector.
	pub token_amount: Balance,
	/// Currency owed in exchange.
	pub currency_amount: Balance,
	pub available_at: BlockNumber,
	pub withdrawn: bool,
}

/// Snapshot of a project as seen by the milestones pallet.
#[derive(Clone, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo)]
pub struct ProjectInfo<AccountId> {
	pub owner: Option<AccountId>,
	pub state: ProjectState,
	pub token: Option<AssetId>,
	pub milestone_count: u32,
	pub locked_funds: Balance,
	pub collector_balance: Balance,
}

#[derive(Clone, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo)]
pub struct ObjectiveRegulationInfo<AccountId> {
	pub regulators: Vec<AccountId>,
	pub total_votes: Balance,
	pub finalized: bool,
	pub reward_pool: Balance,
}
