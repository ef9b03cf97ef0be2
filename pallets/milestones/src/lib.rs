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

// If you feel like getting in touch with us, you can do so at info@polimec.org

//! # Milestones Pallet
//!
//! Governs how the funds raised by a project are released, milestone by milestone.
//!
//! ## Overview
//!
//! A founder splits the roadmap of a project into milestones. Each milestone lists objectives,
//! and each objective carries a maximum regulation reward. Activating a milestone locks part of the
//! currency held by the project's ether collector. From there on, the milestone moves forward
//! through the following states and never back:
//!
//! ```text
//! Inactive --activate--> InProgress --start_rating_stage--> RatingStage
//!                            |                                   |
//!                            +------ start_refund_stage ---------+--> RefundStage
//!
//! any activated state --admin_finalize (after the deadline)--> Completion
//! ```
//!
//! ### Rating
//! Starting the rating stage opens a bidding window on every objective of the milestone.
//! Regulators bid on the objectives they want to judge. At bid time the reputation votes they
//! received for the objective type are snapshotted as their stake. Once the founder finalizes an
//! objective, its reward pool is the elapsed fraction of the rating stage times the maximum
//! reward, split between bidders in proportion to their stakes.
//!
//! ### Rewards
//! Each bidding regulator withdraws its share of a finalized objective exactly once.
//!
//! ### Refunds
//! While a milestone is in its refund stage, purchasers surrender project tokens to the token
//! collector and are owed currency at the sale's average price. The currency can be withdrawn
//! once the refund cool-down has passed.
//!
//! ## Extrinsics
//! * [`add_milestone`](crate::pallet::Pallet::add_milestone)
//! * [`activate`](crate::pallet::Pallet::activate)
//! * [`start_rating_stage`](crate::pallet::Pallet::start_rating_stage)
//! * [`start_refund_stage`](crate::pallet::Pallet::start_refund_stage)
//! * [`admin_finalize`](crate::pallet::Pallet::admin_finalize)
//! * [`bid`](crate::pallet::Pallet::bid)
//! * [`back_out_from_bid`](crate::pallet::Pallet::back_out_from_bid)
//! * [`finalize_bid_for_objective`](crate::pallet::Pallet::finalize_bid_for_objective)
//! * [`finalize_all_bids`](crate::pallet::Pallet::finalize_all_bids)
//! * [`withdraw_regulation_reward`](crate::pallet::Pallet::withdraw_regulation_reward)
//! * [`refund`](crate::pallet::Pallet::refund)
//! * [`withdraw_refund`](crate::pallet::Pallet::withdraw_refund)
//!
//! ## Example Configuration
//!
//! ```ignore
//! parameter_types! {
//! 	pub const MilestonesPalletId: PalletId = PalletId(*b"plmc/mst");
//! }
//!
//! impl pallet_milestones::Config for Runtime {
//! 	type Collectors = SubAccountCollectors<MilestonesPalletId>;
//! 	type Currency = Balances;
//! 	type MaxMilestones = ConstU32<32>;
//! 	type MaxObjectivesPerMilestone = ConstU32<16>;
//! 	type MaxRegulatorsPerObjective = ConstU32<64>;
//! 	type ProjectRegistry = Funding;
//! 	type ProjectTokens = ContributionTokens;
//! 	type RatingFinalizeWindowFromEnd = ConstU32<{ 3 * WEEKS }>;
//! 	type RatingStageLength = ConstU32<{ 4 * WEEKS }>;
//! 	type RatingStageMaxStartTimeFromEnd = ConstU32<{ 4 * WEEKS }>;
//! 	type RefundDuration = ConstU32<MONTHS>;
//! 	type RefundStageMinStartTimeFromEnd = ConstU32<{ 2 * WEEKS }>;
//! 	type RegulatorOrigin = EnsureSignedBy<RegulatorCouncil, AccountId>;
//! 	type Reputation = Reputation;
//! 	type RuntimeEvent = RuntimeEvent;
//! 	type TokenSale = Funding;
//! 	type WeightInfo = pallet_milestones::weights::SubstrateWeight<Runtime>;
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;
pub use polimec_common::{
	AssetId, Balance, Collectors, MilestoneId, ObjectiveId, ObjectiveType, PollId, ProjectId, ProjectRegistry,
	ProjectState, ProvideAveragePrice, ReputationProvider,
};
pub use types::*;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;
mod functions;
pub mod runtime_api;
mod types;
pub mod weights;

#[cfg(test)]
mod mock;
#[cfg(test)]
mod tests;

pub type AccountIdOf<T> = <T as frame_system::Config>::AccountId;

/// Sets up what the benchmarks need from the funding and reputation pallets.
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<T: Config> {
	/// Registers `project_id` owned by `owner`, with a token sold at an average `price`. Returns the token.
	fn create_project(project_id: ProjectId, owner: &AccountIdOf<T>, price: Balance) -> AssetId;

	/// Gives `regulator` `weight` votes for `objective_type` in `poll_id`.
	fn set_vote_weight(poll_id: PollId, regulator: &AccountIdOf<T>, objective_type: ObjectiveType, weight: Balance);
}

#[frame_support::pallet]
pub mod pallet {
	use super::*;
	use crate::weights::WeightInfo;
	use frame_support::{
		pallet_prelude::*,
		traits::{fungible, fungibles},
	};
	use frame_system::pallet_prelude::*;

	#[pallet::config]
	pub trait Config: frame_system::Config {
		/// Escrow accounts of each project.
		type Collectors: Collectors<Self::AccountId>;

		/// The currency raised by token sales, locked per milestone and paid out as rewards and refunds.
		type Currency: fungible::Inspect<Self::AccountId, Balance = Balance> + fungible::Mutate<Self::AccountId>;

		#[pallet::constant]
		type MaxMilestones: Get<u32>;

		#[pallet::constant]
		type MaxObjectivesPerMilestone: Get<u32>;

		#[pallet::constant]
		type MaxRegulatorsPerObjective: Get<u32>;

		/// Owner, lifecycle state and token of each project.
		type ProjectRegistry: ProjectRegistry<Self::AccountId>;

		/// The tokens sold by each project. Purchasers surrender them on refunds.
		type ProjectTokens: fungibles::Inspect<Self::AccountId, AssetId = AssetId, Balance = Balance>
			+ fungibles::Mutate<Self::AccountId>;

		/// Bids can be finalized this long before the milestone deadline, even if bidding is still open.
		#[pallet::constant]
		type RatingFinalizeWindowFromEnd: Get<BlockNumberFor<Self>>;

		/// How long regulators can bid once the rating stage started.
		#[pallet::constant]
		type RatingStageLength: Get<BlockNumberFor<Self>>;

		/// The rating stage must start at least this long before the milestone deadline.
		#[pallet::constant]
		type RatingStageMaxStartTimeFromEnd: Get<BlockNumberFor<Self>>;

		/// Cool-down between a refund request and the moment its currency can be withdrawn.
		#[pallet::constant]
		type RefundDuration: Get<BlockNumberFor<Self>>;

		/// The refund stage opens this long before the milestone deadline.
		#[pallet::constant]
		type RefundStageMinStartTimeFromEnd: Get<BlockNumberFor<Self>>;

		/// Origin of regulators. Resolves to the regulator account.
		type RegulatorOrigin: EnsureOrigin<Self::RuntimeOrigin, Success = Self::AccountId>;

		/// Source of the reputation votes that weight regulator bids.
		type Reputation: ReputationProvider<Self::AccountId, BlockNumberFor<Self>>;

		type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

		type TokenSale: ProvideAveragePrice;

		/// A type representing the weights required by the dispatchables of this pallet.
		type WeightInfo: WeightInfo;

		#[cfg(feature = "runtime-benchmarks")]
		type BenchmarkHelper: BenchmarkHelper<Self>;
	}

	#[pallet::pallet]
	pub struct Pallet<T>(_);

	/// Number of milestones added to a project. Also the id of the last one.
	#[pallet::storage]
	pub type MilestoneCount<T: Config> = StorageMap<_, Blake2_128Concat, ProjectId, u32, ValueQuery>;

	#[pallet::storage]
	pub type Milestones<T: Config> =
		StorageDoubleMap<_, Blake2_128Concat, ProjectId, Blake2_128Concat, MilestoneId, MilestoneInfo<T>>;

	/// Currency of the ether collector that backs activated milestones and cannot back new ones.
	#[pallet::storage]
	pub type LockedFunds<T: Config> = StorageMap<_, Blake2_128Concat, ProjectId, Balance, ValueQuery>;

	#[pallet::storage]
	pub type RatingStages<T: Config> = StorageDoubleMap<
		_,
		Blake2_128Concat,
		ProjectId,
		Blake2_128Concat,
		MilestoneId,
		RatingStageInfo<BlockNumberFor<T>>,
	>;

	/// Objectives open for rating, registered when the rating stage starts.
	#[pallet::storage]
	pub type Objectives<T: Config> = StorageNMap<
		_,
		(
			NMapKey<Blake2_128Concat, ProjectId>,
			NMapKey<Blake2_128Concat, MilestoneId>,
			NMapKey<Blake2_128Concat, ObjectiveId>,
		),
		ObjectiveInfo<T>,
	>;

	#[pallet::storage]
	pub type Bids<T: Config> = StorageNMap<
		_,
		(
			NMapKey<Blake2_128Concat, ProjectId>,
			NMapKey<Blake2_128Concat, MilestoneId>,
			NMapKey<Blake2_128Concat, ObjectiveId>,
			NMapKey<Blake2_128Concat, T::AccountId>,
		),
		BidInfo,
	>;

	#[pallet::storage]
	pub type Refunds<T: Config> = StorageNMap<
		_,
		(
			NMapKey<Blake2_128Concat, ProjectId>,
			NMapKey<Blake2_128Concat, MilestoneId>,
			NMapKey<Blake2_128Concat, T::AccountId>,
		),
		RefundInfo<BlockNumberFor<T>>,
	>;

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config> {
		MilestoneAdded {
			project_id: ProjectId,
			milestone_id: MilestoneId,
			length: BlockNumberFor<T>,
		},
		MilestoneActivated {
			project_id: ProjectId,
			milestone_id: MilestoneId,
			wei_locked: Balance,
			start: BlockNumberFor<T>,
			deadline: BlockNumberFor<T>,
		},
		RatingStageStarted {
			project_id: ProjectId,
			milestone_id: MilestoneId,
			start: BlockNumberFor<T>,
			end: BlockNumberFor<T>,
		},
		RefundStageStarted {
			project_id: ProjectId,
			milestone_id: MilestoneId,
			caller: T::AccountId,
		},
		/// The milestone reached its deadline and `unlocked` currency can back other milestones.
		MilestoneFinalized {
			project_id: ProjectId,
			milestone_id: MilestoneId,
			unlocked: Balance,
		},
		BidPlaced {
			project_id: ProjectId,
			milestone_id: MilestoneId,
			objective_id: ObjectiveId,
			regulator: T::AccountId,
			vote_weight: Balance,
		},
		BidWithdrawn {
			project_id: ProjectId,
			milestone_id: MilestoneId,
			objective_id: ObjectiveId,
			regulator: T::AccountId,
		},
		ObjectiveFinalized {
			project_id: ProjectId,
			milestone_id: MilestoneId,
			objective_id: ObjectiveId,
			reward_pool: Balance,
			total_votes: Balance,
		},
		RegulationRewardWithdrawn {
			project_id: ProjectId,
			milestone_id: MilestoneId,
			objective_id: ObjectiveId,
			regulator: T::AccountId,
			amount: Balance,
		},
		RefundRequested {
			project_id: ProjectId,
			milestone_id: MilestoneId,
			purchaser: T::AccountId,
			token_amount: Balance,
			currency_amount: Balance,
			available_at: BlockNumberFor<T>,
		},
		RefundWithdrawn {
			project_id: ProjectId,
			milestone_id: MilestoneId,
			purchaser: T::AccountId,
			amount: Balance,
		},
	}

	#[pallet::error]
	pub enum Error<T> {
		/// The project is unknown to the registry.
		ProjectNotFound,
		/// Only the project owner can perform this action.
		NotProjectOwner,
		/// The project has no token registered yet.
		ProjectTokenNotFound,
		/// Milestones can only be added while the project is accepted or running milestones.
		ProjectNotAcceptingMilestones,
		/// Milestones can only be activated once the token sale started.
		ProjectNotInTokenSale,
		MilestoneNotFound,
		/// The project reached the maximum number of milestones.
		TooManyMilestones,
		/// A milestone cannot last zero blocks.
		ZeroMilestoneLength,
		/// A milestone needs at least one objective.
		NoObjectives,
		/// Objective ids, types and maximum rewards must have the same length.
		ObjectiveLengthMismatch,
		/// The same objective id appears twice in a milestone.
		DuplicateObjective,
		/// The milestone was already activated.
		MilestoneAlreadyActivated,
		/// The milestone was never activated, so it has no deadline.
		MilestoneNotActivated,
		/// The activation window must satisfy `now < min_start < max_start < deadline`.
		InvalidActivationWindow,
		/// The maximum rewards of the objectives add up to more than the locked funds.
		RewardsExceedLockedFunds,
		/// The ether collector does not hold enough unlocked currency.
		InsufficientCollectorFunds,
		/// The milestone is not in progress.
		MilestoneNotInProgress,
		/// The rating stage can no longer start this close to the deadline.
		RatingStageCutoffPassed,
		/// Refunds can only start from the in progress or rating stages.
		MilestoneNotRefundable,
		/// Another purchaser already opened the refund stage.
		RefundStageAlreadyStarted,
		/// Only holders of the project token can open the refund stage.
		NotPurchaser,
		/// The refund stage opens closer to the deadline.
		RefundStageTooEarly,
		/// The deadline passed, the refund stage can no longer open.
		RefundWindowClosed,
		/// The milestone deadline was not reached yet.
		DeadlineNotReached,
		MilestoneAlreadyCompleted,
		/// The rating of this milestone was already started.
		RatingAlreadyStarted,
		/// The rating stage of this milestone did not start.
		RatingNotStarted,
		/// The rating window must end after it starts.
		InvalidRatingWindow,
		/// The objective is not registered for rating in this milestone.
		ObjectiveNotFound,
		/// The bidding window is not open.
		BiddingClosed,
		/// The regulator already bid on this objective.
		AlreadyBid,
		/// The objective reached the maximum number of regulators.
		TooManyRegulators,
		/// The regulator has no bid on this objective.
		NoBidFound,
		ObjectiveAlreadyFinalized,
		ObjectiveNotFinalized,
		/// Bids can be finalized once the bidding window closed or the final weeks of the milestone started.
		FinalizeNotAllowedYet,
		/// Every objective of the milestone is already finalized.
		NothingToFinalize,
		/// The regulator already withdrew its reward for this objective.
		RewardAlreadyWithdrawn,
		/// The computed amount is zero.
		NothingToWithdraw,
		/// The collector cannot cover the payout until it is topped up.
		CollectorUnderfunded,
		/// Refunds are only accepted while the milestone is in its refund stage.
		MilestoneNotInRefundStage,
		ZeroRefundAmount,
		/// The purchaser already asked for a refund on this milestone.
		AlreadyRefunded,
		/// The token sale has no average price, it was never finalized.
		AveragePriceNotSet,
		/// The surrendered tokens are worth less than one unit of currency.
		RefundAmountTooLow,
		/// The milestone pledge left after rewards and earlier refunds cannot cover the refund.
		RefundExceedsLockedFunds,
		/// The purchaser holds fewer project tokens than it tries to surrender.
		InsufficientProjectTokens,
		NoRefundFound,
		/// The refund cool-down is not over.
		RefundNotAvailableYet,
		RefundAlreadyWithdrawn,
		/// Checked arithmetic overflowed.
		BadMath,
	}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// Append a milestone to the roadmap of `project_id`.
		///
		/// The three vectors describe one objective per index.
		#[pallet::call_index(0)]
		#[pallet::weight(T::WeightInfo::add_milestone())]
		pub fn add_milestone(
			origin: OriginFor<T>,
			project_id: ProjectId,
			length: BlockNumberFor<T>,
			objective_ids: BoundedVec<ObjectiveId, T::MaxObjectivesPerMilestone>,
			objective_types: BoundedVec<ObjectiveType, T::MaxObjectivesPerMilestone>,
			max_rewards: BoundedVec<Balance, T::MaxObjectivesPerMilestone>,
		) -> DispatchResult {
			let caller = ensure_signed(origin)?;
			Self::do_add_milestone(&caller, project_id, length, objective_ids, objective_types, max_rewards)
		}

		/// Lock `wei_locked` of the project's collected currency and start the milestone.
		///
		/// Also requests the reputation poll of the milestone, startable in `[min_start, max_start]`.
		#[pallet::call_index(1)]
		#[pallet::weight(T::WeightInfo::activate())]
		pub fn activate(
			origin: OriginFor<T>,
			project_id: ProjectId,
			milestone_id: MilestoneId,
			wei_locked: Balance,
			min_start: BlockNumberFor<T>,
			max_start: BlockNumberFor<T>,
		) -> DispatchResult {
			let caller = ensure_signed(origin)?;
			Self::do_activate(&caller, project_id, milestone_id, wei_locked, min_start, max_start)
		}

		#[pallet::call_index(2)]
		#[pallet::weight(T::WeightInfo::start_rating_stage())]
		pub fn start_rating_stage(origin: OriginFor<T>, project_id: ProjectId, milestone_id: MilestoneId) -> DispatchResult {
			let caller = ensure_signed(origin)?;
			Self::do_start_rating_stage(&caller, project_id, milestone_id)
		}

		/// Open the refund stage. Any holder of the project token can call it, so the founder
		/// cannot stall refunds.
		#[pallet::call_index(3)]
		#[pallet::weight(T::WeightInfo::start_refund_stage())]
		pub fn start_refund_stage(origin: OriginFor<T>, project_id: ProjectId, milestone_id: MilestoneId) -> DispatchResult {
			let caller = ensure_signed(origin)?;
			Self::do_start_refund_stage(caller, project_id, milestone_id)
		}

		/// Complete a milestone whose deadline passed, whatever stage it reached.
		#[pallet::call_index(4)]
		#[pallet::weight(T::WeightInfo::admin_finalize(T::MaxMilestones::get()))]
		pub fn admin_finalize(origin: OriginFor<T>, project_id: ProjectId, milestone_id: MilestoneId) -> DispatchResult {
			ensure_signed(origin)?;
			Self::do_admin_finalize(project_id, milestone_id)
		}

		#[pallet::call_index(5)]
		#[pallet::weight(T::WeightInfo::bid())]
		pub fn bid(
			origin: OriginFor<T>,
			project_id: ProjectId,
			milestone_id: MilestoneId,
			objective_id: ObjectiveId,
		) -> DispatchResult {
			let regulator = T::RegulatorOrigin::ensure_origin(origin)?;
			Self::do_bid(regulator, project_id, milestone_id, objective_id)
		}

		#[pallet::call_index(6)]
		#[pallet::weight(T::WeightInfo::back_out_from_bid())]
		pub fn back_out_from_bid(
			origin: OriginFor<T>,
			project_id: ProjectId,
			milestone_id: MilestoneId,
			objective_id: ObjectiveId,
		) -> DispatchResult {
			let regulator = T::RegulatorOrigin::ensure_origin(origin)?;
			Self::do_back_out_from_bid(regulator, project_id, milestone_id, objective_id)
		}

		#[pallet::call_index(7)]
		#[pallet::weight(T::WeightInfo::finalize_bid_for_objective())]
		pub fn finalize_bid_for_objective(
			origin: OriginFor<T>,
			project_id: ProjectId,
			milestone_id: MilestoneId,
			objective_id: ObjectiveId,
		) -> DispatchResult {
			let caller = ensure_signed(origin)?;
			Self::do_finalize_bid_for_objective(&caller, project_id, milestone_id, objective_id)
		}

		/// Finalize every objective of the milestone that is not finalized yet.
		#[pallet::call_index(8)]
		#[pallet::weight(T::WeightInfo::finalize_all_bids(T::MaxObjectivesPerMilestone::get()))]
		pub fn finalize_all_bids(origin: OriginFor<T>, project_id: ProjectId, milestone_id: MilestoneId) -> DispatchResult {
			let caller = ensure_signed(origin)?;
			Self::do_finalize_all_bids(&caller, project_id, milestone_id)
		}

		#[pallet::call_index(9)]
		#[pallet::weight(T::WeightInfo::withdraw_regulation_reward())]
		pub fn withdraw_regulation_reward(
			origin: OriginFor<T>,
			project_id: ProjectId,
			milestone_id: MilestoneId,
			objective_id: ObjectiveId,
		) -> DispatchResult {
			let regulator = ensure_signed(origin)?;
			Self::do_withdraw_regulation_reward(regulator, project_id, milestone_id, objective_id)
		}

		/// Surrender `token_amount` project tokens against currency at the sale's average price.
		#[pallet::call_index(10)]
		#[pallet::weight(T::WeightInfo::refund())]
		pub fn refund(
			origin: OriginFor<T>,
			project_id: ProjectId,
			milestone_id: MilestoneId,
			token_amount: Balance,
		) -> DispatchResult {
			let purchaser = ensure_signed(origin)?;
			Self::do_refund(purchaser, project_id, milestone_id, token_amount)
		}

		#[pallet::call_index(11)]
		#[pallet::weight(T::WeightInfo::withdraw_refund())]
		pub fn withdraw_refund(origin: OriginFor<T>, project_id: ProjectId, milestone_id: MilestoneId) -> DispatchResult {
			let purchaser = ensure_signed(origin)?;
			Self::do_withdraw_refund(purchaser, project_id, milestone_id)
		}
	}
}
