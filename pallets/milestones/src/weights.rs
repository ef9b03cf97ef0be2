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

//! Weights for pallet_milestones.
//! Estimated from the storage accesses of each call. Regenerate them from `benchmarking.rs` with the
//! `benchmark pallet` command of the node. `ProjectRegistry` reads stand for the funding pallet storage.

#![allow(unused_parens)]
#![allow(unused_imports)]

use core::marker::PhantomData;
use frame_support::{
	traits::Get,
	weights::{constants::RocksDbWeight, Weight},
};

/// Weight functions needed for pallet_milestones.
pub trait WeightInfo {
	fn add_milestone() -> Weight;
	fn activate() -> Weight;
	fn start_rating_stage() -> Weight;
	fn start_refund_stage() -> Weight;
	fn admin_finalize(m: u32) -> Weight;
	fn bid() -> Weight;
	fn back_out_from_bid() -> Weight;
	fn finalize_bid_for_objective() -> Weight;
	fn finalize_all_bids(n: u32) -> Weight;
	fn withdraw_regulation_reward() -> Weight;
	fn refund() -> Weight;
	fn withdraw_refund() -> Weight;
}

/// Weights for pallet_milestones using the Substrate node and recommended hardware.
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
	/// Storage: `ProjectRegistry` (r:1 w:0)
	/// Storage: `Milestones::MilestoneCount` (r:1 w:1)
	/// Storage: `Milestones::Milestones` (r:0 w:1)
	fn add_milestone() -> Weight {
		Weight::from_parts(18_000_000, 4_250)
			.saturating_add(T::DbWeight::get().reads(2_u64))
			.saturating_add(T::DbWeight::get().writes(2_u64))
	}
	/// Storage: `Milestones::Milestones` (r:1 w:1)
	/// Storage: `ProjectRegistry` (r:3 w:1)
	/// Storage: `System::Account` (r:1 w:0)
	/// Storage: `Milestones::LockedFunds` (r:1 w:1)
	/// Storage: `Reputation::PollRequests` (r:1 w:1)
	fn activate() -> Weight {
		Weight::from_parts(42_000_000, 4_250)
			.saturating_add(T::DbWeight::get().reads(7_u64))
			.saturating_add(T::DbWeight::get().writes(4_u64))
	}
	/// Storage: `Milestones::Milestones` (r:1 w:1)
	/// Storage: `ProjectRegistry` (r:1 w:0)
	/// Storage: `Milestones::RatingStages` (r:1 w:1)
	/// Storage: `Milestones::Objectives` (r:0 w:16)
	fn start_rating_stage() -> Weight {
		Weight::from_parts(36_000_000, 4_250)
			.saturating_add(T::DbWeight::get().reads(3_u64))
			.saturating_add(T::DbWeight::get().writes(18_u64))
	}
	/// Storage: `Milestones::Milestones` (r:1 w:1)
	/// Storage: `ProjectRegistry` (r:1 w:0)
	/// Storage: `Assets::Account` (r:1 w:0)
	fn start_refund_stage() -> Weight {
		Weight::from_parts(21_000_000, 4_250)
			.saturating_add(T::DbWeight::get().reads(3_u64))
			.saturating_add(T::DbWeight::get().writes(1_u64))
	}
	/// Storage: `Milestones::Milestones` (r:1 w:1)
	/// Storage: `Milestones::Objectives` (r:16 w:0)
	/// Storage: `ProjectRegistry` (r:0 w:1)
	/// Storage: `Milestones::LockedFunds` (r:1 w:1)
	/// The range of component `m` is `[1, 32]`.
	fn admin_finalize(m: u32) -> Weight {
		Weight::from_parts(38_000_000, 4_250)
			.saturating_add(Weight::from_parts(4_100_000, 0).saturating_mul(m.into()))
			.saturating_add(T::DbWeight::get().reads(18_u64))
			.saturating_add(T::DbWeight::get().reads((1_u64).saturating_mul(m.into())))
			.saturating_add(T::DbWeight::get().writes(3_u64))
			.saturating_add(Weight::from_parts(0, 2_612).saturating_mul(m.into()))
	}
	/// Storage: `Milestones::RatingStages` (r:1 w:0)
	/// Storage: `Milestones::Objectives` (r:1 w:1)
	/// Storage: `Milestones::Bids` (r:1 w:1)
	/// Storage: `Reputation::VotesForRegulator` (r:1 w:0)
	fn bid() -> Weight {
		Weight::from_parts(26_000_000, 5_730)
			.saturating_add(T::DbWeight::get().reads(4_u64))
			.saturating_add(T::DbWeight::get().writes(2_u64))
	}
	/// Storage: `Milestones::Objectives` (r:1 w:1)
	/// Storage: `Milestones::Bids` (r:1 w:1)
	fn back_out_from_bid() -> Weight {
		Weight::from_parts(20_000_000, 5_730)
			.saturating_add(T::DbWeight::get().reads(2_u64))
			.saturating_add(T::DbWeight::get().writes(2_u64))
	}
	/// Storage: `ProjectRegistry` (r:1 w:0)
	/// Storage: `Milestones::Milestones` (r:1 w:0)
	/// Storage: `Milestones::RatingStages` (r:1 w:0)
	/// Storage: `Milestones::Objectives` (r:1 w:1)
	fn finalize_bid_for_objective() -> Weight {
		Weight::from_parts(24_000_000, 5_730)
			.saturating_add(T::DbWeight::get().reads(4_u64))
			.saturating_add(T::DbWeight::get().writes(1_u64))
	}
	/// Storage: `ProjectRegistry` (r:1 w:0)
	/// Storage: `Milestones::Milestones` (r:1 w:0)
	/// Storage: `Milestones::RatingStages` (r:1 w:0)
	/// Storage: `Milestones::Objectives` (r:16 w:16)
	/// The range of component `n` is `[1, 16]`.
	fn finalize_all_bids(n: u32) -> Weight {
		Weight::from_parts(22_000_000, 4_250)
			.saturating_add(Weight::from_parts(6_300_000, 0).saturating_mul(n.into()))
			.saturating_add(T::DbWeight::get().reads(3_u64))
			.saturating_add(T::DbWeight::get().reads((1_u64).saturating_mul(n.into())))
			.saturating_add(T::DbWeight::get().writes((1_u64).saturating_mul(n.into())))
			.saturating_add(Weight::from_parts(0, 2_612).saturating_mul(n.into()))
	}
	/// Storage: `Milestones::Milestones` (r:1 w:1)
	/// Storage: `Milestones::Objectives` (r:1 w:1)
	/// Storage: `Milestones::Bids` (r:1 w:1)
	/// Storage: `System::Account` (r:2 w:2)
	/// Storage: `Milestones::LockedFunds` (r:1 w:1)
	fn withdraw_regulation_reward() -> Weight {
		Weight::from_parts(48_000_000, 6_196)
			.saturating_add(T::DbWeight::get().reads(6_u64))
			.saturating_add(T::DbWeight::get().writes(6_u64))
	}
	/// Storage: `Milestones::Milestones` (r:1 w:1)
	/// Storage: `ProjectRegistry` (r:1 w:0)
	/// Storage: `Milestones::Refunds` (r:1 w:1)
	/// Storage: `Assets::Asset` (r:1 w:1)
	/// Storage: `Assets::Account` (r:2 w:2)
	fn refund() -> Weight {
		Weight::from_parts(52_000_000, 6_208)
			.saturating_add(T::DbWeight::get().reads(6_u64))
			.saturating_add(T::DbWeight::get().writes(5_u64))
	}
	/// Storage: `Milestones::Milestones` (r:1 w:1)
	/// Storage: `Milestones::Refunds` (r:1 w:1)
	/// Storage: `System::Account` (r:2 w:2)
	/// Storage: `Milestones::LockedFunds` (r:1 w:1)
	fn withdraw_refund() -> Weight {
		Weight::from_parts(45_000_000, 6_196)
			.saturating_add(T::DbWeight::get().reads(5_u64))
			.saturating_add(T::DbWeight::get().writes(5_u64))
	}
}

// For backwards compatibility and tests
impl WeightInfo for () {
	fn add_milestone() -> Weight {
		Weight::from_parts(18_000_000, 4_250)
			.saturating_add(RocksDbWeight::get().reads(2_u64))
			.saturating_add(RocksDbWeight::get().writes(2_u64))
	}
	fn activate() -> Weight {
		Weight::from_parts(42_000_000, 4_250)
			.saturating_add(RocksDbWeight::get().reads(7_u64))
			.saturating_add(RocksDbWeight::get().writes(4_u64))
	}
	fn start_rating_stage() -> Weight {
		Weight::from_parts(36_000_000, 4_250)
			.saturating_add(RocksDbWeight::get().reads(3_u64))
			.saturating_add(RocksDbWeight::get().writes(18_u64))
	}
	fn start_refund_stage() -> Weight {
		Weight::from_parts(21_000_000, 4_250)
			.saturating_add(RocksDbWeight::get().reads(3_u64))
			.saturating_add(RocksDbWeight::get().writes(1_u64))
	}
	fn admin_finalize(m: u32) -> Weight {
		Weight::from_parts(38_000_000, 4_250)
			.saturating_add(Weight::from_parts(4_100_000, 0).saturating_mul(m.into()))
			.saturating_add(RocksDbWeight::get().reads(18_u64))
			.saturating_add(RocksDbWeight::get().reads((1_u64).saturating_mul(m.into())))
			.saturating_add(RocksDbWeight::get().writes(3_u64))
			.saturating_add(Weight::from_parts(0, 2_612).saturating_mul(m.into()))
	}
	fn bid() -> Weight {
		Weight::from_parts(26_000_000, 5_730)
			.saturating_add(RocksDbWeight::get().reads(4_u64))
			.saturating_add(RocksDbWeight::get().writes(2_u64))
	}
	fn back_out_from_bid() -> Weight {
		Weight::from_parts(20_000_000, 5_730)
			.saturating_add(RocksDbWeight::get().reads(2_u64))
			.saturating_add(RocksDbWeight::get().writes(2_u64))
	}
	fn finalize_bid_for_objective() -> Weight {
		Weight::from_parts(24_000_000, 5_730)
			.saturating_add(RocksDbWeight::get().reads(4_u64))
			.saturating_add(RocksDbWeight::get().writes(1_u64))
	}
	fn finalize_all_bids(n: u32) -> Weight {
		Weight::from_parts(22_000_000, 4_250)
			.saturating_add(Weight::from_parts(6_300_000, 0).saturating_mul(n.into()))
			.saturating_add(RocksDbWeight::get().reads(3_u64))
			.saturating_add(RocksDbWeight::get().reads((1_u64).saturating_mul(n.into())))
			.saturating_add(RocksDbWeight::get().writes((1_u64).saturating_mul(n.into())))
			.saturating_add(Weight::from_parts(0, 2_612).saturating_mul(n.into()))
	}
	fn withdraw_regulation_reward() -> Weight {
		Weight::from_parts(48_000_000, 6_196)
			.saturating_add(RocksDbWeight::get().reads(6_u64))
			.saturating_add(RocksDbWeight::get().writes(6_u64))
	}
	fn refund() -> Weight {
		Weight::from_parts(52_000_000, 6_208)
			.saturating_add(RocksDbWeight::get().reads(6_u64))
			.saturating_add(RocksDbWeight::get().writes(5_u64))
	}
	fn withdraw_refund() -> Weight {
		Weight::from_parts(45_000_000, 6_196)
			.saturating_add(RocksDbWeight::get().reads(5_u64))
			.saturating_add(RocksDbWeight::get().writes(5_u64))
	}
}
