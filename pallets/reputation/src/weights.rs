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

//! Weights for pallet_reputation.
//! Estimated from the storage accesses of each call. Regenerate them from `benchmarking.rs` with the
//! `benchmark pallet` command of the node.

#![allow(unused_parens)]
#![allow(unused_imports)]

use core::marker::PhantomData;
use frame_support::{
	traits::Get,
	weights::{constants::RocksDbWeight, Weight},
};

/// Weight functions needed for pallet_reputation.
pub trait WeightInfo {
	fn register_poll_request() -> Weight;
	fn start_poll() -> Weight;
	fn register_voter() -> Weight;
	fn vote() -> Weight;
	fn release_votes() -> Weight;
}

/// Weights for pallet_reputation using the Substrate node and recommended hardware.
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
	/// Storage: `Reputation::PollRequests` (r:1 w:1)
	fn register_poll_request() -> Weight {
		Weight::from_parts(14_000_000, 3_517)
			.saturating_add(T::DbWeight::get().reads(1_u64))
			.saturating_add(T::DbWeight::get().writes(1_u64))
	}
	/// Storage: `Reputation::PollRequests` (r:1 w:0)
	/// Storage: `Reputation::Polls` (r:1 w:1)
	fn start_poll() -> Weight {
		Weight::from_parts(16_000_000, 3_517)
			.saturating_add(T::DbWeight::get().reads(2_u64))
			.saturating_add(T::DbWeight::get().writes(1_u64))
	}
	/// Storage: `Reputation::PollRequests` (r:1 w:0)
	/// Storage: `Reputation::Polls` (r:1 w:0)
	/// Storage: `Reputation::VoteLimits` (r:1 w:1)
	/// Storage: `Reputation::VoteFreezes` (r:1 w:1)
	/// Storage: `Assets::Account` (r:1 w:0)
	/// Storage: `Balances::Freezes` (r:1 w:1)
	fn register_voter() -> Weight {
		Weight::from_parts(31_000_000, 4_102)
			.saturating_add(T::DbWeight::get().reads(6_u64))
			.saturating_add(T::DbWeight::get().writes(3_u64))
	}
	/// Storage: `Reputation::Polls` (r:1 w:0)
	/// Storage: `Reputation::PollRequests` (r:1 w:0)
	/// Storage: `Reputation::VoteLimits` (r:1 w:1)
	/// Storage: `Reputation::VoteFreezes` (r:1 w:0)
	/// Storage: `Assets::Account` (r:1 w:0)
	/// Storage: `Balances::Freezes` (r:1 w:1)
	/// Storage: `Reputation::VotesForRegulator` (r:1 w:1)
	/// Storage: `Reputation::VotesByVoter` (r:1 w:1)
	fn vote() -> Weight {
		Weight::from_parts(36_000_000, 4_102)
			.saturating_add(T::DbWeight::get().reads(8_u64))
			.saturating_add(T::DbWeight::get().writes(4_u64))
	}
	/// Storage: `Reputation::Polls` (r:1 w:0)
	/// Storage: `Reputation::VoteFreezes` (r:1 w:1)
	/// Storage: `Reputation::VoteLimits` (r:1 w:0)
	/// Storage: `Balances::Freezes` (r:1 w:1)
	fn release_votes() -> Weight {
		Weight::from_parts(22_000_000, 4_102)
			.saturating_add(T::DbWeight::get().reads(4_u64))
			.saturating_add(T::DbWeight::get().writes(2_u64))
	}
}

// For backwards compatibility and tests
impl WeightInfo for () {
	fn register_poll_request() -> Weight {
		Weight::from_parts(14_000_000, 3_517)
			.saturating_add(RocksDbWeight::get().reads(1_u64))
			.saturating_add(RocksDbWeight::get().writes(1_u64))
	}
	fn start_poll() -> Weight {
		Weight::from_parts(16_000_000, 3_517)
			.saturating_add(RocksDbWeight::get().reads(2_u64))
			.saturating_add(RocksDbWeight::get().writes(1_u64))
	}
	fn register_voter() -> Weight {
		Weight::from_parts(31_000_000, 4_102)
			.saturating_add(RocksDbWeight::get().reads(6_u64))
			.saturating_add(RocksDbWeight::get().writes(3_u64))
	}
	fn vote() -> Weight {
		Weight::from_parts(36_000_000, 4_102)
			.saturating_add(RocksDbWeight::get().reads(8_u64))
			.saturating_add(RocksDbWeight::get().writes(4_u64))
	}
	fn release_votes() -> Weight {
		Weight::from_parts(22_000_000, 4_102)
			.saturating_add(RocksDbWeight::get().reads(4_u64))
			.saturating_add(RocksDbWeight::get().writes(2_u64))
	}
}
