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

use parity_scale_codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};
use sp_runtime::RuntimeDebug;

pub type ProjectId = u32;
/// 1-based, assigned per project in insertion order.
pub type MilestoneId = u32;
/// Founder supplied tag of an objective.
pub type ObjectiveId = [u8; 32];
/// Links an objective to the vote buckets of the reputation registry.
pub type ObjectiveType = [u8; 32];
pub type AssetId = u32;
pub type Balance = u128;

#[derive(
	Default,
	Clone,
	Copy,
	Encode,
	Decode,
	Eq,
	PartialEq,
	PartialOrd,
	Ord,
	RuntimeDebug,
	TypeInfo,
	MaxEncodedLen,
	Serialize,
	Deserialize,
)]
pub enum ProjectState {
	#[default]
	#[codec(index = 0)]
	NotExist,
	#[codec(index = 1)]
	AppSubmitted,
	#[codec(index = 2)]
	AppAccepted,
	#[codec(index = 3)]
	TokenSale,
	#[codec(index = 4)]
	Milestone,
	#[codec(index = 5)]
	Complete,
}

impl ProjectState {
	/// Milestones can only be planned once the application went through and until the project completes.
	pub const fn accepts_new_milestones(&self) -> bool {
		matches!(self, Self::AppAccepted | Self::Milestone)
	}

	/// Activating a milestone locks raised funds, so the sale must have started.
	pub const fn accepts_activation(&self) -> bool {
		matches!(self, Self::TokenSale | Self::Milestone)
	}
}

/// Identifies a reputation poll. Every milestone owns exactly one.
#[derive(
	Clone,
	Copy,
	Encode,
	Decode,
	Eq,
	PartialEq,
	PartialOrd,
	Ord,
	RuntimeDebug,
	TypeInfo,
	MaxEncodedLen,
	Serialize,
	Deserialize,
)]
pub struct PollId {
	pub project_id: ProjectId,
	pub milestone_id: MilestoneId,
}

impl PollId {
	pub const fn new(project_id: ProjectId, milestone_id: MilestoneId) -> Self {
		Self { project_id, milestone_id }
	}
}
