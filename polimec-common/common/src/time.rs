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

//! Block based clock shared by every stage machine.

use crate::MILLISECS_PER_BLOCK;
use sp_runtime::{
	traits::{AtLeast32BitUnsigned, Saturating, UniqueSaturatedInto, Zero},
	Perquintill,
};

// Time is measured by number of blocks.
pub const MINUTES: u32 = 60_000 / (MILLISECS_PER_BLOCK as u32);
pub const HOURS: u32 = MINUTES * 60;
pub const DAYS: u32 = HOURS * 24;
pub const WEEKS: u32 = DAYS * 7;
pub const MONTHS: u32 = DAYS * 30;

/// Fraction of `length` that elapsed between `start` and `now`, clamped to `[0, 1]`.
///
/// A zero `length` counts as fully elapsed.
pub fn elapsed_fraction<BlockNumber>(start: BlockNumber, now: BlockNumber, length: BlockNumber) -> Perquintill
where
	BlockNumber: AtLeast32BitUnsigned + Copy,
{
	if length.is_zero() {
		return Perquintill::one();
	}
	let elapsed: u128 = now.saturating_sub(start).min(length).unique_saturated_into();
	let length: u128 = length.unique_saturated_into();
	Perquintill::from_rational(elapsed, length)
}

/// The block `span` blocks before `deadline`, saturating at genesis.
pub fn before<BlockNumber>(deadline: BlockNumber, span: BlockNumber) -> BlockNumber
where
	BlockNumber: AtLeast32BitUnsigned + Copy,
{
	deadline.saturating_sub(span)
}
