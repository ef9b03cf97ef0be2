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

use crate as pallet_milestones;
use frame_support::{
	derive_impl, parameter_types,
	traits::{AsEnsureOriginWithArg, ConstU128, ConstU32, ConstU64, SortedMembers},
};
use frame_system as system;
use frame_system::{EnsureRoot, EnsureSigned, EnsureSignedBy};
use polimec_common::{AssetId, Balance, Collectors, ProjectId, ProjectRegistry, ProjectState, ProvideAveragePrice, DAYS, MONTHS, WEEKS};
use sp_runtime::{BuildStorage, DispatchResult};
use std::{cell::RefCell, collections::BTreeMap};

type Block = frame_system::mocking::MockBlock<Test>;
pub type AccountId = u64;

pub const PROJECT_ID: ProjectId = 1;
pub const PROJECT_TOKEN: AssetId = 7;
pub const ASSET_ADMIN: AccountId = 1;
pub const FOUNDER: AccountId = 2;
pub const INVESTOR_1: AccountId = 21;
pub const INVESTOR_2: AccountId = 22;
pub const PURCHASER: AccountId = 23;
pub const NOBODY: AccountId = 99;
pub const REGULATOR_A: AccountId = 41;
pub const REGULATOR_B: AccountId = 42;
pub const REGULATOR_C: AccountId = 43;

pub const ETHER_COLLECTOR: AccountId = 1_000 + PROJECT_ID as AccountId;
pub const TOKEN_COLLECTOR: AccountId = 2_000 + PROJECT_ID as AccountId;
pub const COLLECTED: Balance = 20_000;
pub const DEFAULT_PRICE: Balance = 10;

pub const DAY: u64 = DAYS as u64;
pub const POLL_DELAY: u64 = 10;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
	pub enum Test
	{
		System: frame_system,
		Balances: pallet_balances,
		Assets: pallet_assets,
		Reputation: pallet_reputation,
		PolimecMilestones: pallet_milestones,
	}
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig as frame_system::DefaultConfig)]
impl system::Config for Test {
	type AccountData = pallet_balances::AccountData<Balance>;
	type AccountId = AccountId;
	type Block = Block;
}

#[derive_impl(pallet_balances::config_preludes::TestDefaultConfig as pallet_balances::DefaultConfig)]
impl pallet_balances::Config for Test {
	type AccountStore = System;
	type Balance = Balance;
	type ExistentialDeposit = ConstU128<1>;
	type FreezeIdentifier = RuntimeFreezeReason;
	type MaxFreezes = ConstU32<1>;
}

#[derive_impl(pallet_assets::config_preludes::TestDefaultConfig as pallet_assets::DefaultConfig)]
impl pallet_assets::Config for Test {
	type ApprovalDeposit = ConstU128<1>;
	type AssetAccountDeposit = ConstU128<10>;
	type AssetDeposit = ConstU128<1>;
	type Balance = Balance;
	type CreateOrigin = AsEnsureOriginWithArg<EnsureSigned<AccountId>>;
	type Currency = Balances;
	type ForceOrigin = EnsureRoot<AccountId>;
	type Freezer = Reputation;
	type MetadataDepositBase = ConstU128<1>;
	type MetadataDepositPerByte = ConstU128<1>;
}

impl pallet_reputation::Config for Test {
	type AdminOrigin = EnsureRoot<AccountId>;
	type MaxFrozenPolls = ConstU32<4>;
	type NativeCurrency = Balances;
	type PollDelayLength = ConstU64<POLL_DELAY>;
	type PollLength = PollLength;
	type ProjectTokens = Assets;
	type RuntimeEvent = RuntimeEvent;
	type RuntimeFreezeReason = RuntimeFreezeReason;
	type WeightInfo = ();
}

#[derive(Clone, Debug)]
pub struct MockProject {
	pub owner: AccountId,
	pub state: ProjectState,
	pub token: Option<AssetId>,
}

thread_local! {
	pub static PROJECTS: RefCell<BTreeMap<ProjectId, MockProject>> = RefCell::new(BTreeMap::new());
	pub static PRICES: RefCell<BTreeMap<ProjectId, Balance>> = RefCell::new(BTreeMap::new());
}

/// Stands in for the funding pallet.
pub struct MockProjectRegistry;
impl MockProjectRegistry {
	pub fn register(project_id: ProjectId, owner: AccountId, state: ProjectState, token: Option<AssetId>) {
		PROJECTS.with(|projects| projects.borrow_mut().insert(project_id, MockProject { owner, state, token }));
	}

	pub fn set_state(project_id: ProjectId, state: ProjectState) {
		PROJECTS.with(|projects| {
			if let Some(project) = projects.borrow_mut().get_mut(&project_id) {
				project.state = state;
			}
		});
	}

	fn get(project_id: ProjectId) -> Option<MockProject> {
		PROJECTS.with(|projects| projects.borrow().get(&project_id).cloned())
	}
}

impl ProjectRegistry<AccountId> for MockProjectRegistry {
	fn project_owner(project_id: ProjectId) -> Option<AccountId> {
		Self::get(project_id).map(|project| project.owner)
	}

	fn project_state(project_id: ProjectId) -> ProjectState {
		Self::get(project_id).map(|project| project.state).unwrap_or_default()
	}

	fn project_token(project_id: ProjectId) -> Option<AssetId> {
		Self::get(project_id).and_then(|project| project.token)
	}

	fn set_project_state(project_id: ProjectId, state: ProjectState) -> DispatchResult {
		Self::set_state(project_id, state);
		Ok(())
	}
}

pub struct MockTokenSale;
impl MockTokenSale {
	pub fn set_price(project_id: ProjectId, price: Balance) {
		PRICES.with(|prices| prices.borrow_mut().insert(project_id, price));
	}
}

impl ProvideAveragePrice for MockTokenSale {
	fn average_price(project_id: ProjectId) -> Balance {
		PRICES.with(|prices| prices.borrow().get(&project_id).copied().unwrap_or_default())
	}
}

/// Plain accounts, so collectors of different projects never collide in a `u64` account space.
pub struct MockCollectors;
impl Collectors<AccountId> for MockCollectors {
	fn ether_collector(project_id: ProjectId) -> AccountId {
		1_000 + AccountId::from(project_id)
	}

	fn token_collector(project_id: ProjectId) -> AccountId {
		2_000 + AccountId::from(project_id)
	}
}

pub struct Regulators;
impl SortedMembers<AccountId> for Regulators {
	fn sorted_members() -> Vec<AccountId> {
		vec![REGULATOR_A, REGULATOR_B, REGULATOR_C]
	}
}

parameter_types! {
	pub const PollLength: u64 = 30 * DAY;
	pub const RatingFinalizeWindowFromEnd: u64 = 3 * WEEKS as u64;
	pub const RatingStageLength: u64 = 28 * DAY;
	pub const RatingStageMaxStartTimeFromEnd: u64 = 4 * WEEKS as u64;
	pub const RefundDuration: u64 = MONTHS as u64;
	pub const RefundStageMinStartTimeFromEnd: u64 = 2 * WEEKS as u64;
}

impl pallet_milestones::Config for Test {
	type Collectors = MockCollectors;
	type Currency = Balances;
	type MaxMilestones = ConstU32<4>;
	type MaxObjectivesPerMilestone = ConstU32<4>;
	type MaxRegulatorsPerObjective = ConstU32<2>;
	type ProjectRegistry = MockProjectRegistry;
	type ProjectTokens = Assets;
	type RatingFinalizeWindowFromEnd = RatingFinalizeWindowFromEnd;
	type RatingStageLength = RatingStageLength;
	type RatingStageMaxStartTimeFromEnd = RatingStageMaxStartTimeFromEnd;
	type RefundDuration = RefundDuration;
	type RefundStageMinStartTimeFromEnd = RefundStageMinStartTimeFromEnd;
	type RegulatorOrigin = EnsureSignedBy<Regulators, AccountId>;
	type Reputation = Reputation;
	type RuntimeEvent = RuntimeEvent;
	type TokenSale = MockTokenSale;
	type WeightInfo = ();
	#[cfg(feature = "runtime-benchmarks")]
	type BenchmarkHelper = MockBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct MockBenchmarkHelper;
#[cfg(feature = "runtime-benchmarks")]
impl crate::BenchmarkHelper<Test> for MockBenchmarkHelper {
	fn create_project(project_id: ProjectId, owner: &AccountId, price: Balance) -> AssetId {
		MockProjectRegistry::register(project_id, *owner, ProjectState::AppAccepted, Some(PROJECT_TOKEN));
		MockTokenSale::set_price(project_id, price);
		PROJECT_TOKEN
	}

	fn set_vote_weight(
		poll_id: polimec_common::PollId,
		regulator: &AccountId,
		objective_type: polimec_common::ObjectiveType,
		weight: Balance,
	) {
		pallet_reputation::VotesForRegulator::<Test>::insert((poll_id, regulator, objective_type), weight);
	}
}

pub(crate) struct ExtBuilder {
	balances: Vec<(AccountId, Balance)>,
	token_balances: Vec<(AccountId, Balance)>,
	project_state: ProjectState,
	average_price: Balance,
}

impl Default for ExtBuilder {
	fn default() -> ExtBuilder {
		ExtBuilder {
			balances: vec![(ASSET_ADMIN, 1_000), (FOUNDER, 1_000), (ETHER_COLLECTOR, COLLECTED)],
			token_balances: vec![(INVESTOR_1, 60), (INVESTOR_2, 40), (PURCHASER, 1_000)],
			project_state: ProjectState::AppAccepted,
			average_price: DEFAULT_PRICE,
		}
	}
}

impl ExtBuilder {
	pub(crate) fn project_state(mut self, state: ProjectState) -> Self {
		self.project_state = state;
		self
	}

	pub(crate) fn collected(mut self, amount: Balance) -> Self {
		self.balances.retain(|(who, _)| *who != ETHER_COLLECTOR);
		if amount > 0 {
			self.balances.push((ETHER_COLLECTOR, amount));
		}
		self
	}

	pub(crate) fn average_price(mut self, price: Balance) -> Self {
		self.average_price = price;
		self
	}

	pub(crate) fn build(self) -> sp_io::TestExternalities {
		let mut t = system::GenesisConfig::<Test>::default()
			.build_storage()
			.expect("Frame system builds valid default genesis config");

		pallet_balances::GenesisConfig::<Test> { balances: self.balances, ..Default::default() }
			.assimilate_storage(&mut t)
			.expect("Pallet balances storage can be assimilated");

		pallet_assets::GenesisConfig::<Test> {
			assets: vec![(PROJECT_TOKEN, ASSET_ADMIN, true, 1)],
			accounts: self.token_balances.into_iter().map(|(who, amount)| (PROJECT_TOKEN, who, amount)).collect(),
			..Default::default()
		}
		.assimilate_storage(&mut t)
		.expect("Pallet assets storage can be assimilated");

		PROJECTS.with(|projects| projects.borrow_mut().clear());
		PRICES.with(|prices| prices.borrow_mut().clear());
		MockProjectRegistry::register(PROJECT_ID, FOUNDER, self.project_state, Some(PROJECT_TOKEN));
		if self.average_price > 0 {
			MockTokenSale::set_price(PROJECT_ID, self.average_price);
		}

		let mut ext = sp_io::TestExternalities::new(t);
		ext.execute_with(|| System::set_block_number(1));
		ext
	}
}
