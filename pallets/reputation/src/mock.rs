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

use frame_support::{
	derive_impl,
	traits::{AsEnsureOriginWithArg, ConstU128, ConstU32, ConstU64},
};
use frame_system as system;
use frame_system::{EnsureRoot, EnsureSigned};
use polimec_common::Balance;
use sp_runtime::BuildStorage;

type Block = frame_system::mocking::MockBlock<Test>;
pub type AccountId = u64;

pub const PROJECT_TOKEN: u32 = 7;
pub const ASSET_ADMIN: AccountId = 1;
pub const INVESTOR_1: AccountId = 21;
pub const INVESTOR_2: AccountId = 22;
pub const HOLDER: AccountId = 31;
pub const NOBODY: AccountId = 99;
pub const REGULATOR_A: AccountId = 41;
pub const REGULATOR_B: AccountId = 42;

pub const POLL_DELAY: u64 = 10;
pub const POLL_LENGTH: u64 = 100;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
	pub enum Test
	{
		System: frame_system,
		Balances: pallet_balances,
		Assets: pallet_assets,
		Reputation: crate,
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

impl crate::Config for Test {
	type AdminOrigin = EnsureRoot<AccountId>;
	type MaxFrozenPolls = ConstU32<2>;
	type NativeCurrency = Balances;
	type PollDelayLength = ConstU64<POLL_DELAY>;
	type PollLength = ConstU64<POLL_LENGTH>;
	type ProjectTokens = Assets;
	type RuntimeEvent = RuntimeEvent;
	type RuntimeFreezeReason = RuntimeFreezeReason;
	type WeightInfo = ();
}

pub(crate) struct ExtBuilder {
	balances: Vec<(AccountId, Balance)>,
	token_balances: Vec<(AccountId, Balance)>,
}

impl Default for ExtBuilder {
	fn default() -> ExtBuilder {
		ExtBuilder {
			balances: vec![(ASSET_ADMIN, 1_000), (INVESTOR_1, 1_000), (HOLDER, 500)],
			token_balances: vec![(INVESTOR_1, 60), (INVESTOR_2, 40)],
		}
	}
}

impl ExtBuilder {
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

		let mut ext = sp_io::TestExternalities::new(t);
		ext.execute_with(|| System::set_block_number(1));
		ext
	}
}
