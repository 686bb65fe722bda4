use crate as pallet_feicoin;
use crate::{
    AddressCodec, Coin, IssuanceLedger, NativeLedger, ResolveAddress, ResolvedAuthority,
    Ss58Address,
};
use frame_support::{
    derive_impl, parameter_types,
    storage::with_storage_layer,
    traits::{ConstU32, Get},
    BoundedVec, PalletId,
};
use sp_runtime::{
    traits::IdentityLookup, AccountId32, ArithmeticError, BuildStorage, DispatchError,
    DispatchResult, TokenError,
};
use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
};

type Block = frame_system::mocking::MockBlock<Test>;

pub type AccountId = AccountId32;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        Balances: pallet_balances,
        Feicoin: pallet_feicoin,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Block = Block;
    type AccountId = AccountId;
    type Lookup = IdentityLookup<Self::AccountId>;
    type AccountData = pallet_balances::AccountData<u64>;
}

#[derive_impl(pallet_balances::config_preludes::TestDefaultConfig)]
impl pallet_balances::Config for Test {
    type AccountStore = System;
}

pub const P1: AccountId = AccountId32::new([1u8; 32]);
pub const P2: AccountId = AccountId32::new([2u8; 32]);
pub const R1: AccountId = AccountId32::new([11u8; 32]);
pub const R2: AccountId = AccountId32::new([12u8; 32]);

parameter_types! {
    pub const Network: u16 = 42;
    pub const MinterAlias: &'static str = "bob";
    pub const FeicoinPalletId: PalletId = PalletId(*b"py/feico");
    pub const NativeDenom: &'static str = "fei";
    pub storage MaxAddressLength: u32 = 64;
}

pub type Codec = Ss58Address<Network>;

/// `NativeLedger` wired to `pallet_balances`, exercised directly by the tests.
pub type NativeFei = NativeLedger<Balances, NativeDenom>;

impl pallet_feicoin::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Authority = ResolvedAuthority<Keyring, MinterAlias, Codec>;
    type AddressCodec = Codec;
    type Ledger = MockLedger;
    type PalletId = FeicoinPalletId;
    type MaxAddressLength = MaxAddressLength;
    type MaxDenomLength = ConstU32<128>;
    type WeightInfo = ();
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper = ();
}

thread_local! {
    static KEYS: RefCell<BTreeMap<Vec<u8>, Vec<u8>>> = RefCell::new(BTreeMap::new());
    static KEYRING_ONLINE: Cell<bool> = Cell::new(true);
}

/// In-memory identity store; can be taken offline.
pub struct Keyring;

impl Keyring {
    pub fn set(alias: &str, account: &AccountId) {
        KEYS.with(|k| k.borrow_mut().insert(alias.as_bytes().to_vec(), address(account)));
    }

    pub fn set_online(online: bool) {
        KEYRING_ONLINE.with(|o| o.set(online));
    }
}

impl ResolveAddress for Keyring {
    fn resolve_address(alias: &[u8]) -> Result<Vec<u8>, DispatchError> {
        if !KEYRING_ONLINE.with(|o| o.get()) {
            return Err(DispatchError::Unavailable);
        }
        KEYS.with(|k| k.borrow().get(alias).cloned()).ok_or(DispatchError::CannotLookup)
    }
}

#[frame_support::storage_alias]
pub type LedgerBalances = StorageDoubleMap<
    FeicoinMockLedger,
    frame_support::Blake2_128Concat,
    AccountId,
    frame_support::Blake2_128Concat,
    Vec<u8>,
    u128,
    frame_support::pallet_prelude::ValueQuery,
>;

#[frame_support::storage_alias]
pub type LedgerSupply = StorageMap<
    FeicoinMockLedger,
    frame_support::Blake2_128Concat,
    Vec<u8>,
    u128,
    frame_support::pallet_prelude::ValueQuery,
>;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LedgerCall {
    Mint,
    Send,
}

thread_local! {
    static LEDGER_CALLS: RefCell<Vec<LedgerCall>> = RefCell::new(Vec::new());
    static FAIL_MINT: Cell<bool> = Cell::new(false);
    static FAIL_SEND: Cell<bool> = Cell::new(false);
}

/// Multi-denom ledger kept in storage so that storage layers roll it back.
/// Records every call and can be told to refuse mints or transfers.
pub struct MockLedger;

impl MockLedger {
    pub fn calls() -> Vec<LedgerCall> {
        LEDGER_CALLS.with(|c| c.borrow().clone())
    }

    pub fn fail_mints(fail: bool) {
        FAIL_MINT.with(|f| f.set(fail));
    }

    pub fn fail_transfers(fail: bool) {
        FAIL_SEND.with(|f| f.set(fail));
    }

    pub fn balance(who: &AccountId, denom: &[u8]) -> u128 {
        LedgerBalances::get(who, denom.to_vec())
    }

    pub fn supply(denom: &[u8]) -> u128 {
        LedgerSupply::get(denom.to_vec())
    }

    /// Seeds `who` with `amount`, growing supply to match.
    pub fn endow(who: &AccountId, denom: &[u8], amount: u128) {
        LedgerBalances::mutate(who, denom.to_vec(), |b| *b += amount);
        LedgerSupply::mutate(denom.to_vec(), |s| *s += amount);
    }

    fn record(call: LedgerCall) {
        LEDGER_CALLS.with(|c| c.borrow_mut().push(call));
    }
}

impl IssuanceLedger<AccountId> for MockLedger {
    fn mint_coins(target: &AccountId, coins: &[Coin]) -> DispatchResult {
        Self::record(LedgerCall::Mint);
        if FAIL_MINT.with(|f| f.get()) {
            return Err(DispatchError::Other("minting disabled"));
        }
        with_storage_layer(|| {
            for coin in coins {
                let supply = LedgerSupply::get(&coin.denom)
                    .checked_add(coin.amount)
                    .ok_or(ArithmeticError::Overflow)?;
                LedgerSupply::insert(&coin.denom, supply);
                LedgerBalances::mutate(target, &coin.denom, |b| *b += coin.amount);
            }
            Ok(())
        })
    }

    fn send_coins(from: &AccountId, to: &AccountId, coins: &[Coin]) -> DispatchResult {
        Self::record(LedgerCall::Send);
        if FAIL_SEND.with(|f| f.get()) {
            return Err(DispatchError::Other("transfers disabled"));
        }
        with_storage_layer(|| {
            for coin in coins {
                let held = LedgerBalances::get(from, &coin.denom);
                let remaining =
                    held.checked_sub(coin.amount).ok_or(TokenError::FundsUnavailable)?;
                LedgerBalances::insert(from, &coin.denom, remaining);
                LedgerBalances::mutate(to, &coin.denom, |b| *b += coin.amount);
            }
            Ok(())
        })
    }
}

/// SS58 text of `who` on the mock network.
pub fn address(who: &AccountId) -> Vec<u8> {
    <Codec as AddressCodec<AccountId>>::encode(who)
}

pub fn bounded<S: Get<u32>>(bytes: &[u8]) -> BoundedVec<u8, S> {
    BoundedVec::try_from(bytes.to_vec()).expect("test input fits its bound")
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> sp_io::TestExternalities {
    let t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    Keyring::set(MinterAlias::get(), &P1);

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| System::set_block_number(1));
    ext
}
