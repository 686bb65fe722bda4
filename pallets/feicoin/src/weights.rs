//! Weights for pallet-feicoin.
//!
//! These are hand-written estimates, not benchmark output. The base figure is
//! a placeholder, and the storage counts assume a `pallet_balances` ledger
//! (mint into the holding account, transfer to the recipient, one event).
//! Regenerate this file from `benchmarking.rs` before production use.

#![allow(unused_parens)]
#![allow(unused_imports)]

use core::marker::PhantomData;
use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
    fn mint_tokens() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    // Estimated: holding and recipient accounts (r:2 w:2), total issuance
    // (r:1 w:1), event (w:1).
    fn mint_tokens() -> Weight {
        Weight::from_parts(48_000_000, 6_196)
            .saturating_add(T::DbWeight::get().reads(3_u64))
            .saturating_add(T::DbWeight::get().writes(4_u64))
    }
}

impl WeightInfo for () {
    fn mint_tokens() -> Weight {
        Weight::from_parts(48_000_000, 6_196)
            .saturating_add(RocksDbWeight::get().reads(3_u64))
            .saturating_add(RocksDbWeight::get().writes(4_u64))
    }
}
