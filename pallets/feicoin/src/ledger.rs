//! Ledger-state store used by the issuance handler.
//!
//! The pallet never touches balances itself. It asks the ledger to mint into
//! its holding account and to move coins out of it again.

use crate::types::Coin;
use core::marker::PhantomData;
use frame_support::{
    storage::with_storage_layer,
    traits::{fungible, tokens::Preservation, Get},
};
use sp_runtime::{ArithmeticError, DispatchError, DispatchResult, TokenError};

/// Balance primitives of the host ledger.
///
/// Each call must be atomic on its own and must compose with an enclosing
/// storage layer, so that a caller can roll back a mint when a later step
/// fails.
pub trait IssuanceLedger<AccountId> {
    /// Creates `coins` out of nothing and credits them to `target`.
    fn mint_coins(target: &AccountId, coins: &[Coin]) -> DispatchResult;

    /// Moves `coins` from the module-owned `from` to `to`.
    fn send_coins(from: &AccountId, to: &AccountId, coins: &[Coin]) -> DispatchResult;
}

/// [`IssuanceLedger`] over a single `fungible` currency whose denom is `Denom`.
///
/// Zero coins are dropped before they reach the currency, the way an empty
/// coin set is a no-op. Coins of any other denom are refused as
/// [`TokenError::UnknownAsset`].
pub struct NativeLedger<Currency, Denom>(PhantomData<(Currency, Denom)>);

impl<Currency, Denom> NativeLedger<Currency, Denom>
where
    Denom: Get<&'static str>,
{
    fn native_amount<Balance: TryFrom<u128>>(coin: &Coin) -> Result<Balance, DispatchError> {
        if coin.denom.as_slice() != Denom::get().as_bytes() {
            return Err(TokenError::UnknownAsset.into());
        }
        Balance::try_from(coin.amount).map_err(|_| ArithmeticError::Overflow.into())
    }
}

impl<AccountId, Currency, Denom> IssuanceLedger<AccountId> for NativeLedger<Currency, Denom>
where
    AccountId: Eq,
    Currency: fungible::Mutate<AccountId>,
    Currency::Balance: TryFrom<u128>,
    Denom: Get<&'static str>,
{
    fn mint_coins(target: &AccountId, coins: &[Coin]) -> DispatchResult {
        with_storage_layer(|| {
            for coin in coins.iter().filter(|coin| !coin.is_zero()) {
                let amount = Self::native_amount::<Currency::Balance>(coin)?;
                Currency::mint_into(target, amount)?;
            }
            Ok(())
        })
    }

    fn send_coins(from: &AccountId, to: &AccountId, coins: &[Coin]) -> DispatchResult {
        with_storage_layer(|| {
            for coin in coins.iter().filter(|coin| !coin.is_zero()) {
                let amount = Self::native_amount::<Currency::Balance>(coin)?;
                Currency::transfer(from, to, amount, Preservation::Expendable)?;
            }
            Ok(())
        })
    }
}
