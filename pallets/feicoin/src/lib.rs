//! # Feicoin issuance pallet
//!
//! A single privileged call, [`Pallet::mint_tokens`], creates new units of an
//! asset and hands them to a recipient.
//!
//! Only the account produced by `Config::Authority` may call it. Issuance
//! goes through the pallet's own holding account: coins are minted there and
//! immediately forwarded, so the holding account never keeps a resting
//! balance. Both ledger mutations run inside one storage layer; if the
//! forward fails the mint is rolled back with it.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod address;
pub mod authority;
pub mod ledger;
pub mod types;
pub mod weights;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub use address::{AddressCodec, Ss58Address};
pub use authority::{
    AuthorizationPolicy, Denied, ResolveAddress, ResolvedAuthority, StaticAuthority,
};
pub use ledger::{IssuanceLedger, NativeLedger};
pub use types::{Coin, InvalidDenom, MintEvent, MintRequest, MintStage};
pub use weights::WeightInfo;

use sp_runtime::{DispatchError, RuntimeDebug};
use sp_std::prelude::*;

pub(crate) const LOG_TARGET: &str = "runtime::feicoin";

/// Why a mint was aborted, with the values needed to diagnose it.
#[derive(Clone, PartialEq, Eq, RuntimeDebug)]
pub enum IssuanceError<AccountId> {
    /// `caller` is not the authority, or the authority could not be resolved.
    Unauthorized { authority: Option<AccountId>, caller: AccountId, cause: Option<DispatchError> },
    /// The recipient text does not parse as an account.
    InvalidAddress { address: Vec<u8> },
    /// The ledger refused to issue `denom`.
    MintFailed { denom: Vec<u8>, cause: DispatchError },
    /// Issuance succeeded but the coins could not reach `recipient`.
    TransferFailed { recipient: AccountId, cause: DispatchError },
}

impl<AccountId> IssuanceError<AccountId> {
    /// The stage the mint was in when it was aborted.
    pub fn stage(&self) -> MintStage {
        match self {
            IssuanceError::Unauthorized { .. } => MintStage::Authorizing,
            IssuanceError::InvalidAddress { .. } => MintStage::Validating,
            IssuanceError::MintFailed { .. } => MintStage::Minting,
            IssuanceError::TransferFailed { .. } => MintStage::Transferring,
        }
    }
}

/// Failure inside the ledger scope, before it is tied to a recipient.
struct LedgerFailure {
    stage: MintStage,
    cause: DispatchError,
}

// Opening the storage layer is the only way to fail before `mint_coins`.
impl From<DispatchError> for LedgerFailure {
    fn from(cause: DispatchError) -> Self {
        LedgerFailure { stage: MintStage::Minting, cause }
    }
}

#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper {
    /// A denom the configured ledger will issue.
    fn mint_denom() -> Vec<u8>;
}

#[cfg(feature = "runtime-benchmarks")]
impl BenchmarkHelper for () {
    fn mint_denom() -> Vec<u8> {
        b"fei".to_vec()
    }
}

#[cfg(feature = "runtime-benchmarks")]
impl<Currency, Denom: frame_support::traits::Get<&'static str>> BenchmarkHelper
    for NativeLedger<Currency, Denom>
{
    fn mint_denom() -> Vec<u8> {
        Denom::get().as_bytes().to_vec()
    }
}

#[frame_support::pallet]
pub mod pallet {
    use super::*;
    use frame_support::{pallet_prelude::*, storage::with_storage_layer, PalletId};
    use frame_system::pallet_prelude::*;
    use sp_runtime::traits::AccountIdConversion;

    pub type AddressOf<T> = BoundedVec<u8, <T as Config>::MaxAddressLength>;
    pub type DenomOf<T> = BoundedVec<u8, <T as Config>::MaxDenomLength>;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Decides which single account may mint.
        type Authority: AuthorizationPolicy<Self::AccountId>;

        /// Parses recipient text and renders accounts for events.
        type AddressCodec: AddressCodec<Self::AccountId>;

        /// Balance store that mints and moves the coins.
        type Ledger: IssuanceLedger<Self::AccountId>;

        /// Source of the holding account coins pass through.
        #[pallet::constant]
        type PalletId: Get<PalletId>;

        /// Longest address text accepted; must fit any encoded account (48 bytes
        /// for SS58 text of a 32-byte id).
        #[pallet::constant]
        type MaxAddressLength: Get<u32>;

        #[pallet::constant]
        type MaxDenomLength: Get<u32>;

        type WeightInfo: WeightInfo;

        #[cfg(feature = "runtime-benchmarks")]
        type BenchmarkHelper: BenchmarkHelper;
    }

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// New coins were issued and delivered. Addresses are kept as text.
        TokensMinted {
            minter: AddressOf<T>,
            recipient: AddressOf<T>,
            amount: u128,
            denom: DenomOf<T>,
        },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// The caller is not the authorized minter, or the minter could not be resolved.
        Unauthorized,
        /// The recipient is not a well-formed address.
        InvalidAddress,
        /// The ledger refused to issue the coins.
        MintFailed,
        /// The issued coins could not be delivered; nothing was minted.
        TransferFailed,
    }

    impl<T: Config> From<IssuanceError<T::AccountId>> for Error<T> {
        fn from(err: IssuanceError<T::AccountId>) -> Self {
            match err {
                IssuanceError::Unauthorized { .. } => Error::<T>::Unauthorized,
                IssuanceError::InvalidAddress { .. } => Error::<T>::InvalidAddress,
                IssuanceError::MintFailed { .. } => Error::<T>::MintFailed,
                IssuanceError::TransferFailed { .. } => Error::<T>::TransferFailed,
            }
        }
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        #[cfg(feature = "std")]
        fn integrity_test() {
            assert!(
                Self::address_bound_fits(),
                "MaxAddressLength is too small for an encoded account",
            );
        }

        #[cfg(feature = "try-runtime")]
        fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
            Self::do_try_state()
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Mint `amount` of `denom` and deliver it to `recipient`.
        ///
        /// The signer must be the configured authority.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::mint_tokens())]
        pub fn mint_tokens(
            origin: OriginFor<T>,
            recipient: AddressOf<T>,
            #[pallet::compact] amount: u128,
            denom: DenomOf<T>,
        ) -> DispatchResult {
            let authority = ensure_signed(origin)?;
            let request = MintRequest {
                authority,
                recipient: recipient.into_inner(),
                amount,
                denom: denom.into_inner(),
            };

            Self::do_mint(request).map(|_| ()).map_err(|err| Error::<T>::from(err).into())
        }
    }

    impl<T: Config> Pallet<T> {
        /// Account that coins are minted into before being forwarded.
        pub fn holding_account() -> T::AccountId {
            T::PalletId::get().into_account_truncating()
        }

        /// Whether `MaxAddressLength` holds the encoded holding account.
        ///
        /// Every account id of the runtime encodes to the same length, so this
        /// stands in for the minter and any recipient too.
        pub fn address_bound_fits() -> bool {
            let holding = T::AddressCodec::encode(&Self::holding_account());
            holding.len() <= T::MaxAddressLength::get() as usize
        }

        /// Checks the configured bounds against the accounts the pallet renders.
        #[cfg(any(feature = "try-runtime", test))]
        pub fn do_try_state() -> Result<(), DispatchError> {
            ensure!(
                Self::address_bound_fits(),
                "MaxAddressLength is too small for an encoded account"
            );
            if let Ok(authority) = T::Authority::resolve() {
                ensure!(
                    AddressOf::<T>::try_from(T::AddressCodec::encode(&authority)).is_ok(),
                    "authority address exceeds MaxAddressLength"
                );
            }
            Ok(())
        }

        /// Authorize, validate, mint, forward, and record `request`.
        ///
        /// Ledger effects are confined to a storage layer of their own; an
        /// `Err` leaves supply and balances exactly as they were.
        pub fn do_mint(
            request: MintRequest<T::AccountId>,
        ) -> Result<MintEvent, IssuanceError<T::AccountId>> {
            Self::try_mint(request).inspect_err(|err| {
                log::warn!(
                    target: LOG_TARGET,
                    "mint aborted while {:?}: {:?}",
                    err.stage(),
                    err,
                );
            })
        }

        fn try_mint(
            request: MintRequest<T::AccountId>,
        ) -> Result<MintEvent, IssuanceError<T::AccountId>> {
            let MintRequest { authority: caller, recipient, amount, denom } = request;
            log::debug!(
                target: LOG_TARGET,
                "{:?} mint of {} {:?}",
                MintStage::Received,
                amount,
                denom,
            );

            let minter = T::Authority::authorize(&caller).map_err(|denied| {
                IssuanceError::Unauthorized {
                    authority: denied.authority,
                    caller: caller.clone(),
                    cause: denied.cause,
                }
            })?;
            let minter_text = AddressOf::<T>::try_from(T::AddressCodec::encode(&minter))
                .map_err(|_| IssuanceError::Unauthorized {
                    authority: Some(minter),
                    caller,
                    cause: Some(DispatchError::Other("authority address exceeds MaxAddressLength")),
                })?;

            let (recipient_account, recipient_text) = Self::parse_recipient(recipient)?;

            let coin = Coin::new(denom.clone(), amount).map_err(|InvalidDenom| {
                IssuanceError::MintFailed {
                    denom: denom.clone(),
                    cause: DispatchError::Other("invalid denom"),
                }
            })?;
            let event_denom: DenomOf<T> =
                denom.clone().try_into().map_err(|_| IssuanceError::MintFailed {
                    denom: denom.clone(),
                    cause: DispatchError::Other("denom exceeds MaxDenomLength"),
                })?;

            Self::issue_and_forward(&recipient_account, coin).map_err(|failure| {
                match failure.stage {
                    MintStage::Transferring => IssuanceError::TransferFailed {
                        recipient: recipient_account.clone(),
                        cause: failure.cause,
                    },
                    _ => IssuanceError::MintFailed { denom: denom.clone(), cause: failure.cause },
                }
            })?;

            log::debug!(
                target: LOG_TARGET,
                "{:?} mint of {} {:?}",
                MintStage::Emitting,
                amount,
                denom,
            );
            Self::deposit_event(Event::TokensMinted {
                minter: minter_text.clone(),
                recipient: recipient_text.clone(),
                amount,
                denom: event_denom,
            });

            log::debug!(
                target: LOG_TARGET,
                "{:?} mint of {} {:?}",
                MintStage::Completed,
                amount,
                denom,
            );
            Ok(MintEvent {
                minter: minter_text.into_inner(),
                recipient: recipient_text.into_inner(),
                amount,
                denom,
            })
        }

        fn parse_recipient(
            recipient: Vec<u8>,
        ) -> Result<(T::AccountId, AddressOf<T>), IssuanceError<T::AccountId>> {
            let account = match T::AddressCodec::decode(&recipient) {
                Some(account) => account,
                None => return Err(IssuanceError::InvalidAddress { address: recipient }),
            };
            let text = AddressOf::<T>::try_from(recipient)
                .map_err(|address| IssuanceError::InvalidAddress { address })?;
            Ok((account, text))
        }

        fn issue_and_forward(recipient: &T::AccountId, coin: Coin) -> Result<(), LedgerFailure> {
            let holding = Self::holding_account();
            let coins = [coin];

            with_storage_layer(|| {
                T::Ledger::mint_coins(&holding, &coins)
                    .map_err(|cause| LedgerFailure { stage: MintStage::Minting, cause })?;
                T::Ledger::send_coins(&holding, recipient, &coins)
                    .map_err(|cause| LedgerFailure { stage: MintStage::Transferring, cause })
            })
        }
    }
}
