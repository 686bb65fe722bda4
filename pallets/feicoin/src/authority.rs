//! Who may mint.
//!
//! Exactly one account is authorized at any moment. The runtime chooses how
//! that account is found by picking an [`AuthorizationPolicy`] for
//! `Config::Authority`:
//!
//! - [`StaticAuthority`] reads a value fixed when the runtime is built;
//! - [`ResolvedAuthority`] asks an identity store on every call and never
//!   caches the answer.
//!
//! A policy that cannot produce the authority denies everyone.

use crate::address::AddressCodec;
use core::marker::PhantomData;
use frame_support::traits::Get;
use sp_runtime::{DispatchError, RuntimeDebug};
use sp_std::prelude::*;

/// Why a caller was turned away.
#[derive(Clone, PartialEq, Eq, RuntimeDebug)]
pub struct Denied<AccountId> {
    /// The authority the caller was compared against, if it could be resolved.
    pub authority: Option<AccountId>,
    /// Set when resolving the authority itself failed.
    pub cause: Option<DispatchError>,
}

pub trait AuthorizationPolicy<AccountId: PartialEq> {
    /// The single account allowed to mint right now.
    fn resolve() -> Result<AccountId, DispatchError>;

    /// Compares `caller` against the resolved authority by exact equality.
    fn authorize(caller: &AccountId) -> Result<AccountId, Denied<AccountId>> {
        match Self::resolve() {
            Ok(authority) if authority == *caller => Ok(authority),
            Ok(authority) => Err(Denied { authority: Some(authority), cause: None }),
            Err(cause) => Err(Denied { authority: None, cause: Some(cause) }),
        }
    }

    fn is_authorized(caller: &AccountId) -> bool {
        Self::authorize(caller).is_ok()
    }
}

/// The authority is a constant of the runtime.
pub struct StaticAuthority<Authority>(PhantomData<Authority>);

impl<AccountId, Authority> AuthorizationPolicy<AccountId> for StaticAuthority<Authority>
where
    AccountId: PartialEq,
    Authority: Get<AccountId>,
{
    fn resolve() -> Result<AccountId, DispatchError> {
        Ok(Authority::get())
    }
}

/// In-process identity store mapping key aliases to address text.
pub trait ResolveAddress {
    fn resolve_address(alias: &[u8]) -> Result<Vec<u8>, DispatchError>;
}

/// The authority is whatever address `Resolver` holds for `Alias`, looked up
/// on every call.
pub struct ResolvedAuthority<Resolver, Alias, Codec>(PhantomData<(Resolver, Alias, Codec)>);

impl<AccountId, Resolver, Alias, Codec> AuthorizationPolicy<AccountId>
    for ResolvedAuthority<Resolver, Alias, Codec>
where
    AccountId: PartialEq,
    Resolver: ResolveAddress,
    Alias: Get<&'static str>,
    Codec: AddressCodec<AccountId>,
{
    fn resolve() -> Result<AccountId, DispatchError> {
        let alias = Alias::get();
        let address = Resolver::resolve_address(alias.as_bytes())?;
        Codec::decode(&address).ok_or_else(|| {
            log::warn!(
                target: crate::LOG_TARGET,
                "identity store returned an unparsable address for {alias}: {:?}",
                address,
            );
            DispatchError::Other("resolved authority is not a valid address")
        })
    }
}
