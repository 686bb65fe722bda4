use alloc::string::ToString;
use codec::{Decode, Encode};
use scale_info::TypeInfo;
use sp_runtime::RuntimeDebug;
use sp_std::{prelude::*, vec};

/// A quantity of one asset kind.
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo)]
pub struct Coin {
    pub denom: Vec<u8>,
    pub amount: u128,
}

#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub struct InvalidDenom;

const DENOM_MIN_LEN: usize = 3;
const DENOM_MAX_LEN: usize = 128;

impl Coin {
    /// Denoms are `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`.
    pub fn new(denom: Vec<u8>, amount: u128) -> Result<Self, InvalidDenom> {
        if !is_valid_denom(&denom) {
            return Err(InvalidDenom);
        }
        Ok(Coin { denom, amount })
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

fn is_valid_denom(denom: &[u8]) -> bool {
    if !(DENOM_MIN_LEN..=DENOM_MAX_LEN).contains(&denom.len()) {
        return false;
    }
    denom[0].is_ascii_alphabetic()
        && denom[1..]
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'/' | b':' | b'.' | b'_' | b'-'))
}

/// A decoded request to issue `amount` of `denom` to `recipient`.
///
/// `recipient` is still the address text submitted by the caller; it is only
/// parsed once the authority has been checked.
#[derive(Clone, PartialEq, Eq, RuntimeDebug)]
pub struct MintRequest<AccountId> {
    pub authority: AccountId,
    pub recipient: Vec<u8>,
    pub amount: u128,
    pub denom: Vec<u8>,
}

/// Record of a completed issuance, as appended to the event log.
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo)]
pub struct MintEvent {
    pub minter: Vec<u8>,
    pub recipient: Vec<u8>,
    pub amount: u128,
    pub denom: Vec<u8>,
}

impl MintEvent {
    pub const EVENT_TYPE: &'static str = "token_minted";

    /// Ordered `(key, value)` pairs; `amount` is rendered in decimal.
    pub fn attributes(&self) -> Vec<(&'static str, Vec<u8>)> {
        vec![
            ("minter", self.minter.clone()),
            ("recipient", self.recipient.clone()),
            ("amount", self.amount.to_string().into_bytes()),
            ("denom", self.denom.clone()),
        ]
    }
}

/// Progress of a single mint. Any stage between `Authorizing` and
/// `Transferring` may abort the whole operation.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum MintStage {
    Received,
    Authorizing,
    Validating,
    Minting,
    Transferring,
    Emitting,
    Completed,
}
