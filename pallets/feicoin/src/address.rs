//! Account identifiers as text.
//!
//! Recipients arrive as address strings and are only turned into account ids
//! here. Anything that does not round-trip through the configured codec is
//! rejected.

use blake2::{Blake2b512, Digest};
use core::marker::PhantomData;
use frame_support::traits::Get;
use sp_std::{prelude::*, vec};

/// Parses and renders account identifiers.
pub trait AddressCodec<AccountId> {
    /// `None` for any malformed input.
    fn decode(address: &[u8]) -> Option<AccountId>;

    fn encode(account: &AccountId) -> Vec<u8>;
}

const CHECKSUM_PREIMAGE_PREFIX: &[u8] = b"SS58PRE";
const CHECKSUM_LEN: usize = 2;
const ACCOUNT_LEN: usize = 32;

/// SS58 text for 32-byte account ids on the network `Prefix`.
///
/// Decoding is strict: an address minted for another network prefix is
/// rejected even when its checksum is valid.
pub struct Ss58Address<Prefix>(PhantomData<Prefix>);

impl<AccountId, Prefix> AddressCodec<AccountId> for Ss58Address<Prefix>
where
    AccountId: AsRef<[u8]> + From<[u8; ACCOUNT_LEN]>,
    Prefix: Get<u16>,
{
    fn decode(address: &[u8]) -> Option<AccountId> {
        let text = core::str::from_utf8(address).ok()?;
        let data = bs58::decode(text).into_vec().ok()?;

        let (network, prefix_len) = decode_network(&data)?;
        if network != Prefix::get() {
            return None;
        }
        if data.len() != prefix_len + ACCOUNT_LEN + CHECKSUM_LEN {
            return None;
        }

        let body_len = prefix_len + ACCOUNT_LEN;
        let hash = checksum(&data[..body_len]);
        if data[body_len..] != hash[..] {
            return None;
        }

        let mut account = [0u8; ACCOUNT_LEN];
        account.copy_from_slice(&data[prefix_len..body_len]);
        Some(account.into())
    }

    fn encode(account: &AccountId) -> Vec<u8> {
        let mut data = encode_network(Prefix::get());
        data.extend_from_slice(account.as_ref());
        let hash = checksum(&data);
        data.extend_from_slice(&hash);
        bs58::encode(data).into_string().into_bytes()
    }
}

fn checksum(body: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Blake2b512::new();
    hasher.update(CHECKSUM_PREIMAGE_PREFIX);
    hasher.update(body);
    let digest = hasher.finalize();
    [digest[0], digest[1]]
}

/// Simple prefixes (< 64) take one byte, full prefixes (< 16384) take two.
fn encode_network(network: u16) -> Vec<u8> {
    let network = network & 0b0011_1111_1111_1111;
    if network < 64 {
        vec![network as u8]
    } else {
        let first = ((network & 0b0000_0000_1111_1100) as u8 >> 2) | 0b0100_0000;
        let second = ((network >> 8) as u8) | (((network & 0b0000_0000_0000_0011) as u8) << 6);
        vec![first, second]
    }
}

fn decode_network(data: &[u8]) -> Option<(u16, usize)> {
    match *data.first()? {
        first @ 0..=63 => Some((first as u16, 1)),
        first @ 64..=127 => {
            let second = *data.get(1)?;
            let lower = (first << 2) | (second >> 6);
            let upper = second & 0b0011_1111;
            Some((lower as u16 | ((upper as u16) << 8), 2))
        }
        _ => None,
    }
}
