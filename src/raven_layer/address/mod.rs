// Ravencoin address handling.
//
// The chain runs a dual address standard: its own base58 prefixes next to the
// legacy Bitcoin ones. Decoding therefore scans an ordered list of candidate
// parameter tables, first match wins; the two standards map to the same
// script semantics and are never conflated.

use std::sync::Arc;

use bitcoin::hashes::Hash;
use bitcoin::util::base58;
use bitcoin::{PubkeyHash, Script, ScriptHash};

use crate::errors::*;
use crate::raven_layer::blockdata::script::{match_template, PayTemplate};
use crate::raven_layer::network::params::ChainParams;

/// Length of a base58check payload: one version byte plus a hash160.
const PAYLOAD_LEN: usize = 21;

/// Decodes a base58check address into its standard locking script, trying
/// each candidate table in order. Fails with `InvalidAddress` when the
/// checksum is bad or the version byte matches no table.
pub fn address_to_script(address: &str, tables: &[Arc<ChainParams>]) -> Result<Script> {
    let payload = base58::from_check(address)
        .chain_err(|| ErrorKind::InvalidAddress(address.to_string()))?;
    if payload.len() != PAYLOAD_LEN {
        bail!(ErrorKind::InvalidAddress(address.to_string()));
    }
    let (version, hash) = (payload[0], &payload[1..]);
    for params in tables {
        if version == params.pubkey_hash_prefix {
            let hash = PubkeyHash::from_slice(hash)
                .chain_err(|| ErrorKind::InvalidAddress(address.to_string()))?;
            return Ok(Script::new_p2pkh(&hash));
        }
        if version == params.script_hash_prefix {
            let hash = ScriptHash::from_slice(hash)
                .chain_err(|| ErrorKind::InvalidAddress(address.to_string()))?;
            return Ok(Script::new_p2sh(&hash));
        }
    }
    Err(ErrorKind::InvalidAddress(address.to_string()).into())
}

/// Derives the addresses encoded by a standard locking script, under the
/// given (native) parameter table. Non-standard scripts yield an empty
/// vector; this never fails.
pub fn script_to_addresses(script: &Script, params: &ChainParams) -> Vec<String> {
    let (version, hash) = match match_template(script) {
        Some(PayTemplate::PubkeyHash(hash)) => (params.pubkey_hash_prefix, hash),
        Some(PayTemplate::ScriptHash(hash)) => (params.script_hash_prefix, hash),
        None => return Vec::new(),
    };
    let mut payload = [0u8; PAYLOAD_LEN];
    payload[0] = version;
    payload[1..].copy_from_slice(&hash);
    vec![base58::check_encode_slice(&payload)]
}
