use bitcoin::{Script, Transaction, Txid};

use crate::raven_layer::blockdata::units::Amount;

/// Decoded transaction as the indexing layer consumes it: wire fields plus
/// the raw hex, the txid, and per-output derived addresses. Values are owned
/// by the caller and never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tx {
    pub txid: Txid,
    pub hex: String,
    pub version: i32,
    pub lock_time: u32,
    pub vin: Vec<Vin>,
    pub vout: Vec<Vout>,
    /// Timestamp of the containing block; zero for unconfirmed transactions.
    pub blocktime: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vin {
    /// Referenced outpoint, in display (reversed) order.
    pub txid: Txid,
    pub vout: u32,
    pub script_sig: Script,
    pub sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vout {
    pub value: Amount,
    pub n: u32,
    pub script_pubkey: Script,
    /// Zero or more addresses derived from the locking script; empty for
    /// non-standard templates.
    pub addresses: Vec<String>,
}

impl Tx {
    /// Builds the view from a wire transaction and its exact raw bytes.
    /// `derive_addresses` is consulted once per output.
    pub fn from_wire<F>(tx: &Transaction, raw: &[u8], blocktime: i64, derive_addresses: F) -> Tx
    where
        F: Fn(&Script) -> Vec<String>,
    {
        let vin = tx
            .input
            .iter()
            .map(|input| Vin {
                txid: input.previous_output.txid,
                vout: input.previous_output.vout,
                script_sig: input.script_sig.clone(),
                sequence: input.sequence,
            })
            .collect();
        let vout = tx
            .output
            .iter()
            .enumerate()
            .map(|(n, output)| Vout {
                value: Amount::from_sat(output.value),
                n: n as u32,
                script_pubkey: output.script_pubkey.clone(),
                addresses: derive_addresses(&output.script_pubkey),
            })
            .collect();
        Tx {
            txid: tx.txid(),
            hex: hex::encode(raw),
            version: tx.version,
            lock_time: tx.lock_time,
            vin,
            vout,
            blocktime,
        }
    }
}
