use std::sync::Arc;

use bitcoin::{BlockHeader, Script, Transaction, VarInt};

use crate::errors::*;
use crate::raven_layer::address;
use crate::raven_layer::blockdata::block::{AuxPow, BlockHash, VERSION_AUXPOW};
use crate::raven_layer::blockdata::transaction::Tx;
use crate::raven_layer::consensus::encode::deserialize_partial;
use crate::raven_layer::network::params::{address_tables, ChainParams};
use crate::util::{vlq, Bytes};

/// Fixed part of a packed record: the 4-byte big-endian height. The blocktime
/// VLQ that follows is 1 to [`vlq::MAX_LEN`] bytes.
const PACKED_HEIGHT_LEN: usize = 4;

/// Ravencoin codec front end. Holds the injected chain parameters and the
/// ordered address candidate tables; all operations are pure and safe to call
/// concurrently.
pub struct RavenParser {
    params: Arc<ChainParams>,
    address_tables: Vec<Arc<ChainParams>>,
}

/// A fully parsed block. `size` always equals the length of the raw input;
/// the parser never returns a partial block.
#[derive(Debug)]
pub struct ParsedBlock {
    pub header: BlockHeader,
    pub aux_pow: Option<AuxPow>,
    pub size: usize,
    pub txs: Vec<Tx>,
}

impl ParsedBlock {
    pub fn block_hash(&self) -> BlockHash {
        self.header.block_hash()
    }

    pub fn time(&self) -> i64 {
        i64::from(self.header.time)
    }
}

impl RavenParser {
    pub fn new(params: Arc<ChainParams>) -> RavenParser {
        let address_tables = address_tables(&params);
        RavenParser {
            params,
            address_tables,
        }
    }

    pub fn params(&self) -> &ChainParams {
        &self.params
    }

    pub fn address_to_script(&self, addr: &str) -> Result<Script> {
        address::address_to_script(addr, &self.address_tables)
    }

    pub fn script_to_addresses(&self, script: &Script) -> Vec<String> {
        address::script_to_addresses(script, &self.params)
    }

    fn tx_view(&self, tx: &Transaction, raw: &[u8], blocktime: i64) -> Tx {
        Tx::from_wire(tx, raw, blocktime, |script| self.script_to_addresses(script))
    }

    /// Decodes exactly one wire transaction. The blocktime is left at zero;
    /// confirmed callers get it from the containing block header.
    pub fn parse_tx(&self, raw: &[u8]) -> Result<Tx> {
        let (tx, used) = deserialize_partial::<Transaction>(raw)
            .chain_err(|| ErrorKind::MalformedRecord("transaction".to_string()))?;
        if used != raw.len() {
            bail!(ErrorKind::MalformedRecord(format!(
                "{} trailing bytes after transaction",
                raw.len() - used
            )));
        }
        Ok(self.tx_view(&tx, raw, 0))
    }

    /// Packs a transaction with its block metadata into one storage blob:
    /// height, blocktime, then the unmodified wire bytes. The metadata prefix
    /// is big-endian so records sort by height as raw keys; that deliberately
    /// diverges from the little-endian wire format and must stay as is.
    pub fn pack_tx(&self, tx: &Tx, height: u32, blocktime: i64) -> Result<Bytes> {
        let raw = hex::decode(&tx.hex)
            .chain_err(|| ErrorKind::MalformedRecord(format!("transaction hex of {}", tx.txid)))?;
        let mut packed = Vec::with_capacity(PACKED_HEIGHT_LEN + vlq::MAX_LEN + raw.len());
        packed.extend_from_slice(&height.to_be_bytes());
        vlq::push_int(&mut packed, blocktime);
        packed.extend_from_slice(&raw);
        Ok(packed)
    }

    /// Reverses [`pack_tx`]. The blocktime is folded into the returned `Tx`
    /// rather than surfaced separately; callers only index by height.
    pub fn unpack_tx(&self, buf: &[u8]) -> Result<(Tx, u32)> {
        if buf.len() <= PACKED_HEIGHT_LEN {
            bail!(ErrorKind::MalformedRecord(format!(
                "record of {} bytes",
                buf.len()
            )));
        }
        let height = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let (blocktime, vlq_len) = vlq::read_int(&buf[PACKED_HEIGHT_LEN..])
            .ok_or_else(|| Error::from(ErrorKind::MalformedRecord("unterminated blocktime".to_string())))?;
        let raw = &buf[PACKED_HEIGHT_LEN + vlq_len..];
        let (tx, used) = deserialize_partial::<Transaction>(raw)
            .chain_err(|| ErrorKind::MalformedRecord("embedded transaction".to_string()))?;
        if used != raw.len() {
            bail!(ErrorKind::MalformedRecord(format!(
                "{} trailing bytes after transaction",
                raw.len() - used
            )));
        }
        Ok((self.tx_view(&tx, raw, blocktime), height))
    }

    /// Single-pass block parse: fixed header, the auxpow segment when the
    /// header version flags one, then the declared number of transactions.
    /// The input must be consumed exactly; truncated or over-long blocks are
    /// rejected as a whole.
    pub fn parse_block(&self, raw: &[u8]) -> Result<ParsedBlock> {
        let (header, mut offset) = deserialize_partial::<BlockHeader>(raw)
            .chain_err(|| ErrorKind::MalformedHeader(format!("{} bytes", raw.len())))?;

        let aux_pow = if header.version & VERSION_AUXPOW != 0 {
            let (aux_pow, aux_len) = deserialize_partial::<AuxPow>(&raw[offset..])
                .chain_err(|| ErrorKind::MalformedAuxPow(format!("at offset {}", offset)))?;
            offset += aux_len;
            Some(aux_pow)
        } else {
            None
        };

        let (count, count_len) = deserialize_partial::<VarInt>(&raw[offset..])
            .chain_err(|| ErrorKind::MalformedTransactionList("missing count".to_string()))?;
        offset += count_len;
        let tx_count = count.0 as usize;
        if tx_count > raw.len() - offset {
            bail!(ErrorKind::MalformedTransactionList(format!(
                "{} transactions declared, {} bytes left",
                tx_count,
                raw.len() - offset
            )));
        }

        let blocktime = i64::from(header.time);
        let mut txs = Vec::with_capacity(tx_count);
        for i in 0..tx_count {
            let (tx, used) = deserialize_partial::<Transaction>(&raw[offset..]).chain_err(|| {
                ErrorKind::MalformedTransactionList(format!("transaction {} of {}", i, tx_count))
            })?;
            txs.push(self.tx_view(&tx, &raw[offset..offset + used], blocktime));
            offset += used;
        }
        if offset != raw.len() {
            bail!(ErrorKind::MalformedTransactionList(format!(
                "parsed {} of {} bytes",
                offset,
                raw.len()
            )));
        }

        Ok(ParsedBlock {
            header,
            aux_pow,
            size: raw.len(),
            txs,
        })
    }
}
