use std::io;

use bitcoin::{
    consensus::{Decodable, Encodable},
    util::hash::bitcoin_merkle_root,
    Transaction, TxMerkleNode, VarInt,
};

use crate::raven_layer::consensus::encode::{Error, MAX_VEC_SIZE};

pub type BlockHeader = bitcoin::BlockHeader;
pub type BlockHash = bitcoin::BlockHash;

/// Version bit signalling that an auxpow segment follows the fixed header
/// fields. Merged-mining side chains set it on every merge-mined block.
pub const VERSION_AUXPOW: i32 = 1 << 8;

/// One level of a parent-chain merkle proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleBranch {
    pub hashes: Vec<TxMerkleNode>,
    pub side_mask: i32,
}

/// Auxiliary proof of work: the parent-chain coinbase that commits to this
/// chain's block, plus the proofs tying it to the parent header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxPow {
    pub coinbase_tx: Transaction,
    pub parent_hash: BlockHash,
    pub coinbase_branch: MerkleBranch,
    pub blockchain_branch: MerkleBranch,
    pub parent_header: BlockHeader,
}

/// Wire-level block: the standard header, the optional auxpow segment, and
/// the transaction list. Presence of the segment is derived from the header
/// version, never stored separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    pub aux_pow: Option<AuxPow>,
    pub txdata: Vec<Transaction>,
}

impl Block {
    /// Returns the block hash. Auxpow bytes are not part of it; only the
    /// 80-byte header is hashed.
    pub fn block_hash(&self) -> BlockHash {
        self.header.block_hash()
    }

    pub fn has_aux_pow(&self) -> bool {
        self.header.version & VERSION_AUXPOW != 0
    }

    /// Computes the transaction merkle root.
    pub fn compute_merkle_root(&self) -> Option<TxMerkleNode> {
        let hashes = self.txdata.iter().map(|obj| obj.txid().as_hash());
        bitcoin_merkle_root(hashes).map(|h| h.into())
    }

    /// Total serialized size, including the auxpow segment when present.
    pub fn size(&self) -> usize {
        let aux_size: usize = self
            .aux_pow
            .as_ref()
            .map_or(0, |aux| crate::raven_layer::consensus::encode::serialize(aux).len());
        let txs_size: usize = self.txdata.iter().map(|tx| tx.size()).sum();
        80 + aux_size + VarInt(self.txdata.len() as u64).len() + txs_size
    }
}

impl Decodable for MerkleBranch {
    fn consensus_decode<D: io::Read>(mut d: D) -> Result<Self, Error> {
        let len = VarInt::consensus_decode(&mut d)?.0 as usize;
        if len > MAX_VEC_SIZE / 32 {
            return Err(Error::ParseFailed("merkle branch longer than a block"));
        }
        let mut hashes = Vec::with_capacity(len);
        for _ in 0..len {
            hashes.push(TxMerkleNode::consensus_decode(&mut d)?);
        }
        let side_mask = i32::consensus_decode(&mut d)?;
        Ok(MerkleBranch { hashes, side_mask })
    }
}

impl Encodable for MerkleBranch {
    fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, io::Error> {
        let mut len = VarInt(self.hashes.len() as u64).consensus_encode(&mut s)?;
        for hash in &self.hashes {
            len += hash.consensus_encode(&mut s)?;
        }
        len += self.side_mask.consensus_encode(&mut s)?;
        Ok(len)
    }
}

impl Decodable for AuxPow {
    fn consensus_decode<D: io::Read>(mut d: D) -> Result<Self, Error> {
        Ok(AuxPow {
            coinbase_tx: Transaction::consensus_decode(&mut d)?,
            parent_hash: BlockHash::consensus_decode(&mut d)?,
            coinbase_branch: MerkleBranch::consensus_decode(&mut d)?,
            blockchain_branch: MerkleBranch::consensus_decode(&mut d)?,
            parent_header: BlockHeader::consensus_decode(&mut d)?,
        })
    }
}

impl Encodable for AuxPow {
    fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.coinbase_tx.consensus_encode(&mut s)?;
        len += self.parent_hash.consensus_encode(&mut s)?;
        len += self.coinbase_branch.consensus_encode(&mut s)?;
        len += self.blockchain_branch.consensus_encode(&mut s)?;
        len += self.parent_header.consensus_encode(&mut s)?;
        Ok(len)
    }
}

impl Decodable for Block {
    fn consensus_decode<D: io::Read>(d: D) -> Result<Self, Error> {
        let mut d = d.take(MAX_VEC_SIZE as u64);
        let header = BlockHeader::consensus_decode(&mut d)?;
        let aux_pow = if header.version & VERSION_AUXPOW != 0 {
            Some(AuxPow::consensus_decode(&mut d)?)
        } else {
            None
        };
        let txdata_len = VarInt::consensus_decode(&mut d)?.0 as usize;
        if txdata_len > MAX_VEC_SIZE / 10 {
            return Err(Error::ParseFailed("transaction count exceeds block limit"));
        }
        let mut txdata = Vec::with_capacity(txdata_len);
        for _ in 0..txdata_len {
            txdata.push(Transaction::consensus_decode(&mut d)?);
        }
        Ok(Block {
            header,
            aux_pow,
            txdata,
        })
    }
}

impl Encodable for Block {
    fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.header.consensus_encode(&mut s)?;
        if let Some(aux_pow) = &self.aux_pow {
            len += aux_pow.consensus_encode(&mut s)?;
        }
        len += VarInt(self.txdata.len() as u64).consensus_encode(&mut s)?;
        for tx in &self.txdata {
            len += tx.consensus_encode(&mut s)?;
        }
        Ok(len)
    }
}
