// Ravencoin integration module
pub mod address;
pub mod blockdata;
pub mod consensus;
pub mod network;
pub mod parser;

pub use blockdata::block::{AuxPow, Block, BlockHash, BlockHeader, MerkleBranch, VERSION_AUXPOW};
pub use blockdata::script::{match_template, PayTemplate};
pub use blockdata::transaction::{Tx, Vin, Vout};
pub use blockdata::units::Amount;
pub use network::params::{address_tables, get_chain_params, register, ChainParams};
pub use parser::{ParsedBlock, RavenParser};

pub use self::consensus::encode::{deserialize, serialize};
