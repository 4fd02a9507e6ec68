use std::sync::Arc;

use crate::raven_layer::network::params::{get_chain_params, ChainParams};

#[derive(Debug, Copy, Clone, PartialEq, Hash, Serialize, Ord, PartialOrd, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
    Regtest,
}

impl Network {
    pub fn params(self) -> Arc<ChainParams> {
        match self {
            Network::Mainnet => get_chain_params("main"),
            Network::Testnet => get_chain_params("test"),
            Network::Regtest => get_chain_params("regtest"),
        }
    }

    pub fn magic(self) -> u32 {
        self.params().magic
    }

    pub fn is_regtest(self) -> bool {
        self == Network::Regtest
    }

    pub fn names() -> Vec<String> {
        vec![
            "main".to_string(),
            "test".to_string(),
            "regtest".to_string(),
        ]
    }
}

impl From<&str> for Network {
    fn from(network_name: &str) -> Self {
        match network_name {
            "main" => Network::Mainnet,
            "test" => Network::Testnet,
            "regtest" => Network::Regtest,
            // Debatable: mirrors the registry's fallback, an unknown selector
            // is treated as mainnet rather than rejected.
            _ => Network::Mainnet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_mapping() {
        assert_eq!(Network::from("main"), Network::Mainnet);
        assert_eq!(Network::from("test"), Network::Testnet);
        assert_eq!(Network::from("regtest"), Network::Regtest);
        assert_eq!(Network::from("florp"), Network::Mainnet);
    }

    #[test]
    fn magic_comes_from_the_registry() {
        assert_eq!(Network::Mainnet.magic(), 0xdbb6_c0fb);
        assert_eq!(Network::Testnet.magic(), 0xf1c8_d2fd);
        assert_eq!(Network::Regtest.magic(), 0xdab5_bffa);
        assert!(Network::Regtest.is_regtest());
    }
}
