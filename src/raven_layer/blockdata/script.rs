// Standard locking-script templates the indexer derives addresses from.

use bitcoin::Script;

/// A standard payment template together with its 20-byte hash payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayTemplate {
    PubkeyHash([u8; 20]),
    ScriptHash([u8; 20]),
}

/// Matches `script` against the standard P2PKH/P2SH templates. Anything else
/// (OP_RETURN, bare multisig, asset scripts, ...) yields `None`.
pub fn match_template(script: &Script) -> Option<PayTemplate> {
    let bytes = script.as_bytes();
    if script.is_p2pkh() && bytes.len() == 25 {
        // OP_DUP OP_HASH160 <20> OP_EQUALVERIFY OP_CHECKSIG
        let mut hash = [0u8; 20];
        hash.copy_from_slice(&bytes[3..23]);
        Some(PayTemplate::PubkeyHash(hash))
    } else if script.is_p2sh() && bytes.len() == 23 {
        // OP_HASH160 <20> OP_EQUAL
        let mut hash = [0u8; 20];
        hash.copy_from_slice(&bytes[2..22]);
        Some(PayTemplate::ScriptHash(hash))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_p2pkh() {
        let script = Script::from(
            hex::decode("76a91410a8805f1a6af1a5927088544b0b6ec7d6f0ab8b88ac").unwrap(),
        );
        match match_template(&script) {
            Some(PayTemplate::PubkeyHash(hash)) => {
                assert_eq!(hex::encode(hash), "10a8805f1a6af1a5927088544b0b6ec7d6f0ab8b")
            }
            other => panic!("unexpected template: {:?}", other),
        }
    }

    #[test]
    fn matches_p2sh() {
        let script = Script::from(
            hex::decode("a9148f55563b9a19f321c211e9b9f38cdf686ea0784587").unwrap(),
        );
        match match_template(&script) {
            Some(PayTemplate::ScriptHash(hash)) => {
                assert_eq!(hex::encode(hash), "8f55563b9a19f321c211e9b9f38cdf686ea07845")
            }
            other => panic!("unexpected template: {:?}", other),
        }
    }

    #[test]
    fn rejects_non_standard() {
        // OP_RETURN with a small payload
        let script = Script::from(hex::decode("6a0401020304").unwrap());
        assert_eq!(match_template(&script), None);
        assert_eq!(match_template(&Script::new()), None);
    }
}
