error_chain! {
    types {
        Error, ErrorKind, ResultExt, Result;
    }

    errors {
        InvalidAddress(addr: String) {
            description("address does not decode under any known prefix table")
            display("invalid address: {}", addr)
        }

        MalformedRecord(msg: String) {
            description("packed transaction record is truncated or carries trailing bytes")
            display("malformed packed record: {}", msg)
        }

        MalformedHeader(msg: String) {
            description("block header is truncated")
            display("malformed block header: {}", msg)
        }

        MalformedAuxPow(msg: String) {
            description("auxpow segment is flagged but cannot be parsed")
            display("malformed auxpow segment: {}", msg)
        }

        MalformedTransactionList(msg: String) {
            description("block transaction list is inconsistent with the raw length")
            display("malformed transaction list: {}", msg)
        }

        ConfigurationConflict(network: String) {
            description("network registered twice with different chain parameters")
            display("conflicting chain parameters for network {}", network)
        }
    }
}
