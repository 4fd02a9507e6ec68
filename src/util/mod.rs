pub mod vlq;

pub type Bytes = Vec<u8>;
