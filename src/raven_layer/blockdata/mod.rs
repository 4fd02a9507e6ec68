pub mod block;
pub mod script;
pub mod transaction;
pub mod units;
