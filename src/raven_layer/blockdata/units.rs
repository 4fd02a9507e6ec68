/// Output value in satoshis. The wire field is 64-bit, so this is lossless
/// for every value the chain can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(pub u64);

impl Amount {
    pub fn as_sat(&self) -> u64 {
        self.0
    }

    pub fn from_sat(satoshis: u64) -> Self {
        Amount(satoshis)
    }
}

impl std::ops::Add for Amount {
    type Output = Amount;

    fn add(self, other: Amount) -> Amount {
        Amount(self.0 + other.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount(0), |acc, val| acc + val)
    }
}

impl std::iter::Sum<Amount> for u64 {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> u64 {
        iter.map(|v| v.0).sum()
    }
}

impl From<u64> for Amount {
    fn from(satoshis: u64) -> Self {
        Amount(satoshis)
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> u64 {
        amount.0
    }
}
