// Supported PRBS polynomials: x^n + x^m + 1, taps counted from the LSB

use super::error::InvalidArgument;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum PrbsOrder {
    /// x^7 + x^6 + 1
    #[default]
    Prbs7 = 7,
    /// x^9 + x^5 + 1
    Prbs9 = 9,
    /// x^11 + x^9 + 1
    Prbs11 = 11,
    /// x^15 + x^14 + 1
    Prbs15 = 15,
    /// x^23 + x^18 + 1
    Prbs23 = 23,
    /// x^31 + x^28 + 1
    Prbs31 = 31,
}

impl PrbsOrder {
    pub const ALL: [PrbsOrder; 6] = [
        PrbsOrder::Prbs7,
        PrbsOrder::Prbs9,
        PrbsOrder::Prbs11,
        PrbsOrder::Prbs15,
        PrbsOrder::Prbs23,
        PrbsOrder::Prbs31,
    ];

    /// Register width in bits
    pub const fn degree(self) -> u32 {
        self as u32
    }

    /// Feedback tap positions (1-indexed from the LSB)
    pub const fn taps(self) -> (u32, u32) {
        match self {
            PrbsOrder::Prbs7 => (7, 6),
            PrbsOrder::Prbs9 => (9, 5),
            PrbsOrder::Prbs11 => (11, 9),
            PrbsOrder::Prbs15 => (15, 14),
            PrbsOrder::Prbs23 => (23, 18),
            PrbsOrder::Prbs31 => (31, 28),
        }
    }

    /// All-ones register value, also the largest valid seed
    pub const fn mask(self) -> u32 {
        (1u32 << self.degree()) - 1
    }

    /// Sequence length before repetition: 2^n - 1
    pub const fn period(self) -> u64 {
        (1u64 << self.degree()) - 1
    }

    pub fn from_degree(degree: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|order| order.degree() == degree)
    }
}

impl fmt::Display for PrbsOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PRBS{}", self.degree())
    }
}

impl From<PrbsOrder> for u32 {
    fn from(order: PrbsOrder) -> Self {
        order.degree()
    }
}

impl TryFrom<u32> for PrbsOrder {
    type Error = InvalidArgument;

    fn try_from(degree: u32) -> Result<Self, Self::Error> {
        PrbsOrder::from_degree(degree)
            .ok_or_else(|| InvalidArgument::UnsupportedOrder(degree.to_string()))
    }
}

/// Accepts `7`, `prbs7` and `PRBS7`
impl FromStr for PrbsOrder {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = match trimmed.get(..4) {
            Some(prefix) if prefix.eq_ignore_ascii_case("prbs") => &trimmed[4..],
            _ => trimmed,
        };

        digits
            .parse::<u32>()
            .ok()
            .and_then(PrbsOrder::from_degree)
            .ok_or_else(|| InvalidArgument::UnsupportedOrder(s.to_string()))
    }
}
