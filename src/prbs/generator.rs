use super::error::InvalidArgument;
use super::order::PrbsOrder;
use super::seed::{seed_from_text, seed_from_value, validate_seed};
use tracing::debug;

/// Fibonacci LFSR producing a PRBS bit stream.
///
/// The register holds exactly `order.degree()` bits and is never zero: every
/// seed is checked on construction, and with a primitive tap polynomial the
/// recurrence walks all `2^n - 1` non-zero states before repeating.
///
/// Each step XORs the two tap bits, shifts the result in at the LSB and emits
/// that same feedback bit.
#[derive(Debug, Clone)]
pub struct PrbsGenerator {
    order: PrbsOrder,
    taps: (u32, u32),
    mask: u32,
    seed: u32,
    state: u32,
}

impl PrbsGenerator {
    /// Build a generator for `order`.
    ///
    /// `None` starts from the all-ones register (`2^n - 1`). A seed must lie
    /// in `1..=2^n - 1`; anything else is rejected, never truncated.
    pub fn new(order: PrbsOrder, seed: Option<i64>) -> Result<Self, InvalidArgument> {
        let state = match seed {
            Some(seed) => validate_seed(order, seed)?,
            None => order.mask(),
        };
        Ok(Self::from_state(order, state))
    }

    /// Generator starting from the all-ones register.
    pub fn with_default_seed(order: PrbsOrder) -> Self {
        Self::from_state(order, order.mask())
    }

    /// Build from a textual seed such as `"0x7F"` or `"127"`.
    pub fn from_seed_text(order: PrbsOrder, seed: &str) -> Result<Self, InvalidArgument> {
        let state = seed_from_text(order, seed)?;
        Ok(Self::from_state(order, state))
    }

    /// Build from an optional JSON seed; `None` and `null` mean the default.
    pub fn from_seed_value(
        order: PrbsOrder,
        seed: Option<&serde_json::Value>,
    ) -> Result<Self, InvalidArgument> {
        let state = match seed {
            None | Some(serde_json::Value::Null) => order.mask(),
            Some(value) => seed_from_value(order, value)?,
        };
        Ok(Self::from_state(order, state))
    }

    fn from_state(order: PrbsOrder, state: u32) -> Self {
        debug!(
            "PrbsGenerator: {} taps={:?} seed={:#x}",
            order,
            order.taps(),
            state
        );
        Self {
            order,
            taps: order.taps(),
            mask: order.mask(),
            seed: state,
            state,
        }
    }

    pub fn order(&self) -> PrbsOrder {
        self.order
    }

    pub fn taps(&self) -> (u32, u32) {
        self.taps
    }

    /// Register value at construction; unaffected by emitted bits.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Advance the register one step and return the feedback bit (0 or 1).
    #[inline]
    pub fn next_bit(&mut self) -> u8 {
        let (t1, t2) = self.taps;
        let b1 = (self.state >> (t1 - 1)) & 1;
        let b2 = (self.state >> (t2 - 1)) & 1;
        let feedback = b1 ^ b2;

        self.state = ((self.state << 1) | feedback) & self.mask;
        debug_assert_ne!(self.state, 0, "LFSR reached the all-zero state");

        feedback as u8
    }

    /// Emit `count` bits in order. `0` yields an empty vector.
    pub fn generate_bits(&mut self, count: usize) -> Vec<u8> {
        let mut bits = vec![0u8; count];
        self.fill_bits(&mut bits);
        bits
    }

    /// Overwrite `out` with the next `out.len()` bits.
    pub fn fill_bits(&mut self, out: &mut [u8]) {
        for bit in out.iter_mut() {
            *bit = self.next_bit();
        }
    }
}

/// Endless bit stream; `take(n)` matches `generate_bits(n)`.
impl Iterator for PrbsGenerator {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_bit())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PRBS7_GOLDEN: [u8; 32] = [
        0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 1, 0, 0, //
        0, 0, 1, 0, 1, 0, 0, 0, 1, 1, 1, 1, 0, 0, 1, 0,
    ];

    fn state_period(order: PrbsOrder, seed: Option<i64>) -> u64 {
        let mut prbs = PrbsGenerator::new(order, seed).unwrap();
        let start = prbs.state;
        let mut steps = 0u64;
        loop {
            prbs.next_bit();
            steps += 1;
            assert_ne!(prbs.state, 0);
            if prbs.state == start {
                return steps;
            }
        }
    }

    #[test]
    fn test_default_seed_is_all_ones() {
        for order in PrbsOrder::ALL {
            let prbs = PrbsGenerator::new(order, None).unwrap();
            assert_eq!(prbs.state, order.mask());
            assert_eq!(prbs.seed(), order.mask());
            assert_eq!(prbs.taps(), order.taps());
            assert_eq!(prbs.order(), order);
        }
    }

    #[test]
    fn test_prbs7_golden_vector() {
        let mut prbs = PrbsGenerator::new(PrbsOrder::Prbs7, Some(0x7F)).unwrap();
        assert_eq!(prbs.generate_bits(PRBS7_GOLDEN.len()), PRBS7_GOLDEN);
    }

    #[test]
    fn test_prbs7_register_trace() {
        // 0x7F: taps 7 and 6 are both set, feedback 0
        let mut prbs = PrbsGenerator::with_default_seed(PrbsOrder::Prbs7);
        assert_eq!(prbs.next_bit(), 0);
        assert_eq!(prbs.state, 0x7E);
        assert_eq!(prbs.next_bit(), 0);
        assert_eq!(prbs.state, 0x7C);
    }

    #[test]
    fn test_prbs9_golden_vector() {
        let mut prbs = PrbsGenerator::with_default_seed(PrbsOrder::Prbs9);
        assert_eq!(
            prbs.generate_bits(16),
            [0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0]
        );
    }

    #[test]
    fn test_seed_one() {
        let mut prbs = PrbsGenerator::new(PrbsOrder::Prbs7, Some(1)).unwrap();
        assert_eq!(
            prbs.generate_bits(16),
            [0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 1, 0, 1, 0, 0]
        );
    }

    #[test]
    fn test_state_period_is_maximal() {
        for order in [
            PrbsOrder::Prbs7,
            PrbsOrder::Prbs9,
            PrbsOrder::Prbs11,
            PrbsOrder::Prbs15,
        ] {
            assert_eq!(state_period(order, None), order.period(), "{order}");
            assert_eq!(state_period(order, Some(1)), order.period(), "{order}");
        }
    }

    #[test]
    fn test_state_period_prbs23() {
        assert_eq!(state_period(PrbsOrder::Prbs23, None), PrbsOrder::Prbs23.period());
    }

    #[test]
    #[ignore = "walks 2^31 - 1 states"]
    fn test_state_period_prbs31() {
        assert_eq!(state_period(PrbsOrder::Prbs31, None), PrbsOrder::Prbs31.period());
    }

    #[test]
    fn test_iterator_matches_generate_bits() {
        let mut a = PrbsGenerator::with_default_seed(PrbsOrder::Prbs11);
        let b = PrbsGenerator::with_default_seed(PrbsOrder::Prbs11);
        let from_iter: Vec<u8> = b.take(500).collect();
        assert_eq!(a.generate_bits(500), from_iter);
    }

    #[test]
    fn test_fill_bits_continues_stream() {
        let mut whole = PrbsGenerator::with_default_seed(PrbsOrder::Prbs15);
        let mut chunked = whole.clone();
        let expected = whole.generate_bits(100);

        let mut buf = [0u8; 40];
        let mut got = Vec::new();
        chunked.fill_bits(&mut buf);
        got.extend_from_slice(&buf);
        chunked.fill_bits(&mut buf);
        got.extend_from_slice(&buf);
        got.extend(chunked.generate_bits(20));
        assert_eq!(got, expected);
    }

    #[test]
    fn test_text_and_value_constructors() {
        let from_int = PrbsGenerator::new(PrbsOrder::Prbs9, Some(0x155)).unwrap();
        let from_text = PrbsGenerator::from_seed_text(PrbsOrder::Prbs9, "0x155").unwrap();
        let from_json =
            PrbsGenerator::from_seed_value(PrbsOrder::Prbs9, Some(&json!(341))).unwrap();
        assert_eq!(from_int.state, from_text.state);
        assert_eq!(from_int.state, from_json.state);

        let null = PrbsGenerator::from_seed_value(PrbsOrder::Prbs9, Some(&json!(null))).unwrap();
        assert_eq!(null.state, PrbsOrder::Prbs9.mask());

        assert!(matches!(
            PrbsGenerator::from_seed_value(PrbsOrder::Prbs9, Some(&json!(1.5))),
            Err(InvalidArgument::SeedNotInteger(_))
        ));
    }
}
