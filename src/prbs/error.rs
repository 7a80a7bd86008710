use super::order::PrbsOrder;

/// Rejected construction input.
///
/// Every failure in the generator happens before a register exists; once a
/// `PrbsGenerator` is built, emitting bits cannot fail.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InvalidArgument {
    #[error("InvalidArgument: seed must be an integer, got {0}")]
    SeedNotInteger(String),

    #[error("InvalidArgument: seed must be positive, got {0}")]
    SeedNotPositive(String),

    #[error(
        "InvalidArgument: seed {seed} exceeds register width for {order} (max {max:#x})"
    )]
    SeedOutOfRange {
        order: PrbsOrder,
        seed: String,
        max: u32,
    },

    #[error("InvalidArgument: unsupported PRBS order {0}, expected one of 7, 9, 11, 15, 23, 31")]
    UnsupportedOrder(String),

    #[error("InvalidArgument: {name} must be {expected}, got {value}")]
    Parameter {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl InvalidArgument {
    /// True for the three seed checks (type, sign, range).
    pub fn is_seed_error(&self) -> bool {
        matches!(
            self,
            InvalidArgument::SeedNotInteger(_)
                | InvalidArgument::SeedNotPositive(_)
                | InvalidArgument::SeedOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failed_constraint() {
        let e = InvalidArgument::SeedNotInteger("1.5".into());
        assert!(e.to_string().contains("must be an integer"));

        let e = InvalidArgument::SeedNotPositive("0".into());
        assert!(e.to_string().contains("must be positive"));

        let e = InvalidArgument::SeedOutOfRange {
            order: PrbsOrder::Prbs7,
            seed: "128".into(),
            max: 0x7F,
        };
        let msg = e.to_string();
        assert!(msg.contains("exceeds register width"));
        assert!(msg.contains("PRBS7"));
        assert!(msg.contains("0x7f"));
    }

    #[test]
    fn test_seed_error_classification() {
        assert!(InvalidArgument::SeedNotPositive("-1".into()).is_seed_error());
        assert!(!InvalidArgument::UnsupportedOrder("8".into()).is_seed_error());
    }
}
