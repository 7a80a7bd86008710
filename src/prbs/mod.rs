// PRBS generation engine: LFSR polynomials, seed checks, bit emission

pub mod error;
pub mod generator;
pub mod order;
pub mod seed;

pub use error::InvalidArgument;
pub use generator::PrbsGenerator;
pub use order::PrbsOrder;
