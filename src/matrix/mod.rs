//! Fraction-of-common-contacts matrix: computation and streaming output.

pub mod fcc;
pub mod writer;

pub use self::fcc::{fcc, FccMatrix, PairIter};
pub use self::writer::{write_matrix, MatrixWriter};
