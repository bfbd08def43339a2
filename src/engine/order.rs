use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

/// How the questions of a bank are presented within one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrderMode {
    /// Bank order.
    #[default]
    Sequential,
    /// Uniformly shuffled.
    Random,
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderMode::Sequential => write!(f, "sequential"),
            OrderMode::Random => write!(f, "random"),
        }
    }
}

/// Build the working order for a bank of `len` questions.
///
/// The result is always a permutation of `0..len`. For [`OrderMode::Random`]
/// the identity is copied and then shuffled in place (Fisher–Yates), so the
/// bank itself is never reordered.
pub fn build_order<R: Rng + ?Sized>(len: usize, mode: OrderMode, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    if mode == OrderMode::Random {
        order.shuffle(rng);
    }
    order
}
