//! Value side of the engine: random-move balancing and exact residual correction

pub mod residual;
pub mod value;

pub use residual::correct_residual;
pub use value::{BalanceOutcome, ValueBalancer};
