//! Built-in indicator implementations provided by the crate.

pub mod ema;
pub mod macd;
pub mod stochastic;

pub use ema::Ema;
pub use macd::{Macd, MacdOutput};
pub use stochastic::{Stochastic, StochasticOutput};
