#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

//! Streaming technical indicators computed on decimal arithmetic.

/// Foundational trait and error type shared by every indicator.
pub mod core;
/// Built-in indicator implementations.
pub mod indicators;

/// Re-export of the core trait and error type to make the crate easy to consume.
pub use crate::core::{Indicator, IndicatorError};
/// Re-export of the built-in indicators.
pub use crate::indicators::{Ema, Macd, MacdOutput, Stochastic, StochasticOutput};
