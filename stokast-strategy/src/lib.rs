//! Cross-over strategy configuration, evaluation, and the one-shot pipeline.
//!
//! The entry point is [`run`]: it validates the configuration, computes the
//! indicator columns for every bar, then evaluates the Buy/Sell cross-over
//! rules bar by bar. The whole pass is a pure function of its inputs.

use serde::{Deserialize, Serialize};
use stokast_indicators::IndicatorError;
use thiserror::Error;

pub mod evaluator;
pub mod pipeline;

pub use evaluator::evaluate;
pub use pipeline::run;

/// Result alias used throughout the crate.
pub type StrategyResult<T> = Result<T, StrategyError>;

/// Failure variants surfaced by the pipeline.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// The configuration cannot be parsed or violates a precondition.
    #[error("configuration is invalid: {0}")]
    InvalidConfig(String),
    /// The input series holds no bars; there is nothing to compute.
    #[error("input series is empty")]
    EmptySeries,
}

impl From<IndicatorError> for StrategyError {
    fn from(err: IndicatorError) -> Self {
        StrategyError::InvalidConfig(err.to_string())
    }
}

/// Parameter bundle for the indicator pass and the cross-over rules.
///
/// All window sizes must be positive, and `macd_fast < macd_slow` must hold
/// whenever the MACD filter is enabled; [`CrossoverConfig::validate`]
/// enforces both before any computation starts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CrossoverConfig {
    /// Lookback window of the stochastic %K line.
    pub k_period: usize,
    /// Smoothing window of the stochastic %D line.
    pub d_period: usize,
    /// Window of the long trend EMA.
    pub ema_period: usize,
    /// Whether signals additionally require MACD confirmation.
    pub use_macd_filter: bool,
    /// Fast EMA window of the MACD line.
    pub macd_fast: usize,
    /// Slow EMA window of the MACD line.
    pub macd_slow: usize,
    /// Window of the MACD signal line.
    pub macd_signal_period: usize,
}

impl Default for CrossoverConfig {
    fn default() -> Self {
        Self {
            k_period: 14,
            d_period: 3,
            ema_period: 200,
            use_macd_filter: false,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal_period: 9,
        }
    }
}

impl CrossoverConfig {
    /// Checks every precondition the pipeline relies on.
    ///
    /// The MACD windows only participate when the filter is enabled; with it
    /// off they are never read.
    pub fn validate(&self) -> StrategyResult<()> {
        let mut windows = vec![
            ("k_period", self.k_period),
            ("d_period", self.d_period),
            ("ema_period", self.ema_period),
        ];
        if self.use_macd_filter {
            windows.extend([
                ("macd_fast", self.macd_fast),
                ("macd_slow", self.macd_slow),
                ("macd_signal_period", self.macd_signal_period),
            ]);
        }
        for (name, value) in windows {
            if value == 0 {
                return Err(StrategyError::InvalidConfig(format!(
                    "{name} must be greater than zero"
                )));
            }
        }
        if self.use_macd_filter && self.macd_fast >= self.macd_slow {
            return Err(StrategyError::InvalidConfig(format!(
                "macd_fast ({}) must be smaller than macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        Ok(())
    }
}

impl TryFrom<toml::Value> for CrossoverConfig {
    type Error = StrategyError;

    fn try_from(value: toml::Value) -> Result<Self, Self::Error> {
        value.try_into().map_err(|err: toml::de::Error| {
            StrategyError::InvalidConfig(format!("failed to parse crossover config: {err}"))
        })
    }
}
