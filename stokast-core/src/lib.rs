//! Core domain types for the Stokast signal pipeline.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single OHLC observation.
///
/// Bars are immutable once ingested. A series is expected to be sorted
/// ascending by timestamp with no duplicates; that ordering is a caller
/// contract, the pipeline itself only ever indexes bars by position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Opening time of the observation.
    pub timestamp: DateTime<Utc>,
    /// Opening price.
    pub open: Decimal,
    /// Highest traded price.
    pub high: Decimal,
    /// Lowest traded price.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
}

/// Derived indicator values for one bar.
///
/// A field is `None` while its rolling window lacks history, or when the
/// computation is indeterminate (a flat high-low range in %K). The MACD
/// fields stay `None` for every bar unless the MACD filter was requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    /// Long trend EMA of the close.
    pub ema: Option<Decimal>,
    /// Stochastic oscillator %K line.
    pub stoch_k: Option<Decimal>,
    /// Stochastic oscillator %D line (moving average of %K).
    pub stoch_d: Option<Decimal>,
    /// MACD line (fast EMA minus slow EMA of the close).
    pub macd: Option<Decimal>,
    /// Signal line (EMA of the MACD line).
    pub macd_signal: Option<Decimal>,
}

/// Discrete trading signal attached to each bar.
///
/// Serializes as `Buy`, `Sell`, or the empty string, matching the tabular
/// output format consumed by downstream collaborators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// Oversold %K crossed above %D while the close sits above the trend EMA.
    Buy,
    /// Overbought %K crossed below %D while the close sits below the trend EMA.
    Sell,
    /// No cross-over fired, or a required indicator value was undefined.
    #[default]
    #[serde(rename = "")]
    None,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Signal::Buy => "Buy",
            Signal::Sell => "Sell",
            Signal::None => "",
        })
    }
}

/// One bar of pipeline output: the original bar plus everything derived
/// from it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnrichedBar {
    /// The unmodified input bar.
    pub bar: Bar,
    /// Indicator values aligned with this bar.
    pub indicators: IndicatorSet,
    /// Signal evaluated for this bar.
    pub signal: Signal,
}
