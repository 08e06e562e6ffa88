//! Per-bar cross-over evaluation over consecutive enriched bars.

use rust_decimal::Decimal;
use stokast_core::{EnrichedBar, Signal};

use crate::CrossoverConfig;

/// Evaluates the cross-over rules for `curr`, given its immediate predecessor.
///
/// Buy requires an uptrend (close above the trend EMA) and %K crossing above
/// %D between the two bars while inside the oversold band; Sell is the mirror
/// image on the downtrend side. The two cannot fire together because the
/// trend conditions are mutually exclusive.
///
/// Whenever a required indicator value is missing on either bar the result is
/// [`Signal::None`]; missing values are never substituted with a default
/// before comparison.
pub fn evaluate(config: &CrossoverConfig, prev: &EnrichedBar, curr: &EnrichedBar) -> Signal {
    let inputs = (
        curr.indicators.ema,
        prev.indicators.stoch_k,
        prev.indicators.stoch_d,
        curr.indicators.stoch_k,
        curr.indicators.stoch_d,
    );
    let (Some(ema), Some(k_prev), Some(d_prev), Some(k), Some(d)) = inputs else {
        return Signal::None;
    };

    let (macd_confirms_buy, macd_confirms_sell) = if config.use_macd_filter {
        match (curr.indicators.macd, curr.indicators.macd_signal) {
            (Some(line), Some(signal_line)) => (line > signal_line, line < signal_line),
            _ => return Signal::None,
        }
    } else {
        (true, true)
    };

    let close = curr.bar.close;
    let oversold = Decimal::from(20);
    let overbought = Decimal::from(80);

    if close > ema && k < oversold && k_prev < d_prev && k > d && k <= oversold && macd_confirms_buy
    {
        Signal::Buy
    } else if close < ema
        && k > overbought
        && k_prev > d_prev
        && k < d
        && k >= overbought
        && macd_confirms_sell
    {
        Signal::Sell
    } else {
        Signal::None
    }
}
