//! One-shot pipeline: indicator pass followed by signal evaluation.

use stokast_core::{Bar, EnrichedBar, IndicatorSet, Signal};
use stokast_indicators::{Ema, Indicator, Macd, Stochastic};
use tracing::{debug, info};

use crate::{evaluator, CrossoverConfig, StrategyError, StrategyResult};

/// Runs the indicator pass and the signal evaluator over `bars`.
///
/// The result holds exactly one enriched bar per input bar, in input order;
/// the pipeline never reorders, filters, or trims. It fails before any
/// computation if the configuration is malformed or the series is empty.
pub fn run(bars: &[Bar], config: &CrossoverConfig) -> StrategyResult<Vec<EnrichedBar>> {
    config.validate()?;
    if bars.is_empty() {
        return Err(StrategyError::EmptySeries);
    }

    let mut enriched = enrich(bars, config)?;
    debug!(bars = enriched.len(), "indicator pass complete");

    // The first bar has no predecessor and keeps Signal::None.
    for i in 1..enriched.len() {
        let signal = evaluator::evaluate(config, &enriched[i - 1], &enriched[i]);
        enriched[i].signal = signal;
    }

    let buys = enriched.iter().filter(|b| b.signal == Signal::Buy).count();
    let sells = enriched.iter().filter(|b| b.signal == Signal::Sell).count();
    info!(bars = enriched.len(), buys, sells, "pipeline complete");

    Ok(enriched)
}

/// Computes the indicator columns for every bar in a single sequential sweep.
fn enrich(bars: &[Bar], config: &CrossoverConfig) -> StrategyResult<Vec<EnrichedBar>> {
    let mut ema = Ema::new(config.ema_period)?;
    let mut stochastic = Stochastic::new(config.k_period, config.d_period)?;
    let mut macd = if config.use_macd_filter {
        Some(Macd::new(
            config.macd_fast,
            config.macd_slow,
            config.macd_signal_period,
        )?)
    } else {
        None
    };

    Ok(bars
        .iter()
        .map(|bar| {
            let ema_value = ema.next(bar.close);
            let stoch = stochastic.next(*bar);
            let macd_value = macd.as_mut().and_then(|m| m.next(bar.close));
            EnrichedBar {
                bar: *bar,
                indicators: IndicatorSet {
                    ema: ema_value,
                    stoch_k: stoch.map(|s| s.k),
                    stoch_d: stoch.and_then(|s| s.d),
                    macd: macd_value.map(|m| m.macd),
                    macd_signal: macd_value.map(|m| m.signal),
                },
                signal: Signal::None,
            }
        })
        .collect())
}
