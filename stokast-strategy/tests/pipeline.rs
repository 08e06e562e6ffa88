use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use stokast_core::{Bar, Signal};
use stokast_strategy::{run, CrossoverConfig, StrategyError};

fn bar(index: usize, high: i64, low: i64, close: i64) -> Bar {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Bar {
        timestamp: base + Duration::days(index as i64),
        open: Decimal::from(close),
        high: Decimal::from(high),
        low: Decimal::from(low),
        close: Decimal::from(close),
    }
}

fn short_config() -> CrossoverConfig {
    CrossoverConfig {
        k_period: 3,
        d_period: 2,
        ema_period: 2,
        ..CrossoverConfig::default()
    }
}

/// Twenty strictly rising closes. The spike high on bar 10 widens the rolling
/// range so that %K dips deep below 20 and crosses back above %D on bar 11
/// while still inside the oversold band.
fn uptrend_with_dip() -> Vec<Bar> {
    (0..20)
        .map(|i| {
            let close = 100 + i as i64;
            let high = if i == 10 { close + 20 } else { close + 1 };
            bar(i, high, close - 1, close)
        })
        .collect()
}

/// The mirrored path: strictly falling closes with the same engineered
/// oscillator dip and cross on bar 11, but every close under the trend EMA.
fn downtrend_with_dip() -> Vec<Bar> {
    (0..20)
        .map(|i| {
            let close = 200 - i as i64;
            let high = if i == 10 { close + 20 } else { close + 1 };
            let low = if i == 11 { close - 3 } else { close - 1 };
            bar(i, high, low, close)
        })
        .collect()
}

#[test]
fn preserves_length_and_order() {
    let bars = uptrend_with_dip();
    let enriched = run(&bars, &short_config()).unwrap();
    assert_eq!(enriched.len(), bars.len());
    for (out, input) in enriched.iter().zip(&bars) {
        assert_eq!(out.bar, *input);
    }
}

#[test]
fn is_deterministic() {
    let bars = uptrend_with_dip();
    let config = short_config();
    assert_eq!(run(&bars, &config).unwrap(), run(&bars, &config).unwrap());
}

#[test]
fn first_bar_never_signals() {
    let bars = uptrend_with_dip();
    let enriched = run(&bars, &short_config()).unwrap();
    assert_eq!(enriched[0].signal, Signal::None);
}

#[test]
fn uptrend_dip_produces_a_single_buy() {
    let bars = uptrend_with_dip();
    let enriched = run(&bars, &short_config()).unwrap();

    for (i, out) in enriched.iter().enumerate() {
        let expected = if i == 11 { Signal::Buy } else { Signal::None };
        assert_eq!(out.signal, expected, "unexpected signal at bar {i}");
        // The MACD filter is off, so its columns stay undefined.
        assert_eq!(out.indicators.macd, None);
        assert_eq!(out.indicators.macd_signal, None);
    }
}

#[test]
fn trend_filter_blocks_the_same_cross_in_a_downtrend() {
    let bars = downtrend_with_dip();
    let enriched = run(&bars, &short_config()).unwrap();

    // The oscillator cross on bar 11 is genuine...
    let eleven = &enriched[11].indicators;
    let ten = &enriched[10].indicators;
    assert!(ten.stoch_k.unwrap() < ten.stoch_d.unwrap());
    assert!(eleven.stoch_k.unwrap() > eleven.stoch_d.unwrap());
    assert!(eleven.stoch_k.unwrap() <= Decimal::from(20));
    // ...but the close sits below the trend EMA, so nothing fires.
    assert!(enriched[11].bar.close < eleven.ema.unwrap());
    for (i, out) in enriched.iter().enumerate() {
        assert_eq!(out.signal, Signal::None, "unexpected signal at bar {i}");
    }
}

#[test]
fn macd_filter_confirms_the_uptrend_buy() {
    let bars = uptrend_with_dip();
    let config = CrossoverConfig {
        use_macd_filter: true,
        ..short_config()
    };
    let enriched = run(&bars, &config).unwrap();

    // Rising closes keep the MACD line above its signal line, so the filter
    // lets the crossing bar through.
    let eleven = &enriched[11].indicators;
    assert!(eleven.macd.unwrap() > eleven.macd_signal.unwrap());
    assert_eq!(enriched[11].signal, Signal::Buy);

    // Both MACD columns are populated from the first bar onward.
    assert!(enriched.iter().all(|b| b.indicators.macd.is_some()));
    assert!(enriched.iter().all(|b| b.indicators.macd_signal.is_some()));
}

#[test]
fn ema_is_defined_from_the_first_bar() {
    let bars = uptrend_with_dip();
    let enriched = run(&bars, &short_config()).unwrap();
    assert_eq!(enriched[0].indicators.ema, Some(bars[0].close));
    assert!(enriched.iter().all(|b| b.indicators.ema.is_some()));
}

#[test]
fn oscillator_warms_up_before_emitting() {
    let bars = uptrend_with_dip();
    let enriched = run(&bars, &short_config()).unwrap();
    // %K needs k_period bars, %D needs d_period %K values on top.
    assert_eq!(enriched[0].indicators.stoch_k, None);
    assert_eq!(enriched[1].indicators.stoch_k, None);
    assert!(enriched[2].indicators.stoch_k.is_some());
    assert_eq!(enriched[2].indicators.stoch_d, None);
    assert!(enriched[3].indicators.stoch_d.is_some());
}

#[test]
fn flat_series_keeps_the_oscillator_undefined() {
    let bars: Vec<Bar> = (0..10).map(|i| bar(i, 50, 50, 50)).collect();
    let enriched = run(&bars, &short_config()).unwrap();
    for out in &enriched {
        assert_eq!(out.indicators.ema, Some(Decimal::from(50)));
        assert_eq!(out.indicators.stoch_k, None);
        assert_eq!(out.indicators.stoch_d, None);
        assert_eq!(out.signal, Signal::None);
    }
}

#[test]
fn rerunning_on_stripped_output_reproduces_the_series() {
    let bars = uptrend_with_dip();
    let config = short_config();
    let first = run(&bars, &config).unwrap();
    let stripped: Vec<Bar> = first.iter().map(|out| out.bar).collect();
    let second = run(&stripped, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn rejects_empty_series_before_computing() {
    let result = run(&[], &short_config());
    assert!(matches!(result, Err(StrategyError::EmptySeries)));
}

#[test]
fn rejects_malformed_config_before_computing() {
    let bars = uptrend_with_dip();

    let zero_window = CrossoverConfig {
        ema_period: 0,
        ..CrossoverConfig::default()
    };
    assert!(matches!(
        run(&bars, &zero_window),
        Err(StrategyError::InvalidConfig(_))
    ));

    let inverted_macd = CrossoverConfig {
        use_macd_filter: true,
        macd_fast: 30,
        macd_slow: 26,
        ..CrossoverConfig::default()
    };
    assert!(matches!(
        run(&bars, &inverted_macd),
        Err(StrategyError::InvalidConfig(_))
    ));
}
