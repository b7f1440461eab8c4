//! Behavior-driven tests for the loader file boundary
//!
//! These tests verify what happens when the engine reads the JSON files the
//! loader leaves in the data directory, from disk, end to end.

use std::fs;

use inplay_core::{
    CoreError, DataPaths, EngineConfig, FundamentalsInput, PriceInput, RejectReason, SignalSet,
};
use inplay_tests::{assert_close, symbol, SignalEngine};
use tempfile::tempdir;

const PRICES: &str = r#"{
    "generated_at": "2024-01-02T22:00:00+00:00",
    "interval": "1d",
    "symbols": ["AAPL", "MSFT", "THIN", "bad key"],
    "prices": {
        "AAPL": [
            {"date": "2024-01-01", "open": 99.0, "high": 101.0, "low": 98.0, "close": 100.0, "volume": 1000000, "adjclose": 100.0},
            {"date": "2024-01-02", "open": 108.0, "high": 112.0, "low": 107.0, "close": 110.0, "volume": 2500000, "adjclose": 110.0}
        ],
        "MSFT": [
            {"date": "2024-01-03", "close": 404.0},
            {"date": "2024-01-01", "close": 400.0},
            {"date": "2024-01-02", "close": null}
        ],
        "THIN": [
            {"date": "2024-01-02", "close": 5.0}
        ],
        "bad key": []
    }
}"#;

const FUNDAMENTALS: &str = r#"{
    "generated_at": "2024-01-02T22:00:00+00:00",
    "symbols": ["AAPL", "MSFT"],
    "data": {
        "AAPL": {
            "company_profile": {"sector": "Technology", "industry": "Consumer Electronics"},
            "key_stats": {"marketCap": 3000000000000},
            "institution_ownership": [{"organization": "Vanguard", "pctHeld": 0.08}],
            "trading_snapshot": {
                "regularMarketOpen": 108.0,
                "regularMarketDayHigh": 112.0,
                "regularMarketDayLow": 107.0,
                "regularMarketPreviousClose": 100.0,
                "regularMarketVolume": 2500000,
                "averageDailyVolume10Day": 1000000
            }
        },
        "MSFT": {
            "company_profile": {"sector": "Technology"}
        }
    }
}"#;

fn seeded_data_dir() -> (tempfile::TempDir, DataPaths) {
    let temp = tempdir().expect("tempdir");
    let paths = DataPaths::under(temp.path().to_path_buf());
    fs::create_dir_all(paths.prices.parent().expect("data dir")).expect("create data dir");
    fs::write(&paths.prices, PRICES).expect("write prices");
    fs::write(&paths.fundamentals, FUNDAMENTALS).expect("write fundamentals");
    (temp, paths)
}

// =============================================================================
// File Boundary: Loading
// =============================================================================

#[test]
fn user_can_compute_signals_from_loader_files() {
    // Given: A data directory with the loader's prices and fundamentals
    let (_temp, paths) = seeded_data_dir();

    // When: Both files are loaded and the engine runs
    let prices = PriceInput::load(&paths.prices).expect("prices load");
    let fundamentals = FundamentalsInput::load(&paths.fundamentals).expect("fundamentals load");
    let run = SignalEngine::default().run(&prices.prices, &fundamentals.fundamentals);

    // Then: Symbols with two or more bars get signals, sorted by symbol
    let symbols = run
        .signals
        .symbols
        .iter()
        .map(|symbol| symbol.as_str())
        .collect::<Vec<_>>();
    assert_eq!(symbols, vec!["AAPL", "MSFT"]);

    // And: AAPL carries every snapshot signal
    let aapl = run.signals.get(&symbol("AAPL")).expect("AAPL present");
    assert_close(aapl.gap_pct.expect("gap"), 0.08);
    assert_close(aapl.volume_ratio.expect("volume ratio"), 2.5);
    assert_close(aapl.in_play_score, 8.0 + 500.0 / 108.0 + 15.0);

    // And: MSFT's missing middle close blanks its return but not the series
    let msft = run.signals.get(&symbol("MSFT")).expect("MSFT present");
    assert_eq!(msft.close_return_1d, None);
    assert_eq!(msft.gap_pct, None);
    assert_eq!(msft.in_play_score, 0.0);

    // And: The single-bar symbol is reported as skipped
    assert_eq!(run.skipped.len(), 1);
    assert_eq!(run.skipped[0].symbol.as_str(), "THIN");
}

#[test]
fn invalid_symbol_keys_are_rejected_without_failing_the_file() {
    // Given: A prices file containing a key with a space in it
    let (_temp, paths) = seeded_data_dir();

    // When: The file is loaded
    let prices = PriceInput::load(&paths.prices).expect("prices load");

    // Then: The key is set aside with its reason
    assert_eq!(prices.rejected.len(), 1);
    assert_eq!(prices.rejected[0].key, "bad key");
    assert!(matches!(prices.rejected[0].reason, RejectReason::Invalid(_)));

    // And: The rest of the file is usable
    assert_eq!(prices.prices.len(), 3);
    assert_eq!(prices.interval.as_deref(), Some("1d"));
}

#[test]
fn missing_prices_file_is_an_io_error() {
    // Given: An empty data directory
    let temp = tempdir().expect("tempdir");
    let paths = DataPaths::under(temp.path().to_path_buf());

    // When: The prices file is loaded
    let err = PriceInput::load(&paths.prices).expect_err("must fail");

    // Then: The error names the missing path
    assert!(matches!(err, CoreError::Io { .. }));
    assert!(err.to_string().contains("prices-sample.json"));
}

#[test]
fn malformed_json_is_a_snapshot_error() {
    // Given: A truncated fundamentals file
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("fundamentals.json");
    fs::write(&path, r#"{"data": {"AAPL": "#).expect("write file");

    // When: It is loaded
    let err = FundamentalsInput::load(&path).expect_err("must fail");

    // Then: It is reported as a malformed snapshot file
    assert!(matches!(err, CoreError::Snapshot(_)));
}

// =============================================================================
// File Boundary: Loader Output As Written By json.dump
// =============================================================================

/// Daily prices as `json.dump(indent=2)` writes them: pandas gaps become bare
/// `NaN`, dates carry a time component, and non-US tickers start with digits.
const DUMPED_DAILY_PRICES: &str = r#"{
  "generated_at": "2024-01-03T21:05:11.402113+00:00",
  "interval": "1d",
  "symbols": [
    "AAPL",
    "0700.HK",
    "005930.KS",
    "TSLA"
  ],
  "prices": {
    "AAPL": [
      {
        "date": "2024-01-01",
        "open": 99.0,
        "high": 101.0,
        "low": 98.0,
        "close": 100.0,
        "volume": 1000000,
        "adjclose": 99.5
      },
      {
        "date": "2024-01-02",
        "open": 101.0,
        "high": 111.0,
        "low": 100.5,
        "close": NaN,
        "volume": 1200000,
        "adjclose": NaN
      },
      {
        "date": "2024-01-03",
        "open": 108.0,
        "high": 112.0,
        "low": 107.0,
        "close": 110.0,
        "volume": 2500000,
        "adjclose": NaN
      }
    ],
    "0700.HK": [
      {
        "date": "2024-01-02 00:00:00+08:00",
        "open": 300.0,
        "high": 306.0,
        "low": 298.0,
        "close": 300.0,
        "volume": 15000000.0,
        "adjclose": 300.0
      },
      {
        "date": "2024-01-03 00:00:00+08:00",
        "open": 301.0,
        "high": 312.0,
        "low": 300.0,
        "close": 309.0,
        "volume": 21000000.0,
        "adjclose": NaN
      }
    ],
    "005930.KS": [
      {
        "date": "2024-01-03",
        "open": 78000.0,
        "high": 79000.0,
        "low": 77500.0,
        "close": 78500.0,
        "volume": Infinity,
        "adjclose": NaN
      }
    ],
    "TSLA": [
      {
        "date": "2024-01-01",
        "close": 250.0
      },
      {
        "date": "NaT",
        "close": 255.0
      },
      {
        "date": "2024-01-03",
        "close": 245.0
      }
    ]
  }
}"#;

/// Intraday rows keep the provider's `symbol` column; some lost their date.
const DUMPED_INTRADAY_PRICES: &str = r#"{
  "generated_at": "2024-01-03T15:00:02.118000+00:00",
  "interval": "5m",
  "period": "1d",
  "symbols": [
    "9988.HK"
  ],
  "prices": {
    "9988.HK": [
      {
        "symbol": "9988.HK",
        "open": 72.0,
        "high": 72.4,
        "low": 71.9,
        "close": 72.2,
        "volume": 410000
      },
      {
        "symbol": "9988.HK",
        "date": "2024-01-03 09:30:00+08:00",
        "open": 72.2,
        "high": 72.9,
        "low": 72.1,
        "close": 72.8,
        "volume": 520000
      },
      {
        "symbol": "9988.HK",
        "date": "2024-01-03 09:35:00+08:00",
        "open": 72.8,
        "high": 73.1,
        "low": 72.5,
        "close": 73.0,
        "volume": NaN
      }
    ]
  }
}"#;

#[test]
fn dumped_daily_prices_load_and_produce_signals() {
    // Given: A prices file with NaN cells, a NaT date and digit-leading tickers
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("prices-sample.json");
    fs::write(&path, DUMPED_DAILY_PRICES).expect("write prices");

    // When: The file is loaded and the engine runs without fundamentals
    let prices = PriceInput::load(&path).expect("dumped prices load");
    let run = SignalEngine::default().run(&prices.prices, &Default::default());

    // Then: No key is rejected and only the NaT row is dropped
    assert!(prices.rejected.is_empty());
    assert_eq!(prices.undated.get(&symbol("TSLA")), Some(&1));
    assert_eq!(prices.undated.len(), 1);

    // And: Every symbol with two dated bars comes through
    let symbols = run
        .signals
        .symbols
        .iter()
        .map(|symbol| symbol.as_str())
        .collect::<Vec<_>>();
    assert_eq!(symbols, vec!["0700.HK", "AAPL", "TSLA"]);
    assert_eq!(run.skipped.len(), 1);
    assert_eq!(run.skipped[0].symbol.as_str(), "005930.KS");

    // And: AAPL's NaN close blanks the return but not the symbol
    let aapl = run.signals.get(&symbol("AAPL")).expect("AAPL present");
    assert_eq!(aapl.close_return_1d, None);
    assert_eq!(aapl.vol_10d, None);

    // And: The digit-leading ticker gets a real return
    let tencent = run.signals.get(&symbol("0700.HK")).expect("0700.HK present");
    assert_close(tencent.close_return_1d.expect("return known"), 0.03);

    // And: TSLA's return spans the bars either side of the dropped row
    let tsla = run.signals.get(&symbol("TSLA")).expect("TSLA present");
    assert_close(tsla.close_return_1d.expect("return known"), -0.02);
}

#[test]
fn dumped_intraday_prices_keep_only_dated_rows() {
    // Given: An intraday file where the first row has no date
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("prices-intraday.json");
    fs::write(&path, DUMPED_INTRADAY_PRICES).expect("write prices");

    // When: The file is loaded
    let prices = PriceInput::load(&path).expect("intraday prices load");

    // Then: The undated row is counted and the dated ones remain
    let alibaba = symbol("9988.HK");
    assert_eq!(prices.interval.as_deref(), Some("5m"));
    assert_eq!(prices.undated.get(&alibaba), Some(&1));
    assert_eq!(prices.prices[&alibaba].len(), 2);

    // And: The two dated bars are enough for a signal
    let signal = SignalEngine::default()
        .compute_symbol(&alibaba, &prices.prices[&alibaba], None)
        .expect("two dated bars");
    assert_close(signal.close_return_1d.expect("return known"), 73.0 / 72.8 - 1.0);
}

#[test]
fn dumped_fundamentals_with_nan_keep_their_snapshot() {
    // Given: A fundamentals file with NaN in key stats and in the snapshot
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("fundamentals-slim.json");
    fs::write(
        &path,
        r#"{
  "symbols": [
    "0700.HK"
  ],
  "data": {
    "0700.HK": {
      "key_stats": {
        "trailingPE": NaN,
        "beta": 0.55
      },
      "trading_snapshot": {
        "regularMarketOpen": 309.0,
        "regularMarketDayHigh": 315.0,
        "regularMarketDayLow": 306.0,
        "regularMarketPreviousClose": NaN,
        "regularMarketVolume": 20000000,
        "averageDailyVolume10Day": NaN
      }
    }
  }
}"#,
    )
    .expect("write fundamentals");

    // When: Fundamentals are loaded and combined with two daily bars
    let fundamentals = FundamentalsInput::load(&path).expect("dumped fundamentals load");
    let bars = inplay_tests::daily_bars(&[300.0, 309.0]);
    let signal = SignalEngine::default()
        .compute_symbol(
            &symbol("0700.HK"),
            &bars,
            fundamentals.fundamentals.get(&symbol("0700.HK")),
        )
        .expect("signal");

    // Then: The NaN previous close falls back to the prior bar
    assert_close(signal.gap_pct.expect("gap known"), 0.03);
    assert_close(signal.day_range_pct.expect("range known"), 9.0 / 309.0);

    // And: The NaN average volume leaves the ratio unknown
    assert_eq!(signal.volume_ratio, None);
}

// =============================================================================
// File Boundary: Report and Config
// =============================================================================

#[test]
fn saved_report_reads_back_with_nulls_for_unknown_fields() {
    // Given: Signals computed from the loader files
    let (_temp, paths) = seeded_data_dir();
    let prices = PriceInput::load(&paths.prices).expect("prices load");
    let fundamentals = FundamentalsInput::load(&paths.fundamentals).expect("fundamentals load");
    let signals = SignalEngine::default().compute(&prices.prices, &fundamentals.fundamentals);

    // When: The report is written and read back
    fs::write(
        &paths.signals,
        serde_json::to_string_pretty(&signals).expect("serializes"),
    )
    .expect("write report");
    let saved = fs::read_to_string(&paths.signals).expect("read report");

    // Then: Every record has every key, unknown ones as null
    let raw: serde_json::Value = serde_json::from_str(&saved).expect("valid json");
    assert!(raw["signals"]["MSFT"]["gap_pct"].is_null());
    assert!(raw["signals"]["MSFT"]["vol_10d"].is_null());

    // And: The report parses back into a signal set
    let report: SignalSet = serde_json::from_str(&saved).expect("report parses");
    assert_eq!(report.symbols, signals.symbols);
    let aapl = report.get(&symbol("AAPL")).expect("AAPL saved");
    assert_close(aapl.in_play_score, 8.0 + 500.0 / 108.0 + 15.0);
}

#[test]
fn config_file_narrows_the_volatility_window() {
    // Given: A config with a two-return window and a partial weights table
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("engine.json");
    fs::write(
        &path,
        r#"{"volatility_window": 2, "weights": {"volatility_cap": 5.0}}"#,
    )
    .expect("write config");

    // When: The config is loaded
    let config = EngineConfig::from_path(&path).expect("config loads");

    // Then: Unspecified weights keep their defaults
    assert_eq!(config.volatility_window, 2);
    assert_close(config.weights.volatility_cap, 5.0);
    assert_close(config.weights.gap_cap, 50.0);

    // And: The engine only looks at the last two returns
    let engine = SignalEngine::new(config).expect("valid config");
    let bars = inplay_tests::daily_bars(&[100.0, 200.0, 202.0, 204.02]);
    let signal = engine
        .compute_symbol(&symbol("WIN"), &bars, None)
        .expect("signal");
    assert!(signal.vol_10d.expect("defined") < 1e-9);
}

#[test]
fn config_with_a_one_return_window_is_rejected() {
    // Given: A config asking for a single-return window
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("engine.json");
    fs::write(&path, r#"{"volatility_window": 1}"#).expect("write config");

    // When: The config is loaded
    let err = EngineConfig::from_path(&path).expect_err("must fail");

    // Then: It fails validation
    assert!(matches!(err, CoreError::Validation(_)));
}
