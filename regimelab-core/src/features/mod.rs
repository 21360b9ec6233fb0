//! Feature engineering — a fixed-size statistical summary per window.
//!
//! Every feature is a pure function of the window's ordered price values;
//! the output column set never depends on the window length. Degenerate
//! windows carry NaN sentinels in the affected features only.

pub mod stats;

use polars::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::windows::{WindowRow, WindowSet};

use stats::{autocorr, excess_kurtosis, mean, population_std};

/// How step-to-step changes are computed from the price positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// First differences. Canonical: window prices are log prices, so
    /// differences are log returns.
    #[default]
    LogDiff,
    /// Simple percentage change. Deprecated compatibility variant for
    /// raw-price inputs; undefined across a zero price.
    PctChange,
}

/// Feature computation knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub change: ChangeKind,
    /// Changes smaller than this in magnitude count as "no change"
    /// (price-rigidity proxy).
    pub zero_change_threshold: f64,
    /// Additive floor on |mean change| in the coefficient-of-variation
    /// ratio, so a near-zero mean does not blow the ratio up.
    pub cov_floor: f64,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            change: ChangeKind::LogDiff,
            zero_change_threshold: 1e-3,
            cov_floor: 1e-8,
        }
    }
}

/// The fixed-size feature vector. Same named columns for every window
/// length; values may be NaN on degenerate input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Mean step-to-step change.
    pub mean_change: f64,
    /// Population std dev of changes.
    pub volatility: f64,
    /// Volatility over |mean change| (floored).
    pub cov_change: f64,
    /// Fraction of near-zero changes.
    pub zero_change_fraction: f64,
    /// Lag-1 autocorrelation of changes.
    pub autocorr_lag1: f64,
    /// Lag-2 autocorrelation of changes.
    pub autocorr_lag2: f64,
    /// Unbiased excess kurtosis of changes.
    pub kurtosis_change: f64,
    /// Largest absolute change.
    pub max_abs_change: f64,
    /// Population std dev over positive changes only.
    pub vol_up: f64,
    /// Population std dev over negative changes only.
    pub vol_down: f64,
    /// Population std dev of the raw price values.
    pub level_volatility: f64,
    /// Max minus min of the raw price values.
    pub price_range: f64,
}

impl FeatureVector {
    /// Output column names, in table order.
    pub const NAMES: [&'static str; 12] = [
        "mean_change",
        "volatility",
        "cov_change",
        "zero_change_fraction",
        "autocorr_lag1",
        "autocorr_lag2",
        "kurtosis_change",
        "max_abs_change",
        "vol_up",
        "vol_down",
        "level_volatility",
        "price_range",
    ];

    /// Values in [`Self::NAMES`] order.
    pub fn values(&self) -> [f64; 12] {
        [
            self.mean_change,
            self.volatility,
            self.cov_change,
            self.zero_change_fraction,
            self.autocorr_lag1,
            self.autocorr_lag2,
            self.kurtosis_change,
            self.max_abs_change,
            self.vol_up,
            self.vol_down,
            self.level_volatility,
            self.price_range,
        ]
    }
}

/// Step-to-step changes over the full inclusive price range (positions
/// 1..=L give L-1 changes). Non-finite changes (a percentage change
/// across a zero price) are dropped before any statistic sees them.
pub fn price_changes(prices: &[f64], kind: ChangeKind) -> Vec<f64> {
    prices
        .windows(2)
        .map(|pair| match kind {
            ChangeKind::LogDiff => pair[1] - pair[0],
            ChangeKind::PctChange => (pair[1] - pair[0]) / pair[0],
        })
        .filter(|c| c.is_finite())
        .collect()
}

/// Compute the feature vector for one window's ordered price values.
pub fn compute_features(prices: &[f64], config: &FeatureConfig) -> FeatureVector {
    let changes = price_changes(prices, config.change);

    let mean_change = mean(&changes);
    let volatility = population_std(&changes);
    let cov_change = if mean_change.is_nan() {
        f64::NAN
    } else {
        volatility / (mean_change.abs() + config.cov_floor)
    };

    let zero_change_fraction = if changes.is_empty() {
        f64::NAN
    } else {
        let near_zero = changes
            .iter()
            .filter(|c| c.abs() < config.zero_change_threshold)
            .count();
        near_zero as f64 / changes.len() as f64
    };

    let max_abs_change = changes
        .iter()
        .map(|c| c.abs())
        .fold(f64::NAN, f64::max);

    let positive: Vec<f64> = changes.iter().copied().filter(|c| *c > 0.0).collect();
    let negative: Vec<f64> = changes.iter().copied().filter(|c| *c < 0.0).collect();

    let (level_volatility, price_range) = if prices.is_empty() {
        (f64::NAN, f64::NAN)
    } else {
        let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
        (population_std(prices), max - min)
    };

    FeatureVector {
        mean_change,
        volatility,
        cov_change,
        zero_change_fraction,
        autocorr_lag1: autocorr(&changes, 1),
        autocorr_lag2: autocorr(&changes, 2),
        kurtosis_change: excess_kurtosis(&changes),
        max_abs_change,
        vol_up: population_std(&positive),
        vol_down: population_std(&negative),
        level_volatility,
        price_range,
    }
}

/// One window plus its feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub window: WindowRow,
    pub features: FeatureVector,
}

/// The feature-engineered window table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    pub rows: Vec<FeatureRow>,
}

impl FeatureSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The window table extended with the twelve feature columns.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let windows = WindowSet {
            windows: self.rows.iter().map(|r| r.window.clone()).collect(),
            skipped: Vec::new(),
        };
        let mut df = windows.to_dataframe()?;

        for (j, name) in FeatureVector::NAMES.iter().enumerate() {
            let values: Vec<f64> = self.rows.iter().map(|r| r.features.values()[j]).collect();
            df.with_column(Column::new((*name).into(), values))?;
        }
        Ok(df)
    }
}

/// Compute features for every window.
///
/// Per-window work is pure and independent, so it runs in parallel;
/// ordered collection keeps the output row order identical to the input
/// (market-major, start-ascending).
pub fn engineer_features(windows: &WindowSet, config: &FeatureConfig) -> FeatureSet {
    let rows = windows
        .windows
        .par_iter()
        .map(|window| FeatureRow {
            window: window.clone(),
            features: compute_features(&window.prices, config),
        })
        .collect();
    FeatureSet { rows }
}
