//! Windowing engine — cuts a long panel into fixed-length overlapping
//! windows, one row per window.

use std::collections::HashMap;

use polars::prelude::*;

use crate::domain::Regime;

use super::labels::{summarize_window_states, WindowLabels};
use super::schema::{validate_columns, WindowColumns, WindowError};

/// One left-aligned contiguous sub-sequence of a single market's price
/// series, tagged with identity metadata and regime diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRow {
    pub market_id: i64,
    /// Start/end time index in the source market's coordinates, inclusive.
    pub window_start: i64,
    pub window_end: i64,
    pub window_length: usize,
    /// Price values in time order (position 1..L in the output table).
    pub prices: Vec<f64>,
    pub labels: WindowLabels,
}

/// A window dropped during assembly, with the reason. Row-level failure
/// isolation: one malformed window never aborts the rest of the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedWindow {
    pub market_id: i64,
    pub window_start: i64,
    pub window_length: usize,
    pub reason: String,
}

/// Output of the windowing engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowSet {
    pub windows: Vec<WindowRow>,
    pub skipped: Vec<SkippedWindow>,
}

impl WindowSet {
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Row-per-window table: identity columns, `Price 1..Price Lmax`
    /// (null-padded past each row's own length), then label columns.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let n = self.windows.len();
        let max_len = self.windows.iter().map(|w| w.window_length).max().unwrap_or(0);

        let mut market_ids: Vec<i64> = Vec::with_capacity(n);
        let mut starts: Vec<i64> = Vec::with_capacity(n);
        let mut ends: Vec<i64> = Vec::with_capacity(n);
        let mut lengths: Vec<i64> = Vec::with_capacity(n);
        let mut prices: Vec<Vec<Option<f64>>> = vec![Vec::with_capacity(n); max_len];
        let mut share_c: Vec<f64> = Vec::with_capacity(n);
        let mut share_t: Vec<f64> = Vec::with_capacity(n);
        let mut share_k: Vec<f64> = Vec::with_capacity(n);
        let mut state_mode: Vec<i64> = Vec::with_capacity(n);
        let mut is_pure: Vec<f64> = Vec::with_capacity(n);

        for window in &self.windows {
            market_ids.push(window.market_id);
            starts.push(window.window_start);
            ends.push(window.window_end);
            lengths.push(window.window_length as i64);
            for (j, column) in prices.iter_mut().enumerate() {
                column.push(window.prices.get(j).copied());
            }
            share_c.push(window.labels.share_c);
            share_t.push(window.labels.share_t);
            share_k.push(window.labels.share_k);
            state_mode.push(window.labels.state_mode);
            is_pure.push(window.labels.is_pure_80);
        }

        let mut columns = vec![
            Column::new("market_id".into(), market_ids),
            Column::new("window_start".into(), starts),
            Column::new("window_end".into(), ends),
            Column::new("window_length".into(), lengths),
        ];
        for (j, values) in prices.into_iter().enumerate() {
            columns.push(Column::new(format!("Price {}", j + 1).into(), values));
        }
        columns.push(Column::new("share_C".into(), share_c));
        columns.push(Column::new("share_T".into(), share_t));
        columns.push(Column::new("share_K".into(), share_k));
        columns.push(Column::new("state_mode".into(), state_mode));
        columns.push(Column::new("is_pure_80".into(), is_pure));

        DataFrame::new(columns)
    }
}

/// One market's rows after grouping: time-sorted, still nullable.
struct MarketGroup {
    market_id: i64,
    times: Vec<i64>,
    prices: Vec<Option<f64>>,
    regimes: Vec<Option<i64>>,
}

fn extract_i64(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>, WindowError> {
    let column = df
        .column(name)?
        .cast(&DataType::Int64)
        .map_err(|source| WindowError::ColumnType {
            column: name.to_string(),
            source,
        })?;
    let ca = column.i64().map_err(|source| WindowError::ColumnType {
        column: name.to_string(),
        source,
    })?;
    Ok(ca.into_iter().collect())
}

fn extract_f64(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, WindowError> {
    let column = df
        .column(name)?
        .cast(&DataType::Float64)
        .map_err(|source| WindowError::ColumnType {
            column: name.to_string(),
            source,
        })?;
    let ca = column.f64().map_err(|source| WindowError::ColumnType {
        column: name.to_string(),
        source,
    })?;
    Ok(ca.into_iter().collect())
}

/// Group a long table by market (first-appearance order) and sort each
/// group by time ascending. Rows with a null market id or time index
/// cannot be placed in any window and are dropped here.
fn group_by_market(
    df: &DataFrame,
    columns: &WindowColumns,
    skipped: &mut Vec<SkippedWindow>,
) -> Result<Vec<MarketGroup>, WindowError> {
    let ids = extract_i64(df, &columns.id)?;
    let times = extract_i64(df, &columns.time)?;
    let prices = extract_f64(df, &columns.price)?;
    let regimes = extract_i64(df, &columns.regime)?;

    let mut groups: Vec<MarketGroup> = Vec::new();
    let mut position: HashMap<i64, usize> = HashMap::new();

    for row in 0..df.height() {
        let (Some(market_id), Some(t)) = (ids[row], times[row]) else {
            skipped.push(SkippedWindow {
                market_id: ids[row].unwrap_or(-1),
                window_start: times[row].unwrap_or(-1),
                window_length: 0,
                reason: "null market id or time index".to_string(),
            });
            continue;
        };

        let slot = *position.entry(market_id).or_insert_with(|| {
            groups.push(MarketGroup {
                market_id,
                times: Vec::new(),
                prices: Vec::new(),
                regimes: Vec::new(),
            });
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.times.push(t);
        group.prices.push(prices[row]);
        group.regimes.push(regimes[row]);
    }

    for group in &mut groups {
        let mut order: Vec<usize> = (0..group.times.len()).collect();
        order.sort_by_key(|&i| group.times[i]);
        group.times = order.iter().map(|&i| group.times[i]).collect();
        group.prices = order.iter().map(|&i| group.prices[i]).collect();
        group.regimes = order.iter().map(|&i| group.regimes[i]).collect();
    }

    Ok(groups)
}

/// Try to assemble the window starting at offset `start` in a group.
fn assemble_window(group: &MarketGroup, start: usize, window: usize) -> Result<WindowRow, String> {
    let base_time = group.times[start];
    let mut prices = Vec::with_capacity(window);
    let mut states = Vec::with_capacity(window);

    for k in 0..window {
        let idx = start + k;
        if group.times[idx] != base_time + k as i64 {
            return Err(format!(
                "time index not contiguous at t={} (expected {})",
                group.times[idx],
                base_time + k as i64
            ));
        }
        let Some(price) = group.prices[idx] else {
            return Err(format!("null price at t={}", group.times[idx]));
        };
        let Some(raw_state) = group.regimes[idx] else {
            return Err(format!("null regime at t={}", group.times[idx]));
        };
        let Some(state) = Regime::from_index(raw_state) else {
            return Err(format!(
                "regime {raw_state} outside {{0,1,2}} at t={}",
                group.times[idx]
            ));
        };
        prices.push(price);
        states.push(state);
    }

    Ok(WindowRow {
        market_id: group.market_id,
        window_start: base_time,
        window_end: group.times[start + window - 1],
        window_length: window,
        prices,
        labels: summarize_window_states(&states),
    })
}

/// Cut a long panel into left-aligned, exhaustive windows of length
/// `window`.
///
/// For each market of length `T_m >= window` this emits exactly
/// `T_m - window + 1` rows with unit-step starts; shorter markets emit
/// zero rows and no error. Malformed windows (null values, out-of-domain
/// regimes, time gaps) are skipped individually and reported in
/// [`WindowSet::skipped`].
pub fn make_windows(
    df: &DataFrame,
    window: usize,
    columns: &WindowColumns,
) -> Result<WindowSet, WindowError> {
    if window == 0 {
        return Err(WindowError::ZeroWindowLength);
    }
    validate_columns(df, columns)?;

    let mut set = WindowSet::default();
    let groups = group_by_market(df, columns, &mut set.skipped)?;

    for group in &groups {
        let t_m = group.times.len();
        if t_m < window {
            continue;
        }
        for start in 0..=(t_m - window) {
            match assemble_window(group, start, window) {
                Ok(row) => set.windows.push(row),
                Err(reason) => set.skipped.push(SkippedWindow {
                    market_id: group.market_id,
                    window_start: group.times[start],
                    window_length: window,
                    reason,
                }),
            }
        }
    }

    Ok(set)
}

/// Run [`make_windows`] once per requested length and concatenate.
///
/// Nothing extra is tagged: `window_length` on each row already recovers
/// the originating pass.
pub fn make_windows_multi(
    df: &DataFrame,
    lengths: &[usize],
    columns: &WindowColumns,
) -> Result<WindowSet, WindowError> {
    let mut combined = WindowSet::default();
    for &window in lengths {
        let set = make_windows(df, window, columns)?;
        combined.windows.extend(set.windows);
        combined.skipped.extend(set.skipped);
    }
    Ok(combined)
}
