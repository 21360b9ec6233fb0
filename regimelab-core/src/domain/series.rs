//! MarketSeries and Panel — the simulator's tabular output.

use polars::prelude::*;

use super::regime::Regime;

/// One market's simulated history, post burn-in.
///
/// The three vectors are parallel and exactly `T` long; the time index
/// is implicit, zero-based, and contiguous.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSeries {
    pub market_id: u64,
    /// Conduct regime at each step.
    pub regime: Vec<Regime>,
    /// Latent cost at each step.
    pub cost: Vec<f64>,
    /// Observed log price at each step.
    pub price: Vec<f64>,
}

impl MarketSeries {
    /// Number of kept time steps.
    pub fn len(&self) -> usize {
        self.price.len()
    }

    pub fn is_empty(&self) -> bool {
        self.price.is_empty()
    }
}

/// All simulated markets stacked market-major, time-ascending.
///
/// The sole artifact handed to the windowing engine, via
/// [`Panel::to_dataframe`].
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub markets: Vec<MarketSeries>,
}

impl Panel {
    /// Total row count across all markets.
    pub fn n_rows(&self) -> usize {
        self.markets.iter().map(MarketSeries::len).sum()
    }

    /// Long-format table: `market_id`, `t`, `regime`, `cost`, `price`.
    ///
    /// Row order is market-major then time-ascending, matching the order
    /// in which markets were simulated.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let n = self.n_rows();
        let mut market_ids: Vec<i64> = Vec::with_capacity(n);
        let mut times: Vec<i64> = Vec::with_capacity(n);
        let mut regimes: Vec<i64> = Vec::with_capacity(n);
        let mut costs: Vec<f64> = Vec::with_capacity(n);
        let mut prices: Vec<f64> = Vec::with_capacity(n);

        for market in &self.markets {
            for t in 0..market.len() {
                market_ids.push(market.market_id as i64);
                times.push(t as i64);
                regimes.push(market.regime[t].index() as i64);
                costs.push(market.cost[t]);
                prices.push(market.price[t]);
            }
        }

        DataFrame::new(vec![
            Column::new("market_id".into(), market_ids),
            Column::new("t".into(), times),
            Column::new("regime".into(), regimes),
            Column::new("cost".into(), costs),
            Column::new("price".into(), prices),
        ])
    }
}
