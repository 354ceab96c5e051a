//! Distribution of the users' total transaction fee, one histogram per strategy.

use super::linspace::Linspace;
use super::{min_and_max, padded_range, progress_bar, ChartText, VizError, VizResult};
use super::{FIGURE_SIZE, GWEI, PALETTE, STRATEGY_LABELS};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use serde::{Deserialize, Deserializer};
use std::path::Path;

pub const USERS_TEXT: ChartText = ChartText {
    title: "User Distribution by Total Transaction Fee",
    x_desc: "Total Transaction Fee (Gwei)",
    y_desc: "Number of Users",
};

/// strategies with fewer users are not drawn
pub const MIN_USERS_PER_STRATEGY: usize = 2;

pub const HISTOGRAM_BINS: usize = 100;

/// One row of users.csv
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserRecord {
    pub address: usize,
    /// index into STRATEGY_LABELS, a switcher flag reads as 0 / 1
    #[serde(deserialize_with = "strategy_index")]
    pub strategy: usize,
    /// wei
    pub total_fee: u128,
    pub transaction_num: u64,
}

fn strategy_index<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "True" | "true" => Ok(1),
        "False" | "false" => Ok(0),
        other => other.parse().map_err(serde::de::Error::custom),
    }
}

/// reads every user of a headerless users.csv
pub fn read_users(fin: &Path) -> VizResult<Vec<UserRecord>> {
    let csv_err = |source: csv::Error| VizError::Csv {
        path: fin.to_path_buf(),
        source,
    };
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(fin)
        .map_err(csv_err)?;
    let users = rdr
        .deserialize()
        .collect::<Result<Vec<UserRecord>, csv::Error>>()
        .map_err(csv_err)?;
    if users.is_empty() {
        return Err(VizError::EmptyTable {
            path: fin.to_path_buf(),
        });
    }
    log::info!("loaded {} users from {}", users.len(), fin.display());
    Ok(users)
}

/// wei to gwei, floor division
pub fn to_gwei(fee: u128) -> u128 {
    fee / GWEI
}

/// Fees in gwei grouped by strategy, indexed like STRATEGY_LABELS
#[derive(Debug, Clone, PartialEq)]
pub struct FeeDistribution {
    pub buckets: Vec<Vec<u128>>,
}

impl FeeDistribution {
    pub fn from_users(users: &[UserRecord]) -> VizResult<FeeDistribution> {
        let mut buckets = vec![Vec::new(); STRATEGY_LABELS.len()];
        let bar = progress_bar(users.len() as u64)?;
        for user in users {
            match buckets.get_mut(user.strategy) {
                Some(bucket) => bucket.push(to_gwei(user.total_fee)),
                None => {
                    bar.abandon();
                    return Err(VizError::UnknownStrategy(user.strategy));
                }
            }
            bar.inc(1);
        }
        bar.finish_and_clear();
        Ok(FeeDistribution { buckets })
    }

    /// (strategy, fees) of the strategies with enough users to be drawn
    pub fn plottable(&self) -> impl Iterator<Item = (usize, &[u128])> {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, b)| b.len() >= MIN_USERS_PER_STRATEGY)
            .map(|(i, b)| (i, &b[..]))
    }
}

/// Element len/2 of the sorted values.
/// Even lengths take the upper middle element, no averaging.
pub fn median_marker(values: &[u128]) -> Option<u128> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted.get(sorted.len() / 2).copied()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width bins from the min to the max of values.
/// Bins are half open except the last one, which also takes the max.
/// A single distinct value is centred in a range of width one.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let (min, max) = match min_and_max(values) {
        Some(r) if bins > 0 => r,
        _ => return Vec::new(),
    };
    let (lo, hi) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let edges: Vec<f64> = Linspace::edges(lo, hi, bins).collect();
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0; bins];
    for v in values.iter().copied().filter(|v| !v.is_nan()) {
        let mut idx = (((v - lo) / width) as usize).min(bins - 1);
        // rounding of the division can land one bin off
        while idx > 0 && v < edges[idx] {
            idx -= 1;
        }
        while idx + 1 < bins && v >= edges[idx + 1] {
            idx += 1;
        }
        counts[idx] += 1;
    }
    edges
        .windows(2)
        .zip(counts)
        .map(|(e, count)| Bin {
            start: e[0],
            end: e[1],
            count,
        })
        .collect()
}

/// plots one histogram and one dashed median line per drawable strategy to png
pub fn plot_fee_distribution(dist: &FeeDistribution, fout: &Path) -> VizResult<()> {
    let text = &USERS_TEXT;
    for (strategy, bucket) in dist.buckets.iter().enumerate() {
        if bucket.len() < MIN_USERS_PER_STRATEGY {
            log::debug!(
                "skipping strategy {} with {} user(s)",
                STRATEGY_LABELS[strategy],
                bucket.len()
            );
        }
    }
    let hists: Vec<(usize, Vec<Bin>, Option<u128>)> = dist
        .plottable()
        .map(|(strategy, fees)| {
            let gwei: Vec<f64> = fees.iter().map(|f| *f as f64).collect();
            (strategy, histogram(&gwei, HISTOGRAM_BINS), median_marker(fees))
        })
        .collect();

    let xmin = hists
        .iter()
        .filter_map(|(_, bins, _)| bins.first().map(|b| b.start))
        .fold(f64::INFINITY, f64::min);
    let xmax = hists
        .iter()
        .filter_map(|(_, bins, _)| bins.last().map(|b| b.end))
        .fold(f64::NEG_INFINITY, f64::max);
    let (xmin, xmax) = if xmin <= xmax { (xmin, xmax) } else { (0., 1.) };
    let ymax = hists
        .iter()
        .flat_map(|(_, bins, _)| bins.iter().map(|b| b.count))
        .max()
        .unwrap_or(1)
        .max(1) as f64
        * 1.05;

    let root = BitMapBackend::new(fout, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(text.title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(padded_range(xmin, xmax), 0f64..ymax)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .label_style(("sans-serif", 16))
        .x_desc(text.x_desc)
        .y_desc(text.y_desc)
        .draw()?;

    for (strategy, bins, median) in hists.iter() {
        let color = PALETTE[*strategy % PALETTE.len()];
        let fill = color.mix(0.5).filled();
        chart
            .draw_series(
                bins.iter()
                    .filter(|b| b.count > 0)
                    .map(|b| Rectangle::new([(b.start, 0.), (b.end, b.count as f64)], fill)),
            )?
            .label(STRATEGY_LABELS[*strategy])
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], fill));
        if let Some(m) = median {
            log::info!(
                "{}: {} users, median marker at {} gwei",
                STRATEGY_LABELS[*strategy],
                dist.buckets[*strategy].len(),
                m
            );
            let x = *m as f64;
            chart.draw_series(DashedLineSeries::new(
                vec![(x, 0.), (x, ymax)],
                6,
                4,
                color.stroke_width(1),
            ))?;
        }
    }

    if !hists.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }
    root.present()?;
    log::info!("saved {} fee histogram(s) to {}", hists.len(), fout.display());
    Ok(())
}
