//! Per-shard time series (mempool occupancy, base fee, active users)
//! and the line chart that draws one line per shard over the slots.

use super::{min_and_max, padded_range, progress_bar, ChartText, Table, VizError, VizResult};
use super::{FIGURE_SIZE, NEUTRAL, PALETTE};
use plotters::prelude::*;
use std::path::Path;

/// Shards below this id get their own colour and legend entry
pub const HIGHLIGHTED_SHARDS: usize = 3;

pub const MEMPOOL_TEXT: ChartText = ChartText {
    title: "Number of Mempool Transactions in Each Shard Over Time",
    x_desc: "Slot",
    y_desc: "Number of Mempool Transactions",
};

pub const BASE_FEE_TEXT: ChartText = ChartText {
    title: "Base Fee in Each Shard Over Time",
    x_desc: "Slot",
    y_desc: "Base Fee (Gwei)",
};

pub const ACTIVE_USERS_TEXT: ChartText = ChartText {
    title: "Number of Active Users in Each Shard Over Time",
    x_desc: "Slot",
    y_desc: "Number of Users",
};

/// One series per shard, each indexed by slot
#[derive(Debug, Clone, PartialEq)]
pub struct ShardSeries {
    pub values: Vec<Vec<f64>>,
}

impl ShardSeries {
    /// Transposes a slots x shards table into one series per shard,
    /// dividing every cell by scale.
    /// The shard count is the width of the first row, rows of another width fail.
    pub fn from_table(table: &Table, scale: f64) -> VizResult<ShardSeries> {
        let shards = table.width();
        let mut values = vec![Vec::with_capacity(table.len()); shards];
        let bar = progress_bar(table.len() as u64)?;
        for (row, cells) in table.rows.iter().enumerate() {
            if cells.len() != shards {
                bar.abandon();
                return Err(VizError::RaggedRow {
                    row,
                    found: cells.len(),
                    expected: shards,
                });
            }
            for (series, v) in values.iter_mut().zip(cells.iter()) {
                series.push(v / scale);
            }
            bar.inc(1);
        }
        bar.finish_and_clear();
        Ok(ShardSeries { values })
    }

    pub fn shards(&self) -> usize {
        self.values.len()
    }

    pub fn slots(&self) -> usize {
        self.values.first().map_or(0, |s| s.len())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShardStyle {
    /// own colour, own legend entry
    Highlighted { color: RGBColor, label: String },
    /// shared neutral colour, not in the legend
    Background,
}

pub fn shard_style(shard_id: usize) -> ShardStyle {
    if shard_id < HIGHLIGHTED_SHARDS {
        ShardStyle::Highlighted {
            color: PALETTE[shard_id],
            label: format!("Shard {}", shard_id),
        }
    } else {
        ShardStyle::Background
    }
}

/// plots every shard series against the slot index to png.
/// Drawn from the last shard down so the highlighted ones end up on top.
pub fn plot_shard_series(series: &ShardSeries, text: &ChartText, fout: &Path) -> VizResult<()> {
    let last_slot = series.slots().saturating_sub(1) as f64;
    let all: Vec<f64> = series.values.iter().flatten().copied().collect();
    let (ymin, ymax) = min_and_max(&all).unwrap_or((0., 1.));

    let root = BitMapBackend::new(fout, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(text.title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(padded_range(0., last_slot), padded_range(ymin, ymax))?;
    chart
        .configure_mesh()
        .disable_mesh()
        .label_style(("sans-serif", 16))
        .x_desc(text.x_desc)
        .y_desc(text.y_desc)
        .draw()?;

    for shard_id in (0..series.shards()).rev() {
        let points = series.values[shard_id]
            .iter()
            .enumerate()
            .map(|(slot, v)| (slot as f64, *v));
        match shard_style(shard_id) {
            ShardStyle::Highlighted { color, label } => {
                chart
                    .draw_series(LineSeries::new(points, color.stroke_width(2)))?
                    .label(label)
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
            }
            ShardStyle::Background => {
                chart.draw_series(LineSeries::new(points, NEUTRAL.stroke_width(1)))?;
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    log::info!("saved {} shard series to {}", series.shards(), fout.display());
    Ok(())
}
