//! Intra-shard / cross-shard transfer counts per slot.
//!
//! `function_num.csv` holds ten counters per slot, one for each
//! function type and user class: column = function type + 5 * class.

use super::{min_and_max, padded_range, ChartText, Table, VizResult, FIGURE_SIZE};
use plotters::prelude::*;
use std::path::Path;

pub const FUNCTION_NUM_TEXT: ChartText = ChartText {
    title: "Number of Intra-shard/Cross-shard Transfers Over Time",
    x_desc: "Slot",
    y_desc: "Number of Transactions",
};

/// Functions a simulated transaction can call, in column order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionType {
    /// Local balance transfer
    Transfer,
    CreateCrossTransfer,
    ApplyCrossTransfer,
    CreateCrossTransferAll,
    ApplyCrossTransferAll,
}

impl FunctionType {
    pub const COUNT: usize = 5;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserClass {
    NonSwitcher,
    Switcher,
}

pub fn column_index(class: UserClass, ftype: FunctionType) -> usize {
    ftype as usize + class as usize * FunctionType::COUNT
}

/// The four derived series drawn on the chart
#[derive(Debug, Clone, PartialEq)]
pub struct TransferCounts {
    pub non_switcher_intra: Vec<f64>,
    pub non_switcher_cross: Vec<f64>,
    pub switcher_intra: Vec<f64>,
    pub switcher_cross: Vec<f64>,
}

impl TransferCounts {
    /// intra = Transfer, cross = CreateCrossTransfer + CreateCrossTransferAll,
    /// per user class. Rows without the needed columns fail.
    pub fn from_table(table: &Table) -> VizResult<TransferCounts> {
        let (non_switcher_intra, non_switcher_cross) =
            class_series(table, UserClass::NonSwitcher)?;
        let (switcher_intra, switcher_cross) = class_series(table, UserClass::Switcher)?;
        Ok(TransferCounts {
            non_switcher_intra,
            non_switcher_cross,
            switcher_intra,
            switcher_cross,
        })
    }

    pub fn slots(&self) -> usize {
        self.non_switcher_intra.len()
    }

    /// (label, colour, values) in drawing order
    pub fn series(&self) -> [(&'static str, RGBColor, &[f64]); 4] {
        [
            (
                "Non-switchers' Intra-shard",
                RGBColor(0, 0, 255),
                &self.non_switcher_intra[..],
            ),
            (
                "Non-switchers' Cross-shard",
                RGBColor(135, 206, 235),
                &self.non_switcher_cross[..],
            ),
            (
                "Switchers' Intra-shard",
                RGBColor(255, 0, 0),
                &self.switcher_intra[..],
            ),
            (
                "Switchers' Cross-shard",
                RGBColor(255, 192, 203),
                &self.switcher_cross[..],
            ),
        ]
    }
}

fn class_series(table: &Table, class: UserClass) -> VizResult<(Vec<f64>, Vec<f64>)> {
    let intra = table.column(column_index(class, FunctionType::Transfer))?;
    let create = table.column(column_index(class, FunctionType::CreateCrossTransfer))?;
    let create_all = table.column(column_index(class, FunctionType::CreateCrossTransferAll))?;
    let cross = create.iter().zip(create_all.iter()).map(|(a, b)| a + b).collect();
    Ok((intra, cross))
}

/// plots the four transfer series against the slot index to png
pub fn plot_transfer_counts(counts: &TransferCounts, fout: &Path) -> VizResult<()> {
    let text = &FUNCTION_NUM_TEXT;
    let last_slot = counts.slots().saturating_sub(1) as f64;
    let all: Vec<f64> = counts
        .series()
        .iter()
        .flat_map(|(_, _, v)| v.iter().copied())
        .collect();
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

    for (label, color, values) in counts.series().iter() {
        let style = color.mix(0.5).stroke_width(2);
        let points = values.iter().enumerate().map(|(slot, v)| (slot as f64, *v));
        chart
            .draw_series(LineSeries::new(points, style))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    log::info!("saved transfer counts of {} slots to {}", counts.slots(), fout.display());
    Ok(())
}
