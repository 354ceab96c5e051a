use indicatif::{ProgressBar, ProgressStyle};
use plotters::style::RGBColor;
use std::io::Read;
use std::path::{Path, PathBuf};
pub mod cli;
pub mod error;
pub mod function_num;
pub mod linspace;
pub mod shard;
pub mod users;

pub use error::{VizError, VizResult};

pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

pub const DEFAULT_DIRPATH: &str = "data";

/// 10x6 figure at 100 dpi
pub const FIGURE_SIZE: (u32, u32) = (1000, 600);

/// wei per gwei
pub const GWEI: u128 = 1_000_000_000;

/// tab10, the default categorical palette of the original charts
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// silver, shared by every shard that is not highlighted
pub const NEUTRAL: RGBColor = RGBColor(192, 192, 192);

/// Display names of the user strategies, indexed by the strategy column of users.csv
pub const STRATEGY_LABELS: [&str; 4] = [
    "Non-switcher",
    "Weighted random",
    "Minimum",
    "Decreasing minimum",
];

/// Title and axis descriptions of a chart
#[derive(Debug, Clone)]
pub struct ChartText {
    pub title: &'static str,
    pub x_desc: &'static str,
    pub y_desc: &'static str,
}

/// A headerless numeric csv, kept row by row as in the file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Vec<f64>>,
}

impl Table {
    /// Init a Table from a headerless csv file.
    /// Every cell must parse as a number; the first bad cell stops the load.
    pub fn from_csv(fin: &Path) -> VizResult<Table> {
        let rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(fin)
            .map_err(|source| VizError::Csv {
                path: fin.to_path_buf(),
                source,
            })?;
        let table = Table::from_csv_reader(rdr, fin)?;
        if table.is_empty() {
            return Err(VizError::EmptyTable {
                path: fin.to_path_buf(),
            });
        }
        log::info!(
            "loaded {} rows x {} columns from {}",
            table.len(),
            table.width(),
            fin.display()
        );
        Ok(table)
    }

    fn from_csv_reader<R: Read>(mut rdr: csv::Reader<R>, origin: &Path) -> VizResult<Table> {
        let mut rows = Vec::new();
        for (row, record) in rdr.records().enumerate() {
            let record = record.map_err(|source| VizError::Csv {
                path: origin.to_path_buf(),
                source,
            })?;
            let mut cells = Vec::with_capacity(record.len());
            for (column, field) in record.iter().enumerate() {
                let value = field
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| VizError::InvalidNumber {
                        row,
                        column,
                        value: field.to_string(),
                    })?;
                cells.push(value);
            }
            rows.push(cells);
        }
        Ok(Table { rows })
    }

    /// number of rows, i.e. slots
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// number of columns of the first row
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    /// copies column idx out of every row,
    /// fails on the first row that is too short
    pub fn column(&self, idx: usize) -> VizResult<Vec<f64>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                cells.get(idx).copied().ok_or(VizError::MissingColumn {
                    row,
                    found: cells.len(),
                    expected: idx + 1,
                })
            })
            .collect()
    }
}

/// Output png next to the input csv, same stem
pub fn png_path(csvin: &Path) -> PathBuf {
    let mut pngout = csvin.to_path_buf();
    pngout.set_extension("png");
    pngout
}

/// Logger for the binaries, `info` unless RUST_LOG says otherwise
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Console progress for the per-row loops
pub fn progress_bar(len: u64) -> VizResult<ProgressBar> {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    Ok(bar)
}

/// min and max of a slice, None if empty or if everything is NAN
pub fn min_and_max(s: &[f64]) -> Option<(f64, f64)> {
    let mut iter = s.iter().copied().filter(|v| !v.is_nan());
    let first = iter.next()?;
    Some(iter.fold((first, first), |(min, max), v| (min.min(v), max.max(v))))
}

/// Pads a value range so the data does not touch the frame,
/// a flat range is opened up to at least one unit.
pub fn padded_range(min: f64, max: f64) -> std::ops::Range<f64> {
    if min == max {
        return (min - 0.5)..(max + 0.5);
    }
    let margin = (max - min) / 20.;
    (min - margin)..(max + margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn csv_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn table_reads_headerless_numbers() {
        let file = csv_file("1,2,3\n4, 5 ,6\n");
        let table = Table::from_csv(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.width(), 3);
        assert_eq!(table.column(1).unwrap(), vec![2., 5.]);
    }

    #[test]
    fn table_rejects_non_numeric_cell() {
        let file = csv_file("1,2\n3,x\n");
        match Table::from_csv(file.path()) {
            Err(VizError::InvalidNumber { row, column, value }) => {
                assert_eq!((row, column), (1, 1));
                assert_eq!(value, "x");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn column_out_of_range_names_the_row() {
        let table = Table {
            rows: vec![vec![1., 2., 3.], vec![1.]],
        };
        match table.column(2) {
            Err(VizError::MissingColumn {
                row,
                found,
                expected,
            }) => assert_eq!((row, found, expected), (1, 1, 3)),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn png_path_swaps_extension() {
        let out = png_path(Path::new("data/mempool.csv"));
        assert_eq!(out, PathBuf::from("data/mempool.png"));
    }

    #[test]
    fn min_and_max_skips_nan() {
        assert_eq!(min_and_max(&[3., f64::NAN, -1., 7.]), Some((-1., 7.)));
        assert_eq!(min_and_max(&[]), None);
        assert_eq!(min_and_max(&[f64::NAN]), None);
    }

    #[test]
    fn padded_range_opens_flat_range() {
        assert_eq!(padded_range(2., 2.), 1.5..2.5);
        let r = padded_range(0., 20.);
        assert_eq!(r, -1.0..21.0);
    }
}
