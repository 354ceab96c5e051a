use indicatif::style::TemplateError;
use plotters::drawing::DrawingAreaErrorKind;
use std::path::PathBuf;
use thiserror::Error;

pub type VizResult<T> = Result<T, VizError>;

#[derive(Debug, Error)]
pub enum VizError {
    #[error("could not read csv {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid number {value:?} at row {row}, column {column}")]
    InvalidNumber {
        row: usize,
        column: usize,
        value: String,
    },

    #[error("no rows in {path:?}")]
    EmptyTable { path: PathBuf },

    #[error("row {row} has {found} columns, at least {expected} needed")]
    MissingColumn {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("row {row} has {found} columns, the first row has {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("strategy index {0} has no label")]
    UnknownStrategy(usize),

    #[error("failed to draw chart: {0}")]
    Drawing(String),

    #[error(transparent)]
    ProgressBar(#[from] TemplateError),
}

impl<E> From<DrawingAreaErrorKind<E>> for VizError
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        VizError::Drawing(e.to_string())
    }
}
