//! Error type for the analysis pipeline

use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(
        "No date-like column found in {}. Please ensure your CSV has a 'Date' column or similar.",
        path.display()
    )]
    NoDateColumn { path: PathBuf },

    #[error("No rows with a parseable date in {}", path.display())]
    NoRows { path: PathBuf },

    #[error("Invalid indicator period: {0}")]
    InvalidPeriod(usize),

    #[error("Need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Multiplicative model requires strictly positive values")]
    NonPositiveValues,

    #[error("Plot error: {0}")]
    Plot(String),

    #[error(transparent)]
    Artifact(#[from] anyhow::Error),
}

impl<E> From<DrawingAreaErrorKind<E>> for AnalysisError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        AnalysisError::Plot(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
