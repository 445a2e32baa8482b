use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while turning a directory of csv files into charts.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("could not read input directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not read csv {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("{}: missing column `{column}`", .path.display())]
    MissingColumn { path: PathBuf, column: String },
    #[error("{}, row {row}: could not parse `{value}` as a datetime", .path.display())]
    Datetime {
        path: PathBuf,
        row: usize,
        value: String,
    },
    #[error("{}, row {row}: could not parse `{value}` as a number", .path.display())]
    Number {
        path: PathBuf,
        row: usize,
        value: String,
    },
    #[error("could not render {}: {message}", .path.display())]
    Render { path: PathBuf, message: String },
}

impl PlotError {
    /// the file or directory the error refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            PlotError::ReadDir { path, .. }
            | PlotError::CreateDir { path, .. }
            | PlotError::Csv { path, .. }
            | PlotError::MissingColumn { path, .. }
            | PlotError::Datetime { path, .. }
            | PlotError::Number { path, .. }
            | PlotError::Render { path, .. } => path,
        }
    }
}
