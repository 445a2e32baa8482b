//! The batch plot generator: one chart per qualifying csv file of a directory.
//!
//! The run is a single pass over the sorted listing of the input directory.
//! By default the first failing file aborts the run, the charts already
//! written stay on disk. With `keep_going` the failures are collected
//! in the [`BatchReport`] instead.

use super::chart::{ChartLabels, ImageFormat};
use super::{
    PlotError, TimeSeries, INPUT_SUFFIX, OUTPUT_SUBDIR, POLLUTANT, TIME_COLUMN, VALUE_COLUMN,
};
use log::{debug, error, info};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub suffix: String,
    pub time_column: String,
    pub value_column: String,
    pub pollutant: String,
    pub format: ImageFormat,
    pub keep_going: bool,
}

impl BatchConfig {
    /// default settings for the HERMES NO2 exports, charts go to `<input_dir>/plots`
    pub fn new<P: Into<PathBuf>>(input_dir: P) -> BatchConfig {
        let input_dir = input_dir.into();
        let output_dir = input_dir.join(OUTPUT_SUBDIR);
        BatchConfig {
            input_dir,
            output_dir,
            suffix: String::from(INPUT_SUFFIX),
            time_column: String::from(TIME_COLUMN),
            value_column: String::from(VALUE_COLUMN),
            pollutant: String::from(POLLUTANT),
            format: ImageFormat::default(),
            keep_going: false,
        }
    }
}

#[derive(Debug)]
pub struct BatchReport {
    pub output_dir: PathBuf,
    pub plotted: Vec<PathBuf>,
    pub failed: Vec<PlotError>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// the site is the file name without the suffix, None for other files
pub fn site_name<'a>(file_name: &'a str, suffix: &str) -> Option<&'a str> {
    file_name.strip_suffix(suffix)
}

pub fn output_file_name(site: &str, pollutant: &str, format: ImageFormat) -> String {
    format!("{}_{}_timeseries.{}", site, pollutant, format.extension())
}

/// lists the files of input_dir (not recursive) ending with suffix, sorted by name;
/// directories never qualify
pub fn qualifying_files(input_dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, PlotError> {
    let read_dir_err = |source| PlotError::ReadDir {
        path: input_dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(input_dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let file_name = entry.file_name();
        if entry.path().is_dir() {
            debug!("skipping directory {:?}", file_name);
            continue;
        }
        match file_name.to_str() {
            Some(name) if site_name(name, suffix).is_some() => files.push(entry.path()),
            Some(name) => debug!("skipping {}", name),
            None => debug!("skipping non utf-8 name {:?}", file_name),
        }
    }
    files.sort();
    Ok(files)
}

/// loads one csv and writes its chart to the output directory, returns the chart path
pub fn plot_file(fin: &Path, config: &BatchConfig) -> Result<PathBuf, PlotError> {
    let file_name = fin
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let site = site_name(file_name, &config.suffix).unwrap_or(file_name);
    let ts = TimeSeries::from_csv(fin, &config.time_column, &config.value_column)?;
    debug!("{}: {}", site, ts.summary());

    let fout = config
        .output_dir
        .join(output_file_name(site, &config.pollutant, config.format));
    let labels = ChartLabels::for_site(site, &config.pollutant);
    ts.plot_datetime(&fout, &labels, config.format)
        .map_err(|e| PlotError::Render {
            path: fout.clone(),
            message: e.to_string(),
        })?;
    info!("plotted {} to {}", site, fout.display());
    Ok(fout)
}

/// Plots every qualifying file of the input directory.
/// The input directory is listed before the output directory is created,
/// so a missing input leaves the filesystem untouched.
pub fn run(config: &BatchConfig) -> Result<BatchReport, PlotError> {
    let files = qualifying_files(&config.input_dir, &config.suffix)?;
    std::fs::create_dir_all(&config.output_dir).map_err(|source| PlotError::CreateDir {
        path: config.output_dir.clone(),
        source,
    })?;
    info!(
        "{} file(s) to plot from {}",
        files.len(),
        config.input_dir.display()
    );

    let mut report = BatchReport {
        output_dir: config.output_dir.clone(),
        plotted: Vec::with_capacity(files.len()),
        failed: Vec::new(),
    };
    for fin in files.iter() {
        match plot_file(fin, config) {
            Ok(fout) => report.plotted.push(fout),
            Err(e) if config.keep_going => {
                error!("{}", e);
                report.failed.push(e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(report)
}
