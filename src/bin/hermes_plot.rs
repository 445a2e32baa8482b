use anyhow::{bail, Result};
use hermes_plot::batch;
use hermes_plot::plot::parse_cli;
use log::{info, warn};

fn main() -> Result<()> {
    let (config, verbose) = parse_cli();
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    info!(
        "plot {} files of {} to {}",
        config.suffix,
        config.input_dir.display(),
        config.output_dir.display()
    );
    let report = batch::run(&config)?;

    if config.keep_going {
        info!(
            "{} chart(s) plotted, {} file(s) failed",
            report.plotted.len(),
            report.failed.len()
        );
        for e in report.failed.iter() {
            warn!("not plotted: {}", e.path().display());
        }
    }
    println!("All plots saved in: {}", report.output_dir.display());
    if !report.is_success() {
        bail!("{} file(s) could not be plotted", report.failed.len());
    }
    Ok(())
}
