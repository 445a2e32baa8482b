use super::batch::BatchConfig;
use super::{INPUT_SUFFIX, POLLUTANT, TIME_COLUMN, VALUE_COLUMN, VERSION};
use clap::{App, Arg};
use std::ffi::OsString;
use std::path::PathBuf;

/// Takes the CLI arguments that control the batch plotting,
/// exits with the usage message on invalid arguments.
/// Returns the batch settings and the verbose flag.
pub fn parse_cli() -> (BatchConfig, bool) {
    parse_cli_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
}

pub fn parse_cli_from<I, T>(args: I) -> Result<(BatchConfig, bool), clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let arg_input = Arg::with_name("input_dir")
        .help("directory with the per-site csv files")
        .short("i")
        .long("input")
        .takes_value(true)
        .required(true);
    let arg_output = Arg::with_name("output_dir")
        .help("directory for the charts, default <input>/plots")
        .short("o")
        .long("output")
        .takes_value(true);
    let arg_suffix = Arg::with_name("suffix")
        .help("only the files ending with this suffix are plotted")
        .long("suffix")
        .takes_value(true)
        .default_value(INPUT_SUFFIX);
    let arg_time = Arg::with_name("time_column")
        .help("name of the datetime column")
        .long("time-column")
        .takes_value(true)
        .default_value(TIME_COLUMN);
    let arg_value = Arg::with_name("value_column")
        .help("name of the emission column to plot")
        .long("value-column")
        .takes_value(true)
        .default_value(VALUE_COLUMN);
    let arg_pollutant = Arg::with_name("pollutant")
        .help("pollutant name for the labels and the chart file names")
        .long("pollutant")
        .takes_value(true)
        .default_value(POLLUTANT);
    let arg_format = Arg::with_name("format")
        .help("image format of the charts")
        .short("f")
        .long("format")
        .takes_value(true)
        .possible_values(&["png", "svg"])
        .default_value("png");
    let arg_keep_going = Arg::with_name("keep_going")
        .help("report the files that cannot be plotted and continue with the others")
        .short("k")
        .long("keep-going")
        .takes_value(false);
    let arg_verbose = Arg::with_name("verbose")
        .help("print verbose information")
        .short("v")
        .long("verbose")
        .takes_value(false);
    let cli_args = App::new("hermes_plot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to plot the per-site emission time series of a directory")
        .arg(arg_input)
        .arg(arg_output)
        .arg(arg_suffix)
        .arg(arg_time)
        .arg(arg_value)
        .arg(arg_pollutant)
        .arg(arg_format)
        .arg(arg_keep_going)
        .arg(arg_verbose)
        .get_matches_from_safe(args)?;

    let mut config = BatchConfig::new(cli_args.value_of("input_dir").unwrap_or_default());
    if let Some(p) = cli_args.value_of("output_dir") {
        config.output_dir = PathBuf::from(p);
    }
    config.suffix = String::from(cli_args.value_of("suffix").unwrap_or(INPUT_SUFFIX));
    config.time_column = String::from(cli_args.value_of("time_column").unwrap_or(TIME_COLUMN));
    config.value_column = String::from(cli_args.value_of("value_column").unwrap_or(VALUE_COLUMN));
    config.pollutant = String::from(cli_args.value_of("pollutant").unwrap_or(POLLUTANT));
    config.format = cli_args
        .value_of("format")
        .unwrap_or_default()
        .parse()
        .unwrap_or_default();
    config.keep_going = cli_args.is_present("keep_going");
    let verbose = cli_args.is_present("verbose");
    Ok((config, verbose))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ImageFormat;

    #[test]
    fn defaults_match_the_hermes_exports() {
        let (config, verbose) = parse_cli_from(vec!["hermes_plot", "-i", "CSV_2021_TOP"]).unwrap();
        assert_eq!(config, BatchConfig::new("CSV_2021_TOP"));
        assert_eq!(config.output_dir, PathBuf::from("CSV_2021_TOP").join("plots"));
        assert!(!verbose);
    }

    #[test]
    fn all_options_are_applied() {
        let (config, verbose) = parse_cli_from(vec![
            "hermes_plot",
            "--input",
            "in",
            "--output",
            "out",
            "--suffix",
            "_so2.csv",
            "--time-column",
            "date",
            "--value-column",
            "SO2_Ktyear",
            "--pollutant",
            "SO2",
            "--format",
            "svg",
            "--keep-going",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.input_dir, PathBuf::from("in"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.suffix, "_so2.csv");
        assert_eq!(config.time_column, "date");
        assert_eq!(config.value_column, "SO2_Ktyear");
        assert_eq!(config.pollutant, "SO2");
        assert_eq!(config.format, ImageFormat::Svg);
        assert!(config.keep_going);
        assert!(verbose);
    }

    #[test]
    fn input_is_required_and_format_is_checked() {
        assert!(parse_cli_from(vec!["hermes_plot"]).is_err());
        assert!(parse_cli_from(vec!["hermes_plot", "-i", "in", "-f", "jpg"]).is_err());
    }
}
