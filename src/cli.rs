use super::{png_path, DEFAULT_DIRPATH, VERSION};
use clap::{App, Arg};
use std::path::PathBuf;

/// Takes the data directory from the CLI and returns the paths of
/// the input csv (csv_name inside the directory) and of the output png next to it.
pub fn parse_cli(name: &str, about: &str, csv_name: &str) -> (PathBuf, PathBuf) {
    let arg_dirpath = Arg::with_name("dirpath")
        .help("directory with the simulator csv output, the png is written there too")
        .index(1)
        .takes_value(true)
        .default_value(DEFAULT_DIRPATH);
    let cli_args = App::new(name)
        .version(VERSION.unwrap_or("unknown"))
        .about(about)
        .arg(arg_dirpath)
        .get_matches();
    let dirpath = PathBuf::from(cli_args.value_of("dirpath").unwrap_or(DEFAULT_DIRPATH));
    io_paths(dirpath, csv_name)
}

/// csv and png paths for a data directory
pub fn io_paths(dirpath: PathBuf, csv_name: &str) -> (PathBuf, PathBuf) {
    let csvin = dirpath.join(csv_name);
    let pngout = png_path(&csvin);
    (csvin, pngout)
}
