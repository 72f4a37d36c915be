//! Command-line arguments for the `plume` binary

use clap::{value_parser, ArgAction};
use log::LevelFilter;
use std::path::PathBuf;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Parses a plume source file and writes its IR dump")]
pub struct Args {
    #[clap(short = 'v', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    #[clap(short = 'q', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,

    /// Source file to compile
    #[clap(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,
    /// Where to write the IR dump
    #[clap(short = 'd', long = "dump", default_value = "ir.dump.txt")]
    pub dump: PathBuf,
}

impl Args {
    /// Gets the logging level based on whether `-v[v]` or `-q[q]` has been used.
    pub fn log_level_filter(&self) -> LevelFilter {
        let sum = self.verbose as i8 - self.quiet as i8;
        match sum {
            i8::MIN..=-2 => LevelFilter::Off,
            -1 => LevelFilter::Error,
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            2..=i8::MAX => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn test_args_parsing() {
        let args = Args::try_parse_from(["plume", "main.src"]).expect("could not parse test args");

        assert_eq!(args.file, Path::new("main.src"));
        assert_eq!(args.dump, Path::new("ir.dump.txt"));
        assert_eq!(args.log_level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_dump_path_and_verbosity() {
        let args = Args::try_parse_from(["plume", "-vv", "main.src", "--dump", "out/main.txt"])
            .expect("could not parse test args");

        assert_eq!(args.dump, Path::new("out/main.txt"));
        assert_eq!(args.log_level_filter(), LevelFilter::Trace);
    }

    #[test]
    fn test_quiet_levels() {
        let args = Args::try_parse_from(["plume", "-q", "a.src"]).unwrap();
        assert_eq!(args.log_level_filter(), LevelFilter::Error);

        let args = Args::try_parse_from(["plume", "-qq", "a.src"]).unwrap();
        assert_eq!(args.log_level_filter(), LevelFilter::Off);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Args::try_parse_from(["plume", "-v", "-q", "a.src"]).is_err());
    }

    #[test]
    fn test_file_is_required() {
        assert!(Args::try_parse_from(["plume"]).is_err());
    }
}
