//! Command-line arguments of the terminal host.

use std::path::PathBuf;

use clap::Parser;

use arshooter_core::constants::DEFAULT_SEED;

/// AR shooter in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON file overriding game settings
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// RNG seed for target placement
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["arshooter"]).unwrap();
        assert!(args.config.is_none());
        assert!(!args.verbose);
        assert_eq!(args.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_config_path_and_flags() {
        let args =
            Args::try_parse_from(["arshooter", "-v", "--seed", "9", "tuning.json"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("tuning.json")));
        assert!(args.verbose);
        assert_eq!(args.seed, 9);
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        assert!(Args::try_parse_from(["arshooter", "--foo"]).is_err());
    }
}
