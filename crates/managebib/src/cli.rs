//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use managebib::{FormatOptions, OutputTarget, SortOrder};

/// BibTeX operations CLI.
#[derive(Parser, Debug)]
#[command(name = "managebib")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Format all entries (sort lexicographically by citation key).
    Format(FormatArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct FormatArgs {
    /// Path to input .bib file
    pub bibfile: PathBuf,

    /// Write result to this file (default: stdout)
    #[arg(short, long, value_name = "OUT", conflicts_with = "in_place")]
    pub out: Option<PathBuf>,

    /// Overwrite the input file in place
    #[arg(short, long)]
    pub in_place: bool,

    /// Use case-sensitive sort (default: case-insensitive)
    #[arg(long)]
    pub case_sensitive: bool,
}

impl FormatArgs {
    pub fn into_options(self) -> FormatOptions {
        let target = match (self.out, self.in_place) {
            (_, true) => OutputTarget::InPlace,
            (Some(path), false) => OutputTarget::File(path),
            (None, false) => OutputTarget::Stdout,
        };

        FormatOptions::new(self.bibfile)
            .with_target(target)
            .with_order(SortOrder::from_case_insensitive(!self.case_sensitive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    fn format_options(args: &[&str]) -> FormatOptions {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Some(Commands::Format(args)) => args.into_options(),
            None => panic!("expected format command"),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_format_defaults() {
        let options = format_options(&["managebib", "format", "refs.bib"]);
        assert_eq!(options.bibfile, PathBuf::from("refs.bib"));
        assert_eq!(options.target, OutputTarget::Stdout);
        assert_eq!(options.order, SortOrder::CaseInsensitive);
    }

    #[test]
    fn test_format_out_and_case_sensitive() {
        let options = format_options(&[
            "managebib",
            "format",
            "refs.bib",
            "-o",
            "sorted.bib",
            "--case-sensitive",
        ]);
        assert_eq!(options.target, OutputTarget::File(PathBuf::from("sorted.bib")));
        assert_eq!(options.order, SortOrder::CaseSensitive);

        let options = format_options(&["managebib", "format", "refs.bib", "--out=x.bib"]);
        assert_eq!(options.target, OutputTarget::File(PathBuf::from("x.bib")));
    }

    #[test]
    fn test_format_in_place() {
        let options = format_options(&["managebib", "format", "-i", "refs.bib"]);
        assert_eq!(options.target, OutputTarget::InPlace);
    }

    #[test]
    fn test_out_conflicts_with_in_place() {
        let err = Cli::try_parse_from(["managebib", "format", "refs.bib", "-o", "x.bib", "-i"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_bibfile_is_required() {
        let err = Cli::try_parse_from(["managebib", "format"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["managebib", "-vv"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 2);
    }
}
