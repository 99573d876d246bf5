use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Reconstruct reading-order plain text from page layout JSON.
#[derive(Debug, Parser)]
#[command(name = "pagetext", about, version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract reading-order text from every page
    Text(TextArgs),

    /// Display page and layout element counts
    Info {
        /// Path to the layout JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = TextFormat::Text)]
        format: TextFormat,
    },
}

/// Arguments of the `text` subcommand.
#[derive(Debug, Args)]
pub struct TextArgs {
    /// Path to the layout JSON file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output path; '-' writes to stdout. Default: FILE with '.txt' appended
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Page range (e.g. '1,3-5'). Default: all pages
    #[arg(long)]
    pub pages: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = TextFormat::Text)]
    pub format: TextFormat,

    /// Output encoding label (e.g. 'utf-8', 'cp1252'); unencodable characters are dropped
    #[arg(long, default_value = "utf-8")]
    pub encoding: String,

    /// Apply Unicode normalization to span text
    #[arg(long, value_enum)]
    pub unicode_norm: Option<UnicodeNormArg>,

    /// Expand Latin ligatures (U+FB00-U+FB06) to plain letters
    #[arg(long)]
    pub expand_ligatures: bool,

    /// How adjacent spans are joined
    #[arg(long, value_enum, default_value_t = JoinArg::EnsureSpace)]
    pub join: JoinArg,

    /// What to do with a page that cannot be rendered
    #[arg(long, value_enum, default_value_t = OnErrorArg::Abort)]
    pub on_error: OnErrorArg,

    /// Treat layout repairs (missing or malformed bboxes) as page errors
    #[arg(long)]
    pub strict: bool,

    /// Process pages in parallel (requires the 'parallel' feature)
    #[arg(long)]
    pub parallel: bool,
}

/// Output format for text/info subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TextFormat {
    /// Plain text output
    Text,
    /// JSON output, one object per page
    Json,
}

/// Unicode normalization form for the --unicode-norm flag.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnicodeNormArg {
    /// Canonical Decomposition, followed by Canonical Composition
    Nfc,
    /// Canonical Decomposition
    Nfd,
    /// Compatibility Decomposition, followed by Canonical Composition
    Nfkc,
    /// Compatibility Decomposition
    Nfkd,
}

impl UnicodeNormArg {
    /// Convert to the core library's `UnicodeNorm` enum.
    pub fn to_unicode_norm(self) -> pagetext::UnicodeNorm {
        match self {
            UnicodeNormArg::Nfc => pagetext::UnicodeNorm::Nfc,
            UnicodeNormArg::Nfd => pagetext::UnicodeNorm::Nfd,
            UnicodeNormArg::Nfkc => pagetext::UnicodeNorm::Nfkc,
            UnicodeNormArg::Nfkd => pagetext::UnicodeNorm::Nfkd,
        }
    }
}

/// Span join policy for the --join flag.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum JoinArg {
    /// Insert one space between spans unless whitespace is already there
    EnsureSpace,
    /// Append spans with no separator
    Concatenate,
}

impl JoinArg {
    pub fn to_join_policy(self) -> pagetext::JoinPolicy {
        match self {
            JoinArg::EnsureSpace => pagetext::JoinPolicy::EnsureSpace,
            JoinArg::Concatenate => pagetext::JoinPolicy::Concatenate,
        }
    }
}

/// Page failure handling for the --on-error flag.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OnErrorArg {
    /// Stop and exit with an error
    Abort,
    /// Leave the page out of the output
    Skip,
    /// Emit empty text for the page
    Empty,
}

impl OnErrorArg {
    pub fn to_policy(self) -> pagetext::PageErrorPolicy {
        match self {
            OnErrorArg::Abort => pagetext::PageErrorPolicy::Abort,
            OnErrorArg::Skip => pagetext::PageErrorPolicy::Skip,
            OnErrorArg::Empty => pagetext::PageErrorPolicy::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_args(argv: &[&str]) -> TextArgs {
        let mut full = vec!["pagetext", "text"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Text(args) => args,
            other => panic!("expected Text subcommand, got {other:?}"),
        }
    }

    #[test]
    fn parse_text_defaults() {
        let args = text_args(&["doc.json"]);
        assert_eq!(args.file, PathBuf::from("doc.json"));
        assert!(args.output.is_none());
        assert!(args.pages.is_none());
        assert_eq!(args.format, TextFormat::Text);
        assert_eq!(args.encoding, "utf-8");
        assert!(args.unicode_norm.is_none());
        assert!(!args.expand_ligatures);
        assert!(matches!(args.join, JoinArg::EnsureSpace));
        assert!(matches!(args.on_error, OnErrorArg::Abort));
        assert!(!args.strict);
        assert!(!args.parallel);
    }

    #[test]
    fn parse_text_all_flags() {
        let args = text_args(&[
            "doc.json",
            "-o",
            "-",
            "--pages",
            "1,3-5",
            "--format",
            "json",
            "--encoding",
            "cp1252",
            "--unicode-norm",
            "nfkc",
            "--expand-ligatures",
            "--join",
            "concatenate",
            "--on-error",
            "skip",
            "--strict",
            "--parallel",
        ]);
        assert_eq!(args.output, Some(PathBuf::from("-")));
        assert_eq!(args.pages.as_deref(), Some("1,3-5"));
        assert_eq!(args.format, TextFormat::Json);
        assert_eq!(args.encoding, "cp1252");
        assert!(matches!(args.unicode_norm, Some(UnicodeNormArg::Nfkc)));
        assert!(args.expand_ligatures);
        assert!(matches!(args.join, JoinArg::Concatenate));
        assert!(matches!(args.on_error, OnErrorArg::Skip));
        assert!(args.strict);
        assert!(args.parallel);
    }

    #[test]
    fn parse_verbose_count_is_global() {
        let cli = Cli::parse_from(["pagetext", "text", "doc.json", "-vv"]);
        assert_eq!(cli.verbose, 2);
        let cli = Cli::parse_from(["pagetext", "-v", "info", "doc.json"]);
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn parse_info_with_json_format() {
        let cli = Cli::parse_from(["pagetext", "info", "doc.json", "--format", "json"]);
        match cli.command {
            Commands::Info { ref format, ref file, .. } => {
                assert_eq!(*format, TextFormat::Json);
                assert_eq!(file, &PathBuf::from("doc.json"));
            }
            _ => panic!("expected Info subcommand"),
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Cli::try_parse_from(["pagetext", "text"]).is_err());
    }

    #[test]
    fn invalid_on_error_value() {
        assert!(Cli::try_parse_from(["pagetext", "text", "a.json", "--on-error", "retry"]).is_err());
    }

    #[test]
    fn conversions() {
        assert_eq!(
            UnicodeNormArg::Nfd.to_unicode_norm(),
            pagetext::UnicodeNorm::Nfd
        );
        assert_eq!(
            JoinArg::Concatenate.to_join_policy(),
            pagetext::JoinPolicy::Concatenate
        );
        assert_eq!(
            OnErrorArg::Empty.to_policy(),
            pagetext::PageErrorPolicy::Empty
        );
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
