use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tiddlyfolio")]
#[command(about = "Add figures and notes to a single-file TiddlyWiki", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to config.json in the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// No log output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a figure or note tiddler
    #[command(alias = "a")]
    Add {
        /// Wiki file to read
        #[arg(short, long)]
        input: PathBuf,

        /// Tiddler title
        #[arg(short, long)]
        title: String,

        /// Wiki file to write (defaults to the input file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Image files or glob patterns to embed, in order
        #[arg(long = "image", num_args = 1..)]
        images: Vec<PathBuf>,

        /// Text placed after the images
        #[arg(short, long, default_value = "")]
        description: String,

        /// Comma separated tags (e.g. "plots, run 1")
        #[arg(long, default_value = "")]
        tags: String,

        /// Keep an existing tiddler with this title and add Title-01, Title-02, ...
        #[arg(long)]
        no_replace: bool,
    },

    /// List tiddlers
    #[command(alias = "ls")]
    List {
        /// Wiki file to read
        #[arg(short, long)]
        input: PathBuf,

        /// Only tiddlers with this tag
        #[arg(long)]
        tag: Option<String>,

        /// Include system tiddlers ($:/...)
        #[arg(short, long)]
        all: bool,
    },

    /// Show the tags in use
    Tags {
        /// Wiki file to read
        #[arg(short, long)]
        input: PathBuf,

        /// Wiki file to write when rebuilding (defaults to the input file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rewrite the Tag List tiddler
        #[arg(long)]
        rebuild: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (image-width, tiddler-type)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_add_with_several_images() {
        let cli = Cli::parse_from([
            "tiddlyfolio",
            "add",
            "-i",
            "wiki.html",
            "--title",
            "Run 1",
            "--image",
            "a.png",
            "b.png",
            "--tags",
            "plots, run 1",
            "--no-replace",
        ]);
        match cli.command {
            Commands::Add {
                input,
                images,
                tags,
                no_replace,
                output,
                ..
            } => {
                assert_eq!(input, PathBuf::from("wiki.html"));
                assert_eq!(images, vec![PathBuf::from("a.png"), PathBuf::from("b.png")]);
                assert_eq!(tags, "plots, run 1");
                assert!(no_replace);
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_counts_verbosity() {
        let cli = Cli::parse_from(["tiddlyfolio", "-vv", "tags", "-i", "w.html"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_parses_config_key_and_value() {
        let cli = Cli::parse_from(["tiddlyfolio", "config", "image-width", "800"]);
        match cli.command {
            Commands::Config { key, value } => {
                assert_eq!(key.as_deref(), Some("image-width"));
                assert_eq!(value.as_deref(), Some("800"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["tiddlyfolio", "list"]).is_err());
    }
}
