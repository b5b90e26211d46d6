use clap::Parser;
use colored::*;
use std::path::PathBuf;
use tiddlyfolio::api::{
    configure, AddRequest, CmdMessage, CmdResult, ConfigAction, MessageLevel, TagsInput, TiddlyApi,
};
use tiddlyfolio::config::FolioConfig;
use tiddlyfolio::error::{Result, TiddlyError};
use tiddlyfolio::model::TiddlerKind;
use tiddlyfolio::store::fs::FileStore;
use tiddlyfolio::tags::strip_brackets;

mod args;
use args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<FolioConfig> {
    match path.or_else(FolioConfig::default_path) {
        Some(path) => FolioConfig::load(path),
        None => Ok(FolioConfig::default()),
    }
}

fn handle_config(path: Option<PathBuf>, key: Option<String>, value: Option<String>) -> Result<()> {
    let path = path.or_else(FolioConfig::default_path).ok_or_else(|| {
        TiddlyError::InvalidRequest("no config directory; pass --config".into())
    })?;
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = configure(&path, action)?;
    if let Some(config) = &result.config {
        println!("{}", format!("# {}", path.display()).dimmed());
        for key in ["image-width", "tiddler-type"] {
            println!("{} = {}", key, config.get(key).unwrap_or_default());
        }
    }
    print_messages(&result.messages);

    if result.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

fn open(input: PathBuf, output: Option<PathBuf>, config: FolioConfig) -> TiddlyApi<FileStore> {
    TiddlyApi::new(FileStore::new(input).with_output(output), config)
}

fn run(cli: Cli) -> Result<()> {
    let config = || load_config(cli.config.clone());

    match cli.command {
        Commands::Add {
            input,
            title,
            output,
            images,
            description,
            tags,
            no_replace,
        } => {
            let request = AddRequest::new(title)
                .with_images(images)
                .with_description(description)
                .with_tags(TagsInput::Joined(tags))
                .with_replace(!no_replace);
            let result = open(input, output, config()?).add_tiddler(&request)?;
            print_messages(&result.messages);
        }
        Commands::List { input, tag, all } => {
            let result = open(input, None, config()?).list_tiddlers(tag.as_deref(), all)?;
            print_listing(&result);
            print_messages(&result.messages);
        }
        Commands::Tags {
            input,
            output,
            rebuild,
        } => {
            let result = open(input, output, config()?).tags(rebuild)?;
            for tag in &result.tags {
                println!("{}", strip_brackets(tag));
            }
            print_messages(&result.messages);
        }
        Commands::Config { key, value } => handle_config(cli.config.clone(), key, value)?,
    }

    Ok(())
}

fn print_listing(result: &CmdResult) {
    let width = result
        .listed_tiddlers
        .iter()
        .map(|t| t.title.chars().count())
        .max()
        .unwrap_or(0);

    for tiddler in &result.listed_tiddlers {
        let created = tiddler.created.as_deref().unwrap_or("-");
        let title = format!("{:<width$}", tiddler.title, width = width);
        let title = match tiddler.kind {
            TiddlerKind::System => title.dimmed(),
            TiddlerKind::User => title.normal(),
        };
        let tags: Vec<&str> = tiddler.tags.iter().map(|t| strip_brackets(t)).collect();
        println!("{}  {}  {}", created.dimmed(), title, tags.join(", ").cyan());
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}
