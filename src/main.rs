use std::sync::Arc;

use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;
use tupa::{
    Assistant,
    ChatRequest,
    DataDir,
    ProcedureCatalog,
    Reply,
    catalog,
    error,
    format::format_procedure,
    mcp,
};

mod cli;

use cli::{Cli, Command};

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("TUPA_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> error::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Command::Ask(args) => {
            let catalog = load_catalog(cli.data_dir.as_deref())?;
            cmd_ask(catalog, &args)?;
        }
        Command::Titles(args) => {
            let catalog = load_catalog(cli.data_dir.as_deref())?;
            cmd_titles(catalog, args.json)?;
        }
        Command::Parse(args) => {
            cmd_parse(&args)?;
        }
        Command::Status(args) => {
            let data_dir = DataDir::resolve(cli.data_dir.as_deref())?;
            let catalog = ProcedureCatalog::load_dir(data_dir.root());
            cmd_status(&data_dir, &catalog, args.json)?;
        }
        Command::Mcp => {
            let catalog = load_catalog(cli.data_dir.as_deref())?;
            mcp::run_mcp(catalog)?;
        }
        Command::Completions(args) => {
            args.generate();
        }
    }

    Ok(())
}

fn load_catalog(
    explicit: Option<&std::path::Path>,
) -> error::Result<Arc<ProcedureCatalog>> {
    let data_dir = DataDir::resolve(explicit)?;
    Ok(Arc::new(ProcedureCatalog::load_dir(data_dir.root())))
}

fn cmd_ask(
    catalog: Arc<ProcedureCatalog>,
    args: &cli::AskArgs,
) -> error::Result<()> {
    let assistant = Assistant::new(catalog);
    let reply = assistant.chat(&ChatRequest::new(args.message.as_str()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
        return Ok(());
    }

    match reply {
        Reply::Text { response } => println!("{response}"),
        Reply::Suggestions {
            message,
            suggestions,
        } => {
            println!("{message}");
            for title in &suggestions {
                println!("- {title}");
            }
        }
    }
    Ok(())
}

fn cmd_titles(catalog: Arc<ProcedureCatalog>, json: bool) -> error::Result<()> {
    let titles = Assistant::new(catalog).titles();

    if json {
        println!("{}", serde_json::to_string(&titles)?);
    } else if titles.titles.is_empty() {
        println!("No procedures loaded.");
    } else {
        for title in &titles.titles {
            println!("{title}");
        }
    }
    Ok(())
}

fn cmd_parse(args: &cli::ParseArgs) -> error::Result<()> {
    if !args.file.is_file() {
        return Err(error::Error::NotFound {
            kind: "document",
            name: args.file.display().to_string(),
        });
    }

    let record = catalog::read_document(&args.file)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("{}", format_procedure(&record));
    }
    Ok(())
}

fn cmd_status(
    data_dir: &DataDir,
    catalog: &ProcedureCatalog,
    json: bool,
) -> error::Result<()> {
    let titles = catalog.titles().len();
    let untitled = catalog
        .records()
        .iter()
        .filter(|r| r.title.trim().is_empty())
        .count();

    if json {
        let status = json!({
            "data_dir": data_dir.root().display().to_string(),
            "exists": data_dir.exists(),
            "procedures": catalog.len(),
            "titles": titles,
            "untitled": untitled,
            "keys": catalog.key_count(),
        });
        println!("{status}");
    } else {
        println!("Data directory: {}", data_dir.root().display());
        if !data_dir.exists() {
            println!("  (directory does not exist)");
        }
        println!("Procedures: {}", catalog.len());
        println!("Distinct titles: {titles}");
        println!("Untitled documents: {untitled}");
        println!("Lookup keys: {}", catalog.key_count());
    }
    Ok(())
}
