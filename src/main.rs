use std::io::Write;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{AddArgs, Cli, Command, GetArgs, SearchArgs};
use findex::{
    DataDir, Error, Index, IndexEntry, IndexOptions, Strategy, error,
};

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("FINDEX_LOG") {
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

    if let Command::Completions(args) = &cli.command {
        args.generate();
        return Ok(());
    }

    let data_dir = DataDir::resolve(cli.data_dir.as_deref())?;
    let options = IndexOptions {
        strategy: if cli.inverted {
            Strategy::Inverted
        } else {
            Strategy::Linear
        },
        compression: cli.compress,
    };
    let mut index = Index::open(data_dir.root(), options)?;

    match cli.command {
        Command::Add(args) => cmd_add(&mut index, &args)?,
        Command::Search(args) => cmd_search(&index, &args)?,
        Command::Get(args) => cmd_get(&index, &args)?,
        Command::Status(args) => cmd_status(&index, &data_dir, args.json)?,
        Command::Completions(_) => unreachable!(),
    }

    index.close()
}

fn cmd_add(index: &mut Index, args: &AddArgs) -> error::Result<()> {
    let filename = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| {
            Error::Config(format!("not a file path: {}", args.file.display()))
        })?;

    let content = if args.reference_only {
        Vec::new()
    } else {
        std::fs::read(&args.file)?
    };

    match index.add_entry(&filename, &args.keywords, &content, &args.extra) {
        Ok(entry) => {
            if args.json {
                println!("{}", serde_json::to_string(&entry)?);
            } else {
                println!("Indexed {} as {}", entry.filename, entry.entry_id);
            }
        }
        Err(Error::AlreadyExists { id }) => {
            println!("Already indexed: {id}");
        }
        Err(other) => return Err(other),
    }
    Ok(())
}

fn cmd_search(index: &Index, args: &SearchArgs) -> error::Result<()> {
    let results = index.search(&args.query)?;

    if args.json {
        println!("{}", serde_json::to_string(&results)?);
    } else if results.is_empty() {
        println!("No matches.");
    } else {
        for entry in &results {
            print_entry(entry);
        }
    }
    Ok(())
}

fn print_entry(entry: &IndexEntry) {
    print!(
        "{}  {}  {}  [{}]",
        entry.entry_type.code(),
        entry.entry_id,
        entry.filename,
        entry.keywords
    );
    if entry.extra.is_empty() {
        println!();
    } else {
        println!("  ({})", entry.extra);
    }
}

fn cmd_get(index: &Index, args: &GetArgs) -> error::Result<()> {
    let content = index.get_file(&args.entry_id)?;

    match &args.output {
        Some(path) => std::fs::write(path, &content)?,
        None => std::io::stdout().write_all(&content)?,
    }
    Ok(())
}

fn cmd_status(
    index: &Index,
    data_dir: &DataDir,
    json: bool,
) -> error::Result<()> {
    if json {
        let status = serde_json::json!({
            "data_dir": data_dir.root().display().to_string(),
            "strategy": index.strategy().to_string(),
            "entries": index.entry_count(),
        });
        println!("{status}");
    } else {
        println!("Data directory: {}", data_dir.root().display());
        println!("Strategy: {}", index.strategy());
        println!("Entries: {}", index.entry_count());
    }
    Ok(())
}
