//! pont - text-model transfer inspector

use std::process::ExitCode;

use clap::Parser;

use pont::format::PlainTextPlugin;
use pont::{BookModelSnapshot, BookSnapshot, Bridge};

#[derive(Parser)]
#[command(name = "pont")]
#[command(version, about = "Text-model transfer bridge inspector", long_about = None)]
#[command(after_help = "EXAMPLES:
    pont book.txt               Transfer the text model and dump it as JSON
    pont -i book.txt            Show book metadata
    pont -c cache book.txt      Page model text to block files under cache/")]
struct Cli {
    /// Input file
    #[arg(value_name = "INPUT")]
    input: std::path::PathBuf,

    /// Show book metadata without transferring the model
    #[arg(short, long)]
    info: bool,

    /// Directory for paged model blocks (in-memory storage if omitted)
    #[arg(short, long, value_name = "DIR")]
    cache: Option<std::path::PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("error: cannot read {} as a known format", cli.input.display());
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> pont::Result<bool> {
    let mut bridge = match &cli.cache {
        Some(dir) => Bridge::new(dir),
        None => Bridge::in_memory(),
    };
    let handle = bridge.register(Box::new(PlainTextPlugin::new()));

    if !bridge.accepts_file(handle, &cli.input)? {
        return Ok(false);
    }

    let mut record = BookModelSnapshot::default();
    if !bridge.read_meta_info(handle, &cli.input, &mut record.book)? {
        return Ok(false);
    }

    if cli.info {
        print_info(&record.book);
        return Ok(true);
    }

    if !bridge.read_model(handle, &cli.input, &mut record)? {
        return Ok(false);
    }
    let json = serde_json::to_string_pretty(&record).map_err(std::io::Error::other)?;
    println!("{json}");
    Ok(true)
}

fn print_info(book: &BookSnapshot) {
    println!("Title:    {}", book.title.as_deref().unwrap_or("(none)"));
    println!("Language: {}", book.language.as_deref().unwrap_or("(none)"));
    println!("Encoding: {}", book.encoding.as_deref().unwrap_or("(none)"));
    match &book.series {
        Some(series) => println!("Series:   {} #{}", series.title, series.index),
        None => println!("Series:   (none)"),
    }
    for author in &book.authors {
        println!("Author:   {} [{}]", author.name, author.sort_key);
    }
    for tag in &book.tags {
        println!("Tag:      {tag}");
    }
}
