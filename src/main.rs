use clap::{ArgAction, Parser};
use log::info;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use token_table::logger::initialize_logger;
use token_table::{load_file, LookupMode, Report, TableConfig, TokenTable, DEFAULT_SLOTS};

/// Index a file of tokens (one per line), write a slot report and answer
/// membership queries.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File with one token per line. Prompts on stdin when absent.
    input: Option<PathBuf>,

    /// Number of slots in the table
    #[arg(short, long, default_value_t = DEFAULT_SLOTS)]
    slots: usize,

    /// Do not follow redirects to tokens that were placed by probing
    #[arg(long)]
    faithful: bool,

    /// Where to write the slot report
    #[arg(short, long, default_value = "output.txt")]
    report: PathBuf,

    /// Token to look up; repeatable. Prompts on stdin when absent.
    #[arg(short, long)]
    query: Vec<String>,

    /// Log relocations (-v) and every probe step (-vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    initialize_logger(args.verbose);
    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let lookup = if args.faithful {
        LookupMode::Faithful
    } else {
        LookupMode::Redirected
    };
    let config = TableConfig::new().with_slots(args.slots).with_lookup(lookup);
    let mut table = TokenTable::with_config(config)?;

    let input = match args.input {
        Some(path) => path,
        None => prompt_input_file()?,
    };
    let summary = load_file(&mut table, &input)?;
    println!(
        "Indexed {} token(s) into {} slots ({} duplicate(s) skipped).",
        summary.inserted,
        table.capacity(),
        summary.duplicates.len()
    );

    let report = Report::from_table(&table);
    report.write_to(BufWriter::new(File::create(&args.report)?))?;
    info!("report written to {}", args.report.display());

    let queries = if args.query.is_empty() {
        prompt_word("Enter a search item:")?.into_iter().collect()
    } else {
        args.query
    };
    for q in queries {
        println!("Found {} occurrence(s) of {}.", table.count(&q), q);
    }
    Ok(())
}

fn prompt_input_file() -> io::Result<PathBuf> {
    prompt_word("Please type the name of the file you want hashed:")?
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no input file given"))
}

/// Print `prompt` and read the first word of the next stdin line.
fn prompt_word(prompt: &str) -> io::Result<Option<String>> {
    println!("{prompt}");
    io::stdout().flush()?;
    first_word(io::stdin().lock())
}

fn first_word<R: BufRead>(mut reader: R) -> io::Result<Option<String>> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.split_whitespace().next().map(str::to_owned))
}
