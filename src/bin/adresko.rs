use adresko::{AbbreviationDictionary, LabelFormat, Sender};
use adresko::{abbrev, import, pdf, sheets, storage};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "adresko",
    version,
    about = "Import class lists, check & abbreviate addresses, print label sheets"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the predefined label formats.
    Formats,
    /// Import a class list and print the recipients found in it.
    Import(ImportArgs),
    /// Check which addresses fit the chosen label format.
    Check(CheckArgs),
    /// Generate a PDF sheet of address labels.
    Labels(LabelArgs),
    /// Generate postal submission sheets as XLSX workbooks.
    Sheets(SheetArgs),
    /// Manage the abbreviation dictionary.
    Abbrev(AbbrevArgs),
    /// Import a class list and save the recipients as CSV or JSON.
    Export(ExportArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ImportArgs {
    /// Class list file (.csv, .xls or .xlsx).
    input: PathBuf,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Class list file (.csv, .xls or .xlsx).
    input: PathBuf,
    /// Label format number as listed by `formats` (1-based).
    #[arg(short, long, default_value_t = 1)]
    format: usize,
    /// Abbreviation dictionary file.
    #[arg(long)]
    dict: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct LabelArgs {
    /// Class list file (.csv, .xls or .xlsx).
    input: PathBuf,
    /// Label format number as listed by `formats` (1-based).
    #[arg(short, long, default_value_t = 1)]
    format: usize,
    /// Output PDF path. Defaults to a timestamped file in the output dir.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Abbreviate addresses that exceed the format's length budget.
    #[arg(long, default_value_t = false)]
    abbreviate: bool,
    /// Drop trailing address segments that still exceed the budget (lossy).
    #[arg(long, default_value_t = false)]
    shorten: bool,
    /// Abbreviation dictionary file.
    #[arg(long)]
    dict: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SheetArgs {
    /// Class list file (.csv, .xls or .xlsx).
    input: PathBuf,
    /// Sender name printed on every sheet.
    #[arg(long)]
    sender_name: String,
    /// Sender street and number.
    #[arg(long)]
    sender_street: String,
    /// Sender ZIP and city.
    #[arg(long)]
    sender_city: String,
    /// Output directory. Defaults to ~/Documents/AdreskoBox.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct AbbrevArgs {
    /// Abbreviation dictionary file.
    #[arg(long)]
    dict: Option<PathBuf>,
    #[command(subcommand)]
    cmd: AbbrevCommand,
}

#[derive(Subcommand, Debug)]
enum AbbrevCommand {
    /// Print all dictionary entries.
    List,
    /// Add or replace an entry.
    Add { original: String, abbreviation: String },
    /// Remove an entry.
    Remove { original: String },
    /// Apply the dictionary to a single address and print the result.
    Apply { address: String },
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Class list file (.csv, .xls or .xlsx).
    input: PathBuf,
    /// Output file.
    #[arg(long)]
    out: PathBuf,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Formats => cmd_formats(),
        Command::Import(args) => cmd_import(args),
        Command::Check(args) => cmd_check(args),
        Command::Labels(args) => cmd_labels(args),
        Command::Sheets(args) => cmd_sheets(args),
        Command::Abbrev(args) => cmd_abbrev(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn pick_format(index: usize) -> Result<LabelFormat> {
    let mut formats = LabelFormat::predefined();
    if index == 0 || index > formats.len() {
        anyhow::bail!(
            "no such format: {} (run `adresko formats` for the list)",
            index
        );
    }
    Ok(formats.remove(index - 1))
}

fn load_dictionary(path: Option<PathBuf>) -> AbbreviationDictionary {
    match path {
        Some(p) => AbbreviationDictionary::load(p),
        None => AbbreviationDictionary::load_default(),
    }
}

fn cmd_formats() -> Result<()> {
    for (i, f) in LabelFormat::predefined().iter().enumerate() {
        println!(
            "{}. {}  {}x{} mm, {}x{} grid, {} per page, max {} chars{}",
            i + 1,
            f.name,
            f.width,
            f.height,
            f.columns,
            f.rows,
            f.labels_per_page(),
            f.max_address_len,
            if f.fits_on_a4() { "" } else { "  (exceeds A4)" }
        );
    }
    Ok(())
}

fn cmd_import(args: ImportArgs) -> Result<()> {
    let recipients = import::read_recipients(&args.input)?;
    for r in &recipients {
        println!("{}; {}", r.full_name(), r.full_address());
    }
    eprintln!("{} recipients", recipients.len());
    Ok(())
}

fn cmd_check(args: CheckArgs) -> Result<()> {
    let recipients = import::read_recipients(&args.input)?;
    let format = pick_format(args.format)?;
    let dict = load_dictionary(args.dict);

    let reviews = abbrev::review_addresses(&recipients, &format, &dict);
    let mut misfits = 0usize;
    for review in &reviews {
        if !review.fits {
            misfits += 1;
        }
        if review.abbreviated_address != review.original_address {
            println!(
                "{}; {} -> {}; {}",
                review.name,
                review.original_address,
                review.abbreviated_address,
                review.status()
            );
        } else {
            println!("{}; {}; {}", review.name, review.original_address, review.status());
        }
    }
    eprintln!(
        "{} of {} addresses exceed {} characters",
        misfits,
        reviews.len(),
        format.max_address_len
    );
    Ok(())
}

fn cmd_labels(args: LabelArgs) -> Result<()> {
    let mut recipients = import::read_recipients(&args.input)?;
    let format = pick_format(args.format)?;

    if args.abbreviate {
        let dict = load_dictionary(args.dict);
        let max_len = format.max_address_len;
        for r in &mut recipients {
            let mut address = dict.best_abbreviation(&r.full_address(), max_len);
            if args.shorten {
                address = abbrev::shorten_if_needed(&address, max_len);
            }
            r.set_address(&address);
        }
    }

    let out = match args.out {
        Some(path) => path,
        None => {
            let dir = storage::default_output_dir();
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("create {}", dir.display()))?;
            dir.join(pdf::default_labels_filename())
        }
    };

    pdf::generate_labels(&recipients, &format, &out)?;
    eprintln!(
        "Wrote {} labels on {} page(s) to {}",
        recipients.len(),
        pdf::page_count(recipients.len(), &format),
        out.display()
    );
    Ok(())
}

fn cmd_sheets(args: SheetArgs) -> Result<()> {
    let recipients = import::read_recipients(&args.input)?;
    let sender = Sender {
        name: args.sender_name,
        street: args.sender_street,
        city: args.sender_city,
    };
    let out_dir = args.out_dir.unwrap_or_else(storage::default_output_dir);
    let paths = sheets::create_submission_sheets(&recipients, &sender, &out_dir)?;
    for path in &paths {
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}

fn cmd_abbrev(args: AbbrevArgs) -> Result<()> {
    let mut dict = load_dictionary(args.dict);
    match args.cmd {
        AbbrevCommand::List => {
            for (original, abbreviation) in dict.entries() {
                println!("{} = {}", original, abbreviation);
            }
        }
        AbbrevCommand::Add {
            original,
            abbreviation,
        } => {
            dict.insert(&original, &abbreviation);
            eprintln!("{} entries", dict.len());
        }
        AbbrevCommand::Remove { original } => {
            dict.remove(&original);
            eprintln!("{} entries", dict.len());
        }
        AbbrevCommand::Apply { address } => {
            println!("{}", dict.abbreviate(&address));
        }
    }
    Ok(())
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let recipients = import::read_recipients(&args.input)?;
    let fmt = match args.format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => args
            .out
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv"),
    }
    .to_ascii_lowercase();
    match fmt.as_str() {
        "csv" => storage::save_csv(&recipients, &args.out)?,
        "json" => storage::save_json(&recipients, &args.out)?,
        other => anyhow::bail!("unsupported format: {}", other),
    }
    eprintln!("Saved {} recipients to {}", recipients.len(), args.out.display());
    Ok(())
}
