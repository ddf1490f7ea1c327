//! kinterm - kinship-term extraction CLI
//!
//! Locates controlled-vocabulary kinship terms in free text, normalizes
//! each hit to a singular lemma, and classifies how the mention refers:
//! specific ("my mom"), mixed ("your mom"), or generic ("a mom").
//!
//! # Usage
//!
//! ```bash
//! # Extract from a positional argument
//! kinterm "are you close with your mom and dad?"
//!
//! # Machine-readable output
//! kinterm extract -f comments.txt --format jsonl
//!
//! # Pipe from stdin
//! echo "my s/o is great" | kinterm extract
//!
//! # Show the vocabulary
//! kinterm terms
//! ```

use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;
use std::time::Instant;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use is_terminal::IsTerminal;

use kinterm::{Classification, Extractor, Occurrence, TermTable};

// ============================================================================
// CLI Structure
// ============================================================================

/// Kinship-term extraction - locate, normalize, and classify family terms
#[derive(Parser)]
#[command(name = "kinterm")]
#[command(
    author,
    version,
    about = "Locate and classify kinship terms in English text",
    long_about = r#"
kinterm - kinship-term extraction

Scans text for a controlled vocabulary of family relations (mom, dad,
siblings, wife, s/o, ...), folds plural and singular spellings into one
lemma, and labels each mention by its referential context:

  specific : the author's own relative        "my mom", "jill's gf"
  mixed    : someone else's relative          "your mom", "their kids"
  generic  : no particular person             "a mom", "most wives"

EXAMPLES:
  kinterm "are you close with your mom and dad?"
  kinterm extract -f comments.txt --format jsonl
  kinterm extract --terms my_terms.csv -t "my stepmom called"
  kinterm terms --format json
"#
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Text to scan (shorthand for `kinterm extract`)
    #[arg(trailing_var_arg = true)]
    text: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract kinship-term occurrences from text
    #[command(visible_alias = "x")]
    Extract(ExtractArgs),

    /// Show the kinship vocabulary
    #[command(visible_alias = "t")]
    Terms(TermsArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Unified output format selection
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output (default)
    #[default]
    Human,
    /// JSON array of occurrence records
    Json,
    /// JSON lines (one record per line)
    Jsonl,
    /// Tab-separated values
    Tsv,
}

// ============================================================================
// Command Arguments
// ============================================================================

#[derive(Parser)]
struct ExtractArgs {
    /// Input text to process
    #[arg(short, long)]
    text: Option<String>,

    /// Read input from file
    #[arg(short, long, value_name = "PATH")]
    file: Option<String>,

    /// Use a custom term table instead of the built-in vocabulary
    #[arg(long, value_name = "PATH")]
    terms: Option<String>,

    /// Output format
    #[arg(long, default_value = "human")]
    format: OutputFormat,

    /// Occurrence rows only, no summary
    #[arg(short, long)]
    quiet: bool,

    /// Text to scan (same as --text)
    #[arg(trailing_var_arg = true)]
    positional: Vec<String>,
}

#[derive(Parser)]
struct TermsArgs {
    /// Use a custom term table instead of the built-in vocabulary
    #[arg(long, value_name = "PATH")]
    terms: Option<String>,

    /// Output format
    #[arg(long, default_value = "human")]
    format: OutputFormat,
}

// ============================================================================
// Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result: Result<(), String> = match cli.command {
        Some(Commands::Extract(args)) => cmd_extract(args),
        Some(Commands::Terms(args)) => cmd_terms(args),
        Some(Commands::Completions { shell }) => {
            generate(shell, &mut Cli::command(), "kinterm", &mut io::stdout());
            Ok(())
        }
        None => {
            // No subcommand: treat positional args as text to extract
            if cli.text.is_empty() {
                eprintln!("No input provided. Run `kinterm --help` for usage.");
                return ExitCode::FAILURE;
            }
            let text = cli.text.join(" ");
            cmd_extract(ExtractArgs {
                text: Some(text),
                file: None,
                terms: None,
                format: OutputFormat::default(),
                quiet: false,
                positional: vec![],
            })
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", color("31", "error:"), e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_extract(args: ExtractArgs) -> Result<(), String> {
    let table = load_table(args.terms.as_deref())?;
    let extractor = Extractor::from_table(table).map_err(|e| e.to_string())?;
    let text = get_input_text(&args.text, args.file.as_deref(), &args.positional)?;

    let started = Instant::now();
    let found = extractor.extract(&text);
    let elapsed = started.elapsed();

    match args.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&found).unwrap_or_default()
            );
        }
        OutputFormat::Jsonl => {
            for occ in &found {
                println!("{}", serde_json::to_string(occ).unwrap_or_default());
            }
        }
        OutputFormat::Tsv => {
            println!("offset\tlemma\tsurface\tnumber\tcontext\tdeterminer");
            for occ in &found {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    occ.offset,
                    occ.lemma,
                    occ.surface_form,
                    number(occ),
                    occ.specific,
                    occ.determiner
                );
            }
        }
        OutputFormat::Human => {
            if args.quiet {
                for occ in &found {
                    println!(
                        "[{},{})\t{}\t{}\t{}\t{}",
                        occ.offset,
                        occ.offset + occ.len_chars(),
                        occ.lemma,
                        number(occ),
                        occ.specific,
                        occ.determiner
                    );
                }
            } else {
                println!();
                println!(
                    "{} found {} kinship mentions in {:.1}ms",
                    color("32", "ok:"),
                    found.len(),
                    elapsed.as_secs_f64() * 1000.0
                );
                println!();
                if found.is_empty() {
                    println!("  (no kinship terms found)");
                } else {
                    print_occurrences(&found);
                }
                println!();
            }
        }
    }

    Ok(())
}

fn cmd_terms(args: TermsArgs) -> Result<(), String> {
    let table = load_table(args.terms.as_deref())?;

    match args.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(table.entries()).unwrap_or_default()
            );
        }
        OutputFormat::Jsonl => {
            for entry in table.entries() {
                println!("{}", serde_json::to_string(entry).unwrap_or_default());
            }
        }
        OutputFormat::Tsv => {
            println!("term\tlemma\tgroup\tgender_neutral\tmasculine");
            for entry in table.entries() {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    entry.term, entry.lemma, entry.group, entry.gender_neutral, entry.masculine
                );
            }
        }
        OutputFormat::Human => {
            println!();
            println!(
                "{} {} surface forms, {} lemmas, {} groups",
                color("32", "ok:"),
                table.len(),
                table.lemmas().count(),
                table.groups().len()
            );
            println!();
            for (group, lemmas) in table.groups() {
                println!("  {} ({}):", color("36", group), lemmas.len());
                for lemma in lemmas {
                    println!(
                        "    {:<20} plural: {:<20} {}",
                        lemma,
                        table.plural_of(lemma).unwrap_or(lemma),
                        gender(&table, lemma)
                    );
                }
            }
            println!();
        }
    }

    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn load_table(path: Option<&str>) -> Result<TermTable, String> {
    match path {
        Some(p) => {
            TermTable::load(p).map_err(|e| format!("Failed to load term table: {}", e))
        }
        None => Ok(TermTable::builtin().clone()),
    }
}

fn get_input_text(
    text: &Option<String>,
    file: Option<&str>,
    positional: &[String],
) -> Result<String, String> {
    // Check explicit text arg
    if let Some(t) = text {
        return Ok(t.clone());
    }

    // Check file arg
    if let Some(f) = file {
        return fs::read_to_string(f).map_err(|e| format!("Failed to read file: {}: {}", f, e));
    }

    // Check positional args
    if !positional.is_empty() {
        return Ok(positional.join(" "));
    }

    // Try stdin
    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        if !buf.is_empty() {
            return Ok(buf);
        }
    }

    Err("No input text provided. Use -t 'text' or -f file or pipe via stdin".to_string())
}

fn print_occurrences(found: &[Occurrence]) {
    for class in [
        Classification::Specific,
        Classification::Mixed,
        Classification::Generic,
    ] {
        let group: Vec<&Occurrence> = found.iter().filter(|o| o.specific == class).collect();
        if group.is_empty() {
            continue;
        }
        println!("  {} ({}):", color(class_color(class), class.as_label()), group.len());
        for occ in group {
            let det = if occ.determiner.is_empty() {
                String::new()
            } else {
                format!(" det \"{}\"", occ.determiner)
            };
            println!(
                "    [{:3},{:3}) {} -> {} ({}){}",
                occ.offset,
                occ.offset + occ.len_chars(),
                occ.surface_form,
                occ.lemma,
                number(occ),
                det
            );
        }
    }
}

fn number(occ: &Occurrence) -> &'static str {
    if occ.singular {
        "singular"
    } else {
        "plural"
    }
}

fn gender(table: &TermTable, lemma: &str) -> &'static str {
    if table.is_gender_neutral(lemma) {
        "neutral"
    } else if table.is_masculine(lemma) {
        "masculine"
    } else {
        "feminine"
    }
}

fn class_color(class: Classification) -> &'static str {
    match class {
        Classification::Specific => "32",
        Classification::Mixed => "33",
        Classification::Generic => "36",
    }
}

fn color(code: &str, text: &str) -> String {
    if io::stdout().is_terminal() {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}
