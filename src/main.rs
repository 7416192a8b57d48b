//! wordforge - exhaustive wordlist generator
//!
//! Generates every word of a fixed length over a configurable alphabet and
//! writes them to a file, one per line.

use std::env;
use std::io::IsTerminal;
use std::process;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Confirm, CustomType, Text};
use tracing_subscriber::EnvFilter;

use wordforge::{
    cli::{parse_args, CliArgs, CliCommand, EnvDefaults},
    types::{GenerationConfig, GenerationReport},
    wordlist::write_sharded,
    Result, WordForgeError, WordGenerator,
};

#[tokio::main]
async fn main() {
    // Initialize the library
    if let Err(e) = wordforge::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let command = match parse_args(env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e.user_message());
            process::exit(1);
        }
    };

    match command {
        CliCommand::Help => print_help(),
        CliCommand::Version => println!("wordforge {}", wordforge::VERSION),
        CliCommand::Generate(args) => {
            if let Err(e) = run(args).await {
                eprintln!("{}", e.user_message());
                process::exit(1);
            }
        }
    }
}

/// Main generation workflow
async fn run(args: CliArgs) -> Result<()> {
    let args = args.with_env(&EnvDefaults::from_env()?);

    let args = if args.interactive || (args.is_incomplete() && std::io::stdin().is_terminal()) {
        prompt_missing(args)?
    } else {
        args
    };

    if args.dry_run {
        println!("{}", args.count_words()?);
        return Ok(());
    }

    let quiet = args.quiet;

    // Validation happens here, before the output file is touched
    let config = args.into_config()?;
    let generator = config.generator()?;

    if !quiet {
        print_plan(&config, &generator);
    }

    let progress = progress_bar(generator.total(), quiet)?;
    let bar = progress.clone();

    let started_at = Utc::now();
    let stats = write_sharded(generator.clone(), &config.output, config.workers, move |n| {
        bar.set_position(n)
    })
    .await?;
    let finished_at = Utc::now();
    progress.finish_and_clear();

    tracing::info!(words = stats.words, bytes = stats.bytes, "Wordlist written");

    if let Some(path) = &config.report {
        GenerationReport::new(&config, &generator, stats, started_at, finished_at)
            .save(path)?;
    }

    if !quiet {
        println!("✅ Wordlist generated and saved to {}.", config.output.display());
        println!("   📊 Words: {}", stats.words);
        println!(
            "   ⏱️  Total time: {:.2}s",
            (finished_at - started_at).num_milliseconds() as f64 / 1000.0
        );
    }

    Ok(())
}

/// Ask for every value the command line and environment did not provide.
/// With `--interactive`, ask for all of them.
fn prompt_missing(mut args: CliArgs) -> Result<CliArgs> {
    let all = args.interactive;

    if all || args.length.is_none() {
        let length = CustomType::<usize>::new("Length of each word:")
            .with_error_message("Please enter a positive whole number")
            .prompt()
            .map_err(|e| prompt_error("word length", e))?;
        args.length = Some(length);
    }

    if all {
        args.digits = Confirm::new("Include numbers?")
            .with_default(args.digits)
            .prompt()
            .map_err(|e| prompt_error("digits choice", e))?;
        args.uppercase = Confirm::new("Include uppercase letters?")
            .with_default(args.uppercase)
            .prompt()
            .map_err(|e| prompt_error("uppercase choice", e))?;
        args.symbols = Confirm::new("Include symbols?")
            .with_default(args.symbols)
            .prompt()
            .map_err(|e| prompt_error("symbols choice", e))?;

        let mask = Text::new("Format mask (L/U/D/S per position, empty for none):")
            .with_initial_value(args.mask.as_deref().unwrap_or(""))
            .prompt()
            .map_err(|e| prompt_error("format mask", e))?;
        args.mask = Some(mask).filter(|m| !m.trim().is_empty());
    }

    if all || (args.output.is_none() && !args.dry_run) {
        let default = args
            .output
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "wordlist.txt".to_string());
        let output = Text::new("Filename for the wordlist:")
            .with_default(&default)
            .prompt()
            .map_err(|e| prompt_error("output filename", e))?;
        args.output = Some(output.into());
    }

    Ok(args)
}

fn prompt_error(what: &str, err: inquire::InquireError) -> WordForgeError {
    WordForgeError::cli(format!("reading {}: {}", what, err))
}

fn progress_bar(total: u128, quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let bar = ProgressBar::new(u64::try_from(total).unwrap_or(u64::MAX));
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} words ({per_sec}, {eta})")
            .map_err(|e| WordForgeError::internal(format!("invalid progress template: {}", e)))?
            .progress_chars("#>-"),
    );
    Ok(bar)
}

fn print_plan(config: &GenerationConfig, generator: &WordGenerator) {
    println!("🔥 wordforge - exhaustive wordlist generation");
    println!("═══════════════════════════════════════════");
    println!("   🔤 Alphabet: {} characters", generator.alphabet().len());
    println!("   📏 Length: {}", generator.length());
    if let Some(mask) = generator.mask() {
        println!("   🎭 Mask: {}", mask);
    }
    println!("   📊 Words: {}", generator.total());
    if config.workers > 1 {
        println!("   🧵 Workers: {}", config.workers);
    }
    println!();
}

/// Print help information
fn print_help() {
    println!("🔥 wordforge - exhaustive wordlist generation");
    println!("═══════════════════════════════════════════");
    println!();
    println!("USAGE:");
    println!("    wordforge [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -l, --length <N>      Length of each word");
    println!("    -d, --digits          Include digits 0-9");
    println!("    -u, --uppercase       Include uppercase letters A-Z");
    println!("    -s, --symbols         Include ASCII punctuation");
    println!("    -m, --mask <MASK>     Per-position format: L=lower U=upper D=digit S=symbol");
    println!("    -o, --output <FILE>   Destination file");
    println!("    -w, --workers <N>     Generate in N parallel shards (default: 1)");
    println!("        --report <FILE>   Write a JSON run report");
    println!("    -i, --interactive     Prompt for every setting");
    println!("    -q, --quiet           No progress output");
    println!("        --dry-run         Print the number of words and exit");
    println!("    -h, --help            Print help");
    println!("    -V, --version         Print version");
    println!();
    println!("EXAMPLES:");
    println!("    wordforge -l 4 -o four.txt            # aaaa .. zzzz");
    println!("    wordforge -l 3 -d -u -m LUD -o p.txt  # lower, upper, as-is");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    WORDFORGE_LENGTH   Default word length");
    println!("    WORDFORGE_MASK     Default format mask");
    println!("    WORDFORGE_OUTPUT   Default output file");
    println!("    WORDFORGE_WORKERS  Default worker count");
    println!("    RUST_LOG           Log filter (default: warn)");
    println!();
    println!("Lowercase letters are always included.");
}
