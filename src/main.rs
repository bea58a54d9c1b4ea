use std::{
    io::{self, Read},
    process::ExitCode,
};

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use pseudocode::{lexer::lexer::tokenize, parser::parser::Parser, render_error};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Maximum source file size in bytes (1MB)
const MAX_SOURCE_SIZE: usize = 1_000_000;

#[derive(ClapParser, Debug)]
#[command(name = "pseudocode")]
#[command(about = "Compile indentation-structured pseudocode into an ESTree syntax tree")]
struct Cli {
    /// Log compiler stages to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the token stream, one token per line
    Tokens {
        /// Path to the source file, `-` for standard input
        file: String,
    },

    /// Parse a source file and dump the AST
    Parse {
        /// Path to the source file, `-` for standard input
        file: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Pretty,
    Json,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Tokens { file } => cmd_tokens(&file),
        Commands::Parse { file, format } => cmd_parse(&file, format),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("pseudocode=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Reads `path`, or standard input for `-`, returning the name used in
/// error messages together with the text.
fn load_source(path: &str) -> Result<(String, String)> {
    let (name, source) = if path == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read standard input")?;
        (String::from("stdin"), source)
    } else {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read source file '{}'", path))?;
        (path.to_string(), source)
    };

    if source.len() > MAX_SOURCE_SIZE {
        bail!(
            "source file exceeds {}MB limit ({} bytes)",
            MAX_SOURCE_SIZE / 1_000_000,
            source.len()
        );
    }

    info!(file = %name, bytes = source.len(), "loaded source");
    Ok((name, source))
}

fn cmd_tokens(path: &str) -> Result<ExitCode> {
    let (name, source) = load_source(path)?;

    let tokens = match tokenize(&source, Some(name)) {
        Ok(tokens) => tokens,
        Err(error) => {
            eprint!("{}", render_error(&error, &source));
            return Ok(ExitCode::FAILURE);
        }
    };

    for token in &tokens {
        println!("{}:{} {}", token.line(), token.col(), token);
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_parse(path: &str, format: Format) -> Result<ExitCode> {
    let (name, source) = load_source(path)?;

    let mut parser = Parser::new(Some(name));
    if let Err(error) = parser.feed(&source) {
        eprint!("{}", render_error(&error, &source));
        return Ok(ExitCode::FAILURE);
    }

    let programs = parser.take_results();
    debug!(programs = programs.len(), "parse finished");

    for program in &programs {
        match format {
            Format::Pretty => println!("{:#?}", program),
            Format::Json => println!(
                "{}",
                serde_json::to_string_pretty(program).context("failed to serialize the AST")?
            ),
        }
    }

    Ok(ExitCode::SUCCESS)
}
