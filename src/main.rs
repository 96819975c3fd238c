// roboscript: validate robot programs from the command line

use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use crossterm::style::Stylize;
use roboscript::{validate, ParserConfig, Verdict};

#[derive(Debug)]
struct Options {
    config: ParserConfig,
    quiet: bool,
    files: Vec<String>,
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("roboscript");

    let options = match parse_args(args.get(1..).unwrap_or(&[])) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            print_usage(program_name);
            return ExitCode::from(2);
        }
    };

    run(&options)
}

/// Result of checking one input, ordered by the exit status it demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Outcome {
    Accepted = 0,
    Rejected = 1,
    Unreadable = 2,
}

/// Validate every file: 0 if all are accepted, 1 if any is rejected, 2 if
/// any could not be read.
fn run(options: &Options) -> ExitCode {
    ExitCode::from(exit_status(
        options.files.iter().map(|path| check_file(path, options)),
    ))
}

fn exit_status(outcomes: impl IntoIterator<Item = Outcome>) -> u8 {
    outcomes
        .into_iter()
        .max()
        .map_or(0, |outcome| outcome as u8)
}

fn check_file(path: &str, options: &Options) -> Outcome {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", path, e);
            return Outcome::Unreadable;
        }
    };

    match validate(&source, &options.config) {
        Verdict::Accepted => {
            println!("{}: {}", path, "accepted".green());
            Outcome::Accepted
        }
        Verdict::Rejected(err) => {
            println!("{}: {}", path, "rejected".red());
            if !options.quiet {
                println!("  {}", err);
            }
            Outcome::Rejected
        }
    }
}

fn read_source(path: &str) -> io::Result<String> {
    if path == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(path)
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut config = ParserConfig::default();
    let mut quiet = false;
    let mut files = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--hoist-macros" => config = config.with_hoisted_macros(),
            "--strict" => config = config.with_strict_declarations(),
            "-q" | "--quiet" => quiet = true,
            "--max-depth" => {
                let value = iter.next().ok_or("--max-depth needs a value")?;
                let depth = value
                    .parse::<usize>()
                    .map_err(|_| format!("invalid --max-depth value '{}'", value))?;
                config = config.with_max_depth(depth);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option '{}'", flag)),
            path => files.push(path.to_string()),
        }
    }

    if files.is_empty() {
        return Err("no input file provided".to_string());
    }

    Ok(Options {
        config,
        quiet,
        files,
    })
}

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [options] <file>...", program_name);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --hoist-macros     let macros call themselves and later macros");
    eprintln!("  --strict           reject redeclared variables and macros");
    eprintln!("  --max-depth <n>    nesting limit (default {})", roboscript::config::DEFAULT_MAX_DEPTH);
    eprintln!("  -q, --quiet        print verdicts only");
    eprintln!();
    eprintln!("Use '-' to read a program from standard input.");
}

/// Enable with `RUST_LOG=roboscript=debug` or `RUST_LOG=roboscript=trace`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}
