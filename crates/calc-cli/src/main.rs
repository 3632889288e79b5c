use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use calc_service::Calculator;
use calc_types::Limits;
use clap::{Args, Parser, Subcommand, ValueEnum};

mod logger;

use logger::LogLevel;

#[derive(Debug, Parser)]
#[command(name = "calc")]
#[command(about = "Evaluate arithmetic expressions without executing code.")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    limits: LimitArgs,

    /// Diagnostics written to stderr.
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate one expression and print its display string.
    Eval(EvalArgs),
    /// Answer one JSON request body per stdin line with one JSON response per line.
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
struct EvalArgs {
    /// Expression to evaluate, e.g. `sqrt(16) + 2×3`.
    #[arg(allow_hyphen_values = true)]
    expression: String,

    /// Print the evaluate-endpoint JSON response instead of the bare result.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Which endpoint the request bodies are for.
    #[arg(long, value_enum, default_value_t = Endpoint::Evaluate)]
    endpoint: Endpoint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Endpoint {
    /// `{action, expression, current_value}` bodies.
    Action,
    /// `{expression}` bodies.
    Evaluate,
}

#[derive(Debug, Args)]
struct LimitArgs {
    /// Longest accepted expression, in characters.
    #[arg(long, global = true, default_value_t = Limits::DEFAULT_MAX_INPUT_LEN)]
    max_length: usize,

    /// Deepest accepted nesting of parentheses, signs and powers.
    #[arg(long, global = true, default_value_t = Limits::DEFAULT_MAX_DEPTH)]
    max_depth: u32,

    /// Evaluation steps allowed per expression.
    #[arg(long, global = true, default_value_t = Limits::DEFAULT_GAS_LIMIT)]
    gas_limit: u64,
}

impl From<&LimitArgs> for Limits {
    fn from(args: &LimitArgs) -> Self {
        Limits {
            max_input_len: args.max_length,
            max_depth: args.max_depth,
            gas_limit: args.gas_limit,
            ..Limits::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.log_level);
    let limits = Limits::from(&cli.limits);

    match cli.command {
        Command::Eval(args) => {
            let ok = eval(&args, &limits)?;
            if !ok {
                std::process::exit(1);
            }
        }
        Command::Serve(args) => serve(args.endpoint, Calculator::new(limits))?,
    }
    Ok(())
}

/// Prints the result. Returns whether the expression evaluated cleanly.
fn eval(args: &EvalArgs, limits: &Limits) -> Result<bool> {
    let outcome = calc_eval::calculate_with_limits(&args.expression, limits);
    let (display, ok) = match outcome {
        Ok(display) => (display, true),
        Err(err) => {
            log::info!("{err}");
            (err.display_message(), false)
        }
    };

    let mut stdout = std::io::stdout().lock();
    if args.json {
        let response = calc_service::EvaluateResponse::from_result(display);
        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
    } else {
        writeln!(stdout, "{display}")?;
    }
    Ok(ok)
}

fn serve(endpoint: Endpoint, calculator: Calculator) -> Result<()> {
    let stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    for (index, line) in stdin.lines().enumerate() {
        let line = line.with_context(|| format!("read request line {}", index + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let response = match endpoint {
            Endpoint::Action => calculator.handle_action_json(&line),
            Endpoint::Evaluate => calculator.handle_evaluate_json(&line),
        };
        writeln!(stdout, "{response}").context("write response")?;
        stdout.flush().context("flush response")?;
    }
    Ok(())
}
