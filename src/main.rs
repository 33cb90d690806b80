mod ui;

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use log::LevelFilter;
use passforge::GenerateError;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(
    name = "passforge",
    version,
    about = "Random password generator with guaranteed character class coverage"
)]
struct Cli {
    /// Password length; prompted for when omitted
    #[arg(short, long, env = "PASSFORGE_LENGTH", value_parser = parse_length_arg)]
    length: Option<usize>,

    /// Include uppercase letters
    #[arg(long, env = "PASSFORGE_UPPER", value_parser = BoolishValueParser::new())]
    upper: Option<bool>,

    /// Include digits
    #[arg(long, env = "PASSFORGE_NUMBERS", value_parser = BoolishValueParser::new())]
    numbers: Option<bool>,

    /// Include special characters
    #[arg(long, env = "PASSFORGE_SPECIAL", value_parser = BoolishValueParser::new())]
    special: Option<bool>,

    /// Print only the password
    #[arg(short, long)]
    quiet: bool,

    /// Wait for Enter before exiting
    #[arg(long)]
    pause: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_length_arg(s: &str) -> Result<usize, String> {
    ui::parse_length(s).ok_or_else(|| {
        format!(
            "expected an integer between {} and {}",
            ui::MIN_PASSWORD_LENGTH,
            ui::MAX_PASSWORD_LENGTH
        )
    })
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();
}

fn resolve_choice<R: BufRead, W: Write>(
    value: Option<bool>,
    prompter: &mut ui::Prompter<R, W>,
    prompt: &str,
) -> Result<bool> {
    match value {
        Some(v) => Ok(v),
        None => prompter.prompt_yes_no(prompt),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
        quiet: cli.quiet,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = ui::Prompter::new(stdin.lock(), stdout.lock());

    if !options.quiet {
        writeln!(prompter.output(), "=== Secure Password Generator ===\n")?;
    }

    let length = match cli.length {
        Some(length) => length,
        None => prompter.prompt_length()?,
    };
    let upper = resolve_choice(cli.upper, &mut prompter, "Include uppercase letters")?;
    let numbers = resolve_choice(cli.numbers, &mut prompter, "Include numbers")?;
    let special = resolve_choice(cli.special, &mut prompter, "Include special characters")?;

    if !upper && !numbers && !special && !options.quiet {
        ui::lowercase_only_notice(prompter.output())?;
    }

    let failed = match passforge::generate(length, upper, numbers, special) {
        Ok(password) => {
            log::info!("generated a {}-character password", password.len());
            ui::display_password(prompter.output(), &password, &options)?;
            false
        }
        Err(err @ GenerateError::Entropy(_)) => {
            return Err(err).context("Cannot generate a password without system entropy");
        }
        Err(err) => {
            log::warn!("generation rejected: {}", err);
            ui::display_failure(prompter.output(), &err, &options)?;
            true
        }
    };

    if cli.pause {
        prompter.wait_for_enter()?;
    }
    prompter.output().flush()?;

    if failed {
        std::process::exit(1);
    }

    Ok(())
}
