use anyhow::{Context, Result};
use console::Style;
use passforge::GenerateError;
use std::io::{BufRead, Write};

pub const MIN_PASSWORD_LENGTH: usize = 1;
pub const MAX_PASSWORD_LENGTH: usize = 4096;

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "✗")
    } else {
        ("+", "!")
    }
}

/// Accepts a positive integer no larger than `MAX_PASSWORD_LENGTH`.
pub fn parse_length(input: &str) -> Option<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(n))
}

pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Line-oriented prompts that re-ask until the answer is valid.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            anyhow::bail!("Input closed before an answer was given");
        }
        Ok(line)
    }

    pub fn prompt_length(&mut self) -> Result<usize> {
        loop {
            let line = self.ask(&format!(
                "Enter the desired password length (minimum {}): ",
                MIN_PASSWORD_LENGTH
            ))?;
            if let Some(length) = parse_length(&line) {
                return Ok(length);
            }

            log::debug!("rejected length input {:?}", line.trim());
            match line.trim().parse::<usize>() {
                Ok(n) if n > MAX_PASSWORD_LENGTH => writeln!(
                    self.output,
                    "Password length cannot exceed {} characters.",
                    MAX_PASSWORD_LENGTH
                )?,
                _ => writeln!(self.output, "Please enter a valid positive integer.")?,
            }
        }
    }

    pub fn prompt_yes_no(&mut self, prompt: &str) -> Result<bool> {
        loop {
            let line = self.ask(&format!("{} (y/n): ", prompt))?;
            match parse_yes_no(&line) {
                Some(answer) => return Ok(answer),
                None => writeln!(self.output, "Please enter 'y' or 'n'.")?,
            }
        }
    }

    /// Blocks until a line (or end of input) arrives.
    pub fn wait_for_enter(&mut self) -> Result<()> {
        write!(self.output, "\nPress Enter to exit...")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(())
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }
}

pub fn lowercase_only_notice<W: Write>(out: &mut W) -> Result<()> {
    writeln!(
        out,
        "No additional character sets selected. The password will contain only lowercase letters."
    )?;
    Ok(())
}

pub fn display_password<W: Write>(
    out: &mut W,
    password: &str,
    options: &DisplayOptions,
) -> Result<()> {
    if options.quiet {
        writeln!(out, "{}", password)?;
        return Ok(());
    }

    let (check_ok, _) = get_status_symbols(options.unicode_support);
    let style = if options.color_support {
        Style::new().green()
    } else {
        Style::new()
    };

    writeln!(out, "\n=== Generated Password ===")?;
    writeln!(out, "{}", password)?;
    writeln!(
        out,
        "\n{} {} {}",
        style.apply_to(format!("[{}]", check_ok)),
        password.len(),
        if password.len() == 1 { "char" } else { "chars" }
    )?;
    Ok(())
}

pub fn display_failure<W: Write>(
    out: &mut W,
    err: &GenerateError,
    options: &DisplayOptions,
) -> Result<()> {
    let (_, check_warn) = get_status_symbols(options.unicode_support);
    let style = if options.color_support {
        Style::new().red()
    } else {
        Style::new()
    };

    writeln!(
        out,
        "{} {}",
        style.apply_to(format!("[{}]", check_warn)),
        style.apply_to(err)
    )?;
    writeln!(
        out,
        "Failed to generate password. Please try again with different parameters."
    )?;
    Ok(())
}
