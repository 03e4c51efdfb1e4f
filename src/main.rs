//! Purpose: `parse-ints` CLI entry point.
//! Role: Binary crate root; parses args, converts the request batch, emits JSON on stdout.
//! Invariants: stdout carries only the result array, with no trailing newline.
//! Invariants: Fatal errors write nothing to stdout; diagnostics go to stderr
//! Invariants: (human text on a terminal, JSON otherwise).
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::error::Error as StdError;
use std::ffi::OsString;
use std::io::{self, IsTerminal, Write};

use clap::{Parser, ValueEnum, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

use parse_ints::api::{
    ConversionResult, Converter, DEFAULT_MAX_STR_DIGITS, Error, ErrorKind, OutputLayout,
    RadixParser, decode_requests, to_exit_code, write_results,
};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run(std::env::args_os()) {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run<I>(args: I) -> Result<RunOutcome, (Error, ColorMode)>
where
    I: IntoIterator<Item = OsString>,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Try `parse-ints --help`."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    convert_and_emit(&cli).map_err(|err| (err, color_mode))?;
    Ok(RunOutcome::ok())
}

fn convert_and_emit(cli: &Cli) -> Result<(), Error> {
    let requests = decode_requests(&cli.requests)?;
    let parser = RadixParser::new().with_max_str_digits(cli.max_str_digits);
    let results = Converter::new(parser).convert_all(&requests);

    let failures = results
        .iter()
        .filter(|result| result.is_value_error())
        .count();
    tracing::info!(requests = results.len(), failures, "converted batch");

    emit_results(&results, cli.format.into())
}

fn emit_results(results: &[ConversionResult], layout: OutputLayout) -> Result<(), Error> {
    let mut stdout = io::stdout().lock();
    write_results(&mut stdout, results, layout).map_err(|err| {
        let kind = if err.is_io() {
            ErrorKind::Io
        } else {
            ErrorKind::Internal
        };
        Error::new(kind)
            .with_message("failed to write results")
            .with_source(err)
    })?;
    stdout.flush().map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to flush stdout")
            .with_source(err)
    })
}

#[derive(Parser)]
#[command(
    name = "parse-ints",
    version,
    about = "Convert numerals in arbitrary radixes to decimal strings",
    long_about = None,
    after_help = r#"EXAMPLES
  $ parse-ints '[{"input": "10", "base": 2}, {"input": "xyz", "base": 10}, {"input": "1f", "base": 16}]'
  ["2", "ValueError", "31"]

  Base 0 infers the radix from a 0x/0o/0b prefix. Unparseable items become "ValueError".
  Set RUST_LOG=debug to trace individual failures on stderr."#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        value_name = "JSON",
        allow_hyphen_values = true,
        help = "JSON array of {\"input\": <string>, \"base\": <integer>} objects"
    )]
    requests: String,
    #[arg(
        long,
        default_value = "python",
        value_enum,
        help = "Output layout: python ([\"a\", \"b\"]), compact, or pretty"
    )]
    format: FormatArg,
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_STR_DIGITS,
        value_name = "N",
        help = "Reject numerals longer than N digits in non power-of-two radixes (0 disables)"
    )]
    max_str_digits: usize,
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FormatArg {
    Python,
    Compact,
    Pretty,
}

impl From<FormatArg> for OutputLayout {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Python => OutputLayout::Python,
            FormatArg::Compact => OutputLayout::Compact,
            FormatArg::Pretty => OutputLayout::Pretty,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Everything `main` reports about a fatal error, gathered once per rendering.
struct Diagnostic {
    kind: ErrorKind,
    message: String,
    hint: Option<String>,
    request_index: Option<usize>,
    causes: Vec<String>,
}

impl Diagnostic {
    fn from_error(err: &Error) -> Self {
        let message = err.message().map(str::to_string).unwrap_or_else(|| {
            match err.kind() {
                ErrorKind::Internal => "internal error",
                ErrorKind::Usage => "usage error",
                ErrorKind::InvalidInput => "invalid input",
                ErrorKind::Io => "i/o error",
            }
            .to_string()
        });
        let causes = std::iter::successors(err.source(), |&source| source.source())
            .map(ToString::to_string)
            .collect();
        Self {
            kind: err.kind(),
            message,
            hint: err.hint().map(str::to_string),
            request_index: err.index(),
            causes,
        }
    }

    /// `request #N: ` when the failure belongs to one element of the batch.
    fn subject(&self) -> String {
        self.request_index
            .map(|index| format!("request #{index}: "))
            .unwrap_or_default()
    }

    fn to_json(&self) -> Value {
        let mut inner = Map::new();
        inner.insert("kind".to_string(), json!(format!("{:?}", self.kind)));
        inner.insert("message".to_string(), json!(self.message));
        if let Some(index) = self.request_index {
            inner.insert("request_index".to_string(), json!(index));
        }
        if let Some(hint) = &self.hint {
            inner.insert("hint".to_string(), json!(hint));
        }
        if !self.causes.is_empty() {
            inner.insert("causes".to_string(), json!(self.causes));
        }
        json!({ "error": Value::Object(inner) })
    }

    fn to_text(&self, use_color: bool) -> String {
        let paint = |label: &str, code: &str| {
            if use_color {
                format!("\u{1b}[{code}m{label}\u{1b}[0m")
            } else {
                label.to_string()
            }
        };

        let mut text = format!("{} {}{}", paint("error:", "31"), self.subject(), self.message);
        if let Some(hint) = &self.hint {
            text.push_str(&format!("\n{} {hint}", paint("hint:", "33")));
        }
        if let Some(cause) = self.causes.first() {
            text.push_str(&format!("\n{} {cause}", paint("caused by:", "33")));
        }
        text
    }
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let diagnostic = Diagnostic::from_error(err);
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", diagnostic.to_text(color_mode.use_color(is_tty)));
    } else {
        eprintln!("{}", diagnostic.to_json());
    }
}

// First non-empty line of clap's rendering, without its `error:` label.
fn clap_error_summary(err: &clap::Error) -> String {
    err.to_string()
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.strip_prefix("error:").unwrap_or(line).trim().to_string())
        .unwrap_or_else(|| "invalid arguments".to_string())
}
