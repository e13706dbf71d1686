use crate::{
    banner::print_banner,
    calendar,
    error::Error,
    naming::ClockNamer,
    painter::{self, Painter},
    patterns::{DEFAULT_PATTERNS_FILE, Patterns},
    repo::GitRepository,
};

use console::style;
use std::{env, path::PathBuf};

/// Parsed command-line arguments.
#[derive(Debug)]
pub struct CliArgs {
    /// Target repository path.
    pub path: PathBuf,
    /// Sentence to render, one glyph per character.
    pub sentence: String,
    /// Month (1-12) whose first Sunday anchors the layout.
    pub month: u32,
    /// Year of the anchor month.
    pub year: i32,
    /// Pattern definition file.
    pub patterns: PathBuf,
    /// Explicit target file name; auto-generated when absent.
    pub file: Option<String>,
}

fn take<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, Error> {
    match args.get(i + 1) {
        Some(v) => Ok(v.as_str()),
        None => Err(Error::Configuration(format!(
            "missing value for `{}`",
            flag
        ))),
    }
}

/// Parses the argument list (without the program name).
///
/// `--sentence`, `--month` and `--year` are required; `--path` defaults to
/// the current directory and `--patterns` to `./patterns.json`. The month
/// must be an integer in 1-12.
pub(crate) fn parse_args(args: &[String]) -> Result<CliArgs, Error> {
    let mut path = PathBuf::from("./");
    let mut patterns = PathBuf::from(DEFAULT_PATTERNS_FILE);
    let mut sentence: Option<String> = None;
    let mut month: Option<u32> = None;
    let mut year: Option<i32> = None;
    let mut file: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--path" | "-f" => {
                path = PathBuf::from(take(args, i, flag)?);
            }
            "--sentence" | "-s" => {
                sentence = Some(take(args, i, flag)?.to_string());
            }
            "--month" | "-m" => {
                let raw = take(args, i, flag)?;
                let m: u32 = raw.parse().map_err(|_| {
                    Error::Configuration(format!("month must be an integer 1-12, got `{}`", raw))
                })?;
                if !(1..=12).contains(&m) {
                    return Err(Error::Configuration(format!(
                        "month must be in 1-12, got {}",
                        m
                    )));
                }
                month = Some(m);
            }
            "--year" | "-y" => {
                let raw = take(args, i, flag)?;
                let y: i32 = raw.parse().map_err(|_| {
                    Error::Configuration(format!("year must be an integer, got `{}`", raw))
                })?;
                year = Some(y);
            }
            "--patterns" | "-p" => {
                patterns = PathBuf::from(take(args, i, flag)?);
            }
            "--file" => {
                file = Some(take(args, i, flag)?.to_string());
            }
            other => {
                return Err(Error::Configuration(format!(
                    "unknown argument `{}`",
                    other
                )));
            }
        }
        i += 2;
    }

    let sentence = match sentence {
        Some(s) => s,
        None => {
            return Err(Error::Configuration(String::from(
                "missing required `--sentence`",
            )));
        }
    };
    let month = match month {
        Some(m) => m,
        None => {
            return Err(Error::Configuration(String::from(
                "missing required `--month`",
            )));
        }
    };
    let year = match year {
        Some(y) => y,
        None => {
            return Err(Error::Configuration(String::from(
                "missing required `--year`",
            )));
        }
    };

    Ok(CliArgs {
        path,
        sentence,
        month,
        year,
        patterns,
        file,
    })
}

/// Verifies that `git` is reachable on `PATH`.
fn verify_environment() -> Result<(), Error> {
    match which::which("git") {
        Ok(_) => Ok(()),
        Err(_) => Err(Error::Repository(String::from(
            "`git` not found in PATH",
        ))),
    }
}

/// Executes a full paint run and returns the number of commits recorded.
///
/// Order of operations: parse arguments, verify the environment, load the
/// pattern store, open or bootstrap the repository, resolve the target file
/// name, show the banner, then paint the sentence and close the handle.
fn run(args: &[String]) -> Result<usize, Error> {
    let cli = parse_args(args)?;
    verify_environment()?;

    let patterns = Patterns::load(&cli.patterns)?;
    let repo = GitRepository::init_or_open(&cli.path)?;

    let mut namer = ClockNamer;
    let mut painter = Painter::new(&patterns, repo, &cli.path, cli.file.clone(), &mut namer)?;

    let anchor = calendar::first_sunday(cli.month, cli.year)?;
    let planned = painter::planned_commits(&patterns, &cli.sentence)?;
    print_banner(
        &cli.sentence,
        anchor,
        cli.month,
        cli.year,
        painter.file_name(),
        &cli.path,
        planned,
    );

    let painted = painter.write_sentence(&cli.sentence, cli.month, cli.year)?;
    painter.finish()?;

    Ok(painted)
}

/// Prints usage information to stdout.
fn print_help() {
    println!(
        "\
git-graffiti {}

Paint pixel-art sentences onto a contribution graph with backdated commits.

USAGE:
    git-graffiti [OPTIONS] --sentence <TEXT> --month <1-12> --year <YEAR>

OPTIONS:
    -h, --help               Print help information
    -V, --version            Print version information
    -f, --path <DIR>         Target repository path (default: current directory)
    -s, --sentence <TEXT>    Sentence to render, one glyph per character
    -m, --month <1-12>       Month whose first Sunday anchors the sentence
    -y, --year <YEAR>        Year of the anchor month
    -p, --patterns <FILE>    Pattern definition file (default: ./patterns.json)
        --file <NAME>        Target file name (default: derived from the clock)

DESCRIPTION:
    Each character maps to a week-by-day boolean grid in the pattern file.
    Every \"on\" cell becomes one commit whose author and committer dates are
    backdated so the hosting UI's contribution graph renders the sentence.
    The repository at the target path is created if missing and reused
    otherwise; commits are appended to the checked-out branch.",
        env!("CARGO_PKG_VERSION")
    );
}

/// Main CLI entry point for `git-graffiti`.
///
/// This is the only place that reports errors and chooses an exit status;
/// everything below it propagates typed failures.
///
/// Returns `Ok(0)` on success (including `--help`/`--version`), or `Err(())`
/// when the run aborted.
pub fn entry() -> Result<i32, ()> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(0);
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("git-graffiti {}", env!("CARGO_PKG_VERSION"));
        return Ok(0);
    }

    match run(args.get(1..).unwrap_or(&[])) {
        Ok(painted) => {
            println!(
                "{}",
                style(format!("✅ Painted {} commits onto the graph.", painted))
                    .green()
                    .bold()
            );
            Ok(0)
        }
        Err(e) => {
            eprintln!("{}", style(format!("❌ {}", e)).red().bold());
            Err(())
        }
    }
}
