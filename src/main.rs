mod app;
mod calendar;
mod help;
mod locale;
mod theme;
use crate::app::App;
use crate::calendar::{parse_weekday, Picker};
use crate::locale::Localization;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::io;
use std::path::{Path, PathBuf};
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime,
    Weekday,
};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct RunOptions {
    date: Option<Date>,
    week_start: Weekday,
    locale: Option<PathBuf>,
    log_file: Option<PathBuf>,
    once: bool,
}

impl Default for RunOptions {
    fn default() -> RunOptions {
        RunOptions {
            date: None,
            week_start: Weekday::Monday,
            locale: None,
            log_file: None,
            once: false,
        }
    }
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('w') | Arg::Long("week-start") => {
                    opts.week_start = parser.value()?.parse_with(parse_weekday)?;
                }
                Arg::Short('L') | Arg::Long("locale") => {
                    opts.locale = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => {
                    opts.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('1') | Arg::Long("once") => opts.once = true,
                Arg::Value(value) if opts.date.is_none() => {
                    opts.date = Some(value.parse_with(|s| Date::parse(s, &YMD_FMT))?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                // This must happen before anything else starts a thread.
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let _logger = opts.log_file.as_deref().map(init_logging).transpose()?;
                log::info!(
                    "Starting {} {}; today is {today}",
                    env!("CARGO_PKG_NAME"),
                    env!("CARGO_PKG_VERSION")
                );
                let locale = match opts.locale {
                    Some(ref path) => Localization::load(path)?,
                    None => Localization::english(),
                };
                let mut picker = Picker::new(today, opts.week_start, ());
                if let Some(date) = opts.date {
                    picker = picker.start_date(date);
                }
                let app = App::new(picker, &locale).quit_on_select(opts.once);
                let selected = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(terminal).context("failed to run picker")
                })?;
                if let Some(date) = selected {
                    println!("{date}");
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: datepick [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Pick a date from a month calendar in the terminal and print it");
                println!();
                println!("Options:");
                println!("  -1, --once                Quit as soon as a date is selected");
                println!("  -L, --locale <FILE>       Read month & weekday names from a TOML file");
                println!("      --log-file <FILE>     Write log messages to the given file");
                println!("  -w, --week-start <DAY>    First day of the week [default: Monday]");
                println!("  -h, --help                Display this help message and exit");
                println!("  -V, --version             Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn init_logging(path: &Path) -> anyhow::Result<LoggerHandle> {
    Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?
        .log_to_file(FileSpec::try_from(path)?)
        .start()
        .context("failed to start logger")
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    if let Err(e) = execute!(io::stdout(), EnableMouseCapture) {
        log::warn!("Failed to enable mouse capture: {e}");
    }
    let r = func(terminal);
    if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
        log::warn!("Failed to disable mouse capture: {e}");
    }
    ratatui::restore();
    r
}
