// src/cli.rs
//! `acme-report`: hours, labor cost and trainings over a span of schedules.

use std::{
    io::Write,
    path::PathBuf,
    sync::OnceLock,
    time::Instant,
};

use chrono::{Datelike, NaiveDate};
use clap::{Args, Parser, Subcommand};
use log::info;

use crate::{
    aggregate::AggregationEngine,
    config::{Settings, consts::LOGIN_SECRET},
    core::{Credentials, HttpSession, Session},
    dates,
    error::ScrapeResult,
    progress::Progress,
    schedule::ScheduleSet,
};

#[derive(Parser, Debug)]
#[command(name = "acme-report")]
#[command(author, version, about = "Hours, labor cost and trainings from the ACME schedule", long_about = None)]
pub struct Cli {
    /// Settings file (TOML); built-in defaults otherwise
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Two-line login secret: user, then password
    #[arg(long, global = true, default_value = LOGIN_SECRET)]
    pub secret: PathBuf,

    /// Only these roles: a role label or a group name (e.g. ALL_PHONES)
    #[arg(short, long, global = true)]
    pub role: Option<String>,

    /// More log output (-v debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub span: Span,

    #[command(subcommand)]
    pub command: Report,
}

/// Which dates to collect. Default: the last 7 days.
#[derive(Args, Debug, Default)]
pub struct Span {
    /// First date (Y-M-D)
    #[arg(long, global = true)]
    pub from: Option<String>,

    /// Last date (Y-M-D), default today
    #[arg(long, global = true, requires = "from")]
    pub to: Option<String>,

    /// Whole month (1-12)
    #[arg(long, global = true, conflicts_with_all = ["from", "recent"])]
    pub month: Option<u32>,

    /// Year for --month, default this year
    #[arg(long, global = true, requires = "month")]
    pub year: Option<i32>,

    /// Last N days ending today
    #[arg(long, global = true, conflicts_with = "from")]
    pub recent: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Report {
    /// Hours worked per agent
    Hours {
        /// Fewest hours first
        #[arg(long)]
        least_first: bool,
    },
    /// Hourly cost per agent
    Cost {
        /// Divide by the number of days
        #[arg(long)]
        day_avg: bool,
        /// Print only the grand total
        #[arg(long)]
        total: bool,
    },
    /// Job title and trainings of every scheduled agent
    Trainings,
}

pub fn run() -> color_eyre::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let credentials = Credentials::from_secret_file(&cli.secret)?;
    let session = HttpSession::new(&settings.site, credentials);
    let mut engine = AggregationEngine::new(session, &settings);
    let mut progress = ConsoleProgress::default();

    let mut tables = collect(&mut engine, &cli.span, &mut progress)?;
    if let Some(role) = &cli.role {
        tables = engine.filter_by_role(&tables, role)?;
        info!("Filtered to '{role}'");
    }

    match cli.command {
        Report::Hours { least_first } => {
            for (code, hours) in engine.total_hours(&tables, !least_first).iter() {
                println!("{code}\t{hours:.1}");
            }
        }
        Report::Cost { day_avg, total } => {
            let costs = engine.schedule_cost(&tables, day_avg, Some(&mut progress));
            if total {
                println!("{:.2}", costs.total());
            } else {
                for (code, cost) in costs.iter() {
                    println!("{code}\t{cost:.2}");
                }
            }
        }
        Report::Trainings => {
            for (code, job) in engine.scheduled_agent_trainings(&tables, Some(&mut progress)) {
                let title = job.base_job.as_deref().unwrap_or("-");
                println!("{code}\t{title}\t{}", job.trainings.join(", "));
            }
        }
    }

    engine.cache_mut().session_mut().close()?;
    Ok(())
}

fn collect<S: Session>(
    engine: &mut AggregationEngine<S>,
    span: &Span,
    progress: &mut dyn Progress,
) -> ScrapeResult<ScheduleSet> {
    let today = dates::today();
    if let Some(month) = span.month {
        let year = span.year.unwrap_or_else(|| today.year());
        return engine.schedules_by_month(month, year, Some(progress));
    }
    if let Some(from) = &span.from {
        let start = dates::parse_date(from)?;
        let end: NaiveDate = match &span.to {
            Some(to) => dates::parse_date(to)?,
            None => today,
        };
        return engine.schedules_in_range(start, end, Some(progress));
    }
    engine.recent_schedules(today, span.recent, Some(progress))
}

/// Progress lines on stderr, so stdout stays clean for the report.
#[derive(Default)]
pub struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, key: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {key}", self.done, self.total);
    }

    fn item_failed(&mut self, key: &str, err: &str) {
        eprintln!("[{}/{}] {key} failed: {err}", self.done, self.total);
    }
}

static START: OnceLock<Instant> = OnceLock::new();

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// `[hh:mm:ss.mmm][LEVEL] msg` on stderr, time counted from startup.
/// `RUST_LOG` overrides the level picked from `-v`.
fn init_logging(verbose: u8) {
    let start = *START.get_or_init(Instant::now);
    let level = match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(move |buf, record| {
            let elapsed = fmt_elapsed(start.elapsed().as_millis());
            writeln!(buf, "[{elapsed}][{}] {}", record.level(), record.args())
        })
        .init();
}
