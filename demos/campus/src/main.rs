//! campus — host binary for the campus contact simulator.
//!
//! Owns the tick loop, the logging subscriber, and a toy transmission model:
//!
//! ```text
//! campus fixture                       built-in three-student BCB100x scenario
//! campus fixture --rosters r.csv --enrollments e.csv --students 6
//! campus random  --config campus.toml  50 000 students on a generated roster pool
//! ```
//!
//! `RUST_LOG` overrides the log level; `--verbose` selects `debug`.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use campus_contact::{ContactEvent, TransmissionModel};
use campus_core::{SimConfig, SimRng, StudentId, Tick};
use campus_schedule::{Campus, HealthWriter};
use campus_sim::{
    CampusReport, FixtureSpec, GlobalSchedule, PopulationSpec, RosterTemplate, ScheduleBuilder,
    SimObserver,
};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "campus")]
#[command(about = "Lecture-schedule contact simulation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Chance that an exposed healthy student is infected per shared meeting
    #[arg(long, global = true, default_value = "0.05")]
    transmission: f64,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a hand-specified campus.
    Fixture {
        /// Roster CSV (`roster_id,meeting,capacity`); defaults to the BCB100x scenario
        #[arg(long, requires = "enrollments")]
        rosters: Option<PathBuf>,

        /// Enrollment CSV (`student_id,roster_id`)
        #[arg(long, requires = "rosters")]
        enrollments: Option<PathBuf>,

        /// Number of students referenced by the enrollment CSV
        #[arg(long, default_value = "3")]
        students: usize,

        /// Students infected at tick 0
        #[arg(long, value_delimiter = ',', default_value = "0")]
        infected: Vec<u32>,

        #[arg(long, default_value = "7")]
        days: u64,

        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Build a randomized campus from a TOML config.
    Random {
        /// TOML file with optional `[sim]`, `[population]` and `[template]` tables
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

// ── Config file ───────────────────────────────────────────────────────────────

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RunConfig {
    sim:        SimConfig,
    population: PopulationSpec,
    template:   RosterTemplate,
}

impl RunConfig {
    fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: RunConfig = toml::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.sim.validate()?;
        Ok(config)
    }
}

// ── Transmission model ────────────────────────────────────────────────────────

/// Each healthy student sharing a meeting with at least one infected student
/// becomes infected with a fixed probability.
struct ExposureModel {
    probability:    f64,
    new_infections: usize,
}

impl TransmissionModel for ExposureModel {
    fn on_contact(&mut self, event: &ContactEvent<'_>, health: &mut HealthWriter<'_>, rng: &mut SimRng) {
        // Exposure is judged before anyone in this meeting is infected.
        let exposed = event.students.iter().any(|&s| health.is_sick(s));
        if !exposed {
            return;
        }
        for &s in event.students {
            if !health.is_sick(s) && rng.gen_bool(self.probability) && health.set_sick(s, true) {
                self.new_infections += 1;
            }
        }
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct ProgressObserver {
    contact_events: usize,
    reports:        Vec<CampusReport>,
}

impl SimObserver for ProgressObserver {
    fn on_tick_end(&mut self, _tick: Tick, contact_events: usize) {
        self.contact_events += contact_events;
    }

    fn on_report(&mut self, _tick: Tick, report: &CampusReport) {
        info!(
            time = %report.time,
            healthy = report.healthy,
            infected = report.infected,
            active_rosters = report.active_rosters,
            "report"
        );
        self.reports.push(report.clone());
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (config, campus) = match cli.command {
        Commands::Fixture { rosters, enrollments, students, infected, days, seed } => {
            let spec = match (rosters, enrollments) {
                (Some(r), Some(e)) => FixtureSpec::from_csv_readers(
                    File::open(&r).with_context(|| format!("opening {}", r.display()))?,
                    File::open(&e).with_context(|| format!("opening {}", e.display()))?,
                    students,
                )?,
                _ => FixtureSpec::bcb100x(),
            };
            let infected: Vec<StudentId> = infected.into_iter().map(StudentId).collect();
            let base = SimConfig::default();
            let clock = base.make_clock();
            let config = SimConfig {
                total_ticks: clock.ticks_for_days(days),
                seed,
                report_interval_ticks: clock.ticks_for_days(1),
                ..base
            };
            let campus = ScheduleBuilder::fixture(spec.infect(&infected))
                .build(&mut SimRng::new(config.seed))?;
            (config, campus)
        }
        Commands::Random { config } => {
            let run = match config {
                Some(path) => RunConfig::load(&path)?,
                None => RunConfig::default(),
            };
            let t0 = Instant::now();
            let campus = ScheduleBuilder::randomized(run.population, run.template)
                .build(&mut SimRng::new(run.sim.seed))?;
            info!(elapsed_ms = t0.elapsed().as_millis() as u64, "schedule built");
            (run.sim, campus)
        }
    };

    run(&config, campus, cli.transmission)
}

fn run(config: &SimConfig, campus: Campus, probability: f64) -> Result<()> {
    println!("=== campus contact simulation ===");
    println!(
        "Students: {}  |  Rosters: {}  |  Ticks: {}  |  Seed: {}",
        campus.student_count(),
        campus.roster_count(),
        config.total_ticks,
        config.seed
    );
    println!();

    let model = ExposureModel { probability, new_infections: 0 };
    let mut schedule = GlobalSchedule::from_config(config, model)?;
    schedule.initialize(campus)?;

    let mut obs = ProgressObserver::default();
    let t0 = Instant::now();
    let end = schedule.run_ticks(Tick::ZERO, config.total_ticks, &mut obs)?;
    let elapsed = t0.elapsed();

    let last = schedule.report(end)?;
    let (d, h, m) = schedule.clock().elapsed_dhm(end);
    println!(
        "Simulated {d}d {h}h {m}m in {:.3} s (ended at {})",
        elapsed.as_secs_f64(),
        schedule.current_time(config.end_tick())?
    );
    println!("  contact events : {}", obs.contact_events);
    println!("  new infections : {}", schedule.model().new_infections);
    println!();

    println!("{:<22} {:>10} {:>10} {:>8}", "Time", "Healthy", "Infected", "Active");
    println!("{}", "-".repeat(54));
    for r in obs.reports.iter().chain(std::iter::once(&last)) {
        println!(
            "{:<22} {:>10} {:>10} {:>8}",
            r.time, r.healthy, r.infected, r.active_rosters
        );
    }
    println!();
    println!("Final infected share: {:.2}%", last.infected_fraction() * 100.0);

    Ok(())
}
