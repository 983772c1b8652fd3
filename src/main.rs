//! ironlog - Gym workout tracker

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use ironlog::config::Config;
use ironlog::format::format_kg;
use ironlog::tui::App;
use ironlog::History;

#[derive(Parser)]
#[command(name = "ironlog")]
#[command(author, version, about = "Gym workout tracker")]
struct Cli {
    /// Workout history JSON to analyze instead of the demo data
    #[arg(long, global = true, env = "IRONLOG_HISTORY")]
    history: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, global = true, env = "IRONLOG_LOG")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the workout tracker
    Tui,

    /// Print analytics for the workout history
    Analyze {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config {
        history: cli.history,
        log_file: cli.log_file,
    };
    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    config.init_logging(interactive)?;

    let history = History::open(config.history.as_deref())?;

    match cli.command {
        Some(Commands::Analyze { json }) => {
            let report = history.analytics().report(history.user_id());

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!("Gym Analytics ({})", report.user_id);
            println!("{:-<40}", "");
            println!("Total workouts:        {}", report.total_workouts);
            println!("Avg. workout duration: {:.2} min", report.average_duration_minutes);
            println!("Total weight lifted:   {}", format_kg(report.total_weight_lifted, 2));

            println!("\nWorkout duration");
            for point in &report.durations {
                println!("{:30} {:>6.0} min", point.name, point.minutes);
            }

            println!("\nExercise frequency");
            for slice in &report.exercise_frequency {
                println!("{:30} {:>3}x {:>4}%", slice.name, slice.count, slice.percent);
            }
        }

        Some(Commands::Tui) | None => {
            let mut app = App::new(history);
            app.run()?;
        }
    }

    Ok(())
}
