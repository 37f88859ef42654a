use std::path::PathBuf;

use clap::Parser;
use trivia_rush::{logging, Quiz, QuizConfig, TimerConfig};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from (built-in bank if omitted)
    #[arg(short, long, env = "TRIVIA_QUESTIONS")]
    questions: Option<PathBuf>,

    /// JSON file keeping the leaderboard between runs (memory only if omitted)
    #[arg(short, long, env = "TRIVIA_RANKINGS")]
    rankings: Option<PathBuf>,

    /// Pause after an answer before the next question, in milliseconds
    #[arg(long, default_value_t = 1500)]
    advance_delay_ms: u64,

    /// Seconds counted down between categories
    #[arg(long, default_value_t = 3)]
    countdown: u32,

    /// Directory for log files
    #[arg(long, env = "TRIVIA_LOG_DIR", default_value = "logs")]
    log_dir: PathBuf,

    /// Log filter, e.g. "info" or "trivia_rush=debug"
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,
}

impl Args {
    fn quiz_config(&self) -> QuizConfig {
        QuizConfig {
            timers: TimerConfig {
                advance_delay: std::time::Duration::from_millis(self.advance_delay_ms),
                countdown_steps: self.countdown,
                ..TimerConfig::default()
            },
            questions_path: self.questions.clone(),
            rankings_path: self.rankings.clone(),
            ..QuizConfig::default()
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let log_guard = match logging::init(&args.log_dir, &args.log_level) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match Quiz::from_config(args.quiz_config()) {
        Ok(quiz) => quiz.run().await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "quiz exited with an error");
        drop(log_guard);
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
