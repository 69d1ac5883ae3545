//! lexilearn CLI: the reading games and screening in a terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use lexilearn_core::model::Mood;
use lexilearn_core::puzzles::PickOrder;

mod commands;
mod repl;

#[derive(Parser)]
#[command(
    name = "lexilearn",
    version,
    about = "Reading games and dyslexia screening for young learners"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Unscramble letters into words
    Spell {
        /// Puzzle pack file or directory (default: built-in words)
        #[arg(long)]
        pack: Option<PathBuf>,

        /// Puzzle order: round-robin, shuffle, or shuffle:<seed>
        #[arg(long)]
        order: Option<PickOrder>,
    },

    /// Put the events of a story in order
    Sequence {
        /// Story text to analyse
        #[arg(long, conflicts_with = "file")]
        story: Option<String>,

        /// Read the story from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Answer the screening questionnaire
    Screen {
        /// Answer values in question order (e.g. "0,1,2,...")
        #[arg(long)]
        answers: Option<String>,

        /// Questionnaire TOML file (default: built-in)
        #[arg(long)]
        questionnaire: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Letter discrimination by speech
    Listen {
        /// Recognised speech, one per attempt
        #[arg(long)]
        transcript: Vec<String>,
    },

    /// Compare two artwork feature vectors
    Similarity {
        /// Comma-separated numbers
        #[arg(allow_hyphen_values = true)]
        first: String,
        /// Comma-separated numbers
        #[arg(allow_hyphen_values = true)]
        second: String,
    },

    /// Tell the buddy how you feel
    Buddy {
        /// happy, sad, frustrated, or tired
        mood: Mood,

        /// User id (default from config)
        #[arg(long)]
        user: Option<String>,
    },

    /// Show the gem score
    Score {
        /// User id (default from config)
        #[arg(long)]
        user: Option<String>,
    },

    /// Validate puzzle pack TOML files
    Validate {
        /// Path to pack file or directory
        #[arg(long)]
        pack: PathBuf,
    },

    /// Create starter config and example puzzle pack
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lexilearn=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Spell { pack, order } => commands::spell::execute(pack, order, config).await,
        Commands::Sequence { story, file } => {
            commands::sequence::execute(story, file, config).await
        }
        Commands::Screen {
            answers,
            questionnaire,
            format,
        } => commands::screen::execute(answers, questionnaire, format),
        Commands::Listen { transcript } => commands::listen::execute(transcript).await,
        Commands::Similarity { first, second } => commands::similarity::execute(&first, &second),
        Commands::Buddy { mood, user } => commands::buddy::execute(mood, user, config).await,
        Commands::Score { user } => commands::buddy::score(user, config).await,
        Commands::Validate { pack } => commands::validate::execute(pack),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
