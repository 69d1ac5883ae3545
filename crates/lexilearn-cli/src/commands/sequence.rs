//! The `lexilearn sequence` command.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};

use lexilearn_core::puzzles::KNIGHT_SUMMARY;
use lexilearn_core::story::StoryGame;
use lexilearn_providers::{create_story_analyzer, load_config_from};

use crate::commands::into_notice;
use crate::repl;

pub async fn execute(
    story: Option<String>,
    file: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let story = match (story, file) {
        (Some(text), _) => Some(text),
        (None, Some(path)) => Some(
            std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read story: {}", path.display()))?,
        ),
        (None, None) => None,
    };

    let mut game = StoryGame::new(config.session_config());

    if let Some(text) = story {
        anyhow::ensure!(!text.trim().is_empty(), "the story is empty");
        let analyzer = create_story_analyzer(&config.provider)?;
        eprintln!("Reading your story...");
        game.load(analyzer.as_ref(), &text)
            .await
            .map_err(into_notice)?;
    }

    println!(
        "Summary: {}\n",
        game.summary().unwrap_or(KNIGHT_SUMMARY)
    );
    println!("Put the events in order. Type 'help' for commands.\n");

    let stdin = io::stdin();
    repl::play(game.session_mut(), stdin.lock(), &mut io::stdout()).await?;
    Ok(())
}
