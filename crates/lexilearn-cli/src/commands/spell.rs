//! The `lexilearn spell` command.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;

use lexilearn_core::parser;
use lexilearn_core::puzzles::{spelling_words, PickOrder, PuzzleSet};
use lexilearn_core::session::Session;
use lexilearn_providers::load_config_from;

use crate::repl;

fn load_puzzles(path: &Path) -> Result<PuzzleSet> {
    if !path.is_dir() {
        return parser::parse_pack(path);
    }

    let packs = parser::load_pack_directory(path)?;
    let puzzles = packs
        .iter()
        .flat_map(|pack| pack.iter().cloned())
        .collect();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "puzzles".to_string());
    Ok(PuzzleSet::new(name.clone(), name, puzzles)?)
}

pub async fn execute(
    pack: Option<PathBuf>,
    order: Option<PickOrder>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let puzzles = match &pack {
        Some(path) => load_puzzles(path)?,
        None => spelling_words(),
    };

    let mut session_config = config.session_config();
    if let Some(order) = order {
        session_config.order = order;
    }

    println!("{} ({} words)", puzzles.name, puzzles.count());
    println!("Type 'help' for commands.\n");

    let mut session = Session::new(puzzles, session_config);
    let stdin = io::stdin();
    repl::play(&mut session, stdin.lock(), &mut io::stdout()).await?;
    Ok(())
}
