//! The `lexilearn validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(pack_path: PathBuf) -> Result<()> {
    let packs = if pack_path.is_dir() {
        lexilearn_core::parser::load_pack_directory(&pack_path)?
    } else {
        vec![lexilearn_core::parser::parse_pack(&pack_path)?]
    };

    let mut total_warnings = 0;

    for pack in &packs {
        println!("Puzzle pack: {} ({} puzzles)", pack.name, pack.count());

        let warnings = lexilearn_core::parser::validate_pack(pack);
        for w in &warnings {
            let prefix = w
                .puzzle_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if packs.is_empty() {
        println!("No puzzle packs found.");
    } else if total_warnings == 0 {
        println!("All puzzle packs valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
