//! The `lexilearn init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("lexilearn.toml").exists() {
        println!("lexilearn.toml already exists, skipping.");
    } else {
        std::fs::write("lexilearn.toml", SAMPLE_CONFIG)?;
        println!("Created lexilearn.toml");
    }

    std::fs::create_dir_all("puzzles")?;
    let example_path = Path::new("puzzles/words.toml");
    if example_path.exists() {
        println!("puzzles/words.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_PACK)?;
        println!("Created puzzles/words.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit lexilearn.toml to pick a provider and score store");
    println!("  2. Run: lexilearn validate --pack puzzles/words.toml");
    println!("  3. Run: lexilearn spell --pack puzzles/words.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# lexilearn configuration

user_id = "guest"
# user_name = "Sam"
success_delay_ms = 1000
puzzle_order = "round-robin"   # or "shuffle"
seed = 0

[provider]
type = "mock"
seed = 0

# [provider]
# type = "http"
# base_url = "http://localhost:3000"
# api_key = "${LEXILEARN_API_KEY}"

[score_store]
type = "file"
dir = "./lexilearn-data"
"#;

const EXAMPLE_PACK: &str = r#"[pack]
id = "animals"
name = "Animal Words"

[[puzzles]]
word = "CAT"
scrambled = "TCA"

[[puzzles]]
word = "DOG"
scrambled = "GDO"

[[puzzles]]
word = "FISH"
scrambled = "SHIF"

[[puzzles]]
id = "morning"
target = ["Wake up", "Brush teeth", "Eat breakfast", "Go to school"]
scramble = ["Eat breakfast", "Go to school", "Wake up", "Brush teeth"]
"#;
