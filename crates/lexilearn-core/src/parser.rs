//! TOML puzzle pack and questionnaire parser.
//!
//! Loads puzzle packs from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Puzzle, Token};
use crate::puzzles::PuzzleSet;
use crate::screening::{Question, Questionnaire, ResponseOption};

/// Intermediate TOML structure for puzzle pack files.
#[derive(Debug, Deserialize)]
struct TomlPackFile {
    pack: TomlPackHeader,
    #[serde(default)]
    puzzles: Vec<TomlPuzzle>,
}

#[derive(Debug, Deserialize)]
struct TomlPackHeader {
    id: String,
    name: String,
}

/// A puzzle is either a word (`word` + `scrambled`) or a token list
/// (`target` + `scramble`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TomlPuzzle {
    Word {
        #[serde(default)]
        id: Option<String>,
        word: String,
        scrambled: String,
    },
    Sequence {
        id: String,
        target: Vec<String>,
        scramble: Vec<String>,
    },
}

/// Parse a single TOML file into a `PuzzleSet`.
pub fn parse_pack(path: &Path) -> Result<PuzzleSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read puzzle pack: {}", path.display()))?;

    parse_pack_str(&content, path)
}

/// Parse a TOML string into a `PuzzleSet` (useful for testing).
pub fn parse_pack_str(content: &str, source_path: &Path) -> Result<PuzzleSet> {
    let parsed: TomlPackFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let puzzles = parsed
        .puzzles
        .into_iter()
        .map(|p| {
            let puzzle = match p {
                TomlPuzzle::Word {
                    id,
                    word,
                    scrambled,
                } => {
                    let mut puzzle = Puzzle::from_word(&word, &scrambled)?;
                    if let Some(id) = id {
                        puzzle.id = id;
                    }
                    puzzle
                }
                TomlPuzzle::Sequence {
                    id,
                    target,
                    scramble,
                } => Puzzle::new(
                    id,
                    target.into_iter().map(Token::from).collect(),
                    scramble.into_iter().map(Token::from).collect(),
                )?,
            };
            Ok(puzzle)
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("invalid puzzle in {}", source_path.display()))?;

    Ok(PuzzleSet::new(parsed.pack.id, parsed.pack.name, puzzles)?)
}

/// Recursively load all `.toml` puzzle packs from a directory.
pub fn load_pack_directory(dir: &Path) -> Result<Vec<PuzzleSet>> {
    let mut packs = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            packs.extend(load_pack_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_pack(&path) {
                Ok(pack) => packs.push(pack),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    packs.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(packs)
}

/// A warning from puzzle pack validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Puzzle ID (None for pack-level warnings).
    pub puzzle_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a puzzle pack and return any warnings.
///
/// Structural errors (bad permutations, empty packs) are rejected while
/// parsing; these are things that load but make a poor game.
pub fn validate_pack(pack: &PuzzleSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();

    for puzzle in pack.iter() {
        if !seen.insert(puzzle.id.as_str()) {
            warnings.push(ValidationWarning {
                puzzle_id: Some(puzzle.id.clone()),
                message: format!("duplicate puzzle ID: {}", puzzle.id),
            });
        }

        if puzzle.target == puzzle.initial_scramble {
            warnings.push(ValidationWarning {
                puzzle_id: Some(puzzle.id.clone()),
                message: "scramble is already in the correct order".into(),
            });
        }

        if puzzle.len() == 1 {
            warnings.push(ValidationWarning {
                puzzle_id: Some(puzzle.id.clone()),
                message: "single-token puzzle has nothing to arrange".into(),
            });
        }
    }

    warnings
}

#[derive(Debug, Deserialize)]
struct TomlQuestionnaireFile {
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    text: String,
    options: Vec<String>,
}

/// Parse a questionnaire where each question lists its option labels in
/// ascending value order.
pub fn parse_questionnaire_str(content: &str) -> Result<Questionnaire> {
    let parsed: TomlQuestionnaireFile =
        toml::from_str(content).context("failed to parse questionnaire TOML")?;
    let questions = parsed
        .questions
        .into_iter()
        .map(|q| Question {
            id: q.id,
            text: q.text,
            options: q
                .options
                .into_iter()
                .zip(0u32..)
                .map(|(label, value)| ResponseOption { label, value })
                .collect(),
        })
        .collect();
    Ok(Questionnaire::new(questions)?)
}

/// Load a questionnaire file.
pub fn parse_questionnaire(path: &Path) -> Result<Questionnaire> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read questionnaire: {}", path.display()))?;
    parse_questionnaire_str(&content)
        .with_context(|| format!("invalid questionnaire: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const WORDS_TOML: &str = r#"
[pack]
id = "animals"
name = "Animal Words"

[[puzzles]]
word = "CAT"
scrambled = "TAC"

[[puzzles]]
id = "dog-word"
word = "DOG"
scrambled = "GOD"

[[puzzles]]
id = "morning"
target = ["Wake up", "Brush teeth", "Eat breakfast"]
scramble = ["Eat breakfast", "Wake up", "Brush teeth"]
"#;

    #[test]
    fn parse_mixed_pack() {
        let pack = parse_pack_str(WORDS_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(pack.id, "animals");
        assert_eq!(pack.count(), 3);
        assert_eq!(pack.get(0).unwrap().id, "cat");
        assert_eq!(pack.get(1).unwrap().id, "dog-word");
        let morning = pack.get(2).unwrap();
        assert_eq!(morning.target[0], Token::from("Wake up"));
        assert!(validate_pack(&pack).is_empty());
    }

    #[test]
    fn parse_rejects_bad_scramble() {
        let toml_str = r#"
[pack]
id = "bad"
name = "Bad"

[[puzzles]]
word = "CAT"
scrambled = "TAG"
"#;
        let err = parse_pack_str(toml_str, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("not a permutation"));
    }

    #[test]
    fn parse_rejects_empty_pack() {
        let toml_str = "[pack]\nid = \"e\"\nname = \"E\"\n";
        assert!(parse_pack_str(toml_str, &PathBuf::from("e.toml")).is_err());
    }

    #[test]
    fn validate_flags_duplicates_and_solved_scrambles() {
        let toml_str = r#"
[pack]
id = "warn"
name = "Warnings"

[[puzzles]]
word = "CAT"
scrambled = "CAT"

[[puzzles]]
word = "CAT"
scrambled = "ACT"

[[puzzles]]
word = "A"
scrambled = "A"
"#;
        let pack = parse_pack_str(toml_str, &PathBuf::from("warn.toml")).unwrap();
        let warnings = validate_pack(&pack);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
        assert!(warnings.iter().any(|w| w.message.contains("already in the correct order")));
        assert!(warnings.iter().any(|w| w.message.contains("single-token")));
    }

    #[test]
    fn load_directory_skips_broken_files() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.toml"), WORDS_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not = [valid").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let packs = load_pack_directory(dir.path()).unwrap();
        assert_eq!(packs.len(), 1);
        assert_eq!(packs[0].name, "Animal Words");
    }

    #[test]
    fn parse_questionnaire_assigns_values_in_order() {
        let toml_str = r#"
[[questions]]
id = "q1"
text = "Trouble with rhymes?"
options = ["Never", "Sometimes", "Often", "Always"]

[[questions]]
id = "q2"
text = "Family history?"
options = ["No", "Unsure", "Yes"]
"#;
        let q = parse_questionnaire_str(toml_str).unwrap();
        assert_eq!(q.len(), 2);
        assert_eq!(q.max_score(), 5);
        assert_eq!(q.questions()[0].options[3].value, 3);
    }

    #[test]
    fn parse_questionnaire_rejects_two_options() {
        let toml_str = r#"
[[questions]]
id = "q1"
text = "?"
options = ["No", "Yes"]
"#;
        assert!(parse_questionnaire_str(toml_str).is_err());
    }
}
