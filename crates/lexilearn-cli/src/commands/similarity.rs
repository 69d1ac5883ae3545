//! The `lexilearn similarity` command.

use anyhow::Result;

use lexilearn_core::similarity::similarity_percent;

fn parse_vector(raw: &str) -> Result<Vec<f32>> {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            s.trim()
                .parse::<f32>()
                .map_err(|_| anyhow::anyhow!("invalid number: '{}'", s.trim()))
        })
        .collect()
}

/// Scores above this count as a match.
const MATCH_THRESHOLD: u8 = 80;

fn verdict(percent: u8) -> &'static str {
    if percent > MATCH_THRESHOLD {
        "Excellent work, that's definitely a house!"
    } else {
        "Good try! The AI thinks it's something else, but keep practicing!"
    }
}

pub fn execute(first: &str, second: &str) -> Result<()> {
    let a = parse_vector(first)?;
    let b = parse_vector(second)?;

    match similarity_percent(&a, &b) {
        Some(percent) => {
            println!("Similarity: {percent}%");
            println!("{}", verdict(percent));
        }
        None => anyhow::bail!(
            "cannot compare: vectors must have the same length, be finite, and not be all zeros"
        ),
    }
    Ok(())
}
