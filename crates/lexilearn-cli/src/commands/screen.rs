//! The `lexilearn screen` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use comfy_table::{Cell, Table};

use lexilearn_core::parser;
use lexilearn_core::screening::{builtin_questionnaire, Questionnaire, ScreeningResult, DISCLAIMER};

fn parse_answers(raw: &str) -> Result<Vec<u32>> {
    raw.split(',')
        .map(|s| {
            s.trim()
                .parse::<u32>()
                .map_err(|_| anyhow::anyhow!("invalid answer value: '{}'", s.trim()))
        })
        .collect()
}

/// Ask each question on stdout and read the chosen option number.
fn ask<R: BufRead, W: Write>(
    questionnaire: &Questionnaire,
    input: R,
    out: &mut W,
) -> Result<Vec<u32>> {
    let mut lines = input.lines();
    let mut values = Vec::with_capacity(questionnaire.len());

    for (n, question) in questionnaire.questions().iter().enumerate() {
        writeln!(out, "\n{}. {}", n + 1, question.text)?;
        for option in &question.options {
            writeln!(out, "   {}) {}", option.value, option.label)?;
        }
        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next() else {
                bail!("questionnaire not finished ({} of {} answered)", n, questionnaire.len());
            };
            match line?.trim().parse::<u32>() {
                Ok(value) if value <= question.max_value() => {
                    values.push(value);
                    break;
                }
                _ => writeln!(out, "Please enter 0-{}.", question.max_value())?,
            }
        }
    }
    Ok(values)
}

fn print_result(result: &ScreeningResult) {
    let mut table = Table::new();
    table.set_header(vec!["Score", "Percentage", "Result"]);
    table.add_row(vec![
        Cell::new(format!("{}/{}", result.raw, result.max)),
        Cell::new(format!("{:.0}%", result.percentage)),
        Cell::new(result.band.label()),
    ]);

    println!("\n{table}");
    println!("\n{}", result.band.description());
    println!("{}", result.band.advice());
    println!("\n{DISCLAIMER}");
}

pub fn execute(
    answers: Option<String>,
    questionnaire_path: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let questionnaire = match &questionnaire_path {
        Some(path) => parser::parse_questionnaire(path)?,
        None => builtin_questionnaire(),
    };

    let values = match answers {
        Some(raw) => parse_answers(&raw)?,
        None => {
            println!("{DISCLAIMER}");
            let stdin = io::stdin();
            ask(&questionnaire, stdin.lock(), &mut io::stdout())?
        }
    };
    anyhow::ensure!(
        values.len() == questionnaire.len(),
        "expected {} answers, got {}",
        questionnaire.len(),
        values.len()
    );

    let result = questionnaire
        .score(&questionnaire.answers_in_order(&values))
        .context("could not score answers")?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print_result(&result),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_answer_list() {
        assert_eq!(parse_answers("0, 1,2").unwrap(), vec![0, 1, 2]);
        assert!(parse_answers("0,x").is_err());
    }

    #[test]
    fn ask_reprompts_on_bad_input() {
        let questionnaire = builtin_questionnaire();
        let input = format!("9\nabc\n1\n{}", "0\n".repeat(11));
        let mut out = Vec::new();
        let values = ask(&questionnaire, Cursor::new(input), &mut out).unwrap();
        assert_eq!(values.len(), 12);
        assert_eq!(values[0], 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Please enter 0-2."));
    }

    #[test]
    fn ask_fails_on_early_eof() {
        let questionnaire = builtin_questionnaire();
        let mut out = Vec::new();
        let err = ask(&questionnaire, Cursor::new("1\n"), &mut out).unwrap_err();
        assert!(err.to_string().contains("1 of 12 answered"));
    }
}
