//! Parent screening questionnaire and its scoring rubric.
//!
//! Each question has 3 or 4 ordered answers worth `0..k-1` points. The total
//! is the sum of the chosen values, and the share of the maximum possible
//! score falls into one of three bands.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown alongside every result.
pub const DISCLAIMER: &str = "This screening is not a diagnosis. It is a tool to help identify potential signs of dyslexia. Please consult a qualified professional for an accurate diagnosis.";

/// Below this percentage the band is Low.
pub const LOW_THRESHOLD: f64 = 30.0;
/// Below this percentage (and at or above [`LOW_THRESHOLD`]) the band is Moderate.
pub const HIGH_THRESHOLD: f64 = 60.0;

const MIN_OPTIONS: usize = 3;
const MAX_OPTIONS: usize = 4;

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseOption {
    pub label: String,
    pub value: u32,
}

/// A single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<ResponseOption>,
}

impl Question {
    /// Highest value an answer to this question can have.
    pub fn max_value(&self) -> u32 {
        self.options.len().saturating_sub(1) as u32
    }
}

/// Errors from building a questionnaire or scoring answers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreeningError {
    #[error("questionnaire has no questions")]
    Empty,

    #[error("question '{id}' has {count} options, expected 3 or 4")]
    OptionCount { id: String, count: usize },

    #[error("question '{id}': option values must be 0..{count} in order")]
    OptionValues { id: String, count: usize },

    #[error("duplicate question id '{0}'")]
    DuplicateId(String),

    #[error("question '{0}' was not answered")]
    Unanswered(String),

    #[error("answer {value} is not an option for question '{id}'")]
    InvalidAnswer { id: String, value: u32 },

    #[error("answer given for unknown question '{0}'")]
    UnknownQuestion(String),
}

/// Chosen value per question id.
pub type Answers = HashMap<String, u32>;

/// Qualitative likelihood band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Low,
    Moderate,
    High,
}

impl Band {
    /// Band for a percentage of the maximum score.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < LOW_THRESHOLD {
            Band::Low
        } else if percentage < HIGH_THRESHOLD {
            Band::Moderate
        } else {
            Band::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Band::Low => "Low Likelihood",
            Band::Moderate => "Moderate Likelihood",
            Band::High => "High Likelihood",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Band::Low => "Based on your answers, the observed behaviors show a low correlation with common signs of dyslexia.",
            Band::Moderate => "Your answers indicate some signs that are consistent with dyslexia.",
            Band::High => "The behaviors you've reported show a strong correlation with the common signs of dyslexia.",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Band::Low => "While the signs are not strong, continue to monitor your child's progress and encourage a love for reading. If you have any concerns, it's always best to speak with a teacher or pediatrician.",
            Band::Moderate => "It may be beneficial to discuss these observations with your child's teacher and consider a professional evaluation. Early support can make a significant difference.",
            Band::High => "We strongly recommend that you consult with a specialist, such as an educational psychologist or a pediatrician, for a formal diagnostic assessment. Early and targeted intervention is key to helping children with dyslexia thrive.",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scored answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub raw: u32,
    pub max: u32,
    pub percentage: f64,
    pub band: Band,
}

/// A validated set of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    questions: Vec<Question>,
}

impl Questionnaire {
    pub fn new(questions: Vec<Question>) -> Result<Self, ScreeningError> {
        if questions.is_empty() {
            return Err(ScreeningError::Empty);
        }
        let mut seen = HashSet::new();
        for q in &questions {
            let count = q.options.len();
            if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&count) {
                return Err(ScreeningError::OptionCount {
                    id: q.id.clone(),
                    count,
                });
            }
            if q.options.iter().zip(0u32..).any(|(o, i)| o.value != i) {
                return Err(ScreeningError::OptionValues {
                    id: q.id.clone(),
                    count,
                });
            }
            if !seen.insert(q.id.as_str()) {
                return Err(ScreeningError::DuplicateId(q.id.clone()));
            }
        }
        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn max_score(&self) -> u32 {
        self.questions.iter().map(Question::max_value).sum()
    }

    /// Answers given positionally, one value per question.
    pub fn answers_in_order(&self, values: &[u32]) -> Answers {
        self.questions
            .iter()
            .zip(values)
            .map(|(q, v)| (q.id.clone(), *v))
            .collect()
    }

    /// Score a complete set of answers.
    pub fn score(&self, answers: &Answers) -> Result<ScreeningResult, ScreeningError> {
        if let Some(id) = answers
            .keys()
            .find(|id| !self.questions.iter().any(|q| &q.id == *id))
        {
            return Err(ScreeningError::UnknownQuestion(id.clone()));
        }

        let mut raw = 0;
        for q in &self.questions {
            let value = *answers
                .get(&q.id)
                .ok_or_else(|| ScreeningError::Unanswered(q.id.clone()))?;
            if value > q.max_value() {
                return Err(ScreeningError::InvalidAnswer {
                    id: q.id.clone(),
                    value,
                });
            }
            raw += value;
        }

        let max = self.max_score();
        let percentage = if max == 0 {
            0.0
        } else {
            f64::from(raw) / f64::from(max) * 100.0
        };
        Ok(ScreeningResult {
            raw,
            max,
            percentage,
            band: Band::from_percentage(percentage),
        })
    }
}

fn frequency_question(id: &str, text: &str) -> Question {
    labelled_question(id, text, &["Rarely or Never", "Sometimes", "Often"])
}

fn labelled_question(id: &str, text: &str, labels: &[&str]) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        options: labels
            .iter()
            .zip(0u32..)
            .map(|(label, value)| ResponseOption {
                label: label.to_string(),
                value,
            })
            .collect(),
    }
}

/// The twelve-question parent screening.
pub fn builtin_questionnaire() -> Questionnaire {
    let questions = vec![
        frequency_question("q1", "Does your child have trouble recognizing the letters of the alphabet?"),
        frequency_question("q2", "Does your child misread or omit common short words like 'a', 'the', 'is'?"),
        frequency_question("q3", "Does your child confuse letters that look similar, like 'b' and 'd', or 'p' and 'q'?"),
        frequency_question("q4", "Does your child have difficulty sounding out new words?"),
        frequency_question("q5", "Does your child complain about words or letters 'moving around' on the page while reading?"),
        frequency_question("q6", "Does your child struggle with rhyming words (e.g., cat, hat, bat)?"),
        frequency_question("q7", "Does your child have difficulty remembering sequences, like days of the week, months, or the alphabet?"),
        frequency_question("q8", "Is your child's spelling unpredictable and inconsistent (e.g., spelling the same word differently in the same document)?"),
        frequency_question("q9", "Does your child avoid reading aloud or seem unusually stressed or tired when asked to do so?"),
        frequency_question("q10", "Does your child have trouble telling left from right?"),
        frequency_question("q11", "When writing, does your child reverse letters or numbers past the first grade (e.g., writing 'saw' as 'was', or '3' as 'E')?"),
        labelled_question("q12", "Is there a family history of dyslexia or reading difficulties?", &["No", "Unsure", "Yes"]),
    ];
    Questionnaire { questions }
}
