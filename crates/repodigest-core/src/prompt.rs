//! Prompt builders.
//!
//! Pure functions from structured inputs to prompt strings, so the exact
//! text sent to the model is verifiable without any network call.
//!
//! Two aggregation formats exist because the second stage went through
//! iterations: one asks for a purpose overview plus example runs, the other
//! asks for a developer-ready problem statement. Neither is canonical; the
//! caller picks.

use repodigest_types::llm::{CompletionRequest, Message};

/// Per-chunk analysis prompt.
#[derive(Debug, Clone)]
pub struct ChunkPrompt<'a> {
    /// Language name as shown to the model (e.g., "Scala").
    pub language: &'a str,
    /// The chunk text.
    pub code: &'a str,
}

impl ChunkPrompt<'_> {
    pub fn render(&self) -> String {
        format!(
            "You are an expert in {language} software engineering.\n\
             Analyze the following {language} code and explain what it is doing \
             and what kind of problem it helps solve.\n\
             \n\
             ```{fence}\n\
             {code}\n\
             ```\n",
            language = self.language,
            fence = self.language.to_lowercase(),
            code = self.code,
        )
    }
}

/// Shape of the second-stage synthesis prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationFormat {
    /// Ask for the codebase's overall purpose and three example runs.
    Questions,
    /// Ask for a precise, developer-ready problem statement.
    ProblemStatement,
}

/// Second-stage prompt combining all per-chunk summaries.
#[derive(Debug, Clone)]
pub struct AggregationPrompt<'a> {
    pub language: &'a str,
    pub summaries: &'a [String],
    pub format: AggregationFormat,
}

impl AggregationPrompt<'_> {
    /// Optional system message; only the problem-statement format uses one.
    pub fn system(&self) -> Option<String> {
        match self.format {
            AggregationFormat::Questions => None,
            AggregationFormat::ProblemStatement => {
                Some(format!("You are a {} expert.", self.language))
            }
        }
    }

    pub fn render(&self) -> String {
        let count = self.summaries.len();
        let joined = self.summaries.join("\n\n");
        match self.format {
            AggregationFormat::Questions => format!(
                "Here are the {count} summaries of different parts of a {language} project:\n\
                 {joined}\n\
                 \n\
                 Based on these, answer the following questions.\n\
                 Questions:\n\
                 1) What is the overall purpose of this codebase? What problem is this project trying to solve?\n\
                 2) Give 3 examples (runs) of the program with input and output.\n\
                 \n\
                 Answers:\n",
                language = self.language,
            ),
            AggregationFormat::ProblemStatement => format!(
                "Here are the {count} summaries of different parts of a {language} project:\n\
                 {joined}\n\
                 \n\
                 Based on these, give me a precise problem statement with example input and \
                 output so that I can ask my developer to develop a program based on the \
                 problem statement provided by you. Provide as much detail as possible for \
                 the developer to write a program to solve this problem, including input \
                 restrictions and expected output.\n\
                 \n\
                 Answers:\n",
                language = self.language,
            ),
        }
    }
}

/// Assemble a single-user-message [`CompletionRequest`].
pub fn single_turn_request(
    model: &str,
    prompt: String,
    system: Option<String>,
    max_tokens: u32,
    temperature: Option<f64>,
) -> CompletionRequest {
    CompletionRequest {
        model: model.to_string(),
        messages: vec![Message::user(prompt)],
        system,
        max_tokens,
        temperature,
    }
}
