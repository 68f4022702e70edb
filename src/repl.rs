use colored::Colorize;
use std::io::{BufRead, Write};

use crate::error::Result;
use crate::models::ApiResult;
use crate::normalize::normalize;
use crate::service::QaService;

pub const PROMPT: &str = "Your Question: ";
const EXIT_WORDS: [&str; 3] = ["exit", "quit", "q"];

/// Interactive question loop over any line source and sink
pub struct Repl<R, W> {
    service: QaService,
    model: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(service: QaService, model: impl Into<String>, input: R, output: W) -> Self {
        Self {
            service,
            model: model.into(),
            input,
            output,
        }
    }

    /// Runs until an exit word or end of input. Failed questions are printed
    /// and the loop carries on.
    pub async fn run(&mut self) -> Result<()> {
        self.print_banner()?;

        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                self.print_goodbye()?;
                break;
            }

            let question = line.trim();

            if is_exit_word(question) {
                self.print_goodbye()?;
                break;
            }

            if question.is_empty() {
                writeln!(self.output, "{}\n", "Please enter a valid question.".yellow())?;
                continue;
            }

            writeln!(
                self.output,
                "\n{} {}",
                "Processed Question:".bold(),
                normalize(question)
            )?;
            writeln!(self.output, "{}\n", "Querying LLM API...".dimmed())?;
            self.output.flush()?;

            match self.service.answer(question).await {
                ApiResult::Answer(text) => {
                    writeln!(self.output, "{}\n{}\n", "Answer:".green().bold(), text)?
                }
                ApiResult::Error(message) => {
                    writeln!(self.output, "{} {}\n", "Error:".red().bold(), message)?
                }
            }

            writeln!(self.output, "{}\n", "-".repeat(60))?;
        }

        Ok(())
    }

    fn print_banner(&mut self) -> Result<()> {
        let rule = "=".repeat(60);
        writeln!(self.output, "{rule}")?;
        writeln!(
            self.output,
            "{}",
            "Welcome to the LLM Question & Answering CLI".bold()
        )?;
        writeln!(self.output, "Powered by {}", self.model.cyan())?;
        writeln!(self.output, "{rule}")?;
        writeln!(self.output, "\nType 'exit' or 'quit' to end the session.\n")?;
        Ok(())
    }

    fn print_goodbye(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "\nThank you for using the LLM Q&A CLI. Goodbye!"
        )?;
        Ok(())
    }
}

fn is_exit_word(input: &str) -> bool {
    EXIT_WORDS
        .iter()
        .any(|word| input.eq_ignore_ascii_case(word))
}
