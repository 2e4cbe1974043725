use anyhow::{Context, Result};
use dialoguer::{Input, Select};

/// Source of interactive answers for the menu sessions.
///
/// Malformed numeric text is re-prompted here; range checks belong to the
/// calculators.
pub trait Prompter {
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize>;
    fn number(&mut self, prompt: &str) -> Result<f64>;
    fn integer(&mut self, prompt: &str) -> Result<i64>;
    fn text(&mut self, prompt: &str) -> Result<String>;
}

/// dialoguer-backed prompter on the controlling terminal.
pub struct TermPrompter;

impl Prompter for TermPrompter {
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .context("Menu selection failed")
    }

    fn number(&mut self, prompt: &str) -> Result<f64> {
        Input::<f64>::new()
            .with_prompt(prompt)
            .interact_text()
            .context("Could not read a number")
    }

    fn integer(&mut self, prompt: &str) -> Result<i64> {
        Input::<i64>::new()
            .with_prompt(prompt)
            .interact_text()
            .context("Could not read a whole number")
    }

    fn text(&mut self, prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .context("Could not read text")
    }
}
