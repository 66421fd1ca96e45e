//! Interactive two-step form
//!
//! Step one collects personal information, step two the medical details.
//! Single choice takes a number or a label, multi choice takes
//! comma-separated numbers or labels. "cancel" or "quit" (or end of input)
//! abandons the form, reported as `Ok(None)`.

use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};
use triage_common::intake::ADDITIONAL_SYMPTOMS;
use triage_common::{
    Choice, Duration, ExistingCondition, FeverLevel, Gender, MainSymptom, PainLevel, PersonalInfo,
    SymptomIntake, TriageError,
};

/// Line-oriented prompts over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
        }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Read one trimmed line; `None` on end of input or a cancel word
    fn read_answer(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if self.color {
            write!(self.output, "   {}  ", prompt.bright_magenta())?;
        } else {
            write!(self.output, "   {}  ", prompt)?;
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let answer = line.trim();
        if answer.eq_ignore_ascii_case("cancel") || answer.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }
        Ok(Some(answer.to_string()))
    }

    fn complain(&mut self, message: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.output, "   {}  {}", "!".yellow(), message)
        } else {
            writeln!(self.output, "   !  {}", message)
        }
    }

    fn list_options(&mut self, labels: &[&str]) -> io::Result<()> {
        for (i, label) in labels.iter().enumerate() {
            let number = format!("[{}]", i + 1);
            if self.color {
                writeln!(self.output, "   {}  {}", number.cyan(), label)?;
            } else {
                writeln!(self.output, "   {}  {}", number, label)?;
            }
        }
        Ok(())
    }

    fn section(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.output)?;
        if self.color {
            writeln!(self.output, "{}", title.bright_white().bold())?;
        } else {
            writeln!(self.output, "{}", title)?;
        }
        Ok(())
    }

    /// Free text; may be empty
    pub fn ask_text(&mut self, question: &str) -> io::Result<Option<String>> {
        writeln!(self.output, "{}", question)?;
        self.read_answer(">")
    }

    /// Whole number; re-asks until it parses
    pub fn ask_number(&mut self, question: &str) -> io::Result<Option<i64>> {
        writeln!(self.output, "{}", question)?;
        loop {
            let Some(answer) = self.read_answer(">")? else {
                return Ok(None);
            };
            match answer.parse::<i64>() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => self.complain("Please enter a whole number")?,
            }
        }
    }

    /// Pick exactly one value of `T`
    pub fn ask_choice<T: Choice>(&mut self, question: &str) -> io::Result<Option<T>> {
        let labels: Vec<&str> = T::ALL.iter().map(|c| c.label()).collect();
        let picked = self.ask_one(question, &labels, |answer| {
            T::parse_choice(answer)
                .ok()
                .and_then(|c| T::ALL.iter().position(|v| v.label() == c.label()))
        })?;
        Ok(picked.map(|i| T::ALL[i]))
    }

    /// Pick one of `labels`, returning its index
    pub fn ask_menu(&mut self, question: &str, labels: &[&str]) -> io::Result<Option<usize>> {
        self.ask_one(question, labels, |answer| {
            labels.iter().position(|l| l.eq_ignore_ascii_case(answer))
        })
    }

    /// Numbered list; answers are a 1-based number or whatever `by_label`
    /// resolves
    fn ask_one(
        &mut self,
        question: &str,
        labels: &[&str],
        by_label: impl Fn(&str) -> Option<usize>,
    ) -> io::Result<Option<usize>> {
        writeln!(self.output, "{}", question)?;
        self.list_options(labels)?;

        loop {
            let Some(answer) = self.read_answer("Enter number:")? else {
                return Ok(None);
            };
            if let Some(index) = pick_index(&answer, labels.len()).or_else(|| by_label(&answer)) {
                return Ok(Some(index));
            }
            self.complain(&format!(
                "Please enter a number between 1 and {}",
                labels.len()
            ))?;
        }
    }

    /// Pick any number of labels; an empty line selects none
    pub fn ask_many(&mut self, question: &str, labels: &[&str]) -> io::Result<Option<Vec<String>>> {
        writeln!(self.output, "{}", question)?;
        writeln!(self.output, "   (Enter numbers separated by commas, or leave empty)")?;
        self.list_options(labels)?;

        loop {
            let Some(answer) = self.read_answer("Enter numbers:")? else {
                return Ok(None);
            };
            match parse_many(&answer, labels) {
                Ok(picked) => return Ok(Some(picked)),
                Err(bad) => self.complain(&format!("Not an option: {}", bad))?,
            }
        }
    }

    /// Step one: name, age, gender
    pub fn personal_form(&mut self) -> io::Result<Option<PersonalInfo>> {
        self.section("Personal Information")?;

        let Some(name) = self.ask_text("Full Name")? else {
            return Ok(None);
        };

        let info = loop {
            let Some(age) = self.ask_number("Age")? else {
                return Ok(None);
            };
            match PersonalInfo::new(&name, age, Gender::default()) {
                Ok(info) => break info,
                Err(TriageError::InvalidAge(_)) => {
                    self.complain("Age must be between 0 and 120")?;
                }
                Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidInput, e.to_string())),
            }
        };

        let Some(gender) = self.ask_choice::<Gender>("Gender")? else {
            return Ok(None);
        };

        Ok(Some(PersonalInfo { gender, ..info }))
    }

    /// Step two: the medical details that make up an intake
    pub fn medical_form(&mut self) -> io::Result<Option<SymptomIntake>> {
        self.section("Medical Details")?;

        let Some(main_symptom) = self.ask_choice::<MainSymptom>("Main Symptom")? else {
            return Ok(None);
        };
        let Some(duration) = self.ask_choice::<Duration>("Symptom Duration")? else {
            return Ok(None);
        };
        let Some(fever) = self.ask_choice::<FeverLevel>("Fever Level")? else {
            return Ok(None);
        };
        let Some(pain) = self.ask_choice::<PainLevel>("Pain Level")? else {
            return Ok(None);
        };
        let Some(condition) = self.ask_choice::<ExistingCondition>("Existing Medical Condition")?
        else {
            return Ok(None);
        };
        let Some(additional) = self.ask_many("Additional Symptoms", ADDITIONAL_SYMPTOMS)? else {
            return Ok(None);
        };
        let Some(other) = self.ask_text("Other symptoms (optional)")? else {
            return Ok(None);
        };

        let intake = additional
            .iter()
            .fold(SymptomIntake::new(main_symptom), |intake, s| intake.with_additional(s))
            .with_duration(duration)
            .with_fever(fever)
            .with_pain(pain)
            .with_condition(condition)
            .with_free_text(&other);
        Ok(Some(intake))
    }
}

/// 1-based number to 0-based index within `len`
fn pick_index(answer: &str, len: usize) -> Option<usize> {
    answer
        .parse::<usize>()
        .ok()
        .filter(|n| *n >= 1 && *n <= len)
        .map(|n| n - 1)
}

/// Comma-separated numbers or labels; returns the first bad token on error
fn parse_many(answer: &str, labels: &[&str]) -> Result<Vec<String>, String> {
    let mut picked: Vec<String> = Vec::new();
    for token in answer.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let label = pick_index(token, labels.len())
            .map(|i| labels[i])
            .or_else(|| labels.iter().copied().find(|l| l.eq_ignore_ascii_case(token)))
            .ok_or_else(|| token.to_string())?;
        if !picked.iter().any(|p| p == label) {
            picked.push(label.to_string());
        }
    }
    Ok(picked)
}
