//! Session context for the two-step form.
//!
//! Holds what a single user's sitting needs: the current page, whether the
//! personal form was submitted, and the diagnosis history. The rendering
//! layer receives this explicitly; the engine never sees it.

use crate::engine::{evaluate, DiagnosisResult};
use crate::error::{Result, TriageError};
use crate::history::{History, HistoryEntry};
use crate::intake::{Choice, SymptomIntake};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_AGE: u8 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
}

impl Choice for Gender {
    const FIELD: &'static str = "gender";
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female, Gender::PreferNotToSay];

    fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::PreferNotToSay => "Prefer not to say",
        }
    }
}

impl FromStr for Gender {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_choice(s)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Step one of the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
}

impl PersonalInfo {
    /// Validate and build; the name may be empty, the age must be 0..=120
    pub fn new(name: &str, age: i64, gender: Gender) -> Result<Self> {
        let age = u8::try_from(age)
            .ok()
            .filter(|a| *a <= MAX_AGE)
            .ok_or(TriageError::InvalidAge(age))?;
        Ok(Self {
            name: name.trim().to_string(),
            age,
            gender,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Diagnosis,
    History,
}

/// One user's sitting
#[derive(Debug, Default)]
pub struct Session {
    page: Page,
    personal: Option<PersonalInfo>,
    personal_done: bool,
    history: History,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// Whether the medical form is unlocked
    pub fn personal_done(&self) -> bool {
        self.personal_done
    }

    pub fn personal(&self) -> Option<&PersonalInfo> {
        self.personal.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Back to the diagnosis page with the personal form locked again.
    /// The last person is kept until a new personal form is submitted.
    pub fn new_diagnosis(&mut self) {
        self.page = Page::Diagnosis;
        self.personal_done = false;
    }

    /// Back to the diagnosis page keeping the current person
    pub fn show_diagnosis(&mut self) {
        self.page = Page::Diagnosis;
    }

    pub fn show_history(&mut self) {
        self.page = Page::History;
    }

    pub fn submit_personal(&mut self, info: PersonalInfo) {
        self.personal = Some(info);
        self.personal_done = true;
    }

    /// Evaluate the medical form and record it in the history
    pub fn submit_medical(&mut self, intake: SymptomIntake) -> Result<DiagnosisResult> {
        let person = match (&self.personal, self.personal_done) {
            (Some(person), true) => person,
            _ => return Err(TriageError::PersonalInfoRequired),
        };

        let result = evaluate(&intake);
        let entry = HistoryEntry::new(Local::now(), &person.name, intake.main_symptom, &result);
        self.history.push(entry);
        Ok(result)
    }

    /// Consume the session, keeping only its history
    pub fn into_history(self) -> History {
        self.history
    }
}
