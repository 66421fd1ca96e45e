//! Symptom intake record and the enumerated form choices.
//!
//! Every choice type carries the exact label the form shows. Parsing accepts
//! the label in any case, kebab/snake identifiers, and an ASCII hyphen in
//! place of the en dash used by duration labels.

use crate::error::{Result, TriageError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A closed set of form choices with display labels
pub trait Choice: Copy + Sized + 'static {
    /// Field name used in error messages
    const FIELD: &'static str;
    /// All values in form order
    const ALL: &'static [Self];

    /// Label shown by the form
    fn label(&self) -> &'static str;

    /// Parse a user-supplied value against the labels
    fn parse_choice(input: &str) -> Result<Self> {
        let wanted = choice_key(input);
        if wanted.is_empty() {
            return Err(TriageError::unknown(Self::FIELD, input));
        }
        Self::ALL
            .iter()
            .copied()
            .find(|c| choice_key(c.label()) == wanted)
            .ok_or_else(|| TriageError::unknown(Self::FIELD, input))
    }
}

/// Comparison key: lowercase alphanumerics only, so "Stomach Pain",
/// "stomach-pain" and "STOMACH_PAIN" collapse to the same key.
fn choice_key(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Primary complaint driving the top-level rule branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MainSymptom {
    Fever,
    Cough,
    Headache,
    #[serde(rename = "Stomach Pain")]
    StomachPain,
    #[serde(rename = "Body Pain")]
    BodyPain,
    #[serde(rename = "Sore Throat")]
    SoreThroat,
    Nausea,
    Fatigue,
    #[serde(rename = "Back Pain")]
    BackPain,
    #[serde(rename = "Shortness of Breath")]
    ShortnessOfBreath,
    Rash,
    Dizziness,
}

impl MainSymptom {
    /// Whether the rule table has a branch for this symptom.
    ///
    /// Fatigue, Back Pain and Shortness of Breath are offered by the form
    /// but fall through to "General Observation".
    pub fn has_rule(&self) -> bool {
        !matches!(
            self,
            MainSymptom::Fatigue | MainSymptom::BackPain | MainSymptom::ShortnessOfBreath
        )
    }
}

impl Choice for MainSymptom {
    const FIELD: &'static str = "main symptom";
    const ALL: &'static [Self] = &[
        MainSymptom::Fever,
        MainSymptom::Cough,
        MainSymptom::Headache,
        MainSymptom::StomachPain,
        MainSymptom::BodyPain,
        MainSymptom::SoreThroat,
        MainSymptom::Nausea,
        MainSymptom::Fatigue,
        MainSymptom::BackPain,
        MainSymptom::ShortnessOfBreath,
        MainSymptom::Rash,
        MainSymptom::Dizziness,
    ];

    fn label(&self) -> &'static str {
        match self {
            MainSymptom::Fever => "Fever",
            MainSymptom::Cough => "Cough",
            MainSymptom::Headache => "Headache",
            MainSymptom::StomachPain => "Stomach Pain",
            MainSymptom::BodyPain => "Body Pain",
            MainSymptom::SoreThroat => "Sore Throat",
            MainSymptom::Nausea => "Nausea",
            MainSymptom::Fatigue => "Fatigue",
            MainSymptom::BackPain => "Back Pain",
            MainSymptom::ShortnessOfBreath => "Shortness of Breath",
            MainSymptom::Rash => "Rash",
            MainSymptom::Dizziness => "Dizziness",
        }
    }
}

/// How long the symptoms have lasted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Duration {
    #[default]
    #[serde(rename = "1–2 days")]
    OneToTwoDays,
    #[serde(rename = "3–5 days")]
    ThreeToFiveDays,
    #[serde(rename = "More than 5 days")]
    MoreThanFiveDays,
}

impl Choice for Duration {
    const FIELD: &'static str = "duration";
    const ALL: &'static [Self] = &[
        Duration::OneToTwoDays,
        Duration::ThreeToFiveDays,
        Duration::MoreThanFiveDays,
    ];

    fn label(&self) -> &'static str {
        match self {
            Duration::OneToTwoDays => "1–2 days",
            Duration::ThreeToFiveDays => "3–5 days",
            Duration::MoreThanFiveDays => "More than 5 days",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FeverLevel {
    #[default]
    None,
    Mild,
    Moderate,
    High,
}

impl Choice for FeverLevel {
    const FIELD: &'static str = "fever level";
    const ALL: &'static [Self] = &[
        FeverLevel::None,
        FeverLevel::Mild,
        FeverLevel::Moderate,
        FeverLevel::High,
    ];

    fn label(&self) -> &'static str {
        match self {
            FeverLevel::None => "None",
            FeverLevel::Mild => "Mild",
            FeverLevel::Moderate => "Moderate",
            FeverLevel::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PainLevel {
    #[default]
    Mild,
    Moderate,
    Severe,
}

impl Choice for PainLevel {
    const FIELD: &'static str = "pain level";
    const ALL: &'static [Self] = &[PainLevel::Mild, PainLevel::Moderate, PainLevel::Severe];

    fn label(&self) -> &'static str {
        match self {
            PainLevel::Mild => "Mild",
            PainLevel::Moderate => "Moderate",
            PainLevel::Severe => "Severe",
        }
    }
}

/// Pre-existing medical condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExistingCondition {
    #[default]
    None,
    Diabetes,
    #[serde(rename = "Blood Pressure")]
    BloodPressure,
    Asthma,
}

impl Choice for ExistingCondition {
    const FIELD: &'static str = "existing condition";
    const ALL: &'static [Self] = &[
        ExistingCondition::None,
        ExistingCondition::Diabetes,
        ExistingCondition::BloodPressure,
        ExistingCondition::Asthma,
    ];

    fn label(&self) -> &'static str {
        match self {
            ExistingCondition::None => "None",
            ExistingCondition::Diabetes => "Diabetes",
            ExistingCondition::BloodPressure => "Blood Pressure",
            ExistingCondition::Asthma => "Asthma",
        }
    }
}

macro_rules! choice_traits {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromStr for $ty {
                type Err = TriageError;

                fn from_str(s: &str) -> Result<Self> {
                    Self::parse_choice(s)
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

choice_traits!(MainSymptom, Duration, FeverLevel, PainLevel, ExistingCondition);

/// Additional symptoms offered as a multi-select by the medical form
pub const ADDITIONAL_SYMPTOMS: &[&str] = &[
    "Fatigue",
    "Vomiting",
    "Diarrhea",
    "Chest Pain",
    "Runny Nose",
    "Loss of Appetite",
    "Sweating",
    "Shortness of Breath",
    "Rash",
    "Dizziness",
    "Blurred Vision",
    "Sore Throat",
    "Muscle Weakness",
    "Joint Pain",
    "Nausea",
];

/// Structured symptom-intake record from the medical form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomIntake {
    pub main_symptom: MainSymptom,
    #[serde(default)]
    pub duration: Duration,
    #[serde(default)]
    pub fever_level: FeverLevel,
    #[serde(default)]
    pub pain_level: PainLevel,
    #[serde(default)]
    pub existing_condition: ExistingCondition,
    /// Selected additional symptoms (any string is accepted)
    #[serde(default)]
    pub additional_symptoms: BTreeSet<String>,
    /// Free-text "other symptoms" box
    #[serde(default)]
    pub free_text: String,
}

impl SymptomIntake {
    /// Intake with form defaults for everything but the main symptom
    pub fn new(main_symptom: MainSymptom) -> Self {
        Self {
            main_symptom,
            duration: Duration::default(),
            fever_level: FeverLevel::default(),
            pain_level: PainLevel::default(),
            existing_condition: ExistingCondition::default(),
            additional_symptoms: BTreeSet::new(),
            free_text: String::new(),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_fever(mut self, level: FeverLevel) -> Self {
        self.fever_level = level;
        self
    }

    pub fn with_pain(mut self, level: PainLevel) -> Self {
        self.pain_level = level;
        self
    }

    pub fn with_condition(mut self, condition: ExistingCondition) -> Self {
        self.existing_condition = condition;
        self
    }

    /// Add one additional symptom; blank entries are ignored
    pub fn with_additional(mut self, symptom: &str) -> Self {
        let symptom = symptom.trim();
        if !symptom.is_empty() {
            self.additional_symptoms.insert(symptom.to_string());
        }
        self
    }

    pub fn with_free_text(mut self, text: &str) -> Self {
        self.free_text = text.to_string();
        self
    }

    /// Lowercased additional symptoms plus free text, space-joined, used
    /// for the engine's substring refinements.
    pub fn match_text(&self) -> String {
        self.additional_symptoms
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.free_text.as_str()))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}
