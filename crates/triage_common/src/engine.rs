//! Diagnosis rule engine.
//!
//! A fixed decision table keyed on the main symptom, refined by substring
//! matches against the additional symptoms and free text, followed by
//! escalation rules. Pure: no I/O, no logging, no failure cases.

use crate::intake::{Duration, ExistingCondition, FeverLevel, MainSymptom, PainLevel, SymptomIntake};
use serde::{Deserialize, Serialize};

/// Starting confidence before any rule fires
pub const BASE_CONFIDENCE: u8 = 30;
/// Added by every main-symptom branch that has a rule
pub const BRANCH_BONUS: u8 = 30;
/// Upper bound on the confidence score
pub const MAX_CONFIDENCE: u8 = 95;

pub const DEFAULT_CONDITION: &str = "General Observation";
pub const DEFAULT_ALERT: &str = "Monitor symptoms.";
pub const DURATION_ALERT: &str = "Doctor consultation is strongly advised.";
pub const CONDITION_ALERT: &str = "Consult a doctor due to existing medical condition.";

/// Outcome of one evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub condition: String,
    pub prescription: Vec<String>,
    pub care: Vec<String>,
    pub alert: String,
    /// Heuristic score in [0, 95], not a probability
    pub confidence: u8,
}

impl DiagnosisResult {
    /// True when no rule matched and the default branch was used
    pub fn is_general_observation(&self) -> bool {
        self.condition == DEFAULT_CONDITION
    }
}

/// Condition, prescription and care chosen by a main-symptom branch
struct Finding {
    condition: &'static str,
    prescription: &'static [&'static str],
    care: &'static [&'static str],
    bonus: u8,
}

impl Finding {
    fn new(
        condition: &'static str,
        prescription: &'static [&'static str],
        care: &'static [&'static str],
    ) -> Self {
        Self {
            condition,
            prescription,
            care,
            bonus: 0,
        }
    }

    fn bonus(mut self, bonus: u8) -> Self {
        self.bonus = bonus;
        self
    }

    /// Apply `bonus` only when `hit` is true
    fn bonus_if(self, hit: bool, bonus: u8) -> Self {
        if hit {
            self.bonus(bonus)
        } else {
            self
        }
    }
}

/// Evaluate an intake against the rule table
pub fn evaluate(intake: &SymptomIntake) -> DiagnosisResult {
    let text = intake.match_text();
    let has = |needle: &str| text.contains(needle);

    let mut confidence = u32::from(BASE_CONFIDENCE);
    let mut result = DiagnosisResult {
        condition: DEFAULT_CONDITION.to_string(),
        prescription: Vec::new(),
        care: Vec::new(),
        alert: DEFAULT_ALERT.to_string(),
        confidence: 0,
    };

    if let Some(finding) = dispatch(intake, &has) {
        confidence += u32::from(BRANCH_BONUS) + u32::from(finding.bonus);
        result.condition = finding.condition.to_string();
        result.prescription = to_owned_list(finding.prescription);
        result.care = to_owned_list(finding.care);
    }

    // Escalation rules. The alert slot is last-write-wins, so an existing
    // condition overrides the duration message.
    if intake.duration == Duration::MoreThanFiveDays {
        result.alert = DURATION_ALERT.to_string();
        confidence += 15;
    }

    if matches!(intake.pain_level, PainLevel::Moderate | PainLevel::Severe) {
        confidence += 10;
    }

    if intake.existing_condition != ExistingCondition::None {
        result.alert = CONDITION_ALERT.to_string();
        confidence += 10;
    }

    result.confidence = confidence.min(u32::from(MAX_CONFIDENCE)) as u8;
    result
}

/// Main-symptom branch; `None` means the default observation applies
fn dispatch(intake: &SymptomIntake, has: &dyn Fn(&str) -> bool) -> Option<Finding> {
    let finding = match intake.main_symptom {
        MainSymptom::Fever => {
            if matches!(intake.fever_level, FeverLevel::Moderate | FeverLevel::High) {
                Finding::new(
                    "Acute Febrile Illness",
                    &["Paracetamol", "ORS"],
                    &["Adequate hydration", "Rest", "Tepid sponging"],
                )
                .bonus(15)
            } else {
                Finding::new("Mild Viral Fever", &["Paracetamol"], &["Rest", "Fluids"])
            }
        }
        MainSymptom::Headache => {
            if has("eye") || has("behind") {
                Finding::new(
                    "Sinus-related Headache",
                    &["Pain reliever (OTC)", "Saline nasal spray"],
                    &["Steam inhalation", "Warm compress"],
                )
                .bonus(20)
            } else if has("spinning") || has("dizziness") {
                Finding::new(
                    "Migraine or Vestibular Headache",
                    &["Pain reliever (OTC)", "Anti-nausea medication"],
                    &["Dark quiet room", "Avoid screen exposure"],
                )
                .bonus(25)
            } else {
                Finding::new(
                    "Tension Headache",
                    &["Pain reliever (OTC)"],
                    &["Stress reduction", "Adequate sleep"],
                )
            }
        }
        MainSymptom::Cough => {
            if has("chest") || has("shortness") {
                Finding::new(
                    "Lower Respiratory Tract Infection",
                    &["Cough syrup", "Warm fluids"],
                    &["Avoid cold air", "Rest"],
                )
                .bonus(20)
            } else {
                Finding::new(
                    "Upper Respiratory Infection",
                    &["Cough syrup"],
                    &["Steam inhalation", "Hydration"],
                )
            }
        }
        MainSymptom::StomachPain => {
            if has("vomiting") || has("diarrhea") {
                Finding::new(
                    "Gastroenteritis",
                    &["ORS", "Antiemetic"],
                    &["Light diet", "Avoid oily food"],
                )
                .bonus(20)
            } else {
                Finding::new("Gastritis", &["Antacid"], &["Small frequent meals"])
            }
        }
        MainSymptom::BodyPain => Finding::new(
            "Musculoskeletal Pain or Viral Body Ache",
            &["Pain reliever (OTC)"],
            &["Rest", "Warm compress"],
        ),
        MainSymptom::SoreThroat => Finding::new(
            "Throat Infection / Pharyngitis",
            &["Lozenges", "Warm salt water gargle"],
            &["Hydration", "Rest"],
        )
        .bonus_if(has("fever"), 15),
        MainSymptom::Nausea => Finding::new(
            "Gastrointestinal Upset",
            &["Antiemetic"],
            &["Light diet", "Hydration"],
        )
        .bonus_if(has("vomiting"), 15),
        MainSymptom::Rash => Finding::new(
            "Skin Allergy / Infection",
            &["Antihistamines"],
            &["Avoid allergens", "Keep skin clean"],
        )
        .bonus_if(has("itching"), 10),
        MainSymptom::Dizziness => Finding::new(
            "Vertigo / Low Blood Pressure",
            &["Hydration", "Rest"],
            &["Avoid sudden movements", "Sit if dizzy"],
        )
        .bonus_if(has("spinning"), 15),
        // Offered by the form but never mapped to a rule
        MainSymptom::Fatigue | MainSymptom::BackPain | MainSymptom::ShortnessOfBreath => {
            return None
        }
    };
    Some(finding)
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::Choice;

    #[test]
    fn test_default_branch_for_unmapped_symptom() {
        let result = evaluate(&SymptomIntake::new(MainSymptom::BackPain));
        assert!(result.is_general_observation());
        assert!(result.prescription.is_empty());
        assert!(result.care.is_empty());
        assert_eq!(result.alert, DEFAULT_ALERT);
        assert_eq!(result.confidence, BASE_CONFIDENCE);
    }

    #[test]
    fn test_mild_fever_gets_branch_bonus_only() {
        let result = evaluate(&SymptomIntake::new(MainSymptom::Fever).with_fever(FeverLevel::Mild));
        assert_eq!(result.condition, "Mild Viral Fever");
        assert_eq!(result.prescription, vec!["Paracetamol"]);
        assert_eq!(result.confidence, 60);
    }

    #[test]
    fn test_headache_sinus_refinement_wins_over_vestibular() {
        let intake = SymptomIntake::new(MainSymptom::Headache)
            .with_additional("Dizziness")
            .with_free_text("pressure behind my eyes");
        let result = evaluate(&intake);
        assert_eq!(result.condition, "Sinus-related Headache");
        assert_eq!(result.confidence, 80);
    }

    #[test]
    fn test_dizziness_additional_symptom_refines_headache() {
        let intake = SymptomIntake::new(MainSymptom::Headache).with_additional("Dizziness");
        let result = evaluate(&intake);
        assert_eq!(result.condition, "Migraine or Vestibular Headache");
        assert_eq!(result.confidence, 85);
    }

    #[test]
    fn test_bonus_only_refinements() {
        let throat = SymptomIntake::new(MainSymptom::SoreThroat).with_free_text("slight FEVER");
        assert_eq!(evaluate(&throat).confidence, 75);

        let rash = SymptomIntake::new(MainSymptom::Rash).with_free_text("itching at night");
        let result = evaluate(&rash);
        assert_eq!(result.condition, "Skin Allergy / Infection");
        assert_eq!(result.confidence, 70);

        let plain_rash = evaluate(&SymptomIntake::new(MainSymptom::Rash));
        assert_eq!(plain_rash.confidence, 60);
    }

    #[test]
    fn test_pain_bonus_without_alert_change() {
        let intake = SymptomIntake::new(MainSymptom::BodyPain).with_pain(PainLevel::Severe);
        let result = evaluate(&intake);
        assert_eq!(result.confidence, 70);
        assert_eq!(result.alert, DEFAULT_ALERT);
    }

    #[test]
    fn test_unmapped_symptom_still_escalates() {
        let intake = SymptomIntake::new(MainSymptom::Fatigue)
            .with_duration(Duration::MoreThanFiveDays)
            .with_condition(ExistingCondition::Asthma);
        let result = evaluate(&intake);
        assert!(result.is_general_observation());
        assert_eq!(result.alert, CONDITION_ALERT);
        assert_eq!(result.confidence, 55);
    }

    #[test]
    fn test_everything_firing_is_capped() {
        for symptom in MainSymptom::ALL {
            let intake = SymptomIntake::new(*symptom)
                .with_fever(FeverLevel::High)
                .with_pain(PainLevel::Severe)
                .with_duration(Duration::MoreThanFiveDays)
                .with_condition(ExistingCondition::Diabetes)
                .with_free_text("spinning fever vomiting itching chest");
            assert!(evaluate(&intake).confidence <= MAX_CONFIDENCE);
        }
    }
}
