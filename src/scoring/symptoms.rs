//! Symptom scorer.
//!
//! A fixed rule table turns survey answers into points across the six
//! hormone categories. Each rule that fires appends its explanation in
//! evaluation order. Lab values, when present, refine the scores at the
//! end through [`adjust_scores_with_labs`].

use crate::models::{
    AnalysisResult, ConfidenceLevel, CyclePhase, HormoneCategory, HormoneScores, NumericLabs,
    SurveyResponses,
};

use super::adjust::adjust_scores_with_labs;
use super::labs::analyze_lab_values;

const HIGH_CONFIDENCE_TOTAL: i32 = 15;
const MEDIUM_CONFIDENCE_TOTAL: i32 = 8;

/// Labs needed before confidence may be raised a second step.
const LABS_FOR_SECOND_RAISE: usize = 3;

/// Running tally of points and explanations.
struct Tally {
    scores: HormoneScores,
    explanations: Vec<String>,
}

impl Tally {
    fn new() -> Self {
        Self {
            scores: HormoneScores::default(),
            explanations: Vec::new(),
        }
    }

    fn award(&mut self, points: &[(HormoneCategory, i32)], explanation: &str) {
        self.award_silent(points);
        self.explanations.push(explanation.to_string());
    }

    fn award_silent(&mut self, points: &[(HormoneCategory, i32)]) {
        for (category, value) in points {
            self.scores.add(*category, *value);
        }
    }
}

pub fn score_symptoms(answers: &SurveyResponses, cycle_phase: CyclePhase) -> AnalysisResult {
    use HormoneCategory::*;

    let mut tally = Tally::new();

    match answers.q1_period.as_str() {
        "No period" => tally.award(
            &[(Androgens, 3), (Estrogen, 2)],
            "Missing periods can indicate low estrogen or high androgens",
        ),
        "No" => tally.award(
            &[(Progesterone, 2)],
            "Irregular periods often indicate progesterone deficiency",
        ),
        _ => {}
    }

    match answers.q3_flow.as_str() {
        "Heavy" => tally.award(&[(Estrogen, 3)], "Heavy periods can indicate estrogen dominance"),
        "Light" => tally.award(&[(Estrogen, 2)], "Light periods may indicate low estrogen"),
        "Painful" => tally.award(
            &[(Progesterone, 2), (Estrogen, 1)],
            "Painful periods often indicate progesterone deficiency and inflammation",
        ),
        _ => {}
    }

    if answers.has_symptom("Acne") {
        tally.award(&[(Androgens, 3)], "Acne is strongly associated with high androgen levels");
    }
    if answers.has_symptom("Hair loss") || answers.has_symptom("Hair thinning") {
        tally.award(
            &[(Androgens, 2), (Thyroid, 1)],
            "Hair loss can indicate high androgens or thyroid issues",
        );
    }
    // Bloating and breast tenderness are expected premenstrually.
    let luteal = cycle_phase == CyclePhase::Luteal;
    if answers.has_symptom("Bloating") && !luteal {
        tally.award(
            &[(Estrogen, 2)],
            "Bloating outside of PMS can indicate estrogen dominance",
        );
    }
    if answers.has_symptom("Breast tenderness") && !luteal {
        tally.award(
            &[(Estrogen, 2)],
            "Breast tenderness outside of PMS can indicate estrogen dominance",
        );
    }

    match answers.q5_energy.as_str() {
        "Morning fatigue" => tally.award(
            &[(Cortisol, 3)],
            "Morning fatigue often indicates cortisol/adrenal issues",
        ),
        "Afternoon crash" => tally.award(
            &[(Insulin, 2), (Cortisol, 1)],
            "Afternoon crashes often indicate blood sugar/insulin issues",
        ),
        "Constant fatigue" => tally.award(
            &[(Thyroid, 3), (Cortisol, 2)],
            "Constant fatigue strongly suggests thyroid or adrenal issues",
        ),
        _ => {}
    }

    match answers.q6_mood.as_str() {
        "Rage/anger" => tally.award(
            &[(Progesterone, 3)],
            "Rage and anger are classic signs of progesterone deficiency",
        ),
        "Irritable" => tally.award(
            &[(Progesterone, 2)],
            "Irritability can indicate progesterone deficiency",
        ),
        "Sad/depressed" => tally.award(
            &[(Thyroid, 2), (Progesterone, 1)],
            "Depression can indicate thyroid issues or hormone imbalances",
        ),
        _ => {}
    }

    if answers.has_craving("Sugar") {
        tally.award(&[(Insulin, 3)], "Sugar cravings strongly indicate insulin resistance");
    }
    if answers.has_craving("Chocolate") {
        tally.award(
            &[(Progesterone, 2)],
            "Chocolate cravings often indicate progesterone deficiency",
        );
    }
    if answers.has_craving("Salt") {
        tally.award(&[(Cortisol, 2)], "Salt cravings can indicate adrenal/cortisol issues");
    }

    match answers.q8_stress.as_str() {
        "High" => tally.award(
            &[(Cortisol, 3), (Progesterone, 1)],
            "High stress increases cortisol and can deplete progesterone",
        ),
        "Moderate" => tally.award_silent(&[(Cortisol, 1)]),
        _ => {}
    }

    if answers.q9_birth_control == "Recently stopped" {
        tally.award(
            &[(Androgens, 2), (Estrogen, 1)],
            "Stopping birth control can cause temporary androgen rebound",
        );
    }

    if answers.has_condition("PCOS") {
        tally.award(
            &[(Androgens, 4), (Insulin, 3)],
            "PCOS is characterized by high androgens and insulin resistance",
        );
    }
    if answers.has_condition("PMDD") {
        tally.award(&[(Progesterone, 3)], "PMDD is strongly linked to progesterone sensitivity");
    }
    if answers.has_condition("Hashimoto's") {
        tally.award(&[(Thyroid, 4)], "Hashimoto's is an autoimmune thyroid condition");
    }

    let Tally {
        scores: symptom_scores,
        mut explanations,
    } = tally;

    let total_score = symptom_scores.total();

    // Ranking reflects symptom scores only; it is not recomputed after
    // the lab adjustment below.
    let ranked = symptom_scores.ranked();
    let primary_imbalance = ranked.first().map(|(category, _)| *category);
    let secondary_imbalances = ranked.iter().skip(1).take(2).map(|(c, _)| *c).collect();

    let mut confidence_level = if total_score >= HIGH_CONFIDENCE_TOTAL {
        ConfidenceLevel::High
    } else if total_score >= MEDIUM_CONFIDENCE_TOTAL {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    };

    if cycle_phase == CyclePhase::Unknown {
        confidence_level = confidence_level.lower();
        explanations
            .push("Cycle phase unknown - some symptoms may be normal for your cycle phase".into());
    }

    let labs = &answers.q11_labs;
    let numeric_labs = NumericLabs::from_values(labs);
    let adjustment = adjust_scores_with_labs(&symptom_scores, &numeric_labs);

    explanations.extend(analyze_lab_values(labs));
    explanations.extend(adjustment.conflicts);

    let lab_count = numeric_labs.count();
    if lab_count > 0 {
        if confidence_level == ConfidenceLevel::Low {
            confidence_level = confidence_level.raise();
        }
        if lab_count >= LABS_FOR_SECOND_RAISE && confidence_level == ConfidenceLevel::Medium {
            confidence_level = confidence_level.raise();
        }
    }

    AnalysisResult {
        primary_imbalance,
        secondary_imbalances,
        confidence_level,
        explanations,
        scores: adjustment.adjusted_scores,
        total_score,
        cycle_phase,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LabValues;

    fn answers() -> SurveyResponses {
        SurveyResponses::default()
    }

    #[test]
    fn empty_answers_score_nothing() {
        let result = score_symptoms(&answers(), CyclePhase::Follicular);
        assert_eq!(result.scores, HormoneScores::default());
        assert_eq!(result.total_score, 0);
        assert_eq!(result.primary_imbalance, None);
        assert!(result.secondary_imbalances.is_empty());
        assert_eq!(result.confidence_level, ConfidenceLevel::Low);
        assert!(result.explanations.is_empty());
    }

    #[test]
    fn missing_period_points_to_androgens() {
        let answers = SurveyResponses {
            q1_period: "No period".into(),
            ..answers()
        };
        let result = score_symptoms(&answers, CyclePhase::Follicular);
        assert_eq!(result.scores.androgens, 3);
        assert_eq!(result.scores.estrogen, 2);
        assert_eq!(result.primary_imbalance, Some(HormoneCategory::Androgens));
        assert_eq!(result.secondary_imbalances, vec![HormoneCategory::Estrogen]);
    }

    #[test]
    fn luteal_phase_suppresses_bloating_and_tenderness() {
        let answers = SurveyResponses {
            q4_symptoms: vec!["Bloating".into(), "Breast tenderness".into()],
            ..answers()
        };
        let luteal = score_symptoms(&answers, CyclePhase::Luteal);
        assert_eq!(luteal.scores.estrogen, 0);
        assert!(luteal.explanations.is_empty());

        let follicular = score_symptoms(&answers, CyclePhase::Follicular);
        assert_eq!(follicular.scores.estrogen, 4);
        assert_eq!(follicular.explanations.len(), 2);
    }

    #[test]
    fn hair_loss_and_thinning_count_once() {
        let answers = SurveyResponses {
            q4_symptoms: vec!["Hair loss".into(), "Hair thinning".into()],
            ..answers()
        };
        let result = score_symptoms(&answers, CyclePhase::Follicular);
        assert_eq!(result.scores.androgens, 2);
        assert_eq!(result.scores.thyroid, 1);
        assert_eq!(result.explanations.len(), 1);
    }

    #[test]
    fn moderate_stress_scores_without_explanation() {
        let answers = SurveyResponses {
            q8_stress: "Moderate".into(),
            ..answers()
        };
        let result = score_symptoms(&answers, CyclePhase::Follicular);
        assert_eq!(result.scores.cortisol, 1);
        assert!(result.explanations.is_empty());
    }

    #[test]
    fn full_rule_table_totals() {
        let answers = SurveyResponses {
            q1_period: "No".into(),
            q3_flow: "Painful".into(),
            q4_symptoms: vec!["Acne".into()],
            q5_energy: "Constant fatigue".into(),
            q6_mood: "Sad/depressed".into(),
            q7_cravings: vec!["Sugar".into(), "Chocolate".into(), "Salt".into()],
            q8_stress: "High".into(),
            q9_birth_control: "Recently stopped".into(),
            q10_conditions: vec!["PCOS".into(), "PMDD".into(), "Hashimoto's".into()],
            ..answers()
        };
        let result = score_symptoms(&answers, CyclePhase::Menstrual);
        let expected = HormoneScores {
            androgens: 3 + 2 + 4,
            progesterone: 2 + 2 + 1 + 2 + 1 + 3,
            estrogen: 1 + 1,
            thyroid: 3 + 2 + 4,
            cortisol: 2 + 2 + 3,
            insulin: 3 + 3,
        };
        assert_eq!(result.scores, expected);
        assert_eq!(result.total_score, expected.total());
        assert_eq!(result.primary_imbalance, Some(HormoneCategory::Progesterone));
        // androgens and thyroid tie at 9; declaration order breaks the tie.
        assert_eq!(
            result.secondary_imbalances,
            vec![HormoneCategory::Androgens, HormoneCategory::Thyroid]
        );
        assert_eq!(result.confidence_level, ConfidenceLevel::High);
        assert_eq!(result.explanations.len(), 13);
    }

    #[test]
    fn unknown_phase_lowers_confidence_one_step() {
        let answers = SurveyResponses {
            q1_period: "No period".into(),
            q3_flow: "Heavy".into(),
            q4_symptoms: vec!["Acne".into()],
            ..answers()
        };
        // 3 + 2 + 3 + 3 = 11 → medium, then low.
        let result = score_symptoms(&answers, CyclePhase::Unknown);
        assert_eq!(result.total_score, 11);
        assert_eq!(result.confidence_level, ConfidenceLevel::Low);
        assert_eq!(
            result.explanations.last().unwrap(),
            "Cycle phase unknown - some symptoms may be normal for your cycle phase"
        );
    }

    /// Answers worth exactly 10 points.
    fn medium_answers(labs: LabValues) -> SurveyResponses {
        SurveyResponses {
            q5_energy: "Morning fatigue".into(),
            q6_mood: "Rage/anger".into(),
            q7_cravings: vec!["Sugar".into()],
            q8_stress: "Moderate".into(),
            q11_labs: labs,
            ..answers()
        }
    }

    #[test]
    fn three_labs_raise_medium_to_high() {
        let labs = LabValues {
            tsh: Some("2.0".into()),
            t3: Some("3.0".into()),
            hba1c: Some("5.0".into()),
            ..Default::default()
        };
        let result = score_symptoms(&medium_answers(labs), CyclePhase::Follicular);
        assert_eq!(result.total_score, 10);
        assert_eq!(result.confidence_level, ConfidenceLevel::High);
    }

    #[test]
    fn one_lab_keeps_medium() {
        let labs = LabValues {
            tsh: Some("2.0".into()),
            ..Default::default()
        };
        let result = score_symptoms(&medium_answers(labs), CyclePhase::Follicular);
        assert_eq!(result.total_score, 10);
        assert_eq!(result.confidence_level, ConfidenceLevel::Medium);
    }

    #[test]
    fn three_labs_raise_low_by_two_steps_at_most() {
        let labs = LabValues {
            tsh: Some("2.0".into()),
            t3: Some("3.0".into()),
            dhea: Some("100".into()),
            ..Default::default()
        };
        let answers = SurveyResponses {
            q11_labs: labs,
            ..answers()
        };
        let result = score_symptoms(&answers, CyclePhase::Follicular);
        assert_eq!(result.confidence_level, ConfidenceLevel::High);
    }

    #[test]
    fn unparseable_labs_do_not_raise_confidence() {
        let labs = LabValues {
            tsh: Some("normal".into()),
            ..Default::default()
        };
        let result = score_symptoms(&medium_answers(labs), CyclePhase::Unknown);
        assert_eq!(result.confidence_level, ConfidenceLevel::Low);
    }

    #[test]
    fn lab_findings_follow_symptom_explanations() {
        let labs = LabValues {
            free_t: Some("3.2".into()),
            ..Default::default()
        };
        let answers = SurveyResponses {
            q4_symptoms: vec!["Acne".into()],
            q11_labs: labs,
            ..answers()
        };
        let result = score_symptoms(&answers, CyclePhase::Follicular);
        assert_eq!(result.scores.androgens, 5);
        assert_eq!(result.total_score, 3);
        assert_eq!(
            result.explanations,
            vec![
                "Acne is strongly associated with high androgen levels".to_string(),
                "Elevated free testosterone suggests androgen excess".to_string(),
                "Lab confirms high testosterone (3.2 ng/dL) - strengthens androgen imbalance assessment"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn ranking_is_not_recomputed_after_labs() {
        let labs = LabValues {
            tsh: Some("8".into()),
            ..Default::default()
        };
        let answers = SurveyResponses {
            q4_symptoms: vec!["Acne".into(), "Hair loss".into()],
            q11_labs: labs,
            ..answers()
        };
        // androgens 5, thyroid 1 → thyroid becomes 3 after labs.
        let result = score_symptoms(&answers, CyclePhase::Follicular);
        assert_eq!(result.scores.thyroid, 3);
        assert_eq!(result.primary_imbalance, Some(HormoneCategory::Androgens));
        assert_eq!(result.secondary_imbalances, vec![HormoneCategory::Thyroid]);
        assert_eq!(result.total_score, 6);
    }
}
