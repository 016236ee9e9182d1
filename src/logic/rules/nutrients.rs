use super::PolicyRule;
use crate::models::{Decision, NutrientStatus, Reading, ReasonCode};

/// No-nutrient rule - forces irrigation when neither phosphorus nor potassium is present
///
/// Overrides the moisture baseline and the pH block.
pub struct NoNutrientRule;

impl PolicyRule for NoNutrientRule {
    fn id(&self) -> &'static str {
        "no_nutrients"
    }

    fn name(&self) -> &'static str {
        "No Nutrients"
    }

    fn apply(&self, reading: &Reading, _current: &Decision) -> Option<Decision> {
        (reading.nutrients() == NutrientStatus::None)
            .then(|| Decision::new(true, ReasonCode::NoNutrientsForceIrrigation))
    }
}

/// Partial-nutrient rule - irrigates to balance the soil when only one nutrient is present
///
/// Runs last, so it wins over every earlier rule, the pH block included.
pub struct PartialNutrientRule;

impl PolicyRule for PartialNutrientRule {
    fn id(&self) -> &'static str {
        "partial_nutrients"
    }

    fn name(&self) -> &'static str {
        "Partial Nutrients"
    }

    fn apply(&self, reading: &Reading, _current: &Decision) -> Option<Decision> {
        (reading.nutrients() == NutrientStatus::Partial)
            .then(|| Decision::new(true, ReasonCode::PartialNutrientBalancing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCKED: Decision = Decision {
        pump_on: false,
        reason: ReasonCode::PhTooAcidic,
    };

    #[test]
    fn no_nutrient_rule_only_fires_without_nutrients() {
        let none = Reading::new(false, false, 5.0, 90.0);
        assert_eq!(
            NoNutrientRule.apply(&none, &BLOCKED),
            Some(Decision::new(true, ReasonCode::NoNutrientsForceIrrigation))
        );

        assert_eq!(NoNutrientRule.apply(&Reading::new(true, false, 7.0, 50.0), &BLOCKED), None);
        assert_eq!(NoNutrientRule.apply(&Reading::new(true, true, 7.0, 50.0), &BLOCKED), None);
    }

    #[test]
    fn partial_rule_only_fires_with_one_nutrient() {
        for reading in [
            Reading::new(true, false, 5.0, 90.0),
            Reading::new(false, true, 9.0, 10.0),
        ] {
            assert_eq!(
                PartialNutrientRule.apply(&reading, &BLOCKED),
                Some(Decision::new(true, ReasonCode::PartialNutrientBalancing))
            );
        }

        assert_eq!(
            PartialNutrientRule.apply(&Reading::new(false, false, 7.0, 50.0), &BLOCKED),
            None
        );
        assert_eq!(
            PartialNutrientRule.apply(&Reading::new(true, true, 7.0, 50.0), &BLOCKED),
            None
        );
    }
}
