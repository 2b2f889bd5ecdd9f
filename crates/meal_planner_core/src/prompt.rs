//! crates/meal_planner_core/src/prompt.rs
//!
//! The instructions and user prompt sent to the text-generation service.

use crate::domain::{DietType, NutritionGoals, UserProfile};
use chrono::{DateTime, SecondsFormat, Utc};

pub const SYSTEM_INSTRUCTIONS: &str = "You are a professional nutritionist and chef. Generate personalized, realistic, and delicious meal plans. Respond with a single valid JSON object and nothing else: no markdown, no code fences, no commentary. Focus on nutritional balance, dietary restrictions, and user preferences.";

const USER_PROMPT_TEMPLATE: &str = r#"Create a personalized 7-day meal plan for a {age}-year-old {gender} who weighs {weight}kg and is {height}cm tall.

PERSONAL DETAILS:
- Activity Level: {activity}
- Goal: {goal} weight
- Diet Type: {diet}
- Meals per day: {meals_per_day}
- Cooking time preference: {cooking_time}
- Budget: {budget}
- Dietary restrictions: {restrictions}

NUTRITION TARGETS (per day):
- Calories: {calories}
- Protein: {protein}g
- Carbs: {carbs}g
- Fat: {fat}g

CRITICAL ALLERGY WARNING: {allergy_warning}

REQUIREMENTS:
1. Generate exactly 7 days (Monday through Sunday), in that order
2. Each day should have {meals_per_day} meals ({meal_layout})
3. Strictly follow the dietary restrictions ({diet})
4. {allergy_requirement}
5. Include realistic cooking times based on preference ({cooking_time})
6. Provide detailed recipes with specific measurements and step-by-step cooking instructions
7. Include appealing meal names
8. Vary the cuisine types across all 7 days
9. Ensure each day has different meals (no repetition)
10. Ensure nutritional balance meets the targets
11. All numbers must be whole numbers; every ingredient list must be non-empty

OUTPUT FORMAT - Return valid JSON only:
{
  "days": [
    {
      "day": "Monday",
      "meals": [
        {
          "type": "breakfast",
          "name": "Descriptive Meal Name",
          "calories": 350,
          "protein": 15,
          "carbs": 45,
          "fat": 12,
          "prep_time": 15,
          "image": "https://images.unsplash.com/photo-[relevant-food-photo]?w=400&h=300&fit=crop",
          "description": "Appealing description of the meal",
          "ingredients": ["1 cup ingredient 1", "2 tbsp ingredient 2"],
          "instructions": ["Detailed step 1", "Detailed step 2", "Detailed step 3"],
          "tags": ["relevant", "tags"]
        }
      ],
      "totalCalories": 1800,
      "totalProtein": 120,
      "totalCarbs": 180,
      "totalFat": 70
    }
  ],
  "userProfile": {profile_json},
  "generatedAt": "{generated_at}",
  "totalWeeklyCalories": 12600,
  "averageDailyCalories": 1800
}"#;

/// Joins the diet, allergy and restriction constraints into one readable line.
pub fn describe_restrictions(profile: &UserProfile) -> String {
    let mut parts = Vec::new();
    match profile.diet_type {
        DietType::Vegan => parts.push("vegan (no animal products)".to_string()),
        DietType::Vegetarian => parts.push("vegetarian (no meat or fish)".to_string()),
        DietType::Omnivore => {}
    }
    if !profile.allergies.is_empty() {
        parts.push(format!("allergic to: {}", profile.allergies.join(", ")));
    }
    if !profile.restrictions.is_empty() {
        parts.push(format!("dietary restrictions: {}", profile.restrictions.join(", ")));
    }

    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(", ")
    }
}

pub fn build_prompt(profile: &UserProfile, goals: &NutritionGoals, now: DateTime<Utc>) -> String {
    let (allergy_warning, allergy_requirement) = if profile.allergies.is_empty() {
        (
            "No food allergies reported.".to_string(),
            "No allergy restrictions".to_string(),
        )
    } else {
        let listed = profile.allergies.join(", ");
        (
            format!(
                "This person is ALLERGIC to: {}. DO NOT include these ingredients in ANY meal, recipe, or ingredient list. This is a MEDICAL REQUIREMENT.",
                listed.to_uppercase()
            ),
            format!("ABSOLUTELY AVOID all foods containing: {listed}"),
        )
    };

    let meal_layout = if profile.meals_per_day > 3 {
        "breakfast, lunch, dinner + snacks"
    } else {
        "breakfast, lunch, dinner"
    };

    let profile_json = serde_json::to_string(profile).unwrap_or_else(|_| "{}".to_string());

    let budget = profile
        .budget
        .map(|b| b.to_string())
        .unwrap_or_else(|| "not specified".to_string());

    render(
        USER_PROMPT_TEMPLATE,
        &[
            ("age", profile.age.to_string()),
            ("gender", profile.gender.to_string()),
            ("weight", profile.weight.to_string()),
            ("height", profile.height.to_string()),
            ("activity", profile.activity_level.to_string()),
            ("goal", profile.goal.to_string()),
            ("diet", profile.diet_type.as_str().to_string()),
            ("meals_per_day", profile.meals_per_day.to_string()),
            ("meal_layout", meal_layout.to_string()),
            ("cooking_time", profile.cooking_time.to_string()),
            ("budget", budget),
            ("restrictions", describe_restrictions(profile)),
            ("calories", goals.daily_calories.to_string()),
            ("protein", goals.daily_protein.to_string()),
            ("carbs", goals.daily_carbs.to_string()),
            ("fat", goals.daily_fat.to_string()),
            ("allergy_warning", allergy_warning),
            ("allergy_requirement", allergy_requirement),
            ("generated_at", now.to_rfc3339_opts(SecondsFormat::Millis, true)),
            ("profile_json", profile_json),
        ],
    )
}

/// Fills `{name}` slots in one left-to-right pass. Substituted values are never
/// rescanned, so braces inside user text stay literal; unknown slots are kept as-is.
fn render(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() + 1024);
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let slot = after.find('}').and_then(|end| {
            let key = &after[..end];
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (value, end))
        });
        match slot {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Budget;
    use crate::nutrition::compute_goals;
    use crate::test_support::sample_profile;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 12, 0, 0).unwrap()
    }

    #[test]
    fn prompt_embeds_profile_and_targets() {
        let profile = sample_profile();
        let goals = compute_goals(&profile);
        let prompt = build_prompt(&profile, &goals, now());

        assert!(prompt.starts_with("Create a personalized 7-day meal plan for a 30-year-old male who weighs 80kg and is 180cm tall."));
        assert!(prompt.contains("- Calories: 2759"));
        assert!(prompt.contains("- Protein: 128g"));
        assert!(prompt.contains("- Carbs: 389g"));
        assert!(prompt.contains("- Fat: 77g"));
        assert!(prompt.contains("No food allergies reported."));
        assert!(prompt.contains("- Budget: not specified"));
        assert!(prompt.contains("\"generatedAt\": \"2024-03-04T12:00:00.000Z\""));
        assert!(prompt.contains("\"dietType\":\"omnivore\""));
        for placeholder in ["{age}", "{calories}", "{allergy_warning}", "{profile_json}"] {
            assert!(!prompt.contains(placeholder), "{placeholder} left in prompt");
        }
    }

    #[test]
    fn allergies_are_shouted_and_listed() {
        let mut profile = sample_profile();
        profile.allergies = vec!["peanuts".to_string(), "shellfish".to_string()];
        profile.budget = Some(Budget::Low);
        let prompt = build_prompt(&profile, &compute_goals(&profile), now());

        assert!(prompt.contains("ALLERGIC to: PEANUTS, SHELLFISH"));
        assert!(prompt.contains("ABSOLUTELY AVOID all foods containing: peanuts, shellfish"));
        assert!(prompt.contains("- Budget: low"));
    }

    #[test]
    fn snacks_are_requested_above_three_meals() {
        let mut profile = sample_profile();
        profile.meals_per_day = 4;
        let prompt = build_prompt(&profile, &compute_goals(&profile), now());
        assert!(prompt.contains("Each day should have 4 meals (breakfast, lunch, dinner + snacks)"));
    }

    #[test]
    fn braces_in_user_text_are_not_expanded() {
        let mut profile = sample_profile();
        profile.allergies = vec!["{calories}".to_string()];
        profile.restrictions = vec!["{profile_json}".to_string()];
        let prompt = build_prompt(&profile, &compute_goals(&profile), now());

        assert!(prompt.contains("ABSOLUTELY AVOID all foods containing: {calories}"));
        assert!(prompt.contains("dietary restrictions: {profile_json}"));
        assert!(prompt.contains("- Calories: 2759"));
        // The JSON example keeps its literal braces.
        assert!(prompt.contains("OUTPUT FORMAT - Return valid JSON only:\n{\n  \"days\": ["));
    }

    #[test]
    fn restriction_summary() {
        let mut profile = sample_profile();
        assert_eq!(describe_restrictions(&profile), "none");

        profile.diet_type = DietType::Vegetarian;
        profile.allergies = vec!["soy".to_string()];
        profile.restrictions = vec!["low sodium".to_string()];
        assert_eq!(
            describe_restrictions(&profile),
            "vegetarian (no meat or fish), allergic to: soy, dietary restrictions: low sodium"
        );
    }
}
