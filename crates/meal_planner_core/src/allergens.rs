//! crates/meal_planner_core/src/allergens.rs
//!
//! Case-insensitive substring matching of ingredients against a user's allergy list.

/// A normalized allergy list.
#[derive(Debug, Clone, Default)]
pub struct AllergenFilter {
    needles: Vec<String>,
}

impl AllergenFilter {
    /// Blank entries are dropped; an empty needle would otherwise match every ingredient.
    pub fn new<S: AsRef<str>>(allergies: &[S]) -> Self {
        let needles = allergies
            .iter()
            .map(|a| a.as_ref().trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();
        Self { needles }
    }

    pub fn is_empty(&self) -> bool {
        self.needles.is_empty()
    }

    pub fn contains_allergen(&self, ingredient: &str) -> bool {
        if self.needles.is_empty() {
            return false;
        }
        let ingredient = ingredient.to_lowercase();
        self.needles.iter().any(|needle| ingredient.contains(needle.as_str()))
    }

    /// Returns the ingredients that match none of the allergies, in their original order.
    pub fn retain_safe<S: AsRef<str>>(&self, ingredients: &[S]) -> Vec<String> {
        ingredients
            .iter()
            .filter_map(|ingredient| {
                let ingredient: &str = ingredient.as_ref();
                (!self.contains_allergen(ingredient)).then(|| ingredient.to_string())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_is_case_insensitive_substring() {
        let filter = AllergenFilter::new(&["Nuts", "dairy"]);
        assert!(filter.contains_allergen("chopped walnuts"));
        assert!(filter.contains_allergen("MIXED NUTS"));
        assert!(!filter.contains_allergen("almond butter"));
    }

    #[test]
    fn keeps_order_of_safe_ingredients() {
        let filter = AllergenFilter::new(&["milk"]);
        let safe = filter.retain_safe(&["oats", "oat milk", "chia seeds", "Milk chocolate", "berries"]);
        assert_eq!(safe, vec!["oats", "chia seeds", "berries"]);
    }

    #[test]
    fn blank_allergies_are_ignored() {
        let filter = AllergenFilter::new(&["", "   "]);
        assert!(filter.is_empty());
        assert_eq!(filter.retain_safe(&["rice", "beans"]).len(), 2);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let filter = AllergenFilter::new(&["  soy "]);
        assert!(filter.contains_allergen("soy sauce"));
    }
}
