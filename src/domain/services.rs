//! Pure menu operations: draft validation, filtering and price statistics.
//!
//! Nothing in this module touches storage; the repositories in the
//! application layer call into these functions and persist the results.

use super::errors::ValidationError;
use super::models::{Course, Dish, DishDraft, HistoryEntry};

/// A dish as seen through a filtered view, paired with its position in the
/// full menu collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuEntry<'a> {
    pub index: usize,
    pub dish: &'a Dish,
}

/// Validates raw dish input.
pub struct DishValidator;

impl DishValidator {
    /// Turns a draft into a dish, rejecting it on the first violated constraint.
    ///
    /// Name and description must contain something other than whitespace, a
    /// course must be chosen, and the price must parse to a finite number
    /// greater than zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use menuboard::domain::{Course, DishDraft, DishValidator, ValidationError};
    ///
    /// let draft = DishDraft::new("Bobotie", "Traditional", Some(Course::Mains), "85.00");
    /// let dish = DishValidator::validate(&draft).unwrap();
    /// assert_eq!(dish.price, 85.0);
    ///
    /// let free = DishDraft::new("Bobotie", "Traditional", Some(Course::Mains), "0");
    /// assert_eq!(DishValidator::validate(&free), Err(ValidationError::NonPositivePrice));
    /// ```
    pub fn validate(draft: &DishDraft) -> Result<Dish, ValidationError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let description = draft.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        let course = draft.course.ok_or(ValidationError::MissingCourse)?;

        let price_text = draft.price.trim();
        let price = price_text
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidPrice(price_text.to_string()))?;
        if !price.is_finite() {
            return Err(ValidationError::InvalidPrice(price_text.to_string()));
        }
        if price <= 0.0 {
            return Err(ValidationError::NonPositivePrice);
        }

        let image_uri = draft
            .image_uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
            .map(str::to_string);

        Ok(Dish {
            name: name.to_string(),
            description: description.to_string(),
            course: Some(course),
            price,
            image_uri,
        })
    }
}

/// Filters dishes by a case-insensitive name substring and an optional course.
pub fn filter_dishes<'a>(dishes: &'a [Dish], query: &str, course: Option<Course>) -> Vec<MenuEntry<'a>> {
    let needle = query.to_lowercase();
    dishes
        .iter()
        .enumerate()
        .filter(|(_, dish)| dish.name.to_lowercase().contains(&needle))
        .filter(|(_, dish)| course.is_none() || dish.course == course)
        .map(|(index, dish)| MenuEntry { index, dish })
        .collect()
}

/// Mean price of the dishes in `course`, or `0.0` when the course is empty.
pub fn average_price(dishes: &[Dish], course: Course) -> f64 {
    let (total, count) = dishes
        .iter()
        .filter(|dish| dish.course == Some(course))
        .fold((0.0, 0usize), |(total, count), dish| (total + dish.price, count + 1));

    if count == 0 { 0.0 } else { total / count as f64 }
}

/// Keeps history entries whose action contains `needle`; an empty needle keeps all.
pub fn filter_history<'a>(entries: &'a [HistoryEntry], needle: &str) -> Vec<&'a HistoryEntry> {
    entries
        .iter()
        .filter(|entry| needle.is_empty() || entry.action.contains(needle))
        .collect()
}

/// Formats a price the way the menu displays it, in rand.
pub fn format_price(price: f64) -> String {
    format!("R{:.2}", price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(name: &str, course: Course, price: f64) -> Dish {
        Dish {
            name: name.to_string(),
            description: "desc".to_string(),
            course: Some(course),
            price,
            image_uri: None,
        }
    }

    fn sample_menu() -> Vec<Dish> {
        vec![
            dish("Cheesecake", Course::Desserts, 50.0),
            dish("Bobotie", Course::Mains, 85.0),
            dish("Carrot Cake", Course::Desserts, 40.0),
            dish("Samoosas", Course::Starters, 30.0),
            dish("Bunny Chow", Course::Mains, 75.0),
        ]
    }

    #[test]
    fn test_validate_accepts_valid_draft() {
        let draft = DishDraft::new("  Bobotie ", "Traditional", Some(Course::Mains), " 85.00 ")
            .with_image("file:///bobotie.jpg");
        let dish = DishValidator::validate(&draft).unwrap();
        assert_eq!(dish.name, "Bobotie");
        assert_eq!(dish.course, Some(Course::Mains));
        assert_eq!(dish.price, 85.0);
        assert_eq!(dish.image_uri.as_deref(), Some("file:///bobotie.jpg"));
    }

    #[test]
    fn test_validate_names_the_failing_constraint() {
        let base = DishDraft::new("Bobotie", "Traditional", Some(Course::Mains), "85");

        let mut draft = base.clone();
        draft.name = "   ".to_string();
        assert_eq!(DishValidator::validate(&draft), Err(ValidationError::EmptyName));

        let mut draft = base.clone();
        draft.description.clear();
        assert_eq!(DishValidator::validate(&draft), Err(ValidationError::EmptyDescription));

        let mut draft = base.clone();
        draft.course = None;
        assert_eq!(DishValidator::validate(&draft), Err(ValidationError::MissingCourse));

        let mut draft = base.clone();
        draft.price = "cheap".to_string();
        assert_eq!(
            DishValidator::validate(&draft),
            Err(ValidationError::InvalidPrice("cheap".to_string()))
        );

        let mut draft = base.clone();
        draft.price = "-3".to_string();
        assert_eq!(DishValidator::validate(&draft), Err(ValidationError::NonPositivePrice));

        let mut draft = base;
        draft.price = "inf".to_string();
        assert!(matches!(
            DishValidator::validate(&draft),
            Err(ValidationError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_validate_drops_blank_image() {
        let draft = DishDraft::new("Bobotie", "Traditional", Some(Course::Mains), "85").with_image("  ");
        assert!(DishValidator::validate(&draft).unwrap().image_uri.is_none());
    }

    #[test]
    fn test_filter_by_name_ignores_case_and_course() {
        let menu = sample_menu();
        let names: Vec<&str> = filter_dishes(&menu, "cake", None)
            .iter()
            .map(|entry| entry.dish.name.as_str())
            .collect();
        assert_eq!(names, vec!["Cheesecake", "Carrot Cake"]);
    }

    #[test]
    fn test_filter_keeps_original_positions() {
        let menu = sample_menu();
        let mains = filter_dishes(&menu, "", Some(Course::Mains));
        let indices: Vec<usize> = mains.iter().map(|entry| entry.index).collect();
        assert_eq!(indices, vec![1, 4]);
    }

    #[test]
    fn test_filter_combines_query_and_course() {
        let menu = sample_menu();
        let result = filter_dishes(&menu, "BUN", Some(Course::Mains));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].dish.name, "Bunny Chow");
        assert!(filter_dishes(&menu, "bun", Some(Course::Starters)).is_empty());
    }

    #[test]
    fn test_average_price_per_course() {
        let menu = sample_menu();
        assert_eq!(average_price(&menu, Course::Mains), 80.0);
        assert_eq!(average_price(&menu, Course::Desserts), 45.0);
        assert_eq!(average_price(&menu, Course::Starters), 30.0);
    }

    #[test]
    fn test_average_price_of_empty_course_is_zero() {
        let menu = vec![dish("Bobotie", Course::Mains, 85.0)];
        assert_eq!(average_price(&menu, Course::Desserts), 0.0);
        assert_eq!(average_price(&[], Course::Mains), 0.0);
        assert_eq!(format_price(average_price(&menu, Course::Desserts)), "R0.00");
    }

    #[test]
    fn test_filter_history_by_substring() {
        let entries = vec![
            HistoryEntry::new("t1", "Added dish: Bobotie"),
            HistoryEntry::new("t2", "Deleted dish: Bobotie"),
            HistoryEntry::new("t3", "Added dish: Malva Pudding"),
        ];
        assert_eq!(filter_history(&entries, "Added dish").len(), 2);
        assert_eq!(filter_history(&entries, "").len(), 3);
        assert!(filter_history(&entries, "added dish").is_empty());
    }
}
