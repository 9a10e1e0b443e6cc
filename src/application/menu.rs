//! The session's menu, backed by the key-value store.

use super::collection::{load_collection, save_collection};
use super::history::HistoryLog;
use crate::domain::{
    Course, Dish, DishDraft, DishValidator, DomainError, DomainResult, MENU_KEY, MenuEntry,
    average_price, filter_dishes,
};
use crate::infrastructure::KeyValueStore;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Owns the menu collection and the history log that records its changes.
///
/// Every mutation writes the whole collection back to the store before the
/// in-memory copy changes, so a failed write leaves the session showing the
/// last state that was actually saved.
///
/// Dishes are addressed by position. A position is only valid until the
/// next mutation.
pub struct MenuRepository {
    store: Arc<dyn KeyValueStore>,
    dishes: Vec<Dish>,
    history: HistoryLog,
}

impl std::fmt::Debug for MenuRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuRepository")
            .field("dishes", &self.dishes)
            .field("history", &self.history)
            .finish()
    }
}

impl MenuRepository {
    /// Loads the menu and its history from `store`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Persistence`] if the store cannot be read.
    /// Missing or unreadable payloads load as empty collections.
    pub fn load(store: Arc<dyn KeyValueStore>) -> DomainResult<Self> {
        let dishes = load_collection(store.as_ref(), MENU_KEY)?;
        let history = HistoryLog::load(Arc::clone(&store))?;
        info!(dishes = dishes.len(), history = history.len(), "menu loaded");
        Ok(Self { store, dishes, history })
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn get(&self, index: usize) -> Option<&Dish> {
        self.dishes.get(index)
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryLog {
        &mut self.history
    }

    /// Validates `draft` and appends the resulting dish to the menu.
    ///
    /// # Errors
    ///
    /// * [`DomainError::Validation`] if the draft breaks an input constraint;
    ///   nothing is written and no history is recorded.
    /// * [`DomainError::Persistence`] if the menu could not be saved; the
    ///   in-memory menu is unchanged.
    /// * [`DomainError::HistoryNotRecorded`] if the dish was saved but its
    ///   history entry could not be.
    pub fn add(&mut self, draft: &DishDraft) -> DomainResult<&[Dish]> {
        let dish = DishValidator::validate(draft)?;
        let name = dish.name.clone();

        let mut updated = self.dishes.clone();
        updated.push(dish);
        save_collection(self.store.as_ref(), MENU_KEY, &updated)?;
        self.dishes = updated;

        info!(dish = %name, total = self.dishes.len(), "dish added");
        self.record(format!("Added dish: {}", name))?;
        Ok(&self.dishes)
    }

    /// Removes the dish at `index`; later dishes move up one position.
    ///
    /// # Errors
    ///
    /// * [`DomainError::IndexOutOfRange`] if no dish sits at `index`.
    /// * [`DomainError::Persistence`] if the menu could not be saved.
    /// * [`DomainError::HistoryNotRecorded`] if the dish was removed but its
    ///   history entry could not be saved.
    pub fn delete(&mut self, index: usize) -> DomainResult<&[Dish]> {
        if index >= self.dishes.len() {
            error!(index, len = self.dishes.len(), "delete requested for missing dish");
            return Err(DomainError::IndexOutOfRange {
                index,
                len: self.dishes.len(),
            });
        }

        let mut updated = self.dishes.clone();
        let removed = updated.remove(index);
        save_collection(self.store.as_ref(), MENU_KEY, &updated)?;
        self.dishes = updated;

        info!(dish = %removed.name, index, "dish deleted");
        self.record(format!("Deleted dish: {}", removed.name))?;
        Ok(&self.dishes)
    }

    /// Dishes whose name contains `query` (any case) and, if given, whose
    /// course is `course`. Each entry keeps its position in the full menu.
    pub fn filter(&self, query: &str, course: Option<Course>) -> Vec<MenuEntry<'_>> {
        filter_dishes(&self.dishes, query, course)
    }

    pub fn average_price(&self, course: Course) -> f64 {
        average_price(&self.dishes, course)
    }

    pub fn count_by_course(&self, course: Course) -> usize {
        self.dishes.iter().filter(|dish| dish.course == Some(course)).count()
    }

    // The menu write has already succeeded here, so the change stands and
    // only the missing history entry is reported.
    fn record(&mut self, action: String) -> DomainResult<()> {
        if let Err(e) = self.history.append(&action) {
            warn!(action = %action, error = %e, "failed to record history entry");
            return Err(DomainError::HistoryNotRecorded {
                action,
                source: Box::new(e),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HISTORY_KEY, ValidationError};
    use crate::infrastructure::{FileStore, MemoryStore};
    use tempfile::TempDir;

    fn fresh_menu() -> (Arc<MemoryStore>, MenuRepository) {
        let store = Arc::new(MemoryStore::new());
        let menu = MenuRepository::load(store.clone()).unwrap();
        (store, menu)
    }

    fn draft(name: &str, course: Course, price: &str) -> DishDraft {
        DishDraft::new(name, "House special", Some(course), price)
    }

    fn actions(menu: &MenuRepository) -> Vec<String> {
        menu.history()
            .entries()
            .iter()
            .map(|entry| entry.action.clone())
            .collect()
    }

    #[test]
    fn test_add_appends_dish_and_history() {
        let (_, mut menu) = fresh_menu();
        let dishes = menu.add(&draft("Bobotie", Course::Mains, "85")).unwrap();

        assert_eq!(dishes.len(), 1);
        assert_eq!(menu.len(), 1);
        assert_eq!(actions(&menu), vec!["Added dish: Bobotie"]);
    }

    #[test]
    fn test_add_invalid_price_changes_nothing() {
        let (store, mut menu) = fresh_menu();
        menu.add(&draft("Bobotie", Course::Mains, "85")).unwrap();

        for price in ["0", "-10", "abc", ""] {
            let result = menu.add(&draft("Freebie", Course::Starters, price));
            assert!(matches!(result, Err(DomainError::Validation(_))), "price {:?}", price);
        }

        assert_eq!(menu.len(), 1);
        assert_eq!(menu.history().len(), 1);
        let stored = MenuRepository::load(store).unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn test_add_reports_which_constraint_failed() {
        let (_, mut menu) = fresh_menu();
        let result = menu.add(&DishDraft::new("Soup", "Hot", None, "20"));
        assert!(matches!(
            result,
            Err(DomainError::Validation(ValidationError::MissingCourse))
        ));
    }

    #[test]
    fn test_add_persistence_failure_keeps_state() {
        let (store, mut menu) = fresh_menu();
        menu.add(&draft("Bobotie", Course::Mains, "85")).unwrap();

        store.set_failing(true);
        let result = menu.add(&draft("Malva Pudding", Course::Desserts, "45"));
        assert!(matches!(result, Err(DomainError::Persistence(_))));
        assert_eq!(menu.len(), 1);
        assert_eq!(menu.history().len(), 1);
    }

    #[test]
    fn test_add_reports_unrecorded_history() {
        let (store, mut menu) = fresh_menu();
        store.set_failing_key(HISTORY_KEY, true);

        let result = menu.add(&draft("Bobotie", Course::Mains, "85"));
        assert!(matches!(
            result,
            Err(DomainError::HistoryNotRecorded { ref action, .. }) if action == "Added dish: Bobotie"
        ));
        assert_eq!(menu.len(), 1);
        assert!(menu.history().is_empty());

        store.set_failing_key(HISTORY_KEY, false);
        let reopened = MenuRepository::load(store).unwrap();
        assert_eq!(reopened.len(), 1);
        assert!(reopened.history().is_empty());
    }

    #[test]
    fn test_delete_reports_unrecorded_history() {
        let (store, mut menu) = fresh_menu();
        menu.add(&draft("Bobotie", Course::Mains, "85")).unwrap();

        store.set_failing_key(HISTORY_KEY, true);
        let result = menu.delete(0);
        assert!(matches!(result, Err(DomainError::HistoryNotRecorded { .. })));
        assert!(menu.is_empty());
        assert_eq!(actions(&menu), vec!["Added dish: Bobotie"]);
    }

    #[test]
    fn test_delete_shifts_following_dishes() {
        let (_, mut menu) = fresh_menu();
        for name in ["A", "B", "C", "D"] {
            menu.add(&draft(name, Course::Starters, "10")).unwrap();
        }

        menu.delete(1).unwrap();

        let names: Vec<&str> = menu.dishes().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "D"]);
        assert_eq!(actions(&menu).last().unwrap(), "Deleted dish: B");
        assert_eq!(menu.history().len(), 5);
    }

    #[test]
    fn test_delete_out_of_range_changes_nothing() {
        let (_, mut menu) = fresh_menu();
        menu.add(&draft("Bobotie", Course::Mains, "85")).unwrap();

        let result = menu.delete(1);
        assert!(matches!(
            result,
            Err(DomainError::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert_eq!(menu.len(), 1);
        assert_eq!(menu.history().len(), 1);
    }

    #[test]
    fn test_delete_persistence_failure_keeps_dish() {
        let (store, mut menu) = fresh_menu();
        menu.add(&draft("Bobotie", Course::Mains, "85")).unwrap();

        store.set_failing(true);
        assert!(matches!(menu.delete(0), Err(DomainError::Persistence(_))));
        assert_eq!(menu.len(), 1);
        assert_eq!(menu.history().len(), 1);
    }

    #[test]
    fn test_filter_and_average_from_repository() {
        let (_, mut menu) = fresh_menu();
        menu.add(&draft("Cheesecake", Course::Desserts, "50")).unwrap();
        menu.add(&draft("Bobotie", Course::Mains, "85")).unwrap();
        menu.add(&draft("Carrot Cake", Course::Desserts, "40")).unwrap();

        let cakes = menu.filter("cake", None);
        assert_eq!(cakes.len(), 2);
        assert_eq!(cakes[1].index, 2);
        assert_eq!(menu.len(), 3);

        assert_eq!(menu.average_price(Course::Desserts), 45.0);
        assert_eq!(menu.average_price(Course::Starters), 0.0);
        assert_eq!(menu.count_by_course(Course::Desserts), 2);
    }

    #[test]
    fn test_malformed_menu_payload_loads_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(MENU_KEY, "[{\"name\": 42}]").unwrap();
        let menu = MenuRepository::load(store).unwrap();
        assert!(menu.is_empty());
    }

    #[test]
    fn test_restart_round_trip_through_file_store() {
        let dir = TempDir::new().unwrap();
        let original = draft("Bobotie", Course::Mains, "85.00").with_image("file:///bobotie.jpg");

        let added = {
            let mut menu = MenuRepository::load(Arc::new(FileStore::new(dir.path()))).unwrap();
            menu.add(&original).unwrap();
            menu.dishes()[0].clone()
        };

        let reopened = MenuRepository::load(Arc::new(FileStore::new(dir.path()))).unwrap();
        assert_eq!(reopened.dishes(), &[added]);
        assert_eq!(reopened.history().entries()[0].action, "Added dish: Bobotie");
    }

    #[test]
    fn test_bobotie_and_malva_scenario() {
        let (store, mut menu) = fresh_menu();

        menu.add(&DishDraft::new("Bobotie", "Traditional", Some(Course::Mains), "85.00"))
            .unwrap();
        let names: Vec<&str> = menu.dishes().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Bobotie"]);

        menu.add(&DishDraft::new("Malva Pudding", "Sweet", Some(Course::Desserts), "45.00"))
            .unwrap();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu.average_price(Course::Mains), 85.0);

        menu.delete(0).unwrap();
        let names: Vec<&str> = menu.dishes().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Malva Pudding"]);
        assert_eq!(
            actions(&menu),
            vec![
                "Added dish: Bobotie",
                "Added dish: Malva Pudding",
                "Deleted dish: Bobotie",
            ]
        );

        menu.history_mut().clear().unwrap();
        assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
        assert!(MenuRepository::load(store).unwrap().history().is_empty());
    }
}
