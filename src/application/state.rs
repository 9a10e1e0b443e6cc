//! Application state management for the terminal menu board.
//!
//! This module contains the main application state and mode management
//! for the terminal user interface.

use super::history::{HistoryFilter, TIMESTAMP_FORMAT};
use super::menu::MenuRepository;
use crate::domain::{Course, DishDraft, DomainError, HistoryEntry, MenuEntry};
use chrono::Local;

/// Represents the current mode of the application.
///
/// The mode decides which screen is drawn and how key presses are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Menu screen - arrow keys move the selection, shortcuts available
    Normal,
    /// User is typing a dish name search on the menu screen
    Search,
    /// Add Dish form is open
    AddDish,
    /// History screen is displayed
    History,
    /// History screen is asking whether to clear everything
    ConfirmClear,
    /// CSV export dialog is open
    ExportCsv,
    /// Help popup is displayed
    Help,
}

/// Input fields of the Add Dish form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Course,
    Price,
    Image,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Description,
        FormField::Course,
        FormField::Price,
        FormField::Image,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Dish Name",
            FormField::Description => "Description",
            FormField::Course => "Course",
            FormField::Price => "Price (ZAR)",
            FormField::Image => "Image",
        }
    }

    pub fn next(&self) -> Self {
        let pos = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let pos = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Contents of the Add Dish form.
#[derive(Debug, Clone, PartialEq)]
pub struct DishForm {
    pub name: String,
    pub description: String,
    pub course: Option<Course>,
    pub price: String,
    pub image: String,
    pub focus: FormField,
}

impl Default for DishForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            course: None,
            price: String::new(),
            image: String::new(),
            focus: FormField::Name,
        }
    }
}

impl DishForm {
    pub fn to_draft(&self) -> DishDraft {
        let draft = DishDraft::new(&self.name, &self.description, self.course, &self.price);
        if self.image.trim().is_empty() {
            draft
        } else {
            draft.with_image(&self.image)
        }
    }

    /// Text buffer behind the focused field; the course field has none.
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::Description => Some(&mut self.description),
            FormField::Course => None,
            FormField::Price => Some(&mut self.price),
            FormField::Image => Some(&mut self.image),
        }
    }

    pub fn field_text(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.name.clone(),
            FormField::Description => self.description.clone(),
            FormField::Course => self
                .course
                .map(|c| c.label().to_string())
                .unwrap_or_else(|| "Select Course".to_string()),
            FormField::Price => self.price.clone(),
            FormField::Image => self.image.clone(),
        }
    }
}

/// Main application state containing the menu and UI state.
///
/// The menu repository is created once per session and owned here; every
/// screen reads and mutates the menu through it.
#[derive(Debug)]
pub struct App {
    /// The session's menu and its history log
    pub menu: MenuRepository,
    /// Current application mode
    pub mode: AppMode,
    /// Dish name search, matched case-insensitively
    pub search_query: String,
    /// Course the menu screen is restricted to, if any
    pub course_filter: Option<Course>,
    /// Selected row within the filtered dish list
    pub selected: usize,
    /// Add Dish form contents
    pub form: DishForm,
    /// Action preset applied on the history screen
    pub history_filter: HistoryFilter,
    /// First visible line on the history screen
    pub history_scroll: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Input buffer for filename entry
    pub filename_input: String,
    /// Cursor position within the search or filename buffer
    pub cursor_position: usize,
}

impl App {
    pub fn new(menu: MenuRepository) -> Self {
        Self {
            menu,
            mode: AppMode::Normal,
            search_query: String::new(),
            course_filter: None,
            selected: 0,
            form: DishForm::default(),
            history_filter: HistoryFilter::All,
            history_scroll: 0,
            help_scroll: 0,
            status_message: None,
            filename_input: String::new(),
            cursor_position: 0,
        }
    }

    /// Dishes shown on the menu screen under the current search and course filter.
    pub fn visible_dishes(&self) -> Vec<MenuEntry<'_>> {
        self.menu.filter(&self.search_query, self.course_filter)
    }

    pub fn visible_history(&self) -> Vec<&HistoryEntry> {
        self.menu.history().filter(self.history_filter.needle())
    }

    /// Current local time as shown in the header.
    pub fn clock_text(&self) -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn select_next(&mut self) {
        let count = self.visible_dishes().len();
        if self.selected + 1 < count {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keeps the selection inside the filtered list after it shrinks.
    pub fn clamp_selection(&mut self) {
        let count = self.visible_dishes().len();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    /// Switches to search mode, keeping the current query for refinement.
    pub fn start_search(&mut self) {
        self.mode = AppMode::Search;
        self.cursor_position = self.search_query.len();
        self.status_message = None;
    }

    /// Keeps the typed query applied and returns to the menu.
    pub fn finish_search(&mut self) {
        self.mode = AppMode::Normal;
        self.cursor_position = 0;
    }

    /// Drops the query entirely and returns to the menu.
    pub fn cancel_search(&mut self) {
        self.mode = AppMode::Normal;
        self.search_query.clear();
        self.cursor_position = 0;
        self.selected = 0;
    }

    /// Re-applies the search after the query changed.
    pub fn search_changed(&mut self) {
        self.selected = 0;
    }

    /// Steps the course filter through All, Starters, Mains, Desserts.
    pub fn cycle_course_filter(&mut self) {
        self.course_filter = Course::cycle_next(self.course_filter);
        self.selected = 0;
    }

    /// Deletes the dish under the cursor.
    ///
    /// The filtered view carries each dish's position in the full menu, so the
    /// right dish is removed even when a search or course filter is active.
    pub fn delete_selected(&mut self) {
        let Some(entry) = self.visible_dishes().get(self.selected).copied() else {
            return;
        };
        let index = entry.index;
        let name = entry.dish.name.clone();

        match self.menu.delete(index) {
            Ok(_) => {
                self.status_message = Some(format!("Deleted {}", name));
            }
            Err(error @ DomainError::HistoryNotRecorded { .. }) => {
                self.status_message = Some(format!("Deleted {}, but {}", name, error));
            }
            Err(error) => {
                self.status_message = Some(format!("Delete failed: {}", error));
            }
        }
        self.clamp_selection();
    }

    /// Opens an empty Add Dish form.
    pub fn start_add_dish(&mut self) {
        self.mode = AppMode::AddDish;
        self.form = DishForm::default();
        self.status_message = None;
    }

    pub fn cancel_add_dish(&mut self) {
        self.mode = AppMode::Normal;
        self.form = DishForm::default();
    }

    /// Validates and saves the form.
    ///
    /// On success the form closes and the menu screen shows the new dish.
    /// If only the history entry failed to save, the dish is kept and the
    /// form still closes, with the failure in the status bar. Any other
    /// failure leaves the form open with the reason in the status bar.
    pub fn submit_dish(&mut self) {
        let draft = self.form.to_draft();
        match self.menu.add(&draft) {
            Ok(_) => {
                self.status_message = Some(format!("Added {}", draft.name.trim()));
                self.form = DishForm::default();
                self.mode = AppMode::Normal;
            }
            Err(error @ DomainError::HistoryNotRecorded { .. }) => {
                self.status_message = Some(format!("Added {}, but {}", draft.name.trim(), error));
                self.form = DishForm::default();
                self.mode = AppMode::Normal;
            }
            Err(error) => {
                self.status_message = Some(error.to_string());
            }
        }
    }

    pub fn form_next_field(&mut self) {
        self.form.focus = self.form.focus.next();
    }

    pub fn form_previous_field(&mut self) {
        self.form.focus = self.form.focus.prev();
    }

    pub fn form_insert_char(&mut self, c: char) {
        if let Some(text) = self.form.focused_text_mut() {
            text.push(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(text) = self.form.focused_text_mut() {
            text.pop();
        }
    }

    pub fn form_cycle_course(&mut self, forward: bool) {
        self.form.course = if forward {
            Course::cycle_next(self.form.course)
        } else {
            Course::cycle_prev(self.form.course)
        };
    }

    pub fn open_history(&mut self) {
        self.mode = AppMode::History;
        self.history_scroll = 0;
        self.status_message = None;
    }

    pub fn close_history(&mut self) {
        self.mode = AppMode::Normal;
    }

    pub fn cycle_history_filter(&mut self) {
        self.history_filter = self.history_filter.next();
        self.history_scroll = 0;
    }

    pub fn scroll_history(&mut self, delta: isize) {
        let max = self.visible_history().len().saturating_sub(1);
        let target = self.history_scroll.saturating_add_signed(delta);
        self.history_scroll = target.min(max);
    }

    /// Asks for confirmation before wiping the history.
    pub fn request_clear_history(&mut self) {
        self.mode = AppMode::ConfirmClear;
    }

    pub fn confirm_clear_history(&mut self) {
        match self.menu.history_mut().clear() {
            Ok(()) => {
                self.status_message = Some("All history has been cleared.".to_string());
            }
            Err(error) => {
                self.status_message = Some(format!("Clear failed: {}", error));
            }
        }
        self.history_scroll = 0;
        self.mode = AppMode::History;
    }

    pub fn cancel_clear_history(&mut self) {
        self.mode = AppMode::History;
    }

    /// Switches to CSV export mode to prompt for a filename.
    ///
    /// Initializes the filename input with a default CSV filename.
    pub fn start_csv_export(&mut self) {
        self.mode = AppMode::ExportCsv;
        self.filename_input = "menu.csv".to_string();
        self.cursor_position = self.filename_input.len();
        self.status_message = None;
    }

    /// Gets the filename to use for CSV export.
    ///
    /// Returns the filename input if not empty, otherwise returns a default CSV filename.
    pub fn get_csv_export_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "menu.csv".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Processes the result of a CSV export operation.
    ///
    /// Sets appropriate status message based on whether the export was successful.
    /// Returns to normal mode.
    pub fn set_csv_export_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Exported to {}", filename));
            }
            Err(error) => {
                self.status_message = Some(format!("Export failed: {}", error));
            }
        }

        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Cancels filename input and returns to normal mode.
    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    pub fn open_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }
}
