use crate::application::{App, AppMode, FormField};
use crate::infrastructure::CsvExporter;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Search => Self::handle_search_mode(app, key),
            AppMode::AddDish => Self::handle_add_dish_mode(app, key, modifiers),
            AppMode::History => Self::handle_history_mode(app, key),
            AppMode::ConfirmClear => Self::handle_confirm_clear_mode(app, key),
            AppMode::ExportCsv => Self::handle_filename_input_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('e') = key {
                app.start_csv_export();
            }
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Char('a') => app.start_add_dish(),
            KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
            KeyCode::Char('/') => app.start_search(),
            KeyCode::Char('c') => app.cycle_course_filter(),
            KeyCode::Char('h') => app.open_history(),
            KeyCode::F(1) | KeyCode::Char('?') => app.open_help(),
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_search_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                app.finish_search();
            }
            KeyCode::Esc => {
                app.cancel_search();
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    let prev = Self::prev_boundary(&app.search_query, app.cursor_position);
                    app.search_query.remove(prev);
                    app.cursor_position = prev;
                    app.search_changed();
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.search_query.len() {
                    app.search_query.remove(app.cursor_position);
                    app.search_changed();
                }
            }
            KeyCode::Left => {
                app.cursor_position = Self::prev_boundary(&app.search_query, app.cursor_position);
            }
            KeyCode::Right => {
                app.cursor_position = Self::next_boundary(&app.search_query, app.cursor_position);
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.search_query.len();
            }
            KeyCode::Char(c) => {
                app.search_query.insert(app.cursor_position, c);
                app.cursor_position += c.len_utf8();
                app.search_changed();
            }
            _ => {}
        }
    }

    fn handle_add_dish_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Enter => app.submit_dish(),
            KeyCode::Esc => app.cancel_add_dish(),
            KeyCode::Tab | KeyCode::Down => app.form_next_field(),
            KeyCode::BackTab | KeyCode::Up => app.form_previous_field(),
            KeyCode::Left if app.form.focus == FormField::Course => app.form_cycle_course(false),
            KeyCode::Right if app.form.focus == FormField::Course => app.form_cycle_course(true),
            KeyCode::Backspace => app.form_backspace(),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => app.form_insert_char(c),
            _ => {}
        }
    }

    fn handle_history_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('q') => app.close_history(),
            KeyCode::Char('f') => app.cycle_history_filter(),
            KeyCode::Char('c') => app.request_clear_history(),
            KeyCode::Up | KeyCode::Char('k') => app.scroll_history(-1),
            KeyCode::Down | KeyCode::Char('j') => app.scroll_history(1),
            KeyCode::PageUp => app.scroll_history(-5),
            KeyCode::PageDown => app.scroll_history(5),
            _ => {}
        }
    }

    fn handle_confirm_clear_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_clear_history(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_clear_history(),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.get_csv_export_filename();
                let result = CsvExporter::export_menu(app.menu.dishes(), &filename);
                app.set_csv_export_result(result);
            }
            KeyCode::Esc => {
                app.cancel_filename_input();
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    let prev = Self::prev_boundary(&app.filename_input, app.cursor_position);
                    app.filename_input.remove(prev);
                    app.cursor_position = prev;
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.filename_input.len() {
                    app.filename_input.remove(app.cursor_position);
                }
            }
            KeyCode::Left => {
                app.cursor_position = Self::prev_boundary(&app.filename_input, app.cursor_position);
            }
            KeyCode::Right => {
                app.cursor_position = Self::next_boundary(&app.filename_input, app.cursor_position);
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.filename_input.len();
            }
            KeyCode::Char(c) => {
                app.filename_input.insert(app.cursor_position, c);
                app.cursor_position += c.len_utf8();
            }
            _ => {}
        }
    }

    fn prev_boundary(text: &str, pos: usize) -> usize {
        text[..pos].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
    }

    fn next_boundary(text: &str, pos: usize) -> usize {
        text[pos..].chars().next().map(|c| pos + c.len_utf8()).unwrap_or(pos)
    }
}
