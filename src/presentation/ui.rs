use crate::application::{App, AppMode, FormField};
use crate::domain::{Course, format_price};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
};

const BEIGE: Color = Color::Rgb(0xd3, 0xbc, 0x8b);
const TAUPE: Color = Color::Rgb(0x8d, 0x79, 0x63);
const GOLD: Color = Color::Rgb(0xf2, 0xd2, 0x3d);

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.mode {
        AppMode::AddDish => render_add_dish(f, app, chunks[1]),
        AppMode::History | AppMode::ConfirmClear => render_history(f, app, chunks[1]),
        _ => render_menu(f, app, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    match app.mode {
        AppMode::Help => render_help_popup(f, app.help_scroll),
        AppMode::ConfirmClear => render_confirm_popup(f),
        _ => {}
    }
}

/// Icon shown next to a dish's course.
pub fn course_icon(course: Option<Course>) -> &'static str {
    match course {
        Some(Course::Starters) => "🍎",
        Some(Course::Mains) => "🥩",
        Some(Course::Desserts) => "🧁",
        None => " ",
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled(
        "Christoffel's Restaurant Menu",
        Style::default().fg(BEIGE).add_modifier(Modifier::BOLD),
    );
    let clock = Span::styled(app.clock_text(), Style::default().fg(Color::White));

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    f.render_widget(Paragraph::new(Line::from(title)), halves[0]);
    f.render_widget(
        Paragraph::new(Line::from(clock)).alignment(ratatui::layout::Alignment::Right),
        halves[1],
    );
}

fn render_menu(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    let course_label = app.course_filter.map(|c| c.label()).unwrap_or("All");
    let search_style = if matches!(app.mode, AppMode::Search) {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(TAUPE)
    };
    let filter_line = Line::from(vec![
        Span::styled(format!("Search: {}", app.search_query), search_style),
        Span::raw("  |  "),
        Span::styled(format!("Course: {}", course_label), Style::default().fg(TAUPE)),
    ]);
    f.render_widget(Paragraph::new(filter_line), chunks[0]);

    render_dish_table(f, app, chunks[1]);

    let averages: Vec<Span> = Course::ALL
        .iter()
        .map(|course| {
            Span::styled(
                format!("{} Avg: {}   ", course, format_price(app.menu.average_price(*course))),
                Style::default().fg(BEIGE),
            )
        })
        .collect();
    let summary = Paragraph::new(vec![
        Line::from(format!("Total Items: {}", app.menu.len())),
        Line::from(averages),
    ]);
    f.render_widget(summary, chunks[2]);
}

fn render_dish_table(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Available Dishes");
    let entries = app.visible_dishes();

    if entries.is_empty() {
        let empty = Paragraph::new("No dishes match your search or filter. Add new dishes!")
            .style(Style::default().fg(TAUPE))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Name"),
        Cell::from("Description"),
        Cell::from("Course"),
        Cell::from("Price"),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    // Keep the selected row on screen.
    let visible_rows = area.height.saturating_sub(3) as usize;
    let first = if visible_rows > 0 && app.selected >= visible_rows {
        app.selected + 1 - visible_rows
    } else {
        0
    };

    let mut rows = vec![header];
    for (pos, entry) in entries.iter().enumerate().skip(first).take(visible_rows) {
        let dish = entry.dish;
        let style = if pos == app.selected {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        };
        let course = dish.course.map(|c| c.label()).unwrap_or("");
        rows.push(
            Row::new(vec![
                Cell::from(course_icon(dish.course)),
                Cell::from(dish.name.clone()),
                Cell::from(dish.description.clone()),
                Cell::from(course),
                Cell::from(format_price(dish.price)).style(Style::default().fg(BEIGE)),
            ])
            .style(style)
            .height(1),
        );
    }

    let widths = [
        Constraint::Length(3),
        Constraint::Percentage(25),
        Constraint::Min(10),
        Constraint::Length(9),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths).block(block).column_spacing(1);
    f.render_widget(table, area);
}

fn render_add_dish(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for field in FormField::ALL {
        let focused = app.form.focus == field;
        let marker = if focused { "> " } else { "  " };
        let value = app.form.field_text(field);
        let value_style = if focused {
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let hint = if field == FormField::Course && focused { "  (←/→ to change)" } else { "" };

        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{:<13}", field.label()), Style::default().fg(TAUPE)),
            Span::styled(value, value_style),
            Span::styled(hint, Style::default().fg(TAUPE)),
        ]));
        lines.push(Line::from(""));
    }

    let form = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Add a New Dish"));
    f.render_widget(form, area);
}

fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let title = format!("History - {}", app.history_filter.label());
    let block = Block::default().borders(Borders::ALL).title(title);
    let entries = app.visible_history();

    if entries.is_empty() {
        let empty = Paragraph::new("No history available")
            .style(Style::default().fg(TAUPE))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let lines: Vec<Line> = entries
        .iter()
        .skip(app.history_scroll)
        .map(|entry| {
            Line::from(Span::styled(
                format!("{}: {}", entry.timestamp, entry.action),
                Style::default().fg(GOLD),
            ))
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let hints = match app.mode {
        AppMode::Normal => "a: add dish | d: delete | /: search | c: course | h: history | Ctrl+E: export CSV | ?: help | q: quit".to_string(),
        AppMode::Search => format!("Search: {} (Enter to apply, Esc to clear)", app.search_query),
        AppMode::AddDish => "Tab/↑↓: next field | ←/→: course | Enter: add dish | Esc: cancel".to_string(),
        AppMode::History => "f: filter actions | c: clear all history | ↑↓: scroll | Esc/b: back".to_string(),
        AppMode::ConfirmClear => "y: clear all history | n/Esc: keep it".to_string(),
        AppMode::ExportCsv => format!("Export CSV as: {} (Enter to export, Esc to cancel)", app.filename_input),
        AppMode::Help => "↑↓/jk: scroll | Home: top | Esc/q: close help".to_string(),
    };

    let text = match (&app.status_message, app.mode) {
        (Some(status), AppMode::Normal | AppMode::AddDish | AppMode::History) => status.clone(),
        _ => hints,
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Search => Style::default().fg(Color::Green),
            AppMode::AddDish => Style::default().fg(GOLD),
            AppMode::History => Style::default().fg(BEIGE),
            AppMode::ConfirmClear => Style::default().fg(Color::Red),
            AppMode::ExportCsv => Style::default().fg(Color::Magenta),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn centered(area: Rect, width_pct: u16, height_pct: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_pct) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(height_pct) / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_confirm_popup(f: &mut Frame) {
    let popup_area = centered(f.area(), 50, 20);
    f.render_widget(Clear, popup_area);

    let prompt = Paragraph::new("Clear all history? This cannot be undone.\n\n[y] yes   [n] no")
        .block(Block::default().borders(Borders::ALL).title("Confirm"))
        .style(Style::default().fg(Color::Red));
    f.render_widget(prompt, popup_area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let popup_area = centered(f.area(), 80, 80);
    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("Menu Board Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

pub fn get_help_text() -> String {
    r#"MENU BOARD

=== MENU SCREEN ===
↑↓ or j/k       Move the selection
a               Add a new dish
d / Delete      Delete the selected dish
/               Search dishes by name (case-insensitive)
c               Cycle the course filter: All, Starters, Mains, Desserts
h               Open the history screen
Ctrl+E          Export the menu to a CSV file
F1 or ?         Show this help
q               Quit

=== ADD DISH ===
Tab / ↓         Next field
Shift+Tab / ↑   Previous field
←/→             Change the course (on the Course field)
Enter           Add the dish
Esc             Cancel

Name, description and course are required.
Price must be a positive number.
The image field takes an optional file path or URI.

=== HISTORY ===
f               Cycle the action filter: All, Added dish, Deleted dish
c               Clear all history (asks for confirmation)
↑↓ or j/k       Scroll
Esc / b         Back to the menu

=== STORAGE ===
The menu and history are saved after every change in
$MENUBOARD_DATA_DIR (default: the system data directory).
Logs are written to menuboard.log in the same place."#.to_string()
}
