use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame,
};
use taskboard_core::{Priority, Task};
use unicode_width::UnicodeWidthStr;

use crate::view::{FormField, NoticeLevel, Page, TaskView, ViewStatus};

pub const APP_TITLE: &str = "Project Management Tool";

const FORM_NAME_LABEL: &str = " Task: ";
const FORM_PRIORITY_LABEL: &str = "  Priority: ";
const FORM_DUE_LABEL: &str = "  Due: ";

pub fn draw(f: &mut Frame, view: &TaskView) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Navbar
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    draw_navbar(f, view, main_chunks[0]);

    match view.page {
        Page::Tasks => draw_tasks_page(f, view, main_chunks[1]),
        Page::About => draw_about_page(f, main_chunks[1]),
        Page::Login => draw_placeholder_form(f, main_chunks[1], "Login", &["Username", "Password"]),
        Page::SignUp => draw_placeholder_form(
            f,
            main_chunks[1],
            "Sign Up",
            &["Full name", "Username", "Phone number", "Email", "Password", "Confirm password"],
        ),
    }

    let footer = Paragraph::new(footer_help(view))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[2]);

    if let Some(task) = view.pending_delete() {
        draw_confirm_modal(f, task, size);
    }
    draw_notifications(f, view, size);
}

fn draw_navbar(f: &mut Frame, view: &TaskView, area: Rect) {
    let titles: Vec<Line> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, page)| Line::from(format!("{} {}", i + 1, page.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(view.page.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(format!(" {} ", APP_TITLE))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(tabs, area);
}

fn draw_tasks_page(f: &mut Frame, view: &TaskView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    draw_form(f, view, chunks[0]);
    draw_task_list(f, view, chunks[1]);
}

fn draw_form(f: &mut Frame, view: &TaskView, area: Rect) {
    let form = &view.form;
    let field_style = |field: FormField| {
        if view.editing && form.focus == field {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        }
    };

    let name = if form.name.is_empty() && !view.editing {
        Span::styled("Add Task", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(form.name.as_str(), field_style(FormField::Name))
    };
    let due_text = if form.due.is_empty() && !(view.editing && form.focus == FormField::DueDate) {
        Span::styled("none", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(form.due.as_str(), field_style(FormField::DueDate))
    };

    let line = Line::from(vec![
        Span::styled(FORM_NAME_LABEL, Style::default().fg(Color::Blue)),
        name,
        Span::styled(FORM_PRIORITY_LABEL, Style::default().fg(Color::Blue)),
        Span::styled(format!("< {} >", form.priority), field_style(FormField::Priority)),
        Span::styled(FORM_DUE_LABEL, Style::default().fg(Color::Blue)),
        due_text,
    ]);

    let title = if view.editing { " New task (Enter to add) " } else { " New task " };
    let paragraph = Paragraph::new(line).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(paragraph, area);

    if view.editing {
        if let Some(x) = form_cursor_x(view) {
            f.set_cursor_position((area.x + 1 + x, area.y + 1));
        }
    }
}

// Column of the text cursor inside the form box, if the focused field takes text.
fn form_cursor_x(view: &TaskView) -> Option<u16> {
    let form = &view.form;
    let before_cursor = |text: &str| -> usize {
        let prefix: String = text.chars().take(form.cursor).collect();
        prefix.width()
    };
    let offset = match form.focus {
        FormField::Name => FORM_NAME_LABEL.width() + before_cursor(&form.name),
        FormField::DueDate => {
            FORM_NAME_LABEL.width()
                + form.name.width()
                + FORM_PRIORITY_LABEL.width()
                + format!("< {} >", form.priority).width()
                + FORM_DUE_LABEL.width()
                + before_cursor(&form.due)
        }
        FormField::Priority => return None,
    };
    u16::try_from(offset).ok()
}

fn draw_task_list(f: &mut Frame, view: &TaskView, area: Rect) {
    let block = Block::default()
        .title(" Tasks ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    if view.status == ViewStatus::Loading {
        let loading = Paragraph::new("Loading tasks...")
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        f.render_widget(loading, area);
        return;
    }

    if view.tasks.is_empty() {
        let text = match view.status {
            ViewStatus::TasksLoaded => "No tasks yet. Press 'a' to add one.",
            _ => "Tasks not loaded. Press 'r' to retry.",
        };
        let empty = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = view.tasks.iter().map(task_row).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(10),    // Name
            Constraint::Length(16), // Priority
            Constraint::Length(16), // Due
        ],
    )
    .header(Row::new(vec!["Task", "Priority", "Due"]).style(Style::default().fg(Color::Yellow)))
    .block(block)
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    let mut state = TableState::default().with_selected(view.selected);
    f.render_stateful_widget(table, area, &mut state);
}

fn task_row(task: &Task) -> Row<'_> {
    let name_style = if task.is_done {
        Style::default().add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let priority_style = match task.priority {
        Priority::High => Style::default().fg(Color::Red),
        Priority::Medium => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::Green),
    };

    Row::new(vec![
        Span::styled(task.task_name.as_str(), name_style),
        Span::styled(format!("{} Priority", task.priority), priority_style),
        Span::raw(format!("Due: {}", task.due_label())),
    ])
}

fn draw_about_page(f: &mut Frame, area: Rect) {
    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let text = vec![
        Line::from(Span::styled("About", heading)),
        Line::from(""),
        Line::from(format!(
            "{} keeps a single shared list of tasks with a priority and an optional due date.",
            APP_TITLE
        )),
        Line::from(""),
        Line::from(Span::styled("Features:", heading)),
        Line::from("  - Add and delete tasks"),
        Line::from("  - Low / Medium / High priority levels"),
        Line::from("  - Optional due dates (YYYY-MM-DD, today, tomorrow, +3d, fri, ...)"),
        Line::from("  - Completion status, shown struck through"),
    ];

    let about = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
        .wrap(Wrap { trim: true });
    f.render_widget(about, area);
}

// Login and sign-up are layout only; nothing is submitted anywhere.
fn draw_placeholder_form(f: &mut Frame, area: Rect, title: &str, fields: &[&str]) {
    let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Min(0));

    let outer = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(inner);

    for (field, chunk) in fields.iter().zip(chunks.iter()) {
        let input = Paragraph::new(Span::styled(*field, Style::default().fg(Color::DarkGray)))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(input, *chunk);
    }

    if let Some(rest) = chunks.last() {
        let note = Paragraph::new("Accounts are not available yet.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(note, *rest);
    }
}

fn draw_confirm_modal(f: &mut Frame, task: &Task, size: Rect) {
    let area = centered_rect(50, 7, size);
    let text = vec![
        Line::from("Are you sure you want to delete this task?"),
        Line::from(""),
        Line::from(Span::styled(task.task_name.as_str(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled("y: Delete | n: Cancel", Style::default().fg(Color::DarkGray))),
    ];
    let modal = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Confirm ")
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(Clear, area);
    f.render_widget(modal, area);
}

// Toasts stack upward from the bottom-right corner, above the footer.
fn draw_notifications(f: &mut Frame, view: &TaskView, size: Rect) {
    let width = 44.min(size.width);
    let mut bottom = size.height.saturating_sub(1);

    for notification in view.notifications().iter().rev() {
        if bottom < 3 {
            break;
        }
        let area = Rect::new(size.width.saturating_sub(width), bottom - 3, width, 3);
        let color = match notification.level {
            NoticeLevel::Success => Color::Green,
            NoticeLevel::Warning => Color::Yellow,
            NoticeLevel::Error => Color::Red,
        };
        let toast = Paragraph::new(notification.message.as_str())
            .style(Style::default().fg(color))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color)),
            );
        f.render_widget(Clear, area);
        f.render_widget(toast, area);
        bottom -= 3;
    }
}

fn footer_help(view: &TaskView) -> &'static str {
    if view.is_confirming() {
        "y: Confirm delete | n/Esc: Cancel"
    } else if view.editing {
        "Tab: Next field | ←/→: Move / change priority | Enter: Add | Esc: Cancel"
    } else if view.page == Page::Tasks {
        "a: Add | d: Delete | j/k: Navigate | r: Reload | Tab/1-4: Pages | q: Quit"
    } else {
        "Tab/1-4: Pages | q: Quit"
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
