//! Rendering for the list screens and every modal.

use chrono::NaiveDate;
use ratatui::{prelude::*, widgets::*};

use imuna_client::mask_cpf;

use crate::app::{App, Mode, Screen};
use crate::form::{FieldKind, FormState};

/// Label column width inside the form modal.
const FORM_LABEL_WIDTH: usize = 20;

/// Draw one frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header / tabs
            Constraint::Min(1),    // List
            Constraint::Length(3), // Filter inputs
            Constraint::Length(2), // Status + key hints
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    match app.screen {
        Screen::Employees => draw_employee_list(frame, app, chunks[1]),
        Screen::Vaccines => draw_vaccine_list(frame, app, chunks[1]),
    }
    draw_filter_bar(frame, app, chunks[2]);
    draw_footer(frame, app, chunks[3]);

    match &app.mode {
        Mode::Form(form) => draw_form(frame, form),
        Mode::ConfirmDelete => draw_confirm(frame, app),
        Mode::Detail => draw_detail(frame, app),
        Mode::Error(message) => draw_error(frame, message),
        Mode::Browse | Mode::Filter => {}
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::raw(" Immunization records "),
        Span::raw("| "),
        Span::styled(" Employees ", tab_style(app.screen == Screen::Employees)),
        Span::raw(" "),
        Span::styled(" Vaccines ", tab_style(app.screen == Screen::Vaccines)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(title, area);
}

fn tab_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn row_style(selected: bool) -> Style {
    if selected {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn draw_employee_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .employees
        .rows
        .iter()
        .enumerate()
        .map(|(index, employee)| {
            let vaccine = employee
                .vaccine
                .as_ref()
                .map(|v| v.name.as_str())
                .unwrap_or("-");
            let line = format!(
                "{:>5}  {:<12}  {:<28}  {:<10}  {}",
                employee.id,
                mask_cpf(&employee.cpf),
                employee.full_name,
                employee.birth_date,
                vaccine,
            );
            ListItem::new(Line::from(line)).style(row_style(index == app.employees.selected))
        })
        .collect();

    let block = Block::default()
        .title(format!(" Employees ({}) ", app.employees.total))
        .borders(Borders::ALL);
    frame.render_widget(List::new(items).block(block), area);
}

fn draw_vaccine_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .vaccines
        .rows
        .iter()
        .enumerate()
        .map(|(index, vaccine)| {
            let line = format!(
                "{:>5}  {:<28}  {:<12}  expires {}",
                vaccine.id, vaccine.name, vaccine.batch, vaccine.expiration_date,
            );
            ListItem::new(Line::from(line)).style(row_style(index == app.vaccines.selected))
        })
        .collect();

    let block = Block::default()
        .title(format!(" Vaccines ({}) ", app.vaccines.total))
        .borders(Borders::ALL);
    frame.render_widget(List::new(items).block(block), area);
}

fn draw_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let labels = match app.screen {
        Screen::Employees => [" Filter: cpf ", " Filter: full name "],
        Screen::Vaccines => [" Filter: name ", " Filter: batch "],
    };
    let bar = app.filter_bar();
    let filtering = matches!(app.mode, Mode::Filter);

    for (index, half) in halves.iter().enumerate() {
        let input = &bar.inputs[index];
        let focused = filtering && bar.focus == index;
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };

        let width = half.width.max(3) - 3;
        let scroll = input.visual_scroll(width as usize);
        let widget = Paragraph::new(input.value())
            .style(style)
            .scroll((0, scroll as u16))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(labels[index])
                    .border_style(style),
            );
        frame.render_widget(widget, *half);

        if focused {
            frame.set_cursor_position((
                half.x + ((input.visual_cursor().max(scroll) - scroll) as u16) + 1,
                half.y + 1,
            ));
        }
    }
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let mut spans = vec![Span::styled(
        app.pagination_line(),
        Style::default().fg(Color::Cyan),
    )];
    if let Some(message) = &app.status {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), rows[0]);

    let hints = match app.mode {
        Mode::Filter => "Tab switch field / Enter apply / Esc close",
        Mode::Form(_) => "Tab next field / Space toggle / Enter save / Esc cancel",
        Mode::ConfirmDelete => "y confirm / n cancel",
        _ => "Tab screens / f filter / c create / e edit / d delete / g generate / Enter detail / q quit",
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(Color::DarkGray),
        ))),
        rows[1],
    );
}

// ---------------------------------------------------------------------------
// Modals
// ---------------------------------------------------------------------------

/// Centered overlay rect taking `percent_x` by `percent_y` of `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn draw_form(frame: &mut Frame, form: &FormState) {
    let popup = centered_rect(70, 80, frame.area());
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!(" {} ", form.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(banner) = &form.banner {
        lines.push(Line::from(Span::styled(
            banner.clone(),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }

    let mut cursor: Option<(u16, u16)> = None;
    for (index, field) in form.fields.iter().enumerate() {
        let focused = index == form.active;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let value = match field.kind {
            FieldKind::Text => field.input.value().to_string(),
            FieldKind::Flag => {
                if field.flag {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
        };

        if focused && field.kind == FieldKind::Text {
            cursor = Some((
                inner.x + FORM_LABEL_WIDTH as u16 + field.input.visual_cursor() as u16,
                inner.y + lines.len() as u16,
            ));
        }

        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<width$}", format!("{}:", field.label), width = FORM_LABEL_WIDTH),
                label_style,
            ),
            Span::raw(value),
        ]));

        if let Some(messages) = form.field_errors(field.key) {
            for message in messages {
                lines.push(Line::from(Span::styled(
                    format!("  {message}"),
                    Style::default().fg(Color::Red),
                )));
            }
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter save / Esc cancel",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);

    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }
}

fn draw_confirm(frame: &mut Frame, app: &App) {
    let subject = match app.screen {
        Screen::Employees => app
            .employees
            .selected_row()
            .map(|e| format!("employee '{}'", e.full_name)),
        Screen::Vaccines => app
            .vaccines
            .selected_row()
            .map(|v| format!("vaccine '{}'", v.name)),
    };
    let Some(subject) = subject else { return };

    let popup = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, popup);

    let text = Paragraph::new(vec![
        Line::from(format!("Delete {subject}?")),
        Line::from(""),
        Line::from(Span::styled(
            "y confirm / n cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(" Confirm delete ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(text, popup);
}

fn draw_detail(frame: &mut Frame, app: &App) {
    let Some(employee) = app.employees.selected_row() else {
        return;
    };

    let dose =
        |value: Option<NaiveDate>| value.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
    let vaccine_line = match &employee.vaccine {
        Some(vaccine) => format!(
            "{} (batch {}, expires {})",
            vaccine.name, vaccine.batch, vaccine.expiration_date
        ),
        None => "-".to_string(),
    };

    let lines = vec![
        detail_line("CPF", mask_cpf(&employee.cpf)),
        detail_line("Full name", employee.full_name.clone()),
        detail_line("Birth date", employee.birth_date.to_string()),
        detail_line("First dose", dose(employee.date_first_dose)),
        detail_line("Second dose", dose(employee.date_second_dose)),
        detail_line("Third dose", dose(employee.date_third_dose)),
        detail_line(
            "Comorbidity",
            if employee.comorbidity_carrier { "yes" } else { "no" }.to_string(),
        ),
        detail_line("Vaccine", vaccine_line),
        Line::from(""),
        Line::from(Span::styled("Esc close", Style::default().fg(Color::DarkGray))),
    ];

    let popup = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title(format!(" Employee {} ", employee.id))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        popup,
    );
}

fn detail_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<14}", format!("{label}:")),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(value),
    ])
}

fn draw_error(frame: &mut Frame, message: &str) {
    let popup = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, popup);

    let text = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("Esc close", Style::default().fg(Color::DarkGray))),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(" Error ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(text, popup);
}
