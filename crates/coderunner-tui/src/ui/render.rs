//! Main render function for the TUI.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

use coderunner_core::{present, ColorKind, IconKind, Labels};

use crate::state::{Focus, UiState};

/// Render the entire UI.
pub fn render(frame: &mut Frame, state: &UiState) {
    let area = frame.area();

    // Create main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let [list_area, main_area] =
        Layout::horizontal([Constraint::Percentage(28), Constraint::Fill(1)]).areas(body_area);

    let [detail_area, editor_area, result_area] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Length(6),
    ])
    .areas(main_area);

    render_header(frame, header_area, state);
    render_task_list(frame, list_area, state);
    render_detail(frame, detail_area, state);
    render_editor(frame, editor_area, state);
    render_result(frame, result_area, state);
    render_footer(frame, footer_area, state);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Render the header with service and language.
fn render_header(frame: &mut Frame, area: Rect, state: &UiState) {
    let line = Line::from(vec![
        Span::styled(
            state.base_url.as_str(),
            Style::default().fg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", state.language),
            Style::default().fg(Color::Yellow),
        ),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" CodeRunner ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    );

    frame.render_widget(header, area);
}

fn render_task_list(frame: &mut Frame, area: Rect, state: &UiState) {
    let labels = state.language.labels();
    let selected = state.view.selected_task.as_deref();

    let items: Vec<ListItem> = state
        .view
        .tasks
        .iter()
        .map(|task| {
            let marker = if Some(task.name.as_str()) == selected { "● " } else { "  " };
            ListItem::new(format!("{}{}", marker, task.name))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", labels.task_name))
                .border_style(focus_style(state.focus == Focus::Tasks)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut list_state = ListState::default();
    if !state.view.tasks.is_empty() {
        list_state.select(Some(state.cursor));
    }

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("{}:", text),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
}

fn render_detail(frame: &mut Frame, area: Rect, state: &UiState) {
    let labels = state.language.labels();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", labels.description))
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(detail) = &state.view.detail else {
        let hint = if state.view.selected_task.is_some() {
            "No description available."
        } else {
            "Select a task to see its description."
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let mut lines = vec![
        Line::from(detail.description.clone()),
        Line::from(""),
        heading(labels.input),
        Line::from(detail.input.clone()),
        heading(labels.output),
        Line::from(detail.output.clone()),
    ];

    if !detail.examples.is_empty() {
        lines.push(heading(labels.examples));
        for example in &detail.examples {
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", labels.input), Style::default().fg(Color::Cyan)),
                Span::raw(example.input.clone()),
                Span::raw("  "),
                Span::styled(format!("{}: ", labels.output), Style::default().fg(Color::Cyan)),
                Span::raw(example.output.clone()),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_editor(frame: &mut Frame, area: Rect, state: &UiState) {
    let labels = state.language.labels();
    let focused = state.focus == Focus::Editor;

    let run_style = if state.view.can_submit() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let run_label = if state.view.is_loading {
        labels.running
    } else {
        labels.run_code
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", labels.code_editor))
        .title(
            Line::from(Span::styled(format!(" [Ctrl-S] {} ", run_label), run_style))
                .right_aligned(),
        )
        .border_style(focus_style(focused));

    let inner = block.inner(area);
    let (row, col) = state.editor.cursor();

    // Scroll so the cursor row stays visible
    let height = usize::from(inner.height.max(1));
    let scroll = row.saturating_sub(height - 1);

    let current = state.editor.lines().get(row).map_or("", String::as_str);
    let (cursor_x, hscroll) = cursor_column(current, col, inner.width);

    let lines: Vec<Line> = state
        .editor
        .lines()
        .iter()
        .map(|l| Line::from(l.as_str()))
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), hscroll));
    frame.render_widget(paragraph, area);

    if focused {
        let x = inner.x.saturating_add(cursor_x);
        let y = inner
            .y
            .saturating_add(u16::try_from(row - scroll).unwrap_or(u16::MAX));
        if x < inner.right() && y < inner.bottom() {
            frame.set_cursor_position((x, y));
        }
    }
}

/// Display column of the cursor within `width` columns, and the horizontal
/// scroll needed to keep it there.
fn cursor_column(line: &str, col: usize, width: u16) -> (u16, u16) {
    let x: usize = line
        .chars()
        .take(col)
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(1))
        .sum();
    let hscroll = x.saturating_sub(usize::from(width.max(1)) - 1);
    (
        u16::try_from(x - hscroll).unwrap_or(u16::MAX),
        u16::try_from(hscroll).unwrap_or(u16::MAX),
    )
}

fn color_of(kind: ColorKind) -> Color {
    match kind {
        ColorKind::Success => Color::Green,
        ColorKind::Error => Color::Red,
        ColorKind::Warning => Color::Yellow,
        ColorKind::Neutral => Color::Gray,
    }
}

fn icon_of(kind: IconKind) -> &'static str {
    match kind {
        IconKind::Check => "✔",
        IconKind::Error => "✖",
        IconKind::Warning => "⚠",
        IconKind::Unknown => "•",
    }
}

fn render_result(frame: &mut Frame, area: Rect, state: &UiState) {
    let labels: &Labels = state.language.labels();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", labels.result))
        .border_style(Style::default().fg(Color::DarkGray));

    if state.view.is_loading {
        let paragraph = Paragraph::new(Span::styled(
            labels.running,
            Style::default().fg(Color::Yellow),
        ))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    if state.view.result.is_empty() {
        frame.render_widget(block, area);
        return;
    }

    let presentation = present(&state.view.result);
    let color = color_of(presentation.color);

    let headline = match &presentation.summary {
        Some(summary) => labels.summary(summary),
        None => state.view.result.clone(),
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [text_area, gauge_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{} ", icon_of(presentation.icon)),
            Style::default().fg(color),
        ),
        Span::styled(headline, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])];
    if presentation.summary.is_some() {
        lines.push(Line::from(Span::styled(
            state.view.result.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), text_area);

    if let Some(progress) = presentation.progress {
        let percent = u16::try_from(progress.min(100)).unwrap_or(100);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color).bg(Color::DarkGray))
            .percent(percent);
        frame.render_widget(gauge, gauge_area);
    }
}

/// Render the footer with status message.
fn render_footer(frame: &mut Frame, area: Rect, state: &UiState) {
    let status = state.status_message.as_deref().unwrap_or("Ready");

    let help = match state.focus {
        Focus::Tasks => " q: quit | j/k: move | Enter: select | Tab: edit | r: reload | l: language ",
        Focus::Editor => " Esc: task list | Ctrl-S/F5: run | Ctrl-C: quit ",
    };

    let status_color = if state.view.notice.is_some() {
        Color::Red
    } else {
        Color::Green
    };

    let footer = Line::from(vec![
        Span::styled(status, Style::default().fg(status_color)),
        Span::raw(" | "),
        Span::styled(help, Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(footer), area);
}
