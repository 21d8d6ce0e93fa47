use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::match_card::MatchCardWidget;
use crate::state::app_state::QueryField;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::presentation::{DashboardView, RANKING_HEADERS, RankingRow};
use crate::ui::layout::LayoutAreas;

static TABS: &[&str; 2] = &["Dashboard", "Rankings"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);
    let view = app.dashboard_view();

    let _ = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
            draw_query_bar(f, layout.query_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Dashboard => draw_dashboard(f, layout.main, app, &view),
            MenuItem::Rankings => draw_rankings_tab(f, layout.main, app, &view),
            MenuItem::Help => draw_placeholder(
                f,
                layout.main,
                "Help: q=quit  1=Dashboard  2=Rankings  e=edit query  r=refresh  j/k=scroll  f=full screen  \"=logs",
            ),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        if app.state.editor.active {
            draw_query_editor(f, f.area(), app);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Dashboard => 0,
        MenuItem::Rankings => 1,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_query_bar(f: &mut Frame, area: Rect, app: &App) {
    let q = &app.state.query;
    let dim = Style::default().fg(Color::DarkGray);
    let value = |v: &str| {
        if v.trim().is_empty() {
            Span::styled("-", dim)
        } else {
            Span::styled(v.trim().to_string(), Style::default().add_modifier(Modifier::BOLD))
        }
    };

    let mut spans = vec![
        Span::styled(" Season ", dim),
        value(&q.season),
        Span::styled("  Event ", dim),
        value(&q.event_code),
        Span::styled("  Team ", dim),
        value(&q.team_number),
    ];
    if let Some(updated) = app.state.matches.updated_at.or(app.state.rankings.updated_at) {
        spans.push(Span::styled(format!("  updated {}", updated.format("%H:%M:%S")), dim));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ---------------------------------------------------------------------------
// Dashboard tab
// ---------------------------------------------------------------------------

fn draw_dashboard(f: &mut Frame, area: Rect, app: &App, view: &DashboardView) {
    if !view.query.is_complete() {
        draw_placeholder(f, area, "Enter season, event code and team number (press e) to load the event.");
        return;
    }

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(area);
    draw_rankings_panel(f, left, &view.rankings, view.rankings_error.as_deref(), 0);

    let [highlights, recent, stats] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(6),
    ])
    .areas(right);

    draw_highlights(f, highlights, view);
    draw_recent_matches(f, recent, app, view);
    draw_stats(f, stats, view);
}

fn draw_highlights(f: &mut Frame, area: Rect, view: &DashboardView) {
    let [current_area, next_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    let (current, next_title, next) = match &view.highlights {
        Some(h) => (h.current.clone(), h.next_title.clone(), h.next.clone()),
        None => {
            let msg = if view.matches_error.is_some() {
                "Unavailable".to_string()
            } else if view.matches_loaded {
                "No matches".to_string()
            } else {
                "Loading...".to_string()
            };
            let title = format!("Next Match (Team {})", view.query.team_number.trim());
            (msg.clone(), title, msg)
        }
    };

    draw_highlight_box(f, current_area, "Current Match", &current);
    draw_highlight_box(f, next_area, &next_title, &next);
}

fn draw_highlight_box(f: &mut Frame, area: Rect, title: &str, body: &str) {
    let block = default_border(Color::Gray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    let lines = vec![
        Line::from(Span::styled(format!("{title}:"), Style::default().fg(Color::Gray))),
        Line::from(Span::styled(body.to_string(), Style::default().add_modifier(Modifier::BOLD))),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn draw_recent_matches(f: &mut Frame, area: Rect, app: &App, view: &DashboardView) {
    let block = default_border(Color::White).title(" Upcoming Matches ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if let Some(err) = view.matches_error.as_deref() {
        draw_error(f, inner, err);
        return;
    }
    if !view.matches_loaded {
        draw_placeholder(f, inner, "Loading match data...");
        return;
    }
    if view.recent.is_empty() {
        draw_placeholder(f, inner, "No matches");
        return;
    }

    let shown = (inner.height as usize).min(app.settings.max_matches).min(view.recent.len());
    let rows = Layout::vertical(vec![Constraint::Length(1); shown]).split(inner);
    // Keep the newest rows when the panel is shorter than the window.
    let skip = view.recent.len() - shown;
    for (card, row) in view.recent.iter().skip(skip).zip(rows.iter()) {
        f.render_widget(MatchCardWidget { card }, *row);
    }
}

fn draw_stats(f: &mut Frame, area: Rect, view: &DashboardView) {
    let block = default_border(Color::White).title(format!(" {} ", view.stats.title));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled("Record", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            view.stats.record_label(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("Wins - Losses - Ties", Style::default().fg(Color::DarkGray))),
    ];
    if let Some((rank, of)) = view.stats.rank {
        lines.push(Line::from(Span::styled(
            format!("Rank {rank} of {of}"),
            Style::default().fg(Color::Gray),
        )));
    }
    if let Some(summary) = &view.stats.summary {
        lines.push(Line::from(Span::styled(summary.clone(), Style::default().fg(Color::DarkGray))));
    }
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

fn draw_rankings_tab(f: &mut Frame, area: Rect, app: &App, view: &DashboardView) {
    draw_rankings_panel(
        f,
        area,
        &view.rankings,
        view.rankings_error.as_deref(),
        app.state.rankings_scroll,
    );
}

fn draw_rankings_panel(f: &mut Frame, area: Rect, rows: &[RankingRow], error: Option<&str>, scroll: usize) {
    let block = default_border(Color::White).title(" Rankings ");

    if let Some(err) = error {
        let inner = block.inner(area);
        f.render_widget(block, area);
        draw_error(f, inner, err);
        return;
    }

    let header = Row::new(RANKING_HEADERS.iter().map(|h| Cell::from(*h)))
        .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));

    let body: Vec<Row> = rows
        .iter()
        .skip(scroll)
        .map(|r| Row::new(r.cells().into_iter().map(Cell::from)))
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(11),
        Constraint::Fill(1),
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(7),
    ];

    let table = Table::new(body, widths).header(header).block(block).column_spacing(1);
    f.render_widget(table, area);
}

// ---------------------------------------------------------------------------
// Overlays and helpers
// ---------------------------------------------------------------------------

fn draw_query_editor(f: &mut Frame, area: Rect, app: &App) {
    let width = area.width.min(48);
    let height = 7;
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height.min(area.height),
    );

    let block = default_border(Color::Yellow).title(" Event Query (Tab=next  Enter=load  Esc=cancel) ");
    let inner = block.inner(popup);
    f.render_widget(Clear, popup);
    f.render_widget(block, popup);

    let editor = &app.state.editor;
    let lines: Vec<Line> = [QueryField::Season, QueryField::Event, QueryField::Team]
        .into_iter()
        .map(|field| {
            let focused = field == editor.field;
            let marker = if focused { ">" } else { " " };
            let cursor = if focused { "_" } else { "" };
            let style = if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{marker} {:<12} ", field.label()), style),
                Span::styled(format!("{}{cursor}", editor.value(field)), style.add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray))
        .style_debug(Style::default().fg(Color::DarkGray));
    f.render_widget(widget, area);
}

fn draw_error(f: &mut Frame, area: Rect, msg: &str) {
    f.render_widget(
        Paragraph::new(msg.to_string()).style(Style::default().fg(Color::Red)),
        area,
    );
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    f.render_widget(
        Paragraph::new(msg.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
