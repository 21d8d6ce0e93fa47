//! One-shot HTML rendering of the dashboard (`ftcdash --html`).

use crate::state::app_settings::AppSettings;
use crate::state::app_state::{EventQuery, Section};
use crate::state::presentation::{
    AllianceView, DashboardInput, DashboardView, MatchCard, RANKING_HEADERS, build_dashboard, fault_message,
};
use ftc_events_api::client::FtcEventsApi;
use log::warn;
use std::fmt::Write;

const RED: &str = "#FF0000";
const BLUE: &str = "#0096FF";

const PANEL_STYLE: &str = "border: 2px solid #ddd; padding: 20px; border-radius: 8px; font-size: 24px; \
    font-weight: bold; display: flex; flex-direction: column; justify-content: center; \
    align-items: center; text-align: center;";

const CARD_STYLE: &str = "border: 2px solid #ddd; padding: 6px 12px; margin: 5px 0; border-radius: 8px; \
    display: flex; justify-content: space-between; align-items: center; font-size: 16px;";

/// Fetch both sections once and render the page. Faults become inline
/// messages; the other section still renders.
pub async fn fetch_and_render(settings: &AppSettings, query: &EventQuery) -> String {
    let api = FtcEventsApi::new(settings.api.clone());

    let (rankings, rankings_error) = match api.fetch_rankings(&query.season, &query.event_code).await {
        Ok(r) => (Some(r), None),
        Err(e) => {
            warn!("rankings fetch failed: {e}");
            (None, Some(fault_message(Section::Rankings, &e)))
        }
    };
    let (matches, matches_error) = match api
        .fetch_matches(&query.season, &query.event_code, &query.team_number)
        .await
    {
        Ok(m) => (Some(m), None),
        Err(e) => {
            warn!("match fetch failed: {e}");
            (None, Some(fault_message(Section::Matches, &e)))
        }
    };

    let view = build_dashboard(DashboardInput {
        query,
        rankings: rankings.as_deref(),
        rankings_error: rankings_error.as_deref(),
        matches: matches.as_deref(),
        matches_error: matches_error.as_deref(),
        max_matches: settings.max_matches,
    });
    render_page(&view)
}

pub fn render_page(view: &DashboardView) -> String {
    let mut out = String::new();
    let q = &view.query;
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">");
    let _ = writeln!(
        out,
        "<title>{} {} - Team {}</title>",
        escape(&q.season),
        escape(&q.event_code),
        escape(&q.team_number)
    );
    let _ = writeln!(
        out,
        "<style>body {{ font-family: sans-serif; margin: 24px; }} \
         .cols {{ display: flex; gap: 24px; }} .error {{ color: #b00020; }} \
         table {{ border-collapse: collapse; }} td, th {{ padding: 4px 8px; text-align: left; }}</style>"
    );
    let _ = writeln!(out, "</head>\n<body>");
    let _ = writeln!(out, "<div class=\"cols\">");

    render_rankings(&mut out, view);

    let _ = writeln!(out, "<section style=\"flex: 3;\">");
    render_highlights(&mut out, view);
    render_recent(&mut out, view);
    let _ = writeln!(out, "</section>");
    let _ = writeln!(out, "</div>");

    render_stats(&mut out, view);
    let _ = writeln!(out, "</body>\n</html>");
    out
}

fn render_rankings(out: &mut String, view: &DashboardView) {
    let _ = writeln!(out, "<section style=\"flex: 2;\">\n<h2>Rankings</h2>");
    if let Some(err) = &view.rankings_error {
        let _ = writeln!(out, "<p class=\"error\">{}</p>", escape(err));
    } else if view.rankings.is_empty() {
        let _ = writeln!(out, "<p>No ranking data available.</p>");
    } else {
        let _ = writeln!(out, "<table>\n<thead><tr>");
        for h in RANKING_HEADERS {
            let _ = write!(out, "<th>{h}</th>");
        }
        let _ = writeln!(out, "</tr></thead>\n<tbody>");
        for row in &view.rankings {
            let _ = write!(out, "<tr>");
            for cell in row.cells() {
                let _ = write!(out, "<td>{}</td>", escape(&cell));
            }
            let _ = writeln!(out, "</tr>");
        }
        let _ = writeln!(out, "</tbody>\n</table>");
    }
    let _ = writeln!(out, "</section>");
}

fn render_highlights(out: &mut String, view: &DashboardView) {
    if let Some(err) = &view.matches_error {
        let _ = writeln!(out, "<p class=\"error\">{}</p>", escape(err));
        return;
    }
    let Some(h) = &view.highlights else {
        return;
    };
    let _ = writeln!(out, "<div class=\"cols\">");
    let _ = writeln!(
        out,
        "<div style=\"flex: 1; {PANEL_STYLE}\">Current Match:<br>{}</div>",
        escape(&h.current)
    );
    let _ = writeln!(
        out,
        "<div style=\"flex: 1; {PANEL_STYLE}\">{}:<br>{}</div>",
        escape(&h.next_title),
        escape(&h.next)
    );
    let _ = writeln!(out, "</div>");
}

fn render_recent(out: &mut String, view: &DashboardView) {
    if view.matches_error.is_some() || !view.matches_loaded {
        return;
    }
    let _ = writeln!(out, "<h2>Upcoming Matches</h2>");
    if view.recent.is_empty() {
        let _ = writeln!(out, "<p>No matches</p>");
        return;
    }
    for card in &view.recent {
        render_card(out, card);
    }
}

fn render_card(out: &mut String, card: &MatchCard) {
    let muted = if card.completed { "" } else { " opacity: 0.6;" };
    let _ = writeln!(
        out,
        "<div style=\"{CARD_STYLE}{muted}\"><b>{}:</b> \
         <span style=\"color: {RED};\"><b>🔴 {}</b></span> {} <b>-</b> {} \
         <span style=\"color: {BLUE};\"><b>🔵 {}</b></span></div>",
        escape(&card.description),
        escape(&card.red.teams_label()),
        score_html(&card.red, RED),
        score_html(&card.blue, BLUE),
        escape(&card.blue.teams_label()),
    );
}

fn score_html(alliance: &AllianceView, color: &str) -> String {
    let weight = if alliance.emphasized { "bold" } else { "normal" };
    format!(
        "<span style=\"color: {color}; font-weight: {weight}; font-size: 18px;\">{}</span>",
        escape(&alliance.score_label())
    )
}

fn render_stats(out: &mut String, view: &DashboardView) {
    let stats = &view.stats;
    let _ = writeln!(out, "<h2>{}</h2>", escape(&stats.title));
    let _ = writeln!(out, "<div style=\"text-align: center;\">");
    let _ = writeln!(out, "<h3>Record</h3>");
    let _ = writeln!(out, "<h2>{}</h2>", stats.record_label());
    let _ = writeln!(out, "<p>Wins - Losses - Ties</p>");
    if let Some((rank, of)) = stats.rank {
        let _ = writeln!(out, "<p>Rank {rank} of {of}</p>");
    }
    if let Some(summary) = &stats.summary {
        let _ = writeln!(out, "<p>{}</p>", escape(summary));
    }
    let _ = writeln!(out, "</div>");
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
