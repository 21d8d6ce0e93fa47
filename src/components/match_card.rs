use crate::state::presentation::{AllianceView, MatchCard};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::Widget;

pub const RED: Color = Color::Rgb(0xFF, 0x00, 0x00);
pub const BLUE: Color = Color::Rgb(0x00, 0x96, 0xFF);

/// One-line match summary:
///
/// ```text
///  Qualification 7:  ● 1, 2   30 - 20   3, 4 ●   11:42
/// ```
///
/// The winning score is bold; ties and unplayed matches are not.
/// Upcoming matches have a muted description.
pub struct MatchCardWidget<'a> {
    pub card: &'a MatchCard,
}

impl<'a> MatchCardWidget<'a> {
    pub fn line(&self) -> Line<'static> {
        let card = self.card;
        let description = if card.completed {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut spans = vec![
            Span::styled(format!("{}:", card.description), description),
            Span::raw("  "),
            Span::styled(
                format!("● {}", card.red.teams_label()),
                Style::default().fg(RED).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            score_span(&card.red, RED),
            Span::styled(" - ", Style::default().add_modifier(Modifier::BOLD)),
            score_span(&card.blue, BLUE),
            Span::raw("   "),
            Span::styled(
                format!("{} ●", card.blue.teams_label()),
                Style::default().fg(BLUE).add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(posted) = &card.posted {
            spans.push(Span::styled(format!("   {posted}"), Style::default().fg(Color::DarkGray)));
        }
        Line::from(spans)
    }
}

fn score_span(alliance: &AllianceView, color: Color) -> Span<'static> {
    let mut style = Style::default().fg(color);
    if alliance.emphasized {
        style = style.add_modifier(Modifier::BOLD);
    }
    Span::styled(alliance.score_label(), style)
}

impl<'a> Widget for MatchCardWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.line().render(area, buf);
    }
}
