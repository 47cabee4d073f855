use cfbd_api::Possession;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::{Block, BorderType, Borders, Widget};

use crate::enrich::LiveGameRow;
use crate::ui::format::{format_clock, format_points, team_color};

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Rows per card: border, away line, home line, status line, border.
pub const CARD_HEIGHT: u16 = 5;

/// Minimum columns for a readable card; narrower areas skip the card row.
pub const CARD_MIN_WIDTH: u16 = 26;

/// Maximum card width in wider terminals.
pub const CARD_MAX_WIDTH: u16 = 44;

/// Possession marker drawn next to the team with the ball.
const POSSESSION_MARKER: &str = "●";

/// A single in-progress game rendered as a bordered card: both team lines
/// with directory colors, then period, clock, and broadcast outlet.
pub struct LiveCard<'a> {
    pub row: &'a LiveGameRow,
}

impl LiveCard<'_> {
    fn team_line(
        &self,
        buf: &mut Buffer,
        area: Rect,
        y: u16,
        name: &str,
        points: Option<i32>,
        color: Option<&str>,
        has_ball: bool,
    ) {
        if y >= area.y + area.height {
            return;
        }
        let width = area.width as usize;
        let marker = if has_ball { POSSESSION_MARKER } else { " " };
        let points = format_points(points);
        let name_width = width.saturating_sub(points.len() + 4);
        let name: String = name.chars().take(name_width).collect();

        let style = Style::default()
            .fg(team_color(color))
            .add_modifier(Modifier::BOLD);
        buf.set_string(area.x, y, format!("{marker} {name}"), style);
        buf.set_string(
            area.x + area.width.saturating_sub(points.len() as u16 + 1),
            y,
            points,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        );
    }
}

impl Widget for LiveCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < CARD_MIN_WIDTH || area.height < CARD_HEIGHT {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let game = &self.row.game;
        self.team_line(
            buf,
            inner,
            inner.y,
            &game.away.name,
            game.away.points,
            self.row.away_color.as_deref(),
            game.possession == Some(Possession::Away),
        );
        self.team_line(
            buf,
            inner,
            inner.y + 1,
            &game.home.name,
            game.home.points,
            self.row.home_color.as_deref(),
            game.possession == Some(Possession::Home),
        );

        let mut status = format!(
            "Q{} {}",
            game.period.unwrap_or(1),
            format_clock(game.clock.as_deref())
        );
        if let Some(tv) = game.tv.as_deref() {
            status.push_str("  ");
            status.push_str(tv);
        }
        if let Some(spread) = game.spread {
            status.push_str(&format!("  {spread:+}"));
        }
        if let Some(situation) = game.situation.as_deref() {
            status.push_str("  ");
            status.push_str(situation);
        }
        let clipped: String = status.chars().take(inner.width as usize).collect();
        buf.set_string(
            inner.x,
            inner.y + 2,
            clipped,
            Style::default().fg(Color::DarkGray),
        );
    }
}
