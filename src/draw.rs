use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Tabs};
use tui::{Frame, Terminal};

use crate::app::{App, MenuItem};
use crate::components::live_card::{CARD_HEIGHT, CARD_MAX_WIDTH, CARD_MIN_WIDTH, LiveCard};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::format::{format_clock, format_height, format_points, team_color};
use crate::ui::layout::LayoutAreas;

static TABS: &[&str; 6] = &[
    "Scoreboard",
    "Schedule",
    "Polls",
    "Standings",
    "Roster",
    "Recruits",
];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let _ = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Scoreboard => draw_scoreboard(f, layout.main, app),
            MenuItem::Schedule => draw_schedule(f, layout.main, app),
            MenuItem::Polls => draw_polls(f, layout.main, app),
            MenuItem::Standings => draw_standings(f, layout.main, app),
            MenuItem::Roster => draw_roster(f, layout.main, app),
            MenuItem::Recruits => draw_recruits(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if !app.settings.full_screen {
            draw_footer(f, layout.footer, app);
        }

        if app.state.show_logs {
            draw_logs(f, f.area());
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

fn header_style() -> Style {
    Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Scoreboard => 0,
        MenuItem::Schedule => 1,
        MenuItem::Polls => 2,
        MenuItem::Standings => 3,
        MenuItem::Roster => 4,
        MenuItem::Recruits => 5,
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

// ---------------------------------------------------------------------------
// Scoreboard — cards above a table, both showing in-progress games only;
// scheduled and final games belong to the schedule page
// ---------------------------------------------------------------------------

fn draw_scoreboard(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Scoreboard ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.state.scoreboard.rows.is_empty() {
        draw_empty_page(f, inner, app, "Loading scoreboard...");
        return;
    }

    let live = app.state.scoreboard.live_rows();
    if live.is_empty() {
        draw_empty_page(f, inner, app, "No games in progress");
        return;
    }

    let mut table_area = inner;
    if inner.height > CARD_HEIGHT + 4 && inner.width >= CARD_MIN_WIDTH {
        let [cards_area, rest] =
            Layout::vertical([Constraint::Length(CARD_HEIGHT), Constraint::Fill(1)]).areas(inner);
        table_area = rest;

        let card_width = (inner.width / (live.len() as u16).max(1))
            .clamp(CARD_MIN_WIDTH, CARD_MAX_WIDTH);
        let fitting = (inner.width / card_width).max(1) as usize;
        let mut x = cards_area.x;
        for row in live.iter().take(fitting) {
            let card_area = Rect::new(x, cards_area.y, card_width, CARD_HEIGHT);
            f.render_widget(LiveCard { row: *row }, card_area);
            x += card_width;
        }
    }

    let header = Row::new(["", "Away", "", "", "Home", "", "Status", "TV"]).style(header_style());
    let offset = app.state.scoreboard.scroll_offset as usize;
    let rows = live.iter().skip(offset).map(|row| {
        let game = &row.game;
        let status = format!(
            "Q{} {}",
            game.period.unwrap_or(1),
            format_clock(game.clock.as_deref())
        );
        Row::new([
            Cell::from("●").style(Style::default().fg(team_color(row.away_color.as_deref()))),
            Cell::from(game.away.name.clone()),
            Cell::from(format_points(game.away.points)),
            Cell::from("●").style(Style::default().fg(team_color(row.home_color.as_deref()))),
            Cell::from(game.home.name.clone()),
            Cell::from(format_points(game.home.points)),
            Cell::from(status),
            Cell::from(game.tv.clone().unwrap_or_default()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Fill(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Fill(3),
            Constraint::Length(3),
            Constraint::Length(9),
            Constraint::Fill(2),
        ],
    )
    .header(header)
    .column_spacing(1);
    f.render_widget(table, table_area);
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

fn draw_schedule(f: &mut Frame, area: Rect, app: &App) {
    let session = &app.state.session;
    let block = default_border(Color::White).title(format!(
        " Schedule | {} wk {} ",
        session.year, session.week
    ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.state.schedule.rows.is_empty() {
        draw_empty_page(f, inner, app, "Loading schedule...");
        return;
    }

    let header = Row::new(["Kickoff", "Away", "", "Home", "", "Spread", "TV"]).style(header_style());
    let offset = app.state.schedule.scroll_offset as usize;
    let rows = app.state.schedule.rows.iter().skip(offset).map(|row| {
        let kickoff = row
            .kickoff
            .map(|k| {
                k.with_timezone(&chrono::Local)
                    .format("%a %b-%d %I:%M %p")
                    .to_string()
            })
            .unwrap_or_else(|| "TBD".to_string());
        Row::new([
            Cell::from(kickoff),
            Cell::from(row.game.away_team.clone())
                .style(Style::default().fg(team_color(row.away_color.as_deref()))),
            Cell::from(format_points(row.game.away_points)),
            Cell::from(row.game.home_team.clone())
                .style(Style::default().fg(team_color(row.home_color.as_deref()))),
            Cell::from(format_points(row.game.home_points)),
            Cell::from(row.spread.clone().unwrap_or_default()),
            Cell::from(row.outlets.clone().unwrap_or_default()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Fill(3),
            Constraint::Length(3),
            Constraint::Fill(3),
            Constraint::Length(3),
            Constraint::Fill(3),
            Constraint::Fill(2),
        ],
    )
    .header(header)
    .column_spacing(1);
    f.render_widget(table, inner);
}

// ---------------------------------------------------------------------------
// Polls — AP first, Coaches second, side by side when the frame allows
// ---------------------------------------------------------------------------

fn draw_polls(f: &mut Frame, area: Rect, app: &App) {
    let session = &app.state.session;
    let block = default_border(Color::White).title(format!(
        " Polls | {} wk {} ",
        session.year, session.week
    ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let polls = &app.state.polls.polls;
    if polls.is_empty() {
        draw_empty_page(f, inner, app, "Loading polls...");
        return;
    }

    let panes: Vec<Rect> = if polls.len() >= 2 && inner.width >= 100 {
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(inner);
        vec![left, right]
    } else {
        vec![inner]
    };

    for (poll, pane) in polls.iter().zip(panes) {
        let pane_block = default_border(Color::DarkGray).title(format!(" {} ", poll.name));
        let pane_inner = pane_block.inner(pane);
        f.render_widget(pane_block, pane);

        let header = Row::new(["#", "School", "Mascot", "Conf", "Rec", "1st", "Pts"])
            .style(header_style());
        let offset = app.state.polls.scroll_offset as usize;
        let rows = poll.rows.iter().skip(offset).map(|row| {
            let first = if row.first_place_votes > 0 {
                row.first_place_votes.to_string()
            } else {
                String::new()
            };
            Row::new([
                Cell::from(row.rank.to_string()),
                Cell::from(row.school.clone())
                    .style(Style::default().fg(team_color(row.color.as_deref()))),
                Cell::from(row.mascot.clone().unwrap_or_default()),
                Cell::from(row.conference.clone()),
                Cell::from(row.record.clone()),
                Cell::from(first),
                Cell::from(row.points.to_string()),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Fill(3),
                Constraint::Fill(2),
                Constraint::Fill(2),
                Constraint::Length(6),
                Constraint::Length(4),
                Constraint::Length(5),
            ],
        )
        .header(header)
        .column_spacing(1);
        f.render_widget(table, pane_inner);
    }
}

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

fn draw_standings(f: &mut Frame, area: Rect, app: &App) {
    let session = &app.state.session;
    let conference = session.conference.as_deref().unwrap_or("All");
    let block = default_border(Color::White).title(format!(
        " Standings | {} {} ",
        session.year, conference
    ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.state.standings.rows.is_empty() {
        draw_empty_page(f, inner, app, "Loading standings...");
        return;
    }

    let header = Row::new(["Team", "Conf W-L", "Overall", "Home", "Away", "xW"])
        .style(header_style());
    let offset = app.state.standings.scroll_offset as usize;
    let rows = app.state.standings.rows.iter().skip(offset).map(|row| {
        let r = &row.record;
        let split = |s: &cfbd_api::RecordSplit| format!("{}-{}", s.wins, s.losses);
        let expected = r
            .expected_wins
            .map(|w| format!("{w:.1}"))
            .unwrap_or_default();
        Row::new([
            Cell::from(r.team.clone())
                .style(Style::default().fg(team_color(row.color.as_deref()))),
            Cell::from(split(&r.conference_games)),
            Cell::from(split(&r.total)),
            Cell::from(split(&r.home_games)),
            Cell::from(split(&r.away_games)),
            Cell::from(expected),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Fill(3),
            Constraint::Length(9),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(5),
        ],
    )
    .header(header)
    .column_spacing(1);
    f.render_widget(table, inner);
}

// ---------------------------------------------------------------------------
// Roster — players plus that season's NFL draft picks from the program
// ---------------------------------------------------------------------------

fn draw_roster(f: &mut Frame, area: Rect, app: &App) {
    let session = &app.state.session;
    let block = default_border(Color::White).title(format!(
        " Roster | {} {} ",
        session.team, session.year
    ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.state.roster.players.is_empty() {
        draw_empty_page(f, inner, app, "Loading roster...");
        return;
    }

    let mut players_area = inner;
    if !app.state.roster.picks.is_empty() && inner.height >= 12 {
        let picks_height = (app.state.roster.picks.len() as u16 + 3).min(8);
        let [top, bottom] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(picks_height)]).areas(inner);
        players_area = top;
        draw_draft_picks(f, bottom, app);
    }

    let header = Row::new(["#", "Name", "Pos", "Ht", "Wt", "Yr", "Hometown"]).style(header_style());
    let offset = app.state.roster.scroll_offset as usize;
    let rows = app.state.roster.players.iter().skip(offset).map(|p| {
        let jersey = p.jersey.filter(|j| *j >= 0).map(|j| j.to_string()).unwrap_or_default();
        let hometown = match (p.home_city.as_deref(), p.home_state.as_deref()) {
            (Some(city), Some(state)) => format!("{city}, {state}"),
            (Some(city), None) => city.to_string(),
            (None, Some(state)) => state.to_string(),
            (None, None) => String::new(),
        };
        Row::new([
            Cell::from(jersey),
            Cell::from(format!("{} {}", p.first_name, p.last_name)),
            Cell::from(p.position.clone().unwrap_or_default()),
            Cell::from(format_height(p.height)),
            Cell::from(p.weight.map(|w| w.to_string()).unwrap_or_default()),
            Cell::from(p.year.map(|y| y.to_string()).unwrap_or_default()),
            Cell::from(hometown),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Fill(3),
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Fill(3),
        ],
    )
    .header(header)
    .column_spacing(1);
    f.render_widget(table, players_area);
}

fn draw_draft_picks(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" NFL Draft Picks ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let header = Row::new(["Rd", "Pick", "Ovr", "Player", "Pos", "NFL Team"]).style(header_style());
    let rows = app.state.roster.picks.iter().map(|pick| {
        let num = |n: Option<u32>| n.map(|v| v.to_string()).unwrap_or_default();
        Row::new([
            Cell::from(num(pick.round)),
            Cell::from(num(pick.pick)),
            Cell::from(num(pick.overall)),
            Cell::from(pick.name.clone()),
            Cell::from(pick.position.clone()),
            Cell::from(pick.nfl_team.clone()),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Fill(3),
            Constraint::Length(4),
            Constraint::Fill(2),
        ],
    )
    .header(header)
    .column_spacing(1);
    f.render_widget(table, inner);
}

// ---------------------------------------------------------------------------
// Recruits
// ---------------------------------------------------------------------------

fn draw_recruits(f: &mut Frame, area: Rect, app: &App) {
    let session = &app.state.session;
    let class_rank = app
        .state
        .recruits
        .class_rank
        .as_ref()
        .and_then(|c| c.rank)
        .map(|r| format!(" | class #{r}"))
        .unwrap_or_default();
    let block = default_border(Color::White).title(format!(
        " Recruits | {} {}{} ",
        session.team, session.year, class_rank
    ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.state.recruits.recruits.is_empty() {
        draw_empty_page(f, inner, app, "Loading recruiting class...");
        return;
    }

    let header = Row::new(["Rk", "Stars", "Rating", "Name", "Pos", "High School", "Hometown"])
        .style(header_style());
    let offset = app.state.recruits.scroll_offset as usize;
    let rows = app.state.recruits.recruits.iter().skip(offset).map(|r| {
        let stars = r
            .stars
            .map(|s| "★".repeat(s as usize))
            .unwrap_or_default();
        let rating = r.rating.map(|v| format!("{v:.4}")).unwrap_or_default();
        let hometown = match (r.city.as_deref(), r.state_province.as_deref()) {
            (Some(city), Some(state)) => format!("{city}, {state}"),
            (Some(city), None) => city.to_string(),
            (None, Some(state)) => state.to_string(),
            (None, None) => String::new(),
        };
        Row::new([
            Cell::from(r.ranking.map(|v| v.to_string()).unwrap_or_default()),
            Cell::from(stars).style(Style::default().fg(Color::Yellow)),
            Cell::from(rating),
            Cell::from(r.name.clone()),
            Cell::from(r.position.clone().unwrap_or_default()),
            Cell::from(r.school.clone().unwrap_or_default()),
            Cell::from(hometown),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Fill(3),
            Constraint::Length(4),
            Constraint::Fill(2),
            Constraint::Fill(2),
        ],
    )
    .header(header)
    .column_spacing(1);
    f.render_widget(table, inner);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = "\
1-6      switch tabs (Scoreboard, Schedule, Polls, Standings, Roster, Recruits)
j/k      scroll
t/T      next/previous team
y/Y      next/previous season
w/W      next/previous week
c/C      next/previous conference
r        reload the active page
R        rebuild team_info.json from the remote team feed
f        toggle full screen
\"        toggle log overlay
?        this help, Esc to return
q        quit";
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Gray)),
        inner,
    );
}

fn draw_empty_page(f: &mut Frame, area: Rect, app: &App, loading_msg: &str) {
    let msg = app
        .state
        .last_error
        .as_deref()
        .map(|err| format!("Load failed:\n{err}"))
        .unwrap_or_else(|| loading_msg.to_string());
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }
    let mut spans = vec![Span::styled(
        format!(
            " {} | {} wk {} ",
            app.state.session.team, app.state.session.year, app.state.session.week
        ),
        Style::default().fg(Color::Gray),
    )];
    if let Some(updated) = app.state.scoreboard.last_updated.as_deref() {
        spans.push(Span::styled(
            format!("| updated {updated} "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(err) = app.state.last_error.as_deref() {
        spans.push(Span::styled(
            format!("| {err}"),
            Style::default().fg(Color::Red),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let height = (area.height / 3).max(8).min(area.height);
    let overlay = Rect::new(
        area.x,
        area.y + area.height.saturating_sub(height),
        area.width,
        height,
    );
    let widget = tui_logger::TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(widget, overlay);
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
