use tui::style::Color;

/// Game clock for display. The scoreboard feed sends either "HH:MM:SS" or
/// "MM:SS" depending on endpoint version; both normalize to "MM:SS".
/// Anything unrecognized renders as "00:00" rather than breaking the card.
pub fn format_clock(clock: Option<&str>) -> String {
    let Some(clock) = clock else {
        return "00:00".to_string();
    };
    let parts: Vec<&str> = clock.split(':').collect();
    let valid = |p: &&str| !p.is_empty() && p.len() <= 2 && p.chars().all(|c| c.is_ascii_digit());
    match parts.as_slice() {
        [_, m, s] if valid(m) && valid(s) => format!("{m}:{s}"),
        [m, s] if valid(m) && valid(s) => format!("{m}:{s}"),
        _ => "00:00".to_string(),
    }
}

/// Points column: blank until the game has a score posted.
pub fn format_points(points: Option<i32>) -> String {
    points.map(|p| p.to_string()).unwrap_or_default()
}

/// Roster heights arrive as total inches.
pub fn format_height(inches: Option<i32>) -> String {
    match inches {
        Some(h) if h > 0 => format!("{}'{}\"", h / 12, h % 12),
        _ => String::new(),
    }
}

/// Parse a "#rrggbb" team color. Unknown or malformed values fall back to
/// white, the same default the directory uses for teams without a color.
pub fn team_color(hex: Option<&str>) -> Color {
    let Some(hex) = hex else {
        return Color::White;
    };
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return Color::White;
    }
    match (
        u8::from_str_radix(&hex[0..2], 16),
        u8::from_str_radix(&hex[2..4], 16),
        u8::from_str_radix(&hex[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
        _ => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_drops_the_hour_component() {
        assert_eq!(format_clock(Some("01:23:45")), "23:45");
        assert_eq!(format_clock(Some("00:07:42")), "07:42");
    }

    #[test]
    fn clock_passes_minute_second_through() {
        assert_eq!(format_clock(Some("12:34")), "12:34");
        assert_eq!(format_clock(Some("0:59")), "0:59");
    }

    #[test]
    fn clock_defaults_on_missing_or_garbage() {
        assert_eq!(format_clock(None), "00:00");
        assert_eq!(format_clock(Some("")), "00:00");
        assert_eq!(format_clock(Some("halftime")), "00:00");
        assert_eq!(format_clock(Some("1:2:3:4")), "00:00");
    }

    #[test]
    fn points_blank_until_posted() {
        assert_eq!(format_points(None), "");
        assert_eq!(format_points(Some(0)), "0");
        assert_eq!(format_points(Some(35)), "35");
    }

    #[test]
    fn heights_render_feet_and_inches() {
        assert_eq!(format_height(Some(74)), "6'2\"");
        assert_eq!(format_height(Some(72)), "6'0\"");
        assert_eq!(format_height(None), "");
        assert_eq!(format_height(Some(0)), "");
    }

    #[test]
    fn team_colors_parse_hex_with_white_fallback() {
        assert_eq!(team_color(Some("#003057")), Color::Rgb(0, 48, 87));
        assert_eq!(team_color(Some("003057")), Color::Rgb(0, 48, 87));
        assert_eq!(team_color(Some("#xyzxyz")), Color::White);
        assert_eq!(team_color(Some("#fff")), Color::White);
        assert_eq!(team_color(None), Color::White);
    }
}
