use tui::layout::{Constraint, Layout, Rect, Size};

pub const TAB_BAR_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 1;

/// Pre-computed layout areas for the main draw loop: tab bar on top, a
/// one-line status footer on the bottom, content in between. Full screen
/// collapses the chrome and gives the whole frame to the content.
pub struct LayoutAreas {
    pub tab_bar: [Rect; 2],
    pub main: Rect,
    pub footer: Rect,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false)
    }

    pub fn update(&mut self, area: Rect, full_screen: bool) {
        *self = Self::from_rect(area, full_screen);
    }

    fn from_rect(area: Rect, full_screen: bool) -> Self {
        if full_screen {
            let [main] = Layout::vertical([Constraint::Fill(1)]).areas(area);
            return LayoutAreas {
                tab_bar: [Rect::ZERO, Rect::ZERO],
                main,
                footer: Rect::ZERO,
            };
        }

        let [tab, main, footer] = Layout::vertical([
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .areas(area);

        LayoutAreas {
            tab_bar: Self::split_tab_bar(tab),
            main,
            footer,
        }
    }

    fn split_tab_bar(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(85), Constraint::Percentage(15)]).areas(area)
    }
}
