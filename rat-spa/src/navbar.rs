//! Navigation bar: brand plus one link per route, active link highlighted.

use rat_nexus::RouteTable;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

pub const BRAND: &str = "Rat SPA";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
    pub active: bool,
}

/// Stateless: everything it draws derives from the route table and the
/// current path.
pub struct NavBar<'a, V> {
    table: &'a RouteTable<V>,
    current: &'a str,
}

impl<'a, V> NavBar<'a, V> {
    pub fn new(table: &'a RouteTable<V>, current: &'a str) -> Self {
        Self { table, current }
    }

    pub fn links(&self) -> Vec<NavLink> {
        self.table
            .links()
            .map(|entry| NavLink {
                href: entry.path.clone(),
                label: entry.label.clone(),
                active: self.table.is_active(&entry.path, self.current),
            })
            .collect()
    }
}

impl<V> Widget for NavBar<'_, V> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        let [brand_area, links_area] =
            Layout::horizontal([Constraint::Length(BRAND.len() as u16 + 2), Constraint::Min(0)])
                .areas(inner);

        Paragraph::new(Span::styled(
            format!(" {BRAND}"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .render(brand_area, buf);

        let mut spans = Vec::new();
        for link in self.links() {
            let span = if link.active {
                Span::styled(
                    format!("[{}]", link.label),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(format!(" {} ", link.label), Style::default().fg(Color::White))
            };
            spans.push(span);
            spans.push(Span::raw(" "));
        }
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Right)
            .render(links_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ViewId;
    use crate::testing::{buffer_text, draw};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn table() -> RouteTable<ViewId> {
        RouteTable::builder()
            .route("/", "Home", ViewId::Home)
            .route("/about", "About", ViewId::About)
            .fallback("/")
            .build()
            .unwrap()
    }

    #[test]
    fn hrefs_match_route_paths_for_any_table() {
        let tables = vec![
            table(),
            RouteTable::builder().route("/", "Home", ViewId::Home).build().unwrap(),
            RouteTable::builder()
                .route("/about", "About", ViewId::About)
                .route("/about/team", "Team", ViewId::About)
                .route("/", "Home", ViewId::Home)
                .fallback("/")
                .build()
                .unwrap(),
        ];

        for table in &tables {
            let hrefs: BTreeSet<String> = NavBar::new(table, "/").links().into_iter().map(|l| l.href).collect();
            let paths: BTreeSet<String> = table.paths().map(str::to_string).collect();
            assert_eq!(hrefs, paths);
        }
    }

    #[test]
    fn exactly_one_link_active_for_each_route() {
        let table = table();
        for (current, expected) in [("/", "/"), ("/about", "/about"), ("/about/team", "/about")] {
            let active: Vec<String> = NavBar::new(&table, current)
                .links()
                .into_iter()
                .filter(|l| l.active)
                .map(|l| l.href)
                .collect();
            assert_eq!(active, vec![expected.to_string()], "current = {current}");
        }
    }

    #[test]
    fn renders_brand_and_marks_active_link() {
        let table = table();
        let buffer = draw(60, 3, |frame| {
            frame.render_widget(NavBar::new(&table, "/about"), frame.area());
        });
        let text = buffer_text(&buffer);
        assert!(text.contains(BRAND));
        assert!(text.contains("[About]"));
        assert!(text.contains(" Home "));
        assert!(!text.contains("[Home]"));
    }
}
