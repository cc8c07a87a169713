use rat_nexus::{Component, Context};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

/// Static description of the application.
#[derive(Debug, Default)]
pub struct AboutPage;

impl Component for AboutPage {
    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>) {
        let lines = vec![
            Line::from(""),
            Line::styled(
                "About Us",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
            Line::styled(
                "This is a demo application showcasing terminal routing and components.",
                Style::default().fg(Color::DarkGray),
            ),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), cx.area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{buffer_text, draw};
    use rat_nexus::AppContext;
    use ratatui::layout::Rect;

    #[test]
    fn rendering_is_idempotent() {
        let (app, _rx) = AppContext::new();
        let cx = Context::<AboutPage>::new(app, Rect::new(0, 0, 80, 6));
        let mut page = AboutPage;

        let first = draw(80, 6, |frame| page.render(frame, &mut cx.cast()));
        let second = draw(80, 6, |frame| page.render(frame, &mut cx.cast()));

        assert_eq!(first, second);
        assert!(buffer_text(&first).contains("About Us"));
    }
}
