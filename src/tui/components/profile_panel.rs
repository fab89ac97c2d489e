//! # Profile Panel Component
//!
//! Read-only rendering of the AI personalization settings into grouped
//! sections. Presence of a section in the profile gates whether its block
//! appears; the content of a present section is never consulted for gating
//! (the exception is recommendations, which need at least one entry to have
//! anything to list).
//!
//! No state beyond a scroll offset, no events, no error paths — a sparse
//! profile just renders narrower.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::profile::{ContentPrefs, LayoutPrefs, PersonalizationSettings, PricingPrefs};

fn header(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn flag_line(label: &str, on: bool) -> Line<'static> {
    let (marker, style) = if on {
        ("[x] ", Style::default().fg(Color::Green))
    } else {
        ("[ ] ", Style::default().fg(Color::DarkGray))
    };
    Line::from(vec![
        Span::styled(marker, style),
        Span::raw(label.to_string()),
    ])
}

fn layout_lines(layout: &LayoutPrefs) -> Vec<Line<'static>> {
    vec![
        header("Layout"),
        flag_line("Prioritize search", layout.prioritize_search),
        flag_line("Show map first", layout.show_map_first),
        flag_line("Compact results", layout.compact_results),
        Line::default(),
    ]
}

fn content_lines(content: &ContentPrefs, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![header("Content")];
    if let Some(routes) = &content.recommended_routes {
        lines.push(Line::from("Recommended routes:"));
        for route in routes {
            lines.push(Line::from(format!("  - {route}")));
        }
    }
    if let Some(range) = &content.price_range {
        lines.push(Line::from(format!(
            "Price range: ${} - ${}",
            range.min, range.max
        )));
    }
    if let Some(tone) = &content.communication_tone {
        for wrapped in textwrap::wrap(&format!("Tone: {tone}"), width.max(10)) {
            lines.push(Line::from(wrapped.into_owned()));
        }
    }
    lines.push(Line::default());
    lines
}

fn pricing_lines(pricing: &PricingPrefs) -> Vec<Line<'static>> {
    vec![
        header("Pricing"),
        flag_line("Show deals", pricing.show_deals),
        flag_line("Hide premium options", pricing.hide_premium),
        flag_line("Local currency", pricing.currency_local),
        Line::default(),
    ]
}

/// Build the full panel content. Pure, so the section-gating rules are
/// testable without a terminal.
pub fn profile_lines(
    settings: Option<&PersonalizationSettings>,
    width: usize,
) -> Vec<Line<'static>> {
    let Some(settings) = settings.filter(|s| !s.is_empty()) else {
        return vec![Line::from(Span::styled(
            "No personalization yet.",
            Style::default().fg(Color::DarkGray),
        ))];
    };

    let mut lines = Vec::new();
    if let Some(layout) = &settings.layout {
        lines.extend(layout_lines(layout));
    }
    if let Some(content) = &settings.content {
        lines.extend(content_lines(content, width));
    }
    if let Some(pricing) = &settings.pricing {
        lines.extend(pricing_lines(pricing));
    }
    if settings.has_recommendations() {
        lines.push(header("For you"));
        if let Some(recs) = &settings.recommendations {
            for (i, rec) in recs.iter().enumerate() {
                // Free text, never truncated: wrap to width instead.
                let numbered = format!("{}. {rec}", i + 1);
                for wrapped in textwrap::wrap(&numbered, width.max(10)) {
                    lines.push(Line::from(wrapped.into_owned()));
                }
            }
        }
    }
    lines
}

/// Transient render wrapper. Scroll state lives in `TuiState`.
pub struct ProfilePanel<'a> {
    settings: Option<&'a PersonalizationSettings>,
    scroll: &'a mut ScrollViewState,
}

impl<'a> ProfilePanel<'a> {
    pub fn new(
        settings: Option<&'a PersonalizationSettings>,
        scroll: &'a mut ScrollViewState,
    ) -> Self {
        Self { settings, scroll }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Your trip, personalized ")
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let width = inner.width.saturating_sub(1) as usize;
        let lines = profile_lines(self.settings, width);
        let height = lines.len() as u16;

        let mut scroll_view = ScrollView::new(Size::new(inner.width.saturating_sub(1), height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        let content_rect = Rect::new(0, 0, inner.width.saturating_sub(1), height);
        scroll_view.render_widget(Paragraph::new(lines), content_rect);
        frame.render_stateful_widget(scroll_view, inner, self.scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::PriceRange;

    fn headers(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .filter(|l| {
                l.spans
                    .first()
                    .is_some_and(|s| s.style.add_modifier.contains(Modifier::BOLD))
            })
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn test_absent_settings_render_placeholder() {
        let lines = profile_lines(None, 40);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].to_string(), "No personalization yet.");
    }

    #[test]
    fn test_layout_only_renders_exactly_one_section() {
        // The spec scenario: {layout: {prioritize_search: true}} → one layout
        // block, nothing else.
        let settings = PersonalizationSettings {
            layout: Some(LayoutPrefs {
                prioritize_search: true,
                ..Default::default()
            }),
            ..Default::default()
        };
        let lines = profile_lines(Some(&settings), 40);
        assert_eq!(headers(&lines), vec!["Layout"]);
        assert!(lines.iter().any(|l| l.to_string().contains("Prioritize search")));
    }

    #[test]
    fn test_all_false_layout_still_renders_block() {
        // Presence gates the block, not truthiness of its content.
        let settings = PersonalizationSettings {
            layout: Some(LayoutPrefs::default()),
            ..Default::default()
        };
        let lines = profile_lines(Some(&settings), 40);
        assert_eq!(headers(&lines), vec!["Layout"]);
    }

    #[test]
    fn test_content_fields_render_independently() {
        let settings = PersonalizationSettings {
            content: Some(ContentPrefs {
                recommended_routes: None,
                price_range: Some(PriceRange { min: 100, max: 400 }),
                communication_tone: None,
            }),
            ..Default::default()
        };
        let lines = profile_lines(Some(&settings), 40);
        assert_eq!(headers(&lines), vec!["Content"]);
        assert!(lines.iter().any(|l| l.to_string() == "Price range: $100 - $400"));
        assert!(!lines.iter().any(|l| l.to_string().contains("Recommended routes")));
        assert!(!lines.iter().any(|l| l.to_string().contains("Tone:")));
    }

    #[test]
    fn test_empty_recommendations_section_hidden() {
        let settings = PersonalizationSettings {
            recommendations: Some(vec![]),
            ..Default::default()
        };
        let lines = profile_lines(Some(&settings), 40);
        assert!(headers(&lines).is_empty());

        let settings = PersonalizationSettings {
            recommendations: Some(vec!["Try the night train to Vienna".to_string()]),
            ..Default::default()
        };
        let lines = profile_lines(Some(&settings), 40);
        assert_eq!(headers(&lines), vec!["For you"]);
        assert!(lines.iter().any(|l| l.to_string().starts_with("1. ")));
    }

    #[test]
    fn test_long_recommendation_wraps_not_truncates() {
        let long = "A very long free-text recommendation that certainly will not fit on one narrow terminal line".to_string();
        let settings = PersonalizationSettings {
            recommendations: Some(vec![long.clone()]),
            ..Default::default()
        };
        let lines = profile_lines(Some(&settings), 30);
        let joined: String = lines
            .iter()
            .skip(1) // header
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        for word in long.split_whitespace() {
            assert!(joined.contains(word), "lost word: {word}");
        }
    }
}
