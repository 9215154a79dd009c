use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

use crate::markup::Labeler;
use crate::route::LocationKind;
use crate::trail::Trail;

pub const SEPARATOR: &str = " › ";
pub const PLACEHOLDER_TEXT: &str = "No trail yet — visit a page to start one";

/// One display-ready breadcrumb: label truncated for the strip, tooltip kept
/// at full stripped length. Only non-current crumbs are navigation targets.
#[derive(Debug, Clone, PartialEq)]
pub struct CrumbDisplay {
    pub id: String,
    pub kind: LocationKind,
    pub label: String,
    pub tooltip: String,
    pub is_current: bool,
}

/// Display state of the strip. An empty trail is an explicit placeholder
/// state, never an empty crumb list.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Placeholder,
    Crumbs(Vec<CrumbDisplay>),
}

impl Projection {
    /// Indices (in display order) of crumbs that can be navigated to.
    /// The current crumb is "you are here" and is excluded.
    pub fn clickable(&self) -> Vec<usize> {
        match self {
            Projection::Placeholder => Vec::new(),
            Projection::Crumbs(crumbs) => crumbs
                .iter()
                .enumerate()
                .filter(|(_, c)| !c.is_current)
                .map(|(i, _)| i)
                .collect(),
        }
    }

    pub fn crumbs(&self) -> &[CrumbDisplay] {
        match self {
            Projection::Placeholder => &[],
            Projection::Crumbs(crumbs) => crumbs,
        }
    }
}

/// Map the trail (stored most-recent-first) into oldest-to-current display
/// order, labeling each crumb through the labeler.
pub fn project(trail: &Trail, labeler: &Labeler, truncate_len: usize) -> Projection {
    if trail.is_empty() {
        return Projection::Placeholder;
    }

    let last = trail.len() - 1;
    let crumbs = trail
        .entries()
        .iter()
        .rev()
        .enumerate()
        .map(|(i, entry)| CrumbDisplay {
            id: entry.id.clone(),
            kind: entry.kind,
            label: labeler.truncate(&entry.label, truncate_len),
            tooltip: labeler.strip(&entry.label),
            is_current: i == last,
        })
        .collect();

    Projection::Crumbs(crumbs)
}

/// Renders the projection as a single breadcrumb line. `selected` is an index
/// into display order, highlighting the crumb the keyboard focus is on.
pub struct StripWidget<'a> {
    projection: &'a Projection,
    selected: Option<usize>,
}

impl<'a> StripWidget<'a> {
    pub fn new(projection: &'a Projection, selected: Option<usize>) -> Self {
        Self {
            projection,
            selected,
        }
    }
}

impl Widget for StripWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let base_style = Style::default().bg(Color::Black).fg(Color::Gray);

        // Fill the strip line
        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(base_style);
            buf[(x, area.y)].set_char(' ');
        }

        let crumbs = match self.projection {
            Projection::Placeholder => {
                let span = Span::styled(
                    format!(" {} ", PLACEHOLDER_TEXT),
                    base_style.fg(Color::DarkGray),
                );
                buf.set_span(area.x, area.y, &span, area.width);
                return;
            }
            Projection::Crumbs(crumbs) => crumbs,
        };

        let mut x = area.x + 1;
        for (i, crumb) in crumbs.iter().enumerate() {
            if x >= area.right() {
                break;
            }

            if i > 0 {
                let sep = Span::styled(SEPARATOR, base_style.fg(Color::DarkGray));
                x = buf.set_span(x, area.y, &sep, area.right().saturating_sub(x)).0;
            }

            let kind_color = match crumb.kind {
                LocationKind::Page => Color::Cyan,
                LocationKind::Block => Color::Yellow,
            };

            let mut style = base_style.fg(kind_color);
            if crumb.is_current {
                style = style.add_modifier(Modifier::BOLD).fg(Color::White);
            }
            if self.selected == Some(i) {
                style = Style::default()
                    .fg(Color::Black)
                    .bg(kind_color)
                    .add_modifier(Modifier::BOLD);
            }

            let span = Span::styled(crumb.label.clone(), style);
            x = buf.set_span(x, area.y, &span, area.right().saturating_sub(x)).0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trail::Crumb;

    fn crumb(id: &str, label: &str) -> Crumb {
        Crumb {
            id: id.to_string(),
            kind: LocationKind::Page,
            label: label.to_string(),
        }
    }

    #[test]
    fn project_empty_trail_is_placeholder() {
        let trail = Trail::new();
        let projection = project(&trail, &Labeler::new(), 24);
        assert_eq!(projection, Projection::Placeholder);
        assert!(projection.clickable().is_empty());
    }

    #[test]
    fn project_reverses_to_display_order() {
        let mut trail = Trail::new();
        trail.upsert(crumb("a", "Alpha"), 8);
        trail.upsert(crumb("b", "Beta"), 8);
        // stored [b, a], displayed [a, b]
        let projection = project(&trail, &Labeler::new(), 24);
        let crumbs = projection.crumbs();
        assert_eq!(crumbs.len(), 2);
        assert_eq!(crumbs[0].id, "a");
        assert!(!crumbs[0].is_current);
        assert_eq!(crumbs[1].id, "b");
        assert!(crumbs[1].is_current);
    }

    #[test]
    fn project_only_last_crumb_is_current() {
        let mut trail = Trail::new();
        for id in ["a", "b", "c"] {
            trail.upsert(crumb(id, id), 8);
        }
        let projection = project(&trail, &Labeler::new(), 24);
        let current: Vec<&str> = projection
            .crumbs()
            .iter()
            .filter(|c| c.is_current)
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(current, ["c"]);
    }

    #[test]
    fn project_truncates_labels_but_not_tooltips() {
        let mut trail = Trail::new();
        trail.upsert(crumb("a", "**a rather long bold title**"), 8);
        let projection = project(&trail, &Labeler::new(), 10);
        let c = &projection.crumbs()[0];
        assert_eq!(c.label, "a rather …");
        assert_eq!(c.tooltip, "a rather long bold title");
    }

    #[test]
    fn clickable_excludes_the_current_crumb() {
        let mut trail = Trail::new();
        for id in ["a", "b", "c"] {
            trail.upsert(crumb(id, id), 8);
        }
        let projection = project(&trail, &Labeler::new(), 24);
        // display order [a, b, c]; c is current
        assert_eq!(projection.clickable(), [0, 1]);
    }

    #[test]
    fn single_entry_trail_has_no_clickable_crumbs() {
        let mut trail = Trail::new();
        trail.upsert(crumb("a", "Alpha"), 8);
        let projection = project(&trail, &Labeler::new(), 24);
        assert_eq!(projection.crumbs().len(), 1);
        assert!(projection.clickable().is_empty());
    }

    #[test]
    fn widget_renders_placeholder_text() {
        let projection = Projection::Placeholder;
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        StripWidget::new(&projection, None).render(area, &mut buf);
        let line: String = (0..60).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(line.contains("No trail yet"));
    }

    #[test]
    fn widget_renders_crumbs_with_separator() {
        let mut trail = Trail::new();
        trail.upsert(crumb("a", "Alpha"), 8);
        trail.upsert(crumb("b", "Beta"), 8);
        let projection = project(&trail, &Labeler::new(), 24);
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        StripWidget::new(&projection, None).render(area, &mut buf);
        let line: String = (0..40).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(line.contains("Alpha › Beta"));
    }

    #[test]
    fn widget_zero_height_area_is_a_noop() {
        let projection = Projection::Placeholder;
        let area = Rect::new(0, 0, 10, 0);
        let mut buf = Buffer::empty(area);
        StripWidget::new(&projection, None).render(area, &mut buf);
    }
}
