use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::time::Duration;

use crate::{
    config::Config,
    controller::Controller,
    host::{Graph, Navigator},
    markup::Labeler,
    route::LocationKind,
    strip::{Projection, StripWidget, project},
};

/// Somewhere the user can jump to from the current view: a page, or a block
/// of the current page. Selecting one rewrites the routing signal.
#[derive(Debug, Clone)]
struct Destination {
    label: String,
    route: String,
    indent: bool,
}

pub struct App {
    /// The routing signal. The host would own this; the demo app stands in
    /// for it and mutates the string on navigation.
    route: String,
    graph: Graph,
    controller: Controller,
    config: Config,
    labeler: Labeler,
    projection: Projection,
    destinations: Vec<Destination>,
    dest_selected: usize,
    /// Keyboard focus within the strip, as an index into display order.
    /// `None` while the destination list has focus.
    strip_selected: Option<usize>,
    should_quit: bool,
}

impl App {
    pub fn new(graph: Graph, config: Config, initial_route: Option<String>) -> Self {
        let route = initial_route.unwrap_or_else(|| {
            graph
                .pages
                .first()
                .map(|p| format!("#/page/{}", p.id))
                .unwrap_or_default()
        });

        let mut app = Self {
            route: String::new(),
            graph,
            controller: Controller::new(),
            config,
            labeler: Labeler::new(),
            projection: Projection::Placeholder,
            destinations: Vec::new(),
            dest_selected: 0,
            strip_selected: None,
            should_quit: false,
        };
        app.set_route(route);
        app
    }

    pub fn run(
        &mut self,
        terminal: &mut ratatui::Terminal<impl ratatui::backend::Backend>,
    ) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        // Teardown is synchronous and final: no trail state survives the
        // session
        self.controller.deactivate();
        Ok(())
    }

    /// The routing-signal change notification: store the new value, then run
    /// one observe → resolve → commit cycle on this single control thread.
    pub fn set_route(&mut self, route: String) {
        self.route = route;

        if self.config.enabled {
            self.controller
                .navigate(&self.route, &self.graph, self.config.max_breadcrumbs);
        }

        self.projection = project(
            self.controller.trail(),
            &self.labeler,
            self.config.truncate_length,
        );
        self.strip_selected = None;
        self.rebuild_destinations();
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    fn current_page_id(&self) -> Option<String> {
        let current = self.controller.current()?;
        match current.kind {
            LocationKind::Page => Some(current.id.clone()),
            LocationKind::Block => self.graph.page_of_block(&current.id).map(|p| p.id.clone()),
        }
    }

    fn rebuild_destinations(&mut self) {
        let current_page = self.current_page_id();
        let mut destinations = Vec::new();

        for page in &self.graph.pages {
            destinations.push(Destination {
                label: self.labeler.truncate(&page.title, 40),
                route: format!("#/page/{}", page.id),
                indent: false,
            });

            if Some(&page.id) == current_page.as_ref() {
                for block in &page.blocks {
                    destinations.push(Destination {
                        label: self.labeler.truncate(&block.content, 40),
                        route: format!("#/page/{}?block={}", page.id, block.id),
                        indent: true,
                    });
                }
            }
        }

        self.destinations = destinations;
        if self.dest_selected >= self.destinations.len() {
            self.dest_selected = self.destinations.len().saturating_sub(1);
        }
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
        {
            self.handle_key(key);
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if self.dest_selected + 1 < self.destinations.len() {
                    self.dest_selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.dest_selected = self.dest_selected.saturating_sub(1);
            }
            KeyCode::Tab => self.cycle_strip(1),
            KeyCode::BackTab => self.cycle_strip(-1),
            KeyCode::Enter => self.activate_selection(),
            _ => {}
        }
    }

    /// Move keyboard focus through the strip's clickable crumbs, wrapping
    /// back to the destination list at either end.
    fn cycle_strip(&mut self, direction: i32) {
        let clickable = self.projection.clickable();
        if clickable.is_empty() {
            self.strip_selected = None;
            return;
        }

        let position = self
            .strip_selected
            .and_then(|sel| clickable.iter().position(|&i| i == sel));

        self.strip_selected = match (position, direction) {
            (None, d) if d > 0 => Some(clickable[0]),
            (None, _) => Some(*clickable.last().unwrap()),
            (Some(p), d) if d > 0 => clickable.get(p + 1).copied(),
            (Some(0), _) => None,
            (Some(p), _) => Some(clickable[p - 1]),
        };
    }

    fn activate_selection(&mut self) {
        if let Some(i) = self.strip_selected {
            let Some(crumb) = self.projection.crumbs().get(i).cloned() else {
                return;
            };
            self.open(&crumb.id, crumb.kind);
            return;
        }

        if let Some(dest) = self.destinations.get(self.dest_selected) {
            let route = dest.route.clone();
            self.set_route(route);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

        frame.render_widget(
            StripWidget::new(&self.projection, self.strip_selected),
            chunks[0],
        );
        frame.render_widget(self.page_view(), chunks[1]);
        render_status_bar(
            chunks[2],
            frame.buffer_mut(),
            self.status_left(),
            self.controller.trail().len(),
        );
    }

    fn page_view(&self) -> Paragraph<'_> {
        let mut lines = Vec::new();

        if let Some(page_id) = self.current_page_id()
            && let Some(page) = self.graph.page(&page_id)
        {
            lines.push(Line::from(Span::styled(
                self.labeler.strip(&page.title),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::raw(""));
        }

        for (i, dest) in self.destinations.iter().enumerate() {
            let marker = if i == self.dest_selected { "▶ " } else { "  " };
            let indent = if dest.indent { "    " } else { "" };
            let style = if i == self.dest_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if dest.indent {
                Style::default().fg(Color::Gray)
            } else {
                Style::default().fg(Color::Cyan)
            };
            lines.push(Line::from(Span::styled(
                format!("{}{}{}", indent, marker, dest.label),
                style,
            )));
        }

        Paragraph::new(lines)
    }

    /// Left side of the status bar: the focused crumb's full tooltip when
    /// the strip has focus, otherwise the raw routing signal.
    fn status_left(&self) -> String {
        match self
            .strip_selected
            .and_then(|i| self.projection.crumbs().get(i))
        {
            Some(crumb) => crumb.tooltip.clone(),
            None => self.route.clone(),
        }
    }
}

impl Navigator for App {
    /// Host navigation trigger: rewrite the routing signal for the unit and
    /// let the normal signal-change path take over. Blocks whose owning page
    /// is gone are dropped silently.
    fn open(&mut self, id: &str, kind: LocationKind) {
        let route = match kind {
            LocationKind::Page => format!("#/page/{}", id),
            LocationKind::Block => match self.graph.page_of_block(id) {
                Some(page) => format!("#/page/{}?block={}", page.id, id),
                None => return,
            },
        };
        self.set_route(route);
    }
}

fn render_status_bar(area: Rect, buf: &mut Buffer, left: String, crumb_count: usize) {
    let style = Style::default().bg(Color::DarkGray).fg(Color::White);

    for x in area.left()..area.right() {
        buf[(x, area.y)].set_style(style);
        buf[(x, area.y)].set_char(' ');
    }

    let left_text = format!(" {} ", left);
    let left_span = Span::styled(left_text.clone(), style);
    buf.set_span(area.x, area.y, &left_span, area.width);

    let right = format!("{} crumbs │ Tab strip │ j/k move │ q quit ", crumb_count);
    let right_x = area.right().saturating_sub(right.len() as u16);
    if right_x > area.x + left_text.len() as u16 {
        let right_span = Span::styled(right.clone(), style);
        buf.set_span(right_x, area.y, &right_span, right.len() as u16);
    }
}
