use std::sync::Arc;

use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::error::FinderError;
use crate::finder::{DetailTicket, FinderState, RecipeFinder, ViewerPhase};
use crate::model::{RecipeDetail, RecipeSummary};
use crate::providers::RecipeProvider;

use super::helpers::{
    basic_rows, centered_rect, cursor_column, detail_lines, pane_block, step_index,
    BASIC_COLUMNS,
};

/// Footer space reserved for status messages and key hints.
const FOOTER_HEIGHT: u16 = 3;
/// Most suggestions shown under the input box at once.
const MAX_VISIBLE_SUGGESTIONS: u16 = 8;

/// Which pane receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Basics,
    Selected,
    Results,
}

impl Focus {
    fn next(self, with_results: bool) -> Self {
        match self {
            Focus::Input => Focus::Basics,
            Focus::Basics => Focus::Selected,
            Focus::Selected if with_results => Focus::Results,
            Focus::Selected | Focus::Results => Focus::Input,
        }
    }

    fn previous(self, with_results: bool) -> Self {
        match self {
            Focus::Input if with_results => Focus::Results,
            Focus::Input => Focus::Selected,
            Focus::Basics => Focus::Input,
            Focus::Selected => Focus::Basics,
            Focus::Results => Focus::Selected,
        }
    }
}

/// Answers from background requests, drained by the draw loop.
#[derive(Debug)]
pub(crate) enum Response {
    Ingredients(Result<Vec<String>, FinderError>),
    Search(u64, Result<Vec<RecipeSummary>, FinderError>),
    Detail(u64, Result<RecipeDetail, FinderError>),
}

/// Terminal front end over one [`FinderState`].
///
/// Requests run on the tokio runtime and report back through a channel, so
/// the interface keeps taking input while they are in flight.
pub struct App {
    state: FinderState,
    provider: Arc<dyn RecipeProvider>,
    runtime: Handle,
    tx: UnboundedSender<Response>,
    rx: UnboundedReceiver<Response>,
    focus: Focus,
    suggestion_index: usize,
    basic_index: usize,
    selected_index: usize,
    result_index: usize,
    detail_scroll: u16,
    loading_ingredients: bool,
}

impl App {
    pub fn new(finder: RecipeFinder, runtime: Handle) -> Self {
        let (provider, state) = finder.into_parts();
        let (tx, rx) = unbounded_channel();
        Self {
            state,
            provider,
            runtime,
            tx,
            rx,
            focus: Focus::Input,
            suggestion_index: 0,
            basic_index: 0,
            selected_index: 0,
            result_index: 0,
            detail_scroll: 0,
            loading_ingredients: false,
        }
    }

    pub fn state(&self) -> &FinderState {
        &self.state
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Kick off the one-time ingredient list load.
    pub fn start(&mut self) {
        self.loading_ingredients = true;
        self.state.begin_ingredients();
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = provider.list_ingredient_names().await;
            let _ = tx.send(Response::Ingredients(outcome));
        });
    }

    pub fn search(&mut self) {
        let ticket = self.state.begin_search();
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = ticket.fetch(provider.as_ref()).await;
            let _ = tx.send(Response::Search(ticket.seq, outcome));
        });
    }

    pub fn surprise(&mut self) {
        let ticket = self.state.begin_surprise();
        self.spawn_detail(ticket);
    }

    fn open_current_result(&mut self) {
        if let Some(summary) = self.state.recipes().get(self.result_index).cloned() {
            let ticket = self.state.begin_detail(&summary);
            self.spawn_detail(ticket);
        }
    }

    fn spawn_detail(&mut self, ticket: DetailTicket) {
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = ticket.fetch(provider.as_ref()).await;
            let _ = tx.send(Response::Detail(ticket.seq, outcome));
        });
    }

    /// Apply every answer that has arrived since the last frame.
    pub fn drain_responses(&mut self) {
        while let Ok(response) = self.rx.try_recv() {
            self.apply(response);
        }
    }

    pub(crate) fn apply(&mut self, response: Response) {
        match response {
            Response::Ingredients(outcome) => {
                self.loading_ingredients = false;
                match outcome {
                    Ok(names) => self.state.complete_ingredients(Ok(names)),
                    Err(err) => self.state.complete_ingredients(Err(&err)),
                }
            }
            Response::Search(seq, outcome) => {
                let applied = match outcome {
                    Ok(recipes) => self.state.complete_search(seq, Ok(recipes)),
                    Err(err) => self.state.complete_search(seq, Err(&err)),
                };
                if applied {
                    self.result_index = 0;
                    self.clamp_indexes();
                }
            }
            Response::Detail(seq, outcome) => {
                let applied = match outcome {
                    Ok(detail) => self.state.complete_detail(seq, Ok(detail)),
                    Err(err) => self.state.complete_detail(seq, Err(&err)),
                };
                if applied {
                    self.detail_scroll = 0;
                }
            }
        }
    }

    /// Handle one key press; returns true when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.state.viewer_phase() {
            ViewerPhase::Shown => {
                self.handle_overlay_key(code);
                return false;
            }
            ViewerPhase::Loading => {
                if code == KeyCode::Esc {
                    self.state.close_detail();
                }
                return false;
            }
            ViewerPhase::Closed => {}
        }

        let with_results = self.state.search_performed();
        match code {
            KeyCode::Tab => {
                self.focus = self.focus.next(with_results);
                return false;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous(with_results);
                return false;
            }
            KeyCode::Esc => {
                if self.focus == Focus::Input && !self.state.input().is_empty() {
                    self.state.set_input(String::new());
                    return false;
                }
                return true;
            }
            _ => {}
        }

        match self.focus {
            Focus::Input => self.handle_input_key(code),
            Focus::Basics => self.handle_basics_key(code),
            Focus::Selected => self.handle_selected_key(code),
            Focus::Results => self.handle_results_key(code),
        }
        false
    }

    fn handle_overlay_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                self.state.close_detail();
                self.detail_scroll = 0;
            }
            KeyCode::Up => self.detail_scroll = self.detail_scroll.saturating_sub(1),
            KeyCode::Down => self.detail_scroll = self.detail_scroll.saturating_add(1),
            KeyCode::PageUp => self.detail_scroll = self.detail_scroll.saturating_sub(10),
            KeyCode::PageDown => self.detail_scroll = self.detail_scroll.saturating_add(10),
            KeyCode::Home => self.detail_scroll = 0,
            _ => {}
        }
    }

    fn handle_input_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(ch) => {
                let mut input = self.state.input().to_string();
                input.push(ch);
                self.state.set_input(input);
                self.suggestion_index = 0;
            }
            KeyCode::Backspace => {
                let mut input = self.state.input().to_string();
                input.pop();
                self.state.set_input(input);
                self.suggestion_index = 0;
            }
            KeyCode::Up => {
                self.suggestion_index =
                    step_index(self.suggestion_index, -1, self.state.suggestions().len());
            }
            KeyCode::Down => {
                self.suggestion_index =
                    step_index(self.suggestion_index, 1, self.state.suggestions().len());
            }
            KeyCode::Enter => {
                if self.state.pick_suggestion(self.suggestion_index) {
                    self.suggestion_index = 0;
                }
            }
            _ => {}
        }
    }

    fn handle_basics_key(&mut self, code: KeyCode) {
        let count = self.state.basics().len();
        match code {
            KeyCode::Left => self.basic_index = step_index(self.basic_index, -1, count),
            KeyCode::Right => self.basic_index = step_index(self.basic_index, 1, count),
            KeyCode::Up => {
                self.basic_index = step_index(self.basic_index, -(BASIC_COLUMNS as isize), count)
            }
            KeyCode::Down => {
                self.basic_index = step_index(self.basic_index, BASIC_COLUMNS as isize, count)
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(name) = self.state.basics().get(self.basic_index).cloned() {
                    let checked = !self.state.is_selected(&name);
                    self.state.toggle_basic(&name, checked);
                    self.clamp_indexes();
                }
            }
            _ => {}
        }
    }

    fn handle_selected_key(&mut self, code: KeyCode) {
        let count = self.state.selected().len();
        match code {
            KeyCode::Up => self.selected_index = step_index(self.selected_index, -1, count),
            KeyCode::Down => self.selected_index = step_index(self.selected_index, 1, count),
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Delete | KeyCode::Backspace => {
                if let Some(name) = self.state.selected().get(self.selected_index).cloned() {
                    self.state.remove_ingredient(&name);
                    self.clamp_indexes();
                }
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, code: KeyCode) {
        let count = self.state.recipes().len();
        match code {
            KeyCode::Up => self.result_index = step_index(self.result_index, -1, count),
            KeyCode::Down => self.result_index = step_index(self.result_index, 1, count),
            KeyCode::Enter => self.open_current_result(),
            _ => {}
        }
    }

    fn clamp_indexes(&mut self) {
        self.selected_index = step_index(self.selected_index, 0, self.state.selected().len());
        self.result_index = step_index(self.result_index, 0, self.state.recipes().len());
        if !self.state.search_performed() && self.focus == Focus::Results {
            self.focus = Focus::Selected;
        }
    }

    // ---- drawing ----

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);

        if self.state.search_performed() {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[1]);
            self.draw_results(frame, body[0]);
            self.draw_form(frame, body[1]);
        } else {
            self.draw_form(frame, chunks[1]);
        }

        self.draw_footer(frame, chunks[2]);

        match self.state.viewer_phase() {
            ViewerPhase::Shown => self.draw_detail(frame, area),
            ViewerPhase::Loading => self.draw_loading(frame, area),
            ViewerPhase::Closed => {}
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled(
                " 🍲 Recipe Finder ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(
                " Surprise Me (Ctrl+R) ",
                Style::default().fg(Color::Yellow).bg(Color::Black),
            ),
        ]);
        let header = Paragraph::new(title).block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, area);
    }

    fn draw_results(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Results;
        let title = format!("Recipes ({})", self.state.recipes().len());
        let block = pane_block(&title, focused);

        if self.state.recipes().is_empty() {
            let message = self.state.error().unwrap_or("No recipes.");
            let paragraph = Paragraph::new(message.to_string())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .recipes()
            .iter()
            .map(|recipe| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        recipe.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        recipe.thumbnail.clone(),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
            .highlight_symbol("> ");
        let mut list_state = ListState::default().with_selected(Some(self.result_index));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let suggestion_height = if self.state.suggestions().is_empty() {
            0
        } else {
            (self.state.suggestions().len() as u16).min(MAX_VISIBLE_SUGGESTIONS) + 2
        };
        let basics_height = basic_rows(self.state.basics().len()) as u16 + 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(suggestion_height),
                Constraint::Length(basics_height),
                Constraint::Min(3),
                Constraint::Length(2),
            ])
            .split(area);

        self.draw_input(frame, chunks[0]);
        if suggestion_height > 0 {
            self.draw_suggestions(frame, chunks[1]);
        }
        self.draw_basics(frame, chunks[2]);
        self.draw_selected(frame, chunks[3]);
        self.draw_status(frame, chunks[4]);
    }

    fn draw_input(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Input;
        let title = if self.loading_ingredients {
            "Search (loading ingredients…)"
        } else {
            "Search"
        };
        let block = pane_block(title, focused);
        let inner = block.inner(area);
        let paragraph = Paragraph::new(self.state.input().to_string()).block(block);
        frame.render_widget(paragraph, area);

        if focused && self.state.viewer_phase() == ViewerPhase::Closed {
            let cursor_x = cursor_column(inner.x, self.state.input());
            frame.set_cursor_position((cursor_x.min(inner.right()), inner.y));
        }
    }

    fn draw_suggestions(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .state
            .suggestions()
            .iter()
            .map(|name| ListItem::new(name.clone()))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().bg(Color::Gray).fg(Color::Black));
        let mut list_state = ListState::default().with_selected(Some(self.suggestion_index));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_basics(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Basics;
        let block = pane_block("Basic ingredients", focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cell_width = (inner.width / BASIC_COLUMNS as u16).max(1);
        for (index, name) in self.state.basics().iter().enumerate() {
            let row = (index / BASIC_COLUMNS) as u16;
            let column = (index % BASIC_COLUMNS) as u16;
            if row >= inner.height {
                break;
            }
            let cell = Rect {
                x: inner.x + column * cell_width,
                y: inner.y + row,
                width: cell_width,
                height: 1,
            };

            let checked = self.state.is_selected(name);
            let mark = if checked { "[x]" } else { "[ ]" };
            let mut style = if checked {
                Style::default().fg(Color::White).bg(Color::Black)
            } else {
                Style::default()
            };
            if focused && index == self.basic_index {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let label = Paragraph::new(Span::styled(format!("{} {}", mark, name), style));
            frame.render_widget(label, cell);
        }
    }

    fn draw_selected(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Selected;
        let title = format!("Selected ({})", self.state.selected().len());
        let items: Vec<ListItem> = self
            .state
            .selected()
            .iter()
            .map(|name| ListItem::new(name.clone()))
            .collect();
        let list = List::new(items)
            .block(pane_block(&title, focused))
            .highlight_symbol("× ");
        let mut list_state = ListState::default();
        if focused && !self.state.selected().is_empty() {
            list_state.select(Some(self.selected_index));
        }
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let line = if self.state.is_searching() {
            Line::from(Span::styled(
                "Searching…",
                Style::default().fg(Color::Yellow),
            ))
        } else if let Some(failure) = self.state.failure() {
            Line::from(Span::styled(
                failure.to_string(),
                Style::default().fg(Color::Magenta),
            ))
        } else if let Some(error) = self.state.error() {
            Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            ))
        } else {
            Line::from("")
        };
        frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let hints = match self.state.viewer_phase() {
            ViewerPhase::Shown => "↑/↓ scroll  Esc close",
            ViewerPhase::Loading => "Esc cancel",
            ViewerPhase::Closed => match self.focus {
                Focus::Input => "Type to search  ↑/↓ choose  Enter add  Tab next  Ctrl+S search",
                Focus::Basics => "Arrows move  Space toggle  Tab next  Ctrl+S search",
                Focus::Selected => "↑/↓ move  Space remove  Tab next  Ctrl+S search",
                Focus::Results => "↑/↓ move  Enter details  Tab next  Ctrl+S search",
            },
        };
        let paragraph = Paragraph::new(Line::from(vec![
            Span::styled(hints, Style::default().fg(Color::DarkGray)),
            Span::raw("  "),
            Span::styled("Ctrl+Q quit", Style::default().fg(Color::DarkGray)),
        ]));
        frame.render_widget(paragraph, inner);
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect) {
        let Some(detail) = self.state.detail() else {
            return;
        };
        let popup = centered_rect(80, 80, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                format!(" {} ", detail.name),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .title_bottom(" Esc to close ");
        let paragraph = Paragraph::new(detail_lines(detail))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.detail_scroll, 0));
        frame.render_widget(paragraph, popup);
    }

    fn draw_loading(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(40, 20, area);
        frame.render_widget(Clear, popup);
        let paragraph = Paragraph::new("Loading recipe…")
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup);
    }
}
