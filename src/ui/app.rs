use std::mem;

use crossterm::event::KeyCode;
use log::{debug, info, warn};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::EntityKind;
use crate::store::Store;

use super::forms::{cursor_position, EntityForm};
use super::helpers::{centered_rect, screen_layout};
use super::table::{draw_table, row_at, table_for, RowSelection, TableView};

/// Notice raised when Remove is pressed without a highlighted row.
pub const NO_ROW_SELECTED: &str = "Select a row to remove.";
/// Status shown for the edit control, which has no behavior.
pub const EDIT_UNSUPPORTED: &str = "Editing existing records is not supported.";

/// Public summary of what the content area currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Browsing(EntityKind),
    Editing(EntityKind),
}

/// The single view held by the content area. Switching views always replaces
/// the previous one.
enum View {
    Idle,
    Browsing { kind: EntityKind, table: TableView },
    Editing { form: EntityForm },
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state: the collections plus every piece of transient
/// UI state. Built explicitly and handed to the terminal loop; a new `App`
/// over a new `Store` is a full reset.
pub struct App {
    store: Store,
    view: View,
    selection: RowSelection,
    notice: Option<String>,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            view: View::Idle,
            selection: RowSelection::default(),
            notice: None,
            status: None,
        }
    }

    pub fn state(&self) -> ViewState {
        match &self.view {
            View::Idle => ViewState::Idle,
            View::Browsing { kind, .. } => ViewState::Browsing(*kind),
            View::Editing { form } => ViewState::Editing(form.kind()),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The table on screen while browsing.
    pub fn table(&self) -> Option<&TableView> {
        match &self.view {
            View::Browsing { table, .. } => Some(table),
            _ => None,
        }
    }

    /// The open form while editing.
    pub fn form(&self) -> Option<&EntityForm> {
        match &self.view {
            View::Editing { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn highlighted_row(&self) -> Option<usize> {
        self.selection.highlighted()
    }

    pub fn cursor_row(&self) -> usize {
        self.selection.cursor()
    }

    /// Message of the blocking notice, if one is up.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    /// Apply one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.notice.is_some() {
            if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.notice = None;
            }
            return false;
        }

        if let Some(kind) = kind_for_function_key(code) {
            if let View::Editing { form } = &self.view {
                info!("event=form_discarded kind={:?}", form.kind());
            }
            self.view = self.switch_kind(kind);
            return false;
        }

        let mut exit = false;
        let view = mem::replace(&mut self.view, View::Idle);

        self.view = match view {
            View::Idle => self.handle_idle_key(code, &mut exit),
            View::Browsing { kind, table } => {
                self.handle_browse_key(code, kind, table, &mut exit)
            }
            View::Editing { form } => self.handle_form_key(code, form),
        };

        exit
    }

    /// Apply a left click at terminal cell (`column`, `row`) of a frame
    /// covering `area`. Clicking a data row toggles its highlight. Returns
    /// whether anything changed.
    pub fn handle_click(&mut self, column: u16, row: u16, area: Rect) -> bool {
        if self.notice.is_some() {
            return false;
        }
        let View::Browsing { kind, table } = &self.view else {
            return false;
        };

        let content = screen_layout(area).content;
        match row_at(content, *kind, table, &self.selection, column, row) {
            Some(index) => {
                self.selection.toggle(index);
                true
            }
            None => false,
        }
    }

    fn handle_idle_key(&mut self, code: KeyCode, exit: &mut bool) -> View {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            _ => {
                if let Some(kind) = kind_for_key(code) {
                    return self.switch_kind(kind);
                }
            }
        }
        View::Idle
    }

    fn handle_browse_key(
        &mut self,
        code: KeyCode,
        kind: EntityKind,
        table: TableView,
        exit: &mut bool,
    ) -> View {
        if let Some(next) = kind_for_key(code) {
            return self.switch_kind(next);
        }

        let len = table.data_len();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Up => self.selection.move_cursor(-1, len),
            KeyCode::Down => self.selection.move_cursor(1, len),
            KeyCode::Home => self.selection.select_first(),
            KeyCode::End => self.selection.select_last(len),
            KeyCode::Char(' ') | KeyCode::Enter => {
                if len > 0 {
                    self.selection.toggle(self.selection.cursor());
                }
            }
            KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                let form = EntityForm::for_kind(kind, &self.store.event_type_descriptions());
                info!("event=form_opened kind={kind:?}");
                return View::Editing { form };
            }
            KeyCode::Char('-') | KeyCode::Delete => return self.remove_highlighted(kind, table),
            KeyCode::Char('e') | KeyCode::Char('E') => {
                self.set_status(EDIT_UNSUPPORTED, StatusKind::Info);
            }
            _ => {}
        }

        View::Browsing { kind, table }
    }

    fn handle_form_key(&mut self, code: KeyCode, mut form: EntityForm) -> View {
        let kind = form.kind();
        match code {
            KeyCode::Esc => {
                info!("event=form_cancelled kind={kind:?}");
                self.set_status("Cancelled.", StatusKind::Info);
                return self.browse(kind);
            }
            KeyCode::Enter => return self.save_form(form),
            KeyCode::Tab => form.cycle_field(1),
            KeyCode::BackTab => form.cycle_field(-1),
            KeyCode::Backspace | KeyCode::Delete => form.backspace(),
            KeyCode::Up => form.step(-1),
            KeyCode::Down => form.step(1),
            KeyCode::PageUp => form.step_page(-1),
            KeyCode::PageDown => form.step_page(1),
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        View::Editing { form }
    }

    fn switch_kind(&mut self, kind: EntityKind) -> View {
        info!("event=kind_switched kind={kind:?}");
        self.clear_status();
        self.selection.reset();
        self.browse(kind)
    }

    /// A browsing view over the current contents of `kind`.
    fn browse(&self, kind: EntityKind) -> View {
        View::Browsing {
            kind,
            table: table_for(&self.store, kind),
        }
    }

    fn save_form(&mut self, form: EntityForm) -> View {
        let kind = form.kind();
        let entity = match form.parse_inputs() {
            Ok(entity) => entity,
            Err(err) => {
                warn!("event=validation_failed kind={kind:?} reason=\"{err}\"");
                self.set_status(err.to_string(), StatusKind::Error);
                self.notice = Some(err.to_string());
                return View::Editing { form };
            }
        };

        if let EntityForm::Member(member) = &form {
            debug!(
                "event=member_preferences types={:?}",
                member.checked_labels()
            );
        }

        let id = self.store.add(entity);
        info!("event=entity_saved kind={kind:?} id={id}");
        self.set_status(
            format!("Added {} #{id}.", kind.singular()),
            StatusKind::Info,
        );

        let len = self.store.len(kind);
        self.selection.reset();
        self.selection.set_cursor(len.saturating_sub(1), len);
        self.browse(kind)
    }

    fn remove_highlighted(&mut self, kind: EntityKind, table: TableView) -> View {
        let Some(index) = self.selection.highlighted() else {
            warn!("event=remove_without_selection kind={kind:?}");
            self.notice = Some(NO_ROW_SELECTED.to_string());
            return View::Browsing { kind, table };
        };

        match self.store.remove(kind, index) {
            Ok(()) => {
                info!("event=entity_removed kind={kind:?} index={index}");
                self.selection.clear();
                self.selection.clamp(self.store.len(kind));
                self.set_status(format!("Removed {}.", kind.singular()), StatusKind::Info);
                self.browse(kind)
            }
            Err(err) => {
                warn!("event=remove_failed kind={kind:?} reason=\"{err}\"");
                self.set_status(err.to_string(), StatusKind::Error);
                self.selection.clear();
                self.notice = Some(err.to_string());
                View::Browsing { kind, table }
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let areas = screen_layout(area);

        self.draw_header(frame, areas.header);

        match &self.view {
            View::Idle => self.draw_idle(frame, areas.content),
            View::Browsing { kind, table } => {
                draw_table(frame, areas.content, *kind, table, &self.selection)
            }
            View::Editing { form } => self.draw_form(frame, areas.content, form),
        }

        self.draw_footer(frame, areas.footer);

        if let Some(message) = &self.notice {
            self.draw_notice(frame, area, message);
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let current = match self.state() {
            ViewState::Idle => None,
            ViewState::Browsing(kind) | ViewState::Editing(kind) => Some(kind),
        };

        let mut spans = Vec::new();
        for (idx, kind) in EntityKind::ALL.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::raw("   "));
            }
            spans.push(Span::styled(format!("[{n}/F{n}]", n = idx + 1), key_style));
            let label_style = if current == Some(*kind) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!(" {}", kind.title()), label_style));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Events Manager ");
        let paragraph = Paragraph::new(Line::from(spans)).block(block);
        frame.render_widget(paragraph, area);
    }

    fn draw_idle(&self, frame: &mut Frame, area: Rect) {
        let message = Paragraph::new("Press 1, 2 or 3 to open a list.")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::NONE));
        frame.render_widget(message, area);
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect, form: &EntityForm) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" New {} ", form.kind().singular()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = form.build_lines();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter to save • Tab to switch field • Esc to cancel",
            Style::default().fg(Color::Gray),
        )));
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);

        if self.notice.is_none() {
            if let Some(offset) = form.cursor_offset() {
                frame.set_cursor_position(cursor_position(inner, offset));
            }
        }
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, self.footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = if self.notice.is_some() {
            &[("[Enter]", " Dismiss")]
        } else {
            match self.state() {
                ViewState::Idle => &[("[1-3]", " Open List   "), ("[q]", " Quit")],
                ViewState::Browsing(_) => &[
                    ("[1-3]", " Switch List   "),
                    ("[↑↓]", " Move   "),
                    ("[Space]", " Select   "),
                    ("[+]", " Add   "),
                    ("[e]", " Edit   "),
                    ("[-]", " Remove   "),
                    ("[q]", " Quit"),
                ],
                ViewState::Editing(_) => &[
                    ("[F1-F3]", " Switch List   "),
                    ("[Tab]", " Next Field   "),
                    ("[Enter]", " Save   "),
                    ("[Esc]", " Cancel"),
                ],
            }
        };

        Line::from(
            hints
                .iter()
                .flat_map(|(key, label)| {
                    [Span::styled(*key, key_style), Span::raw(*label)]
                })
                .collect::<Vec<_>>(),
        )
    }

    fn draw_notice(&self, frame: &mut Frame, area: Rect, message: &str) {
        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Notice ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        let lines = vec![
            Line::from(message.to_string()),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to continue.",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

/// Number keys switch lists outside forms, where they are not text input.
fn kind_for_key(code: KeyCode) -> Option<EntityKind> {
    match code {
        KeyCode::Char('1') => Some(EntityKind::Member),
        KeyCode::Char('2') => Some(EntityKind::Event),
        KeyCode::Char('3') => Some(EntityKind::EventType),
        _ => None,
    }
}

/// Function keys switch lists from any view, dropping an open form.
fn kind_for_function_key(code: KeyCode) -> Option<EntityKind> {
    match code {
        KeyCode::F(1) => Some(EntityKind::Member),
        KeyCode::F(2) => Some(EntityKind::Event),
        KeyCode::F(3) => Some(EntityKind::EventType),
        _ => None,
    }
}
