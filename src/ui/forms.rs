use chrono::{Days, Local, Months, NaiveDate};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::error::FormError;
use crate::models::{EntityKind, NewEntity};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One toggleable event type on the member form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub checked: bool,
}

/// Focus targets on the member form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MemberField {
    #[default]
    Name,
    Choice(usize),
}

/// Name plus one checkbox per event type known when the form was opened.
#[derive(Debug, Clone, Default)]
pub struct MemberForm {
    pub name: String,
    pub choices: Vec<Choice>,
    pub active: MemberField,
}

impl MemberForm {
    pub fn new(event_types: &[String]) -> Self {
        Self {
            name: String::new(),
            choices: event_types
                .iter()
                .map(|label| Choice {
                    label: label.clone(),
                    checked: false,
                })
                .collect(),
            active: MemberField::Name,
        }
    }

    fn field_count(&self) -> usize {
        1 + self.choices.len()
    }

    fn field_index(&self) -> usize {
        match self.active {
            MemberField::Name => 0,
            MemberField::Choice(idx) => idx + 1,
        }
    }

    fn focus_index(&mut self, index: usize) {
        self.active = match index {
            0 => MemberField::Name,
            idx => MemberField::Choice(idx - 1),
        };
    }

    /// Cycle focus forward (`1`) or backward (`-1`) across name and checkboxes.
    pub fn cycle_field(&mut self, offset: isize) {
        let count = self.field_count() as isize;
        let next = (self.field_index() as isize + offset).rem_euclid(count);
        self.focus_index(next as usize);
    }

    /// Flip the checkbox with focus. Returns `false` when the name has focus.
    pub fn toggle_active(&mut self) -> bool {
        match self.active {
            MemberField::Choice(idx) => match self.choices.get_mut(idx) {
                Some(choice) => {
                    choice.checked = !choice.checked;
                    true
                }
                None => false,
            },
            MemberField::Name => false,
        }
    }

    pub fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            MemberField::Name => {
                self.name.push(ch);
                true
            }
            MemberField::Choice(_) => ch == ' ' && self.toggle_active(),
        }
    }

    pub fn backspace(&mut self) {
        if self.active == MemberField::Name {
            self.name.pop();
        }
    }

    /// Move between checkboxes; the name field is left alone.
    pub fn step(&mut self, offset: isize) {
        if let MemberField::Choice(idx) = self.active {
            let len = self.choices.len() as isize;
            let next = (idx as isize + offset).clamp(0, len - 1);
            self.active = MemberField::Choice(next as usize);
        }
    }

    pub fn checked_labels(&self) -> Vec<&str> {
        self.choices
            .iter()
            .filter(|choice| choice.checked)
            .map(|choice| choice.label.as_str())
            .collect()
    }

    /// Require a name and at least one preferred event type. Text is kept
    /// exactly as typed.
    pub fn parse_inputs(&self) -> Result<NewEntity, FormError> {
        if self.name.is_empty() || self.checked_labels().is_empty() {
            return Err(FormError::MissingFields);
        }
        Ok(NewEntity::Member {
            name: self.name.clone(),
        })
    }

    fn build_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            text_line("Name", &self.name, self.active == MemberField::Name),
            Line::from(""),
            Line::from(Span::styled(
                "Preferred event types:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];

        if self.choices.is_empty() {
            lines.push(Line::from(Span::styled(
                "  (no event types yet)",
                Style::default().fg(Color::DarkGray),
            )));
        }

        for (idx, choice) in self.choices.iter().enumerate() {
            let is_active = self.active == MemberField::Choice(idx);
            let marker = if is_active { "▶ " } else { "  " };
            let checkbox = if choice.checked { "[x]" } else { "[ ]" };
            let style = if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!("{marker}{checkbox} {}", choice.label),
                style,
            )));
        }

        lines
    }
}

/// Focus targets on the event form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum EventField {
    #[default]
    Name,
    Date,
    EventType,
}

/// Name, a date picker and a single-choice event type selector. The picker
/// and the selector both start empty.
#[derive(Debug, Clone, Default)]
pub struct EventForm {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub options: Vec<String>,
    pub selected: Option<usize>,
    pub active: EventField,
}

impl EventForm {
    pub fn new(event_types: &[String]) -> Self {
        Self {
            options: event_types.to_vec(),
            ..Self::default()
        }
    }

    pub fn cycle_field(&mut self, offset: isize) {
        const ORDER: [EventField; 3] = [EventField::Name, EventField::Date, EventField::EventType];
        let current = ORDER
            .iter()
            .position(|field| *field == self.active)
            .unwrap_or(0) as isize;
        self.active = ORDER[(current + offset).rem_euclid(ORDER.len() as isize) as usize];
    }

    pub fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() || self.active != EventField::Name {
            return false;
        }
        self.name.push(ch);
        true
    }

    pub fn backspace(&mut self) {
        match self.active {
            EventField::Name => {
                self.name.pop();
            }
            EventField::Date => self.date = None,
            EventField::EventType => self.selected = None,
        }
    }

    /// Days on the date picker, options on the selector.
    pub fn step(&mut self, offset: isize) {
        match self.active {
            EventField::Name => {}
            EventField::Date => self.shift_days(offset),
            EventField::EventType => self.shift_option(offset),
        }
    }

    /// Months on the date picker.
    pub fn step_page(&mut self, offset: isize) {
        if self.active != EventField::Date {
            return;
        }
        let Some(date) = self.date else {
            self.date = Some(today());
            return;
        };
        let months = Months::new(offset.unsigned_abs() as u32);
        let shifted = if offset >= 0 {
            date.checked_add_months(months)
        } else {
            date.checked_sub_months(months)
        };
        if let Some(shifted) = shifted {
            self.date = Some(shifted);
        }
    }

    fn shift_days(&mut self, offset: isize) {
        let Some(date) = self.date else {
            self.date = Some(today());
            return;
        };
        let days = Days::new(offset.unsigned_abs() as u64);
        let shifted = if offset >= 0 {
            date.checked_add_days(days)
        } else {
            date.checked_sub_days(days)
        };
        if let Some(shifted) = shifted {
            self.date = Some(shifted);
        }
    }

    fn shift_option(&mut self, offset: isize) {
        if self.options.is_empty() {
            return;
        }
        let len = self.options.len() as isize;
        let next = match self.selected {
            Some(idx) => (idx as isize + offset).rem_euclid(len),
            None if offset >= 0 => 0,
            None => len - 1,
        };
        self.selected = Some(next as usize);
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.date = date;
    }

    /// Select an option by index; out-of-range indexes clear the selection.
    pub fn select_option(&mut self, index: Option<usize>) {
        self.selected = index.filter(|idx| *idx < self.options.len());
    }

    pub fn date_text(&self) -> String {
        self.date
            .map(|date| date.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    pub fn selected_option(&self) -> Option<&str> {
        self.selected
            .and_then(|idx| self.options.get(idx))
            .map(String::as_str)
    }

    /// Every field is required.
    pub fn parse_inputs(&self) -> Result<NewEntity, FormError> {
        let event_type = self.selected_option().unwrap_or_default();
        if self.name.is_empty() || self.date.is_none() || event_type.is_empty() {
            return Err(FormError::MissingFields);
        }
        Ok(NewEntity::Event {
            name: self.name.clone(),
            date: self.date_text(),
            event_type: event_type.to_string(),
        })
    }

    fn build_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            text_line("Description", &self.name, self.active == EventField::Name),
            picker_line(
                "Date",
                self.date.map(|_| self.date_text()),
                "<pick a date>",
                self.active == EventField::Date,
            ),
            picker_line(
                "Event Type",
                self.selected_option().map(str::to_string),
                if self.options.is_empty() {
                    "<no event types yet>"
                } else {
                    "<choose one>"
                },
                self.active == EventField::EventType,
            ),
            Line::from(""),
        ];

        let hint = match self.active {
            EventField::Date => "↑↓ change day • PgUp/PgDn change month • Backspace clears",
            EventField::EventType => "↑↓ choose event type • Backspace clears",
            EventField::Name => "",
        };
        if !hint.is_empty() {
            lines.push(Line::from(Span::styled(
                hint,
                Style::default().fg(Color::Gray),
            )));
        }
        lines
    }
}

/// Single description field.
#[derive(Debug, Clone, Default)]
pub struct EventTypeForm {
    pub description: String,
}

impl EventTypeForm {
    pub fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.description.push(ch);
        true
    }

    pub fn backspace(&mut self) {
        self.description.pop();
    }

    pub fn parse_inputs(&self) -> Result<NewEntity, FormError> {
        if self.description.is_empty() {
            return Err(FormError::EmptyDescription);
        }
        Ok(NewEntity::EventType {
            description: self.description.clone(),
        })
    }

    fn build_lines(&self) -> Vec<Line<'static>> {
        vec![text_line("Description", &self.description, true)]
    }
}

/// The input form for one record kind.
#[derive(Debug, Clone)]
pub enum EntityForm {
    Member(MemberForm),
    Event(EventForm),
    EventType(EventTypeForm),
}

impl EntityForm {
    /// Build the form for `kind`. `event_types` is copied, so later changes to
    /// the event type collection do not show up in an open form.
    pub fn for_kind(kind: EntityKind, event_types: &[String]) -> Self {
        match kind {
            EntityKind::Member => EntityForm::Member(MemberForm::new(event_types)),
            EntityKind::Event => EntityForm::Event(EventForm::new(event_types)),
            EntityKind::EventType => EntityForm::EventType(EventTypeForm::default()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityForm::Member(_) => EntityKind::Member,
            EntityForm::Event(_) => EntityKind::Event,
            EntityForm::EventType(_) => EntityKind::EventType,
        }
    }

    pub fn cycle_field(&mut self, offset: isize) {
        match self {
            EntityForm::Member(form) => form.cycle_field(offset),
            EntityForm::Event(form) => form.cycle_field(offset),
            EntityForm::EventType(_) => {}
        }
    }

    pub fn push_char(&mut self, ch: char) -> bool {
        match self {
            EntityForm::Member(form) => form.push_char(ch),
            EntityForm::Event(form) => form.push_char(ch),
            EntityForm::EventType(form) => form.push_char(ch),
        }
    }

    pub fn backspace(&mut self) {
        match self {
            EntityForm::Member(form) => form.backspace(),
            EntityForm::Event(form) => form.backspace(),
            EntityForm::EventType(form) => form.backspace(),
        }
    }

    pub fn step(&mut self, offset: isize) {
        match self {
            EntityForm::Member(form) => form.step(offset),
            EntityForm::Event(form) => form.step(offset),
            EntityForm::EventType(_) => {}
        }
    }

    pub fn step_page(&mut self, offset: isize) {
        if let EntityForm::Event(form) = self {
            form.step_page(offset);
        }
    }

    pub fn parse_inputs(&self) -> Result<NewEntity, FormError> {
        match self {
            EntityForm::Member(form) => form.parse_inputs(),
            EntityForm::Event(form) => form.parse_inputs(),
            EntityForm::EventType(form) => form.parse_inputs(),
        }
    }

    pub(crate) fn build_lines(&self) -> Vec<Line<'static>> {
        match self {
            EntityForm::Member(form) => form.build_lines(),
            EntityForm::Event(form) => form.build_lines(),
            EntityForm::EventType(form) => form.build_lines(),
        }
    }

    /// Line index and display column where the terminal cursor belongs, when
    /// a text field has focus.
    pub(crate) fn cursor_offset(&self) -> Option<(u16, u16)> {
        let (label, value) = match self {
            EntityForm::Member(form) if form.active == MemberField::Name => ("Name", &form.name),
            EntityForm::Event(form) if form.active == EventField::Name => {
                ("Description", &form.name)
            }
            EntityForm::EventType(form) => ("Description", &form.description),
            _ => return None,
        };
        let column = label.width() + ": ".len() + value.width();
        Some((0, u16::try_from(column).unwrap_or(u16::MAX)))
    }
}

/// Place a form cursor offset inside `inner`. Input wider than the area pins
/// the cursor to the last cell instead of running off the form.
pub(crate) fn cursor_position(inner: Rect, (line, column): (u16, u16)) -> Position {
    let x = inner
        .x
        .saturating_add(column)
        .min(inner.right().saturating_sub(1));
    let y = inner
        .y
        .saturating_add(line)
        .min(inner.bottom().saturating_sub(1));
    Position::new(x, y)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn field_style(is_active: bool, is_empty: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Yellow)
    } else if is_empty {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    }
}

/// `Label: value`, with a `<required>` placeholder while the value is empty.
fn text_line(label: &str, value: &str, is_active: bool) -> Line<'static> {
    let display = if value.is_empty() {
        if is_active {
            String::new()
        } else {
            "<required>".to_string()
        }
    } else {
        value.to_string()
    };
    Line::from(vec![
        Span::raw(format!("{label}: ")),
        Span::styled(display, field_style(is_active, value.is_empty())),
    ])
}

fn picker_line(
    label: &str,
    value: Option<String>,
    placeholder: &str,
    is_active: bool,
) -> Line<'static> {
    let is_empty = value.is_none();
    let text = value.unwrap_or_else(|| placeholder.to_string());
    let display = if is_active {
        format!("◀ {text} ▶")
    } else {
        text
    };
    Line::from(vec![
        Span::raw(format!("{label}: ")),
        Span::styled(display, field_style(is_active, is_empty)),
    ])
}
