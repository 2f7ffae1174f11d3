use std::cmp::min;

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use crate::models::{EntityKind, Tabular};
use crate::store::Store;

/// Text of the single row shown for an empty collection.
pub const PLACEHOLDER_TEXT: &str = "No data to display";

/// Width reserved for the cursor marker in front of every row.
const MARKER_WIDTH: u16 = 2;
/// Width of the leading id column.
const ID_COLUMN_WIDTH: u16 = 6;

/// Header plus rows of display strings for one collection. An empty
/// collection renders as a header-less table holding one placeholder row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn from_entities<T: Tabular>(items: &[T]) -> Self {
        if items.is_empty() {
            return Self::placeholder();
        }

        Self {
            header: Some(T::columns().iter().map(|label| label.to_string()).collect()),
            rows: items.iter().map(Tabular::cells).collect(),
        }
    }

    fn placeholder() -> Self {
        Self {
            header: None,
            rows: vec![vec![PLACEHOLDER_TEXT.to_string()]],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.header.is_none()
    }

    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Every rendered row, including the placeholder row when present.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows backed by a record. Zero for the placeholder table.
    pub fn data_len(&self) -> usize {
        if self.is_placeholder() {
            0
        } else {
            self.rows.len()
        }
    }

    pub fn column_count(&self) -> usize {
        self.header.as_ref().map_or(1, Vec::len)
    }
}

/// Build the table for one kind straight from the live collection.
pub fn table_for(store: &Store, kind: EntityKind) -> TableView {
    match kind {
        EntityKind::Member => TableView::from_entities(store.members()),
        EntityKind::Event => TableView::from_entities(store.events()),
        EntityKind::EventType => TableView::from_entities(store.event_types()),
    }
}

/// Transient row state for the table on screen: the keyboard cursor and the
/// single highlighted row. Never stored alongside the records.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RowSelection {
    cursor: usize,
    highlighted: Option<usize>,
}

impl RowSelection {
    /// Highlight `index`, replacing any other highlight, or clear it when
    /// `index` is already the highlighted row. Returns whether a row is
    /// highlighted afterwards.
    pub fn toggle(&mut self, index: usize) -> bool {
        self.cursor = index;
        if self.highlighted == Some(index) {
            self.highlighted = None;
            false
        } else {
            self.highlighted = Some(index);
            true
        }
    }

    pub fn clear(&mut self) {
        self.highlighted = None;
    }

    /// Forget both the highlight and the cursor position.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor(&mut self, offset: isize, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let max = len as isize - 1;
        self.cursor = (self.cursor as isize + offset).clamp(0, max) as usize;
    }

    pub fn select_first(&mut self) {
        self.cursor = 0;
    }

    pub fn select_last(&mut self, len: usize) {
        self.cursor = len.saturating_sub(1);
    }

    pub fn set_cursor(&mut self, index: usize, len: usize) {
        self.cursor = min(index, len.saturating_sub(1));
    }

    /// Pull the cursor and highlight back inside a collection of `len` rows.
    pub fn clamp(&mut self, len: usize) {
        if self.highlighted.is_some_and(|row| row >= len) {
            self.highlighted = None;
        }
        self.cursor = min(self.cursor, len.saturating_sub(1));
    }
}

/// First and one-past-last row to render so the cursor stays visible when only
/// `capacity` rows fit.
pub(crate) fn visible_window(cursor: usize, len: usize, capacity: usize) -> (usize, usize) {
    let capacity = capacity.max(1);
    let mut start = if cursor >= capacity {
        cursor + 1 - capacity
    } else {
        0
    };
    if start + capacity > len {
        start = len.saturating_sub(capacity);
    }
    (start, min(start + capacity, len))
}

/// Rows that fit below the header inside the bordered table block.
fn row_capacity(inner: Rect) -> usize {
    inner.height.saturating_sub(1) as usize
}

fn table_block(kind: EntityKind) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", kind.title()))
}

/// Map a terminal position inside `area` to the data row drawn there.
/// Header, placeholder, borders and empty space map to `None`.
pub(crate) fn row_at(
    area: Rect,
    kind: EntityKind,
    view: &TableView,
    selection: &RowSelection,
    column: u16,
    row: u16,
) -> Option<usize> {
    if view.is_placeholder() {
        return None;
    }
    let inner = table_block(kind).inner(area);
    let first_row_y = inner.y.saturating_add(1);
    if column < inner.x || column >= inner.x + inner.width || row < first_row_y {
        return None;
    }

    let (start, end) = visible_window(selection.cursor(), view.data_len(), row_capacity(inner));
    let index = start + (row - first_row_y) as usize;
    (index < end).then_some(index)
}

/// Draw `view` as a bordered table. The highlighted row gets a light blue
/// background and the cursor row a `▶` marker.
pub(crate) fn draw_table(
    frame: &mut Frame,
    area: Rect,
    kind: EntityKind,
    view: &TableView,
    selection: &RowSelection,
) {
    let block = table_block(kind);

    if view.is_placeholder() {
        let rows = view
            .rows()
            .iter()
            .map(|cells| Row::new(cells.iter().map(|text| Cell::from(text.clone()))));
        let table = Table::new(rows, [Constraint::Fill(1)])
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(table, area);
        return;
    }

    let inner = block.inner(area);
    let (start, end) = visible_window(selection.cursor(), view.data_len(), row_capacity(inner));

    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(
        std::iter::once(Cell::from(""))
            .chain(
                view.header()
                    .unwrap_or_default()
                    .iter()
                    .map(|label| Cell::from(label.clone())),
            ),
    )
    .style(header_style);

    let rows = view.rows()[start..end]
        .iter()
        .enumerate()
        .map(|(offset, cells)| {
            let index = start + offset;
            let marker = if index == selection.cursor() { "▶" } else { "" };
            let mut style = Style::default();
            if selection.highlighted() == Some(index) {
                style = style.bg(Color::LightBlue).fg(Color::Black);
            } else if index == selection.cursor() {
                style = style.fg(Color::Yellow);
            }
            Row::new(
                std::iter::once(Cell::from(marker))
                    .chain(cells.iter().map(|text| Cell::from(text.clone()))),
            )
            .style(style)
        });

    let mut widths = vec![Constraint::Length(MARKER_WIDTH), Constraint::Length(ID_COLUMN_WIDTH)];
    widths.extend((1..view.column_count()).map(|_| Constraint::Fill(1)));

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
