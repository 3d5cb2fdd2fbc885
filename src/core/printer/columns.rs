//! Alignment cells for column-aligned printing.
//!
//! Leaf statements expose their text as an ordered row of [`Aligned`]
//! cells. The printer collects compatible consecutive rows into a
//! block, takes the maximum width per column position, and pads each
//! cell to its column width according to its alignment mode.

use crate::core::parser::ast::{
    EnumValue, FieldDecl, FieldLabel, Import, ImportKind, MapFieldDecl,
    ProtoOption,
};

/// How a cell is padded within its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Pad on the right.
    Left,
    /// Pad on the left.
    Right,
    /// Split the padding on both sides.
    Center,
    /// Never padded; rendered verbatim.
    None,
}

/// One cell of a printable row.
#[derive(Debug, Clone)]
pub struct Aligned {
    text: String,
    alignment: Alignment,
}

impl Aligned {
    /// A left-aligned cell.
    pub fn left(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alignment: Alignment::Left,
        }
    }

    /// A right-aligned cell.
    pub fn right(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alignment: Alignment::Right,
        }
    }

    /// A centered cell.
    pub fn center(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alignment: Alignment::Center,
        }
    }

    /// An unpadded cell.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alignment: Alignment::None,
        }
    }

    /// Width of the cell text in characters.
    #[must_use]
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }

    /// Render the cell padded to the column width.
    #[must_use]
    pub fn render(&self, width: usize) -> String {
        let len = self.width();
        let pad = width.saturating_sub(len);
        match self.alignment {
            Alignment::Left => format!("{}{}", self.text, " ".repeat(pad)),
            Alignment::Right => format!("{}{}", " ".repeat(pad), self.text),
            Alignment::Center => {
                let before = pad / 2;
                let after = pad - before;
                format!(
                    "{}{}{}",
                    " ".repeat(before),
                    self.text,
                    " ".repeat(after)
                )
            }
            Alignment::None => self.text.clone(),
        }
    }
}

/// Leaf statements that print as an alignable row of cells.
pub trait Columns {
    /// The row, terminator included.
    fn columns(&self) -> Vec<Aligned>;
}

fn embedded_list(options: &[ProtoOption]) -> String {
    let rendered: Vec<String> = options
        .iter()
        .map(|o| format!("{} = {}", o.name, o.value))
        .collect();
    format!(" [{}]", rendered.join(", "))
}

impl Columns for EnumValue {
    fn columns(&self) -> Vec<Aligned> {
        let mut cells = vec![
            Aligned::left(&self.name),
            Aligned::center(" = "),
            Aligned::right(self.integer.to_string()),
        ];
        if let Some(option) = &self.value_option {
            cells.push(Aligned::raw(" ["));
            cells.push(Aligned::left(&option.name));
            cells.push(Aligned::center(" = "));
            cells.push(Aligned::raw(format!("{}]", option.value)));
        }
        cells.push(Aligned::raw(";"));
        cells
    }
}

impl Columns for FieldDecl {
    fn columns(&self) -> Vec<Aligned> {
        let mut cells = Vec::new();
        if self.label != FieldLabel::Unlabeled {
            cells.push(Aligned::left(format!("{} ", self.label.keyword())));
        }
        cells.push(Aligned::left(&self.type_name));
        cells.push(Aligned::raw(" "));
        cells.push(Aligned::left(&self.name));
        cells.push(Aligned::center(" = "));
        cells.push(Aligned::right(self.sequence.to_string()));
        if !self.options.is_empty() {
            cells.push(Aligned::raw(embedded_list(&self.options)));
        }
        cells.push(Aligned::raw(";"));
        cells
    }
}

impl Columns for MapFieldDecl {
    fn columns(&self) -> Vec<Aligned> {
        let mut cells = vec![
            Aligned::left(format!(
                "map<{}, {}>",
                self.key_type, self.value_type
            )),
            Aligned::raw(" "),
            Aligned::left(&self.name),
            Aligned::center(" = "),
            Aligned::right(self.sequence.to_string()),
        ];
        if !self.options.is_empty() {
            cells.push(Aligned::raw(embedded_list(&self.options)));
        }
        cells.push(Aligned::raw(";"));
        cells
    }
}

impl Columns for ProtoOption {
    fn columns(&self) -> Vec<Aligned> {
        vec![
            Aligned::raw("option "),
            Aligned::left(&self.name),
            Aligned::center(" = "),
            Aligned::raw(self.value.to_string()),
            Aligned::raw(";"),
        ]
    }
}

impl Columns for Import {
    fn columns(&self) -> Vec<Aligned> {
        let mut cells = vec![Aligned::raw("import ")];
        // plain imports omit the modifier cell, so they align only
        // with each other, not against modified imports
        match self.kind {
            ImportKind::Default => {}
            ImportKind::Weak => cells.push(Aligned::left("weak ")),
            ImportKind::Public => cells.push(Aligned::left("public ")),
        }
        cells.push(Aligned::raw(format!("\"{}\"", self.filename)));
        cells.push(Aligned::raw(";"));
        cells
    }
}

/// Render one row, padding each cell to its column width. Trailing
/// whitespace is trimmed so right-padded final cells stay clean.
#[must_use]
pub fn render_row(cells: &[Aligned], widths: &[usize]) -> String {
    let mut row = String::new();
    for (i, cell) in cells.iter().enumerate() {
        let width = widths.get(i).copied().unwrap_or(0);
        row.push_str(&cell.render(width));
    }
    row.truncate(row.trim_end().len());
    row
}

/// Per-position maximum widths across a block of rows.
#[must_use]
pub fn column_widths(rows: &[Vec<Aligned>]) -> Vec<usize> {
    let count = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; count];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scanner::Position;

    #[test]
    fn alignment_padding() {
        assert_eq!(Aligned::left("ab").render(4), "ab  ");
        assert_eq!(Aligned::right("ab").render(4), "  ab");
        assert_eq!(Aligned::center("ab").render(5), " ab  ");
        assert_eq!(Aligned::raw("ab").render(4), "ab");
    }

    #[test]
    fn enum_value_row_shape() {
        let mut value = EnumValue::new(Position::new(1, 1, 0));
        value.name = "NORTH".into();
        value.integer = 0;
        let cells = value.columns();
        assert_eq!(cells.len(), 4);
        let widths = column_widths(&[cells.clone()]);
        assert_eq!(render_row(&cells, &widths), "NORTH = 0;");
    }

    #[test]
    fn block_aligns_names_and_integers() {
        let mut a = EnumValue::new(Position::new(1, 1, 0));
        a.name = "NORTH".into();
        a.integer = 0;
        let mut b = EnumValue::new(Position::new(2, 1, 0));
        b.name = "EAST".into();
        b.integer = 10;
        let rows = vec![a.columns(), b.columns()];
        let widths = column_widths(&rows);
        assert_eq!(render_row(&rows[0], &widths), "NORTH =  0;");
        assert_eq!(render_row(&rows[1], &widths), "EAST  = 10;");
    }
}
