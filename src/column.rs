use crate::value::{Cell, display_width};

/// A column definition with its cached display width.
#[derive(Debug, Clone)]
pub struct Column {
    /// The name of the column.
    pub name: Cell,
    /// Widest value ever stored in the column, name included, in code points.
    ///
    /// Only grows. Used for alignment when the database is saved.
    pub width: usize,
}

impl Column {
    /// Creates a column whose width is seeded from its own name.
    pub fn new(name: Cell) -> Self {
        let width = display_width(&name);
        Self { name, width }
    }

    /// Widens the column if `value` doesn't fit.
    pub fn widen(&mut self, value: &str) {
        self.width = self.width.max(display_width(value));
    }
}
