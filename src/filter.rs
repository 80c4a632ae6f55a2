use std::borrow::Cow;

use bitvec::prelude::*;

use crate::table::{Row, Table};
use crate::value::normalize;

/// Equality and inequality constraints on the selected table, by column position.
///
/// Built by `EQ` and `NEQ` and read by `SELECT`, `SET` and `DEL` within the
/// same command.
#[derive(Debug, Default)]
pub struct Filter<'a> {
    eq: Vec<Option<Cow<'a, str>>>,
    neq: Vec<Option<Cow<'a, str>>>,
}

impl<'a> Filter<'a> {
    /// Creates an empty filter for a table of `columns` columns.
    pub fn new(columns: usize) -> Self {
        Self {
            eq: vec![None; columns],
            neq: vec![None; columns],
        }
    }

    /// Keeps only rows whose `col_idx` cell equals `value`.
    pub fn set_eq(&mut self, col_idx: usize, value: Cow<'a, str>) {
        self.eq[col_idx] = Some(value);
    }

    /// Keeps only rows whose `col_idx` cell differs from `value`.
    pub fn set_neq(&mut self, col_idx: usize, value: Cow<'a, str>) {
        self.neq[col_idx] = Some(value);
    }

    pub fn is_empty(&self) -> bool {
        self.eq.iter().chain(&self.neq).all(Option::is_none)
    }

    /// Checks a row against every constraint. An empty filter matches everything.
    pub fn matches(&self, row: &Row) -> bool {
        row.cells.iter().enumerate().all(|(i, cell)| {
            let eq_ok = match self.eq.get(i) {
                Some(Some(value)) => **cell == *normalize(value),
                _ => true,
            };
            let neq_ok = match self.neq.get(i) {
                Some(Some(value)) => **cell != *normalize(value),
                _ => true,
            };
            eq_ok && neq_ok
        })
    }

    /// One bit per row of `table`, set for rows the filter keeps.
    pub fn mask(&self, table: &Table) -> BitVec {
        table.rows().iter().map(|row| self.matches(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Cell, NULL};

    fn table() -> Table {
        let mut table = Table::new("t", &["name", "age"], 32).unwrap();
        for (name, age) in [("Ada", "36"), ("Bob", NULL), ("Cyd", "36")] {
            table.insert(vec![Cell::from(name), Cell::from(age)]).unwrap();
        }
        table
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = Filter::new(2);
        assert!(filter.is_empty());
        assert_eq!(filter.mask(&table()), bitvec![1, 1, 1]);
    }

    #[test]
    fn test_eq() {
        let mut filter = Filter::new(2);
        filter.set_eq(1, "36".into());
        assert!(!filter.is_empty());
        assert_eq!(filter.mask(&table()), bitvec![1, 0, 1]);
    }

    #[test]
    fn test_neq() {
        let mut filter = Filter::new(2);
        filter.set_neq(0, "Ada".into());
        assert_eq!(filter.mask(&table()), bitvec![0, 1, 1]);
    }

    #[test]
    fn test_eq_and_neq_combine() {
        let mut filter = Filter::new(2);
        filter.set_eq(1, "36".into());
        filter.set_neq(0, "Ada".into());
        assert_eq!(filter.mask(&table()), bitvec![0, 0, 1]);
    }

    #[test]
    fn test_null_and_empty_value() {
        let mut filter = Filter::new(2);
        filter.set_eq(1, "".into());
        assert_eq!(filter.mask(&table()), bitvec![0, 1, 0]);
    }
}
