use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::stack::Stack;

/// State of one command. Created when the command starts, dropped when it ends.
#[derive(Debug)]
pub struct QueryContext<'a> {
    pub stack: Stack<'a>,
    /// Table name given to `TABLE`, kept even when no such table exists.
    pub requested: Option<Cow<'a, str>>,
    /// Catalog position of the requested table, if it exists.
    pub selected: Option<usize>,
    pub filter: Filter<'a>,
    pub skip: usize,
    pub limit: Option<usize>,
}

impl<'a> QueryContext<'a> {
    pub fn new(stack_capacity: usize) -> Self {
        Self {
            stack: Stack::new(stack_capacity),
            requested: None,
            selected: None,
            filter: Filter::default(),
            skip: 0,
            limit: None,
        }
    }

    /// Records the requested table and its position, dropping any filter
    /// built for the previous table.
    pub fn select(&mut self, name: Cow<'a, str>, selected: Option<usize>, columns: usize) {
        self.requested = Some(name);
        self.selected = selected;
        self.filter = Filter::new(columns);
    }

    /// Position of the selected table.
    ///
    /// # Errors
    /// Fails when no table was requested or the requested one doesn't exist.
    pub fn selected_table(&self) -> Result<usize> {
        match (self.selected, &self.requested) {
            (Some(idx), _) => Ok(idx),
            (None, Some(name)) => Err(Error::TableNotFound(name.to_string())),
            (None, None) => Err(Error::MissingTableName),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_selected() {
        let ctx = QueryContext::new(8);
        assert!(matches!(ctx.selected_table(), Err(Error::MissingTableName)));
    }

    #[test]
    fn test_requested_but_missing() {
        let mut ctx = QueryContext::new(8);
        ctx.select("ghost".into(), None, 0);
        assert!(matches!(
            ctx.selected_table(),
            Err(Error::TableNotFound(name)) if name == "ghost"
        ));
    }

    #[test]
    fn test_select_resets_filter() {
        let mut ctx = QueryContext::new(8);
        ctx.select("a".into(), Some(0), 2);
        ctx.filter.set_eq(1, "x".into());
        assert!(!ctx.filter.is_empty());

        ctx.select("b".into(), Some(1), 3);
        assert!(ctx.filter.is_empty());
        assert_eq!(ctx.selected_table().unwrap(), 1);
    }
}
