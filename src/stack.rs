use std::borrow::Cow;

use crate::error::{Error, Result};

/// Bounded LIFO of words waiting for a keyword to consume them.
///
/// Words typed in the command are borrowed from it. Words produced by a
/// keyword (like the current date) are owned by the stack and die with the
/// command, so nothing here outlives the command that pushed it.
#[derive(Debug)]
pub struct Stack<'a> {
    words: Vec<Cow<'a, str>>,
    capacity: usize,
}

impl<'a> Stack<'a> {
    pub fn new(capacity: usize) -> Self {
        Self {
            words: Vec::new(),
            capacity,
        }
    }

    /// Pushes a word.
    ///
    /// # Errors
    /// Returns [Error::StackOverflow] when the stack already holds `capacity` words.
    pub fn push(&mut self, word: impl Into<Cow<'a, str>>) -> Result<()> {
        if self.words.len() >= self.capacity {
            return Err(Error::StackOverflow {
                capacity: self.capacity,
            });
        }
        self.words.push(word.into());
        Ok(())
    }

    /// Pops the most recent word, `None` meaning the operand is missing.
    pub fn pop(&mut self) -> Option<Cow<'a, str>> {
        self.words.pop()
    }

    /// Pops every word and returns them in the order they were pushed.
    pub fn drain_pushed_order(&mut self) -> Vec<Cow<'a, str>> {
        let mut words = Vec::with_capacity(self.words.len());
        while let Some(word) = self.pop() {
            words.push(word);
        }
        words.reverse();
        words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_lifo() {
        let mut stack = Stack::new(4);
        stack.push("a").unwrap();
        stack.push(String::from("b")).unwrap();

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop().as_deref(), Some("b"));
        assert_eq!(stack.pop().as_deref(), Some("a"));
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_overflow_is_an_error() {
        let mut stack = Stack::new(1);
        stack.push("a").unwrap();

        let err = stack.push("b").unwrap_err();
        assert!(matches!(err, Error::StackOverflow { capacity: 1 }));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_drain_keeps_push_order() {
        let mut stack = Stack::new(8);
        for word in ["x", "y", "z"] {
            stack.push(word).unwrap();
        }

        let words = stack.drain_pushed_order();
        assert_eq!(words, vec!["x", "y", "z"]);
        assert!(stack.is_empty());
    }
}
