/// Splits a command into words.
///
/// Words are separated by spaces or newlines. A word starting with `'` or `"`
/// runs until the matching quote or the end of the line, so it may contain
/// spaces. Quotes can't be escaped and words are never unescaped: the tokenizer
/// only hands out slices of the command it was given.
pub struct Tokenizer<'a> {
    /// The command being split.
    input: &'a str,
    /// Byte offset of the cursor in `input`.
    position: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new Tokenizer for the given command.
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Processes the entire input and returns every word in order.
    ///
    /// # Example
    /// ```
    /// # use stackdb::tokenizer::Tokenizer;
    /// let words = Tokenizer::new("'Ada Lovelace' name INSERT").tokenize();
    /// assert_eq!(words, vec!["Ada Lovelace", "name", "INSERT"]);
    /// ```
    pub fn tokenize(&mut self) -> Vec<&'a str> {
        self.collect()
    }

    /// Returns the next word, or `None` once only whitespace is left.
    fn next_token(&mut self) -> Option<&'a str> {
        self.skip_whitespace();

        if self.is_at_end() {
            return None;
        }

        let terminator = match self.current_byte() {
            quote @ (b'"' | b'\'') => {
                self.advance(); // Skip the opening quote
                quote
            }
            _ => b' ',
        };

        let start = self.position;
        while !self.is_at_end()
            && self.current_byte() != b'\n'
            && self.current_byte() != terminator
        {
            self.advance();
        }

        // Terminators are ASCII so both ends fall on char boundaries.
        let word = &self.input[start..self.position];

        if !self.is_at_end() {
            self.advance(); // Skip the terminator
        }

        Some(word)
    }

    // --- Navigation Helpers ---

    fn current_byte(&self) -> u8 {
        self.input.as_bytes()[self.position]
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Consumes spaces and every control byte (tabs, newlines, ...).
    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_byte() <= b' ' {
            self.advance();
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple() {
        let words = Tokenizer::new("aaa TABLE col1 col2 CREATE").tokenize();
        assert_eq!(words, vec!["aaa", "TABLE", "col1", "col2", "CREATE"]);
    }

    #[test]
    fn test_tokenize_extra_whitespace() {
        let words = Tokenizer::new("  \t aaa   TABLE\n\nINFO \r\n").tokenize();
        assert_eq!(words, vec!["aaa", "TABLE", "INFO"]);
    }

    #[test]
    fn test_tab_does_not_split_words() {
        let words = Tokenizer::new("a\tb c").tokenize();
        assert_eq!(words, vec!["a\tb", "c"]);
    }

    #[test]
    fn test_tokenize_quoted() {
        let words = Tokenizer::new(r#"'Bob Dylan' name "it's fine" note"#).tokenize();
        assert_eq!(words, vec!["Bob Dylan", "name", "it's fine", "note"]);
    }

    #[test]
    fn test_unterminated_quote_stops_at_line_end() {
        let words = Tokenizer::new("'open ended\nnext").tokenize();
        assert_eq!(words, vec!["open ended", "next"]);

        let words = Tokenizer::new("\"to the end").tokenize();
        assert_eq!(words, vec!["to the end"]);
    }

    #[test]
    fn test_empty_quoted_word() {
        let words = Tokenizer::new("'' col").tokenize();
        assert_eq!(words, vec!["", "col"]);
    }

    #[test]
    fn test_multibyte_words() {
        let words = Tokenizer::new("zażółć 'gęślą jaźń'").tokenize();
        assert_eq!(words, vec!["zażółć", "gęślą jaźń"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(Tokenizer::new("").tokenize().is_empty());
        assert!(Tokenizer::new(" \n\t ").tokenize().is_empty());
    }
}
