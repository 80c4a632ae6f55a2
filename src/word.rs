/// Keywords of the command language. Any other word is data pushed on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word {
    // --- Context ---
    Table,
    Info,

    // --- Schema ---
    Create,
    Drop,

    // --- Rows ---
    Insert,
    Select,
    Set,
    Del,

    // --- Conditions ---
    Eq,
    Neq,
    Skip,
    Limit,

    // --- File ---
    Load,
    Save,

    // --- Constants ---
    Null,
    Now,
}

impl Word {
    /// Recognizes a keyword. Matching is exact and case-sensitive.
    pub fn parse(word: &str) -> Option<Self> {
        let word = match word {
            "TABLE" => Self::Table,
            "INFO" => Self::Info,
            "CREATE" => Self::Create,
            "DROP" => Self::Drop,
            "INSERT" => Self::Insert,
            "SELECT" => Self::Select,
            "SET" => Self::Set,
            "DEL" => Self::Del,
            "EQ" => Self::Eq,
            "NEQ" => Self::Neq,
            "SKIP" => Self::Skip,
            "LIMIT" => Self::Limit,
            "LOAD" => Self::Load,
            "SAVE" => Self::Save,
            "NULL" => Self::Null,
            "NOW" => Self::Now,
            _ => return None,
        };
        Some(word)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::Info => "INFO",
            Self::Create => "CREATE",
            Self::Drop => "DROP",
            Self::Insert => "INSERT",
            Self::Select => "SELECT",
            Self::Set => "SET",
            Self::Del => "DEL",
            Self::Eq => "EQ",
            Self::Neq => "NEQ",
            Self::Skip => "SKIP",
            Self::Limit => "LIMIT",
            Self::Load => "LOAD",
            Self::Save => "SAVE",
            Self::Null => "NULL",
            Self::Now => "NOW",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords() {
        assert_eq!(Word::parse("TABLE"), Some(Word::Table));
        assert_eq!(Word::parse("SELECT"), Some(Word::Select));
        assert_eq!(Word::parse("NOW"), Some(Word::Now));
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(Word::parse("select"), None);
        assert_eq!(Word::parse("Table"), None);
        assert_eq!(Word::parse("users"), None);
        assert_eq!(Word::parse("*"), None);
    }

    #[test]
    fn test_as_str_round_trips() {
        for word in [
            Word::Table,
            Word::Info,
            Word::Create,
            Word::Drop,
            Word::Insert,
            Word::Select,
            Word::Set,
            Word::Del,
            Word::Eq,
            Word::Neq,
            Word::Skip,
            Word::Limit,
            Word::Load,
            Word::Save,
            Word::Null,
            Word::Now,
        ] {
            assert_eq!(Word::parse(word.as_str()), Some(word));
        }
    }
}
