//! Placeholder rendering

use config::PlaceholderStyle;

/// Hands out placeholders for one statement, numbering them in order
#[derive(Debug, Clone)]
pub struct Placeholders {
    style: PlaceholderStyle,
    param_counter: usize,
}

impl Placeholders {
    pub fn new(style: PlaceholderStyle) -> Self {
        Self {
            style,
            param_counter: 1,
        }
    }

    /// Placeholder for the next value, bound to `column`
    pub fn next(&mut self, column: &str) -> String {
        let placeholder = match self.style {
            PlaceholderStyle::Question => "?".to_string(),
            PlaceholderStyle::Numbered => format!("?{}", self.param_counter),
            PlaceholderStyle::Named => format!(":{}", column),
        };
        self.param_counter += 1;
        placeholder
    }

    /// Number of placeholders handed out so far
    pub fn count(&self) -> usize {
        self.param_counter - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles() {
        let mut question = Placeholders::new(PlaceholderStyle::Question);
        assert_eq!(question.next("a"), "?");
        assert_eq!(question.next("b"), "?");

        let mut numbered = Placeholders::new(PlaceholderStyle::Numbered);
        assert_eq!(numbered.next("a"), "?1");
        assert_eq!(numbered.next("b"), "?2");
        assert_eq!(numbered.count(), 2);

        let mut named = Placeholders::new(PlaceholderStyle::Named);
        assert_eq!(named.next("email"), ":email");
    }
}
