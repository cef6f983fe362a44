/// Single-line query buffer with a caret, measured in chars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    text: String,
    caret: usize,
}

impl QueryInput {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.chars().count();
        QueryInput { text, caret }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Text left of the caret, used to place the terminal cursor.
    pub fn before_caret(&self) -> &str {
        &self.text[..self.byte_offset(self.caret)]
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.caret);
        self.text.insert(at, c);
        self.caret += 1;
    }

    pub fn backspace(&mut self) {
        if self.caret == 0 {
            return;
        }
        self.caret -= 1;
        let at = self.byte_offset(self.caret);
        self.text.remove(at);
    }

    pub fn delete(&mut self) {
        if self.caret < self.len() {
            let at = self.byte_offset(self.caret);
            self.text.remove(at);
        }
    }

    /// Removes the word before the caret along with any whitespace after it.
    pub fn delete_word(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut start = self.caret;
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let from = self.byte_offset(start);
        let to = self.byte_offset(self.caret);
        self.text.replace_range(from..to, "");
        self.caret = start;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.caret = 0;
    }

    pub fn left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.caret = (self.caret + 1).min(self.len());
    }

    pub fn home(&mut self) {
        self.caret = 0;
    }

    pub fn end(&mut self) {
        self.caret = self.len();
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, caret: usize) -> usize {
        self.text
            .char_indices()
            .nth(caret)
            .map_or(self.text.len(), |(i, _)| i)
    }
}
