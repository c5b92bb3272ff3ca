/// Multi-line compose buffer with a byte-indexed cursor.
///
/// The cursor always sits on a char boundary; every movement snaps back
/// to one, so multi-byte input is safe.
#[derive(Debug, Default)]
pub struct Compose {
    text: String,
    cursor: usize,
}

impl Compose {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True when the buffer trims to nothing; the save action is
    /// disabled in this state.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Empties the buffer and returns what was in it.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn newline(&mut self) {
        self.insert('\n');
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = floor_boundary(&self.text, self.cursor - 1);
        self.text.replace_range(prev..self.cursor, "");
        self.cursor = prev;
    }

    pub fn delete_forward(&mut self) {
        if self.cursor >= self.text.len() {
            return;
        }
        let next = ceil_boundary(&self.text, self.cursor + 1);
        self.text.replace_range(self.cursor..next, "");
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = floor_boundary(&self.text, self.cursor - 1);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = ceil_boundary(&self.text, self.cursor + 1);
        }
    }

    /// Moves to the same column on the previous line, clamped to that
    /// line's length.
    pub fn move_up(&mut self) {
        let line_start = self.line_start();
        if line_start == 0 {
            return;
        }
        let prev_start = self.text[..line_start - 1]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        let prev_len = line_start - 1 - prev_start;
        let column = self.cursor - line_start;
        self.cursor = floor_boundary(&self.text, prev_start + column.min(prev_len));
    }

    /// Moves to the same column on the next line, clamped to that line's
    /// length.
    pub fn move_down(&mut self) {
        let Some(offset) = self.text[self.cursor..].find('\n') else {
            return;
        };
        let column = self.cursor - self.line_start();
        let next_start = self.cursor + offset + 1;
        let next_end = self.text[next_start..]
            .find('\n')
            .map(|i| next_start + i)
            .unwrap_or(self.text.len());
        let next_len = next_end - next_start;
        self.cursor = floor_boundary(&self.text, next_start + column.min(next_len));
    }

    fn line_start(&self) -> usize {
        self.text[..self.cursor]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0)
    }
}

fn floor_boundary(s: &str, mut idx: usize) -> usize {
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_boundary(s: &str, mut idx: usize) -> usize {
    while idx < s.len() && !s.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}
