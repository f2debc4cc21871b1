//! Character display trait

/// Number of text lines
pub const LCD_LINES: u8 = 2;

/// Characters per line
pub const LCD_COLUMNS: u8 = 16;

/// Two-line character display
pub trait CharDisplay {
    /// Write `text` starting at `column` of `line`
    ///
    /// Characters running past the end of the line are dropped.
    fn write_at(&mut self, line: u8, column: u8, text: &[u8]);
}
