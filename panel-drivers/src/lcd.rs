//! Character LCD shadow and the error log view

use panel_core::diag::ErrorLog;
use panel_core::traits::{CharDisplay, LCD_COLUMNS, LCD_LINES};
use panel_protocol::hex;

const COLUMNS: usize = LCD_COLUMNS as usize;
const LINES: usize = LCD_LINES as usize;

/// In-memory copy of the two LCD lines
///
/// The firmware prints it whenever it changed.
pub struct LcdShadow {
    lines: [[u8; COLUMNS]; LINES],
    dirty: bool,
}

impl Default for LcdShadow {
    fn default() -> Self {
        Self::new()
    }
}

impl LcdShadow {
    pub const fn new() -> Self {
        Self {
            lines: [[b' '; COLUMNS]; LINES],
            dirty: false,
        }
    }

    pub fn line(&self, line: u8) -> &[u8] {
        self.lines
            .get(line as usize)
            .map(|l| l.as_slice())
            .unwrap_or(&[])
    }

    /// Line as text; non-ASCII content renders empty
    pub fn line_str(&self, line: u8) -> &str {
        core::str::from_utf8(self.line(line)).unwrap_or("")
    }

    /// Consume the changed flag
    pub fn take_dirty(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }
}

impl CharDisplay for LcdShadow {
    fn write_at(&mut self, line: u8, column: u8, text: &[u8]) {
        let Some(row) = self.lines.get_mut(line as usize) else {
            return;
        };
        let start = (column as usize).min(COLUMNS);
        let len = text.len().min(COLUMNS - start);
        row[start..start + len].copy_from_slice(&text[..len]);
        self.dirty |= len > 0;
    }
}

/// Renders logged faults onto the LCD, four per line
///
/// Each record is shown as four hex digits: object and code in the first
/// byte, raw status in the second.
#[derive(Default)]
pub struct ErrorView {
    shown: usize,
}

/// Characters per rendered record
const RECORD_WIDTH: usize = 4;

impl ErrorView {
    pub const fn new() -> Self {
        Self { shown: 0 }
    }

    /// Records drawn by the last run
    pub fn shown(&self) -> usize {
        self.shown
    }

    /// Redraw both lines from the log; called from the 1000 ms tier
    pub fn run<const N: usize>(&mut self, log: &ErrorLog<N>, lcd: &mut dyn CharDisplay) {
        let mut lines = [[b' '; COLUMNS]; LINES];
        let per_line = COLUMNS / RECORD_WIDTH;

        self.shown = 0;
        for (i, record) in log.iter().take(per_line * LINES).enumerate() {
            let col = (i % per_line) * RECORD_WIDTH;
            let row = &mut lines[i / per_line];
            row[col..col + 2].copy_from_slice(&hex::encode_byte(record.tag()));
            row[col + 2..col + 4].copy_from_slice(&hex::encode_byte(record.status));
            self.shown += 1;
        }

        for (line, text) in lines.iter().enumerate() {
            lcd.write_at(line as u8, 0, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_core::diag::{ErrorRecord, ErrorSink, ObjectId};

    #[test]
    fn test_write_at() {
        let mut lcd = LcdShadow::new();
        assert!(!lcd.take_dirty());
        lcd.write_at(1, 3, b"ok");
        assert_eq!(lcd.line_str(1), "   ok           ");
        assert!(lcd.take_dirty());
        assert!(!lcd.take_dirty());
    }

    #[test]
    fn test_write_clips_at_line_end() {
        let mut lcd = LcdShadow::new();
        lcd.write_at(0, 15, b"xy");
        assert_eq!(lcd.line(0)[15], b'x');
        lcd.write_at(5, 0, b"zz");
        lcd.write_at(0, 20, b"zz");
        assert_eq!(lcd.line_str(0), "               x");
    }

    #[test]
    fn test_error_view_layout() {
        let mut log: ErrorLog = ErrorLog::new();
        log.push(ErrorRecord::new(ObjectId::Bus, 0xA, 0x20));
        log.push(ErrorRecord::new(ObjectId::Display, 0x1, 0x00));

        let mut lcd = LcdShadow::new();
        let mut view = ErrorView::new();
        view.run(&log, &mut lcd);

        assert_eq!(view.shown(), 2);
        assert_eq!(lcd.line_str(0), "1A202100        ");
        assert_eq!(lcd.line_str(1), "                ");
    }

    #[test]
    fn test_error_view_wraps_to_second_line() {
        let mut log: ErrorLog<8> = ErrorLog::new();
        for code in 1..=6 {
            log.push(ErrorRecord::new(ObjectId::Bus, code, 0xF8));
        }

        let mut lcd = LcdShadow::new();
        let mut view = ErrorView::new();
        view.run(&log, &mut lcd);

        assert_eq!(lcd.line_str(0), "11F812F813F814F8");
        assert_eq!(lcd.line_str(1), "15F816F8        ");
    }

    #[test]
    fn test_error_view_clears_old_records() {
        let mut log: ErrorLog = ErrorLog::new();
        log.push(ErrorRecord::new(ObjectId::Bus, 1, 0));
        let mut lcd = LcdShadow::new();
        let mut view = ErrorView::new();
        view.run(&log, &mut lcd);

        log.clear();
        view.run(&log, &mut lcd);
        assert_eq!(view.shown(), 0);
        assert_eq!(lcd.line_str(0), "                ");
    }
}
