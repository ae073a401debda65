//! Thin terminal-writing layer: takes what [`crate::renderer`] produced and
//! gets it on screen via `crossterm`. Keeps all direct terminal I/O behind
//! one seam so `Reedline` itself never imports `crossterm::cursor`/`style`.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Print, ResetColor, SetAttribute, Attribute},
    terminal::{self, Clear, ClearType},
};

use crate::renderer::RenderedFrame;

pub struct Painter<W: Write> {
    stdout: W,
    terminal_width: u16,
    terminal_height: u16,
    /// Row the prompt started on, used to know how far to scroll back up
    /// when repainting after the buffer grows past one line.
    prompt_start_row: u16,
}

impl<W: Write> Painter<W> {
    pub fn new(stdout: W) -> Self {
        Self {
            stdout,
            terminal_width: 80,
            terminal_height: 24,
            prompt_start_row: 0,
        }
    }

    pub fn init_terminal_size(&mut self) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        self.terminal_width = width;
        self.terminal_height = height;
        Ok(())
    }

    pub fn initialize_prompt_position(&mut self) -> io::Result<()> {
        let (_, row) = cursor::position()?;
        self.prompt_start_row = row;
        Ok(())
    }

    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.terminal_height = height;
    }

    pub fn terminal_width(&self) -> usize {
        self.terminal_width as usize
    }

    pub fn terminal_height(&self) -> usize {
        self.terminal_height as usize
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        queue!(self.stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        self.flush()
    }

    pub fn print_crlf(&mut self) -> io::Result<()> {
        queue!(self.stdout, Print("\r\n"))
    }

    /// Clears from the cursor to the end of the current line - used before
    /// repainting a line that may have shrunk.
    pub fn clear_until_newline(&mut self) -> io::Result<()> {
        queue!(self.stdout, Clear(ClearType::UntilNewLine))
    }

    /// Writes a fully rendered frame: moves back to the prompt's start
    /// row, clears downward, and prints the new content.
    pub fn paint(&mut self, frame: &RenderedFrame) -> io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(0, self.prompt_start_row),
            Clear(ClearType::FromCursorDown),
            Print(&frame.line),
        )?;
        if let Some(help) = &frame.help_box {
            queue!(self.stdout, Print("\r\n"), Print(help))?;
        }
        if let Some(popup) = &frame.completion_box {
            queue!(self.stdout, Print("\r\n"), Print(popup))?;
        }
        self.flush()
    }

    pub fn paint_line(&mut self, msg: &str) -> io::Result<()> {
        queue!(self.stdout, Print(msg))?;
        self.flush()
    }

    /// Resets any lingering SGR attributes - called on engine shutdown so a
    /// crash mid-render doesn't leave the user's shell colored.
    pub fn reset_attributes(&mut self) -> io::Result<()> {
        queue!(self.stdout, SetAttribute(Attribute::Reset), ResetColor)?;
        self.flush()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_writes_line_and_boxes_to_the_buffer() {
        let mut buf: Vec<u8> = Vec::new();
        let mut painter = Painter::new(&mut buf);
        let frame = RenderedFrame {
            line: "> echo hi".to_string(),
            completion_box: Some("  a\n  b".to_string()),
            help_box: None,
        };
        painter.paint(&frame).unwrap();
        let written = String::from_utf8(buf).unwrap();
        assert!(written.contains("echo hi"));
        assert!(written.contains("  a"));
    }
}
