/// Terminal output context that handles colors and line endings
use crossterm::{QueueableCommand, cursor, terminal, style::{SetForegroundColor, ResetColor, Color}};
use std::io::{self, stdout, Write, Stdout};

pub struct TerminalContext<W: Write = Stdout> {
    out: W,
}

impl TerminalContext<Stdout> {
    pub fn stdout() -> Self {
        Self::new(stdout())
    }
}

impl<W: Write> TerminalContext<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Clear the entire screen and position cursor
    pub fn clear_screen(&mut self) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    /// Print a line with a carriage return so it also renders in raw mode
    pub fn print_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}\r", text)
    }

    /// Print colored text with automatic reset
    pub fn print_colored(&mut self, text: &str, color: TerminalColor) -> io::Result<()> {
        self.out.queue(SetForegroundColor(color.into()))?;
        write!(self.out, "{}", text)?;
        self.out.queue(ResetColor)?;
        Ok(())
    }

    /// Print a colored line
    pub fn print_colored_line(&mut self, text: &str, color: TerminalColor) -> io::Result<()> {
        self.print_colored(text, color)?;
        self.print_line("")
    }

    pub fn empty_line(&mut self) -> io::Result<()> {
        self.print_line("")
    }

    /// Print text without newline
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}", text)
    }

    /// Flush all output at once - call this at the end of each screen
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TerminalColor {
    Red,
    Green,
    Yellow,
    Cyan,
}

impl From<TerminalColor> for Color {
    fn from(color: TerminalColor) -> Self {
        match color {
            TerminalColor::Red => Color::Red,
            TerminalColor::Green => Color::Green,
            TerminalColor::Yellow => Color::Yellow,
            TerminalColor::Cyan => Color::Cyan,
        }
    }
}
