use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event},
    style::Print,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand, QueueableCommand,
};

use super::navigation::NavKey;
use super::surface::{clip, Region, Surface};

/// Full-screen crossterm surface. Raw mode and the alternate screen are
/// released when the value is dropped, including when setup fails halfway.
pub struct TerminalSurface<W: Write = Stdout> {
    out: W,
    raw_mode: bool,
}

impl TerminalSurface<Stdout> {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut surface = Self {
            out: io::stdout(),
            raw_mode: true,
        };
        surface.prepare_screen()?;
        Ok(surface)
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Switches to the alternate screen, hides the cursor and clears.
    fn prepare_screen(&mut self) -> io::Result<()> {
        self.out.execute(EnterAlternateScreen)?;
        self.out.execute(cursor::Hide)?;
        self.out.execute(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn put(&mut self, region: Region, row: u16, col: u16, text: &str) -> io::Result<()> {
        if row >= region.height {
            return Ok(());
        }
        let text = clip(region, col, text);
        if text.is_empty() {
            return Ok(());
        }
        self.out
            .queue(cursor::MoveTo(region.left + col, region.top + row))?
            .queue(Print(text))?;
        Ok(())
    }
}

impl<W: Write> Drop for TerminalSurface<W> {
    fn drop(&mut self) {
        self.out.execute(cursor::Show).ok();
        self.out.execute(LeaveAlternateScreen).ok();
        if self.raw_mode {
            terminal::disable_raw_mode().ok();
        }
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn clear(&mut self, region: Region) -> io::Result<()> {
        let blank = " ".repeat(usize::from(region.width));
        for row in 0..region.height {
            self.put(region, row, 0, &blank)?;
        }
        Ok(())
    }

    fn draw_frame(&mut self, region: Region, title: Option<&str>) -> io::Result<()> {
        if region.height < 2 || region.width < 2 {
            return Ok(());
        }
        let span = "─".repeat(usize::from(region.inner_width()));
        self.put(region, 0, 0, &format!("┌{span}┐"))?;
        for row in 1..region.height - 1 {
            self.put(region, row, 0, "│")?;
            self.put(region, row, region.width - 1, "│")?;
        }
        self.put(region, region.height - 1, 0, &format!("└{span}┘"))?;
        if let Some(title) = title.filter(|title| !title.is_empty()) {
            let half = u16::try_from(title.chars().count() / 2).unwrap_or(u16::MAX);
            let col = (region.width / 2).saturating_sub(half).max(1);
            self.put(region, 0, col, title)?;
        }
        Ok(())
    }

    fn print_at(&mut self, region: Region, row: u16, col: u16, text: &str) -> io::Result<()> {
        self.put(region, row, col, text)
    }

    fn read_key(&mut self) -> io::Result<NavKey> {
        loop {
            if let Event::Key(key) = event::read()? {
                if let Some(nav) = NavKey::from_event(key) {
                    return Ok(nav);
                }
            }
        }
    }

    fn read_line(
        &mut self,
        region: Region,
        row: u16,
        col: u16,
        max_len: usize,
    ) -> io::Result<Option<String>> {
        let mut buffer = String::new();
        self.set_cursor_visible(true)?;
        let result = loop {
            let shown = u16::try_from(buffer.chars().count()).unwrap_or(u16::MAX);
            self.out.queue(cursor::MoveTo(
                region.left + col.saturating_add(shown),
                region.top + row,
            ))?;
            self.flush()?;
            match self.read_key()? {
                NavKey::Enter => break Some(buffer),
                NavKey::Esc | NavKey::Interrupt => break None,
                NavKey::Backspace => {
                    if buffer.pop().is_some() {
                        let at = u16::try_from(buffer.chars().count()).unwrap_or(u16::MAX);
                        self.put(region, row, col.saturating_add(at), " ")?;
                    }
                }
                NavKey::Char(c) if buffer.chars().count() < max_len => {
                    self.put(region, row, col.saturating_add(shown), &c.to_string())?;
                    buffer.push(c);
                }
                _ => {}
            }
        };
        self.set_cursor_visible(false)?;
        Ok(result)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            self.out.queue(cursor::Show)?;
        } else {
            self.out.queue(cursor::Hide)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
