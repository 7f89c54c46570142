use std::{collections::VecDeque, io};

use super::navigation::NavKey;
use super::surface::{Region, Surface};

pub const CONSOLE_TITLE: &str = "|Terminal|";
const PROMPT: &str = "> ";
const HISTORY_LIMIT: usize = 500;

/// Scrolling message pane with a one-line input row at the bottom.
#[derive(Debug, Clone)]
pub struct Console {
    region: Region,
    lines: VecDeque<String>,
}

impl Console {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            lines: VecDeque::new(),
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Longest answer the input row can show.
    pub fn input_capacity(&self) -> usize {
        usize::from(self.region.width.saturating_sub(4))
    }

    /// Appends `message`, wrapping it to the pane width.
    pub fn push(&mut self, message: impl AsRef<str>) {
        let width = usize::from(self.region.inner_width()).max(1);
        for raw_line in message.as_ref().lines() {
            let chars: Vec<char> = raw_line.chars().collect();
            if chars.is_empty() {
                self.lines.push_back(String::new());
            }
            for chunk in chars.chunks(width) {
                self.lines.push_back(chunk.iter().collect());
            }
        }
        while self.lines.len() > HISTORY_LIMIT {
            self.lines.pop_front();
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) -> io::Result<()> {
        let region = self.region;
        surface.clear(region)?;
        let log_rows = usize::from(region.height.saturating_sub(3));
        let skip = self.lines.len().saturating_sub(log_rows);
        for (offset, line) in self.lines.iter().skip(skip).enumerate() {
            let row = u16::try_from(offset + 1).unwrap_or(u16::MAX);
            surface.print_at(region, row, 1, line)?;
        }
        surface.draw_frame(region, Some(CONSOLE_TITLE))?;
        surface.flush()
    }

    /// Echoes `question`, then reads a line on the input row. `None` means cancelled.
    pub fn ask_line(
        &mut self,
        surface: &mut dyn Surface,
        question: &str,
        max_len: usize,
    ) -> io::Result<Option<String>> {
        self.push(question);
        self.draw_prompt(surface)?;
        let limit = max_len.min(self.input_capacity()).max(1);
        let answer = surface.read_line(self.region, self.input_row(), 3, limit)?;
        if let Some(text) = &answer {
            self.push(text);
        }
        self.draw(surface)?;
        Ok(answer)
    }

    /// Echoes `question`, then reads a single key.
    pub fn ask_key(&mut self, surface: &mut dyn Surface, question: &str) -> io::Result<NavKey> {
        self.push(question);
        self.draw_prompt(surface)?;
        let key = surface.read_key()?;
        self.push(key.to_string());
        self.draw(surface)?;
        Ok(key)
    }

    fn input_row(&self) -> u16 {
        self.region.height.saturating_sub(2)
    }

    fn draw_prompt(&self, surface: &mut dyn Surface) -> io::Result<()> {
        self.draw(surface)?;
        surface.print_at(self.region, self.input_row(), 1, PROMPT)?;
        surface.flush()
    }
}
