//! Scripted surface used by tests and by the binary's script mode.

use std::{collections::VecDeque, env, io};

use super::navigation::NavKey;
use super::surface::{clip, Region, Surface};

pub const SCRIPT_KEYS_ENV: &str = "COUPON_CALENDAR_SCRIPT_KEYS";
pub const SCRIPT_LINES_ENV: &str = "COUPON_CALENDAR_SCRIPT_LINES";

const DEFAULT_SIZE: (u16, u16) = (100, 30);

/// Text answer queued for a line prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedLine {
    Value(String),
    Escape,
}

/// Surface that replays queued keys and lines and records what was printed.
#[derive(Debug, Default)]
pub struct ScriptedSurface {
    keys: VecDeque<NavKey>,
    lines: VecDeque<ScriptedLine>,
    printed: Vec<String>,
    frames: Vec<Option<String>>,
    clears: usize,
    size: (u16, u16),
}

impl ScriptedSurface {
    pub fn new(keys: impl IntoIterator<Item = NavKey>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            size: DEFAULT_SIZE,
            ..Self::default()
        }
    }

    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines
            .into_iter()
            .map(|line| ScriptedLine::Value(line.into()))
            .collect();
        self
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.size = (width, height);
        self
    }

    /// Builds a surface from the script environment variables, if the key script is set.
    pub fn from_env() -> Option<Self> {
        let keys = env::var(SCRIPT_KEYS_ENV).ok()?;
        let mut surface = Self::new(parse_key_script(&keys));
        if let Ok(lines) = env::var(SCRIPT_LINES_ENV) {
            surface.lines = parse_line_script(&lines);
        }
        Some(surface)
    }

    pub fn printed(&self) -> &[String] {
        &self.printed
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.printed.iter().any(|text| text.contains(needle))
    }

    /// Titles of every frame drawn, in order.
    pub fn frames(&self) -> &[Option<String>] {
        &self.frames
    }

    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn remaining_keys(&self) -> usize {
        self.keys.len()
    }
}

impl Surface for ScriptedSurface {
    fn size(&self) -> io::Result<(u16, u16)> {
        Ok(self.size)
    }

    fn clear(&mut self, _region: Region) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }

    fn draw_frame(&mut self, _region: Region, title: Option<&str>) -> io::Result<()> {
        self.frames.push(title.map(str::to_string));
        Ok(())
    }

    fn print_at(&mut self, region: Region, _row: u16, col: u16, text: &str) -> io::Result<()> {
        self.printed.push(clip(region, col, text).to_string());
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<NavKey> {
        self.keys.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted")
        })
    }

    fn read_line(
        &mut self,
        _region: Region,
        _row: u16,
        _col: u16,
        max_len: usize,
    ) -> io::Result<Option<String>> {
        match self.lines.pop_front() {
            Some(ScriptedLine::Value(value)) => Ok(Some(value.chars().take(max_len).collect())),
            Some(ScriptedLine::Escape) => Ok(None),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "line script exhausted",
            )),
        }
    }

    fn set_cursor_visible(&mut self, _visible: bool) -> io::Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Parses `q,>,ENTER` style key scripts; unknown tokens are skipped.
pub fn parse_key_script(raw: &str) -> Vec<NavKey> {
    raw.split(',')
        .filter_map(|token| NavKey::parse_token(token.trim()))
        .collect()
}

/// Parses `|`-separated line answers. `<BLANK>` is an empty answer, `<ESC>` cancels.
pub fn parse_line_script(raw: &str) -> VecDeque<ScriptedLine> {
    raw.split('|')
        .map(|segment| match segment.trim() {
            "<BLANK>" | "<EMPTY>" => ScriptedLine::Value(String::new()),
            "<ESC>" => ScriptedLine::Escape,
            other => ScriptedLine::Value(other.to_string()),
        })
        .collect()
}
