use std::io;

use crate::cli::keys;

use super::navigation::NavKey;
use super::surface::{Region, Surface};

const DEFAULT_TITLE: &str = "|List|";

/// Keys that scroll a popup list; anything else closes it.
pub fn scroll_delta(key: NavKey) -> Option<isize> {
    match key {
        NavKey::Up | keys::SCROLL_UP => Some(-1),
        NavKey::Down | keys::SCROLL_DOWN => Some(1),
        _ => None,
    }
}

/// Modal, read-only list shown in its own framed region.
pub struct ScrollList<'a> {
    items: &'a [String],
    title: &'a str,
    page_size: usize,
    offset: usize,
}

impl<'a> ScrollList<'a> {
    pub fn new(items: &'a [String], page_size: usize) -> Self {
        Self {
            items,
            title: DEFAULT_TITLE,
            page_size,
            offset: 0,
        }
    }

    pub fn with_title(mut self, title: &'a str) -> Self {
        if !title.is_empty() {
            self.title = title;
        }
        self
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn max_offset(&self) -> usize {
        self.items.len().saturating_sub(self.page_size)
    }

    pub fn visible(&self) -> &'a [String] {
        let end = (self.offset + self.page_size).min(self.items.len());
        &self.items[self.offset..end]
    }

    /// Applies `key`; returns `false` when the popup should close.
    pub fn handle(&mut self, key: NavKey) -> bool {
        match scroll_delta(key) {
            Some(delta) => {
                self.offset = self
                    .offset
                    .saturating_add_signed(delta)
                    .min(self.max_offset());
                true
            }
            None => false,
        }
    }

    /// Runs a nested input loop until a non-scroll key is pressed.
    pub fn show(&mut self, surface: &mut dyn Surface, region: Region) -> io::Result<()> {
        loop {
            surface.clear(region)?;
            for (row, line) in self.visible().iter().enumerate() {
                let row = u16::try_from(row + 1).unwrap_or(u16::MAX);
                surface.print_at(region, row, 1, line)?;
            }
            surface.draw_frame(region, Some(self.title))?;
            surface.flush()?;
            if !self.handle(surface.read_key()?) {
                break;
            }
        }
        surface.clear(region)
    }
}
