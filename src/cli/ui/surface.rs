//! The drawing and input capability the dashboard is written against.

use std::io;

use super::navigation::NavKey;

/// Rectangle on the screen, in cells. Row and column offsets passed to a
/// [`Surface`] are relative to the region's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Region {
    pub top: u16,
    pub left: u16,
    pub height: u16,
    pub width: u16,
}

impl Region {
    pub const fn new(top: u16, left: u16, height: u16, width: u16) -> Self {
        Self {
            top,
            left,
            height,
            width,
        }
    }

    /// Rows available inside the frame.
    pub fn inner_height(&self) -> u16 {
        self.height.saturating_sub(2)
    }

    /// Columns available inside the frame.
    pub fn inner_width(&self) -> u16 {
        self.width.saturating_sub(2)
    }
}

pub trait Surface {
    /// Terminal size as `(width, height)`.
    fn size(&self) -> io::Result<(u16, u16)>;
    fn clear(&mut self, region: Region) -> io::Result<()>;
    fn draw_frame(&mut self, region: Region, title: Option<&str>) -> io::Result<()>;
    /// Prints `text` at `row`/`col` inside `region`, clipped to its right edge.
    fn print_at(&mut self, region: Region, row: u16, col: u16, text: &str) -> io::Result<()>;
    /// Blocks until one key is pressed.
    fn read_key(&mut self) -> io::Result<NavKey>;
    /// Blocks until Enter (`Some`) or Esc (`None`), echoing at most `max_len` characters.
    fn read_line(
        &mut self,
        region: Region,
        row: u16,
        col: u16,
        max_len: usize,
    ) -> io::Result<Option<String>>;
    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

/// Cuts `text` so that it fits between `col` and the right edge of `region`.
pub fn clip(region: Region, col: u16, text: &str) -> &str {
    let room = usize::from(region.width.saturating_sub(col));
    match text.char_indices().nth(room) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
