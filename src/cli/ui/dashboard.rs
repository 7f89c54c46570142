use std::io;

use crate::{bonds::BondCollection, cli::keys, errors::CliError};

use super::surface::{Region, Surface};

pub const GRAPH_TITLE: &str = "|Payments|";
pub const INFO_TITLE: &str = "|Info|";
pub const HELP_TITLE: &str = "|Help|";

const MIN_WIDTH: u16 = 64;
const MIN_HEIGHT: u16 = 16;

/// Screen split: graph on the left, info over console on the right, legend below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub graph: Region,
    pub info: Region,
    pub console: Region,
    pub legend: Region,
    pub help: Region,
}

impl Layout {
    pub fn compute(width: u16, height: u16) -> Result<Self, CliError> {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(CliError::Setup(format!(
                "terminal is {width}x{height}, need at least {MIN_WIDTH}x{MIN_HEIGHT}"
            )));
        }
        let main_width = width / 3 * 2;
        let side_width = width - main_width;
        let info_height = height / 2;
        Ok(Self {
            graph: Region::new(0, 0, height - 1, main_width),
            info: Region::new(0, main_width, info_height, side_width),
            console: Region::new(info_height, main_width, height - 1 - info_height, side_width),
            legend: Region::new(height - 1, 0, 1, width),
            help: Region::new(height / 4, width / 4, height / 2, width / 2),
        })
    }
}

/// Payment counts for one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSummary {
    pub year: i32,
    pub monthly: [usize; 12],
    pub total: usize,
}

impl YearSummary {
    pub fn compute(bonds: &BondCollection, year: i32) -> Self {
        let mut monthly = [0usize; 12];
        for (month, slot) in (1u32..).zip(monthly.iter_mut()) {
            *slot = bonds.count_in_month(year, month);
        }
        Self {
            year,
            monthly,
            total: monthly.iter().sum(),
        }
    }
}

/// Bar chart of monthly payment counts; the frame is drawn by the owning view.
pub fn draw_graph(surface: &mut dyn Surface, region: Region, summary: &YearSummary) -> io::Result<()> {
    let month_row = region.height.saturating_sub(2);
    let count_row = region.height.saturating_sub(4);
    let step = (region.width.saturating_sub(6) / 12).max(1);

    surface.print_at(region, month_row, 1, "M")?;
    surface.print_at(region, count_row, 1, "C")?;

    let mut col = 4;
    for (index, count) in summary.monthly.iter().enumerate() {
        surface.print_at(region, month_row, col, &format!("{:02}", index + 1))?;
        surface.print_at(region, count_row, col, &format!("{count:2}"))?;
        let mut row = count_row.saturating_sub(1);
        for _ in 0..*count {
            if row < 1 {
                break;
            }
            surface.print_at(region, row, col + 1, "+")?;
            row -= 1;
        }
        col += step;
    }

    let total_col = col.saturating_sub(step / 2);
    surface.print_at(region, count_row, total_col, &format!(":{}", summary.total))
}

pub fn draw_info(surface: &mut dyn Surface, region: Region, summary: &YearSummary) -> io::Result<()> {
    surface.clear(region)?;
    surface.print_at(region, 1, region.width / 3, &format!("Year: {}", summary.year))?;
    surface.print_at(region, 2, 1, &format!("Payments count: {}", summary.total))?;
    surface.draw_frame(region, Some(INFO_TITLE))
}

pub fn draw_legend(surface: &mut dyn Surface, region: Region) -> io::Result<()> {
    surface.clear(region)?;
    let legend = format!(
        "Help:{} Exit:{} Prev year:{} Next year:{} Command:{}",
        keys::HELP,
        keys::EXIT,
        keys::PREV_YEAR,
        keys::NEXT_YEAR,
        keys::START_OF_COMMAND
    );
    surface.print_at(region, 0, 0, &legend)
}

pub fn help_lines() -> Vec<String> {
    vec![
        "For main program".to_string(),
        format!("  Exit: {}", keys::EXIT),
        format!("  Next year: {}", keys::NEXT_YEAR),
        format!("  Previous year: {}", keys::PREV_YEAR),
        format!("  Append bond: {}", keys::APPEND_BOND),
        format!("  Save bonds: {}", keys::SAVE_BONDS),
        format!("  Load bonds: {}", keys::LOAD_BONDS),
        format!("  List bonds: {}", keys::LIST_BONDS),
        format!("  Command line: {}", keys::START_OF_COMMAND),
        "For bonds list".to_string(),
        format!("  Scroll up: {} / Up", keys::SCROLL_UP),
        format!("  Scroll down: {} / Down", keys::SCROLL_DOWN),
        "Close help: q or Esc".to_string(),
    ]
}

pub fn draw_help(surface: &mut dyn Surface, region: Region) -> io::Result<()> {
    let rows = usize::from(region.inner_height());
    for (offset, line) in help_lines().iter().take(rows).enumerate() {
        let row = u16::try_from(offset + 1).unwrap_or(u16::MAX);
        surface.print_at(region, row, 1, line)?;
    }
    Ok(())
}
