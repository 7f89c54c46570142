//! Key bindings for the main view and the list popups.

use crate::cli::ui::navigation::NavKey;

pub const EXIT: NavKey = NavKey::Char('q');
pub const HELP: NavKey = NavKey::Char('h');
pub const NEXT_YEAR: NavKey = NavKey::Char('>');
pub const PREV_YEAR: NavKey = NavKey::Char('<');
pub const APPEND_BOND: NavKey = NavKey::Char('a');
pub const SAVE_BONDS: NavKey = NavKey::Char('s');
pub const LOAD_BONDS: NavKey = NavKey::Char('l');
pub const LIST_BONDS: NavKey = NavKey::Char('v');
pub const START_OF_COMMAND: NavKey = NavKey::Char(':');
pub const SCROLL_UP: NavKey = NavKey::Char('w');
pub const SCROLL_DOWN: NavKey = NavKey::Char('s');
