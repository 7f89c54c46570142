pub mod console;
pub mod dashboard;
pub mod list_selector;
pub mod navigation;
pub mod surface;
pub mod terminal;
pub mod test_mode;
pub mod view_graph;
