pub mod grid;
pub mod status;

pub use grid::GridWidget;
pub use status::StatusWidget;
