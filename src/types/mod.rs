//! Data types shared by the grid engine.

mod editor;
mod grid;
mod input;
mod selection;
mod sheet;

pub use editor::*;
pub use grid::*;
pub use input::*;
pub use selection::*;
pub use sheet::*;
