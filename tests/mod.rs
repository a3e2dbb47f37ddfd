//! Integration tests for sheetgrid.
//!
//! This module provides the shared test infrastructure:
//!
//! - `fixtures`: Builders for sheets and grids held in memory
//! - `common`: Event drivers and assertion helpers
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use crate::common::{click_with, assert_single};
//! use crate::fixtures::finance_grid;
//!
//! fn shift_click_extends() {
//!     let mut grid = finance_grid();
//!     click(&mut grid, 2, 0);
//!     click_with(&mut grid, 4, 2, Modifiers::SHIFT);
//!     assert_single(&grid, (2, 0), (4, 2));
//! }
//! ```
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_precision_loss
)]

pub mod common;
pub mod fixtures;

// Re-export commonly used items at the top level
pub use common::{assert_selections, assert_single, click, click_with, press, press_with, send};
pub use fixtures::{blank_grid, finance_grid, finance_sheets, SheetBuilder};
