//! Terminal presentation: setup/teardown and frame rendering.
pub mod terminal;
pub mod ui;
