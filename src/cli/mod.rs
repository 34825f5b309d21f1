//! Terminal front-end

pub mod interactive;
pub mod list;
pub mod rate;
pub mod setup;
pub mod ui;
