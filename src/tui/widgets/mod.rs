//! TUI widgets

pub mod help;
pub mod insights;
pub mod services;
pub mod staff;
pub mod tabs;
