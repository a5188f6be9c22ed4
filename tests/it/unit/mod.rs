//! Unit tests for backlot.

mod geometry_tests;
mod moodboard_tests;
mod settings_tests;
mod settings_watcher_tests;
