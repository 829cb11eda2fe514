//! Integration tests for the Almanac iCalendar crates.

mod configuration;
mod document;
mod errors;
mod helpers;
mod model;
mod scenario;
