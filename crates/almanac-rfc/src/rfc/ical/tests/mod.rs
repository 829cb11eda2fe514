//! Cross-module tests for the iCalendar implementation.
