/// Product identity used when a calendar is built from scratch
pub const PRODUCT_NAME: &str = "Almanac";
pub const PRODUCT_VENDOR: &str = "Almanac";
pub const DEFAULT_PRODID: &str =
    const_str::concat!("-//", PRODUCT_VENDOR, "//", PRODUCT_NAME, " iCalendar//EN");

/// iCalendar version emitted for new calendars
pub const ICALENDAR_VERSION: &str = "2.0";

/// Prefix for environment variables read by [`crate::config::load_config`]
pub const ENV_PREFIX: &str = "ALMANAC";
pub const CONFIG_FILE_NAME: &str = "almanac.toml";
