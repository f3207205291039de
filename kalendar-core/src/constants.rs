//! Fixed values shared across the crate.

/// Where the index and the yearly datasets are published
pub const DEFAULT_DATA_URL: &str = "https://data.kockatykalendar.sk";

/// Reference timezone for event timestamps
pub const DEFAULT_TIMEZONE: &str = "Europe/Bratislava";

/// Root directory of the all-combinations output tree
pub const DEFAULT_OUTPUT_DIR: &str = "build";

/// Suffix appended to every event UID
pub const DEFAULT_UID_DOMAIN: &str = "kockatykalendar.sk";

pub const PRODID: &str = "-//KockatyKalendar.sk//iCal builder//SK";

/// Month (1-based) in which a new school year starts
pub const SCHOOL_YEAR_START_MONTH: u32 = 9;

/// Filter value that disables a filter dimension
pub const ANY: &str = "any";

/// Prefix of a cancelled event's summary. Separated from the name by a
/// space, unlike the earlier builder which glued it to the name.
pub const CANCELLED_PREFIX: &str = "(Zrušený) ";
