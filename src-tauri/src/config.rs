//! Application configuration constants
//!
//! Central location for configuration constants, resource limits,
//! and validation boundaries used throughout the application.

// ===== Planning Windows =====

/// Number of days of meal planning loaded ahead of today (inclusive window end)
pub const MEAL_PLAN_WINDOW_DAYS: i64 = 7;

/// Maximum number of "upcoming" events shown on the agenda summary,
/// beyond the dedicated today/tomorrow sections
pub const UPCOMING_EVENTS_LIMIT: usize = 3;

// ===== Input Defaults and Limits =====

/// Quantity assumed for a shopping item when none is given
pub const DEFAULT_SHOPPING_QUANTITY: i64 = 1;

/// Maximum length for user-supplied names and titles.
/// Prevents excessively long values from being stored.
pub const MAX_NAME_LENGTH: usize = 200;

/// Minimum length accepted for an account password
pub const MIN_PASSWORD_LENGTH: usize = 8;

// ===== Bootstrap Defaults =====

/// Prefix for the family name auto-created on an account's first sign-in;
/// the e-mail local part is appended
pub const DEFAULT_FAMILY_NAME_PREFIX: &str = "Família";

/// Display name for the primary member when the e-mail has no usable local part
pub const DEFAULT_MEMBER_NAME: &str = "Mãe";

// ===== Persistence Keys =====

/// Settings key persisting the signed-in account between launches
pub const SESSION_SETTING_KEY: &str = "session.user_id";

/// Database file name inside the app data directory
pub const DATABASE_FILE_NAME: &str = "familyhub.db";
