//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, unknown role) |
//! | 3       | Universal        | File read/write failure                  |
//! | 4       | config           | Settings file unreadable or invalid      |
//! | 50-59   | fetch            | Contact data provider                    |
//!
//! Per-organization failures (search errors, no matching titles) are
//! reported in the Status column and never change the exit code.
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

// =============================================================================
// Universal (0-3)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unknown role labels, empty domain list.
pub const EXIT_USAGE: u8 = 2;

/// IO error - input list unreadable, output not writable.
pub const EXIT_IO: u8 = 3;

// =============================================================================
// Config (4)
// =============================================================================

/// Settings file missing (when named explicitly), malformed, or invalid.
pub const EXIT_CONFIG: u8 = 4;

// =============================================================================
// Fetch (50-59)
// =============================================================================

/// No API key supplied by flag or environment.
pub const EXIT_FETCH_NOT_AUTH: u8 = 50;

/// HTTP client could not be constructed (TLS backend failure).
pub const EXIT_FETCH_CLIENT: u8 = 51;
