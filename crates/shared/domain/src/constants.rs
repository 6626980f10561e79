//! Domain-level constants.
//!
//! Column limits shared by input validation and the schema migrations.

// =============================================================================
// Users
// =============================================================================

/// Maximum username length
pub const USERNAME_MAX_LENGTH: u32 = 50;

/// Maximum email length
pub const EMAIL_MAX_LENGTH: u32 = 100;

/// Maximum stored password hash length
pub const PASSWORD_HASH_MAX_LENGTH: u32 = 255;

/// Rating assigned to new users
pub const DEFAULT_USER_RATING: f64 = 0.0;

// =============================================================================
// Skills
// =============================================================================

/// Maximum skill name length
pub const SKILL_NAME_MAX_LENGTH: u32 = 100;

/// Maximum skill description length
pub const SKILL_DESCRIPTION_MAX_LENGTH: u32 = 250;

/// Maximum proficiency level length on a user/skill pairing
pub const PROFICIENCY_LEVEL_MAX_LENGTH: u32 = 50;

// =============================================================================
// Listings
// =============================================================================

/// Maximum listing title length
pub const LISTING_TITLE_MAX_LENGTH: u32 = 255;

/// Maximum listing description length
pub const LISTING_DESCRIPTION_MAX_LENGTH: u32 = 500;

// =============================================================================
// Transactions
// =============================================================================

/// Status of a freshly requested transaction
pub const STATUS_PENDING: &str = "pending";

/// Terminal status of a fulfilled transaction
pub const STATUS_COMPLETED: &str = "completed";

/// Terminal status of an abandoned transaction
pub const STATUS_CANCELLED: &str = "cancelled";

/// All valid status values
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_COMPLETED, STATUS_CANCELLED];

/// Storage width of the status column
pub const STATUS_MAX_LENGTH: u32 = 16;

// =============================================================================
// Reviews
// =============================================================================

/// Maximum review comment length
pub const REVIEW_COMMENT_MAX_LENGTH: u32 = 300;

// =============================================================================
// Passwords
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;
