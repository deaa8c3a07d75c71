//! Durable storage keys.
//!
//! Values under these keys are opaque strings to the store. Absence of either
//! session key means nobody is signed in.

/// JSON-serialized `Session`.
pub const CURRENT_USER: &str = "currentUser";

/// Role tag of the stored session (`"doctor"` or `"patient"`).
pub const USER_TYPE: &str = "userType";

/// JSON-serialized `Preferences`.
pub const PREFERENCES: &str = "preferences";
