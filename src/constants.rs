//! Application-wide constants.

/// The display name of the application.
pub const APP_NAME: &str = "LED Sphere Model Generator";

/// The binary name of the application (used in command examples and file metadata).
pub const APP_BINARY_NAME: &str = "ledsphere";
