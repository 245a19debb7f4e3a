//! RocksDB column family definitions.

/// Administrator records: email → Admin
pub const CF_ADMINS: &str = "admins";

/// User records: email → User
pub const CF_USERS: &str = "users";

/// Unified email ownership index: email → AccountRole
///
/// Single uniqueness authority spanning both identity collections. Every
/// account insert reserves its email here first; there is no uniqueness
/// constraint anywhere else.
pub const CF_EMAIL_INDEX: &str = "email_index";

/// Admin settings singleton: SETTINGS_KEY → AdminSettings
pub const CF_ADMIN_SETTINGS: &str = "admin_settings";

/// Storage key of the admin settings singleton row
pub const SETTINGS_KEY: &str = "registration_key";

/// Get all column family names
pub fn all_column_families() -> Vec<&'static str> {
    vec![CF_ADMINS, CF_USERS, CF_EMAIL_INDEX, CF_ADMIN_SETTINGS]
}
