//! Diesel schema for project catalog persistence.

diesel::table! {
    /// Project records.
    projects (id) {
        /// Internal project identifier.
        id -> Uuid,
        /// Display name; a unique index on the lowercased value enforces
        /// case-insensitive uniqueness.
        #[max_length = 255]
        name -> Varchar,
        /// Project description.
        #[max_length = 1000]
        description -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
