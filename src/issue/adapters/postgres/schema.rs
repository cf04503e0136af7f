//! Diesel schema for issue persistence.

diesel::table! {
    /// Reported civic issues.
    issues (id) {
        /// Issue identifier.
        id -> Uuid,
        /// Non-empty title.
        title -> Text,
        /// Free-text description.
        description -> Text,
        /// Free-text or geocoded location.
        location -> Text,
        /// Issue category display name.
        #[max_length = 32]
        category -> Varchar,
        /// Optional photo reference.
        photo_url -> Nullable<Text>,
        /// Lifecycle status display name.
        #[max_length = 32]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
