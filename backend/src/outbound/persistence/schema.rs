//! Diesel table definitions for the registry schema.
//!
//! Must match `backend/migrations`. Regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// One claimed handle per owner.
    ///
    /// `handle` carries the `usernames_handle_key` unique constraint.
    usernames (owner_id) {
        owner_id -> Varchar,
        handle -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Owner links; display order is `(sort_order, id)`.
    links (id) {
        id -> Varchar,
        owner_id -> Varchar,
        title -> Varchar,
        url -> Varchar,
        sort_order -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Presentation settings, at most one row per owner.
    profile_customizations (owner_id) {
        owner_id -> Varchar,
        description -> Nullable<Varchar>,
        accent_color -> Nullable<Varchar>,
        updated_at -> Timestamptz,
    }
}
