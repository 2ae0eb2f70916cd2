//! Diesel table definitions. Keep in sync with `backend/migrations/`.

diesel::table! {
    /// Stored users. `id` is either store-assigned (UUID v4 text) or pinned
    /// by the seed data.
    users (id) {
        id -> Varchar,
        login -> Varchar,
        age -> Int4,
    }
}
