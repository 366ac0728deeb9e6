//! Diesel table definitions for the persistence adapters.
//!
//! Mirrors the migrations under `backend/migrations`; regenerate with
//! `diesel print-schema` after changing them.

diesel::table! {
    /// Postal addresses.
    ///
    /// `id` is generated by the application, never by the database.
    addresses (id) {
        id -> Uuid,
        /// Street line (max 200 characters).
        #[max_length = 200]
        street -> Varchar,
        #[max_length = 100]
        city -> Varchar,
        #[max_length = 100]
        state -> Varchar,
        /// US ZIP or ZIP+4 (max 20 characters).
        #[max_length = 20]
        zip_code -> Varchar,
        #[max_length = 100]
        country -> Varchar,
        created_at -> Timestamptz,
        /// Null until the first update.
        updated_at -> Nullable<Timestamptz>,
    }
}
