//! Diesel table definitions. Must match `backend/migrations` exactly.

diesel::table! {
    /// Application users. `user_name` uniqueness is checked by the
    /// repository, not by a constraint.
    users (id) {
        id -> Int4,
        user_name -> Varchar,
        password -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        age -> Int4,
    }
}

diesel::table! {
    lists (id) {
        id -> Int4,
        name -> Varchar,
        description -> Nullable<Varchar>,
        items_counter -> Int4,
    }
}

diesel::table! {
    /// Item categories.
    types (id) {
        id -> Int4,
        name -> Varchar,
        description -> Nullable<Varchar>,
    }
}

diesel::table! {
    items (id) {
        id -> Int4,
        name -> Varchar,
        episodes -> Int4,
        genre -> Varchar,
        rating -> Float8,
        description -> Varchar,
        image_url -> Varchar,
        type_id -> Int4,
    }
}

diesel::table! {
    tracks (id) {
        id -> Int4,
        date -> Timestamptz,
        episodes_watched -> Int4,
    }
}

diesel::table! {
    /// Links a user to the lists they own.
    contents (id) {
        id -> Int4,
        user_id -> Int4,
        list_id -> Int4,
    }
}

diesel::table! {
    list_details (id) {
        id -> Int4,
        list_id -> Int4,
        item_id -> Int4,
    }
}

diesel::table! {
    track_details (id) {
        id -> Int4,
        track_id -> Int4,
        item_id -> Int4,
    }
}

diesel::joinable!(items -> types (type_id));
diesel::joinable!(contents -> users (user_id));
diesel::joinable!(contents -> lists (list_id));
diesel::joinable!(list_details -> lists (list_id));
diesel::joinable!(list_details -> items (item_id));
diesel::joinable!(track_details -> tracks (track_id));
diesel::joinable!(track_details -> items (item_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    lists,
    types,
    items,
    tracks,
    contents,
    list_details,
    track_details,
);
