// Shared by both SQL backends; the migrations under `migrations/` create matching tables.

diesel::table! {
    pokemon (id) {
        id -> BigInt,
        name -> Text,
        types -> Text,
        description -> Text,
        image -> Text,
    }
}
