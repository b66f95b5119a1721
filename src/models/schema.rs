table! {
    players (id) {
        id -> Text,
        username -> Text,
        max_chips -> Integer,
        created_at -> Timestamp,
    }
}

table! {
    rounds (id) {
        id -> Text,
        player_id -> Text,
        round_no -> Integer,
        bet -> Integer,
        result -> Text,
        delta -> Integer,
        chips_after -> Integer,
        created_at -> Timestamp,
    }
}

table! {
    admin_users (id) {
        id -> Text,
        username -> Text,
        password_hash -> Text,
    }
}

table! {
    admin_sessions (id) {
        id -> Text,
        token -> Text,
        admin_id -> Text,
        expires_at -> Timestamp,
    }
}

table! {
    visitor_stats (id) {
        id -> Integer,
        total -> Integer,
    }
}

joinable!(rounds -> players (player_id));
joinable!(admin_sessions -> admin_users (admin_id));

allow_tables_to_appear_in_same_query!(
    players,
    rounds,
    admin_users,
    admin_sessions,
);
