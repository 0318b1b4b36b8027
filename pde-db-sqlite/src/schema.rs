///////////////////////////////////////////////////////////////////////
// Communities
///////////////////////////////////////////////////////////////////////

table! {
    community (rowid) {
        rowid -> BigInt,
        id -> Text,
        name -> Text,
        description -> Text,
        lng -> Double,
        lat -> Double,
        radius -> Double,
        colour -> Nullable<Text>,
        created_at -> BigInt,
        updated_at -> BigInt,
    }
}

table! {
    community_tag (parent_rowid, tag) {
        parent_rowid -> BigInt,
        tag -> Text,
    }
}

joinable!(community_tag -> community (parent_rowid));

table! {
    community_member (parent_rowid, user_id) {
        parent_rowid -> BigInt,
        user_id -> Text,
    }
}

joinable!(community_member -> community (parent_rowid));

///////////////////////////////////////////////////////////////////////
// Tips
///////////////////////////////////////////////////////////////////////

table! {
    tip (rowid) {
        rowid -> BigInt,
        id -> Text,
        kind -> Text,
        community_id -> Text,
        author_id -> Text,
        title -> Text,
        description -> Text,
        background_image -> Nullable<Text>,
        created_at -> BigInt,
        updated_at -> BigInt,
        lng -> Nullable<Double>,
        lat -> Nullable<Double>,
        radius -> Nullable<Double>,
        address -> Nullable<Text>,
        subtype -> Nullable<Text>,
        picture -> Nullable<Text>,
        colour -> Nullable<Text>,
        start_date -> Nullable<BigInt>,
        duration_ms -> Nullable<BigInt>,
    }
}

table! {
    tip_tag (parent_rowid, tag) {
        parent_rowid -> BigInt,
        tag -> Text,
    }
}

joinable!(tip_tag -> tip (parent_rowid));

table! {
    tip_comment (parent_rowid, message_id) {
        parent_rowid -> BigInt,
        message_id -> Text,
    }
}

joinable!(tip_comment -> tip (parent_rowid));

table! {
    tip_rating (parent_rowid, user_id) {
        parent_rowid -> BigInt,
        user_id -> Text,
        direction -> SmallInt,
    }
}

joinable!(tip_rating -> tip (parent_rowid));

allow_tables_to_appear_in_same_query!(
    community,
    community_tag,
    community_member,
    tip,
    tip_tag,
    tip_comment,
    tip_rating,
);
