// Keep in sync with database/migrations.

diesel::table! {
    member (id) {
        id -> BigInt,
        name -> Text,
        roles -> BigInt,
        created_unix_time -> BigInt,
    }
}

diesel::table! {
    member_status (member_id) {
        member_id -> BigInt,
        status -> BigInt,
        status_change_unix_time -> BigInt,
        status_changed_by -> Nullable<BigInt>,
        ban_reason -> Nullable<Text>,
        warning_count -> BigInt,
        warning_count_reset_offset -> BigInt,
    }
}

diesel::table! {
    access_token (member_id) {
        member_id -> BigInt,
        token -> Text,
    }
}

diesel::table! {
    report (id) {
        id -> BigInt,
        reporter_id -> BigInt,
        content_type -> BigInt,
        content_id -> BigInt,
        reason -> Text,
        status -> BigInt,
        created_unix_time -> BigInt,
        resolved_unix_time -> Nullable<BigInt>,
        resolved_by -> Nullable<BigInt>,
        action_taken -> Nullable<Text>,
    }
}

diesel::table! {
    warning (id) {
        id -> BigInt,
        member_id -> BigInt,
        issued_by -> BigInt,
        reason -> Text,
        message -> Text,
        created_unix_time -> BigInt,
        content_type -> Nullable<BigInt>,
        content_id -> Nullable<BigInt>,
    }
}

diesel::joinable!(member_status -> member (member_id));
diesel::joinable!(access_token -> member (member_id));

diesel::allow_tables_to_appear_in_same_query!(member, member_status, access_token, report, warning,);
