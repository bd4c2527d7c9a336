/// diesel table for community coupons
table! {
    coupons (id) {
        id -> Uuid,
        store -> VarChar,
        code -> VarChar,
        description -> VarChar,
        upvotes -> Integer,
        downvotes -> Integer,
        created_at -> Timestamp,
    }
}

/// diesel table for community referral templates, one per store
table! {
    referrals (store) {
        store -> VarChar,
        referral_url -> VarChar,
    }
}

allow_tables_to_appear_in_same_query!(coupons, referrals);
