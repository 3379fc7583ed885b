use learnybox::member::{MemberProfile, TrainingMember, TrainingMemberUser};
use serde_json::json;

/// Creates an entry of a training member list.
pub fn training_member(user_id: i64, email: &str) -> TrainingMember {
    TrainingMember {
        user: TrainingMemberUser {
            user_id,
            email: email.to_string(),
        },
    }
}

/// Creates a LearnyBox user record with a complete postal address.
///
/// The address formats as `1 rue de la Paix, 75002 Paris, France`.
pub fn member_profile(user_id: i64, email: &str, display_name: &str) -> MemberProfile {
    MemberProfile {
        user_id,
        email: email.to_string(),
        display_name: display_name.to_string(),
        user_configs: json!({
            "adresse": { "value": "1 rue de la Paix" },
            "code_postal": { "value": "75002" },
            "ville": { "value": "Paris" },
            "pays": { "value": "France" }
        }),
    }
}

/// Creates a LearnyBox user record without any address field.
pub fn member_profile_without_address(
    user_id: i64,
    email: &str,
    display_name: &str,
) -> MemberProfile {
    MemberProfile {
        user_id,
        email: email.to_string(),
        display_name: display_name.to_string(),
        user_configs: json!({}),
    }
}
