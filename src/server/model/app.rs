use sea_orm::DatabaseConnection;

/// Settings of the members map which are not connections.
#[derive(Clone, Debug)]
pub struct MembersMapSettings {
    /// LearnyBox training whose members may register
    pub training_id: u64,
    /// Raw HTML of the consent text, sanitized on output
    pub consent_text: String,
    /// Key signing registration form nonces
    pub nonce_secret: String,
}

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub learnybox_client: learnybox::Client,
    pub settings: MembersMapSettings,
}

impl From<(DatabaseConnection, learnybox::Client, u64, String, String)> for AppState {
    fn from(
        (db, learnybox_client, training_id, consent_text, nonce_secret): (
            DatabaseConnection,
            learnybox::Client,
            u64,
            String,
            String,
        ),
    ) -> Self {
        Self {
            db,
            learnybox_client,
            settings: MembersMapSettings {
                training_id,
                consent_text,
                nonce_secret,
            },
        }
    }
}
