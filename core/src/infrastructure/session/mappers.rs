use crate::{domain::authentication::entities::Session, entity::sessions};

impl From<sessions::Model> for Session {
    fn from(model: sessions::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            token_hash: model.token_hash,
            expires_at: model.expires_at.to_utc(),
            created_at: model.created_at.to_utc(),
        }
    }
}
