use crate::{domain::user::entities::UserHealthRecord, entity::users};

impl From<users::Model> for UserHealthRecord {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            conditions: model.conditions,
            onboarding_data: model.onboarding_data,
            age: model.age,
        }
    }
}
