use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use serde::Deserialize;
use tracing::info;

use crate::database::entities::faculty;
use crate::error::StoreResult;
use crate::services::avatar;
use crate::utils::lenient_id;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct NewFaculty {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_id")]
    pub department_id: Option<i32>,
}

pub struct FacultyService;

impl FacultyService {
    /// Inserts a faculty member. The avatar URL is derived from the name.
    pub async fn create<C>(conn: &C, new: NewFaculty) -> StoreResult<i32>
    where
        C: ConnectionTrait,
    {
        let avatar_url = avatar::faculty_avatar_url(&new.first_name, &new.last_name);
        let model = faculty::ActiveModel {
            first_name: Set(new.first_name),
            last_name: Set(new.last_name),
            email: Set(new.email),
            department_id: Set(new.department_id),
            avatar_url: Set(avatar_url),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        info!(id = model.id, "faculty created");
        Ok(model.id)
    }
}
