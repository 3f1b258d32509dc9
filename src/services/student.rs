use sea_orm::{ActiveModelTrait, ConnectionTrait, NotSet, Set};
use serde::Deserialize;
use tracing::info;

use crate::database::entities::{EnrollmentStatus, student};
use crate::error::StoreResult;
use crate::services::avatar;
use crate::utils::{lenient_id, lenient_text};

/// Caller-supplied fields for a new student. Status and avatar fields are not
/// part of the contract; they are set by [`StudentService::create`].
///
/// `student_id` is optional here only so that a missing code reaches the
/// store, whose NOT NULL constraint rejects it.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct NewStudent {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_id")]
    pub department_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub class_year: Option<String>,
}

pub struct StudentService;

impl StudentService {
    /// Inserts a student with derived avatar fields and `Pending` status.
    ///
    /// # Returns
    /// * `StoreResult<i32>` - The assigned row id. A duplicate `student_id`
    ///   yields `StoreError::Conflict`; a missing one is a storage error.
    pub async fn create<C>(conn: &C, new: NewStudent) -> StoreResult<i32>
    where
        C: ConnectionTrait,
    {
        let avatar_initials = avatar::initials(&new.first_name, &new.last_name);
        let model = student::ActiveModel {
            student_id: new.student_id.map_or(NotSet, Set),
            first_name: Set(new.first_name),
            last_name: Set(new.last_name),
            email: Set(new.email),
            department_id: Set(new.department_id),
            status: Set(EnrollmentStatus::default()),
            class_year: Set(new.class_year),
            avatar_initials: Set(avatar_initials),
            avatar_color: Set(avatar::pick_color().to_string()),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        info!(id = model.id, student_id = %model.student_id, "student created");
        Ok(model.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::entities::StudentEntity;
    use crate::database::test_utils::{insert_department, setup_test_db};
    use crate::error::StoreError;
    use crate::services::avatar::AVATAR_PALETTE;
    use sea_orm::EntityTrait;

    fn new_student(code: &str, first: &str, last: &str) -> NewStudent {
        NewStudent {
            student_id: Some(code.to_string()),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@example.edu", code.to_lowercase()),
            department_id: None,
            class_year: Some("2027".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_student_derives_fields() {
        let (_tmp_dir, db) = setup_test_db().await;
        let dept = insert_department(&db, "Computer Science").await;

        let mut new = new_student("S100", "John", "Doe");
        new.department_id = Some(dept);
        let id = StudentService::create(&db, new)
            .await
            .expect("Failed to create student");

        let stored = StudentEntity::find_by_id(id)
            .one(&db)
            .await
            .expect("Failed to load student")
            .expect("student should exist");
        assert_eq!(stored.avatar_initials, "JD");
        assert!(AVATAR_PALETTE.contains(&stored.avatar_color.as_str()));
        assert_eq!(stored.status, EnrollmentStatus::Pending);
        assert_eq!(stored.department_id, Some(dept));
        assert_eq!(stored.class_year.as_deref(), Some("2027"));
    }

    #[tokio::test]
    async fn test_create_student_with_empty_first_name() {
        let (_tmp_dir, db) = setup_test_db().await;
        let id = StudentService::create(&db, new_student("S101", "", "Doe"))
            .await
            .expect("Failed to create student");

        let stored = StudentEntity::find_by_id(id).one(&db).await.unwrap().unwrap();
        assert_eq!(stored.avatar_initials, "D");
    }

    #[tokio::test]
    async fn test_duplicate_student_id_is_conflict() {
        let (_tmp_dir, db) = setup_test_db().await;
        let first_id = StudentService::create(&db, new_student("S200", "Ada", "King"))
            .await
            .expect("Failed to create first student");

        let err = StudentService::create(&db, new_student("S200", "Alan", "Turing"))
            .await
            .expect_err("second insert with the same student_id must fail");
        assert!(matches!(err, StoreError::Conflict(_)), "got {err:?}");

        // The first record is untouched
        let stored = StudentEntity::find_by_id(first_id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.first_name, "Ada");
    }

    #[tokio::test]
    async fn test_missing_student_id_is_rejected_by_store() {
        let (_tmp_dir, db) = setup_test_db().await;
        let mut new = new_student("unused", "Alan", "Turing");
        new.student_id = None;

        let err = StudentService::create(&db, new).await.unwrap_err();
        assert!(matches!(err, StoreError::Internal(_)), "got {err:?}");

        let stored = StudentEntity::find().all(&db).await.unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_department_is_rejected() {
        let (_tmp_dir, db) = setup_test_db().await;
        let mut new = new_student("S300", "Grace", "Hopper");
        new.department_id = Some(999);

        let err = StudentService::create(&db, new).await.unwrap_err();
        assert!(!err.is_conflict());
    }
}
