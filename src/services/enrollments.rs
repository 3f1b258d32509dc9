use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder, QuerySelect};
use serde::Serialize;

use crate::database::entities::{DepartmentEntity, StudentEntity, student};
use crate::error::StoreResult;

/// Number of students shown in the recent enrollments feed.
pub const RECENT_ENROLLMENTS_LIMIT: u64 = 5;

/// A student row with the name of its department attached.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecentEnrollment {
    #[serde(flatten)]
    pub student: student::Model,
    pub department_name: Option<String>,
}

pub struct EnrollmentService;

impl EnrollmentService {
    /// The most recently created students, newest first.
    ///
    /// Students without a department are included with a `None` department
    /// name (left join).
    pub async fn recent<C>(conn: &C) -> StoreResult<Vec<RecentEnrollment>>
    where
        C: ConnectionTrait,
    {
        let rows = StudentEntity::find()
            .find_also_related(DepartmentEntity)
            .order_by_desc(student::Column::Id)
            .limit(RECENT_ENROLLMENTS_LIMIT)
            .all(conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(student, department)| RecentEnrollment {
                student,
                department_name: department.map(|d| d.name),
            })
            .collect())
    }
}
