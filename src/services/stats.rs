use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;
use tracing::debug;

use crate::database::entities::{CourseEntity, FacultyEntity, StudentEntity, course};
use crate::error::StoreResult;

/// Dashboard value for fee collection. There is no fee-bearing entity in the
/// store, so this is a fixed display string rather than an aggregate.
pub const FEE_COLLECTION_PLACEHOLDER: &str = "$45,200";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_students: u64,
    pub active_courses: u64,
    pub faculty_staff: u64,
    pub fee_collection: &'static str,
}

pub struct StatsService;

impl StatsService {
    /// Counts students, active courses and faculty.
    ///
    /// The three queries run concurrently; if any of them fails the whole
    /// call fails and no partial counts are returned.
    pub async fn dashboard<C>(conn: &C) -> StoreResult<DashboardStats>
    where
        C: ConnectionTrait,
    {
        let (total_students, active_courses, faculty_staff) = tokio::try_join!(
            StudentEntity::find().count(conn),
            CourseEntity::find()
                .filter(course::Column::IsActive.eq(true))
                .count(conn),
            FacultyEntity::find().count(conn),
        )?;

        debug!(total_students, active_courses, faculty_staff, "dashboard stats");
        Ok(DashboardStats {
            total_students,
            active_courses,
            faculty_staff,
            fee_collection: FEE_COLLECTION_PLACEHOLDER,
        })
    }
}
