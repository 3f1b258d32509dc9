//! Starter dataset written into an empty store.
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set, TransactionTrait,
};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::database::entities::{DepartmentEntity, course, department};
use crate::error::{StoreError, StoreResult};
use crate::services::{FacultyService, NewFaculty, NewStudent, StudentService};

/// Department names, in insertion order. The first one owns the other seed rows.
pub const SEED_DEPARTMENTS: [&str; 4] = [
    "Computer Science",
    "Mathematics",
    "Physics",
    "Business Administration",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded {
        departments: usize,
        faculty: usize,
        students: usize,
        courses: usize,
    },
    /// The store already had departments; nothing was written.
    AlreadyPresent,
}

const SEED_MAX_ATTEMPTS: u32 = 8;
const SEED_RETRY_BASE_MS: u64 = 25;

/// Populates the starter dataset if the departments table is empty.
///
/// The emptiness check and all inserts share one transaction, and department
/// names are unique, so two processes seeding the same fresh store cannot
/// both succeed. The one that loses the write lock backs off and checks
/// again, which reports `AlreadyPresent` once the other side has committed.
/// Dependent rows reference the id the store actually assigned to the first
/// department.
pub async fn seed_if_empty(db: &DatabaseConnection) -> StoreResult<SeedOutcome> {
    let mut attempt = 1;
    loop {
        match try_seed(db).await {
            Err(err) if should_retry(&err) && attempt < SEED_MAX_ATTEMPTS => {
                let wait = backoff_delay(attempt);
                warn!(attempt, error = %err, wait_ms = %wait.as_millis(), "seed contended, retrying");
                tokio::time::sleep(wait).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}

fn should_retry(err: &StoreError) -> bool {
    err.is_transient() || err.is_conflict()
}

fn backoff_delay(attempt: u32) -> Duration {
    let exp = SEED_RETRY_BASE_MS.saturating_mul(1u64 << (attempt - 1));
    let jitter = fastrand::u64(0..=SEED_RETRY_BASE_MS);
    Duration::from_millis(exp.saturating_add(jitter))
}

async fn try_seed(db: &DatabaseConnection) -> StoreResult<SeedOutcome> {
    let txn = db.begin().await?;

    let existing = DepartmentEntity::find().count(&txn).await?;
    if existing > 0 {
        debug!(existing, "departments present, skipping seed");
        txn.rollback().await?;
        return Ok(SeedOutcome::AlreadyPresent);
    }

    let mut department_ids = Vec::with_capacity(SEED_DEPARTMENTS.len());
    for name in SEED_DEPARTMENTS {
        let model = department::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        department_ids.push(model.id);
    }
    let home_department = department_ids[0];

    let faculty = [
        ("Sarah", "Johnson", "sarah.johnson@university.edu"),
        ("Michael", "Chen", "michael.chen@university.edu"),
    ];
    for (first, last, email) in faculty {
        FacultyService::create(
            &txn,
            NewFaculty {
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: email.to_string(),
                department_id: Some(home_department),
            },
        )
        .await?;
    }

    StudentService::create(
        &txn,
        NewStudent {
            student_id: Some("STU001".to_string()),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@university.edu".to_string(),
            department_id: Some(home_department),
            class_year: Some("2026".to_string()),
        },
    )
    .await?;

    course::ActiveModel {
        course_code: Set("CS101".to_string()),
        name: Set("Introduction to Computer Science".to_string()),
        department_id: Set(Some(home_department)),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    let outcome = SeedOutcome::Seeded {
        departments: department_ids.len(),
        faculty: faculty.len(),
        students: 1,
        courses: 1,
    };
    info!(?outcome, "seeded starter dataset");
    Ok(outcome)
}
