//! Entity definitions for the records database.
pub mod course;
pub mod department;
pub mod faculty;
pub mod schedule;
pub mod student;

pub use course::Entity as CourseEntity;
pub use department::Entity as DepartmentEntity;
pub use faculty::Entity as FacultyEntity;
pub use student::{EnrollmentStatus, Entity as StudentEntity};
