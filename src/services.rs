//! Record services. Each one is stateless and runs against any
//! `ConnectionTrait`, so callers can pass a pooled connection or a transaction.
pub mod avatar;
pub mod department;
pub mod enrollments;
pub mod faculty;
pub mod stats;
pub mod student;

pub use department::DepartmentService;
pub use enrollments::EnrollmentService;
pub use faculty::{FacultyService, NewFaculty};
pub use stats::{DashboardStats, StatsService};
pub use student::{NewStudent, StudentService};
