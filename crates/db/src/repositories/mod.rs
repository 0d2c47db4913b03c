//! Database repositories.
//!
//! One repository per entity, each wrapping an `Arc<DatabaseConnection>`.

mod course;
mod course_material;
mod enrollment;
mod feedback;
mod notification;
mod status_update;
mod user;

pub use course::CourseRepository;
pub use course_material::CourseMaterialRepository;
pub use enrollment::EnrollmentRepository;
pub use feedback::FeedbackRepository;
pub use notification::NotificationRepository;
pub use status_update::StatusUpdateRepository;
pub use user::UserRepository;
