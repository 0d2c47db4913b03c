//! Business logic services.

pub mod account;
pub mod course;
pub mod enrollment;
pub mod feedback;
pub mod material;
pub mod notification;
pub mod status_update;

pub use account::AccountService;
pub use course::CourseService;
pub use enrollment::{EnrollOutcome, EnrollmentService};
pub use feedback::FeedbackService;
pub use material::MaterialService;
pub use notification::NotificationService;
pub use status_update::StatusUpdateService;
