//! Database entities.

pub mod course;
pub mod course_material;
pub mod enrollment;
pub mod feedback;
pub mod notification;
pub mod status_update;
pub mod user;

pub use course::Entity as Course;
pub use course_material::Entity as CourseMaterial;
pub use enrollment::Entity as Enrollment;
pub use feedback::Entity as Feedback;
pub use notification::Entity as Notification;
pub use status_update::Entity as StatusUpdate;
pub use user::Entity as User;
