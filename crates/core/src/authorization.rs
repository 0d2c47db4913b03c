//! Role-based authorization predicates.
//!
//! Each predicate is a pure function over already-loaded rows. Services load
//! the relevant models, call the predicate, and map `false` to
//! [`campus_common::AppError::Forbidden`]. Predicates never perform I/O and
//! never decide between 401 and 403; an unauthenticated caller is rejected
//! before any predicate runs.

use campus_db::entities::{course, enrollment, feedback, user, user::UserRole};

/// Only teachers can create courses.
#[must_use]
pub fn can_create_course(actor: &user::Model) -> bool {
    match actor.role {
        UserRole::Teacher => true,
        UserRole::Student => false,
    }
}

/// Only the owning teacher can edit or delete a course.
#[must_use]
pub fn can_modify_course(actor: &user::Model, course: &course::Model) -> bool {
    match actor.role {
        UserRole::Teacher => course.teacher_id == actor.id,
        UserRole::Student => false,
    }
}

/// Only students can enroll in courses.
#[must_use]
pub fn can_enroll(actor: &user::Model) -> bool {
    match actor.role {
        UserRole::Student => true,
        UserRole::Teacher => false,
    }
}

/// Only a student with a non-blocked enrollment in the course can leave
/// feedback.
#[must_use]
pub fn can_submit_feedback(actor: &user::Model, enrollment: Option<&enrollment::Model>) -> bool {
    match actor.role {
        UserRole::Student => enrollment.is_some_and(|e| !e.is_blocked),
        UserRole::Teacher => false,
    }
}

/// Only the author can delete their feedback.
#[must_use]
pub fn can_modify_feedback(actor: &user::Model, feedback: &feedback::Model) -> bool {
    feedback.student_id == actor.id
}

/// Only the owning teacher can block, unblock, or inspect enrollments in a
/// course.
#[must_use]
pub fn can_moderate_enrollment(actor: &user::Model, course: &course::Model) -> bool {
    can_modify_course(actor, course)
}

/// Only the owning teacher can add or remove course materials.
#[must_use]
pub fn can_manage_materials(actor: &user::Model, course: &course::Model) -> bool {
    can_modify_course(actor, course)
}

/// Users can only edit their own profile.
#[must_use]
pub fn can_edit_profile(actor: &user::Model, target_user_id: &str) -> bool {
    actor.id == target_user_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user(id: &str, role: UserRole) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: id.to_string(),
            username_lower: id.to_lowercase(),
            role,
            token: None,
            name: None,
            email: None,
            photo_url: None,
            password_hash: "x".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_course(id: &str, teacher_id: &str) -> course::Model {
        course::Model {
            id: id.to_string(),
            title: "Algebra".to_string(),
            description: "Linear algebra".to_string(),
            teacher_id: teacher_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn test_enrollment(student_id: &str, course_id: &str, is_blocked: bool) -> enrollment::Model {
        enrollment::Model {
            id: "e1".to_string(),
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
            is_blocked,
            enrolled_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_only_teachers_create_courses() {
        assert!(can_create_course(&test_user("t1", UserRole::Teacher)));
        assert!(!can_create_course(&test_user("s1", UserRole::Student)));
    }

    #[test]
    fn test_only_owner_modifies_course() {
        let owner = test_user("t1", UserRole::Teacher);
        let other_teacher = test_user("t2", UserRole::Teacher);
        let student = test_user("s1", UserRole::Student);
        let course = test_course("c1", "t1");

        assert!(can_modify_course(&owner, &course));
        assert!(!can_modify_course(&other_teacher, &course));
        assert!(!can_modify_course(&student, &course));
    }

    #[test]
    fn test_only_students_enroll() {
        assert!(can_enroll(&test_user("s1", UserRole::Student)));
        assert!(!can_enroll(&test_user("t1", UserRole::Teacher)));
    }

    #[test]
    fn test_feedback_requires_active_enrollment() {
        let student = test_user("s1", UserRole::Student);
        let teacher = test_user("t1", UserRole::Teacher);
        let active = test_enrollment("s1", "c1", false);
        let blocked = test_enrollment("s1", "c1", true);

        assert!(can_submit_feedback(&student, Some(&active)));
        assert!(!can_submit_feedback(&student, Some(&blocked)));
        assert!(!can_submit_feedback(&student, None));
        assert!(!can_submit_feedback(&teacher, Some(&active)));
    }

    #[test]
    fn test_feedback_author_only() {
        let author = test_user("s1", UserRole::Student);
        let other = test_user("s2", UserRole::Student);
        let feedback = feedback::Model {
            id: "f1".to_string(),
            course_id: "c1".to_string(),
            student_id: "s1".to_string(),
            rating: 5,
            comment: "Great course overall".to_string(),
            created_at: Utc::now().into(),
        };

        assert!(can_modify_feedback(&author, &feedback));
        assert!(!can_modify_feedback(&other, &feedback));
    }

    #[test]
    fn test_profile_edit_is_self_only() {
        let user = test_user("u1", UserRole::Student);
        assert!(can_edit_profile(&user, "u1"));
        assert!(!can_edit_profile(&user, "u2"));
    }
}
