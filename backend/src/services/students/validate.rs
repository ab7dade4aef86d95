use crate::error::{AppError, AppResult};
use crate::services::validation;
use common::model::course::Course;
use common::model::student::{Student, StudentInput};

/// Runs every check a student write needs and returns the normalized input.
///
/// `existing` is scanned linearly for a student id clash; the record being
/// edited (`editing`) is skipped. Nothing is written here, so a rejected
/// submission never reaches the database.
pub(crate) fn validate_student(
    input: &StudentInput,
    existing: &[Student],
    courses: &[Course],
    editing: Option<&str>,
) -> AppResult<StudentInput> {
    let student_id = validation::student_id(&input.student_id)?;
    let name = validation::required("Name", &input.name)?;
    let email = validation::email(&input.email)?;
    let fees_paid = validation::non_negative("Fees paid", input.fees_paid)?;

    let course = courses
        .iter()
        .find(|c| c.id == input.course_id)
        .ok_or_else(|| AppError::validation("Selected course does not exist"))?;
    if fees_paid > course.fee {
        return Err(AppError::validation(format!(
            "Fees paid ({:.2}) cannot exceed the course fee ({:.2})",
            fees_paid, course.fee
        )));
    }

    let duplicate = existing
        .iter()
        .filter(|s| Some(s.id.as_str()) != editing)
        .any(|s| s.student_id.eq_ignore_ascii_case(&student_id));
    if duplicate {
        return Err(AppError::conflict(format!(
            "Student ID {} already exists",
            student_id
        )));
    }

    Ok(StudentInput {
        student_id,
        name,
        email,
        phone: input.phone.trim().to_string(),
        course_id: course.id.clone(),
        fees_paid,
        status: input.status,
        enrollment_date: input.enrollment_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, student_input};
    use chrono::Utc;
    use common::model::course::{CourseLevel, CourseStatus};
    use common::model::student::StudentStatus;

    fn course(id: &str, fee: f64) -> Course {
        Course {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: String::new(),
            fee,
            duration: "1 month".to_string(),
            level: CourseLevel::Beginner,
            status: CourseStatus::Active,
            created_at: Utc::now(),
        }
    }

    fn student(id: &str, student_id: &str) -> Student {
        Student {
            id: id.to_string(),
            student_id: student_id.to_string(),
            name: "Existing".to_string(),
            email: "existing@example.com".to_string(),
            phone: String::new(),
            course_id: "c1".to_string(),
            fees_paid: 0.0,
            status: StudentStatus::Active,
            enrollment_date: date(2024, 1, 1),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn duplicate_student_id_is_a_conflict() {
        let courses = [course("c1", 100.0)];
        let existing = [student("s1", "STU001")];
        let err = validate_student(&student_input("stu001", "c1", 0.0), &existing, &courses, None)
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn editing_a_student_may_keep_its_id() {
        let courses = [course("c1", 100.0)];
        let existing = [student("s1", "STU001")];
        let input = student_input("STU001", "c1", 10.0);
        assert!(validate_student(&input, &existing, &courses, Some("s1")).is_ok());
        assert!(validate_student(&input, &existing, &courses, Some("s2")).is_err());
    }

    #[test]
    fn fees_are_capped_by_the_course_fee() {
        let courses = [course("c1", 100.0)];
        assert!(validate_student(&student_input("A1", "c1", 100.0), &[], &courses, None).is_ok());
        let err = validate_student(&student_input("A1", "c1", 100.5), &[], &courses, None)
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn course_must_exist() {
        let err = validate_student(&student_input("A1", "nope", 0.0), &[], &[], None).unwrap_err();
        assert_eq!(err.to_string(), "Selected course does not exist");
    }

    #[test]
    fn returns_normalized_fields() {
        let courses = [course("c1", 100.0)];
        let mut input = student_input(" A1 ", "c1", 5.0);
        input.email = " A1@Example.com ".to_string();
        let normalized = validate_student(&input, &[], &courses, None).unwrap();
        assert_eq!(normalized.student_id, "A1");
        assert_eq!(normalized.email, "a1@example.com");
    }
}
