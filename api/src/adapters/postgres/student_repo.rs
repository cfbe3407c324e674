//! PostgreSQL adapter for StudentRepository
//!
//! Writes go to the normalized `enrollments` table and, in the same
//! transaction, to the denormalized slot columns on `students` that the read
//! side lists from.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::entities::{Enrollment, EnrollmentNumber, Grade, Student, StudentId};
use crate::domain::ports::StudentRepository;
use crate::entity::{courses, disenrollments, enrollments, students};
use crate::error::DomainError;

/// PostgreSQL implementation of StudentRepository, bound to a transaction
pub struct PostgresStudentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> PostgresStudentRepository<'a> {
    pub fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    async fn replace_enrollments(&self, id: StudentId, student: &Student) -> Result<(), DomainError> {
        enrollments::Entity::delete_many()
            .filter(enrollments::Column::StudentId.eq(id.0))
            .exec(self.txn)
            .await?;

        for (number, enrollment) in student.enrollments() {
            enrollments::ActiveModel {
                id: NotSet,
                student_id: Set(id.0),
                course_id: Set(enrollment.course.id.0),
                grade: Set(enrollment.grade.to_string()),
                slot: Set(number.ordinal() as i16),
            }
            .insert(self.txn)
            .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl StudentRepository for PostgresStudentRepository<'_> {
    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, DomainError> {
        let Some(row) = students::Entity::find_by_id(id.0).one(self.txn).await? else {
            return Ok(None);
        };

        let rows = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(id.0))
            .order_by_asc(enrollments::Column::Slot)
            .find_also_related(courses::Entity)
            .all(self.txn)
            .await?;

        let mut slots: [Option<Enrollment>; 2] = [None, None];
        for (enrollment, course) in rows {
            let course = course.ok_or_else(|| {
                DomainError::Internal(format!(
                    "Enrollment {} references missing course {}",
                    enrollment.id, enrollment.course_id
                ))
            })?;
            let number = EnrollmentNumber::from_ordinal(i32::from(enrollment.slot)).ok_or_else(
                || DomainError::Internal(format!("Enrollment {} has slot {}", enrollment.id, enrollment.slot)),
            )?;
            let grade: Grade = enrollment
                .grade
                .parse()
                .map_err(DomainError::Internal)?;

            slots[number.index()] = Some(Enrollment::new(course.into(), grade));
        }

        let [first, second] = slots;
        Ok(Some(Student::restore(
            StudentId(row.id),
            row.name,
            row.email,
            first,
            second,
        )))
    }

    async fn save(&self, student: &mut Student) -> Result<StudentId, DomainError> {
        let (first_name, first_credits, first_grade) = slot_columns(student.first_enrollment());
        let (second_name, second_credits, second_grade) =
            slot_columns(student.second_enrollment());

        let model = students::ActiveModel {
            id: student.id.map_or(NotSet, |id| Set(id.0)),
            name: Set(student.name.clone()),
            email: Set(student.email.clone()),
            first_course_name: Set(first_name),
            first_course_credits: Set(first_credits),
            first_course_grade: Set(first_grade),
            second_course_name: Set(second_name),
            second_course_credits: Set(second_credits),
            second_course_grade: Set(second_grade),
            number_of_enrollments: Set(student.number_of_enrollments() as i32),
        };

        let id = match student.id {
            Some(id) => {
                model.update(self.txn).await?;
                id
            }
            None => StudentId(model.insert(self.txn).await?.id),
        };
        student.id = Some(id);

        self.replace_enrollments(id, student).await?;

        for disenrollment in student.take_disenrollments() {
            disenrollments::ActiveModel {
                id: NotSet,
                student_id: Set(id.0),
                course_id: Set(disenrollment.course.id.0),
                comment: Set(disenrollment.comment),
                disenrolled_at: Set(disenrollment.disenrolled_at.fixed_offset()),
            }
            .insert(self.txn)
            .await?;
        }

        tracing::debug!(student_id = %id, "Student saved");
        Ok(id)
    }

    async fn delete(&self, id: StudentId) -> Result<(), DomainError> {
        enrollments::Entity::delete_many()
            .filter(enrollments::Column::StudentId.eq(id.0))
            .exec(self.txn)
            .await?;
        disenrollments::Entity::delete_many()
            .filter(disenrollments::Column::StudentId.eq(id.0))
            .exec(self.txn)
            .await?;
        students::Entity::delete_by_id(id.0).exec(self.txn).await?;

        tracing::debug!(student_id = %id, "Student deleted");
        Ok(())
    }
}

/// Denormalized (name, credits, grade) columns for one slot
fn slot_columns(enrollment: Option<&Enrollment>) -> (Option<String>, Option<i32>, Option<String>) {
    match enrollment {
        Some(e) => (
            Some(e.course.name.clone()),
            Some(e.course.credits),
            Some(e.grade.to_string()),
        ),
        None => (None, None, None),
    }
}
