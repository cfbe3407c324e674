//! In-memory implementations of the persistence ports
//!
//! `InMemoryStore` plays the database. A unit of work stages its writes
//! privately and applies them to the store only on commit, so tests can
//! check that failed commands leave the store untouched.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicI64, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{Course, CourseId, Disenrollment, Enrollment, Student, StudentId};
use crate::domain::ports::{
    CourseRepository, StudentListReader, StudentRepository, StudentRow, UnitOfWork,
    UnitOfWorkFactory,
};
use crate::error::DomainError;

// ============================================================================
// In-Memory Store
// ============================================================================

#[derive(Default)]
pub struct InMemoryStore {
    students: RwLock<BTreeMap<StudentId, Student>>,
    courses: RwLock<HashMap<String, Course>>,
    disenrollments: RwLock<Vec<(StudentId, Disenrollment)>>,
    next_student_id: AtomicI64,
    next_course_id: AtomicI64,
    commits: AtomicUsize,
    failing_begins: AtomicU32,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a course
    pub fn with_course(self, name: &str, credits: i32) -> Self {
        let id = self.next_course_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.courses.write().unwrap().insert(
            name.to_string(),
            Course {
                id: CourseId(id),
                name: name.to_string(),
                credits,
            },
        );
        self
    }

    /// Insert a student directly, bypassing units of work
    pub fn insert_student(&self, mut student: Student) -> StudentId {
        let id = student.id.unwrap_or_else(|| self.allocate_student_id());
        student.id = Some(id);
        self.students.write().unwrap().insert(id, student);
        id
    }

    /// Make the next `n` calls to `begin` fail with a transient error
    pub fn fail_next_begins(&self, n: u32) {
        self.failing_begins.store(n, Ordering::SeqCst);
    }

    pub fn course(&self, name: &str) -> Option<Course> {
        self.courses.read().unwrap().get(name).cloned()
    }

    pub fn student(&self, id: StudentId) -> Option<Student> {
        self.students.read().unwrap().get(&id).cloned()
    }

    pub fn students(&self) -> Vec<Student> {
        self.students.read().unwrap().values().cloned().collect()
    }

    pub fn disenrollments(&self) -> Vec<(StudentId, Disenrollment)> {
        self.disenrollments.read().unwrap().clone()
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    fn allocate_student_id(&self) -> StudentId {
        StudentId(self.next_student_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

// ============================================================================
// In-Memory Unit of Work
// ============================================================================

#[derive(Clone)]
pub struct InMemoryUnitOfWorkFactory {
    store: Arc<InMemoryStore>,
}

impl InMemoryUnitOfWorkFactory {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UnitOfWorkFactory for InMemoryUnitOfWorkFactory {
    type UnitOfWork = InMemoryUnitOfWork;

    async fn begin(&self) -> Result<InMemoryUnitOfWork, DomainError> {
        let failing = self
            .store
            .failing_begins
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(DomainError::Unavailable("connection reset".to_string()));
        }

        Ok(InMemoryUnitOfWork {
            store: self.store.clone(),
            staged: RwLock::new(Staged::default()),
        })
    }
}

#[derive(Default)]
struct Staged {
    saved: BTreeMap<StudentId, Student>,
    deleted: BTreeSet<StudentId>,
    disenrollments: Vec<(StudentId, Disenrollment)>,
}

pub struct InMemoryUnitOfWork {
    store: Arc<InMemoryStore>,
    staged: RwLock<Staged>,
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    fn students(&self) -> Box<dyn StudentRepository + '_> {
        Box::new(InMemoryStudentRepository { uow: self })
    }

    fn courses(&self) -> Box<dyn CourseRepository + '_> {
        Box::new(InMemoryCourseRepository {
            store: &self.store,
        })
    }

    async fn commit(self) -> Result<(), DomainError> {
        let staged = self.staged.into_inner().unwrap();
        {
            let mut students = self.store.students.write().unwrap();
            for id in &staged.deleted {
                students.remove(id);
            }
            students.extend(staged.saved);
        }
        {
            let mut disenrollments = self.store.disenrollments.write().unwrap();
            disenrollments.retain(|(id, _)| !staged.deleted.contains(id));
            disenrollments.extend(staged.disenrollments);
        }
        self.store.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct InMemoryStudentRepository<'a> {
    uow: &'a InMemoryUnitOfWork,
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository<'_> {
    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, DomainError> {
        let staged = self.uow.staged.read().unwrap();
        if staged.deleted.contains(&id) {
            return Ok(None);
        }
        if let Some(student) = staged.saved.get(&id) {
            return Ok(Some(student.clone()));
        }
        Ok(self.uow.store.student(id))
    }

    async fn save(&self, student: &mut Student) -> Result<StudentId, DomainError> {
        let id = match student.id {
            Some(id) => id,
            None => self.uow.store.allocate_student_id(),
        };
        student.id = Some(id);

        let mut staged = self.uow.staged.write().unwrap();
        for disenrollment in student.take_disenrollments() {
            staged.disenrollments.push((id, disenrollment));
        }
        staged.deleted.remove(&id);
        staged.saved.insert(id, student.clone());
        Ok(id)
    }

    async fn delete(&self, id: StudentId) -> Result<(), DomainError> {
        let mut staged = self.uow.staged.write().unwrap();
        staged.saved.remove(&id);
        staged.disenrollments.retain(|(sid, _)| *sid != id);
        staged.deleted.insert(id);
        Ok(())
    }
}

struct InMemoryCourseRepository<'a> {
    store: &'a InMemoryStore,
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository<'_> {
    async fn find_by_name(&self, name: &str) -> Result<Option<Course>, DomainError> {
        Ok(self.store.course(name))
    }
}

// ============================================================================
// In-Memory Student List Reader
// ============================================================================

/// Reads committed students only, projected the way the SQL view is
pub struct InMemoryStudentListReader {
    store: Arc<InMemoryStore>,
}

impl InMemoryStudentListReader {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl StudentListReader for InMemoryStudentListReader {
    async fn list(
        &self,
        enrolled_in: Option<&str>,
        number_of_courses: Option<i32>,
    ) -> Result<Vec<StudentRow>, DomainError> {
        let rows = self
            .store
            .students()
            .iter()
            .filter(|s| {
                enrolled_in.map_or(true, |course| {
                    s.enrollments().any(|(_, e)| e.course.name == course)
                })
            })
            .filter(|s| {
                number_of_courses.map_or(true, |n| s.number_of_enrollments() as i32 == n)
            })
            .map(project)
            .collect();

        Ok(rows)
    }
}

fn project(student: &Student) -> StudentRow {
    let name = |e: Option<&Enrollment>| e.map(|e| e.course.name.clone());
    let grade = |e: Option<&Enrollment>| e.map(|e| e.grade.to_string());
    let credits = |e: Option<&Enrollment>| e.map(|e| e.course.credits);

    StudentRow {
        id: student.id.map(|id| id.0).unwrap_or_default(),
        name: student.name.clone(),
        email: student.email.clone(),
        course1: name(student.first_enrollment()),
        course1_grade: grade(student.first_enrollment()),
        course1_credits: credits(student.first_enrollment()),
        course2: name(student.second_enrollment()),
        course2_grade: grade(student.second_enrollment()),
        course2_credits: credits(student.second_enrollment()),
    }
}
