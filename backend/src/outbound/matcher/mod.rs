//! Student matcher adapters.

mod registered_students;

pub use registered_students::{REGISTERED_STUDENT_CONFIDENCE, RegisteredStudentsMatcher};
