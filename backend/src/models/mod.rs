pub mod course;
pub mod note;
pub mod project;
pub mod validation;

pub use course::{CategoryPriority, Course, CoursePatch, CourseStatus, ImportantStatus, NewCourse};
pub use note::{CourseNote, NewNote, Note};
pub use project::{NewProject, Project, ProjectPatch};
pub use validation::{FieldError, ValidationErrors};
