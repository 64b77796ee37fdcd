pub mod assignments;
pub mod auth;
pub mod courses;
pub mod files;
pub mod permissions;
pub mod questions;
pub mod submissions;
pub mod users;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use files::FileService;
pub use questions::QuestionService;
pub use submissions::SubmissionService;
pub use users::UserService;
