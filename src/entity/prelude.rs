//! 预导入模块，方便使用

pub use super::answers::{ActiveModel as AnswerActiveModel, Entity as Answers, Model as AnswerModel};
pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::course_sub_professors::{
    ActiveModel as CourseSubProfessorActiveModel, Entity as CourseSubProfessors,
    Model as CourseSubProfessorModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::files::{ActiveModel as FileActiveModel, Entity as Files, Model as FileModel};
pub use super::questions::{
    ActiveModel as QuestionActiveModel, Entity as Questions, Model as QuestionModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
