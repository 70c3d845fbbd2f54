//! 预导入模块，方便使用

pub use super::ai_assessments::{
    ActiveModel as AiAssessmentActiveModel, Entity as AiAssessments, Model as AiAssessmentModel,
};
pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::final_grades::{
    ActiveModel as FinalGradeActiveModel, Entity as FinalGrades, Model as FinalGradeModel,
};
pub use super::instructor_assignments::{
    ActiveModel as InstructorAssignmentActiveModel, Entity as InstructorAssignments,
    Model as InstructorAssignmentModel,
};
pub use super::invitations::{
    ActiveModel as InvitationActiveModel, Entity as Invitations, Model as InvitationModel,
};
pub use super::profiles::{
    ActiveModel as ProfileActiveModel, Entity as Profiles, Model as ProfileModel,
};
pub use super::questions::{
    ActiveModel as QuestionActiveModel, Entity as Questions, Model as QuestionModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::system_settings::{
    ActiveModel as SystemSettingActiveModel, Entity as SystemSettings, Model as SystemSettingModel,
};
