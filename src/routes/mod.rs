pub mod assessments;

pub mod assignments;

pub mod courses;

pub mod enrollments;

pub mod invitations;

pub mod profiles;

pub mod questions;

pub mod submissions;

pub mod system;

pub use assessments::configure_assessment_routes;
pub use assignments::configure_assignment_routes;
pub use courses::configure_course_routes;
pub use enrollments::configure_enrollment_routes;
pub use invitations::configure_invitation_routes;
pub use profiles::configure_profile_routes;
pub use questions::configure_question_routes;
pub use submissions::configure_submission_routes;
pub use system::configure_system_routes;
