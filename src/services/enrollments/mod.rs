//! 选课与授课关系服务
//!
//! 选课图是授权模型的数据来源：学生凭在读选课访问课程资源，
//! 教师凭授课指派管理与评分。关系只做状态流转，从不删除。

mod assign_instructor;
mod enroll;
mod list;
mod update;

use std::sync::Arc;

use crate::errors::{Result, VocademyError};
use crate::models::enrollments::{
    entities::{Enrollment, InstructorAssignment},
    requests::{AssignInstructorRequest, EnrollStudentRequest, EnrollmentListQuery,
        UpdateEnrollmentRequest},
    responses::EnrollmentListResponse,
};
use crate::policy::Actor;
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Arc<dyn Storage>,
}

impl EnrollmentService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn enroll_student(
        &self,
        actor: &Actor,
        course_id: i64,
        req: EnrollStudentRequest,
    ) -> Result<Enrollment> {
        enroll::enroll_student(self, actor, course_id, req).await
    }

    pub async fn update_enrollment(
        &self,
        actor: &Actor,
        course_id: i64,
        student_id: i64,
        update: UpdateEnrollmentRequest,
    ) -> Result<Enrollment> {
        update::update_enrollment(self, actor, course_id, student_id, update).await
    }

    pub async fn assign_instructor(
        &self,
        actor: &Actor,
        course_id: i64,
        req: AssignInstructorRequest,
    ) -> Result<InstructorAssignment> {
        assign_instructor::assign_instructor(self, actor, course_id, req).await
    }

    pub async fn list_enrollments(
        &self,
        actor: &Actor,
        course_id: i64,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse> {
        list::list_enrollments(self, actor, course_id, query).await
    }
}

/// 课程成员管理的统一门禁：管理员或该课程的在任教师
///
/// 与课程毫无关系的主体拿到 404，已选课学生拿到 403。
pub(super) async fn require_course_manager(
    service: &EnrollmentService,
    actor: &Actor,
    course_id: i64,
) -> Result<()> {
    super::require_approved(actor)?;
    if actor.is_admin() {
        return Ok(());
    }

    let relation = super::course_relation(&service.storage, course_id, actor).await?;
    if relation.is_instructor {
        return Ok(());
    }
    if relation.enrollment.is_some() {
        return Err(VocademyError::role_forbidden("只有课程教师可以管理成员"));
    }
    Err(VocademyError::not_found("course not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enrollments::entities::{EnrollmentStatus, InstructorRole};
    use crate::models::profiles::entities::{ApprovalStatus, ProfileRole};
    use crate::services::testing::{
        actor_of, memory_storage, seed_active_course, seed_approved, seed_profile,
    };

    #[tokio::test]
    async fn test_instructor_enrolls_student() {
        let storage = memory_storage().await;
        let service = EnrollmentService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;
        let course = seed_active_course(&storage, &leader).await;

        let enrollment = service
            .enroll_student(
                &actor_of(&leader),
                course.id,
                EnrollStudentRequest {
                    student_id: student.id,
                },
            )
            .await
            .unwrap();
        assert_eq!(enrollment.status, EnrollmentStatus::Active);
        assert_eq!(enrollment.progress, 0.0);
    }

    #[tokio::test]
    async fn test_students_cannot_enroll_themselves() {
        let storage = memory_storage().await;
        let service = EnrollmentService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;
        let course = seed_active_course(&storage, &leader).await;

        let err = service
            .enroll_student(
                &actor_of(&student),
                course.id,
                EnrollStudentRequest {
                    student_id: student.id,
                },
            )
            .await
            .unwrap_err();
        // 与课程无关的主体拿到 404
        assert!(matches!(err, crate::errors::VocademyError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_capacity_limit_enforced() {
        let storage = memory_storage().await;
        let service = EnrollmentService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let course = storage
            .create_course(
                leader.id,
                crate::models::courses::requests::CreateCourseRequest {
                    title: "Tiny Class".to_string(),
                    description: None,
                    capacity: 1,
                    starts_at: None,
                    ends_at: None,
                },
            )
            .await
            .unwrap();
        storage
            .assign_instructor(course.id, leader.id, InstructorRole::Instructor)
            .await
            .unwrap();

        let first = seed_approved(&storage, "one@example.com", ProfileRole::Student).await;
        let second = seed_approved(&storage, "two@example.com", ProfileRole::Student).await;

        service
            .enroll_student(
                &actor_of(&leader),
                course.id,
                EnrollStudentRequest {
                    student_id: first.id,
                },
            )
            .await
            .unwrap();

        let err = service
            .enroll_student(
                &actor_of(&leader),
                course.id,
                EnrollStudentRequest {
                    student_id: second.id,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, crate::errors::VocademyError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_enrollment_status_transitions_never_delete() {
        let storage = memory_storage().await;
        let service = EnrollmentService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;
        let course = seed_active_course(&storage, &leader).await;

        storage.enroll_student(course.id, student.id).await.unwrap();

        let updated = service
            .update_enrollment(
                &actor_of(&leader),
                course.id,
                student.id,
                UpdateEnrollmentRequest {
                    status: Some(EnrollmentStatus::Withdrawn),
                    progress: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, EnrollmentStatus::Withdrawn);

        // 退课后关系仍然存在，保留历史
        assert!(
            storage
                .get_enrollment(course.id, student.id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_only_course_leaders_become_instructors() {
        let storage = memory_storage().await;
        let service = EnrollmentService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let helper = seed_approved(&storage, "helper@example.com", ProfileRole::CourseLeader).await;
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;
        let course = seed_active_course(&storage, &leader).await;

        let assigned = service
            .assign_instructor(
                &actor_of(&leader),
                course.id,
                AssignInstructorRequest {
                    instructor_id: helper.id,
                    role: InstructorRole::Assistant,
                },
            )
            .await
            .unwrap();
        assert_eq!(assigned.role, InstructorRole::Assistant);

        let err = service
            .assign_instructor(
                &actor_of(&leader),
                course.id,
                AssignInstructorRequest {
                    instructor_id: student.id,
                    role: InstructorRole::Grader,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, crate::errors::VocademyError::Validation(_)));
    }

    #[tokio::test]
    async fn test_progress_out_of_range_rejected() {
        let storage = memory_storage().await;
        let service = EnrollmentService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;
        let course = seed_active_course(&storage, &leader).await;
        storage.enroll_student(course.id, student.id).await.unwrap();

        let err = service
            .update_enrollment(
                &actor_of(&leader),
                course.id,
                student.id,
                UpdateEnrollmentRequest {
                    status: None,
                    progress: Some(120.0),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, crate::errors::VocademyError::Validation(_)));
    }

    #[tokio::test]
    async fn test_member_list_restricted_to_managers() {
        let storage = memory_storage().await;
        let service = EnrollmentService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;
        let course = seed_active_course(&storage, &leader).await;
        storage.enroll_student(course.id, student.id).await.unwrap();

        let listed = service
            .list_enrollments(&actor_of(&leader), course.id, EnrollmentListQuery::default())
            .await
            .unwrap();
        assert_eq!(listed.items.len(), 1);

        // 已选课学生能看到课程，但不能翻看成员名册
        let err = service
            .list_enrollments(&actor_of(&student), course.id, EnrollmentListQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, crate::errors::VocademyError::RoleForbidden(_)));
    }

    #[tokio::test]
    async fn test_unapproved_admin_cannot_manage_members() {
        let storage = memory_storage().await;
        let service = EnrollmentService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let course = seed_active_course(&storage, &leader).await;
        let pending_admin = seed_profile(
            &storage,
            "newadmin@example.com",
            ProfileRole::Admin,
            ApprovalStatus::Pending,
        )
        .await;

        // 审批门禁先于管理员短路
        let err = service
            .list_enrollments(
                &actor_of(&pending_admin),
                course.id,
                EnrollmentListQuery::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, crate::errors::VocademyError::NotApproved(_)));
    }
}
