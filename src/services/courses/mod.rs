//! 课程服务
//!
//! 课程是选课图与作业的挂载点。状态变更只走独立接口且仅限管理员；
//! 删除受前置条件保护：有选课或作业的课程只能归档。

mod change_status;
mod create;
mod delete;
mod get;
mod list;
mod update;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::courses::{
    entities::Course,
    requests::{
        ChangeCourseStatusRequest, CourseListQuery, CreateCourseRequest, UpdateCourseRequest,
    },
    responses::CourseListResponse,
};
use crate::policy::{Actor, CourseRelation, Resource};
use crate::storage::Storage;

pub struct CourseService {
    storage: Arc<dyn Storage>,
}

impl CourseService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn create_course(&self, actor: &Actor, req: CreateCourseRequest) -> Result<Course> {
        create::create_course(self, actor, req).await
    }

    pub async fn get_course(&self, actor: &Actor, id: i64) -> Result<Course> {
        get::get_course(self, actor, id).await
    }

    pub async fn list_courses(
        &self,
        actor: &Actor,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        list::list_courses(self, actor, query).await
    }

    pub async fn update_course(
        &self,
        actor: &Actor,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Course> {
        update::update_course(self, actor, id, update).await
    }

    pub async fn change_status(
        &self,
        actor: &Actor,
        id: i64,
        req: ChangeCourseStatusRequest,
    ) -> Result<Course> {
        change_status::change_status(self, actor, id, req).await
    }

    pub async fn delete_course(&self, actor: &Actor, id: i64) -> Result<()> {
        delete::delete_course(self, actor, id).await
    }
}

/// 读写路径的轻量资源描述符：计数不参与这些决策，置零即可
pub(super) async fn course_resource(
    service: &CourseService,
    actor: &Actor,
    course: &Course,
    changes_status: bool,
) -> Result<Resource> {
    let relation = super::course_relation(&service.storage, course.id, actor).await?;
    Ok(course_resource_with(course, relation, 0, 0, 0, changes_status))
}

/// 删除与状态流转需要完整计数的资源描述符
pub(super) async fn course_resource_full(
    service: &CourseService,
    actor: &Actor,
    course: &Course,
    changes_status: bool,
) -> Result<Resource> {
    let relation = super::course_relation(&service.storage, course.id, actor).await?;
    let active_enrollments = service.storage.count_active_enrollments(course.id).await?;
    let assignments = service.storage.count_course_assignments(course.id).await?;
    let active_instructors = service.storage.count_active_instructors(course.id).await?;
    Ok(course_resource_with(
        course,
        relation,
        active_enrollments,
        assignments,
        active_instructors,
        changes_status,
    ))
}

fn course_resource_with(
    course: &Course,
    relation: CourseRelation,
    active_enrollments: u64,
    assignments: u64,
    active_instructors: u64,
    changes_status: bool,
) -> Resource {
    Resource::Course {
        status: course.status.clone(),
        creator_id: course.creator_id,
        relation,
        active_enrollments,
        assignments,
        active_instructors,
        changes_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::VocademyError;
    use crate::models::courses::entities::CourseStatus;
    use crate::models::profiles::entities::{ApprovalStatus, ProfileRole};
    use crate::services::testing::{
        actor_of, memory_storage, seed_active_course, seed_approved, seed_profile,
    };

    fn create_req(title: &str) -> CreateCourseRequest {
        CreateCourseRequest {
            title: title.to_string(),
            description: None,
            capacity: 20,
            starts_at: None,
            ends_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_course_assigns_creator_as_instructor() {
        let storage = memory_storage().await;
        let service = CourseService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;

        let course = service
            .create_course(&actor_of(&leader), create_req("Welding Basics"))
            .await
            .unwrap();
        assert_eq!(course.status, CourseStatus::Draft);

        let assignment = storage
            .get_instructor_assignment(course.id, leader.id)
            .await
            .unwrap();
        assert!(assignment.is_some());
    }

    #[tokio::test]
    async fn test_students_cannot_create_courses() {
        let storage = memory_storage().await;
        let service = CourseService::new(storage.clone());
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;

        let err = service
            .create_course(&actor_of(&student), create_req("Nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::RoleForbidden(_)));
    }

    #[tokio::test]
    async fn test_unapproved_actor_cannot_browse_catalogue() {
        let storage = memory_storage().await;
        let service = CourseService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        seed_active_course(&storage, &leader).await;
        let pending = seed_profile(
            &storage,
            "pending@example.com",
            ProfileRole::Student,
            ApprovalStatus::Pending,
        )
        .await;

        let err = service
            .list_courses(&actor_of(&pending), CourseListQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::NotApproved(_)));
    }

    #[tokio::test]
    async fn test_draft_course_hidden_from_outsiders() {
        let storage = memory_storage().await;
        let service = CourseService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;

        let course = service
            .create_course(&actor_of(&leader), create_req("Hidden Draft"))
            .await
            .unwrap();

        // 无关主体拿到 404，资源存在性不泄露
        let err = service
            .get_course(&actor_of(&student), course.id)
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::NotFound(_)));

        // 创建者自己是 instructor，可见
        let seen = service
            .get_course(&actor_of(&leader), course.id)
            .await
            .unwrap();
        assert_eq!(seen.id, course.id);
    }

    #[tokio::test]
    async fn test_status_change_is_admin_only() {
        let storage = memory_storage().await;
        let service = CourseService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let admin = seed_approved(&storage, "admin@example.com", ProfileRole::Admin).await;

        let course = service
            .create_course(&actor_of(&leader), create_req("Status Flow"))
            .await
            .unwrap();

        let err = service
            .change_status(
                &actor_of(&leader),
                course.id,
                ChangeCourseStatusRequest {
                    status: CourseStatus::Active,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::RoleForbidden(_)));

        let activated = service
            .change_status(
                &actor_of(&admin),
                course.id,
                ChangeCourseStatusRequest {
                    status: CourseStatus::Active,
                },
            )
            .await
            .unwrap();
        assert_eq!(activated.status, CourseStatus::Active);
    }

    #[tokio::test]
    async fn test_reactivation_requires_an_active_instructor() {
        let storage = memory_storage().await;
        let service = CourseService::new(storage.clone());
        let admin = seed_approved(&storage, "admin@example.com", ProfileRole::Admin).await;

        // 管理员直接建课，不产生任何授课指派
        let course = storage
            .create_course(admin.id, create_req("Orphan Course"))
            .await
            .unwrap();
        storage
            .set_course_status(course.id, CourseStatus::Archived)
            .await
            .unwrap();

        let err = service
            .change_status(
                &actor_of(&admin),
                course.id,
                ChangeCourseStatusRequest {
                    status: CourseStatus::Active,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_delete_refused_while_course_in_use() {
        let storage = memory_storage().await;
        let service = CourseService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;
        let admin = seed_approved(&storage, "admin@example.com", ProfileRole::Admin).await;

        let course = seed_active_course(&storage, &leader).await;
        storage.enroll_student(course.id, student.id).await.unwrap();

        let err = service
            .delete_course(&actor_of(&leader), course.id)
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::InvalidState(_)));

        // 管理员同样受前置条件约束
        let err = service
            .delete_course(&actor_of(&admin), course.id)
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_empty_course_deleted_by_creator() {
        let storage = memory_storage().await;
        let service = CourseService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;

        let course = service
            .create_course(&actor_of(&leader), create_req("Short-lived"))
            .await
            .unwrap();

        service
            .delete_course(&actor_of(&leader), course.id)
            .await
            .unwrap();
        assert!(storage.get_course_by_id(course.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_listing_shows_only_active_to_non_admins() {
        let storage = memory_storage().await;
        let service = CourseService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;
        let admin = seed_approved(&storage, "admin@example.com", ProfileRole::Admin).await;

        seed_active_course(&storage, &leader).await;
        service
            .create_course(&actor_of(&leader), create_req("Still Draft"))
            .await
            .unwrap();

        let public = service
            .list_courses(&actor_of(&student), CourseListQuery::default())
            .await
            .unwrap();
        assert_eq!(public.items.len(), 1);

        let all = service
            .list_courses(&actor_of(&admin), CourseListQuery::default())
            .await
            .unwrap();
        assert_eq!(all.items.len(), 2);
    }
}
