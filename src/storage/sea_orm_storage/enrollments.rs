use super::SeaOrmStorage;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::instructor_assignments::{
    ActiveModel as InstructorActiveModel, Column as InstructorColumn,
    Entity as InstructorAssignments,
};
use crate::errors::{Result, VocademyError};
use crate::models::{
    PaginationInfo,
    enrollments::{
        entities::{Enrollment, EnrollmentStatus, InstructorAssignment, InstructorRole},
        requests::{EnrollmentListQuery, UpdateEnrollmentRequest},
        responses::EnrollmentListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 学生选课，初始状态 active。(course_id, student_id) 唯一约束兜底重复选课
    pub async fn enroll_student_impl(&self, course_id: i64, student_id: i64) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id),
            status: Set(EnrollmentStatus::Active.to_string()),
            progress: Set(0.0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("创建选课记录失败: {e}")))?;

        Ok(result.into_enrollment())
    }

    /// 获取选课关系
    pub async fn get_enrollment_impl(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 更新选课状态/进度（只流转，不删除）
    pub async fn update_enrollment_impl(
        &self,
        course_id: i64,
        student_id: i64,
        update: UpdateEnrollmentRequest,
    ) -> Result<Option<Enrollment>> {
        let existing = self.get_enrollment_impl(course_id, student_id).await?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(existing.id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        if let Some(progress) = update.progress {
            model.progress = Set(progress.clamp(0.0, 100.0));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("更新选课记录失败: {e}")))?;

        self.get_enrollment_impl(course_id, student_id).await
    }

    /// 分页列出课程的选课记录
    pub async fn list_enrollments_with_pagination_impl(
        &self,
        course_id: i64,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse> {
        let page = query.pagination.page() as u64;
        let size = query.pagination.size() as u64;

        let mut select = Enrollments::find().filter(Column::CourseId.eq(course_id));

        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询选课总数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询选课列表失败: {e}")))?;

        Ok(EnrollmentListResponse {
            items: items.into_iter().map(|m| m.into_enrollment()).collect(),
            pagination: PaginationInfo::new(page as i64, size as i64, total as i64),
        })
    }

    /// 指派授课教师，(course_id, instructor_id) 唯一
    pub async fn assign_instructor_impl(
        &self,
        course_id: i64,
        instructor_id: i64,
        role: InstructorRole,
    ) -> Result<InstructorAssignment> {
        let now = chrono::Utc::now().timestamp();

        let model = InstructorActiveModel {
            course_id: Set(course_id),
            instructor_id: Set(instructor_id),
            role: Set(role.to_string()),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("创建授课记录失败: {e}")))?;

        Ok(result.into_instructor_assignment())
    }

    /// 获取授课关系
    pub async fn get_instructor_assignment_impl(
        &self,
        course_id: i64,
        instructor_id: i64,
    ) -> Result<Option<InstructorAssignment>> {
        let result = InstructorAssignments::find()
            .filter(InstructorColumn::CourseId.eq(course_id))
            .filter(InstructorColumn::InstructorId.eq(instructor_id))
            .one(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询授课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_instructor_assignment()))
    }

    /// 列出课程的授课教师
    pub async fn list_instructors_impl(&self, course_id: i64) -> Result<Vec<InstructorAssignment>> {
        let items = InstructorAssignments::find()
            .filter(InstructorColumn::CourseId.eq(course_id))
            .order_by_asc(InstructorColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询授课列表失败: {e}")))?;

        Ok(items
            .into_iter()
            .map(|m| m.into_instructor_assignment())
            .collect())
    }
}
