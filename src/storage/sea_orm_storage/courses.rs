use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::{assignments, enrollments, instructor_assignments};
use crate::errors::{Result, VocademyError};
use crate::models::{
    PaginationInfo,
    courses::{
        entities::{Course, CourseStatus},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    enrollments::entities::EnrollmentStatus,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建课程，初始状态为 draft
    pub async fn create_course_impl(
        &self,
        creator_id: i64,
        req: CreateCourseRequest,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            status: Set(CourseStatus::Draft.to_string()),
            creator_id: Set(creator_id),
            capacity: Set(req.capacity),
            starts_at: Set(req.starts_at.map(|t| t.timestamp())),
            ends_at: Set(req.ends_at.map(|t| t.timestamp())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let page = query.pagination.page() as u64;
        let size = query.pagination.size() as u64;

        let mut select = Courses::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Title.contains(&escaped));
        }

        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询课程总数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(CourseListResponse {
            items: items.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo::new(page as i64, size as i64, total as i64),
        })
    }

    /// 更新课程基本信息（状态变更走 set_course_status）
    pub async fn update_course_impl(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let existing = self.get_course_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(capacity) = update.capacity {
            model.capacity = Set(capacity);
        }

        if let Some(starts_at) = update.starts_at {
            model.starts_at = Set(Some(starts_at.timestamp()));
        }

        if let Some(ends_at) = update.ends_at {
            model.ends_at = Set(Some(ends_at.timestamp()));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("更新课程失败: {e}")))?;

        self.get_course_by_id_impl(id).await
    }

    /// 课程状态流转
    pub async fn set_course_status_impl(&self, id: i64, status: CourseStatus) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Courses::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(status.to_string()),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("更新课程状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除课程（前置条件由服务层校验）
    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计课程的在读选课数
    pub async fn count_active_enrollments_impl(&self, course_id: i64) -> Result<u64> {
        let count = enrollments::Entity::find()
            .filter(enrollments::Column::CourseId.eq(course_id))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Active.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("统计选课数失败: {e}")))?;

        Ok(count)
    }

    /// 统计课程的作业数
    pub async fn count_course_assignments_impl(&self, course_id: i64) -> Result<u64> {
        let count = assignments::Entity::find()
            .filter(assignments::Column::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("统计作业数失败: {e}")))?;

        Ok(count)
    }

    /// 统计课程的授课教师数
    pub async fn count_active_instructors_impl(&self, course_id: i64) -> Result<u64> {
        let count = instructor_assignments::Entity::find()
            .filter(instructor_assignments::Column::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("统计授课教师数失败: {e}")))?;

        Ok(count)
    }
}
