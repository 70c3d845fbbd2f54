//! 业务服务层
//!
//! 每个服务持有存储句柄，入参携带经过认证的 Actor。所有操作先经
//! 策略引擎得到显式决策，再触碰存储；任何变更操作都校验受影响行数。
//! 服务返回类型化错误，HTTP 状态码的翻译只发生在路由层。

pub mod assessments;
pub mod assignments;
pub mod courses;
pub mod enrollments;
pub mod invitations;
pub mod profiles;
pub mod questions;
pub mod submissions;
pub mod system;

use std::sync::Arc;

use crate::errors::{Result, VocademyError};
use crate::policy::{Actor, CourseRelation};
use crate::storage::Storage;

/// 审批门禁，未通过审批的主体除读取本人档案外一律拒绝
///
/// 走策略引擎的路径由引擎的第一条规则兜住；不经引擎的角色捷径
/// （管理员短路、按角色收窄的列表）必须先过这道门。
pub(crate) fn require_approved(actor: &Actor) -> Result<()> {
    if actor.is_approved() {
        Ok(())
    } else {
        Err(VocademyError::not_approved("账号尚未通过审批"))
    }
}

/// 查出主体与课程的关系事实，供策略引擎决策
pub(crate) async fn course_relation(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    actor: &Actor,
) -> Result<CourseRelation> {
    let is_instructor = storage
        .get_instructor_assignment(course_id, actor.id)
        .await?
        .is_some();
    let enrollment = storage
        .get_enrollment(course_id, actor.id)
        .await?
        .map(|e| e.status);

    Ok(CourseRelation {
        is_instructor,
        enrollment,
    })
}
