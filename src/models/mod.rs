//! 数据模型定义
//!
//! 每个业务域一个子模块，内部按 entities / requests / responses 划分。

pub mod common;

pub mod assessments;
pub mod assignments;
pub mod courses;
pub mod enrollments;
pub mod invitations;
pub mod profiles;
pub mod questions;
pub mod submissions;
pub mod system;

pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::{ApiResponse, ErrorCode, error_response, error_status};

/// 程序启动时间，用于记录预处理耗时
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
