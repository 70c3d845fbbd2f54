//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 错误分类对应 API 层的状态码映射，见 `models::common::response`。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_vocademy_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum VocademyError {
            $($variant(String),)*
        }

        impl VocademyError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(VocademyError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(VocademyError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(VocademyError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl VocademyError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        VocademyError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_vocademy_errors! {
    // 认证与授权
    AuthRequired("E001", "Authentication Required"),
    NotApproved("E002", "Account Not Approved"),
    RoleForbidden("E003", "Role Forbidden"),
    NotFound("E004", "Resource Not Found"),
    // 通用状态冲突（如重复初始化、归档课程直接激活）
    InvalidState("E005", "Invalid State"),
    Validation("E006", "Validation Error"),
    // 提交生命周期与邀请的专用状态冲突
    SubmissionLocked("E016", "Submission Locked"),
    IncompleteSubmission("E017", "Incomplete Submission"),
    AlreadyAssessed("E018", "Already Assessed"),
    AlreadyUsed("E019", "Invitation Already Used"),
    NotEnrolled("E020", "Not Enrolled"),
    // 评分预言机不可用或超时
    UpstreamFailure("E007", "Upstream Failure"),
    // 变更操作未影响任何行：被存储层静默过滤，绝不能当成功上报
    NoRowsAffected("E008", "No Rows Affected"),
    // 基础设施
    DatabaseConfig("E009", "Database Configuration Error"),
    DatabaseConnection("E010", "Database Connection Error"),
    DatabaseOperation("E011", "Database Operation Error"),
    Serialization("E012", "Serialization Error"),
    CacheConnection("E013", "Cache Connection Error"),
    CachePluginNotFound("E014", "Cache Plugin Not Found"),
    DateParse("E015", "Date Parse Error"),
}

impl VocademyError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for VocademyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for VocademyError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for VocademyError {
    fn from(err: sea_orm::DbErr) -> Self {
        VocademyError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for VocademyError {
    fn from(err: std::io::Error) -> Self {
        VocademyError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for VocademyError {
    fn from(err: serde_json::Error) -> Self {
        VocademyError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for VocademyError {
    fn from(err: chrono::ParseError) -> Self {
        VocademyError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VocademyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(VocademyError::auth_required("test").code(), "E001");
        assert_eq!(VocademyError::role_forbidden("test").code(), "E003");
        assert_eq!(VocademyError::invalid_state("test").code(), "E005");
        assert_eq!(VocademyError::no_rows_affected("test").code(), "E008");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            VocademyError::not_approved("test").error_type(),
            "Account Not Approved"
        );
        assert_eq!(
            VocademyError::upstream_failure("test").error_type(),
            "Upstream Failure"
        );
    }

    #[test]
    fn test_error_message() {
        let err = VocademyError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = VocademyError::invalid_state("already submitted");
        let formatted = err.format_simple();
        assert!(formatted.contains("Invalid State"));
        assert!(formatted.contains("already submitted"));
    }
}
