use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 选课状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub enum EnrollmentStatus {
    Active,    // 在读
    Completed, // 已完成
    Withdrawn, // 已退课
    Suspended, // 已暂停
}

impl<'de> Deserialize<'de> for EnrollmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<EnrollmentStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的选课状态: '{s}'. 支持的状态: active, completed, withdrawn, suspended"
            ))
        })
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrollmentStatus::Active => write!(f, "active"),
            EnrollmentStatus::Completed => write!(f, "completed"),
            EnrollmentStatus::Withdrawn => write!(f, "withdrawn"),
            EnrollmentStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for EnrollmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(EnrollmentStatus::Active),
            "completed" => Ok(EnrollmentStatus::Completed),
            "withdrawn" => Ok(EnrollmentStatus::Withdrawn),
            "suspended" => Ok(EnrollmentStatus::Suspended),
            _ => Err(format!("Invalid enrollment status: {s}")),
        }
    }
}

/// 选课关系：学生 <-> 课程
///
/// 只做状态流转，从不删除。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub course_id: i64,
    pub student_id: i64,
    pub status: EnrollmentStatus,
    pub progress: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 授课角色
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub enum InstructorRole {
    Instructor, // 主讲
    Assistant,  // 助教
    Grader,     // 评卷人
}

impl<'de> Deserialize<'de> for InstructorRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<InstructorRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的授课角色: '{s}'. 支持的角色: instructor, assistant, grader"
            ))
        })
    }
}

impl std::fmt::Display for InstructorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstructorRole::Instructor => write!(f, "instructor"),
            InstructorRole::Assistant => write!(f, "assistant"),
            InstructorRole::Grader => write!(f, "grader"),
        }
    }
}

impl std::str::FromStr for InstructorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instructor" => Ok(InstructorRole::Instructor),
            "assistant" => Ok(InstructorRole::Assistant),
            "grader" => Ok(InstructorRole::Grader),
            _ => Err(format!("Invalid instructor role: {s}")),
        }
    }
}

/// 授课关系：教师 <-> 课程
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct InstructorAssignment {
    pub id: i64,
    pub course_id: i64,
    pub instructor_id: i64,
    pub role: InstructorRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
