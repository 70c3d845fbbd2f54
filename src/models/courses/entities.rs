use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub enum CourseStatus {
    Draft,    // 草稿
    Active,   // 开课中
    Archived, // 已归档
}

impl<'de> Deserialize<'de> for CourseStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "draft" => Ok(CourseStatus::Draft),
            "active" => Ok(CourseStatus::Active),
            "archived" => Ok(CourseStatus::Archived),
            _ => Err(serde::de::Error::custom(format!(
                "无效的课程状态: '{s}'. 支持的状态: draft, active, archived"
            ))),
        }
    }
}

impl std::fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseStatus::Draft => write!(f, "draft"),
            CourseStatus::Active => write!(f, "active"),
            CourseStatus::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for CourseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(CourseStatus::Draft),
            "active" => Ok(CourseStatus::Active),
            "archived" => Ok(CourseStatus::Archived),
            _ => Err(format!("Invalid course status: {s}")),
        }
    }
}

/// 课程
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: CourseStatus,
    pub creator_id: i64,
    pub capacity: i32,
    pub starts_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ends_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
