//! 授课关系实体
//!
//! (course_id, instructor_id) 唯一。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "instructor_assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub instructor_id: i64,
    pub role: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::InstructorId",
        to = "super::profiles::Column::Id"
    )]
    Instructor,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_instructor_assignment(
        self,
    ) -> crate::models::enrollments::entities::InstructorAssignment {
        use crate::models::enrollments::entities::{InstructorAssignment, InstructorRole};
        use chrono::{DateTime, Utc};

        InstructorAssignment {
            id: self.id,
            course_id: self.course_id,
            instructor_id: self.instructor_id,
            role: self
                .role
                .parse::<InstructorRole>()
                .unwrap_or(InstructorRole::Instructor),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
