use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Default,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    ToSchema,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum CourseLevel {
    #[default]
    #[sea_orm(string_value = "Beginner")]
    Beginner,
    #[sea_orm(string_value = "Intermediate")]
    Intermediate,
    #[sea_orm(string_value = "Advanced")]
    Advanced,
}

impl std::fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseLevel::Beginner => write!(f, "Beginner"),
            CourseLevel::Intermediate => write!(f, "Intermediate"),
            CourseLevel::Advanced => write!(f, "Advanced"),
        }
    }
}

impl std::str::FromStr for CourseLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Beginner" => Ok(CourseLevel::Beginner),
            "Intermediate" => Ok(CourseLevel::Intermediate),
            "Advanced" => Ok(CourseLevel::Advanced),
            other => Err(format!(
                "unknown level `{other}`, expected one of `Beginner`, `Intermediate`, `Advanced`"
            )),
        }
    }
}

/// 课程实体
/// - price_cents: 价格(美分)，0 表示免费课程
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price_cents: i64,
    pub image: String,
    pub category: String,
    pub level: CourseLevel,
    pub duration: String,
    pub instructor: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    pub fn is_free(&self) -> bool {
        self.price_cents == 0
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::subscriptions::Entity")]
    Subscriptions,
}

impl Related<super::subscriptions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscriptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
