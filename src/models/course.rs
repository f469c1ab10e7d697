use crate::entities::{CourseLevel, course_entity};
use crate::utils::cents_to_decimal;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    #[schema(value_type = f64, example = 99.99)]
    pub price: Decimal,
    pub is_free: bool,
    pub image: String,
    pub category: String,
    pub level: CourseLevel,
    pub duration: String,
    pub instructor: String,
    pub created_at: DateTime<Utc>,
}

impl From<course_entity::Model> for CourseResponse {
    fn from(m: course_entity::Model) -> Self {
        Self {
            is_free: m.is_free(),
            price: cents_to_decimal(m.price_cents),
            id: m.id,
            title: m.title,
            description: m.description,
            image: m.image,
            category: m.category,
            level: m.level,
            duration: m.duration,
            instructor: m.instructor,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CourseQuery {
    /// 标题或描述包含的关键词（不区分大小写）
    pub search: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub level: Option<CourseLevel>,
    /// true: 仅免费课程; false: 仅付费课程
    #[serde(default, deserialize_with = "empty_as_none")]
    pub is_free: Option<bool>,
}

/// 查询参数为空字符串时视为未提供（`?level=&isFree=`）
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCourseRequest {
    #[schema(example = "React Mastery Course")]
    pub title: String,
    #[schema(example = "Hooks, context and state management.")]
    pub description: String,
    #[schema(value_type = Option<f64>, example = 79.99)]
    pub price: Option<Decimal>,
    pub image: Option<String>,
    #[schema(example = "Frontend Development")]
    pub category: Option<String>,
    pub level: Option<CourseLevel>,
    #[schema(example = "8 weeks")]
    pub duration: Option<String>,
    pub instructor: Option<String>,
}

/// 部分更新；未提供的字段保持不变
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub level: Option<CourseLevel>,
    pub duration: Option<String>,
    pub instructor: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseListResponse {
    pub count: usize,
    pub courses: Vec<CourseResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryListResponse {
    pub count: usize,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct LevelCount {
    pub level: CourseLevel,
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseStatsResponse {
    pub total: i64,
    pub free: i64,
    pub paid: i64,
    pub by_category: Vec<CategoryCount>,
    pub by_level: Vec<LevelCount>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web::Query;

    #[test]
    fn test_blank_filters_are_ignored() {
        let query = Query::<CourseQuery>::from_query("search=&category=&level=&isFree=")
            .unwrap()
            .into_inner();
        assert_eq!(query.level, None);
        assert_eq!(query.is_free, None);
    }

    #[test]
    fn test_filters_are_parsed() {
        let query = Query::<CourseQuery>::from_query("level=Advanced&isFree=false")
            .unwrap()
            .into_inner();
        assert_eq!(query.level, Some(CourseLevel::Advanced));
        assert_eq!(query.is_free, Some(false));

        let query = Query::<CourseQuery>::from_query("").unwrap().into_inner();
        assert_eq!(query.level, None);
        assert_eq!(query.is_free, None);
    }

    #[test]
    fn test_invalid_filters_are_rejected() {
        assert!(Query::<CourseQuery>::from_query("isFree=maybe").is_err());
        assert!(Query::<CourseQuery>::from_query("level=Expert").is_err());
    }
}
