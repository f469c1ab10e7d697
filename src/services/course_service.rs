use crate::entities::{CourseLevel, course_entity as courses};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::decimal_to_cents;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

const DEFAULT_CATEGORY: &str = "General";
const DEFAULT_INSTRUCTOR: &str = "Expert Instructor";

#[derive(Clone)]
pub struct CourseService {
    pool: DatabaseConnection,
}

impl CourseService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 课程列表（支持关键词/分类/难度/免费筛选），按创建时间倒序
    pub async fn list_courses(&self, query: &CourseQuery) -> AppResult<Vec<CourseResponse>> {
        let mut condition = Condition::all();

        if let Some(search) = query.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            let pattern = format!("%{}%", search.to_lowercase());
            condition = condition.add(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(courses::Column::Title)))
                            .like(pattern.as_str()),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(courses::Column::Description)))
                            .like(pattern.as_str()),
                    ),
            );
        }
        if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
            condition = condition.add(courses::Column::Category.eq(category));
        }
        if let Some(level) = &query.level {
            condition = condition.add(courses::Column::Level.eq(level.clone()));
        }
        match query.is_free {
            Some(true) => condition = condition.add(courses::Column::PriceCents.eq(0)),
            Some(false) => condition = condition.add(courses::Column::PriceCents.gt(0)),
            None => {}
        }

        let models = courses::Entity::find()
            .filter(condition)
            .order_by_desc(courses::Column::CreatedAt)
            .order_by_desc(courses::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(models.into_iter().map(CourseResponse::from).collect())
    }

    pub async fn get_course(&self, course_id: i32) -> AppResult<CourseResponse> {
        Ok(self.find_course(course_id).await?.into())
    }

    /// 查找课程实体，不存在时返回 NotFound
    pub async fn find_course(&self, course_id: i32) -> AppResult<courses::Model> {
        courses::Entity::find_by_id(course_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))
    }

    pub async fn create_course(&self, request: CreateCourseRequest) -> AppResult<CourseResponse> {
        let title = required_text(&request.title, "Please provide title and description")?;
        let description =
            required_text(&request.description, "Please provide title and description")?;
        let price_cents = match request.price {
            Some(price) => decimal_to_cents(price)?,
            None => 0,
        };

        let now = Utc::now();
        let model = courses::ActiveModel {
            title: Set(title),
            description: Set(description),
            price_cents: Set(price_cents),
            image: Set(request.image.unwrap_or_default()),
            category: Set(
                non_blank(request.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            ),
            level: Set(request.level.unwrap_or_default()),
            duration: Set(request.duration.unwrap_or_default()),
            instructor: Set(
                non_blank(request.instructor).unwrap_or_else(|| DEFAULT_INSTRUCTOR.to_string()),
            ),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Course {} created: {}", model.id, model.title);
        Ok(model.into())
    }

    /// 部分更新课程。已有订阅的价格快照不受影响
    pub async fn update_course(
        &self,
        course_id: i32,
        request: UpdateCourseRequest,
    ) -> AppResult<CourseResponse> {
        let mut model = self.find_course(course_id).await?.into_active_model();

        if let Some(title) = &request.title {
            model.title = Set(required_text(title, "Title must not be empty")?);
        }
        if let Some(description) = &request.description {
            model.description = Set(required_text(description, "Description must not be empty")?);
        }
        if let Some(price) = request.price {
            model.price_cents = Set(decimal_to_cents(price)?);
        }
        if let Some(image) = request.image {
            model.image = Set(image);
        }
        if let Some(category) = non_blank(request.category) {
            model.category = Set(category);
        }
        if let Some(level) = request.level {
            model.level = Set(level);
        }
        if let Some(duration) = request.duration {
            model.duration = Set(duration);
        }
        if let Some(instructor) = non_blank(request.instructor) {
            model.instructor = Set(instructor);
        }
        model.updated_at = Set(Utc::now());

        let updated = model.update(&self.pool).await?;
        log::info!("Course {} updated", updated.id);
        Ok(updated.into())
    }

    pub async fn delete_course(&self, course_id: i32) -> AppResult<()> {
        let model = self.find_course(course_id).await?;
        model.delete(&self.pool).await?;
        log::info!("Course {course_id} deleted");
        Ok(())
    }

    /// 所有分类（去重，升序）
    pub async fn list_categories(&self) -> AppResult<Vec<String>> {
        let categories: Vec<String> = courses::Entity::find()
            .select_only()
            .column(courses::Column::Category)
            .distinct()
            .order_by_asc(courses::Column::Category)
            .into_tuple()
            .all(&self.pool)
            .await?;
        Ok(categories)
    }

    pub async fn get_stats(&self) -> AppResult<CourseStatsResponse> {
        let total = courses::Entity::find().count(&self.pool).await? as i64;
        let free = courses::Entity::find()
            .filter(courses::Column::PriceCents.eq(0))
            .count(&self.pool)
            .await? as i64;
        let paid = courses::Entity::find()
            .filter(courses::Column::PriceCents.gt(0))
            .count(&self.pool)
            .await? as i64;

        let by_category: Vec<(String, i64)> = courses::Entity::find()
            .select_only()
            .column(courses::Column::Category)
            .column_as(courses::Column::Id.count(), "count")
            .group_by(courses::Column::Category)
            .order_by_asc(courses::Column::Category)
            .into_tuple()
            .all(&self.pool)
            .await?;

        let by_level: Vec<(CourseLevel, i64)> = courses::Entity::find()
            .select_only()
            .column(courses::Column::Level)
            .column_as(courses::Column::Id.count(), "count")
            .group_by(courses::Column::Level)
            .order_by_asc(courses::Column::Level)
            .into_tuple()
            .all(&self.pool)
            .await?;

        Ok(CourseStatsResponse {
            total,
            free,
            paid,
            by_category: by_category
                .into_iter()
                .map(|(category, count)| CategoryCount { category, count })
                .collect(),
            by_level: by_level
                .into_iter()
                .map(|(level, count)| LevelCount { level, count })
                .collect(),
        })
    }
}

fn required_text(value: &str, message: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(message.to_string()));
    }
    Ok(trimmed.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
