use crate::entities::{
    course_entity as courses, subscription_entity as subscriptions, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::{PriceQuote, PromoPricing};
use crate::utils::cents_to_decimal;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};

const ALREADY_SUBSCRIBED: &str = "You are already subscribed to this course";

#[derive(Clone)]
pub struct SubscriptionService {
    pool: DatabaseConnection,
    pricing: PromoPricing,
}

impl SubscriptionService {
    pub fn new(pool: DatabaseConnection, pricing: PromoPricing) -> Self {
        Self { pool, pricing }
    }

    /// 订阅课程
    ///
    /// 流程:
    /// 1. 校验用户、课程存在
    /// 2. 检查是否已订阅（快速失败）
    /// 3. 按课程当前价格与优惠码计算应付金额
    /// 4. 写入订阅记录；并发重复写入由 (user_id, course_id) 唯一索引拒绝，转换为 Conflict
    pub async fn subscribe(
        &self,
        user_id: i32,
        request: SubscribeRequest,
    ) -> AppResult<SubscriptionResponse> {
        let course_id = request
            .course_id
            .ok_or_else(|| AppError::ValidationError("Course ID is required".to_string()))?;

        users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let course = courses::Entity::find_by_id(course_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        let existing = subscriptions::Entity::find()
            .filter(subscriptions::Column::UserId.eq(user_id))
            .filter(subscriptions::Column::CourseId.eq(course_id))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict(ALREADY_SUBSCRIBED.to_string()));
        }

        let quote = self
            .pricing
            .quote(course.price_cents, request.promo_code.as_deref())?;

        let inserted = self.insert_subscription(user_id, &course, quote).await?;

        log::info!(
            "User {} subscribed to course {} (paid {} cents, discount {} cents)",
            user_id,
            course_id,
            inserted.price_paid_cents,
            inserted.discount_cents
        );

        Ok(SubscriptionResponse::new(inserted, Some(course.into())))
    }

    /// 写入订阅记录。(user_id, course_id) 唯一索引冲突转换为 Conflict
    async fn insert_subscription(
        &self,
        user_id: i32,
        course: &courses::Model,
        quote: PriceQuote,
    ) -> AppResult<subscriptions::Model> {
        subscriptions::ActiveModel {
            user_id: Set(user_id),
            course_id: Set(course.id),
            price_paid_cents: Set(quote.final_cents),
            original_price_cents: Set(course.price_cents),
            discount_cents: Set(quote.discount_cents),
            promo_code: Set(quote.promo_code),
            subscribed_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict(ALREADY_SUBSCRIBED.to_string())
            }
            _ => AppError::DatabaseError(e),
        })
    }

    /// 当前用户的订阅列表，最新在前
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<SubscriptionResponse>> {
        let rows = subscriptions::Entity::find()
            .filter(subscriptions::Column::UserId.eq(user_id))
            .find_also_related(courses::Entity)
            .order_by_desc(subscriptions::Column::SubscribedAt)
            .order_by_desc(subscriptions::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(sub, course)| SubscriptionResponse::new(sub, course.map(Into::into)))
            .collect())
    }

    pub async fn get_subscription(
        &self,
        subscription_id: i32,
        user_id: i32,
    ) -> AppResult<SubscriptionResponse> {
        let (sub, course) = subscriptions::Entity::find_by_id(subscription_id)
            .find_also_related(courses::Entity)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Subscription not found".to_string()))?;

        if sub.user_id != user_id {
            return Err(AppError::Forbidden(
                "Not authorized to view this subscription".to_string(),
            ));
        }

        Ok(SubscriptionResponse::new(sub, course.map(Into::into)))
    }

    /// 取消订阅，仅限本人
    pub async fn unsubscribe(&self, subscription_id: i32, user_id: i32) -> AppResult<()> {
        let sub = subscriptions::Entity::find_by_id(subscription_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Subscription not found".to_string()))?;

        if sub.user_id != user_id {
            return Err(AppError::Forbidden(
                "Not authorized to delete this subscription".to_string(),
            ));
        }

        sub.delete(&self.pool).await?;
        log::info!("User {user_id} unsubscribed, subscription {subscription_id} removed");
        Ok(())
    }

    pub async fn get_stats(&self, user_id: i32) -> AppResult<SubscriptionStatsResponse> {
        let rows = subscriptions::Entity::find()
            .filter(subscriptions::Column::UserId.eq(user_id))
            .all(&self.pool)
            .await?;

        let mut total_paid = 0i64;
        let mut total_saved = 0i64;
        let mut free_courses = 0i64;
        for sub in &rows {
            total_paid += sub.price_paid_cents;
            total_saved += sub.discount_cents;
            if sub.price_paid_cents == 0 {
                free_courses += 1;
            }
        }
        let total_courses = rows.len() as i64;

        Ok(SubscriptionStatsResponse {
            total_courses,
            total_invested: cents_to_decimal(total_paid),
            total_saved: cents_to_decimal(total_saved),
            free_courses,
            paid_courses: total_courses - free_courses,
        })
    }

    pub async fn check_subscription(
        &self,
        user_id: i32,
        course_id: i32,
    ) -> AppResult<CheckSubscriptionResponse> {
        let found = subscriptions::Entity::find()
            .filter(subscriptions::Column::UserId.eq(user_id))
            .filter(subscriptions::Column::CourseId.eq(course_id))
            .find_also_related(courses::Entity)
            .one(&self.pool)
            .await?;

        Ok(CheckSubscriptionResponse {
            is_subscribed: found.is_some(),
            subscription: found
                .map(|(sub, course)| SubscriptionResponse::new(sub, course.map(Into::into))),
        })
    }

    /// 试算优惠码价格，不落库
    pub async fn validate_promo(
        &self,
        request: ValidatePromoRequest,
    ) -> AppResult<PromoValidationResponse> {
        let (promo_code, course_id) = match (request.promo_code.as_deref(), request.course_id) {
            (Some(code), Some(id)) if !code.trim().is_empty() => (code, id),
            _ => {
                return Err(AppError::ValidationError(
                    "Promo code and course ID are required".to_string(),
                ));
            }
        };

        let course = courses::Entity::find_by_id(course_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        let code = self.pricing.check_code(promo_code)?;
        let quote = self.pricing.quote(course.price_cents, Some(&code))?;

        Ok(PromoValidationResponse {
            valid: true,
            code,
            percentage: self.pricing.discount_percent(),
            amount: cents_to_decimal(quote.discount_cents),
            original_price: cents_to_decimal(course.price_cents),
            final_price: cents_to_decimal(quote.final_cents),
        })
    }
}
