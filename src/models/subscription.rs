use crate::entities::subscription_entity;
use crate::models::CourseResponse;
use crate::utils::cents_to_decimal;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    #[schema(example = 1)]
    pub course_id: Option<i32>,
    /// 付费课程必填，不区分大小写
    #[schema(example = "LEARN50")]
    pub promo_code: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidatePromoRequest {
    #[schema(example = "learn50")]
    pub promo_code: Option<String>,
    #[schema(example = 1)]
    pub course_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    /// 课程已被删除时为 null
    pub course: Option<CourseResponse>,
    #[schema(value_type = f64, example = 49.99)]
    pub price_paid: Decimal,
    #[schema(value_type = f64, example = 99.99)]
    pub original_price: Decimal,
    #[schema(value_type = f64, example = 50.0)]
    pub discount_applied: Decimal,
    pub promo_code: Option<String>,
    pub subscribed_at: DateTime<Utc>,
}

impl SubscriptionResponse {
    pub fn new(
        subscription: subscription_entity::Model,
        course: Option<CourseResponse>,
    ) -> Self {
        Self {
            id: subscription.id,
            user_id: subscription.user_id,
            course_id: subscription.course_id,
            course,
            price_paid: cents_to_decimal(subscription.price_paid_cents),
            original_price: cents_to_decimal(subscription.original_price_cents),
            discount_applied: cents_to_decimal(subscription.discount_cents),
            promo_code: subscription.promo_code,
            subscribed_at: subscription.subscribed_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MyCoursesResponse {
    pub count: usize,
    pub courses: Vec<SubscriptionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatsResponse {
    pub total_courses: i64,
    #[schema(value_type = f64)]
    pub total_invested: Decimal,
    #[schema(value_type = f64)]
    pub total_saved: Decimal,
    pub free_courses: i64,
    pub paid_courses: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckSubscriptionResponse {
    pub is_subscribed: bool,
    pub subscription: Option<SubscriptionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromoValidationResponse {
    pub valid: bool,
    pub code: String,
    pub percentage: u32,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    #[schema(value_type = f64)]
    pub original_price: Decimal,
    #[schema(value_type = f64)]
    pub final_price: Decimal,
}
