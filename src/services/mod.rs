pub mod auth_service;
pub mod course_service;
pub mod pricing;
pub mod subscription_service;

pub use auth_service::AuthService;
pub use course_service::CourseService;
pub use pricing::{PriceQuote, PricingError, PromoPricing};
pub use subscription_service::SubscriptionService;
