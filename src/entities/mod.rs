pub mod courses;
pub mod subscriptions;
pub mod users;

pub use courses::CourseLevel;

pub use courses as course_entity;
pub use subscriptions as subscription_entity;
pub use users as user_entity;
