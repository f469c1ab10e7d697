pub mod common;
pub mod course;
pub mod subscription;
pub mod user;

pub use common::*;
pub use course::*;
pub use subscription::*;
pub use user::*;
