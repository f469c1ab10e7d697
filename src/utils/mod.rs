pub mod email;
pub mod jwt;
pub mod money;
pub mod password;

pub use email::*;
pub use jwt::*;
pub use money::*;
pub use password::*;
