pub mod user;
pub mod product;
pub mod order;
pub mod view;

pub use user::*;
pub use product::*;
pub use order::*;
pub use view::*;
