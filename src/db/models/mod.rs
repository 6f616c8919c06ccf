//! 文档模型

pub mod rating;
pub mod restaurant;

pub use rating::{Rating, RatingPatch, RatingSubmit};
pub use restaurant::{Restaurant, RestaurantCreate, RestaurantUpdate, SubscriptionTier};
