mod aabb;
mod ray;

pub use aabb::AABB;
pub use ray::Ray;
