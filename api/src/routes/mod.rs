pub mod ask;
pub mod health_route;
pub mod home_route;
