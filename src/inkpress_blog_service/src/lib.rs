pub mod blog_service;
pub mod telemetry;

pub use blog_service::BlogService;
pub use telemetry::init_tracing;
