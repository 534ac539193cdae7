pub mod dashboard;
pub mod employees;
pub mod files;
pub mod registry;
pub mod work_orders;
