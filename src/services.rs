pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod employee_service;
pub use employee_service::EmployeeService;
pub mod work_order_service;
pub use work_order_service::WorkOrderService;
