pub mod dashboard;
pub mod equipment;
pub mod people;
pub mod record;
pub mod stock;
pub mod work_order;
