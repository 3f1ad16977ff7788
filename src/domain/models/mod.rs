pub mod audit;
pub mod base_pay;
pub mod concept;
pub mod employee;
pub mod movement;
pub mod period;
pub mod tenant;
pub mod time_entry;
