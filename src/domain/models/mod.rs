pub mod appointment;
pub mod appointment_type;
pub mod business;
pub mod notification;
