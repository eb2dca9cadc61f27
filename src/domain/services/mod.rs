pub mod availability;
pub mod hours;
pub mod overlap;
pub mod scheduler;
pub mod timefmt;
