pub mod free_slots;
pub mod intervals;
pub mod request;
pub mod time_range;
