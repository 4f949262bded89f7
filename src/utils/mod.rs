// Utility modules

pub mod date;
pub mod time;
