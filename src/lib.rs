// Calendar Layout Library
// Event placement, time grid geometry and drag gestures for week and day views

pub mod models;
pub mod services;
pub mod utils;
