pub mod food;
pub mod weather;
