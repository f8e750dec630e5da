pub mod display;
pub mod grid;
pub mod layout;
pub mod shift;
