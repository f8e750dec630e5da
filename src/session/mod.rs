pub mod buffer;
pub mod input;
pub mod keyboard;
pub mod modifier;
