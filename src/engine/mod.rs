pub mod emoji;
pub mod lesson;
pub mod prediction;
pub mod quiz;
