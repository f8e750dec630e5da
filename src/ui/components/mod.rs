pub mod emoji_picker;
pub mod keyboard_view;
pub mod lesson_menu;
pub mod output_area;
pub mod prediction_bar;
pub mod quiz_panel;
