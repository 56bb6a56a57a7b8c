//! Custom widgets.

mod completion_dialog;
mod text_input_with_paste;

pub use completion_dialog::completion_dialog;
pub use text_input_with_paste::text_input_with_paste;
