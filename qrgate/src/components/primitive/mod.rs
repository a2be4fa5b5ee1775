pub(crate) mod action_button;
pub(crate) mod color_field;
pub(crate) mod input_style;
