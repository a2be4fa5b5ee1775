pub(crate) mod sign_in_panel;
