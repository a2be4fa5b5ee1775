pub(crate) mod generator_form;
