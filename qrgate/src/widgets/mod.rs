pub(crate) mod chrome;
pub(crate) mod gate;
pub(crate) mod generator;
pub(crate) mod sign_in;
