pub mod parse;
pub mod status;
pub mod update;
pub mod validate;
