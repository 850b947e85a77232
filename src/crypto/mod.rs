pub mod fields;
pub mod transcript;
