pub mod artifact;
pub mod factory;
