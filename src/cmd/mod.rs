pub mod compare;
pub mod config;
pub mod probe;
pub mod suggest;
