pub mod factory;
pub mod stores;
