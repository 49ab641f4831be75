pub mod defaults;
pub mod element_factory;
