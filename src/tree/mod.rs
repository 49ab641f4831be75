pub mod drop_resolver;
pub mod navigator;
pub mod normalize;
