pub mod escape;
pub mod generator;
pub mod imports;
pub mod naming;
pub mod renderers;
