pub mod cli;
pub mod codegen;
pub mod document;
pub mod editor;
pub mod factory;
pub mod model;
pub mod persistence;
pub mod projection;
pub mod sandbox;
pub mod trace;
pub mod tree;
