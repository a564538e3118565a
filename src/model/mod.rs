pub mod data_core;
pub mod formatter;
pub mod merge;
pub mod path;
pub mod session;
pub mod shadow_tree;
