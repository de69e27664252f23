pub mod advisories;
pub mod handlers;
pub mod packing;
