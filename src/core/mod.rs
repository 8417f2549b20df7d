pub mod batch;
pub mod coords;
pub mod import;
pub mod log;
pub mod normalize;
pub mod resolver;
