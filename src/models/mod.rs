pub mod airport;
pub mod cell;
pub mod flight;
