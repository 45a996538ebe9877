pub mod proposition;
pub mod world;
