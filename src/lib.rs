pub mod codec;
pub mod config;
pub mod error;
pub mod optimizer;
pub mod params;
pub mod scorer;
pub mod space;
pub mod textmodel;
// cmd and reports belong to the binary (main.rs).
