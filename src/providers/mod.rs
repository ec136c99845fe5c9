pub mod rest;
pub mod util;

pub use rest::RestConsoleApi;
