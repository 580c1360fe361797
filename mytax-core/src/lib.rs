pub mod calculations;
pub mod models;
pub mod sanitize;

#[cfg(test)]
mod test_support;

pub use models::*;
