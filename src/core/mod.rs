pub mod error;
pub mod events;
pub mod traits;

#[cfg(test)]
pub mod test_support;
