// Price history and snapshot retrieval
pub mod cache;
pub mod error;
pub mod provider;
pub mod yahoo;

#[cfg(test)]
pub(crate) mod fixture;

// Re-export commonly used types
pub use cache::MemoizedProvider;
pub use error::DataError;
pub use provider::PriceProvider;
pub use yahoo::YahooProvider;
