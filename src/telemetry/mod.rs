mod entry;
mod loader;
mod normalizer;
mod sample;
mod store;
mod timestamp;

pub use loader::{load, LoadError};
pub use normalizer::{NormalizeReport, Normalized};
pub use sample::{EntityId, Sample};
pub use store::{QueryError, SeriesStore};
