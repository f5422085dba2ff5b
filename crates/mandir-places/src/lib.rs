pub mod client;
pub mod error;
pub mod normalize;
pub mod resolver;
pub mod types;

pub use client::{Photo, PlacesClient};
pub use error::PlacesError;
pub use normalize::normalize_place;
pub use resolver::{PlacesApi, TempleResolver};
pub use types::{RawPlace, SearchResponse};
