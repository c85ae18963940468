mod asset;
mod error;
mod snapshot;
mod view;

pub use asset::Asset;
pub use error::QuoteError;
pub use snapshot::PriceSnapshot;
pub use view::{ViewState, LOAD_ERROR_MESSAGE};
