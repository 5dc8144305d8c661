pub mod elpris;
pub mod traits;

pub use elpris::ElprisClient;
pub use traits::PriceSource;
