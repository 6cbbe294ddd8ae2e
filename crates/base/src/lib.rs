mod cancel;
pub use cancel::*;

pub mod logger;
pub use logger::*;
