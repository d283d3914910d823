//! Record and cell value model

mod record;
mod record_serde;
mod reflected;
mod value;

pub use record::*;
pub use reflected::*;
pub use value::*;
