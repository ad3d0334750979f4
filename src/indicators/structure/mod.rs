//! Structure detection: flat zones and their volume profile

pub mod flats;
pub mod value_area;

pub use flats::*;
pub use value_area::*;
