pub mod straighten;

pub use straighten::{Straighten, StraightenOptions, StraightenReport};
