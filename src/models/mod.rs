pub mod analysis;
pub mod enums;
pub mod lab;
pub mod survey;

pub use analysis::*;
pub use enums::*;
pub use lab::{NumericLabs, ReferenceRange};
pub use survey::*;
