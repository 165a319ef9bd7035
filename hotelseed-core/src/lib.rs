//! Generation of hotel booking fixtures: the records themselves, the templates
//! they are built from, and the links between them.

mod catalog;
mod generate;
mod link;
mod models;
mod rng;

pub use catalog::*;
pub use generate::*;
pub use link::*;
pub use models::*;
pub use rng::*;
