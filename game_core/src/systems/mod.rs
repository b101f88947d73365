pub mod ai;
pub mod collision;
pub mod movement;
pub mod sanitize;
pub mod scoring;

pub use ai::*;
pub use collision::*;
pub use movement::*;
pub use sanitize::*;
pub use scoring::*;
