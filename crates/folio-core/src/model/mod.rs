mod event;
mod project;
mod summary;

pub use event::*;
pub use project::*;
pub use summary::*;
