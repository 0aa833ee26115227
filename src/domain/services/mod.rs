mod interview;
mod renderer;
mod sessions;
mod tracker;

pub use interview::*;
pub use renderer::*;
pub use sessions::*;
pub use tracker::*;
