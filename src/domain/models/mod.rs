mod classifier;
mod commands;
mod event;
mod message;
mod progress;
mod rubric;
mod session;
mod transport;

pub use classifier::*;
pub use commands::*;
pub use event::*;
pub use message::*;
pub use progress::*;
pub use rubric::*;
pub use session::*;
pub use transport::*;
