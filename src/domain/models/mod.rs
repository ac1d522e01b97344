mod action;
mod author;
mod event;
mod message;
mod record;
mod store;
mod textarea;
mod waiting;

pub use action::*;
pub use author::*;
pub use event::*;
pub use message::*;
pub use record::*;
pub use store::*;
pub use textarea::*;
pub use waiting::*;
