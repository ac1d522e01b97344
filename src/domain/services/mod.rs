pub mod actions;
mod bubble;
mod bubble_list;
pub mod events;
mod gate;
mod heartbeat;
mod panel;
mod scroll;

pub use bubble::*;
pub use bubble_list::*;
pub use gate::*;
pub use heartbeat::*;
pub use panel::*;
pub use scroll::*;
