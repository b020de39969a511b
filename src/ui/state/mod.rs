pub mod schedule_state;
pub mod view_state;

pub use schedule_state::*;
pub use view_state::*;
