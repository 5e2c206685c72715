// Terminal presentation layer

pub mod board;
pub mod card;
pub mod format;
pub mod input;
pub mod watch;

pub use board::render_board;
pub use card::render_card;
pub use input::parse_target_date;
pub use watch::{watch, LiveBoard};
