// Module exports for models

pub mod countdown_event;
pub mod settings;
