pub mod command;
pub mod service;
pub mod state;
pub mod update;

pub use command::{parse, AssignMode, Command};
pub use service::TeamupService;
pub use state::{TeamupState, MAX_NICKNAME_CHARS, STATE_VERSION};
pub use update::{update, Reply};
