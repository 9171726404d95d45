pub mod assign;
pub mod ids;
pub mod scope;
pub mod scope_state;
pub mod serde_utils;
pub mod session;
pub mod session_map;

pub use assign::{fresh_team_name, reshuffle_all, top_up, AssignReport};
pub use ids::{GroupId, UserId};
pub use scope::{split_scope_keyword, ScopeId, ScopeKeyword};
pub use scope_state::{Resolution, ScopeState};
pub use session::{Placement, Session, Team};
pub use session_map::SessionMap;
