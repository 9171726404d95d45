//! Reply text rendering. Pure functions from state to the message sent back.

pub mod menu;
pub mod roster;

pub use menu::render_menu;
pub use roster::{member_name, render_hall, render_roster, render_status, render_vacancies};

/// `1 member`, `3 members`.
pub fn counted(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{} {}", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}
