//! Random distribution of users into fixed-capacity teams.
//!
//! Two modes:
//! - [`top_up`]: shuffle the free pool, fill under-capacity teams in order,
//!   then open `Team{n}` teams for whoever is left.
//! - [`reshuffle_all`]: pull everyone out of every team, shuffle, and re-chunk.

use rand::seq::SliceRandom;
use rand::Rng;

use super::session::{Session, Team};
use super::UserId;

const TEAM_NAME_PREFIX: &str = "Team";

/// Summary of what an assignment pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignReport {
    /// Users moved out of the free pool (top-up) or redistributed (reshuffle).
    pub placed: usize,
    /// Names of teams opened by this pass, in creation order.
    pub opened: Vec<String>,
}

/// Smallest `Team{n}` (n >= 1) not already used in the session.
pub fn fresh_team_name(session: &Session) -> String {
    (1..)
        .map(|n| format!("{}{}", TEAM_NAME_PREFIX, n))
        .find(|name| !session.has_team(name))
        .unwrap_or_else(|| TEAM_NAME_PREFIX.to_string())
}

/// Distribute the free pool: existing teams short of `team_size` are filled
/// first, in enumeration order, and only then are new teams opened.
///
/// Existing members are never moved.
pub fn top_up<R: Rng + ?Sized>(session: &mut Session, rng: &mut R) -> AssignReport {
    let team_size = session.team_size;
    let mut report = AssignReport::default();
    if team_size == 0 {
        return report;
    }

    let mut pool: Vec<UserId> = std::mem::take(&mut session.free);
    pool.shuffle(rng);
    let mut pool = pool.into_iter().peekable();

    for team in &mut session.teams {
        if pool.peek().is_none() {
            break;
        }
        while team.len() < team_size {
            match pool.next() {
                Some(user) => {
                    team.members.push(user);
                    report.placed += 1;
                }
                None => break,
            }
        }
    }

    let mut rest: Vec<UserId> = pool.collect();
    while !rest.is_empty() {
        let take = team_size.min(rest.len());
        let members: Vec<UserId> = rest.drain(..take).collect();
        let name = fresh_team_name(session);
        report.placed += members.len();
        report.opened.push(name.clone());
        session.teams.push(Team::new(name, members));
    }

    report
}

/// Discard every team, shuffle all members together with the free pool, and
/// chunk them into `Team1`, `Team2`, ... The last team may be short; the free
/// pool ends up empty.
pub fn reshuffle_all<R: Rng + ?Sized>(session: &mut Session, rng: &mut R) -> AssignReport {
    let team_size = session.team_size.max(1);

    let mut everyone: Vec<UserId> = std::mem::take(&mut session.teams)
        .into_iter()
        .flat_map(|t| t.members)
        .collect();
    everyone.append(&mut session.free);
    everyone.shuffle(rng);

    let mut report = AssignReport {
        placed: everyone.len(),
        opened: Vec::new(),
    };

    for (idx, chunk) in everyone.chunks(team_size).enumerate() {
        let name = format!("{}{}", TEAM_NAME_PREFIX, idx + 1);
        report.opened.push(name.clone());
        session.teams.push(Team::new(name, chunk.to_vec()));
    }

    report
}
