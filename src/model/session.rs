use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_utils::ordered_teams;
use super::UserId;

/// A named roster inside a session. Never stored empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub members: Vec<UserId>,
}

impl Team {
    pub fn new(name: impl Into<String>, members: Vec<UserId>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, user: &UserId) -> bool {
        self.members.contains(user)
    }
}

/// Where a user currently sits within a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Team { name: String, size: usize },
    Free,
    Absent,
}

/// A team-formation event: fixed per-team capacity, teams in insertion order,
/// and a pool of users waiting for assignment.
///
/// A user appears in at most one of `free` or `teams[*].members`; every
/// placement goes through [`Session::remove_from_all`] first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub team_size: usize,
    #[serde(default, with = "ordered_teams")]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub free: Vec<UserId>,
    pub created_by: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(team_size: usize, created_by: UserId) -> Self {
        Self {
            team_size,
            teams: Vec::new(),
            free: Vec::new(),
            created_by,
            created_at: None,
        }
    }

    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name == name)
    }

    pub fn has_team(&self, name: &str) -> bool {
        self.team(name).is_some()
    }

    /// Drop the user from the free pool and every team; teams left empty are deleted.
    /// Calling this for an absent user is a no-op.
    pub fn remove_from_all(&mut self, user: &UserId) {
        self.free.retain(|u| u != user);
        for team in &mut self.teams {
            team.members.retain(|u| u != user);
        }
        self.teams.retain(|t| !t.is_empty());
    }

    pub fn join_free(&mut self, user: &UserId) {
        self.remove_from_all(user);
        self.free.push(user.clone());
    }

    /// Place the user into `team_name`, creating the team when absent.
    ///
    /// Capacity is advisory: a team may grow past `team_size` this way.
    pub fn join_team(&mut self, user: &UserId, team_name: &str) {
        self.remove_from_all(user);
        match self.teams.iter_mut().find(|t| t.name == team_name) {
            Some(team) => {
                if !team.contains(user) {
                    team.members.push(user.clone());
                }
            }
            None => self.teams.push(Team::new(team_name, vec![user.clone()])),
        }
    }

    /// Same effect as [`Session::join_team`]; returns whether the team was new.
    pub fn create_team(&mut self, user: &UserId, team_name: &str) -> bool {
        // Removal may delete a solo team of the same name, so check afterwards.
        self.remove_from_all(user);
        let created = !self.has_team(team_name);
        self.join_team(user, team_name);
        created
    }

    pub fn find_user_team(&self, user: &UserId) -> Option<(&str, usize)> {
        self.teams
            .iter()
            .find(|t| t.contains(user))
            .map(|t| (t.name.as_str(), t.len()))
    }

    pub fn placement(&self, user: &UserId) -> Placement {
        if let Some((name, size)) = self.find_user_team(user) {
            return Placement::Team {
                name: name.to_string(),
                size,
            };
        }
        if self.free.contains(user) {
            Placement::Free
        } else {
            Placement::Absent
        }
    }

    /// Teams short of `team_size`, with how many members each is missing.
    pub fn vacancies(&self) -> Vec<(&str, usize)> {
        self.teams
            .iter()
            .filter_map(|t| {
                let shortfall = self.team_size.saturating_sub(t.len());
                (shortfall > 0).then_some((t.name.as_str(), shortfall))
            })
            .collect()
    }

    /// Restore the placement invariants on data read from disk.
    ///
    /// Returns the number of repairs made.
    pub fn repair(&mut self) -> usize {
        let mut repairs = 0;
        if self.team_size == 0 {
            self.team_size = 1;
            repairs += 1;
        }

        let mut seen = std::collections::HashSet::new();
        let before = self.free.len();
        self.free.retain(|u| seen.insert(u.clone()));
        repairs += before - self.free.len();

        for team in &mut self.teams {
            let before = team.len();
            team.members.retain(|u| seen.insert(u.clone()));
            repairs += before - team.len();
        }

        let before = self.teams.len();
        self.teams.retain(|t| !t.is_empty());
        repairs += before - self.teams.len();

        repairs
    }
}
