use crate::model::{split_scope_keyword, ScopeKeyword};

/// Usage strings shown on `InvalidArgument`.
pub mod usage {
    pub const SET_NICKNAME: &str = "set-nickname <name>";
    pub const CREATE_SESSION: &str = "create-session <team_size> <name> [this-group|cross-group]";
    pub const SWITCH_ACTIVE: &str = "switch-active <name> [this-group|cross-group]";
    pub const CREATE_TEAM: &str = "create-team <team_name> [session] [this-group|cross-group]";
}

/// Token standing in for an empty positional argument.
const EMPTY_PLACEHOLDERS: [&str; 2] = ["-", "\"\""];

/// Keyword selecting the admin-only full reshuffle.
pub const ALL_MODE: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignMode {
    /// Requester enters the pool, then the pool is topped up into teams.
    Partial,
    /// Admin-only: every member of the session is reshuffled.
    Full,
}

/// A parsed chat command. Argument validation that depends on authorization
/// order happens in `update`, so parsing itself never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Menu,
    SetNickname {
        name: String,
    },
    CreateSession {
        team_size: Option<usize>,
        name: Option<String>,
        scope: ScopeKeyword,
    },
    SwitchActive {
        name: Option<String>,
        scope: ScopeKeyword,
    },
    ListHall {
        scope: ScopeKeyword,
    },
    JoinTeam {
        team: Option<String>,
        session: Option<String>,
        scope: ScopeKeyword,
    },
    CreateTeam {
        team: Option<String>,
        session: Option<String>,
        scope: ScopeKeyword,
    },
    Leave {
        session: Option<String>,
        scope: ScopeKeyword,
    },
    ListRoster {
        session: Option<String>,
        scope: ScopeKeyword,
    },
    MyStatus {
        session: Option<String>,
        scope: ScopeKeyword,
    },
    Vacancies {
        session: Option<String>,
        scope: ScopeKeyword,
    },
    RandomAssign {
        mode: AssignMode,
        session: Option<String>,
        scope: ScopeKeyword,
    },
    Reset {
        session: Option<String>,
        scope: ScopeKeyword,
    },
}

impl Command {
    /// Whether the command can change persisted state.
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Command::Menu
                | Command::ListHall { .. }
                | Command::ListRoster { .. }
                | Command::MyStatus { .. }
                | Command::Vacancies { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Menu => "menu",
            Command::SetNickname { .. } => "set-nickname",
            Command::CreateSession { .. } => "create-session",
            Command::SwitchActive { .. } => "switch-active",
            Command::ListHall { .. } => "list-hall",
            Command::JoinTeam { .. } => "join-team",
            Command::CreateTeam { .. } => "create-team",
            Command::Leave { .. } => "leave",
            Command::ListRoster { .. } => "list-roster",
            Command::MyStatus { .. } => "my-status",
            Command::Vacancies { .. } => "vacancies",
            Command::RandomAssign { .. } => "random-assign",
            Command::Reset { .. } => "reset",
        }
    }
}

fn tokenize(rest: &str) -> Vec<String> {
    rest.split_whitespace()
        .map(|t| {
            if EMPTY_PLACEHOLDERS.contains(&t) {
                String::new()
            } else {
                t.to_string()
            }
        })
        .collect()
}

/// Positional argument `idx`; missing and empty tokens are both `None`.
fn arg(tokens: &[String], idx: usize) -> Option<String> {
    tokens
        .get(idx)
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Parse one chat line. Returns `None` when the line is not a teamup command.
pub fn parse(text: &str) -> Option<Command> {
    let text = text.trim();
    let text = text.strip_prefix('/').unwrap_or(text);
    let (word, rest) = match text.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r),
        None => (text, ""),
    };
    let word = word.to_ascii_lowercase();

    if word == "set-nickname" {
        // Nicknames may contain spaces and take no scope.
        return Some(Command::SetNickname {
            name: rest.trim().to_string(),
        });
    }

    let mut tokens = tokenize(rest);
    let scope = split_scope_keyword(&mut tokens);

    let command = match word.as_str() {
        "menu" => Command::Menu,
        "create-session" => Command::CreateSession {
            team_size: arg(&tokens, 0).and_then(|s| s.parse::<usize>().ok()),
            name: arg(&tokens, 1),
            scope,
        },
        "switch-active" => Command::SwitchActive {
            name: arg(&tokens, 0),
            scope,
        },
        "list-hall" => Command::ListHall { scope },
        "join-team" => Command::JoinTeam {
            team: arg(&tokens, 0),
            session: arg(&tokens, 1),
            scope,
        },
        "create-team" => Command::CreateTeam {
            team: arg(&tokens, 0),
            session: arg(&tokens, 1),
            scope,
        },
        "leave" => Command::Leave {
            session: arg(&tokens, 0),
            scope,
        },
        "list-roster" => Command::ListRoster {
            session: arg(&tokens, 0),
            scope,
        },
        "my-status" => Command::MyStatus {
            session: arg(&tokens, 0),
            scope,
        },
        "vacancies" => Command::Vacancies {
            session: arg(&tokens, 0),
            scope,
        },
        "random-assign" => parse_random_assign(&tokens, scope),
        "reset" => Command::Reset {
            session: arg(&tokens, 0),
            scope,
        },
        _ => return None,
    };
    Some(command)
}

fn parse_random_assign(tokens: &[String], scope: ScopeKeyword) -> Command {
    let first = arg(tokens, 0);
    let (mode, session) = match first.as_deref() {
        Some(ALL_MODE) => (AssignMode::Full, arg(tokens, 1)),
        _ if tokens.len() >= 2 => (AssignMode::Partial, arg(tokens, 1)),
        _ => (AssignMode::Partial, first),
    };
    Command::RandomAssign {
        mode,
        session,
        scope,
    }
}
