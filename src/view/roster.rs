use crate::app::TeamupState;
use crate::event::ChatContext;
use crate::model::{Placement, ScopeId, ScopeKeyword, ScopeState, Session, UserId};

/// Name shown for a roster member.
///
/// The requester falls back to their platform display name; other users fall
/// back to their raw id, since the platform name is only known for the sender.
pub fn member_name(state: &TeamupState, user: &UserId, scope: &ScopeId, ctx: &ChatContext) -> String {
    let fallback = if *user == ctx.sender {
        ctx.sender_name.as_str()
    } else {
        user.as_str()
    };
    state.display_name(user, fallback, scope)
}

fn member_list(state: &TeamupState, members: &[UserId], scope: &ScopeId, ctx: &ChatContext) -> String {
    members
        .iter()
        .map(|u| member_name(state, u, scope, ctx))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Summary line per session in a scope; the active session is starred.
pub fn render_hall(scope_state: Option<&ScopeState>, keyword: ScopeKeyword) -> String {
    let sessions = match scope_state {
        Some(st) if !st.sessions.is_empty() => st,
        _ => return "No sessions yet.".to_string(),
    };

    let mut lines = vec![format!("Hall ({}):", keyword)];
    for (name, session) in sessions.sessions.iter() {
        let marker = if sessions.is_active(name) { "*" } else { "-" };
        lines.push(format!(
            "{} {} (team size {}, teams {}, free {})",
            marker,
            name,
            session.team_size,
            session.teams.len(),
            session.free.len()
        ));
    }
    lines.join("\n")
}

/// Full membership dump: every team in order, then the free pool.
pub fn render_roster(
    state: &TeamupState,
    name: &str,
    session: &Session,
    scope: &ScopeId,
    ctx: &ChatContext,
) -> String {
    let mut lines = vec![
        format!("Session: {}", name),
        format!("Team size: {}", session.team_size),
    ];
    if !session.teams.is_empty() {
        lines.push("Teams:".to_string());
        for team in &session.teams {
            lines.push(format!(
                "- {} ({}): {}",
                team.name,
                team.len(),
                member_list(state, &team.members, scope, ctx)
            ));
        }
    }
    if !session.free.is_empty() {
        lines.push(format!("Free pool: {}", member_list(state, &session.free, scope, ctx)));
    }
    if session.teams.is_empty() && session.free.is_empty() {
        lines.push("Nobody has signed up yet.".to_string());
    }
    lines.join("\n")
}

pub fn render_vacancies(session: &Session) -> String {
    let vacancies = session.vacancies();
    if vacancies.is_empty() {
        return "No team has open slots.".to_string();
    }
    vacancies
        .iter()
        .map(|(team, short)| format!("- {} needs {} more", team, short))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_status(placement: &Placement) -> String {
    match placement {
        Placement::Team { name, size } => {
            format!("You are in team {} ({}).", name, super::counted(*size, "member"))
        }
        Placement::Free => "You are in the free pool, waiting for random assignment.".to_string(),
        Placement::Absent => "You have not joined this session.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GroupId;

    fn uid(s: &str) -> UserId {
        UserId::new(s)
    }

    fn ctx() -> ChatContext {
        ChatContext::new(uid("u1"), "Ann").in_group(GroupId::new("g"))
    }

    fn group() -> ScopeId {
        ScopeId::PerGroup(GroupId::new("g"))
    }

    #[test]
    fn member_name_fallbacks() {
        let mut state = TeamupState::new();
        assert_eq!(member_name(&state, &uid("u1"), &group(), &ctx()), "Ann");
        assert_eq!(member_name(&state, &uid("u2"), &group(), &ctx()), "u2");
        state.set_nickname(&uid("u2"), "Bo").unwrap();
        assert_eq!(member_name(&state, &uid("u2"), &group(), &ctx()), "Bo");
    }

    #[test]
    fn global_roster_appends_ids_for_everyone() {
        let mut state = TeamupState::new();
        state.set_nickname(&uid("u2"), "Bo").unwrap();
        let mut session = Session::new(2, uid("admin"));
        session.join_team(&uid("u1"), "Red");
        session.join_team(&uid("u2"), "Red");
        session.join_free(&uid("u3"));

        let text = render_roster(&state, "A", &session, &ScopeId::Global, &ctx());

        assert!(text.contains("- Red (2): Ann(u1), Bo(u2)"));
        assert!(text.contains("Free pool: u3(u3)"));
    }

    #[test]
    fn empty_roster_says_so() {
        let state = TeamupState::new();
        let session = Session::new(2, uid("admin"));
        let text = render_roster(&state, "A", &session, &group(), &ctx());
        assert!(text.starts_with("Session: A\nTeam size: 2"));
        assert!(text.contains("Nobody has signed up yet."));
    }

    #[test]
    fn hall_marks_active_session() {
        let mut st = ScopeState::new();
        st.create_session("A", Session::new(2, uid("admin"))).unwrap();
        st.create_session("B", Session::new(3, uid("admin"))).unwrap();

        let text = render_hall(Some(&st), ScopeKeyword::ThisGroup);

        assert!(text.starts_with("Hall (this-group):"));
        assert!(text.contains("- A (team size 2, teams 0, free 0)"));
        assert!(text.contains("* B (team size 3, teams 0, free 0)"));
    }

    #[test]
    fn hall_lists_sessions_in_creation_order() {
        let mut st = ScopeState::new();
        for name in ["Zulu", "Alpha", "Mike"] {
            st.create_session(name, Session::new(2, uid("admin"))).unwrap();
        }

        let text = render_hall(Some(&st), ScopeKeyword::ThisGroup);

        let order: Vec<_> = ["Zulu", "Alpha", "Mike"]
            .iter()
            .map(|n| text.find(n).unwrap())
            .collect();
        assert!(order[0] < order[1] && order[1] < order[2]);
    }

    #[test]
    fn status_text_pluralizes() {
        let solo = Placement::Team {
            name: "Red".into(),
            size: 1,
        };
        assert_eq!(render_status(&solo), "You are in team Red (1 member).");
        let pair = Placement::Team {
            name: "Red".into(),
            size: 2,
        };
        assert_eq!(render_status(&pair), "You are in team Red (2 members).");
    }

    #[test]
    fn hall_without_sessions() {
        assert_eq!(render_hall(None, ScopeKeyword::CrossGroup), "No sessions yet.");
    }

    #[test]
    fn vacancies_text() {
        let mut session = Session::new(3, uid("admin"));
        session.join_team(&uid("u1"), "Red");
        assert_eq!(render_vacancies(&session), "- Red needs 2 more");
        let full = Session::new(1, uid("admin"));
        assert_eq!(render_vacancies(&full), "No team has open slots.");
    }
}
