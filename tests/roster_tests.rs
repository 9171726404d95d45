use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use teamup::app::{parse, update, Reply, TeamupState};
use teamup::event::ChatContext;
use teamup::model::{GroupId, ScopeId, Session, UserId};

// ============================================================================
// Helpers
// ============================================================================

fn group_scope() -> ScopeId {
    ScopeId::PerGroup(GroupId::new("G"))
}

fn user(id: &str) -> ChatContext {
    ChatContext::new(UserId::new(id), id).in_group(GroupId::new("G"))
}

fn admin() -> ChatContext {
    user("admin").as_admin()
}

fn send(state: &mut TeamupState, ctx: &ChatContext, text: &str) -> Reply {
    let mut rng = StdRng::seed_from_u64(42);
    update(state, ctx, parse(text).expect("command"), &mut rng)
}

fn session<'a>(state: &'a TeamupState, name: &str) -> &'a Session {
    state.scope(&group_scope()).unwrap().sessions.get(name).unwrap()
}

/// Every user sits in at most one place and no team is empty.
fn assert_invariants(session: &Session) {
    let mut seen = HashSet::new();
    for u in &session.free {
        assert!(seen.insert(u.clone()), "{} placed twice", u);
    }
    for team in &session.teams {
        assert!(!team.members.is_empty(), "team {} is empty", team.name);
        for u in &team.members {
            assert!(seen.insert(u.clone()), "{} placed twice", u);
        }
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn two_users_form_a_full_team() {
    let mut state = TeamupState::new();
    send(&mut state, &admin(), "create-session 2 A");
    send(&mut state, &user("U1"), "create-team Red");
    send(&mut state, &user("U2"), "join-team Red");

    let s = session(&state, "A");
    assert_eq!(s.team("Red").unwrap().members, vec![UserId::new("U1"), UserId::new("U2")]);
    assert!(s.free.is_empty());
    assert!(s.vacancies().is_empty());

    let roster = send(&mut state, &user("U1"), "list-roster").text;
    assert!(roster.contains("- Red (2): U1, U2"));
    assert!(!roster.contains("Free pool"));
    assert_eq!(send(&mut state, &user("U1"), "vacancies").text, "No team has open slots.");
}

#[test]
fn admin_reshuffle_of_two_into_size_three() {
    let mut state = TeamupState::new();
    send(&mut state, &admin(), "create-session 3 A");
    send(&mut state, &user("U1"), "join-team");
    send(&mut state, &user("U2"), "join-team");

    let reply = send(&mut state, &admin(), "random-assign all");

    assert_eq!(reply.text, "Reshuffled 2 members into 1 team.");
    let s = session(&state, "A");
    assert_eq!(s.teams.len(), 1);
    assert_eq!(s.teams[0].name, "Team1");
    assert_eq!(s.teams[0].members.len(), 2);
    assert!(s.free.is_empty());
}

#[test]
fn teamed_user_cannot_self_randomize() {
    let mut state = TeamupState::new();
    send(&mut state, &admin(), "create-session 2 A");
    send(&mut state, &user("U1"), "create-team Red");
    send(&mut state, &user("U2"), "join-team Red");
    let before = state.clone();

    let reply = send(&mut state, &user("U1"), "random-assign");

    assert!(reply.text.contains("already in a team"));
    assert_eq!(state, before);
}

#[test]
fn switching_to_missing_session_keeps_active() {
    let mut state = TeamupState::new();
    send(&mut state, &admin(), "create-session 2 A");

    let reply = send(&mut state, &user("U1"), "switch-active Nope");

    assert!(reply.text.contains("No session found"));
    assert_eq!(state.scope(&group_scope()).unwrap().active, "A");
}

#[test]
fn empty_team_argument_joins_free_pool() {
    let mut state = TeamupState::new();
    send(&mut state, &admin(), "create-session 2 A");

    let reply = send(&mut state, &user("U1"), "join-team - A");

    assert!(reply.text.contains("free pool"));
    let s = session(&state, "A");
    assert_eq!(s.free, vec![UserId::new("U1")]);
    assert!(s.teams.is_empty());
}

#[test]
fn commands_default_to_active_then_sole_session() {
    let mut state = TeamupState::new();
    send(&mut state, &admin(), "create-session 2 A");
    send(&mut state, &admin(), "create-session 2 B");
    send(&mut state, &user("U1"), "join-team Red");
    assert!(session(&state, "B").has_team("Red"));

    send(&mut state, &admin(), "reset");
    // Active still names the removed "B"; "A" is the only session left.
    send(&mut state, &user("U2"), "join-team Blue");
    assert!(session(&state, "A").has_team("Blue"));
}

#[test]
fn ambiguous_scope_requires_explicit_session() {
    let mut state = TeamupState::new();
    send(&mut state, &admin(), "create-session 2 A");
    send(&mut state, &admin(), "create-session 2 B");
    send(&mut state, &admin(), "create-session 2 C");
    send(&mut state, &admin(), "reset");

    let reply = send(&mut state, &user("U1"), "join-team Red");
    assert!(reply.text.contains("No session found"));

    let reply = send(&mut state, &user("U1"), "join-team Red A");
    assert_eq!(reply.text, "Joined team Red.");
}

#[test]
fn scopes_are_isolated() {
    let mut state = TeamupState::new();
    send(&mut state, &admin(), "create-session 2 A");
    send(&mut state, &admin(), "create-session 2 A cross-group");
    send(&mut state, &user("U1"), "join-team Red cross-group");

    assert!(session(&state, "A").teams.is_empty());
    let global = state.scope(&ScopeId::Global).unwrap().sessions.get("A").unwrap();
    assert!(global.has_team("Red"));
}

#[test]
fn duplicate_session_name_conflicts() {
    let mut state = TeamupState::new();
    send(&mut state, &admin(), "create-session 2 A");
    let reply = send(&mut state, &admin(), "create-session 4 A");
    assert!(reply.text.contains("already exists"));
    assert_eq!(session(&state, "A").team_size, 2);
}

#[test]
fn my_status_tracks_placement() {
    let mut state = TeamupState::new();
    send(&mut state, &admin(), "create-session 2 A");
    assert_eq!(
        send(&mut state, &user("U1"), "my-status").text,
        "You have not joined this session."
    );
    send(&mut state, &user("U1"), "join-team");
    assert!(send(&mut state, &user("U1"), "my-status").text.contains("free pool"));
    send(&mut state, &user("U1"), "join-team Red");
    assert_eq!(
        send(&mut state, &user("U1"), "my-status").text,
        "You are in team Red (1 member)."
    );
}

#[test]
fn global_roster_shows_ids() {
    let mut state = TeamupState::new();
    send(&mut state, &admin(), "create-session 2 A cross-group");
    send(&mut state, &user("U1"), "set-nickname Ann");
    send(&mut state, &user("U1"), "join-team Red cross-group");

    let roster = send(&mut state, &user("U2"), "list-roster cross-group").text;
    assert!(roster.contains("Ann(U1)"));
}

// ============================================================================
// Invariants over operation sequences
// ============================================================================

#[test]
fn invariants_hold_through_mixed_operations() {
    let mut state = TeamupState::new();
    send(&mut state, &admin(), "create-session 3 A");

    let script = [
        ("U1", "join-team"),
        ("U2", "create-team Red"),
        ("U3", "join-team Red"),
        ("U1", "join-team Blue"),
        ("U4", "join-team"),
        ("U5", "random-assign"),
        ("U2", "leave"),
        ("U3", "join-team"),
        ("U6", "random-assign"),
        ("U1", "join-team Red"),
        ("U4", "leave"),
    ];
    for (who, text) in script {
        send(&mut state, &user(who), text);
        assert_invariants(session(&state, "A"));
    }

    send(&mut state, &admin(), "random-assign all");
    assert_invariants(session(&state, "A"));
}

#[test]
fn leave_twice_equals_leave_once() {
    let mut state = TeamupState::new();
    send(&mut state, &admin(), "create-session 2 A");
    send(&mut state, &user("U1"), "create-team Red");
    send(&mut state, &user("U2"), "join-team Red");

    send(&mut state, &user("U1"), "leave");
    let once = state.clone();
    send(&mut state, &user("U1"), "leave");

    assert_eq!(state, once);
}
