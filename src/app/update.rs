use chrono::Utc;
use rand::Rng;

use crate::app::command::{usage, AssignMode, Command};
use crate::app::TeamupState;
use crate::error::CommandError;
use crate::event::ChatContext;
use crate::model::{reshuffle_all, top_up, Placement, ScopeId, ScopeKeyword, ScopeState, Session};
use crate::view;

/// Text sent back for one command, and whether state changed and needs saving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub mutated: bool,
}

impl Reply {
    fn read(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mutated: false,
        }
    }

    fn changed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mutated: true,
        }
    }
}

impl From<CommandError> for Reply {
    fn from(e: CommandError) -> Self {
        Reply::read(e.to_string())
    }
}

/// Apply one command to the state. No I/O; the caller persists when
/// `Reply::mutated` is set. Rejected commands leave the state untouched.
pub fn update<R: Rng + ?Sized>(
    state: &mut TeamupState,
    ctx: &ChatContext,
    command: Command,
    rng: &mut R,
) -> Reply {
    let name = command.name();
    match apply(state, ctx, command, rng) {
        Ok(reply) => {
            tracing::debug!(command = name, sender = %ctx.sender, mutated = reply.mutated, "command applied");
            reply
        }
        Err(e) => {
            tracing::debug!(command = name, sender = %ctx.sender, error = ?e, "command rejected");
            e.into()
        }
    }
}

fn require_admin(ctx: &ChatContext, action: &'static str) -> Result<(), CommandError> {
    if ctx.is_admin {
        Ok(())
    } else {
        Err(CommandError::Unauthorized { action })
    }
}

fn resolve_scope(ctx: &ChatContext, keyword: ScopeKeyword) -> Result<ScopeId, CommandError> {
    keyword.resolve(ctx.group.as_ref())
}

/// Mutable scope lookup that does not create an empty scope on a miss.
fn existing_scope_mut<'a>(
    state: &'a mut TeamupState,
    scope: &ScopeId,
) -> Result<&'a mut ScopeState, CommandError> {
    state.scopes.get_mut(scope).ok_or(CommandError::NotFound)
}

fn apply<R: Rng + ?Sized>(
    state: &mut TeamupState,
    ctx: &ChatContext,
    command: Command,
    rng: &mut R,
) -> Result<Reply, CommandError> {
    match command {
        Command::Menu => Ok(Reply::read(view::render_menu())),

        Command::SetNickname { name } => {
            let name = state.set_nickname(&ctx.sender, &name)?;
            Ok(Reply::changed(format!("Nickname set: {}", name)))
        }

        Command::CreateSession {
            team_size,
            name,
            scope,
        } => {
            require_admin(ctx, "create sessions")?;
            let invalid = CommandError::InvalidArgument {
                usage: usage::CREATE_SESSION,
            };
            let team_size = team_size.filter(|n| *n > 0).ok_or_else(|| invalid.clone())?;
            let name = name.ok_or(invalid)?;
            let scope_id = resolve_scope(ctx, scope)?;

            let session = Session::new(team_size, ctx.sender.clone()).with_created_at(Utc::now());
            state.scope_mut(&scope_id).create_session(&name, session)?;
            tracing::info!(scope = %scope_id, session = %name, team_size, creator = %ctx.sender, "session created");
            Ok(Reply::changed(format!(
                "Created session {}: {} per team, scope {}.",
                name, team_size, scope
            )))
        }

        Command::SwitchActive { name, scope } => {
            let name = name.ok_or(CommandError::InvalidArgument {
                usage: usage::SWITCH_ACTIVE,
            })?;
            let scope_id = resolve_scope(ctx, scope)?;
            existing_scope_mut(state, &scope_id)?.switch_active(&name)?;
            Ok(Reply::changed(format!("Active session is now {}.", name)))
        }

        Command::ListHall { scope } => {
            let scope_id = resolve_scope(ctx, scope)?;
            Ok(Reply::read(view::render_hall(state.scope(&scope_id), scope)))
        }

        Command::JoinTeam {
            team,
            session,
            scope,
        } => {
            let scope_id = resolve_scope(ctx, scope)?;
            let (_, target) = existing_scope_mut(state, &scope_id)?.session_mut(session.as_deref())?;
            match team {
                Some(team) => {
                    target.join_team(&ctx.sender, &team);
                    Ok(Reply::changed(format!("Joined team {}.", team)))
                }
                None => {
                    target.join_free(&ctx.sender);
                    Ok(Reply::changed(
                        "Joined the free pool, waiting for random assignment.",
                    ))
                }
            }
        }

        Command::CreateTeam {
            team,
            session,
            scope,
        } => {
            let team = team.ok_or(CommandError::InvalidArgument {
                usage: usage::CREATE_TEAM,
            })?;
            let scope_id = resolve_scope(ctx, scope)?;
            let (_, target) = existing_scope_mut(state, &scope_id)?.session_mut(session.as_deref())?;
            if target.create_team(&ctx.sender, &team) {
                Ok(Reply::changed(format!("Created and joined team {}.", team)))
            } else {
                Ok(Reply::changed(format!("Team {} already exists; joined it.", team)))
            }
        }

        Command::Leave { session, scope } => {
            let scope_id = resolve_scope(ctx, scope)?;
            let (name, target) = existing_scope_mut(state, &scope_id)?.session_mut(session.as_deref())?;
            target.remove_from_all(&ctx.sender);
            Ok(Reply::changed(format!("Left session {}.", name)))
        }

        Command::ListRoster { session, scope } => {
            let scope_id = resolve_scope(ctx, scope)?;
            let scope_state = state.scope(&scope_id).ok_or(CommandError::NotFound)?;
            let (name, target) = scope_state.session(session.as_deref())?;
            Ok(Reply::read(view::render_roster(
                state, &name, target, &scope_id, ctx,
            )))
        }

        Command::MyStatus { session, scope } => {
            let scope_id = resolve_scope(ctx, scope)?;
            let scope_state = state.scope(&scope_id).ok_or(CommandError::NotFound)?;
            let (_, target) = scope_state.session(session.as_deref())?;
            Ok(Reply::read(view::render_status(&target.placement(&ctx.sender))))
        }

        Command::Vacancies { session, scope } => {
            let scope_id = resolve_scope(ctx, scope)?;
            let scope_state = state.scope(&scope_id).ok_or(CommandError::NotFound)?;
            let (_, target) = scope_state.session(session.as_deref())?;
            Ok(Reply::read(view::render_vacancies(target)))
        }

        Command::RandomAssign {
            mode,
            session,
            scope,
        } => {
            let scope_id = resolve_scope(ctx, scope)?;
            let (name, target) = existing_scope_mut(state, &scope_id)?.session_mut(session.as_deref())?;
            match mode {
                AssignMode::Full => {
                    require_admin(ctx, "reshuffle everyone")?;
                    let report = reshuffle_all(target, rng);
                    tracing::info!(scope = %scope_id, session = %name, placed = report.placed, teams = report.opened.len(), "full reshuffle");
                    Ok(Reply::changed(format!(
                        "Reshuffled {} into {}.",
                        view::counted(report.placed, "member"),
                        view::counted(report.opened.len(), "team")
                    )))
                }
                AssignMode::Partial => {
                    if let Some((_, size)) = target.find_user_team(&ctx.sender) {
                        if size > 1 {
                            return Err(CommandError::AlreadyTeamed);
                        }
                    }
                    target.join_free(&ctx.sender);
                    let report = top_up(target, rng);
                    tracing::debug!(scope = %scope_id, session = %name, placed = report.placed, opened = ?report.opened, "top-up assignment");
                    match target.placement(&ctx.sender) {
                        Placement::Team { name, size } => Ok(Reply::changed(format!(
                            "Randomly assigned you to team {} ({}).",
                            name,
                            view::counted(size, "member")
                        ))),
                        Placement::Free | Placement::Absent => {
                            Ok(Reply::changed("Random assignment done."))
                        }
                    }
                }
            }
        }

        Command::Reset { session, scope } => {
            require_admin(ctx, "reset sessions")?;
            let scope_id = resolve_scope(ctx, scope)?;
            let removed = state
                .scopes
                .get_mut(&scope_id)
                .and_then(|st| st.reset(session.as_deref()));
            match removed {
                Some(name) => {
                    tracing::info!(scope = %scope_id, session = %name, "session reset");
                    Ok(Reply::changed(format!("Reset session {}.", name)))
                }
                None => Ok(Reply::read("Nothing to reset.")),
            }
        }
    }
}
