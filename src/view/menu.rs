/// Help text listing every command, grouped the way users reach for them.
pub fn render_menu() -> String {
    const MENU: &[(&str, &[&str])] = &[
        (
            "Info",
            &[
                "list-hall [this-group|cross-group]",
                "list-roster [session] [this-group|cross-group]",
                "vacancies [session] [this-group|cross-group]",
                "my-status [session] [this-group|cross-group]",
                "set-nickname <name>",
            ],
        ),
        (
            "Sign-up",
            &[
                "create-team <team_name> [session] [this-group|cross-group]",
                "join-team [team_name] [session] [this-group|cross-group]",
                "leave [session] [this-group|cross-group]",
                "random-assign [session] [this-group|cross-group]",
            ],
        ),
        (
            "Admin",
            &[
                "create-session <team_size> <name> [this-group|cross-group]",
                "switch-active <name> [this-group|cross-group]",
                "random-assign all [session] [this-group|cross-group]",
                "reset [session] [this-group|cross-group]",
            ],
        ),
    ];

    let mut lines = vec!["Team-up menu:".to_string()];
    for (heading, commands) in MENU {
        lines.push(String::new());
        lines.push(format!("[{}]", heading));
        lines.extend(commands.iter().map(|c| format!("- /{}", c)));
    }
    lines.push(String::new());
    lines.push("Use \"-\" for an empty argument, e.g. /join-team - Spring".to_string());
    lines.join("\n")
}
