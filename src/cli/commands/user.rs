use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::domain::Username;

use super::usage_error;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "login",
            "Select whose records to work with (no password)",
            "login <name>",
            cmd_login,
        ),
        CommandEntry::new("logout", "Forget the selected user", "logout", cmd_logout),
        CommandEntry::new("whoami", "Show the selected user", "whoami", cmd_whoami),
        CommandEntry::new("users", "List every known user", "users", cmd_users),
    ]
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(usage_error("login <name>"));
    }
    let username = Username::parse(&args.join(" "))?;
    context.open_session(username.clone())?;
    context.config.last_user = Some(username.to_string());
    context.save_config()?;

    let count = context.session()?.transactions().len();
    output::success(format!("Signed in as {username} ({count} transactions)."));
    Ok(())
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = context.session.take().ok_or(CommandError::NotLoggedIn)?;
    context.config.last_user = None;
    context.save_config()?;
    output::success(format!("Signed out {}.", session.username()));
    Ok(())
}

fn cmd_whoami(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = context.session()?;
    output::info(format!("Current user: {}", session.username()));
    Ok(())
}

fn cmd_users(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let names = context.store.list_known_usernames()?;
    if names.is_empty() {
        output::info("No users yet.");
        return Ok(());
    }
    let current = context
        .session
        .as_ref()
        .map(|session| session.username().as_str());
    output::section("Users");
    for name in &names {
        let marker = if Some(name.as_str()) == current { "*" } else { " " };
        output::info(format!("{marker} {name}"));
    }
    Ok(())
}
