//! `tinysparks favorites` subcommands.

use anyhow::Result;

use tinysparks_core::{KeyValueStore, PlaySession, SessionError, Tab, Toggled};

use crate::FavoritesCommands;
use crate::generate_cmd::print_list;
use crate::render;

/// Dispatch a favorites subcommand.
pub fn run_favorites_command<S: KeyValueStore>(
    command: FavoritesCommands,
    session: &mut PlaySession<S>,
) -> Result<()> {
    match command {
        FavoritesCommands::List { json } => print_list(session, Tab::Favorites, json),
        FavoritesCommands::Toggle { id } => run_toggle(session, &id),
        FavoritesCommands::Show { id } => run_show(session, &id),
    }
}

fn run_toggle<S: KeyValueStore>(session: &mut PlaySession<S>, id: &str) -> Result<()> {
    let (outcome, activity) = session.toggle_favorite(id)?;
    match outcome {
        Toggled::Added => println!("Saved \"{}\" to favorites.", activity.title),
        Toggled::Removed => println!("Removed \"{}\" from favorites.", activity.title),
    }
    println!("Favorites: {}", session.favorites().len());
    Ok(())
}

fn run_show<S: KeyValueStore>(session: &PlaySession<S>, id: &str) -> Result<()> {
    let activity = session
        .find(id)
        .ok_or_else(|| SessionError::UnknownActivity(id.to_string()))?;
    print!("{}", render::render_detail(activity, session.is_favorite(id)));
    Ok(())
}
