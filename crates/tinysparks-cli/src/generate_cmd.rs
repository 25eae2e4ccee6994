//! `tinysparks generate` and `tinysparks plan`: create and show plans.

use anyhow::Result;

use tinysparks_core::{ActivityRequest, AgeGroup, KeyValueStore, PlaySession, Tab};

use crate::render;

/// Generate a fresh plan and print it.
pub async fn run_generate<S: KeyValueStore>(
    session: &mut PlaySession<S>,
    age_group: AgeGroup,
    interests: Option<String>,
    materials: Option<String>,
    json: bool,
) -> Result<()> {
    let request = ActivityRequest::new(age_group, interests, materials);
    if !json {
        eprintln!("Creating magic for {}...", age_group.label());
    }

    session.submit(&request).await?;
    print_list(session, Tab::Plan, json)
}

/// Print the most recently generated plan.
pub fn run_plan<S: KeyValueStore>(session: &PlaySession<S>, json: bool) -> Result<()> {
    print_list(session, Tab::Plan, json)
}

/// List every supported age group with the slug `--age` accepts.
pub fn run_age_groups() {
    println!("{:<16} LABEL", "SLUG");
    for group in AgeGroup::ALL {
        println!("{:<16} {}", group.slug(), group.label());
    }
}

pub(crate) fn print_list<S: KeyValueStore>(
    session: &PlaySession<S>,
    tab: Tab,
    json: bool,
) -> Result<()> {
    let activities = session.activities(tab);
    if json {
        println!("{}", render::to_json(activities)?);
        return Ok(());
    }

    match render::render_sections(activities, tab, |id| session.is_favorite(id)) {
        Some(text) => print!("{text}"),
        None => match tab {
            Tab::Plan => {
                println!("No plan yet.");
                println!("Run `tinysparks generate --age <group>` to create one.");
            }
            Tab::Favorites => {
                println!("No favorite activities yet.");
                println!("Run `tinysparks favorites toggle <id>` to save one from your plan.");
            }
        },
    }
    Ok(())
}
