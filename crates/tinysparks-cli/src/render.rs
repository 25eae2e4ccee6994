//! Plain-text rendering of plans and favorites.

use std::fmt::Write as _;

use anyhow::{Context, Result};

use tinysparks_core::{Activity, PlanSections, Tab};

/// Materials shown on a card before the rest collapse into "+ N more".
pub const MAX_CARD_MATERIALS: usize = 4;

fn section_titles(tab: Tab) -> (&'static str, &'static str) {
    match tab {
        Tab::Plan => ("Developmental Milestones", "Sensory Play Collection"),
        Tab::Favorites => ("Saved Developmental Activities", "Saved Sensory Ideas"),
    }
}

/// Comma-separated material list, truncated to [`MAX_CARD_MATERIALS`].
pub fn materials_line(materials: &[String]) -> String {
    if materials.len() <= MAX_CARD_MATERIALS {
        return materials.join(", ");
    }
    format!(
        "{} + {} more",
        materials[..MAX_CARD_MATERIALS].join(", "),
        materials.len() - MAX_CARD_MATERIALS
    )
}

/// One activity card. `favorite` controls the marker in front of the title.
pub fn render_card(activity: &Activity, favorite: bool) -> String {
    let marker = if favorite { "*" } else { " " };
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  [{marker}] {} ({}, {})",
        activity.title, activity.category, activity.duration
    );
    let _ = writeln!(out, "      id: {}", activity.id);
    let _ = writeln!(out, "      {}", activity.description);
    let _ = writeln!(out, "      Safety: {}", activity.safety_tip);
    if !activity.materials.is_empty() {
        let _ = writeln!(out, "      Materials: {}", materials_line(&activity.materials));
    }
    if !activity.tags.is_empty() {
        let _ = writeln!(out, "      Tags: {}", activity.tags.join(", "));
    }
    out
}

/// Every field of one activity, with the full material list.
pub fn render_detail(activity: &Activity, favorite: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", activity.title, activity.id);
    let _ = writeln!(out, "Category: {}", activity.category);
    let _ = writeln!(out, "Duration: {}", activity.duration);
    let _ = writeln!(out, "Favorite: {}", if favorite { "yes" } else { "no" });
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", activity.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "Safety: {}", activity.safety_tip);
    let _ = writeln!(out, "Materials:");
    for m in &activity.materials {
        let _ = writeln!(out, "  - {m}");
    }
    if !activity.tags.is_empty() {
        let _ = writeln!(out, "Tags: {}", activity.tags.join(", "));
    }
    out
}

/// Render a list split into its developmental and sensory sections.
/// Empty sections are omitted. Returns `None` when the list is empty.
pub fn render_sections(
    activities: &[Activity],
    tab: Tab,
    is_favorite: impl Fn(&str) -> bool,
) -> Option<String> {
    let sections = PlanSections::from_activities(activities);
    if sections.is_empty() {
        return None;
    }

    let (dev_title, sensory_title) = section_titles(tab);
    let mut out = String::new();
    for (title, items) in [
        (dev_title, &sections.developmental),
        (sensory_title, &sections.sensory),
    ] {
        if items.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "{title} ({})", items.len());
        for activity in items {
            out.push_str(&render_card(activity, is_favorite(&activity.id)));
        }
    }
    Some(out)
}

/// Pretty JSON in the stored camelCase shape.
pub fn to_json(activities: &[Activity]) -> Result<String> {
    serde_json::to_string_pretty(activities).context("failed to serialize activities")
}
