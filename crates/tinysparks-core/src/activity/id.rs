//! Local id assignment for generated activities.
//!
//! Ids look like `<unix_millis>-<index>-<suffix>`, where the suffix is nine
//! random base-36 characters. Candidates that collide with an id already in
//! use (favorites, or earlier in the same batch) are regenerated.

use std::collections::HashSet;

use chrono::Utc;
use rand::Rng;

use super::types::{Activity, ActivityDraft};

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Give every draft a fresh id that is not in `taken` and not shared with
/// any other draft in the batch. Order is preserved.
pub fn assign_ids(drafts: Vec<ActivityDraft>, taken: &HashSet<String>) -> Vec<Activity> {
    let mut rng = rand::rng();
    let millis = Utc::now().timestamp_millis();
    let mut issued: HashSet<String> = HashSet::with_capacity(drafts.len());

    drafts
        .into_iter()
        .enumerate()
        .map(|(index, draft)| {
            let id = loop {
                let candidate = format!("{millis}-{index}-{}", random_suffix(&mut rng));
                if !taken.contains(&candidate) && !issued.contains(&candidate) {
                    break candidate;
                }
            };
            issued.insert(id.clone());
            Activity::from_draft(id, draft)
        })
        .collect()
}

fn random_suffix(rng: &mut impl Rng) -> String {
    (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}
