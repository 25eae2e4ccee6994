//! Splitting a list of activities into the two display sections.

use super::types::Activity;

/// Activities split into developmental and sensory sections, each in the
/// order it appeared in the source list.
#[derive(Debug, Default)]
pub struct PlanSections<'a> {
    pub developmental: Vec<&'a Activity>,
    pub sensory: Vec<&'a Activity>,
}

impl<'a> PlanSections<'a> {
    pub fn from_activities(activities: &'a [Activity]) -> Self {
        let (developmental, sensory): (Vec<&Activity>, Vec<&Activity>) = activities
            .iter()
            .partition(|a| a.category.is_developmental());
        Self {
            developmental,
            sensory,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.developmental.is_empty() && self.sensory.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::types::Category;

    fn activity(id: &str, category: Category) -> Activity {
        Activity {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            materials: vec![],
            duration: String::new(),
            safety_tip: String::new(),
            tags: vec![],
            category,
        }
    }

    #[test]
    fn splits_by_category_preserving_order() {
        let list = vec![
            activity("s1", Category::SensoryPlay),
            activity("d1", Category::GrossMotor),
            activity("s2", Category::SensoryPlay),
            activity("d2", Category::Language),
        ];
        let sections = PlanSections::from_activities(&list);
        let dev: Vec<&str> = sections.developmental.iter().map(|a| a.id.as_str()).collect();
        let sen: Vec<&str> = sections.sensory.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(dev, ["d1", "d2"]);
        assert_eq!(sen, ["s1", "s2"]);
    }

    #[test]
    fn empty_list_has_empty_sections() {
        assert!(PlanSections::from_activities(&[]).is_empty());
    }
}
