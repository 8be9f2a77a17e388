//! End-user step predicates. Admin paths never apply these.

use crate::tour::model::Step;

/// A step without groups is shown to everybody.
pub fn is_visible_to_groups<S: AsRef<str>>(step: &Step, user_groups: &[S]) -> bool {
    step.visible_to_groups.is_empty()
        || step
            .visible_to_groups
            .iter()
            .any(|group| user_groups.iter().any(|g| g.as_ref() == group))
}

pub fn is_enabled(step: &Step) -> bool {
    step.enabled
}

pub fn filter_visible<S: AsRef<str>>(steps: Vec<Step>, user_groups: &[S]) -> Vec<Step> {
    steps
        .into_iter()
        .filter(|step| is_visible_to_groups(step, user_groups))
        .collect()
}

pub fn filter_enabled(steps: Vec<Step>) -> Vec<Step> {
    steps.into_iter().filter(is_enabled).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tour::model::StepPosition;

    fn step(id: &str, groups: &[&str], enabled: bool) -> Step {
        Step {
            id: id.to_string(),
            title: id.to_uppercase(),
            text: String::new(),
            attach_to: String::new(),
            position: StepPosition::Right,
            enabled,
            visible_to_groups: groups.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn ids(steps: &[Step]) -> Vec<&str> {
        steps.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn filters_by_group_membership_and_keeps_order() {
        let steps = vec![
            step("a", &["x"], true),
            step("b", &[], true),
            step("c", &["y"], true),
        ];

        assert_eq!(ids(&filter_visible(steps.clone(), &["y"])), ["b", "c"]);
        assert_eq!(ids(&filter_visible(steps.clone(), &["x", "y"])), ["a", "b", "c"]);
        assert_eq!(ids(&filter_visible(steps, &Vec::<String>::new())), ["b"]);
    }

    #[test]
    fn disabled_steps_are_dropped_independently_of_groups() {
        let steps = vec![step("a", &[], false), step("b", &["x"], true)];
        let visible = filter_visible(filter_enabled(steps), &["x"]);
        assert_eq!(ids(&visible), ["b"]);
    }
}
