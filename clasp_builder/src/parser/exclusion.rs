use crate::model::Settings;
use crate::parser::argument::Argument;

#[derive(Debug)]
struct Group {
    // Indices into the parser's arguments.
    members: Vec<usize>,
    required: bool,
    chosen: bool,
}

/// Parse side bookkeeping for exclusion groups.
#[derive(Debug)]
pub(crate) struct ExclusionHandler {
    groups: Vec<Group>,
}

impl ExclusionHandler {
    pub(crate) fn new(groups: Vec<(Vec<usize>, bool)>) -> Self {
        Self {
            groups: groups
                .into_iter()
                .map(|(members, required)| Group {
                    members,
                    required,
                    chosen: false,
                })
                .collect(),
        }
    }

    fn contains(&self, index: usize) -> bool {
        self.groups
            .iter()
            .any(|group| group.members.contains(&index))
    }

    /// The number of required slots: each required argument outside a group, plus each required group.
    pub(crate) fn required_slots(&self, arguments: &[Argument]) -> usize {
        let ungrouped = arguments
            .iter()
            .enumerate()
            .filter(|(index, argument)| !self.contains(*index) && argument.is_required())
            .count();
        let grouped = self.groups.iter().filter(|group| group.required).count();
        ungrouped + grouped
    }

    /// Record the match of `arguments[index]` by `token`, returning the number of required slots it satisfies.
    ///
    /// Every other member of the argument's group is excluded, so a later match of any of them is a violation.
    pub(crate) fn check(
        &mut self,
        index: usize,
        was_required: bool,
        token: &str,
        arguments: &mut [Argument],
    ) -> usize {
        match self
            .groups
            .iter_mut()
            .find(|group| group.members.contains(&index))
        {
            Some(group) => {
                for member in group.members.iter().filter(|member| **member != index) {
                    arguments[*member].exclude(token);
                }

                let first = !group.chosen;
                group.chosen = true;
                usize::from(group.required && first)
            }
            None => usize::from(was_required),
        }
    }

    /// The diagnostic names of every unsatisfied required argument and group, in registration order.
    pub(crate) fn missing(&self, arguments: &[Argument], settings: &Settings) -> Vec<String> {
        let mut missing: Vec<String> = arguments
            .iter()
            .enumerate()
            .filter(|(index, argument)| !self.contains(*index) && argument.is_missing())
            .map(|(_, argument)| argument.id(settings))
            .collect();

        for group in self
            .groups
            .iter()
            .filter(|group| group.required && !group.chosen)
        {
            let labels: Vec<String> = group
                .members
                .iter()
                .map(|member| {
                    let argument = &arguments[*member];
                    match argument.flag() {
                        Some(flag) => settings.flag_label(flag),
                        None => settings.name_label(argument.name()),
                    }
                })
                .collect();
            missing.push(format!("{{{}}}", labels.join(" | ")));
        }

        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Arity;
    use crate::parser::argument::Mode;
    use crate::parser::test::BlackHole;

    fn arguments() -> Vec<Argument<'static>> {
        vec![
            Argument::new(
                Mode::Labeled,
                Some('a'),
                "alpha",
                Arity::Single,
                Box::new(BlackHole::default()),
            ),
            Argument::new(
                Mode::Labeled,
                None,
                "beta",
                Arity::Single,
                Box::new(BlackHole::default()),
            ),
            Argument::new(
                Mode::Labeled,
                Some('c'),
                "",
                Arity::Switch,
                Box::new(BlackHole::default()),
            ),
        ]
    }

    #[test]
    fn required_slots() {
        let mut arguments = arguments();
        arguments[2].required = true;

        let handler = ExclusionHandler::new(vec![(vec![0, 1], true)]);
        assert_eq!(handler.required_slots(&arguments), 2);

        let handler = ExclusionHandler::new(vec![(vec![0, 1], false)]);
        assert_eq!(handler.required_slots(&arguments), 1);

        let handler = ExclusionHandler::new(Vec::default());
        assert_eq!(handler.required_slots(&arguments), 1);
    }

    #[test]
    fn check_one_of() {
        // Setup
        let mut arguments = arguments();
        let mut handler = ExclusionHandler::new(vec![(vec![0, 1], true)]);

        // Execute
        let first = handler.check(0, true, "-a", &mut arguments);
        let second = handler.check(0, true, "-a", &mut arguments);

        // Verify
        assert_eq!(first, 1);
        assert_eq!(second, 0);
        assert_eq!(handler.missing(&arguments, &Settings::default()), Vec::<String>::default());
    }

    #[test]
    fn check_either_of() {
        let mut arguments = arguments();
        let mut handler = ExclusionHandler::new(vec![(vec![0, 1], false)]);
        assert_eq!(handler.check(1, false, "--beta", &mut arguments), 0);
    }

    #[test]
    fn check_ungrouped() {
        let mut arguments = arguments();
        let mut handler = ExclusionHandler::new(vec![(vec![0, 1], true)]);
        assert_eq!(handler.check(2, true, "-c", &mut arguments), 1);
        assert_eq!(handler.check(2, false, "-c", &mut arguments), 0);
    }

    #[test]
    fn missing() {
        let mut arguments = arguments();
        arguments[2].required = true;
        let handler = ExclusionHandler::new(vec![(vec![0, 1], true)]);
        assert_eq!(
            handler.missing(&arguments, &Settings::default()),
            vec!["-c".to_string(), "{-a | --beta}".to_string()]
        );
    }
}
