use serde::Deserialize;

use driftwood_core::intent::Intent;

/// One stretch of held input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    pub ticks: usize,
    #[serde(default)]
    pub intent: Intent,
}

/// Input played back against a level, in order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    /// No input for `ticks` ticks.
    pub fn idle(ticks: usize) -> Self {
        Self {
            steps: vec![Step {
                ticks,
                intent: Intent::default(),
            }],
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn total_ticks(&self) -> usize {
        self.steps.iter().map(|s| s.ticks).sum()
    }

    /// Intent for every tick, flattened.
    pub fn intents(&self) -> impl Iterator<Item = &Intent> {
        self.steps
            .iter()
            .flat_map(|s| std::iter::repeat_n(&s.intent, s.ticks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_steps_with_partial_intent() {
        let script = Script::from_toml_str(
            r#"
            [[steps]]
            ticks = 30

            [[steps]]
            ticks = 10
            intent = { move_right = true, jump = true }
            "#,
        )
        .unwrap();
        assert_eq!(script.steps.len(), 2);
        assert_eq!(script.steps[0].intent, Intent::default());
        assert!(script.steps[1].intent.move_right);
        assert!(!script.steps[1].intent.move_left);
        assert_eq!(script.total_ticks(), 40);
    }

    #[test]
    fn intents_follow_step_order() {
        let script = Script {
            steps: vec![
                Step {
                    ticks: 2,
                    intent: Intent::right(),
                },
                Step {
                    ticks: 1,
                    intent: Intent::jump(),
                },
            ],
        };
        let flat: Vec<Intent> = script.intents().copied().collect();
        assert_eq!(flat, vec![Intent::right(), Intent::right(), Intent::jump()]);
    }

    #[test]
    fn idle_script() {
        let script = Script::idle(5);
        assert_eq!(script.total_ticks(), 5);
        assert!(script.intents().all(|i| *i == Intent::default()));
    }

    #[test]
    fn missing_ticks_is_an_error() {
        assert!(Script::from_toml_str("[[steps]]\nintent = { jump = true }").is_err());
    }
}
