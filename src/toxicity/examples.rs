// Built-in example comments offered by the CLI and the web form.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ExampleComment {
    pub name: &'static str,
    pub text: &'static str,
}

pub const EXAMPLES: [ExampleComment; 5] = [
    ExampleComment {
        name: "Clean comment",
        text: "I appreciate your perspective on this matter.",
    },
    ExampleComment {
        name: "Mild toxicity",
        text: "You're not very smart, are you?",
    },
    ExampleComment {
        name: "Severe toxicity",
        text: "I hope you die, you worthless piece of trash!",
    },
    ExampleComment {
        name: "Obscene language",
        text: "Go f*** yourself you stupid b****!",
    },
    ExampleComment {
        name: "Gaming toxicity",
        text: "kys noob, you're trash at this game l2p",
    },
];

/// Look up an example by name, case-insensitively.
pub fn find(name: &str) -> Option<&'static ExampleComment> {
    EXAMPLES
        .iter()
        .find(|example| example.name.eq_ignore_ascii_case(name))
}
