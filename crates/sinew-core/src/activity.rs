//! Activity kinds - which study mode produced an outcome

use serde::{Deserialize, Serialize};

/// A study activity (minigame). Difficulty and XP scale per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Self-graded flashcard review
    Flashcard,
    /// Pick the right name among distractors
    MultipleChoice,
    /// Place labels on a diagram
    Labeling,
    /// Pair structures with functions or relations
    Matching,
    /// Answer as many prompts as possible against the clock
    TimedChallenge,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 5] = [
        ActivityKind::Flashcard,
        ActivityKind::MultipleChoice,
        ActivityKind::Labeling,
        ActivityKind::Matching,
        ActivityKind::TimedChallenge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Flashcard => "flashcard",
            ActivityKind::MultipleChoice => "multiple_choice",
            ActivityKind::Labeling => "labeling",
            ActivityKind::Matching => "matching",
            ActivityKind::TimedChallenge => "timed_challenge",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "flashcard" | "flashcards" => Ok(ActivityKind::Flashcard),
            "multiple_choice" | "quiz" => Ok(ActivityKind::MultipleChoice),
            "labeling" | "labelling" => Ok(ActivityKind::Labeling),
            "matching" => Ok(ActivityKind::Matching),
            "timed_challenge" | "countdown" => Ok(ActivityKind::TimedChallenge),
            _ => Err(format!("Unknown activity kind: {}", s)),
        }
    }
}
