//! Rock, paper, scissors

use rand::seq::SliceRandom;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Tie,
    Win,
    Loss,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    pub fn beats(&self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors)
                | (Choice::Paper, Choice::Rock)
                | (Choice::Scissors, Choice::Paper)
        )
    }

    pub fn random() -> Choice {
        *Self::ALL
            .choose(&mut rand::thread_rng())
            .unwrap_or(&Choice::Rock)
    }
}

impl FromStr for Choice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rock" => Ok(Choice::Rock),
            "paper" => Ok(Choice::Paper),
            "scissors" | "scissor" => Ok(Choice::Scissors),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Choice::Rock => "rock",
            Choice::Paper => "paper",
            Choice::Scissors => "scissors",
        })
    }
}

/// Result from the player's point of view
pub fn play(player: Choice, opponent: Choice) -> GameResult {
    if player == opponent {
        GameResult::Tie
    } else if player.beats(opponent) {
        GameResult::Win
    } else {
        GameResult::Loss
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beats_relation() {
        assert!(Choice::Rock.beats(Choice::Scissors));
        assert!(Choice::Paper.beats(Choice::Rock));
        assert!(Choice::Scissors.beats(Choice::Paper));
        assert!(!Choice::Scissors.beats(Choice::Rock));
    }

    #[test]
    fn test_play_is_total() {
        for a in Choice::ALL {
            assert_eq!(play(a, a), GameResult::Tie);
            for b in Choice::ALL {
                if a != b {
                    // exactly one side wins
                    assert_ne!(play(a, b), play(b, a));
                    assert_ne!(play(a, b), GameResult::Tie);
                }
            }
        }
        assert_eq!(play(Choice::Rock, Choice::Paper), GameResult::Loss);
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(" Rock ".parse::<Choice>(), Ok(Choice::Rock));
        assert_eq!("scissors".parse::<Choice>(), Ok(Choice::Scissors));
        assert!("lizard".parse::<Choice>().is_err());
    }
}
