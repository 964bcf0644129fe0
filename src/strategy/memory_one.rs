use super::{Action, Classifier, History, MemoryDepth, Strategy};

/// Previous-round outcomes in the order responses are stored: CC, CD, DC, DD,
/// own move first.
const OUTCOMES: [(Action, Action); 4] = [
    (Action::C, Action::C),
    (Action::C, Action::D),
    (Action::D, Action::C),
    (Action::D, Action::D),
];

/// A deterministic strategy that only looks at the previous round.
///
/// It is fully described by its opening move and its response to each of the
/// four possible previous outcomes, which makes 32 distinct players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryOnePlayer {
    name: String,
    responses: [Action; 4],
    initial: Action,
}

impl MemoryOnePlayer {
    /// Builds the player, naming it after the classic strategy it matches or
    /// after its code (e.g. `Memory One CDDD/C`).
    pub fn new(responses: [Action; 4], initial: Action) -> Self {
        let name = match classic_name(responses, initial) {
            Some(name) => name.to_string(),
            None => format!("Memory One {}", code(responses, initial)),
        };
        Self {
            name,
            responses,
            initial,
        }
    }

    /// Parses a `RRRR/I` code, responses for CC, CD, DC, DD then the opening move.
    pub fn from_code(code: &str) -> Option<Self> {
        let (responses, initial) = code.split_once('/')?;
        let parsed: Vec<Action> = responses
            .chars()
            .map(Action::from_char)
            .collect::<Option<_>>()?;
        let responses: [Action; 4] = parsed.try_into().ok()?;

        let mut initial = initial.chars();
        let opening = Action::from_char(initial.next()?)?;
        if initial.next().is_some() {
            return None;
        }
        Some(Self::new(responses, opening))
    }

    /// Every deterministic memory-one player, opening with C first.
    pub fn all() -> Vec<Self> {
        let mut players = Vec::with_capacity(32);
        for initial in [Action::C, Action::D] {
            for bits in 0u8..16 {
                let mut responses = [Action::C; 4];
                for (i, response) in responses.iter_mut().enumerate() {
                    if bits & (0b1000 >> i) != 0 {
                        *response = Action::D;
                    }
                }
                players.push(Self::new(responses, initial));
            }
        }
        players
    }

    pub fn code(&self) -> String {
        code(self.responses, self.initial)
    }

    /// A constant rule whose opening matches never needs to look back.
    fn memory_depth(&self) -> MemoryDepth {
        if self.responses.iter().all(|r| *r == self.initial) {
            MemoryDepth::Finite(0)
        } else {
            MemoryDepth::Finite(1)
        }
    }
}

impl Strategy for MemoryOnePlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn classifier(&self) -> Classifier {
        Classifier::deterministic(self.memory_depth())
    }

    fn strategy(&mut self, history: &History) -> Action {
        let Some(last) = history.last() else {
            return self.initial;
        };
        OUTCOMES
            .iter()
            .position(|outcome| *outcome == last)
            .map(|i| self.responses[i])
            .unwrap_or(self.initial)
    }
}

fn code(responses: [Action; 4], initial: Action) -> String {
    let responses: String = responses.iter().map(|a| a.to_string()).collect();
    format!("{}/{}", responses, initial)
}

fn classic_name(responses: [Action; 4], initial: Action) -> Option<&'static str> {
    use Action::{C, D};
    let name = match (responses, initial) {
        ([C, C, C, C], C) => "Cooperator",
        ([D, D, D, D], D) => "Defector",
        ([C, D, C, D], C) => "Tit For Tat",
        ([C, D, C, D], D) => "Suspicious Tit For Tat",
        ([D, C, D, C], C) => "Anti Tit For Tat",
        ([D, C, D, C], D) => "Bully",
        ([C, D, D, C], C) => "Win-Stay Lose-Shift",
        ([D, D, C, C], C) => "Alternator",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn play(player: &mut MemoryOnePlayer, opponent_moves: &[Action]) -> Vec<Action> {
        let mut history = History::new();
        let mut moves = Vec::new();
        for opponent in opponent_moves {
            let own = player.strategy(&history);
            moves.push(own);
            history.push(own, *opponent);
        }
        moves
    }

    #[test]
    fn test_all_players_are_distinct() {
        let players = MemoryOnePlayer::all();
        assert_eq!(players.len(), 32);

        let names: HashSet<_> = players.iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names.len(), 32);
        assert!(players.iter().all(|p| !p.classifier().stochastic));
    }

    #[test]
    fn test_classic_names_and_depths() {
        let cooperator = MemoryOnePlayer::from_code("CCCC/C").unwrap();
        assert_eq!(cooperator.name(), "Cooperator");
        assert_eq!(cooperator.classifier().memory_depth, MemoryDepth::Finite(0));

        let tft = MemoryOnePlayer::from_code("CDCD/C").unwrap();
        assert_eq!(tft.name(), "Tit For Tat");
        assert_eq!(tft.classifier().memory_depth, MemoryDepth::Finite(1));

        // Constant responses but a different opening still depend on the round.
        let late = MemoryOnePlayer::from_code("CCCC/D").unwrap();
        assert_eq!(late.name(), "Memory One CCCC/D");
        assert_eq!(late.classifier().memory_depth, MemoryDepth::Finite(1));
    }

    #[test]
    fn test_from_code_rejects_malformed() {
        assert!(MemoryOnePlayer::from_code("CDC/C").is_none());
        assert!(MemoryOnePlayer::from_code("CDCD").is_none());
        assert!(MemoryOnePlayer::from_code("CDCX/C").is_none());
        assert!(MemoryOnePlayer::from_code("CDCD/CD").is_none());
    }

    #[test]
    fn test_tit_for_tat_copies_opponent() {
        use Action::{C, D};
        let mut tft = MemoryOnePlayer::from_code("CDCD/C").unwrap();
        assert_eq!(play(&mut tft, &[D, C, D, D, C]), vec![C, D, C, D, D]);
    }

    #[test]
    fn test_win_stay_lose_shift() {
        use Action::{C, D};
        let mut wsls = MemoryOnePlayer::from_code("CDDC/C").unwrap();
        assert_eq!(wsls.name(), "Win-Stay Lose-Shift");
        // C vs D loses -> shift to D; D vs C wins -> stay D; D vs D loses -> shift to C.
        assert_eq!(play(&mut wsls, &[D, C, D, C]), vec![C, D, D, C]);
    }

    #[test]
    fn test_alternator_ignores_opponent() {
        use Action::{C, D};
        let mut alternator = MemoryOnePlayer::from_code("DDCC/C").unwrap();
        assert_eq!(alternator.name(), "Alternator");
        assert_eq!(play(&mut alternator, &[D, D, C, C, D]), vec![C, D, C, D, C]);
    }
}
