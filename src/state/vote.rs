use super::SessionEngine;
use crate::types::*;

impl SessionEngine {
    /// Clear ballots for one round
    pub fn reset_votes(&mut self, round: VoteRound) {
        for player in &mut self.players {
            match round {
                VoteRound::First => player.vote1 = None,
                VoteRound::Second => {
                    player.vote2 = None;
                    player.vote_count2 = 0;
                }
            }
        }
    }

    /// Record a ballot for `player_name`. Unknown players are ignored.
    pub fn record_vote(&mut self, player_name: &str, ballot: Ballot) {
        let Some(player) = self.get_player_mut(player_name) else {
            tracing::debug!("Ignoring vote from unknown player {}", player_name);
            return;
        };

        match ballot {
            Ballot::WordFound(vote) => player.vote1 = Some(vote),
            Ballot::Accuse(target) => player.vote2 = Some(target),
        }
    }

    /// True once every human player has voted in `round`
    pub fn everyone_has_voted(&self, round: VoteRound) -> bool {
        self.players
            .iter()
            .all(|p| p.is_ghost || p.has_voted(round))
    }

    /// Count round-1 ballots
    pub fn tally_vote1(&mut self) -> Vote1Result {
        let mut result = Vote1Result::default();
        for player in self.players.iter().filter(|p| !p.is_ghost) {
            match player.vote1 {
                Some(WordVote::Up) => result.up += 1,
                Some(WordVote::Down) => result.down += 1,
                None => {}
            }
        }

        self.result_vote1 = Some(result);
        result
    }

    /// Count accusations and decide whether the Traitor was caught.
    ///
    /// Everyone except the Game Master is ranked by accusations received,
    /// keeping roster order among equal counts. The group wins only when the
    /// Traitor is ranked first with strictly more votes than the runner-up.
    pub fn tally_vote2(&mut self) -> Vote2Result {
        for player in &mut self.players {
            player.vote_count2 = 0;
        }

        let targets: Vec<String> = self
            .players
            .iter()
            .filter_map(|p| p.vote2.clone())
            .filter(|target| !target.is_empty())
            .collect();

        for target in targets {
            if let Some(accused) = self.get_player_mut(&target) {
                accused.vote_count2 += 1;
            }
        }

        let mut ranked: Vec<Player> = self
            .players
            .iter()
            .filter(|p| p.role != Role::GameMaster)
            .cloned()
            .collect();
        ranked.sort_by(|a, b| b.vote_count2.cmp(&a.vote_count2));

        let has_won = match ranked.as_slice() {
            [top, rest @ ..] => {
                top.role == Role::Traitor
                    && rest
                        .first()
                        .map_or(true, |second| second.vote_count2 < top.vote_count2)
            }
            [] => false,
        };

        let has_traitor = self.ghost().map_or(true, |ghost| ghost.role != Role::Traitor);

        let result = Vote2Result {
            has_won,
            vote_detail: ranked,
            has_traitor,
        };

        tracing::info!(
            "Accusation vote tallied: has_won={}, has_traitor={}",
            result.has_won,
            result.has_traitor
        );

        self.result_vote2 = Some(result.clone());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::engine;
    use super::*;
    use serde_json::json;

    fn set_role(engine: &mut SessionEngine, name: &str, role: Role) {
        engine.get_player_mut(name).unwrap().role = role;
    }

    fn accuse(engine: &mut SessionEngine, voter: &str, target: &str) {
        engine.record_vote(voter, Ballot::Accuse(target.to_string()));
    }

    #[test]
    fn test_record_vote_unknown_player_is_noop() {
        let mut engine = engine();
        engine.add_player("Alice", false);

        engine.record_vote("Nobody", Ballot::WordFound(WordVote::Up));
        assert!(engine.get_player("Alice").unwrap().vote1.is_none());
    }

    #[test]
    fn test_everyone_has_voted_after_reset() {
        let mut engine = engine();
        engine.reset_votes(VoteRound::First);
        assert!(engine.everyone_has_voted(VoteRound::First));

        engine.players.push(Player::ghost());
        assert!(engine.everyone_has_voted(VoteRound::First));

        engine.add_player("Alice", false);
        engine.add_player("Bob", false);
        engine.reset_votes(VoteRound::First);
        assert!(!engine.everyone_has_voted(VoteRound::First));

        engine.record_vote("Alice", Ballot::WordFound(WordVote::Up));
        assert!(!engine.everyone_has_voted(VoteRound::First));

        engine.record_vote("Bob", Ballot::WordFound(WordVote::Down));
        assert!(engine.everyone_has_voted(VoteRound::First));
        // Rounds are tracked separately
        assert!(!engine.everyone_has_voted(VoteRound::Second));
    }

    #[test]
    fn test_reset_votes_is_round_scoped() {
        let mut engine = engine();
        engine.add_player("Alice", false);
        engine.add_player("Bob", false);
        engine.record_vote("Alice", Ballot::WordFound(WordVote::Up));
        accuse(&mut engine, "Alice", "Bob");
        engine.tally_vote2();

        engine.reset_votes(VoteRound::First);
        let alice = engine.get_player("Alice").unwrap();
        assert!(alice.vote1.is_none());
        assert_eq!(alice.vote2.as_deref(), Some("Bob"));
        assert_eq!(engine.get_player("Bob").unwrap().vote_count2, 1);

        engine.reset_votes(VoteRound::Second);
        assert!(engine.get_player("Alice").unwrap().vote2.is_none());
        assert_eq!(engine.get_player("Bob").unwrap().vote_count2, 0);
    }

    #[test]
    fn test_tally_vote1_counts_up_and_down() {
        let mut engine = engine();
        let raw = [json!("1"), json!("0"), json!(1), json!(null)];
        for (i, value) in raw.iter().enumerate() {
            let name = format!("P{i}");
            engine.add_player(&name, false);
            if let Some(vote) = WordVote::from_value(value) {
                engine.record_vote(&name, Ballot::WordFound(vote));
            }
        }

        let result = engine.tally_vote1();
        assert_eq!(result, Vote1Result { up: 2, down: 1 });
        assert_eq!(engine.result_vote1(), Some(result));
    }

    #[test]
    fn test_tally_vote2_tie_at_top_loses() {
        let mut engine = engine();
        for name in ["A", "B", "C", "V1", "V2", "V3", "V4", "V5", "V6"] {
            engine.add_player(name, false);
        }
        set_role(&mut engine, "A", Role::Traitor);
        set_role(&mut engine, "C", Role::GameMaster);
        for voter in ["V1", "V2", "V3"] {
            accuse(&mut engine, voter, "A");
        }
        for voter in ["V4", "V5", "V6"] {
            accuse(&mut engine, voter, "B");
        }

        let result = engine.tally_vote2();

        assert!(!result.has_won);
        assert!(result.has_traitor);
        assert_eq!(result.vote_detail[0].name, "A");
        assert_eq!(result.vote_detail[0].vote_count2, 3);
        assert_eq!(result.vote_detail[1].name, "B");
        assert!(result
            .vote_detail
            .iter()
            .all(|p| p.role != Role::GameMaster));
    }

    #[test]
    fn test_tally_vote2_strict_plurality_wins() {
        let mut engine = engine();
        for name in ["A", "B", "V1", "V2", "V3"] {
            engine.add_player(name, false);
        }
        set_role(&mut engine, "A", Role::Traitor);
        for voter in ["V1", "V2", "V3"] {
            accuse(&mut engine, voter, "A");
        }
        accuse(&mut engine, "A", "B");

        let result = engine.tally_vote2();

        assert!(result.has_won);
        assert_eq!(result.vote_detail[0].name, "A");
        assert_eq!(result.vote_detail[0].vote_count2, 3);
        assert_eq!(result.vote_detail[1].vote_count2, 1);
        assert_eq!(engine.result_vote2(), Some(&result));
    }

    #[test]
    fn test_tally_vote2_citizen_on_top_loses() {
        let mut engine = engine();
        for name in ["A", "B", "C"] {
            engine.add_player(name, false);
        }
        set_role(&mut engine, "A", Role::Traitor);
        accuse(&mut engine, "A", "B");
        accuse(&mut engine, "C", "B");

        assert!(!engine.tally_vote2().has_won);
    }

    #[test]
    fn test_tally_vote2_stable_ranking_and_ghost_target() {
        let mut engine = engine();
        for name in ["A", "B", "C", "D"] {
            engine.add_player(name, false);
        }
        engine.players.push(Player::ghost());
        set_role(&mut engine, "D", Role::GameMaster);
        accuse(&mut engine, "A", GHOST_NAME);
        accuse(&mut engine, "B", GHOST_NAME);
        // Unknown and empty targets are not counted
        accuse(&mut engine, "C", "Nobody");
        accuse(&mut engine, "D", "");

        let result = engine.tally_vote2();
        let names: Vec<_> = result.vote_detail.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec![GHOST_NAME, "A", "B", "C"]);
        assert_eq!(result.vote_detail[0].vote_count2, 2);
        assert!(!result.has_won);
        assert!(result.has_traitor);
    }

    #[test]
    fn test_tally_vote2_recounts_from_zero() {
        let mut engine = engine();
        engine.add_player("A", false);
        engine.add_player("B", false);
        accuse(&mut engine, "A", "B");

        engine.tally_vote2();
        let result = engine.tally_vote2();

        let b = result.vote_detail.iter().find(|p| p.name == "B").unwrap();
        assert_eq!(b.vote_count2, 1);
    }

    #[test]
    fn test_tally_vote2_empty_roster() {
        let mut engine = engine();
        let result = engine.tally_vote2();

        assert!(!result.has_won);
        assert!(result.vote_detail.is_empty());
        assert!(result.has_traitor);
    }
}
