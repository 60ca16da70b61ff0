use super::SessionEngine;
use crate::error::SessionError;
use crate::types::*;

impl SessionEngine {
    /// Check if a status transition is valid
    fn is_valid_transition(from: GameStatus, to: GameStatus) -> bool {
        match (from, to) {
            // Reset is the only way back
            (_, GameStatus::Role) => true,
            // Nothing happens before roles are dealt
            (GameStatus::Idle, _) => false,
            // Forward, or re-entering the current status (re-display)
            (from, to) => to >= from,
        }
    }

    fn ensure_transition(&self, to: GameStatus) -> Result<(), SessionError> {
        if Self::is_valid_transition(self.status, to) {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                from: self.status,
                to,
            })
        }
    }

    fn set_status(&mut self, status: GameStatus) {
        tracing::info!("Status {:?} -> {:?}", self.status, status);
        self.status = status;
    }

    /// Start a new round: deal roles, draw a word
    pub fn reset_game(&mut self) -> &[Player] {
        self.randomize_roles();
        self.set_word(None);
        self.set_status(GameStatus::Role);
        &self.players
    }

    /// Show the word to everyone but the Game Master
    pub fn reveal_word(&mut self) -> Result<(), SessionError> {
        self.ensure_transition(GameStatus::Word)?;
        self.set_status(GameStatus::Word);
        Ok(())
    }

    /// Open the discussion and start the countdown
    pub fn start_game<F>(&mut self, on_tick: F) -> Result<(), SessionError>
    where
        F: Fn(u32) + Send + 'static,
    {
        self.ensure_transition(GameStatus::InProgress)?;
        self.set_status(GameStatus::InProgress);
        self.start_countdown(on_tick);
        Ok(())
    }

    /// The word was guessed: stop the clock and move to the first vote
    pub fn word_found(&mut self) -> Result<(), SessionError> {
        self.ensure_transition(GameStatus::Vote1)?;
        self.stop_countdown();
        self.set_status(GameStatus::Vote1);
        Ok(())
    }

    /// Open a vote round with a clean slate of ballots
    pub fn display_vote(&mut self, round: VoteRound) -> Result<(), SessionError> {
        self.ensure_transition(round.status())?;
        if round == VoteRound::First {
            self.stop_countdown();
        }
        self.reset_votes(round);
        self.set_status(round.status());
        Ok(())
    }

    /// Players that can be accused in the second vote, ghost included
    pub fn accusation_targets(&self) -> Vec<Player> {
        self.players
            .iter()
            .filter(|p| p.role != Role::GameMaster)
            .cloned()
            .collect()
    }

    /// Record a ballot and, once every player has voted in that round, tally
    /// it and advance the status.
    pub fn submit_vote(
        &mut self,
        player_name: &str,
        ballot: Ballot,
    ) -> Result<Option<VoteOutcome>, SessionError> {
        let round = ballot.round();
        if self.status != round.status() {
            return Err(SessionError::VotingClosed {
                round,
                status: self.status,
            });
        }

        tracing::debug!("Vote from {}: {:?}", player_name, ballot);
        self.record_vote(player_name, ballot);

        if !self.everyone_has_voted(round) {
            return Ok(None);
        }

        let outcome = match round {
            VoteRound::First => {
                let result = self.tally_vote1();
                self.set_status(GameStatus::Vote2);
                VoteOutcome::WordFound(result)
            }
            VoteRound::Second => {
                let result = self.tally_vote2();
                self.set_status(GameStatus::End);
                VoteOutcome::Accusation(result)
            }
        };

        Ok(Some(outcome))
    }
}
