use super::SessionEngine;
use crate::types::*;
use rand::seq::SliceRandom;
use unicase::UniCase;

/// Accent- and case-insensitive sort key, so "Élodie" sorts with the E's
fn collation_key(name: &str) -> UniCase<String> {
    UniCase::new(deunicode::deunicode(name))
}

impl SessionEngine {
    /// Deal a fresh set of roles: one Game Master, then one Traitor among the
    /// remaining humans. Returns the roster re-sorted for display.
    pub fn randomize_roles(&mut self) -> &[Player] {
        self.reset_round();

        let mut eligible: Vec<usize> = (0..self.players.len())
            .filter(|&i| !self.players[i].is_ghost)
            .collect();
        eligible.shuffle(&mut self.rng);
        self.assign_role(Role::GameMaster, &eligible);

        self.add_ghost_if_needed();

        let mut traitor_candidates: Vec<usize> = (0..self.players.len())
            .filter(|&i| !self.players[i].is_ghost && self.players[i].role == Role::Citizen)
            .collect();
        traitor_candidates.shuffle(&mut self.rng);
        self.assign_role(Role::Traitor, &traitor_candidates);

        self.players.sort_by(|a, b| {
            a.is_ghost
                .cmp(&b.is_ghost)
                .then_with(|| collation_key(&a.name).cmp(&collation_key(&b.name)))
                .then_with(|| a.name.cmp(&b.name))
        });

        tracing::info!("Roles dealt to {} players", self.visible_players().len());
        &self.players
    }

    /// Clear everything a round leaves behind
    pub(super) fn reset_round(&mut self) {
        self.stop_countdown();
        self.players.retain(|p| !p.is_ghost);

        for player in &mut self.players {
            player.role = Role::Citizen;
            player.vote1 = None;
            player.vote2 = None;
            player.vote_count2 = 0;
        }

        self.word.clear();
        self.status = GameStatus::Idle;
        self.result_vote1 = None;
        self.result_vote2 = None;
    }

    /// Give `role` to the first candidate still holding the default role
    fn assign_role(&mut self, role: Role, candidates: &[usize]) {
        if let Some(&index) = candidates
            .iter()
            .find(|&&i| self.players[i].role == Role::Citizen)
        {
            self.players[index].role = role;
        }
    }

    fn add_ghost_if_needed(&mut self) {
        if !self.settings.traitor_optional || self.ghost().is_some() {
            return;
        }
        self.players.push(Player::ghost());
    }
}
