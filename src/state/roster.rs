use super::SessionEngine;
use crate::types::*;

impl SessionEngine {
    /// Full roster in display order, ghost included (admin view)
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Roster as shown to players: the ghost is never visible
    pub fn visible_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| !p.is_ghost).collect()
    }

    pub fn get_player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub(super) fn get_player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.name == name)
    }

    pub(super) fn ghost(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_ghost)
    }

    /// Add a player, replacing any existing entry with the same name.
    /// Blank names are ignored.
    pub fn add_player(&mut self, name: &str, is_admin: bool) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        if let Some(index) = self.players.iter().position(|p| p.name == name) {
            self.players.remove(index);
            tracing::debug!("Replacing existing player {}", name);
        }

        self.players.push(Player::new(name, is_admin));
        tracing::info!("Added player {} (admin: {})", name, is_admin);
    }

    /// Remove a player by exact name; unknown names are ignored
    pub fn delete_player(&mut self, name: &str) {
        let before = self.players.len();
        self.players.retain(|p| p.name != name);
        if self.players.len() != before {
            tracing::info!("Removed player {}", name);
        }
    }

    /// A client connected
    pub fn track_online(&mut self) -> PresenceCounts {
        self.online += 1;
        self.presence()
    }

    /// A client disconnected. Never drops below zero.
    pub fn track_offline(&mut self) -> PresenceCounts {
        self.online = self.online.saturating_sub(1);
        self.presence()
    }

    /// Connection count against roster size. This counts connections, not
    /// players, so several tabs for one player count several times.
    pub fn presence(&self) -> PresenceCounts {
        let visible = self.players.iter().filter(|p| !p.is_ghost).count() as u32;
        PresenceCounts {
            online: self.online,
            offline: visible.saturating_sub(self.online),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::engine;
    use super::*;

    #[test]
    fn test_add_player_trims_name() {
        let mut engine = engine();
        engine.add_player("  Alice  ", true);

        let player = engine.get_player("Alice").unwrap();
        assert_eq!(player.role, Role::Citizen);
        assert!(player.is_admin());
        assert!(!player.is_ghost);
    }

    #[test]
    fn test_add_player_ignores_blank_names() {
        let mut engine = engine();
        engine.add_player("", false);
        engine.add_player("   ", false);

        assert!(engine.players().is_empty());
    }

    #[test]
    fn test_add_existing_player_resets_it() {
        let mut engine = engine();
        engine.add_player("Alice", true);
        engine.add_player("Bob", false);
        {
            let alice = engine.get_player_mut("Alice").unwrap();
            alice.role = Role::Traitor;
            alice.vote1 = Some(WordVote::Up);
            alice.vote2 = Some("Bob".to_string());
        }

        engine.add_player("Alice", false);

        assert_eq!(engine.players().len(), 2);
        let alice = engine.get_player("Alice").unwrap();
        assert_eq!(alice.role, Role::Citizen);
        assert!(alice.vote1.is_none());
        assert!(alice.vote2.is_none());
        assert!(!alice.is_admin());
        // Re-added players move to the end
        assert_eq!(engine.players()[1].name, "Alice");
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut engine = engine();
        engine.add_player("alice", false);
        engine.add_player("Alice", false);

        assert_eq!(engine.players().len(), 2);
    }

    #[test]
    fn test_delete_player() {
        let mut engine = engine();
        engine.add_player("Alice", false);
        engine.add_player("Bob", false);

        engine.delete_player("Alice");
        assert!(engine.get_player("Alice").is_none());
        assert_eq!(engine.players().len(), 1);

        // Unknown names are a no-op
        engine.delete_player("Nobody");
        assert_eq!(engine.players().len(), 1);
    }

    #[test]
    fn test_visible_players_exclude_ghost() {
        let mut engine = engine();
        engine.add_player("Alice", false);
        engine.players.push(Player::ghost());

        assert_eq!(engine.players().len(), 2);
        let visible = engine.visible_players();
        assert_eq!(visible.len(), 1);
        assert!(visible.iter().all(|p| !p.is_ghost));
    }

    #[test]
    fn test_presence_round_trip() {
        let mut engine = engine();
        engine.add_player("Alice", false);
        engine.add_player("Bob", false);

        let before = engine.presence();
        assert_eq!(before, PresenceCounts { online: 0, offline: 2 });

        let online = engine.track_online();
        assert_eq!(online, PresenceCounts { online: 1, offline: 1 });

        let after = engine.track_offline();
        assert_eq!(after, before);
    }

    #[test]
    fn test_presence_never_negative() {
        let mut engine = engine();
        engine.add_player("Alice", false);

        let counts = engine.track_offline();
        assert_eq!(counts, PresenceCounts { online: 0, offline: 1 });

        engine.track_online();
        engine.track_online();
        let counts = engine.track_online();
        // More connections than players
        assert_eq!(counts, PresenceCounts { online: 3, offline: 0 });
    }

    #[test]
    fn test_presence_ignores_ghost() {
        let mut engine = engine();
        engine.add_player("Alice", false);
        engine.players.push(Player::ghost());

        assert_eq!(engine.presence().offline, 1);
    }
}
