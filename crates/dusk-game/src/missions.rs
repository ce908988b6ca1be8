//! Default missions and kill-progress bookkeeping.

use dusk_core::{CreatureType, Mission, PlayerState};

/// The standing bounties a new run starts with.
pub fn default_missions() -> Vec<Mission> {
    vec![
        Mission::new("cull_walkers", "Thin the Herd", CreatureType::Walker, 5, 80),
        Mission::new(
            "silence_screamers",
            "Silence the Screamers",
            CreatureType::Screamer,
            3,
            120,
        ),
        Mission::new("break_brutes", "Break the Brutes", CreatureType::Brute, 2, 200)
            .with_boss_unlock("military_base"),
    ]
}

/// Record a creature kill against every active mission.
///
/// Returns `(bonus_xp, completed_mission_names)`.
pub fn record_kill(state: &mut PlayerState, species: CreatureType) -> (u32, Vec<String>) {
    let mut bonus = 0;
    let mut completed = Vec::new();
    for mission in &mut state.missions {
        if mission.record_kill(species) {
            bonus += mission.reward_xp;
            completed.push(mission.name.clone());
        }
    }
    (bonus, completed)
}

/// Whether a completed mission has unlocked a boss at this location that
/// has not been put down yet.
pub fn boss_unlocked_at(state: &PlayerState, location_id: &str) -> bool {
    if state.bosses_slain.iter().any(|l| l == location_id) {
        return false;
    }
    state.missions.iter().any(|m| {
        m.completed
            && m.unlocks_boss_at
                .as_deref()
                .is_some_and(|l| l == location_id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_missions() -> PlayerState {
        let mut state = PlayerState::new("Ash", "camp", false);
        state.missions = default_missions();
        state
    }

    #[test]
    fn kills_advance_the_matching_mission() {
        let mut state = state_with_missions();
        for _ in 0..4 {
            let (xp, done) = record_kill(&mut state, CreatureType::Walker);
            assert_eq!(xp, 0);
            assert!(done.is_empty());
        }
        let (xp, done) = record_kill(&mut state, CreatureType::Walker);
        assert_eq!(xp, 80);
        assert_eq!(done, vec!["Thin the Herd".to_string()]);
    }

    #[test]
    fn boss_unlock_waits_for_completion() {
        let mut state = state_with_missions();
        assert!(!boss_unlocked_at(&state, "military_base"));
        record_kill(&mut state, CreatureType::Brute);
        assert!(!boss_unlocked_at(&state, "military_base"));
        record_kill(&mut state, CreatureType::Brute);
        assert!(boss_unlocked_at(&state, "military_base"));
        assert!(!boss_unlocked_at(&state, "downtown"));
    }

    #[test]
    fn slain_boss_relocks_the_lair() {
        let mut state = state_with_missions();
        record_kill(&mut state, CreatureType::Brute);
        record_kill(&mut state, CreatureType::Brute);
        state.bosses_slain.push("military_base".to_string());
        assert!(!boss_unlocked_at(&state, "military_base"));
    }
}
