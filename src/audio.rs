//! Sound cues
//!
//! Maps simulation events to sound effects. Playback itself belongs to the
//! host; this only decides what to play and how loud.

use serde::{Deserialize, Serialize};

use crate::sim::SimEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Water splash, first in the escalation
    Drop1,
    Drop2,
    Drop3,
    /// Stone skipping off the surface
    TinySplash,
    /// Stone hits a cube or the boat
    HitThud,
    /// Fish landed
    FishCatch,
    /// Chest appears
    ChestSpawn,
    /// Chest collected
    ChestPickup,
}

impl SoundEffect {
    /// Clip name the host loads the sample under
    pub fn clip_name(&self) -> &'static str {
        match self {
            SoundEffect::Drop1 => "drop1",
            SoundEffect::Drop2 => "drop2",
            SoundEffect::Drop3 => "drop3",
            SoundEffect::TinySplash => "tiny_splash",
            SoundEffect::HitThud => "hit_thud",
            SoundEffect::FishCatch => "fish_catch",
            SoundEffect::ChestSpawn => "chest_spawn",
            SoundEffect::ChestPickup => "chest_pickup",
        }
    }

    /// Default gain (0.0 - 1.0)
    pub fn gain(&self) -> f32 {
        match self {
            SoundEffect::HitThud => 110.0 / 128.0,
            _ => 1.0,
        }
    }

    /// Splashes share one channel
    pub fn is_splash(&self) -> bool {
        matches!(
            self,
            SoundEffect::Drop1 | SoundEffect::Drop2 | SoundEffect::Drop3 | SoundEffect::TinySplash
        )
    }
}

const DROPS: [SoundEffect; 3] = [SoundEffect::Drop1, SoundEffect::Drop2, SoundEffect::Drop3];

/// Stateful event-to-cue mapping
#[derive(Debug, Clone, Default)]
pub struct CueSheet {
    /// Next entry in `DROPS`; resets on each throw
    splash_index: usize,
    muted: bool,
}

impl CueSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn splash_index(&self) -> usize {
        self.splash_index
    }

    /// Cues for one frame's events. At most one splash plays per frame, with
    /// a skip taking priority over a plain splash; likewise one thud.
    pub fn cues(&mut self, events: &[SimEvent]) -> Vec<SoundEffect> {
        let mut out = Vec::new();
        let mut skipped = false;
        let mut sank = false;
        let mut thud = false;

        for event in events {
            match event {
                SimEvent::StoneThrown { .. } => self.splash_index = 0,
                SimEvent::StoneSkipped { .. } => skipped = true,
                SimEvent::StoneSank { .. } => sank = true,
                SimEvent::CubeHit { .. } | SimEvent::BoatHit => thud = true,
                SimEvent::FishCaught { .. } => out.push(SoundEffect::FishCatch),
                SimEvent::ChestSpawned { .. } => out.push(SoundEffect::ChestSpawn),
                SimEvent::ChestCollected { .. } => out.push(SoundEffect::ChestPickup),
                _ => {}
            }
        }

        if skipped {
            out.push(SoundEffect::TinySplash);
        } else if sank {
            out.push(DROPS[self.splash_index]);
            self.splash_index = (self.splash_index + 1).min(DROPS.len() - 1);
        }
        if thud {
            out.push(SoundEffect::HitThud);
        }

        if self.muted {
            out.clear();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn sank() -> SimEvent {
        SimEvent::StoneSank { pos: Vec3::ZERO }
    }

    #[test]
    fn test_splash_escalates_and_saturates() {
        let mut sheet = CueSheet::new();
        assert_eq!(sheet.cues(&[sank()]), vec![SoundEffect::Drop1]);
        assert_eq!(sheet.cues(&[sank()]), vec![SoundEffect::Drop2]);
        assert_eq!(sheet.cues(&[sank()]), vec![SoundEffect::Drop3]);
        assert_eq!(sheet.cues(&[sank()]), vec![SoundEffect::Drop3]);
    }

    #[test]
    fn test_throw_resets_escalation() {
        let mut sheet = CueSheet::new();
        sheet.cues(&[sank()]);
        sheet.cues(&[sank()]);
        assert_eq!(sheet.splash_index(), 2);
        sheet.cues(&[SimEvent::StoneThrown { charge: 0.5 }]);
        assert_eq!(sheet.cues(&[sank()]), vec![SoundEffect::Drop1]);
    }

    #[test]
    fn test_skip_preferred_over_sink() {
        let mut sheet = CueSheet::new();
        let events = [
            sank(),
            SimEvent::StoneSkipped {
                pos: Vec3::ZERO,
                bounces: 1,
            },
        ];
        assert_eq!(sheet.cues(&events), vec![SoundEffect::TinySplash]);
        // Escalation untouched
        assert_eq!(sheet.splash_index(), 0);
    }

    #[test]
    fn test_one_thud_per_frame() {
        let mut sheet = CueSheet::new();
        let events = [SimEvent::CubeHit { cube: 0 }, SimEvent::BoatHit];
        assert_eq!(sheet.cues(&events), vec![SoundEffect::HitThud]);
    }

    #[test]
    fn test_pickups_and_catches() {
        let mut sheet = CueSheet::new();
        let events = [
            SimEvent::FishCaught { fish: 3 },
            SimEvent::ChestCollected { prizes: 1 },
        ];
        let cues = sheet.cues(&events);
        assert_eq!(cues, vec![SoundEffect::FishCatch, SoundEffect::ChestPickup]);
        assert!(cues.iter().all(|c| !c.is_splash()));
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut sheet = CueSheet::new();
        sheet.set_muted(true);
        assert!(sheet.cues(&[sank(), SimEvent::BoatHit]).is_empty());
    }
}
