//! Companion roster. The party only stores ids; the world owns the NPCs.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::geometry::Point;
use crate::world::{NpcId, NpcStatus, RoomId, World};

pub const PARTY_CAPACITY: usize = 4;

/// Companions stay put while within this distance of the one ahead of them.
pub const FOLLOW_DISTANCE: f64 = 64.0;
/// Fraction of the remaining gap closed per tick.
pub const FOLLOW_RATE: f64 = 0.1;

#[derive(Debug, Default)]
pub struct Party {
    members: ArrayVec<NpcId, PARTY_CAPACITY>,
}

impl Party {
    pub fn members(&self) -> &[NpcId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.is_full()
    }

    /// Adds a wild, friendly NPC. Anything else (full party, hostile, already
    /// joined or defeated) is a silent no-op that returns false.
    pub fn recruit(&mut self, world: &mut World, id: NpcId) -> bool {
        let npc = world.npc_mut(id);
        if npc.enemy || !npc.is_wild() {
            return false;
        }
        if self.members.try_push(id).is_err() {
            debug!(npc = %npc.name, "party full, recruit ignored");
            return false;
        }
        npc.status = NpcStatus::Joined;
        info!(npc = %npc.name, "companion joined");
        true
    }

    /// Removes the companion at `index`, keeping the order of the rest. The NPC
    /// becomes wild again and is left standing in `here`.
    pub fn dismiss(&mut self, world: &mut World, index: usize, here: RoomId) -> Option<NpcId> {
        if index >= self.members.len() {
            return None;
        }
        let id = self.members.remove(index);
        let npc = world.npc_mut(id);
        npc.status = NpcStatus::Wild;
        npc.room = here;
        info!(npc = %npc.name, "companion dismissed");
        Some(id)
    }

    /// Conga-line follow: each companion chases the one ahead of it.
    pub fn follow_update(&self, leader: Point, world: &mut World) {
        let mut leader = leader;
        for &id in &self.members {
            let npc = world.npc_mut(id);
            npc.pos = follow_step(npc.pos, leader);
            leader = npc.pos;
        }
    }
}

pub fn follow_step(pos: Point, leader: Point) -> Point {
    if pos.distance(leader) <= FOLLOW_DISTANCE {
        return pos;
    }
    let dx = f64::from(leader.x - pos.x) * FOLLOW_RATE;
    let dy = f64::from(leader.y - pos.y) * FOLLOW_RATE;
    pos.offset(dx.round() as i32, dy.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{BUNDLED_WORLD, load_world_from_str};

    fn world() -> World {
        load_world_from_str(BUNDLED_WORLD).unwrap()
    }

    fn npc(world: &World, key: &str) -> NpcId {
        world.npc_by_key(key).unwrap()
    }

    #[test]
    fn recruit_then_dismiss_round_trips() {
        let mut world = world();
        let mut party = Party::default();
        let familiar = npc(&world, "familiar");
        let pod = world.start_room;

        assert!(party.recruit(&mut world, familiar));
        assert_eq!(party.len(), 1);
        assert!(world.npc(familiar).joined());

        assert_eq!(party.dismiss(&mut world, 0, pod), Some(familiar));
        assert!(party.is_empty());
        assert!(!world.npc(familiar).joined());

        assert!(party.recruit(&mut world, familiar));
    }

    #[test]
    fn hostiles_and_members_are_not_recruited_twice() {
        let mut world = world();
        let mut party = Party::default();
        let imp = npc(&world, "imp_1");
        let warrior = npc(&world, "warrior");

        assert!(!party.recruit(&mut world, imp));
        assert!(party.recruit(&mut world, warrior));
        assert!(!party.recruit(&mut world, warrior));
        assert_eq!(party.len(), 1);
    }

    #[test]
    fn full_party_is_a_no_op() {
        let mut world = world();
        let mut party = Party::default();
        for key in ["familiar", "warrior", "cleric"] {
            let id = npc(&world, key);
            assert!(party.recruit(&mut world, id));
        }
        // A fourth friendly: turn a hostile into one for the test.
        let acolyte = npc(&world, "acolyte");
        world.npc_mut(acolyte).enemy = false;
        assert!(party.recruit(&mut world, acolyte));
        assert!(party.is_full());

        let imp = npc(&world, "imp_2");
        world.npc_mut(imp).enemy = false;
        assert!(!party.recruit(&mut world, imp));
        assert!(world.npc(imp).is_wild());
    }

    #[test]
    fn dismiss_keeps_order() {
        let mut world = world();
        let mut party = Party::default();
        let ids: Vec<NpcId> = ["familiar", "warrior", "cleric"]
            .iter()
            .map(|k| npc(&world, k))
            .collect();
        for &id in &ids {
            party.recruit(&mut world, id);
        }
        let pod = world.start_room;
        party.dismiss(&mut world, 1, pod);
        assert_eq!(party.members(), &[ids[0], ids[2]]);
        assert_eq!(party.dismiss(&mut world, 5, pod), None);
    }

    #[test]
    fn follower_waits_inside_the_threshold() {
        let leader = Point::new(100, 100);
        assert_eq!(follow_step(Point::new(140, 100), leader), Point::new(140, 100));
        assert_eq!(follow_step(Point::new(200, 100), leader), Point::new(190, 100));
    }

    #[test]
    fn companions_form_a_chain() {
        let mut world = world();
        let mut party = Party::default();
        let a = npc(&world, "familiar");
        let b = npc(&world, "warrior");
        party.recruit(&mut world, a);
        party.recruit(&mut world, b);
        world.npc_mut(a).pos = Point::new(0, 300);
        world.npc_mut(b).pos = Point::new(0, 400);

        party.follow_update(Point::new(0, 100), &mut world);
        assert_eq!(world.npc(a).pos, Point::new(0, 280));
        // b chases a's new position: 400 - 0.1 * 120
        assert_eq!(world.npc(b).pos, Point::new(0, 388));
    }
}
