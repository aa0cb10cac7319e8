//! Level-select map: a graph of nodes unlocked by clearing their neighbours.

use std::collections::BTreeSet;

use glam::Vec2;
use log::info;
use pixel_quest_core::{Direction, LevelNumber, NodeId, NodeKind, WorldId};

/// Location on the overworld bound to a level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverworldNode {
    id: NodeId,
    position: Vec2,
    level: LevelNumber,
    kind: NodeKind,
    world: WorldId,
    completed: bool,
}

impl OverworldNode {
    /// Creates an uncompleted node. The identifier is assigned by the map.
    #[must_use]
    pub const fn new(position: Vec2, level: LevelNumber, kind: NodeKind, world: WorldId) -> Self {
        Self {
            id: NodeId::new(0),
            position,
            level,
            kind,
            world,
            completed: false,
        }
    }

    /// Identifier of the node, equal to its index on the map.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Centre of the node in arena units.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Level entered from this node.
    #[must_use]
    pub const fn level(&self) -> LevelNumber {
        self.level
    }

    /// Role the node plays on the map.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// World the node belongs to.
    #[must_use]
    pub const fn world(&self) -> WorldId {
        self.world
    }

    /// Whether the level bound to the node was cleared.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }
}

/// Overworld graph together with the cursor and the unlocked set.
#[derive(Clone, Debug)]
pub struct OverworldMap {
    nodes: Vec<OverworldNode>,
    edges: Vec<(NodeId, NodeId)>,
    current: NodeId,
    unlocked: BTreeSet<NodeId>,
}

impl OverworldMap {
    /// Builds the eight-level campaign map.
    #[must_use]
    pub fn standard() -> Self {
        let node = |x: f32, y: f32, level: u8, kind: NodeKind, world: u8| {
            let level = LevelNumber::new(level).unwrap_or(LevelNumber::FIRST);
            OverworldNode::new(Vec2::new(x, y), level, kind, WorldId::new(world))
        };
        let nodes = vec![
            node(100.0, 100.0, 1, NodeKind::Start, 1),
            node(250.0, 100.0, 2, NodeKind::Normal, 1),
            node(400.0, 100.0, 3, NodeKind::Normal, 1),
            node(175.0, 200.0, 4, NodeKind::Normal, 2),
            node(325.0, 200.0, 5, NodeKind::Boss, 2),
            node(250.0, 300.0, 6, NodeKind::Normal, 3),
            node(400.0, 300.0, 7, NodeKind::Normal, 3),
            node(325.0, 400.0, 8, NodeKind::Castle, 4),
        ];
        let edges = [(0, 1), (1, 2), (1, 3), (2, 4), (3, 5), (4, 5), (5, 6), (6, 7)];

        Self::assemble(nodes, &edges)
    }

    /// Builds a custom map from nodes and index pairs.
    ///
    /// The cursor starts on the first [`NodeKind::Start`] node, or the first
    /// node when no start node exists, and only that node is unlocked.
    /// Returns `None` when `nodes` is empty or an edge names a missing node.
    #[must_use]
    pub fn from_parts(nodes: Vec<OverworldNode>, edges: &[(u32, u32)]) -> Option<Self> {
        let count = u32::try_from(nodes.len()).ok()?;
        if count == 0 || edges.iter().any(|&(a, b)| a >= count || b >= count) {
            return None;
        }
        Some(Self::assemble(nodes, edges))
    }

    fn assemble(mut nodes: Vec<OverworldNode>, edges: &[(u32, u32)]) -> Self {
        for (index, node) in (0u32..).zip(nodes.iter_mut()) {
            node.id = NodeId::new(index);
            node.completed = false;
        }

        let start = nodes
            .iter()
            .find(|node| node.kind == NodeKind::Start)
            .map_or(NodeId::new(0), OverworldNode::id);

        Self {
            nodes,
            edges: edges
                .iter()
                .map(|&(a, b)| (NodeId::new(a), NodeId::new(b)))
                .collect(),
            current: start,
            unlocked: BTreeSet::from([start]),
        }
    }

    /// Every node of the map in identifier order.
    #[must_use]
    pub fn nodes(&self) -> &[OverworldNode] {
        &self.nodes
    }

    /// Looks up a node by identifier.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&OverworldNode> {
        usize::try_from(id.get())
            .ok()
            .and_then(|index| self.nodes.get(index))
    }

    /// Connections with at least one unlocked endpoint.
    pub fn visible_edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.edges
            .iter()
            .copied()
            .filter(move |&(a, b)| self.is_unlocked(a) || self.is_unlocked(b))
    }

    /// Whether the node may be visited and drawn.
    #[must_use]
    pub fn is_unlocked(&self, id: NodeId) -> bool {
        self.unlocked.contains(&id)
    }

    /// Node the cursor rests on.
    #[must_use]
    pub const fn current_node(&self) -> NodeId {
        self.current
    }

    /// Position of the cursor in arena units.
    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        self.node(self.current)
            .map_or(Vec2::ZERO, OverworldNode::position)
    }

    /// Level bound to the node under the cursor.
    #[must_use]
    pub fn current_level(&self) -> LevelNumber {
        self.node(self.current)
            .map_or(LevelNumber::FIRST, OverworldNode::level)
    }

    /// World of the node under the cursor.
    #[must_use]
    pub fn current_world(&self) -> WorldId {
        self.node(self.current)
            .map_or(WorldId::new(1), OverworldNode::world)
    }

    fn neighbours(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.iter().filter_map(move |&(a, b)| {
            if a == id {
                Some(b)
            } else if b == id {
                Some(a)
            } else {
                None
            }
        })
    }

    /// Moves the cursor to an unlocked neighbour.
    ///
    /// Neighbours are considered in edge declaration order. The first one
    /// lying in `direction` wins; when none does, the cursor moves to the
    /// first unlocked neighbour regardless of direction. Returns whether the
    /// cursor moved.
    pub fn travel(&mut self, direction: Direction) -> bool {
        let origin = self.cursor();
        let candidates: Vec<(NodeId, Vec2)> = self
            .neighbours(self.current)
            .filter(|id| self.is_unlocked(*id))
            .filter_map(|id| self.node(id).map(|node| (id, node.position)))
            .collect();

        let chosen = candidates
            .iter()
            .find(|(_, position)| direction.matches(*position - origin))
            .or_else(|| candidates.first());

        match chosen {
            Some(&(next, _)) => {
                self.current = next;
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn move_cursor(&mut self, id: NodeId) {
        self.current = id;
        let _ = self.unlocked.insert(id);
    }

    /// Marks the node under the cursor completed and unlocks its neighbours.
    ///
    /// Returns the nodes unlocked by this call; completing a node twice
    /// unlocks nothing the second time.
    pub fn complete_current_level(&mut self) -> Vec<NodeId> {
        let current = self.current;
        if let Some(node) = usize::try_from(current.get())
            .ok()
            .and_then(|index| self.nodes.get_mut(index))
        {
            node.completed = true;
        }

        let neighbours: Vec<NodeId> = self.neighbours(current).collect();
        let mut unlocked = Vec::new();
        for id in neighbours {
            if self.unlocked.insert(id) {
                info!("overworld node {} unlocked", id.get());
                unlocked.push(id);
            }
        }
        unlocked
    }
}

impl Default for OverworldMap {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: u32) -> NodeId {
        NodeId::new(value)
    }

    #[test]
    fn standard_map_starts_on_first_level() {
        let map = OverworldMap::standard();
        assert_eq!(map.nodes().len(), 8);
        assert_eq!(map.current_node(), id(0));
        assert_eq!(map.current_level(), LevelNumber::FIRST);
        assert_eq!(map.current_world(), WorldId::new(1));
        assert_eq!(map.cursor(), Vec2::new(100.0, 100.0));
        assert!(map.is_unlocked(id(0)));
        assert!((1..8).all(|n| !map.is_unlocked(id(n))));
        assert_eq!(map.nodes()[7].kind(), NodeKind::Castle);
        assert!(map.nodes()[7].level().is_final());
    }

    #[test]
    fn locked_neighbours_block_travel() {
        let mut map = OverworldMap::standard();
        for direction in [Direction::North, Direction::East, Direction::South, Direction::West] {
            assert!(!map.travel(direction));
        }
        assert_eq!(map.current_node(), id(0));
    }

    #[test]
    fn completing_unlocks_neighbours_once() {
        let mut map = OverworldMap::standard();
        assert_eq!(map.complete_current_level(), vec![id(1)]);
        assert!(map.nodes()[0].is_completed());
        assert!(map.complete_current_level().is_empty());
        assert!(map.is_unlocked(id(1)));
        assert!(!map.is_unlocked(id(2)));
    }

    #[test]
    fn travel_prefers_matching_direction() {
        let mut map = OverworldMap::standard();
        let _ = map.complete_current_level();
        assert!(map.travel(Direction::East));
        assert_eq!(map.current_node(), id(1));

        assert_eq!(map.complete_current_level(), vec![id(2), id(3)]);

        assert!(map.travel(Direction::South));
        assert_eq!(map.current_node(), id(3));
        assert_eq!(map.current_world(), WorldId::new(2));

        assert!(map.travel(Direction::North));
        assert_eq!(map.current_node(), id(1));

        assert!(map.travel(Direction::East));
        assert_eq!(map.current_node(), id(2));

        assert!(map.travel(Direction::West));
        assert_eq!(map.current_node(), id(1));
    }

    #[test]
    fn earlier_edges_win_ties_in_direction() {
        let mut map = OverworldMap::standard();
        map.move_cursor(id(5));
        assert_eq!(map.complete_current_level(), vec![id(3), id(4), id(6)]);

        assert!(map.travel(Direction::East), "node 4 lies east and its edge comes first");
        assert_eq!(map.current_node(), id(4));
    }

    #[test]
    fn travel_falls_back_to_first_neighbour() {
        let mut map = OverworldMap::standard();
        let _ = map.complete_current_level();

        assert!(map.travel(Direction::North), "node 1 sits level with node 0");
        assert_eq!(map.current_node(), id(1));

        assert!(map.travel(Direction::South), "only node 0 is reachable");
        assert_eq!(map.current_node(), id(0));
    }

    #[test]
    fn visible_edges_need_an_unlocked_endpoint() {
        let mut map = OverworldMap::standard();
        assert_eq!(map.visible_edges().collect::<Vec<_>>(), vec![(id(0), id(1))]);

        let _ = map.complete_current_level();
        assert_eq!(
            map.visible_edges().collect::<Vec<_>>(),
            vec![(id(0), id(1)), (id(1), id(2)), (id(1), id(3))]
        );
    }

    #[test]
    fn custom_maps_are_validated() {
        let lone = OverworldNode::new(
            Vec2::new(10.0, 10.0),
            LevelNumber::FINAL,
            NodeKind::Castle,
            WorldId::new(4),
        );
        assert!(OverworldMap::from_parts(Vec::new(), &[]).is_none());
        assert!(OverworldMap::from_parts(vec![lone], &[(0, 1)]).is_none());

        let map = OverworldMap::from_parts(vec![lone], &[]).unwrap();
        assert_eq!(map.current_level(), LevelNumber::FINAL);
        assert!(map.is_unlocked(id(0)));
    }
}
