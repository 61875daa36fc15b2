use std::collections::VecDeque;
use std::fmt;

use thiserror::Error;

use crate::infra::Position;
use crate::state::{CellKind, Map};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Target => write!(f, "target"),
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("{endpoint} {position} is outside the {width}x{height} arena")]
    InvalidInput {
        endpoint: Endpoint,
        position: Position,
        width: i32,
        height: i32,
    },
}

/// Shortest route, start and target inclusive. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route(Vec<Position>);

impl Route {
    pub fn positions(&self) -> &[Position] {
        &self.0
    }

    pub fn start(&self) -> Position {
        self.0[0]
    }

    pub fn target(&self) -> Position {
        self.0[self.0.len() - 1]
    }

    pub fn step_count(&self) -> usize {
        self.0.len() - 1
    }

    /// The cell to move to next, `None` for a zero-step route.
    pub fn first_step(&self) -> Option<Position> {
        self.0.get(1).copied()
    }
}

/// Per-call distance labels, indexed like the map cells.
struct DistanceField {
    labels: Vec<Option<u32>>,
}

impl DistanceField {
    fn new(map: &Map) -> Self {
        Self {
            labels: vec![None; map.len()],
        }
    }

    fn get(&self, map: &Map, pos: Position) -> Option<u32> {
        map.index(pos).and_then(|index| self.labels[index])
    }

    fn set(&mut self, map: &Map, pos: Position, distance: u32) {
        if let Some(index) = map.index(pos) {
            self.labels[index] = Some(distance);
        }
    }
}

/// Breadth-first shortest paths on the 4-connected arena grid.
///
/// Labels cells by their step distance to the target, expanding outward from
/// the target until the start is labeled, then descends the labels from the
/// start. Every cell is labeled at most once, so a search never does more
/// than one pass over the grid. Ties between equally short routes are broken
/// by the North, East, South, West neighbor order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pathfinder {
    max_radius: Option<u32>,
}

impl Pathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops labeling cells farther than `radius` steps from the target.
    pub fn with_max_radius(mut self, radius: u32) -> Self {
        self.max_radius = Some(radius);
        self
    }

    pub fn max_radius(&self) -> Option<u32> {
        self.max_radius
    }

    /// Finds the shortest route from `start` to `target`.
    ///
    /// The start is always explorable and an occupied target is a valid
    /// destination; any other non-free cell blocks the way. Returns `Ok(None)`
    /// when the target cannot be reached within the radius.
    #[tracing::instrument(
        level = "trace",
        skip(self, map, start, target),
        fields(start_x = start.x, start_y = start.y, target_x = target.x, target_y = target.y)
    )]
    pub fn find(
        &self,
        map: &Map,
        start: Position,
        target: Position,
    ) -> Result<Option<Route>, SearchError> {
        check_bounds(map, Endpoint::Start, start)?;
        check_bounds(map, Endpoint::Target, target)?;

        if start == target {
            return Ok(Some(Route(vec![start])));
        }

        if map.cell(target) == Some(CellKind::Blocked) {
            tracing::trace!("Target is an obstacle");
            return Ok(None);
        }

        let Some(field) = self.label(map, start, target) else {
            return Ok(None);
        };

        let route = descend(&field, map, start, target);
        if route.is_none() {
            tracing::warn!("Distance labels did not lead back to the target");
        }
        Ok(route)
    }

    fn label(&self, map: &Map, start: Position, target: Position) -> Option<DistanceField> {
        let mut field = DistanceField::new(map);
        let mut frontier = VecDeque::new();

        field.set(map, target, 0);
        frontier.push_back((target, 0u32));

        let mut expansions = 0usize;

        while let Some((current, distance)) = frontier.pop_front() {
            let next = distance + 1;
            // The frontier is ordered by distance, so nothing left can be in range either
            if self.max_radius.is_some_and(|radius| next > radius) {
                tracing::trace!(expansions, distance, "Search radius exhausted");
                return None;
            }

            expansions += 1;

            for neighbor in current.neighbors() {
                if !map.in_bounds(neighbor) {
                    continue;
                }

                if neighbor != start && !map.is_passable(neighbor) {
                    continue;
                }

                if field.get(map, neighbor).is_some() {
                    continue;
                }

                field.set(map, neighbor, next);

                if neighbor == start {
                    tracing::trace!(expansions, distance = next, "Start labeled");
                    return Some(field);
                }

                frontier.push_back((neighbor, next));
            }
        }

        tracing::trace!(expansions, "Frontier exhausted, no route");
        None
    }
}

fn check_bounds(map: &Map, endpoint: Endpoint, position: Position) -> Result<(), SearchError> {
    if map.in_bounds(position) {
        Ok(())
    } else {
        Err(SearchError::InvalidInput {
            endpoint,
            position,
            width: map.width(),
            height: map.height(),
        })
    }
}

fn descend(field: &DistanceField, map: &Map, start: Position, target: Position) -> Option<Route> {
    let mut label = field.get(map, start)?;
    let mut current = start;
    let mut positions = Vec::with_capacity(label as usize + 1);
    positions.push(start);

    while current != target {
        let wanted = label.checked_sub(1)?;
        let next = current
            .neighbors()
            .into_iter()
            .find(|neighbor| field.get(map, *neighbor) == Some(wanted))?;

        positions.push(next);
        current = next;
        label = wanted;
    }

    Some(Route(positions))
}
