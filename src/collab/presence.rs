//! Collaborator presence: who is in the document and where their cursors are

use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};

use crate::{Point, Rect};

/// Collaborator colours (RGBA), handed out round-robin
const COLLABORATOR_COLORS: [u32; 6] = [
    0x4285F4FF, // Blue
    0xEA4335FF, // Red
    0x34A853FF, // Green
    0xFBBC05FF, // Amber
    0xAA96DAFF, // Purple
    0x2EC4B6FF, // Cyan
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `#RRGGBB` form of an RGBA colour
pub fn color_hex(color: u32) -> String {
    format!("#{:06X}", color >> 8)
}

fn serialize_color<S: Serializer>(color: &u32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&color_hex(*color))
}

/// A collaborator in the session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
    pub id: UserId,
    pub name: String,
    #[serde(serialize_with = "serialize_color")]
    pub color: u32,
    pub cursor: Option<Point>,
    pub active: bool,
    /// When the cursor last moved
    #[serde(skip)]
    pub updated_at_ms: u64,
}

/// Changes reported by a presence source
#[derive(Debug, Clone, PartialEq)]
pub enum PresenceEvent {
    Joined { id: UserId, name: String },
    CursorMoved { id: UserId, position: Point },
    ActivityChanged { id: UserId, active: bool },
    Left { id: UserId },
}

/// Where presence events come from. `bounds` is the area of the page the
/// local user is looking at.
pub trait PresenceSource {
    fn poll(&mut self, now_ms: u64, bounds: Rect) -> Vec<PresenceEvent>;
}

/// Tracks every collaborator in the session
#[derive(Debug, Default, Clone)]
pub struct PresenceTracker {
    collaborators: FxHashMap<UserId, Collaborator>,
    next_color_index: usize,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: PresenceEvent, now_ms: u64) {
        match event {
            PresenceEvent::Joined { id, name } => {
                if self.collaborators.contains_key(&id) {
                    return;
                }
                let color = self.assign_color();
                log::debug!("{} joined", name);
                self.collaborators.insert(
                    id,
                    Collaborator {
                        id,
                        name,
                        color,
                        cursor: None,
                        active: true,
                        updated_at_ms: now_ms,
                    },
                );
            }
            PresenceEvent::CursorMoved { id, position } => {
                if let Some(collab) = self.collaborators.get_mut(&id) {
                    collab.cursor = Some(position);
                    collab.updated_at_ms = now_ms;
                }
            }
            PresenceEvent::ActivityChanged { id, active } => {
                if let Some(collab) = self.collaborators.get_mut(&id) {
                    collab.active = active;
                }
            }
            PresenceEvent::Left { id } => {
                if let Some(collab) = self.collaborators.remove(&id) {
                    log::debug!("{} left", collab.name);
                }
            }
        }
    }

    /// Collaborators ordered by id
    pub fn collaborators(&self) -> Vec<&Collaborator> {
        let mut list: Vec<_> = self.collaborators.values().collect();
        list.sort_by_key(|c| c.id);
        list
    }

    /// Collaborators with a visible cursor
    pub fn cursors(&self) -> impl Iterator<Item = (&Collaborator, Point)> {
        self.collaborators
            .values()
            .filter_map(|c| c.cursor.map(|cursor| (c, cursor)))
    }

    pub fn get(&self, id: UserId) -> Option<&Collaborator> {
        self.collaborators.get(&id)
    }

    pub fn len(&self) -> usize {
        self.collaborators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collaborators.is_empty()
    }

    fn assign_color(&mut self) -> u32 {
        let color = COLLABORATOR_COLORS[self.next_color_index % COLLABORATOR_COLORS.len()];
        self.next_color_index += 1;
        color
    }

    /// Hide cursors that have not moved for longer than `max_age_ms`
    pub fn prune_stale(&mut self, now_ms: u64, max_age_ms: u64) {
        for collab in self.collaborators.values_mut() {
            if collab.cursor.is_some() && now_ms.saturating_sub(collab.updated_at_ms) > max_age_ms {
                collab.cursor = None;
            }
        }
    }
}

/// Stand-in for a presence service: two fixed users wandering over the page
#[derive(Debug, Clone)]
pub struct SimulatedPresence {
    rng: SmallRng,
    users: Vec<(UserId, &'static str)>,
    cursor_interval_ms: u64,
    activity_interval_ms: u64,
    announced: bool,
    last_cursor_ms: u64,
    last_activity_ms: u64,
}

impl SimulatedPresence {
    pub fn new(seed: u64, cursor_interval_ms: u64, activity_interval_ms: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            users: vec![(UserId(1), "John Doe"), (UserId(2), "Jane Smith")],
            cursor_interval_ms,
            activity_interval_ms,
            announced: false,
            last_cursor_ms: 0,
            last_activity_ms: 0,
        }
    }

    fn random_point(&mut self, bounds: Rect) -> Point {
        Point {
            x: bounds.x + self.rng.gen_range(0.0..=bounds.width.max(0.0)),
            y: bounds.y + self.rng.gen_range(0.0..=bounds.height.max(0.0)),
        }
    }
}

impl PresenceSource for SimulatedPresence {
    fn poll(&mut self, now_ms: u64, bounds: Rect) -> Vec<PresenceEvent> {
        let mut events = Vec::new();

        if !self.announced {
            self.announced = true;
            self.last_cursor_ms = now_ms;
            self.last_activity_ms = now_ms;
            for &(id, name) in &self.users {
                events.push(PresenceEvent::Joined {
                    id,
                    name: name.to_string(),
                });
            }
            return events;
        }

        if now_ms.saturating_sub(self.last_cursor_ms) >= self.cursor_interval_ms {
            self.last_cursor_ms = now_ms;
            for i in 0..self.users.len() {
                let id = self.users[i].0;
                let position = self.random_point(bounds);
                events.push(PresenceEvent::CursorMoved { id, position });
            }
        }

        if now_ms.saturating_sub(self.last_activity_ms) >= self.activity_interval_ms {
            self.last_activity_ms = now_ms;
            for i in 0..self.users.len() {
                let id = self.users[i].0;
                let active = self.rng.gen_bool(0.7);
                events.push(PresenceEvent::ActivityChanged { id, active });
            }
        }

        events
    }
}
