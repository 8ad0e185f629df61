use std::fmt;

use serde::{
    de::{IgnoredAny, MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use thiserror::Error;

/// Participant identifier as stored by the server. Never re-derived from
/// display text.
pub type ParticipantEmail = String;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityName(pub String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActivityNameError {
    #[error("activity name must not be empty")]
    Empty,
}

impl ActivityName {
    /// Builds a name from user input. Names decoded from the server bypass
    /// this check and are kept verbatim.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ActivityNameError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ActivityNameError::Empty);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActivityName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub schedule: String,
    pub max_participants: i64,
    #[serde(default, deserialize_with = "participants_or_empty")]
    pub participants: Vec<ParticipantEmail>,
}

impl Activity {
    /// Capacity minus current participants. Not clamped: an over-full
    /// activity reports a negative count.
    pub fn spots_left(&self) -> i64 {
        let taken = i64::try_from(self.participants.len()).unwrap_or(i64::MAX);
        self.max_participants.saturating_sub(taken)
    }
}

fn participants_or_empty<'de, D>(deserializer: D) -> Result<Vec<ParticipantEmail>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Participants {
        List(Vec<ParticipantEmail>),
        Other(IgnoredAny),
    }

    Ok(match Participants::deserialize(deserializer)? {
        Participants::List(list) => list,
        Participants::Other(_) => Vec::new(),
    })
}

/// Two-letter badge derived from the local part of an email address.
pub fn participant_initials(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    local
        .chars()
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Full roster as reported by one `GET /activities`. Iteration follows the
/// order of the JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterSnapshot {
    entries: Vec<(ActivityName, Activity)>,
}

impl RosterSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an activity. A replaced entry keeps its original
    /// position.
    pub fn insert(&mut self, name: ActivityName, activity: Activity) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = activity,
            None => self.entries.push((name, activity)),
        }
    }

    pub fn get(&self, name: &ActivityName) -> Option<&Activity> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, activity)| activity)
    }

    pub fn get_mut(&mut self, name: &ActivityName) -> Option<&mut Activity> {
        self.entries
            .iter_mut()
            .find(|(existing, _)| existing == name)
            .map(|(_, activity)| activity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ActivityName, &Activity)> {
        self.entries.iter().map(|(name, activity)| (name, activity))
    }

    pub fn names(&self) -> impl Iterator<Item = &ActivityName> {
        self.entries.iter().map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ActivityName, Activity)> for RosterSnapshot {
    fn from_iter<T: IntoIterator<Item = (ActivityName, Activity)>>(iter: T) -> Self {
        let mut snapshot = Self::new();
        for (name, activity) in iter {
            snapshot.insert(name, activity);
        }
        snapshot
    }
}

impl Serialize for RosterSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, activity) in &self.entries {
            map.serialize_entry(name, activity)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RosterSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SnapshotVisitor;

        impl<'de> Visitor<'de> for SnapshotVisitor {
            type Value = RosterSnapshot;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of activity names to activities")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut snapshot = RosterSnapshot::new();
                while let Some((name, activity)) =
                    access.next_entry::<ActivityName, Activity>()?
                {
                    snapshot.insert(name, activity);
                }
                Ok(snapshot)
            }
        }

        deserializer.deserialize_map(SnapshotVisitor)
    }
}
