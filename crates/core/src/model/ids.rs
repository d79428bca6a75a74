use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Identifier of a themed curriculum.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackId {
    SystemDesign,
    GameDev,
    Cybersecurity,
    CaseStudies,
}

impl TrackId {
    /// Every track, in the order they are offered on the home screen.
    pub const ALL: [TrackId; 4] = [
        TrackId::SystemDesign,
        TrackId::GameDev,
        TrackId::Cybersecurity,
        TrackId::CaseStudies,
    ];

    /// Returns the URL slug (and persisted form) of the track.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TrackId::SystemDesign => "system-design",
            TrackId::GameDev => "game-dev",
            TrackId::Cybersecurity => "cybersecurity",
            TrackId::CaseStudies => "case-studies",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TrackId::SystemDesign => "System Design",
            TrackId::GameDev => "Game Engineering",
            TrackId::Cybersecurity => "Cybersecurity",
            TrackId::CaseStudies => "Case Studies",
        }
    }
}

/// Identifier of a single lesson.
///
/// Wire form is the upper-snake string used by persisted progress and the
/// comment service (e.g. `LEVEL_CLIENT_SERVER`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LevelId {
    BackendLanguages,
    HldLld,
    ClientServer,
    LoadBalancer,
    ApiGateway,
    Caching,
    DbSharding,
    DbInternals,
    ConsistentHashing,
    DbMigrations,
    Docker,
    MessageQueues,
    DevopsLoop,
    FullStackHowto,
    CaseUrlShortener,
    CaseInstagram,
    CaseUber,
    QuadtreeDeepDive,
    GameIntro,
    GameLoop,
    GameNetworking,
    GamePhysics,
    GameArch,
    OrderBook,
    CyberEncryption,
    CyberSqli,
    CyberAes,
    CyberRsa,
    CyberSha,
    CyberBcrypt,
}

const LEVEL_WIRE_IDS: [(LevelId, &str); 30] = [
    (LevelId::BackendLanguages, "LEVEL_BACKEND_LANGUAGES"),
    (LevelId::HldLld, "LEVEL_HLD_LLD"),
    (LevelId::ClientServer, "LEVEL_CLIENT_SERVER"),
    (LevelId::LoadBalancer, "LEVEL_LOAD_BALANCER"),
    (LevelId::ApiGateway, "LEVEL_API_GATEWAY"),
    (LevelId::Caching, "LEVEL_CACHING"),
    (LevelId::DbSharding, "LEVEL_DB_SHARDING"),
    (LevelId::DbInternals, "LEVEL_DB_INTERNALS"),
    (LevelId::ConsistentHashing, "LEVEL_CONSISTENT_HASHING"),
    (LevelId::DbMigrations, "LEVEL_DB_MIGRATIONS"),
    (LevelId::Docker, "LEVEL_DOCKER"),
    (LevelId::MessageQueues, "LEVEL_MESSAGE_QUEUES"),
    (LevelId::DevopsLoop, "LEVEL_DEVOPS_LOOP"),
    (LevelId::FullStackHowto, "LEVEL_FULL_STACK_HOWTO"),
    (LevelId::CaseUrlShortener, "CASE_URL_SHORTENER"),
    (LevelId::CaseInstagram, "CASE_INSTAGRAM"),
    (LevelId::CaseUber, "CASE_UBER"),
    (LevelId::QuadtreeDeepDive, "LEVEL_QUADTREE_DEEP_DIVE"),
    (LevelId::GameIntro, "LEVEL_GAME_INTRO"),
    (LevelId::GameLoop, "LEVEL_GAME_LOOP"),
    (LevelId::GameNetworking, "LEVEL_GAME_NETWORKING"),
    (LevelId::GamePhysics, "LEVEL_GAME_PHYSICS"),
    (LevelId::GameArch, "LEVEL_GAME_ARCH"),
    (LevelId::OrderBook, "LEVEL_ORDER_BOOK"),
    (LevelId::CyberEncryption, "LEVEL_CYBER_ENCRYPTION"),
    (LevelId::CyberSqli, "LEVEL_CYBER_SQLI"),
    (LevelId::CyberAes, "LEVEL_CYBER_AES"),
    (LevelId::CyberRsa, "LEVEL_CYBER_RSA"),
    (LevelId::CyberSha, "LEVEL_CYBER_SHA"),
    (LevelId::CyberBcrypt, "LEVEL_CYBER_BCRYPT"),
];

impl LevelId {
    /// Returns the wire identifier of the level.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        LEVEL_WIRE_IDS
            .iter()
            .find(|(id, _)| *id == self)
            .map_or("", |(_, wire)| wire)
    }

    /// Iterates every known level.
    pub fn all() -> impl Iterator<Item = LevelId> {
        LEVEL_WIRE_IDS.iter().map(|(id, _)| *id)
    }
}

// ─── Debug / Display Implementations ───────────────────────────────────────────

impl fmt::Debug for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrackId({})", self.as_str())
    }
}

impl fmt::Debug for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LevelId({})", self.as_str())
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing an identifier from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
    raw: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from {:?}", self.kind, self.raw)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for TrackId {
    type Err = ParseIdError;

    /// Exact slug match only. Alias handling lives in the track registry.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackId::ALL
            .into_iter()
            .find(|track| track.as_str() == s)
            .ok_or_else(|| ParseIdError {
                kind: "TrackId",
                raw: s.to_string(),
            })
    }
}

impl FromStr for LevelId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LEVEL_WIRE_IDS
            .iter()
            .find(|(_, wire)| *wire == s)
            .map(|(id, _)| *id)
            .ok_or_else(|| ParseIdError {
                kind: "LevelId",
                raw: s.to_string(),
            })
    }
}

// ─── Serde ─────────────────────────────────────────────────────────────────────

impl Serialize for LevelId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LevelId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
