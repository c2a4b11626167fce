// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Honeycomb Learning Simulation Suite ("The Hive") - Type Definitions

use serde::{Serialize, Deserialize};

// ─── Ordinal levels ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Level3 {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl Default for Level3 {
    fn default() -> Self { Level3::Medium }
}

// ─── Media Type ──────────────────────────────────────────────────────────────

/// Presentation format of a unit. `Mixed` is valid only as a unit's
/// recommended media; reaction scores are tracked for the four concrete kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MediaType {
    Image = 0,
    Text = 1,
    Numeric = 2,
    Video = 3,
    Mixed = 4,
}

impl Default for MediaType {
    fn default() -> Self { MediaType::Mixed }
}

// ─── Unit Type ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UnitType {
    Concept = 0,
    Practice = 1,
    Exploration = 2,
    Support = 3,
}

impl UnitType {
    /// Stay-duration multiplier: concept units hold learners longest,
    /// support units shortest.
    pub fn time_multiplier(&self) -> f64 {
        match self {
            Self::Concept => 1.2,
            Self::Practice => 1.0,
            Self::Exploration => 0.8,
            Self::Support => 0.7,
        }
    }
}

// ─── Reward Type ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RewardType {
    Praise = 0,
    Unlock = 1,
    VisualEffect = 2,
}

impl Default for RewardType {
    fn default() -> Self { RewardType::Praise }
}

// ─── TraitVector ─────────────────────────────────────────────────────────────

/// Four-component personality distribution. Invariant: the components always
/// sum to exactly 100. Mutations go through saturating arithmetic followed by
/// `normalize`, which restores the invariant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraitVector {
    pub explorer: u32,
    pub achiever: u32,
    pub competitor: u32,
    pub creator: u32,
}

impl Default for TraitVector {
    fn default() -> Self {
        Self { explorer: 25, achiever: 25, competitor: 25, creator: 25 }
    }
}

impl TraitVector {
    pub fn sum(&self) -> u32 {
        self.explorer + self.achiever + self.competitor + self.creator
    }

    /// Rescale the four components proportionally so they sum to exactly 100.
    /// Truncation shortfall is assigned to the first component (explorer).
    /// An all-zero vector resets to the uniform 25/25/25/25.
    pub fn normalize(&mut self) {
        let total = self.sum();
        if total == 0 {
            *self = Self::default();
            return;
        }
        let factor = 100.0 / total as f64;
        self.explorer = (self.explorer as f64 * factor) as u32;
        self.achiever = (self.achiever as f64 * factor) as u32;
        self.competitor = (self.competitor as f64 * factor) as u32;
        self.creator = (self.creator as f64 * factor) as u32;
        self.explorer += 100 - self.sum();
    }
}

// ─── LearnerProfile ──────────────────────────────────────────────────────────

/// Mutable state vector of one simulated learner. Identity fields are fixed
/// at creation; everything else drifts as outcomes are folded back in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerProfile {
    pub learner_id: String,
    pub name: String,

    pub traits: TraitVector,

    pub challenge_preference: Level3,
    pub failure_tolerance: Level3,

    // Media preferences, each in [0, 1]
    pub media_image: f64,
    pub media_text: f64,
    pub media_numeric: f64,
    pub media_video: f64,

    // Engagement thresholds
    pub avg_focus_secs: u32,
    pub boredom_threshold_secs: u32,
    pub dropout_fail_threshold: u32,

    // Behavioral probabilities (percent)
    pub retry_probability: u32,
    pub exploration_probability: u32,
    pub rest_tolerance: Level3,

    pub state_version: u32,
    pub completed_cells: Vec<u32>,
}

impl LearnerProfile {
    pub fn media_preference(&self, media: MediaType) -> f64 {
        match media {
            MediaType::Image => self.media_image,
            MediaType::Text => self.media_text,
            MediaType::Numeric => self.media_numeric,
            MediaType::Video => self.media_video,
            MediaType::Mixed => 0.5,
        }
    }

    pub fn has_completed(&self, cell_id: u32) -> bool {
        self.completed_cells.contains(&cell_id)
    }
}

// ─── HexUnit ─────────────────────────────────────────────────────────────────

/// One learning unit pinned to a honeycomb cell. Static attributes are set at
/// catalog build; only `is_locked`, `is_completed` and `score` mutate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HexUnit {
    pub cell_id: u32,
    pub subject: char,
    pub subject_name: String,
    pub ring: u32,
    pub difficulty: u32,
    pub unit_type: UnitType,

    pub prereq_required: Vec<u32>,
    pub prereq_recommended: Vec<u32>,
    #[serde(default)]
    pub prereq_optional: Vec<u32>,
    pub adjacent_cells: Vec<u32>,

    pub recommended_media: MediaType,
    pub estimated_time_secs: u32,
    pub fail_allow: u32,
    pub reward_type: RewardType,

    // Dynamic state
    pub is_locked: bool,
    pub is_completed: bool,
    #[serde(default)]
    pub score: f64,
}

// ─── MediaReaction ───────────────────────────────────────────────────────────

/// Per-media reaction scores of a single outcome, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MediaReaction {
    pub image: f64,
    pub text: f64,
    pub numeric: f64,
    pub video: f64,
}

impl MediaReaction {
    /// Reaction score for a concrete media kind. `Mixed` has no reaction slot.
    pub fn get(&self, media: MediaType) -> Option<f64> {
        match media {
            MediaType::Image => Some(self.image),
            MediaType::Text => Some(self.text),
            MediaType::Numeric => Some(self.numeric),
            MediaType::Video => Some(self.video),
            MediaType::Mixed => None,
        }
    }

    /// Media kind with the highest reaction. Ties resolve in declaration
    /// order (image, text, numeric, video).
    pub fn best(&self) -> MediaType {
        let mut best = MediaType::Image;
        let mut best_score = self.image;
        for (media, score) in [
            (MediaType::Text, self.text),
            (MediaType::Numeric, self.numeric),
            (MediaType::Video, self.video),
        ] {
            if score > best_score {
                best = media;
                best_score = score;
            }
        }
        best
    }
}

// ─── OutcomeRecord ───────────────────────────────────────────────────────────

/// Learning log produced by one simulation step. Immutable after creation.
/// `step` is the driver-assigned logical timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub log_id: String,
    pub cell_id: u32,
    pub learner_id: String,
    pub step: u64,

    // The six generated fields
    pub stay_secs: u32,
    pub fail_count: u32,
    pub retried: bool,
    pub dropped_out: bool,
    pub reward_response: RewardType,
    pub media_reaction: MediaReaction,

    pub achievement: f64,
}

// ─── MatchScore ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlockReason {
    None = 0,
    AlreadyCompleted = 1,
    Locked = 2,
    MissingRequiredPrereq = 3,
}

impl Default for BlockReason {
    fn default() -> Self { BlockReason::None }
}

/// Per-candidate compatibility record: five sub-scores in [0, 1] and their
/// weighted total. Blocked candidates carry a reason and zeroed scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchScore {
    pub cell_id: u32,
    pub total: f64,

    pub difficulty_fit: f64,
    pub type_fit: f64,
    pub media_fit: f64,
    pub prereq_fit: f64,
    pub trait_alignment: f64,

    pub is_available: bool,
    pub block_reason: BlockReason,
}

impl MatchScore {
    pub fn unavailable(cell_id: u32, reason: BlockReason) -> Self {
        Self {
            cell_id,
            total: 0.0,
            difficulty_fit: 0.0,
            type_fit: 0.0,
            media_fit: 0.0,
            prereq_fit: 0.0,
            trait_alignment: 0.0,
            is_available: false,
            block_reason: reason,
        }
    }
}

// ─── StepResult ──────────────────────────────────────────────────────────────

/// Snapshot returned by one driver step. `cell_id` is `None` when no unit was
/// available (skipped step: profile and catalog untouched).
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    pub step: u64,
    pub cell_id: Option<u32>,
    pub outcome: Option<OutcomeRecord>,
    pub match_score: Option<MatchScore>,
    pub state_version: u32,
    pub completed_count: u32,
    pub available_count: u32,
}

// ─── SessionStats ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub steps: u64,
    pub skipped: u64,
    pub completions: u32,
    pub dropouts: u32,
    pub retries: u32,
    pub avg_stay_secs: f64,
    pub avg_fail_count: f64,
    pub avg_achievement: f64,
}

// ─── Export helpers ──────────────────────────────────────────────────────────

/// Round to two decimals for the export/UI collaborators. Engine-internal
/// math stays full precision.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// ─── Tests ───────────────────────────────────────────────────────────────────
