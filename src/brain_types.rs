//! Brain-type classification - 32 tiers keyed by total score

use serde::Serialize;

/// Number of tiers
pub const TIER_COUNT: usize = 32;

/// Score at which brain weight stops growing
const WEIGHT_MAX_SCORE: u32 = 5_000;
/// Brain weight range in grams
const WEIGHT_MIN_GRAMS: u32 = 10;
const WEIGHT_MAX_GRAMS: u32 = 2_000;

/// One brain-type tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrainTypeTier {
    /// Minimum total score for this tier
    pub min_score: u32,
    pub name: &'static str,
    pub description: &'static str,
    /// Icon reference for the presentation layer
    pub icon: &'static str,
}

const fn tier(
    min_score: u32,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
) -> BrainTypeTier {
    BrainTypeTier {
        min_score,
        name,
        description,
        icon,
    }
}

/// Tier table, strictly increasing thresholds
pub static TIERS: [BrainTypeTier; TIER_COUNT] = [
    tier(0, "AMOEBA", "I'm sure there's something good to say about AMOEBAS...", "🦠"),
    tier(100, "EARTHWORM", "Good for garden soil, not big thinkers", "🪱"),
    tier(300, "SNAIL", "Kind of cute, tiny brains", "🐌"),
    tier(500, "RAT", "Clever animals", "🐀"),
    tier(700, "CAT", "Nine lives, so-so brains", "🐱"),
    tier(900, "DOG", "Who wouldn't want to be a dog!", "🐕"),
    tier(1000, "GOAT", "Mountain skippers", "🐐"),
    tier(1100, "CHIMP", "Understands basic symbols", "🐵"),
    tier(1200, "GORILLA", "Largest primates, highly intelligent", "🦍"),
    tier(1300, "MISSING LINK", "Early man, relatively evolved", "🧔"),
    tier(1400, "NEANDERTHAL", "Geniuses of their time, controlled fire", "🗿"),
    tier(1500, "AVERAGE JOE", "Not amazing, not shabby", "🙂"),
    tier(1600, "GEEK", "Shows promise!", "🤓"),
    tier(1700, "NERD", "Will rule the universe!", "🧐"),
    tier(1800, "SCHOLAR", "Congratulations on a job well done!", "🎓"),
    tier(1900, "SCIENTIST", "Something to be proud of", "👨‍🔬"),
    tier(2000, "GENIUS", "Biggest brain in humans today", "🧠"),
    tier(2100, "SPACE ACE", "Ahead of your time", "🚀"),
    tier(2300, "CYBORG", "Man-machine combination", "🤖"),
    tier(2500, "ALIEN", "Welcome to Earth, visitor!", "👽"),
    tier(2700, "SQUIDLIAN", "Mighty brain master", "🦑"),
    tier(2900, "BITBOT", "You're a machine!", "💾"),
    tier(3100, "SPACEBOT", "RX-711 SPACEBOT", "🛸"),
    tier(3300, "CALCUBOT", "I always knew it!", "🔢"),
    tier(3500, "ENCEPHALOBOT", "Ask for autographs later", "🧬"),
    tier(3700, "BRAINBOT", "All that computing power!", "🤯"),
    tier(3900, "NEUROBOT", "One of the few in the universe", "⚡"),
    tier(4100, "COMPUTRON", "Computational elite", "💻"),
    tier(4300, "XENOS", "Level few achieve", "✨"),
    tier(4500, "NEURONIAN", "Monstrous brain", "🌟"),
    tier(4700, "AEONIAN", "Awe-inspiring brain capacity", "♾️"),
    tier(4900, "GALAXIAN", "Brain Master of the Universe", "🌌"),
];

/// Greatest tier index whose threshold is <= `score`
pub fn tier_index(score: u32) -> usize {
    // TIERS[0].min_score is 0, so the partition point is always >= 1
    TIERS
        .partition_point(|t| t.min_score <= score)
        .saturating_sub(1)
}

/// Tier for a total score
pub fn classify(score: u32) -> &'static BrainTypeTier {
    &TIERS[tier_index(score)]
}

/// Tier plus its score range, for the summary screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierInfo {
    pub index: usize,
    pub tier: &'static BrainTypeTier,
    pub min_score: u32,
    /// Exclusive upper bound; `None` for the top tier
    pub max_score: Option<u32>,
}

impl TierInfo {
    pub fn for_score(score: u32) -> Self {
        let index = tier_index(score);
        Self {
            index,
            tier: &TIERS[index],
            min_score: TIERS[index].min_score,
            max_score: TIERS.get(index + 1).map(|t| t.min_score),
        }
    }

    /// True when `score` lies in `[min_score, max_score)`
    pub fn contains(&self, score: u32) -> bool {
        score >= self.min_score && self.max_score.is_none_or(|max| score < max)
    }
}

/// Display brain weight in grams (10 g to 2000 g, linear up to 5000 points)
pub fn brain_weight(score: u32) -> u32 {
    let clamped = score.min(WEIGHT_MAX_SCORE) as f64;
    let span = (WEIGHT_MAX_GRAMS - WEIGHT_MIN_GRAMS) as f64;
    (WEIGHT_MIN_GRAMS as f64 + span * clamped / WEIGHT_MAX_SCORE as f64).round() as u32
}

/// Progress toward the next tier, 0-100 (100 at the top tier)
pub fn progress_to_next(score: u32) -> f32 {
    let info = TierInfo::for_score(score);
    match info.max_score {
        None => 100.0,
        Some(next) => {
            let span = (next - info.min_score) as f32;
            ((score - info.min_score) as f32 / span * 100.0).clamp(0.0, 100.0)
        }
    }
}
