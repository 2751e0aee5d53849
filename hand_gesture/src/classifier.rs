//! Rule-based gesture classification.
//!
//! Every rule compares fingertip and PIP-joint heights; there is no state
//! and no smoothing, one frame in, one [`Gesture`] out.

use crate::keypoints::{landmark, Finger, Keypoint, KeypointSet};

// ════════════════════════════════════════════════════════════════════════════
// Gesture
// ════════════════════════════════════════════════════════════════════════════

/// Drawing command derived from one frame's hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Only the index finger extended.
    Draw,
    /// Fist: index, middle, ring and pinky all curled.
    Erase,
    /// Only the middle finger extended.
    Clear,
    /// A hand is visible but matches no rule.
    Unknown,
    /// No hand, or detector output that was not a complete hand.
    NoHand,
}

impl Gesture {
    /// Text shown on the camera overlay.
    pub fn label(self) -> &'static str {
        match self {
            Gesture::Draw    => "Drawing Mode",
            Gesture::Erase   => "Eraser Mode",
            Gesture::Clear   => "Clear Screen!",
            Gesture::Unknown => "Unknown Gesture",
            Gesture::NoHand  => "No hand detected",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// classify
// ════════════════════════════════════════════════════════════════════════════

/// Classify a well-formed hand.  Never returns [`Gesture::NoHand`].
///
/// Rules run in order Clear, Draw, Erase; the first match wins.
pub fn classify(hand: &KeypointSet) -> Gesture {
    if is_only_extended(hand, Finger::Middle) {
        Gesture::Clear
    } else if is_only_extended(hand, Finger::Index) {
        Gesture::Draw
    } else if is_fist(hand) {
        Gesture::Erase
    } else {
        Gesture::Unknown
    }
}

/// Classify raw detector output for one hand.
///
/// `None` and anything that is not exactly 21 points are [`Gesture::NoHand`].
pub fn classify_hand(points: Option<&[Keypoint]>) -> Gesture {
    match points.and_then(KeypointSet::from_slice) {
        Some(hand) => classify(&hand),
        None       => Gesture::NoHand,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Predicates
// ════════════════════════════════════════════════════════════════════════════

/// `finger` extended and the other three of index/middle/ring/pinky curled.
/// The thumb is ignored.
pub fn is_only_extended(hand: &KeypointSet, finger: Finger) -> bool {
    hand.is_extended(finger)
        && Finger::ALL
            .iter()
            .filter(|&&f| f != finger)
            .all(|&f| hand.is_curled(f))
}

/// All four fingers curled, thumb ignored.
pub fn is_fist(hand: &KeypointSet) -> bool {
    Finger::ALL.iter().all(|&f| hand.is_curled(f))
}

/// Thumb tip above the thumb IP joint with all four fingers curled.
///
/// Not part of [`classify`]: any hand matching this is already a fist and
/// resolves to [`Gesture::Erase`].
pub fn is_thumbs_up(hand: &KeypointSet) -> bool {
    hand.get(landmark::THUMB_TIP).y < hand.get(landmark::THUMB_IP).y && is_fist(hand)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
