//! Synthetic hands.
//!
//! Builds plausible 21-point hands for a handful of poses, anchored so that
//! the index fingertip lands exactly on a requested point.  Used by the
//! keyboard/mouse simulation and by tests.

use crate::keypoints::{landmark, Finger, Keypoint, KeypointSet, KEYPOINT_COUNT};

/// Normalized distance from a PIP joint to the tip of an extended finger.
const REACH: f32 = 0.08;
/// Normalized distance a curled tip sits below its PIP joint.
const CURL:  f32 = 0.03;
/// PIP → MCP knuckle distance.
const KNUCKLE: f32 = 0.05;
/// MCP → wrist distance.
const PALM: f32 = 0.14;
/// Horizontal spacing between adjacent fingers.
const SPREAD: f32 = 0.035;

/// Hand shapes the simulator can hold up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandPose {
    /// Only the index finger up.
    Pointing,
    /// Only the middle finger up.
    MiddleUp,
    /// All fingers curled, thumb tucked.
    Fist,
    /// All fingers curled, thumb up.
    ThumbsUp,
    /// All fingers up.
    OpenPalm,
}

impl HandPose {
    fn extended(self, finger: Finger) -> bool {
        match self {
            HandPose::Pointing => finger == Finger::Index,
            HandPose::MiddleUp => finger == Finger::Middle,
            HandPose::Fist | HandPose::ThumbsUp => false,
            HandPose::OpenPalm => true,
        }
    }

    fn thumb_up(self) -> bool {
        matches!(self, HandPose::ThumbsUp | HandPose::OpenPalm)
    }
}

/// Build a right hand (as seen in a mirrored frame) in `pose` whose index
/// fingertip is exactly `index_tip`.
pub fn synthesize(pose: HandPose, index_tip: Keypoint) -> KeypointSet {
    let mut pts = [Keypoint::default(); KEYPOINT_COUNT];

    // All PIP joints share a row; the index tip fixes where that row is.
    let pip_y = if pose.extended(Finger::Index) {
        index_tip.y + REACH
    } else {
        index_tip.y - CURL
    };
    let mcp_y   = pip_y + KNUCKLE;
    let wrist_y = mcp_y + PALM;

    for (slot, finger) in Finger::ALL.iter().enumerate() {
        let x   = index_tip.x + SPREAD * slot as f32;
        let pip = finger.pip();
        let tip_y = if pose.extended(*finger) { pip_y - REACH } else { pip_y + CURL };

        pts[pip - 1] = Keypoint::new(x, mcp_y);                  // MCP
        pts[pip]     = Keypoint::new(x, pip_y);                  // PIP
        pts[pip + 1] = Keypoint::new(x, (pip_y + tip_y) / 2.0);  // DIP
        pts[pip + 2] = Keypoint::new(x, tip_y);                  // TIP
    }
    // Exact anchor, no float drift from the loop above.
    pts[landmark::INDEX_TIP] = index_tip;

    let wrist_x = index_tip.x + SPREAD * 1.5;
    pts[landmark::WRIST] = Keypoint::new(wrist_x, wrist_y);

    let thumb_x = index_tip.x - SPREAD * 1.5;
    let ip_y    = mcp_y + KNUCKLE;
    pts[landmark::THUMB_CMC] = Keypoint::new(wrist_x - SPREAD * 2.0, wrist_y - PALM / 3.0);
    pts[landmark::THUMB_MCP] = Keypoint::new(thumb_x - SPREAD / 2.0, ip_y + KNUCKLE);
    pts[landmark::THUMB_IP]  = Keypoint::new(thumb_x, ip_y);
    pts[landmark::THUMB_TIP] = if pose.thumb_up() {
        Keypoint::new(thumb_x, ip_y - REACH)
    } else {
        Keypoint::new(thumb_x + SPREAD, ip_y + CURL)
    };

    KeypointSet::new(pts)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
