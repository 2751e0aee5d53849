//! The 21-point hand keypoint model.
//!
//! Indices follow the common hand-landmark convention (wrist = 0, then four
//! points per digit from the palm outwards, thumb first).

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices
// ════════════════════════════════════════════════════════════════════════════

/// Number of keypoints in a well-formed hand.
pub const KEYPOINT_COUNT: usize = 21;

/// Anatomical keypoint indices.
#[allow(dead_code)]
pub mod landmark {
    pub const WRIST:      usize = 0;
    pub const THUMB_CMC:  usize = 1;
    pub const THUMB_MCP:  usize = 2;
    pub const THUMB_IP:   usize = 3;
    pub const THUMB_TIP:  usize = 4;
    pub const INDEX_MCP:  usize = 5;
    pub const INDEX_PIP:  usize = 6;
    pub const INDEX_DIP:  usize = 7;
    pub const INDEX_TIP:  usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP:   usize = 13;
    pub const RING_PIP:   usize = 14;
    pub const RING_DIP:   usize = 15;
    pub const RING_TIP:   usize = 16;
    pub const PINKY_MCP:  usize = 17;
    pub const PINKY_PIP:  usize = 18;
    pub const PINKY_DIP:  usize = 19;
    pub const PINKY_TIP:  usize = 20;
}

/// Bone segments of the hand skeleton, as pairs of keypoint indices.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1),  (1, 2),   (2, 3),   (3, 4),
    (0, 5),  (5, 6),   (6, 7),   (7, 8),
    (5, 9),  (9, 10),  (10, 11), (11, 12),
    (9, 13), (13, 14), (14, 15), (15, 16),
    (13, 17), (0, 17), (17, 18), (18, 19), (19, 20),
];

// ════════════════════════════════════════════════════════════════════════════
// Keypoint
// ════════════════════════════════════════════════════════════════════════════

/// One tracked point in normalized image coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32) -> Self {
        Keypoint { x, y }
    }

    /// Scale to a `width × height` raster, clamped into
    /// `[0, width) × [0, height)`.
    ///
    /// Fractions are truncated toward zero, so `x = 1.0` lands on the last
    /// column rather than one past it.
    pub fn to_pixel(self, width: u32, height: u32) -> (u32, u32) {
        (scale_axis(self.x, width), scale_axis(self.y, height))
    }
}

fn scale_axis(v: f32, extent: u32) -> u32 {
    if extent == 0 {
        return 0;
    }
    // `as` saturates and maps NaN to 0.
    let px = (v * extent as f32) as i64;
    px.clamp(0, extent as i64 - 1) as u32
}

// ════════════════════════════════════════════════════════════════════════════
// Finger
// ════════════════════════════════════════════════════════════════════════════

/// The four non-thumb digits, which carry the extended/curled rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    pub fn tip(self) -> usize {
        match self {
            Finger::Index  => landmark::INDEX_TIP,
            Finger::Middle => landmark::MIDDLE_TIP,
            Finger::Ring   => landmark::RING_TIP,
            Finger::Pinky  => landmark::PINKY_TIP,
        }
    }

    pub fn pip(self) -> usize {
        match self {
            Finger::Index  => landmark::INDEX_PIP,
            Finger::Middle => landmark::MIDDLE_PIP,
            Finger::Ring   => landmark::RING_PIP,
            Finger::Pinky  => landmark::PINKY_PIP,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// KeypointSet
// ════════════════════════════════════════════════════════════════════════════

/// A complete, well-formed hand: exactly [`KEYPOINT_COUNT`] keypoints.
///
/// The only way to build one from detector output is
/// [`KeypointSet::from_slice`], which rejects short or long input, so the
/// classifier never sees a partial hand.
#[derive(Clone, Debug, PartialEq)]
pub struct KeypointSet {
    points: [Keypoint; KEYPOINT_COUNT],
}

impl KeypointSet {
    pub fn new(points: [Keypoint; KEYPOINT_COUNT]) -> Self {
        KeypointSet { points }
    }

    /// `None` unless `points` has exactly 21 entries.
    pub fn from_slice(points: &[Keypoint]) -> Option<Self> {
        let points: [Keypoint; KEYPOINT_COUNT] = points.try_into().ok()?;
        Some(KeypointSet { points })
    }

    pub fn get(&self, index: usize) -> Keypoint {
        self.points[index]
    }

    pub fn points(&self) -> &[Keypoint; KEYPOINT_COUNT] {
        &self.points
    }

    pub fn index_tip(&self) -> Keypoint {
        self.points[landmark::INDEX_TIP]
    }

    pub fn middle_tip(&self) -> Keypoint {
        self.points[landmark::MIDDLE_TIP]
    }

    /// Tip strictly above its PIP joint.
    pub fn is_extended(&self, finger: Finger) -> bool {
        self.points[finger.tip()].y < self.points[finger.pip()].y
    }

    /// Tip strictly below its PIP joint.
    pub fn is_curled(&self, finger: Finger) -> bool {
        self.points[finger.tip()].y > self.points[finger.pip()].y
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
