//! # hand_gesture
//!
//! The hand model behind the air-drawing app: a fixed 21-point keypoint set
//! in normalized image coordinates and the rule-based classifier that turns
//! one set into a drawing command.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Hand shape | Action |
//! |---|---|---|
//! | [`Gesture::Clear`] | Only middle finger extended | Wipe the canvas |
//! | [`Gesture::Draw`]  | Only index finger extended  | Paint a stroke at the index tip |
//! | [`Gesture::Erase`] | Fist (all four fingers curled) | Erase at the index tip |
//! | [`Gesture::Unknown`] | Anything else | Lift the pen |
//! | [`Gesture::NoHand`]  | No (valid) hand in frame | Lift the pen |
//!
//! Rules are evaluated in that order and the first match wins.
//!
//! ## Coordinates
//!
//! Keypoints use the image convention: origin top-left, `x` right, `y` down,
//! both normalized to `[0, 1]` (values slightly outside are legal for hands
//! partly out of frame).  A finger is *extended* when its tip is strictly
//! above (smaller `y`) its PIP joint and *curled* when strictly below.
//!
//! ```rust
//! use hand_gesture::{classify, synthesize, Gesture, HandPose, Keypoint};
//!
//! let hand = synthesize(HandPose::Pointing, Keypoint::new(0.5, 0.4));
//! assert_eq!(classify(&hand), Gesture::Draw);
//! ```

pub mod keypoints;
pub mod classifier;
pub mod pose;

pub use keypoints::{landmark, Finger, Keypoint, KeypointSet, HAND_CONNECTIONS, KEYPOINT_COUNT};
pub use classifier::{classify, classify_hand, is_fist, is_only_extended, is_thumbs_up, Gesture};
pub use pose::{synthesize, HandPose};
