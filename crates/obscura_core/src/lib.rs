//! Obscura Core
//!
//! Foundational types shared by the animation engine and the page effects:
//!
//! - **Geometry**: points, sizes, rects and vectors in viewport pixels
//! - **Input Snapshot**: pointer, scroll and viewport state with a single writer

pub mod geometry;
pub mod input;

pub use geometry::{Point, Rect, Size, Vec2};
pub use input::{InputSnapshot, InputTracker, Key};
