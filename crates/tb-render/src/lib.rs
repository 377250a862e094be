pub mod frame;
pub mod hit;

pub use frame::{Frame, FrameInput, build_frame};
pub use hit::{MarkerHit, hit_test_marker};
