pub mod frame;

pub use frame::{AnnotatedFrame, FrameRow, InventoryItem, Side};
