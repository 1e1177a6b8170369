use parking_lot::RwLock;

use crate::models::DisplayConfig;

pub const BLOCK_ID: &str = "instagram_block_block";
pub const BLOCK_LABEL: &str = "Instagram block";

/// Per-instance display settings of the placed block.
pub struct BlockInstance {
    display: RwLock<DisplayConfig>,
}

impl BlockInstance {
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            display: RwLock::new(display),
        }
    }

    pub fn display(&self) -> DisplayConfig {
        *self.display.read()
    }

    pub fn set_display(&self, display: DisplayConfig) {
        *self.display.write() = display;
    }
}
