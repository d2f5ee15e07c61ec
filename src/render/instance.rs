use bytemuck::{Pod, Zeroable};

use crate::neko::RenderInstruction;

/// Per-instance data uploaded to GPU each frame.
/// Stride = 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Top-left corner of the sprite in screen pixels.
    pub position: [f32; 2],
    /// Column and row of the tile in the sheet.
    pub tile: [f32; 2],
}

impl From<&RenderInstruction> for SpriteInstance {
    fn from(instruction: &RenderInstruction) -> Self {
        let [col, row] = instruction.tile.cell();
        Self {
            position: instruction.screen.into(),
            tile: [col as f32, row as f32],
        }
    }
}
