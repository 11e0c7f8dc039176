//! Drawable components: sprites, text labels and colour blocks
//!
//! These carry only what a drawing surface needs to render the entity.
//! Image decoding and font rasterisation belong to the surface.

use crate::error::{EngineError, EngineResult};
use crate::foundation::colour::Colour;

/// Image or one frame of a spritesheet
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    /// Image path, resolved by the drawing surface
    pub image_file: String,
    frame_size: Option<(u32, u32)>,
    frame_count: usize,
    frame_index: usize,
}

impl SpriteComponent {
    /// Draw the whole image
    pub fn new(image_file: impl Into<String>) -> Self {
        Self {
            image_file: image_file.into(),
            frame_size: None,
            frame_count: 1,
            frame_index: 0,
        }
    }

    /// Treat the image as a sheet of `frame_count` frames of equal size
    pub fn with_frames(mut self, frame_width: u32, frame_height: u32, frame_count: usize) -> EngineResult<Self> {
        if frame_width == 0 || frame_height == 0 || frame_count == 0 {
            return Err(EngineError::invalid_argument(format!(
                "spritesheet needs positive frame size and count, got {frame_width}x{frame_height} x{frame_count}"
            )));
        }
        self.frame_size = Some((frame_width, frame_height));
        self.frame_count = frame_count;
        self.frame_index = 0;
        Ok(self)
    }

    /// Frame size, or `None` when the whole image is drawn
    pub fn frame_size(&self) -> Option<(u32, u32)> {
        self.frame_size
    }

    /// Number of frames in the sheet
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Frame currently drawn
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Select the frame to draw
    pub fn set_frame_index(&mut self, index: usize) -> EngineResult<()> {
        if index >= self.frame_count {
            return Err(EngineError::invalid_argument(format!(
                "frame index {index} out of range for {} frame(s)",
                self.frame_count
            )));
        }
        self.frame_index = index;
        Ok(())
    }
}

/// Rendered text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabelComponent {
    /// Text to draw
    pub text: String,
    /// Font family or file, resolved by the drawing surface
    pub font_name: String,
    /// Text colour
    pub colour: Colour,
    font_size: u32,
}

impl TextLabelComponent {
    /// Create a white label; `font_size` must be positive
    pub fn new(text: impl Into<String>, font_name: impl Into<String>, font_size: u32) -> EngineResult<Self> {
        let mut label = Self {
            text: text.into(),
            font_name: font_name.into(),
            colour: Colour::WHITE,
            font_size: 1,
        };
        label.set_font_size(font_size)?;
        Ok(label)
    }

    /// Set the text colour
    #[must_use]
    pub fn with_colour(mut self, colour: Colour) -> Self {
        self.colour = colour;
        self
    }

    /// Font size in points
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Change the font size; zero is rejected
    pub fn set_font_size(&mut self, font_size: u32) -> EngineResult<()> {
        if font_size == 0 {
            return Err(EngineError::invalid_argument("font size must be positive"));
        }
        self.font_size = font_size;
        Ok(())
    }
}

/// Solid colour rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColourBlockComponent {
    /// Fill colour
    pub colour: Colour,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ColourBlockComponent {
    /// Create a block of the given colour and size
    pub const fn new(colour: Colour, width: u32, height: u32) -> Self {
        Self { colour, width, height }
    }
}
