use log::info;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{TextureValueError, WindowCanvas};
use sdl2::video::WindowBuildError;
use sdl2::IntegerOrSdlError;
use thiserror::Error;

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_PIXELS, DISPLAY_WIDTH};
use chip8_core::state::FrameBuffer;

/// Bytes per RGB24 pixel
const CHANNELS: usize = 3;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("SDL error: {0}")]
    Sdl(String),

    #[error(transparent)]
    Window(#[from] WindowBuildError),

    #[error(transparent)]
    Canvas(#[from] IntegerOrSdlError),

    #[error(transparent)]
    Texture(#[from] TextureValueError),
}

impl From<String> for DisplayError {
    fn from(message: String) -> Self {
        DisplayError::Sdl(message)
    }
}

/// The two colours a pixel can take, as RGB
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub on: [u8; CHANNELS],
    pub off: [u8; CHANNELS],
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            on: [0xFF, 0xFF, 0xFF],
            off: [0x00, 0x00, 0x00],
        }
    }
}

/// # Display
/// The Chip-8 display is composed of 64x32 pixels black/white pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively in a 2d array of 64x32 bytes.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: WindowCanvas,
    palette: Palette,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    /// * `palette` the colours of lit and unlit pixels
    pub fn new(sdl: &sdl2::Sdl, scale: u32, palette: Palette) -> Result<Self, DisplayError> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "Chip-8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()?;
        let canvas = window.into_canvas().build()?;
        info!(
            "opened {}x{} window",
            DISPLAY_WIDTH as u32 * scale,
            DISPLAY_HEIGHT as u32 * scale
        );

        Ok(Display { canvas, palette })
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 RGB24 texture is a 1D array of bytes that represent concatenated rows of RGB pixels.
    /// Rows are flattened in order and every pixel becomes the three channels of its palette colour.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    /// * `palette` the colours to map 1 and 0 to
    pub fn frame_to_texture(frame: &FrameBuffer, palette: &Palette) -> Vec<u8> {
        let mut texture = Vec::with_capacity(DISPLAY_PIXELS * CHANNELS);
        for &pixel in frame.iter().flatten() {
            let colour = if pixel == 0 { palette.off } else { palette.on };
            texture.extend_from_slice(&colour);
        }
        texture
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            DISPLAY_WIDTH as u32,
            DISPLAY_HEIGHT as u32,
        )?;

        let pixels = Display::frame_to_texture(frame, &self.palette);
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            // SDL may pad rows, so copy one row at a time
            let row_bytes = DISPLAY_WIDTH * CHANNELS;
            for (row, source) in pixels.chunks(row_bytes).enumerate() {
                buffer[row * pitch..row * pitch + row_bytes].copy_from_slice(source);
            }
        })?;

        self.canvas.clear();
        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
