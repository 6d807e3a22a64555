use sdl2::pixels::PixelFormatEnum;

use chipvm::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chipvm::state::FrameBuffer;

/// Size multiplier from machine pixels to window pixels.
const SCALE: usize = 10;

/// # Display
/// Renders the machine's 64x32 monochrome frame buffer in an SDL2 window.
/// `render` is only called when the machine reports a dirty frame.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    width: usize,
    height: usize,
}

impl Display {
    /// Creates a new display bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    pub fn new(sdl: &sdl2::Sdl) -> Self {
        let video_subsystem = sdl.video().unwrap();
        let window = video_subsystem
            .window(
                "chipvm",
                (DISPLAY_WIDTH * SCALE) as u32,
                (DISPLAY_HEIGHT * SCALE) as u32,
            )
            .position_centered()
            .opengl()
            .build()
            .unwrap();
        let canvas = window.into_canvas().build().unwrap();

        Display {
            canvas,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        }
    }

    /// Flattens a frame buffer into an SDL2 RGB24 texture body: rows are
    /// concatenated, each cell becomes three identical channel bytes, and the
    /// 0/1 cell value maps to 0/255 intensity.
    ///
    /// # Arguments
    /// * `frame` a machine frame buffer
    fn frame_to_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|cell| std::iter::repeat(cell).take(3))
            .map(|cell| cell * 255)
            .collect()
    }

    /// Uploads the frame buffer as a streaming texture and presents it.
    ///
    /// # Arguments
    /// * `frame` a machine frame buffer
    pub fn render(&mut self, frame: &FrameBuffer) {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                self.width as u32,
                self.height as u32,
            )
            .unwrap();

        texture
            .with_lock(None, |buffer: &mut [u8], _pitch: usize| {
                buffer.copy_from_slice(&Display::frame_to_texture(frame));
            })
            .unwrap();

        self.canvas.copy(&texture, None, None).unwrap();
        self.canvas.present()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_texture() {
        let mut frame: FrameBuffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        frame[0][0..2].copy_from_slice(&[0, 1]);
        frame[1][0..2].copy_from_slice(&[1, 0]);
        let texture = Display::frame_to_texture(&frame);

        let mut expected: Vec<u8> = vec![0; DISPLAY_WIDTH * DISPLAY_HEIGHT * 3];
        expected[0..6].copy_from_slice(&[0, 0, 0, 255, 255, 255]);
        expected[192..198].copy_from_slice(&[255, 255, 255, 0, 0, 0]);

        assert_eq!(texture, expected);
    }
}
