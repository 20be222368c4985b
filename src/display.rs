//! SSD1306 OLED display wrapper.

use embedded_graphics::prelude::*;
use pixel_face::{Bounds, Engine, GraphicsCanvas, Host};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    let _ = display.init();
    display.clear_buffer();
    let _ = display.flush();
    display
}

/// Render the face into the frame buffer and push it to the panel.
pub fn draw_face<I2C, H>(display: &mut Display<I2C>, engine: &mut Engine<H>, now_ms: u64)
where
    I2C: embedded_hal::i2c::I2c,
    H: Host,
{
    let bounds = Bounds::from(display.bounding_box());
    engine.render(&mut GraphicsCanvas::new(&mut *display), bounds, now_ms);
    let _ = display.flush();
}

/// Dim the panel while ambient; OLED pixels age with brightness.
pub fn set_ambient<I2C>(display: &mut Display<I2C>, ambient: bool)
where
    I2C: embedded_hal::i2c::I2c,
{
    let _ = display.set_brightness(if ambient {
        Brightness::DIMMEST
    } else {
        Brightness::NORMAL
    });
}
