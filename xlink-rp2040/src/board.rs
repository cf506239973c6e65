//! Pin map and analog front-end constants for the controller and robot boards.
//!
//! # Controller
//!
//! | Function            | GPIO | Description |
//! |---------------------|------|-------------|
//! | UART0 TX            | 0    | To XBee DIN |
//! | UART0 RX            | 1    | From XBee DOUT (unused on the controller) |
//! | MUX A / MUX B       | 2, 3 | 74HC4052 channel select |
//! | Left joy button     | 4    | Active low, internal pull-up |
//! | Right joy button    | 5    | Active low, internal pull-up |
//! | ADC0                | 26   | Mux X output: LX, LY, RX, RY |
//! | ADC1                | 27   | Mux Y output: LT, RT, left ladder, right ladder |
//! | LED                 | 25   | On while transmitting |
//!
//! # Robot
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | UART0 TX | 0    | To XBee DIN (unused on the robot) |
//! | UART0 RX | 1    | From XBee DOUT |
//! | LED      | 25   | On while the link is up |

use xlink_core::{AxisCalibration, TriggerCalibration};
use xlink_proto::Buttons;

/// XBee serial rate.
#[cfg(not(feature = "xbee-9600"))]
pub const BAUD_RATE: u32 = 115_200;
#[cfg(feature = "xbee-9600")]
pub const BAUD_RATE: u32 = 9_600;

pub const UART_TX_BUF: usize = 64;
pub const UART_RX_BUF: usize = 256;

/// Sender tick, must not exceed the minimum send interval.
pub const CONTROLLER_TICK_MS: u64 = 5;

/// Receiver tick, must not exceed the packet timeout.
pub const ROBOT_TICK_MS: u64 = 1;

/// Settling time after switching the 74HC4052.
pub const MUX_SETTLE_US: u64 = 5;

/// Mux channel of each input, on ADC0 and ADC1 respectively.
pub mod mux {
    pub const LEFT_X: u8 = 0;
    pub const LEFT_Y: u8 = 1;
    pub const RIGHT_X: u8 = 2;
    pub const RIGHT_Y: u8 = 3;

    pub const LEFT_TRIGGER: u8 = 0;
    pub const RIGHT_TRIGGER: u8 = 1;
    pub const LEFT_LADDER: u8 = 2;
    pub const RIGHT_LADDER: u8 = 3;
}

/// Band edges of both button ladders, in 12-bit ADC counts.
pub const LADDER_THRESHOLDS: [u16; 5] = [600, 1300, 2000, 2700, 3400];

/// Left ladder carries the pad and the left bumper.
pub const LEFT_LADDER: [Buttons; 5] = [
    Buttons::LEFT,
    Buttons::RIGHT,
    Buttons::UP,
    Buttons::DOWN,
    Buttons::BUMPER,
];

/// Right ladder carries the face buttons and the right bumper.
pub const RIGHT_LADDER: [Buttons; 5] = LEFT_LADDER;

pub const LEFT_X_CAL: AxisCalibration = AxisCalibration::DEFAULT;
/// Stick Y pots are mounted upside down.
pub const LEFT_Y_CAL: AxisCalibration = AxisCalibration::DEFAULT.inverted();
pub const RIGHT_X_CAL: AxisCalibration = AxisCalibration::DEFAULT;
pub const RIGHT_Y_CAL: AxisCalibration = AxisCalibration::DEFAULT.inverted();

pub const TRIGGER_CAL: TriggerCalibration = TriggerCalibration { min: 300, max: 3700 };
