#![no_std]
#![no_main]

use defmt::{debug, info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config as UartConfig};
use embassy_time::{Duration, Ticker};
use static_cell::StaticCell;
use xlink_proto::{Axis, Direction, Side};
use xlink_rp2040::board;
use xlink_rp2040::{
    EmbassyClock, IoPort, LinkStats, LinkStatus, Receiver, StatusSignal, StatusTracker,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

type Port = IoPort<BufferedUart>;

/// Signal for passing link transitions from the receiver task to the status task.
static STATUS_SIGNAL: StaticCell<StatusSignal> = StaticCell::new();

/// UART ring buffers.
static TX_BUF: StaticCell<[u8; board::UART_TX_BUF]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; board::UART_RX_BUF]> = StaticCell::new();

static STATS: LinkStats = LinkStats::new();

/// Receiver ticks between state dumps.
const DUMP_EVERY: u32 = 500;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Robot link starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let signal = STATUS_SIGNAL.init(StatusSignal::new());

    // --- XBee UART ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = board::BAUD_RATE;

    let uart = BufferedUart::new(
        p.UART0,
        p.PIN_0, // TX
        p.PIN_1, // RX
        Irqs,
        TX_BUF.init([0; board::UART_TX_BUF]),
        RX_BUF.init([0; board::UART_RX_BUF]),
        uart_config,
    );
    let receiver = Receiver::new(IoPort::new(uart), EmbassyClock);

    // On-board LED shows the link state
    let led = Output::new(p.PIN_25, Level::Low);

    spawner.spawn(receiver_task(receiver, signal).unwrap());
    spawner.spawn(status_task(signal, led).unwrap());

    info!("Robot link initialized at {} baud, waiting for controller...", board::BAUD_RATE);
}

/// Receiver task - drains the XBee every tick and reports link transitions.
#[embassy_executor::task]
async fn receiver_task(
    mut receiver: Receiver<Port, EmbassyClock>,
    signal: &'static StatusSignal,
) {
    let mut tracker = StatusTracker::new();
    let mut ticks: u32 = 0;

    let mut ticker = Ticker::every(Duration::from_millis(board::ROBOT_TICK_MS));
    loop {
        ticker.next().await;

        let count = receiver.receive_data();
        if count > 0 {
            STATS.add_bytes(count);
        }

        let connected = receiver.connected();
        tracker.update(LinkStatus::from_connected(connected), signal);
        STATS.set_port_errors(receiver.port_mut().error_count());

        log_clicks(&mut receiver);

        ticks = ticks.wrapping_add(1);
        if connected && ticks % DUMP_EVERY == 0 {
            dump_state(&receiver);
        }
    }
}

/// Log every button press once.
fn log_clicks(receiver: &mut Receiver<Port, EmbassyClock>) {
    for dir in Direction::ALL {
        if receiver.button_click(dir) {
            info!("button {:?}", dir);
        }
        if receiver.dpad_click(dir) {
            info!("dpad {:?}", dir);
        }
    }
    for side in Side::ALL {
        if receiver.joy_button_click(side) {
            info!("{:?} joystick button", side);
        }
        if receiver.bumper_click(side) {
            info!("{:?} bumper", side);
        }
    }
}

fn dump_state(receiver: &Receiver<Port, EmbassyClock>) {
    let state = receiver.state().to_control_state();
    debug!(
        "L({=f32}, {=f32}) R({=f32}, {=f32}) LT {=f32} RT {=f32} buttons {=u8:08b} {=u8:08b}",
        state.joystick(Side::Left, Axis::X),
        state.joystick(Side::Left, Axis::Y),
        state.joystick(Side::Right, Axis::X),
        state.joystick(Side::Right, Axis::Y),
        state.trigger(Side::Left),
        state.trigger(Side::Right),
        state.buttons(Side::Left).raw(),
        state.buttons(Side::Right).raw(),
    );
}

/// Status task - waits for link transitions and drives the LED.
#[embassy_executor::task]
async fn status_task(signal: &'static StatusSignal, mut led: Output<'static>) {
    loop {
        match signal.wait().await {
            LinkStatus::Up => {
                led.set_high();
                let (bytes, _, errors) = STATS.snapshot();
                info!("Link up ({} bytes, {} port errors so far)", bytes, errors);
            }
            LinkStatus::Down => {
                led.set_low();
                warn!("Link lost, holding last values");
            }
        }
    }
}
