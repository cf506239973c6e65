#![no_std]
#![no_main]

use defmt::{debug, info, trace, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config as UartConfig};
use embassy_time::{Duration, Ticker};
use static_cell::StaticCell;
use xlink_proto::{Axis, Side};
use xlink_rp2040::board::{self, mux};
use xlink_rp2040::{
    ButtonLadder, Debouncer, EmbassyClock, Frame, IoPort, Latch, LinkStats, MuxSampler, MuxSelect,
    Sender, Transmission,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

type Port = IoPort<BufferedUart>;
type Sampler = MuxSampler<'static, Output<'static>, Output<'static>>;

/// UART ring buffers.
static TX_BUF: StaticCell<[u8; board::UART_TX_BUF]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; board::UART_RX_BUF]> = StaticCell::new();

static STATS: LinkStats = LinkStats::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Controller starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

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

    #[allow(unused_mut)]
    let mut sender = Sender::new(IoPort::new(uart), EmbassyClock);
    #[cfg(feature = "text-wire")]
    sender.set_wire_format(xlink_rp2040::WireFormat::DebugText);

    // --- Analog front end ---
    let adc = Adc::new(p.ADC, Irqs, adc::Config::default());
    let mux_x = Channel::new_pin(p.PIN_26, Pull::None);
    let mux_y = Channel::new_pin(p.PIN_27, Pull::None);
    let select = MuxSelect::new(
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
    );
    let sampler = MuxSampler::new(adc, mux_x, mux_y, select);

    let joy_buttons = [Input::new(p.PIN_4, Pull::Up), Input::new(p.PIN_5, Pull::Up)];
    let led = Output::new(p.PIN_25, Level::Low);

    spawner.spawn(controller_task(sender, sampler, joy_buttons, led).unwrap());
    spawner.spawn(stats_task().unwrap());

    info!(
        "Controller initialized at {} baud, sending every {} ms tick",
        board::BAUD_RATE,
        board::CONTROLLER_TICK_MS
    );
}

/// Sample inputs and run the sender, once per tick.
#[embassy_executor::task]
async fn controller_task(
    mut sender: Sender<Port, EmbassyClock>,
    mut sampler: Sampler,
    joy_buttons: [Input<'static>; 2],
    mut led: Output<'static>,
) {
    let latches = [Latch::new(), Latch::new()];
    let mut debouncers = [
        Debouncer::new(&latches[0], EmbassyClock, &board::LADDER_THRESHOLDS),
        Debouncer::new(&latches[1], EmbassyClock, &board::LADDER_THRESHOLDS),
    ];
    let ladders = [
        ButtonLadder::new(Side::Left, &board::LEFT_LADDER),
        ButtonLadder::new(Side::Right, &board::RIGHT_LADDER),
    ];

    let mut ticker = Ticker::every(Duration::from_millis(board::CONTROLLER_TICK_MS));
    loop {
        ticker.next().await;

        match sampler.sample().await {
            Ok(frame) => apply_frame(&mut sender, &frame, &latches),
            Err(e) => warn!("ADC error: {:?}", e),
        }

        for side in Side::ALL {
            let i = side.index();
            ladders[i].drive(debouncers[i].get_pressed(), &mut sender);
            // joystick buttons pull to ground when pressed
            sender.set_joy_button(side, joy_buttons[i].is_low());
        }

        match sender.update() {
            Transmission::Idle => led.set_low(),
            Transmission::Partial(header) => {
                trace!("sent {=u8:08b}", header.raw());
                STATS.add_packet();
                led.set_high();
            }
            Transmission::Full(header) => {
                debug!("heartbeat, first half {=u8:08b}", header.raw());
                STATS.add_packet();
                led.set_high();
            }
        }
        STATS.set_port_errors(sender.port().error_count());
    }
}

/// Push one frame of readings into the sender and the ladder latches.
fn apply_frame(sender: &mut Sender<Port, EmbassyClock>, frame: &Frame, latches: &[Latch; 2]) {
    let stick = |channel: u8| frame.x[usize::from(channel)];
    let aux = |channel: u8| frame.y[usize::from(channel)];

    sender.set_joystick(Side::Left, Axis::X, board::LEFT_X_CAL.normalize(stick(mux::LEFT_X)));
    sender.set_joystick(Side::Left, Axis::Y, board::LEFT_Y_CAL.normalize(stick(mux::LEFT_Y)));
    sender.set_joystick(Side::Right, Axis::X, board::RIGHT_X_CAL.normalize(stick(mux::RIGHT_X)));
    sender.set_joystick(Side::Right, Axis::Y, board::RIGHT_Y_CAL.normalize(stick(mux::RIGHT_Y)));

    sender.set_trigger(Side::Left, board::TRIGGER_CAL.normalize(aux(mux::LEFT_TRIGGER)));
    sender.set_trigger(Side::Right, board::TRIGGER_CAL.normalize(aux(mux::RIGHT_TRIGGER)));

    latches[Side::Left.index()].store(aux(mux::LEFT_LADDER));
    latches[Side::Right.index()].store(aux(mux::RIGHT_LADDER));
}

/// Log link counters once a second.
#[embassy_executor::task]
async fn stats_task() {
    let mut ticker = Ticker::every(Duration::from_secs(1));
    loop {
        ticker.next().await;
        let (_, packets, errors) = STATS.snapshot();
        info!("tx: {} packets, {} port errors", packets, errors);
    }
}
