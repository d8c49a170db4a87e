//! Infrared command transmitter.
//!
//! Drives the IR LED with a 38 kHz LEDC carrier gated on and off to form
//! the command frame.  Each logical command is one fixed 32-bit code in a
//! NEC-style frame (9 ms leader, 4.5 ms space, pulse-distance bits, stop
//! burst).  The codes match the AC unit's remote; the framing lives
//! entirely in this driver.
//!
//! On non-espidf targets transmission is a log line — the control core
//! never looks at the waveform.

use crate::state::IrCommand;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

// Remote codes captured from the OEM handset.
const CODE_POWER_OFF: u32 = 0x10AF_28D7;
const CODE_POWER_ON: u32 = 0x10AF_8877;
const CODE_COOL_20: u32 = 0x10AF_906F;
const CODE_FAN_LOW: u32 = 0x10AF_708F;
const CODE_FAN_HIGH: u32 = 0x10AF_B04F;

fn frame_code(command: IrCommand) -> u32 {
    match command {
        IrCommand::PowerOff => CODE_POWER_OFF,
        IrCommand::PowerOn => CODE_POWER_ON,
        IrCommand::Cool20 => CODE_COOL_20,
        IrCommand::FanLow => CODE_FAN_LOW,
        IrCommand::FanHigh => CODE_FAN_HIGH,
    }
}

pub struct IrTransmitter {
    ready: bool,
}

impl IrTransmitter {
    pub fn new() -> Self {
        Self { ready: false }
    }

    /// Configure the carrier PWM channel.  `false` is fatal for the boot.
    pub fn init(&mut self) -> bool {
        #[cfg(target_os = "espidf")]
        {
            self.ready = hw_init::ir_carrier_init(pins::IR_TX_GPIO, pins::IR_CARRIER_HZ);
        }

        #[cfg(not(target_os = "espidf"))]
        {
            log::info!("ir(sim): transmitter ready");
            self.ready = true;
        }

        self.ready
    }

    /// Transmit one command frame.  Fire-and-forget: the AC unit does not
    /// acknowledge, so there is nothing to retry on.
    pub fn send(&mut self, command: IrCommand) {
        if !self.ready {
            log::warn!("ir: send before init, dropping {}", command.label());
            return;
        }

        #[cfg(target_os = "espidf")]
        self.transmit_frame(frame_code(command));

        #[cfg(not(target_os = "espidf"))]
        log::info!(
            "ir(sim): {} (0x{:08X})",
            command.label(),
            frame_code(command)
        );
    }

    #[cfg(target_os = "espidf")]
    fn transmit_frame(&mut self, code: u32) {
        use esp_idf_hal::delay::Ets;

        // NEC timing (microseconds).
        const LEADER_MARK: u32 = 9_000;
        const LEADER_SPACE: u32 = 4_500;
        const BIT_MARK: u32 = 560;
        const ZERO_SPACE: u32 = 560;
        const ONE_SPACE: u32 = 1_690;

        hw_init::ir_carrier_on();
        Ets::delay_us(LEADER_MARK);
        hw_init::ir_carrier_off();
        Ets::delay_us(LEADER_SPACE);

        for bit in (0..32).rev() {
            hw_init::ir_carrier_on();
            Ets::delay_us(BIT_MARK);
            hw_init::ir_carrier_off();
            if (code >> bit) & 1 == 1 {
                Ets::delay_us(ONE_SPACE);
            } else {
                Ets::delay_us(ZERO_SPACE);
            }
        }

        // Stop burst.
        hw_init::ir_carrier_on();
        Ets::delay_us(BIT_MARK);
        hw_init::ir_carrier_off();
    }
}

impl Default for IrTransmitter {
    fn default() -> Self {
        Self::new()
    }
}
