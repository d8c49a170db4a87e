//! GPIO / peripheral pin assignments for the ACSentry control board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Diagnostic indicator LEDs (active HIGH, discrete)
// ---------------------------------------------------------------------------

/// Red LED — lit during boot and on peripheral bring-up failure.
pub const LED_BOOT_GPIO: i32 = 13;
/// Green LED — heartbeat blink during normal operation.
pub const LED_HEARTBEAT_GPIO: i32 = 11;
/// Blue LED — fault branch entered, waiting for the watchdog reset.
pub const LED_FAULT_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// User buttons (active-low momentary switches with internal pull-up)
// ---------------------------------------------------------------------------

/// Deliberate-fault trigger button.
pub const BUTTON_FAULT_GPIO: i32 = 5;
/// Cycle-to-next-appliance-state button.
pub const BUTTON_ADVANCE_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Infrared transmitter
// ---------------------------------------------------------------------------

/// IR LED drive pin (through NPN driver stage).
pub const IR_TX_GPIO: i32 = 16;
/// IR carrier frequency — standard 38 kHz consumer-IR band.
pub const IR_CARRIER_HZ: u32 = 38_000;
/// LEDC timer resolution for the carrier (8-bit gives a clean 50% duty).
pub const IR_PWM_RESOLUTION_BITS: u32 = 8;

// ---------------------------------------------------------------------------
// Serial console (UART0, shared with the boot console)
// ---------------------------------------------------------------------------

pub const UART_PORT: u8 = 0;
pub const UART_BAUD: u32 = 115_200;
