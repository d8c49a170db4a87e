//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements                        | Connects to              |
//! |-------------|-----------------------------------|--------------------------|
//! | `hardware`  | IrTransportPort, IndicatorPort,   | IR LEDC carrier, GPIO,   |
//! |             | ButtonPort, SerialPort,           | UART0 console,           |
//! |             | DisplayPort                       | framed console screens   |
//! | `display`   | DisplayPort                       | Serial console output    |
//! | `retained`  | DiagnosticsPort                   | RTC no-init RAM          |
//! | `time`      | ClockPort                         | ESP high-res timer       |
//! | `log_sink`  | EventSink                         | Serial log output        |

pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod retained;
pub mod time;
