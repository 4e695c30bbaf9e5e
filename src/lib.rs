/*
 * SPDX-License-Identifier: Apache-2.0
 *
 * Copyright The Asahi Linux Contributors
 */

//! Driver for Pololu Simple Motor Controllers over their serial link.
//!
//! ```no_run
//! use smcdrive::{Device, SerialConfig, SerialTransport};
//!
//! let mut transport = SerialTransport::open(&SerialConfig::new("/dev/ttyACM0"))?;
//! let mut smc = Device::new(&mut transport);
//! smc.exit_safe_start()?;
//! smc.set_target_speed(1600)?;
//! println!("target speed: {}", smc.get_target_speed()?);
//! # Ok::<(), smcdrive::Error>(())
//! ```

pub mod error;
pub mod smc;
pub mod transport;

pub use error::{Error, Result};
pub use smc::{Device, VariableId, MAX_SPEED};
pub use transport::serial::{SerialConfig, SerialTransport};
pub use transport::Transport;
