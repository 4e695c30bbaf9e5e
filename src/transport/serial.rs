/*
 * SPDX-License-Identifier: Apache-2.0
 *
 * Copyright The Asahi Linux Contributors
 */

use crate::transport::Transport;
use crate::{Error, Result};
use log::debug;
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::io::{self, Read, Write};
use std::time::Duration;

pub const DEFAULT_DEVICE: &str = "/dev/ttyACM0";
pub const DEFAULT_BAUD_RATE: u32 = 9600;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Where and how to open the controller's virtual COM port.
///
/// The USB virtual COM port ignores the baud rate, but a TTL serial
/// connection must match the rate configured on the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    pub path: String,
    pub baud_rate: u32,
    /// Upper bound on a single blocking read or write.
    pub timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DEVICE.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SerialConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// Serial port in raw binary mode. The port is closed when this is dropped.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    pub fn open(config: &SerialConfig) -> Result<Self> {
        debug!(
            "opening {} at {} baud, timeout {:?}",
            config.path, config.baud_rate, config.timeout
        );
        let port = serialport::new(config.path.as_str(), config.baud_rate)
            .timeout(config.timeout)
            .open()
            .map_err(|source| Error::Open {
                path: config.path.clone(),
                source,
            })?;

        let mut transport = Self { port };
        transport.configure_raw()?;
        Ok(transport)
    }

    /// Puts the line into 8N1 without flow control.
    ///
    /// On POSIX hosts `serialport` already opens the tty with canonical mode,
    /// echo, signal generation and CR/NL translation disabled, so bytes pass
    /// through unmodified once the framing below is set.
    fn configure_raw(&mut self) -> Result<()> {
        self.port
            .set_data_bits(DataBits::Eight)
            .map_err(Error::Configure)?;
        self.port.set_parity(Parity::None).map_err(Error::Configure)?;
        self.port
            .set_stop_bits(StopBits::One)
            .map_err(Error::Configure)?;
        self.port
            .set_flow_control(FlowControl::None)
            .map_err(Error::Configure)?;
        Ok(())
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let written = self.port.write(data)?;
        self.port.flush()?;
        Ok(written)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.port.read(buf)
    }
}
