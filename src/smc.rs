/*
 * SPDX-License-Identifier: Apache-2.0
 *
 * Copyright The Asahi Linux Contributors
 */

//! Compact binary protocol of the Pololu Simple Motor Controller.
//!
//! Requests are fixed-length byte strings with no framing or checksum.
//! Only variable reads produce a reply, always two bytes, low byte first.

use crate::transport::Transport;
use crate::{Error, Result};
use log::{debug, info};

pub const CMD_GET_VARIABLE: u8 = 0xA1;
pub const CMD_EXIT_SAFE_START: u8 = 0x83;
pub const CMD_MOTOR_FORWARD: u8 = 0x85;
pub const CMD_MOTOR_REVERSE: u8 = 0x86;

pub const EXIT_SAFE_START: [u8; 1] = [CMD_EXIT_SAFE_START];

/// Largest speed magnitude the controller accepts.
pub const MAX_SPEED: i16 = 3200;

const VARIABLE_REPLY_LEN: usize = 2;

/// Index into the controller's variable table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableId(pub u8);

impl VariableId {
    /// Bitmask of currently active errors.
    pub const ERROR_STATUS: Self = Self(0);
    /// Signed target speed, -3200 to 3200.
    pub const TARGET_SPEED: Self = Self(20);
}

impl From<u8> for VariableId {
    fn from(id: u8) -> Self {
        Self(id)
    }
}

pub fn encode_get_variable(id: VariableId) -> [u8; 2] {
    [CMD_GET_VARIABLE, id.0]
}

/// Builds a motor forward/reverse command.
///
/// The magnitude is split into a 5-bit low field and a 7-bit high field so
/// that neither data byte has its top bit set. Magnitudes above
/// [`MAX_SPEED`] still encode, the controller decides what to do with them.
pub fn encode_set_target_speed(speed: i16) -> [u8; 3] {
    let opcode = if speed < 0 {
        CMD_MOTOR_REVERSE
    } else {
        CMD_MOTOR_FORWARD
    };
    let magnitude = speed.unsigned_abs();
    [
        opcode,
        (magnitude & 0x1F) as u8,
        ((magnitude >> 5) & 0x7F) as u8,
    ]
}

pub fn decode_variable(reply: [u8; 2]) -> u16 {
    u16::from_le_bytes(reply)
}

/// Reinterprets a raw variable as two's complement.
pub fn decode_signed(raw: u16) -> i16 {
    raw as i16
}

pub struct Device<'a> {
    transport: &'a mut dyn Transport,
}

impl<'a> Device<'a> {
    pub fn new(transport: &'a mut dyn Transport) -> Self {
        Self { transport }
    }

    fn send(&mut self, command: &[u8]) -> Result<()> {
        debug!("tx {:02x?}", command);
        let written = self.transport.write(command)?;
        if written != command.len() {
            return Err(Error::ShortWrite {
                expected: command.len(),
                written,
            });
        }
        Ok(())
    }

    fn receive<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        let read = self.transport.read(&mut buf)?;
        if read != N {
            return Err(Error::ShortRead { expected: N, read });
        }
        debug!("rx {:02x?}", buf);
        Ok(buf)
    }

    /// Reads a variable as an unsigned 16-bit value.
    ///
    /// Signed variables need [`decode_signed`] on the result.
    pub fn get_variable(&mut self, id: VariableId) -> Result<u16> {
        self.send(&encode_get_variable(id))?;
        let reply = self.receive::<VARIABLE_REPLY_LEN>()?;
        Ok(decode_variable(reply))
    }

    pub fn get_target_speed(&mut self) -> Result<i16> {
        let raw = self.get_variable(VariableId::TARGET_SPEED)?;
        Ok(decode_signed(raw))
    }

    /// Returns the error bitmask. Bit meanings are defined by the device.
    pub fn get_error_status(&mut self) -> Result<u16> {
        self.get_variable(VariableId::ERROR_STATUS)
    }

    /// Clears the safe-start lockout. The controller ignores speed commands
    /// until this has been sent.
    pub fn exit_safe_start(&mut self) -> Result<()> {
        info!("Exiting safe start...");
        self.send(&EXIT_SAFE_START)
    }

    pub fn set_target_speed(&mut self, speed: i16) -> Result<()> {
        info!("Setting target speed to {speed}");
        self.send(&encode_set_target_speed(speed))
    }

    pub fn stop(&mut self) -> Result<()> {
        self.set_target_speed(0)
    }
}
