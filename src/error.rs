/*
 * SPDX-License-Identifier: Apache-2.0
 *
 * Copyright The Asahi Linux Contributors
 */

use thiserror::Error;

/// Everything that can go wrong between the caller and the controller.
///
/// The device never reports protocol-level errors back over the wire, so
/// every variant here is a transport failure of some kind. None of them
/// can be confused with a decoded value.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: serialport::Error,
    },

    #[error("failed to configure serial port: {0}")]
    Configure(#[source] serialport::Error),

    #[error("short write: sent {written} of {expected} bytes")]
    ShortWrite { expected: usize, written: usize },

    #[error("short read: got {read} of {expected} bytes")]
    ShortRead { expected: usize, read: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid number: {0}")]
    Parse(#[from] std::num::ParseIntError),
}

pub type Result<T> = std::result::Result<T, Error>;
