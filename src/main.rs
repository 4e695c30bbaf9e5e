/*
 * SPDX-License-Identifier: Apache-2.0
 *
 * Copyright The Asahi Linux Contributors
 */

use env_logger::Env;
use log::{error, info};
use smcdrive::{Device, Result, SerialConfig, SerialTransport, VariableId, MAX_SPEED};
use std::{process::ExitCode, thread, time::Duration};

fn parse_u8(s: &str) -> Result<u8> {
    let value = if let Some(stripped) = s.strip_prefix("0x") {
        u8::from_str_radix(stripped, 16)?
    } else {
        s.parse::<u8>()?
    };
    Ok(value)
}

fn demo(device: &mut Device, hold: Duration) -> Result<()> {
    device.exit_safe_start()?;
    println!("Error status: 0x{:04x}", device.get_error_status()?);

    let speed = device.get_target_speed()?;
    println!("Current target speed is {speed}.");
    thread::sleep(hold);

    let new_speed = if speed <= 0 { MAX_SPEED } else { -MAX_SPEED };
    println!("Setting target speed to {new_speed}.");
    device.set_target_speed(new_speed)?;
    thread::sleep(hold);

    device.stop()
}

fn run() -> Result<()> {
    let matches = clap::command!()
        .arg(
            clap::arg!(-d --device [DEVICE] "serial port of the motor controller.")
                .default_value("/dev/ttyACM0"),
        )
        .arg(
            clap::arg!(-b --baud [BAUD] "baud rate, ignored by the USB virtual COM port.")
                .value_parser(clap::value_parser!(u32))
                .default_value("9600"),
        )
        .arg(
            clap::arg!(-t --"timeout-ms" [MS] "read/write timeout in milliseconds.")
                .value_parser(clap::value_parser!(u64))
                .default_value("1000"),
        )
        .subcommand(clap::Command::new("status").about("print the error status bitmask"))
        .subcommand(
            clap::Command::new("get-variable")
                .about("read a raw controller variable")
                .arg(clap::arg!(<ID> "variable id, decimal or 0x-prefixed hex")),
        )
        .subcommand(clap::Command::new("get-speed").about("print the target speed"))
        .subcommand(
            clap::Command::new("exit-safe-start").about("clear the safe-start lockout"),
        )
        .subcommand(
            clap::Command::new("set-speed")
                .about("set the target speed (-3200 to 3200)")
                .arg(
                    clap::arg!(<SPEED> "target speed, negative for reverse")
                        .value_parser(clap::value_parser!(i16))
                        .allow_negative_numbers(true),
                ),
        )
        .subcommand(clap::Command::new("stop").about("set the target speed to zero"))
        .subcommand(
            clap::Command::new("demo")
                .about("drive the motor one way, then the other, then stop")
                .arg(
                    clap::arg!(--hold [SECS] "seconds to wait between steps.")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("9"),
                ),
        )
        .arg_required_else_help(true)
        .get_matches();

    let mut config = SerialConfig::default();
    if let Some(path) = matches.get_one::<String>("device") {
        config.path = path.clone();
    }
    if let Some(baud) = matches.get_one::<u32>("baud") {
        config.baud_rate = *baud;
    }
    if let Some(ms) = matches.get_one::<u64>("timeout-ms") {
        config.timeout = Duration::from_millis(*ms);
    }

    let mut transport = SerialTransport::open(&config)?;
    let mut device = Device::new(&mut transport);

    match matches.subcommand() {
        Some(("status", _)) => {
            println!("0x{:04x}", device.get_error_status()?);
        }
        Some(("get-variable", args)) => {
            let id = args.get_one::<String>("ID").map(String::as_str).unwrap_or("0");
            let id = VariableId(parse_u8(id)?);
            println!("{}", device.get_variable(id)?);
        }
        Some(("get-speed", _)) => {
            println!("{}", device.get_target_speed()?);
        }
        Some(("exit-safe-start", _)) => {
            device.exit_safe_start()?;
        }
        Some(("set-speed", args)) => {
            let speed = args.get_one::<i16>("SPEED").copied().unwrap_or(0);
            device.set_target_speed(speed)?;
        }
        Some(("stop", _)) => {
            device.stop()?;
        }
        Some(("demo", args)) => {
            let secs = args.get_one::<u64>("hold").copied().unwrap_or(9);
            demo(&mut device, Duration::from_secs(secs))?;
        }
        _ => {}
    }
    info!("Done");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("smcdrive: {e}");
            ExitCode::FAILURE
        }
    }
}
