/*
 * Copyright (C) 2022 taylor.fish <contact@taylor.fish>
 *
 * This file is part of Funycode.
 *
 * Funycode is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Funycode is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with Funycode. If not, see <https://www.gnu.org/licenses/>.
 */

use std::fmt::{Debug, Display};
use std::io::{stdin, stdout, BufRead, BufWriter, Stdout, Write};
use std::process::exit;

const USAGE: &str = "\
Usage: funycode [-e]

Decodes funycode names read from standard input, one per line, and
writes the results to standard output. With -e, encodes names into
funycode instead.
";

/// Decoded names longer than this cannot have come from a sane encoder;
/// the input was probably plain names fed to the decoder by mistake.
const MAX_NAME: usize = u16::MAX as usize;

#[macro_use]
mod error_exit {
    use super::{exit, Display};

    macro_rules! error_exit {
        ($($args:tt)*) => {
            crate::error_exit::_run(format_args!($($args)*));
        };
    }

    pub fn _run(args: impl Display) -> ! {
        eprintln!("error: {}", args);
        if cfg!(feature = "cli-panic") {
            panic!("error: {}", args);
        } else {
            exit(1);
        }
    }
}

fn expect<T, E: Debug>(result: Result<T, E>, msg: impl Display) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("error: {}", msg);
        if cfg!(feature = "cli-panic") {
            panic!("error: {}: {:?}", msg, e);
        } else {
            exit(1);
        }
    })
}

fn parse_args<Args: IntoIterator<Item = std::ffi::OsString>>(
    args: Args,
) -> bool {
    let mut encode = false;
    for arg in args {
        match arg.to_str() {
            Some("-e") => encode = true,
            _ => {
                eprint!("{}", USAGE);
                exit(1);
            }
        }
    }
    encode
}

fn write_line(writer: &mut BufWriter<Stdout>, line: &str) {
    expect(
        writeln!(writer, "{}", line),
        "could not write to standard output",
    );
}

fn main() {
    let should_encode = parse_args(std::env::args_os().skip(1));
    let stdin = stdin();
    let mut writer = BufWriter::new(stdout());
    for line in stdin.lock().lines() {
        let line = expect(line, "could not read input");
        if should_encode {
            write_line(&mut writer, &funycode::encode(&line));
        } else {
            match funycode::decode(&line) {
                Ok(name) if name.len() > MAX_NAME => {
                    error_exit!("result too long (did you mean '-e'?)");
                }
                Ok(name) => write_line(&mut writer, &name),
                Err(e) => {
                    error_exit!("input is not valid funycode: {}", e);
                }
            }
        }
    }
    expect(writer.flush(), "could not write to standard output");
}
