use std::io::{self, Write};

pub const USAGE: &str = "\
usage: genkey [--len length] [--clip]
genkey generates a cryptographically secure sequence of hex-encoded bytes.

  -l, --len, /len LENGTH   key length in bytes (default 32, at most 1048576)
      --clip, /clip        also copy the key to the clipboard
  -c, --copyright          show the license notice
  -h, --help               show this message

switches are case-insensitive.

examples:
  genkey
  genkey --len 64
  genkey /len 128 /clip
  genkey --clip
";

const COPYRIGHT: &str = "\
genkey generates a cryptographically secure sequence of hex-encoded bytes.

Copyright (C) 2023 Timothy J. Bruce

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.
";

pub fn print_usage(w: &mut impl Write) -> io::Result<()> {
    w.write_all(USAGE.as_bytes())?;
    w.flush()
}

pub fn print_copyright(w: &mut impl Write) -> io::Result<()> {
    w.write_all(COPYRIGHT.as_bytes())?;
    w.flush()
}
