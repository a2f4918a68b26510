// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Lightweight checksum helpers.

use flate2::Crc;

/// Compute the IEEE CRC32 of `data` (zlib-compatible).
///
/// Strings are hashed through their UTF-8 bytes. This is a fingerprint for
/// cache busting, not an integrity check against tampering.
///
/// # Examples
///
/// ```
/// assert_eq!(textkit::crc32(""), 0);
/// assert_eq!(textkit::crc32("m\u{f6}p"), textkit::crc32("m\u{f6}p".as_bytes()));
/// ```
pub fn crc32(data: impl AsRef<[u8]>) -> u32 {
    let mut crc = Crc::new();
    crc.update(data.as_ref());
    crc.sum()
}
