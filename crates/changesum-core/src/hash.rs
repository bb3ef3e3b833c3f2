//! Hex digest primitive.
//!
//! Hashes either an in-memory byte slice or a whole `Read` source and
//! returns the digest as lowercase hex. The hash function is a type
//! parameter; [`ContentHash`] is the one tied to the current checksum
//! algorithm version.

use digest::Digest;
use std::io::{self, Read};

/// Hash function used by the current checksum algorithm version.
pub type ContentHash = md5::Md5;

const BUF_SIZE: usize = 64 * 1024;

/// Digest `bytes` and return lowercase hex.
pub fn hex_digest<D: Digest>(bytes: &[u8]) -> String {
    hex::encode(D::digest(bytes))
}

/// Digest everything `reader` yields. Returns lowercase hex and the number
/// of bytes hashed. Reads in chunks to keep memory use bounded; the reader is consumed to
/// its end exactly once. Any read error aborts the digest.
pub fn hex_digest_reader<D: Digest, R: Read>(mut reader: R) -> io::Result<(String, u64)> {
    let mut hasher = D::new();
    let mut buf = vec![0u8; BUF_SIZE];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
        total += n as u64;
    }
    Ok((hex::encode(hasher.finalize()), total))
}
