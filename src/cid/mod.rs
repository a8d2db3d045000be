//! Content identifiers for file bytes.
//!
//! Files are named by a CIDv1 content address: a version byte, the raw-data
//! codec byte, and a sha2-256 multihash, rendered in multibase base32. The
//! byte layout is kept exactly compatible with existing consumers of these
//! identifiers, so the header values are written out verbatim (all four fit
//! in single-byte varints).

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// CIDv1.
const CID_VERSION: u8 = 0x01;
/// Multicodec tag for raw binary data.
const CODEC_RAW: u8 = 0x55;
/// Multihash code for sha2-256.
const MULTIHASH_SHA2_256: u8 = 0x12;
/// Digest length in bytes.
const MULTIHASH_LEN: u8 = 0x20;
/// Multibase prefix for lowercase base32 without padding.
const MULTIBASE_BASE32: char = 'b';

const BASE32_ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";

/// Chunk size for streaming file contents through the hasher.
const READ_BUFFER_SIZE: usize = 8192;

/// Computes the content identifier of a file.
///
/// The whole file is streamed through sha2-256; the handle is scoped to this
/// call and closed on every exit path.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn file_cid(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .with_context(|| format!("failed to open {} for hashing", path.display()))?;

    let mut hasher = Sha256::new();
    let mut buffer = [0u8; READ_BUFFER_SIZE];
    loop {
        let read = file
            .read(&mut buffer)
            .with_context(|| format!("failed to read {} for hashing", path.display()))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(encode_digest(&hasher.finalize().into()))
}

/// Renders a sha2-256 digest as a CIDv1 string.
///
/// Every identifier produced here is 59 characters and starts with
/// `bafkrei`.
pub fn encode_digest(digest: &[u8; 32]) -> String {
    let mut bytes = Vec::with_capacity(4 + digest.len());
    bytes.push(CID_VERSION);
    bytes.push(CODEC_RAW);
    bytes.push(MULTIHASH_SHA2_256);
    bytes.push(MULTIHASH_LEN);
    bytes.extend_from_slice(digest);

    let mut encoded = String::with_capacity(1 + (bytes.len() * 8).div_ceil(5));
    encoded.push(MULTIBASE_BASE32);
    base32_lower(&bytes, &mut encoded);
    encoded
}

/// RFC 4648 base32, lowercase alphabet, no padding.
fn base32_lower(bytes: &[u8], out: &mut String) {
    let mut accumulator: u32 = 0;
    let mut bits = 0;

    for &byte in bytes {
        accumulator = (accumulator << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(BASE32_ALPHABET[((accumulator >> bits) & 0x1f) as usize] as char);
        }
    }

    if bits > 0 {
        let padded = (accumulator << (5 - bits)) & 0x1f;
        out.push(BASE32_ALPHABET[padded as usize] as char);
    }
}
