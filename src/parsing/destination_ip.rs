use anyhow::{Result, bail};
use std::net::Ipv4Addr;

/// Decodes a `destination_ip` label rendered as a byte array.
///
/// `"[0 0 0 0 0 0 0 0 0 0 255 255 10 2 1 84]"` becomes `"10.2.1.84"`.
/// Only the last four bytes are used, which covers both the IPv4-mapped
/// IPv6 form and a plain four byte array.
pub fn parse_destination_ip(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.len() < 7 {
        bail!("Illegal string: {:?}", raw);
    }

    let content = match raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        Some(content) => content,
        None => bail!("Not a byte array: {:?}", raw),
    };

    let bytes = content
        .split_whitespace()
        .map(|item| item.parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()?;
    if bytes.len() < 4 {
        bail!("Expected at least 4 bytes, got {}", bytes.len());
    }

    let tail = &bytes[bytes.len() - 4..];
    Ok(Ipv4Addr::new(tail[0], tail[1], tail[2], tail[3]).to_string())
}
