//! Domain name wire encoding and decoding.
//!
//! Names are serialized as length-prefixed labels terminated by a zero byte.
//! Responses may compress names with 2-byte pointers (two high bits of the
//! length byte set, 14-bit offset into the message). Response bytes are
//! attacker-influenced, so the decoder bounds-checks every read and rejects
//! any pointer that does not move strictly backwards; the wire format itself
//! does nothing to prevent infinite pointer loops.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::resolver::error::ResolveError;

/// Maximum length of a single label in octets.
pub const MAX_LABEL_LEN: usize = 63;

/// Maximum encoded length of a full name in octets, including length bytes
/// and the terminating root byte.
pub const MAX_NAME_LEN: usize = 255;

/// Two high bits set in a length byte mark a compression pointer.
const POINTER_MASK: u8 = 0xC0;

/// A validated domain name: an ordered sequence of non-empty labels.
///
/// The root name has zero labels. Construction via [`FromStr`] enforces the
/// label and total length limits, so [`DomainName::encode`] cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainName {
    labels: Vec<String>,
}

impl DomainName {
    /// The labels of this name, in order from most to least specific.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Encoded wire length, including length bytes and the root terminator.
    fn encoded_len(labels: &[String]) -> usize {
        labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }

    /// Serializes the name into wire label format.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::encoded_len(&self.labels));
        for label in &self.labels {
            out.push(label.len() as u8);
            out.extend_from_slice(label.as_bytes());
        }
        out.push(0);
        out
    }

    /// Decodes a name starting at `start`, resolving compression pointers.
    ///
    /// Returns the name and the number of bytes consumed *at the original
    /// offset*: once a pointer is followed, only the pointer's two bytes
    /// count toward consumption, no matter how much of the message the
    /// pointed-to suffix spans.
    ///
    /// # Errors
    ///
    /// `MalformedName` on a truncated buffer, a pointer targeting the
    /// current or a later offset (the loop guard), a pointer chain that does
    /// not move strictly backwards, a reserved label type, or a decoded name
    /// exceeding [`MAX_NAME_LEN`].
    pub fn decode(buffer: &[u8], start: usize) -> Result<(Self, usize), ResolveError> {
        let mut labels: Vec<String> = Vec::new();
        let mut pos = start;
        let mut consumed: Option<usize> = None;
        let mut last_target: Option<usize> = None;
        let mut decoded_len = 0usize;

        loop {
            let len_byte = *buffer.get(pos).ok_or_else(|| {
                ResolveError::MalformedName(format!("name runs past end of buffer at offset {pos}"))
            })?;

            if len_byte & POINTER_MASK == POINTER_MASK {
                let low = *buffer.get(pos + 1).ok_or_else(|| {
                    ResolveError::MalformedName(format!(
                        "compression pointer cut short at offset {pos}"
                    ))
                })?;
                let target = (usize::from(len_byte & !POINTER_MASK) << 8) | usize::from(low);

                // Loop guard: a pointer may only reference an earlier part of
                // the message, and chained pointers must keep moving
                // backwards. Anything else cannot terminate.
                if target >= pos {
                    return Err(ResolveError::MalformedName(format!(
                        "compression pointer at offset {pos} targets offset {target} (current or later)"
                    )));
                }
                if let Some(prev) = last_target {
                    if target >= prev {
                        return Err(ResolveError::MalformedName(format!(
                            "compression pointer chain does not move backwards ({prev} -> {target})"
                        )));
                    }
                }

                if consumed.is_none() {
                    consumed = Some(pos + 2 - start);
                }
                last_target = Some(target);
                pos = target;
            } else if len_byte & POINTER_MASK != 0 {
                // 0x40/0x80 label types are reserved and never valid here
                return Err(ResolveError::MalformedName(format!(
                    "reserved label type {len_byte:#04x} at offset {pos}"
                )));
            } else if len_byte == 0 {
                let consumed = consumed.unwrap_or_else(|| pos + 1 - start);
                return Ok((DomainName { labels }, consumed));
            } else {
                let len = usize::from(len_byte);
                let end = pos + 1 + len;
                if end > buffer.len() {
                    return Err(ResolveError::MalformedName(format!(
                        "label at offset {pos} runs past end of buffer"
                    )));
                }
                decoded_len += len + 1;
                if decoded_len + 1 > MAX_NAME_LEN {
                    return Err(ResolveError::MalformedName(format!(
                        "decoded name exceeds {MAX_NAME_LEN} bytes"
                    )));
                }
                labels.push(String::from_utf8_lossy(&buffer[pos + 1..end]).into_owned());
                pos = end;
            }
        }
    }
}

impl FromStr for DomainName {
    type Err = ResolveError;

    /// Parses a human-readable dotted name, validating length rules.
    ///
    /// A single trailing dot (explicit root) is accepted. Fails with
    /// `InvalidName` on an empty name, an empty interior label, a label over
    /// 63 octets, or a total encoded length over 255 octets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_suffix('.').unwrap_or(s);
        if trimmed.is_empty() {
            return Err(ResolveError::InvalidName("empty name".to_string()));
        }

        let mut labels = Vec::new();
        for label in trimmed.split('.') {
            if label.is_empty() {
                return Err(ResolveError::InvalidName(format!("empty label in {s:?}")));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(ResolveError::InvalidName(format!(
                    "label {:?} exceeds {MAX_LABEL_LEN} octets",
                    label
                )));
            }
            labels.push(label.to_string());
        }

        if Self::encoded_len(&labels) > MAX_NAME_LEN {
            return Err(ResolveError::InvalidName(format!(
                "encoded name length exceeds {MAX_NAME_LEN} octets"
            )));
        }

        Ok(DomainName { labels })
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return f.write_str(".");
        }
        f.write_str(&self.labels.join("."))
    }
}

impl Serialize for DomainName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> DomainName {
        s.parse().expect("valid name")
    }

    #[test]
    fn encode_simple_name() {
        let encoded = name("mail.example.com").encode();
        assert_eq!(
            encoded,
            [
                &[4u8][..],
                b"mail",
                &[7],
                b"example",
                &[3],
                b"com",
                &[0]
            ]
            .concat()
        );
    }

    #[test]
    fn decode_encode_round_trip() {
        for raw in ["example.com", "a.b.c.d.e", "xn--nxasmq6b.example", "www.example.com."] {
            let original = name(raw);
            let encoded = original.encode();
            let (decoded, consumed) = DomainName::decode(&encoded, 0).unwrap();
            assert_eq!(decoded, original, "round trip failed for {raw}");
            assert_eq!(consumed, encoded.len());
        }
    }

    #[test]
    fn parse_rejects_empty_name() {
        assert!(matches!(
            "".parse::<DomainName>(),
            Err(ResolveError::InvalidName(_))
        ));
        assert!(matches!(
            ".".parse::<DomainName>(),
            Err(ResolveError::InvalidName(_))
        ));
    }

    #[test]
    fn parse_rejects_empty_interior_label() {
        assert!(matches!(
            "a..b".parse::<DomainName>(),
            Err(ResolveError::InvalidName(_))
        ));
    }

    #[test]
    fn parse_rejects_oversize_label() {
        let long = "a".repeat(64);
        assert!(matches!(
            format!("{long}.com").parse::<DomainName>(),
            Err(ResolveError::InvalidName(_))
        ));
        // 63 is still fine
        assert!(format!("{}.com", "a".repeat(63)).parse::<DomainName>().is_ok());
    }

    #[test]
    fn parse_rejects_oversize_name() {
        // Five 62-byte labels encode to 5 * 63 + 1 = 316 bytes
        let long = vec!["a".repeat(62); 5].join(".");
        assert!(matches!(
            long.parse::<DomainName>(),
            Err(ResolveError::InvalidName(_))
        ));
    }

    #[test]
    fn decode_truncated_buffer_fails() {
        // Label claims 7 bytes but only 3 follow
        let buf = [7u8, b'e', b'x', b'a'];
        assert!(matches!(
            DomainName::decode(&buf, 0),
            Err(ResolveError::MalformedName(_))
        ));
    }

    #[test]
    fn decode_missing_terminator_fails() {
        let buf = [3u8, b'c', b'o', b'm'];
        assert!(matches!(
            DomainName::decode(&buf, 0),
            Err(ResolveError::MalformedName(_))
        ));
    }

    #[test]
    fn decode_follows_backward_pointer() {
        // Offset 0: "example.com"; offset 13: "mail" + pointer to 0
        let mut buf = name("example.com").encode();
        let suffix_start = buf.len();
        buf.push(4);
        buf.extend_from_slice(b"mail");
        buf.extend_from_slice(&[0xC0, 0x00]);

        let (decoded, consumed) = DomainName::decode(&buf, suffix_start).unwrap();
        assert_eq!(decoded, name("mail.example.com"));
        // 1 length byte + 4 label bytes + 2 pointer bytes
        assert_eq!(consumed, 7);
    }

    #[test]
    fn decode_rejects_self_pointer() {
        let buf = [0xC0u8, 0x00];
        // Pointer at offset 0 targeting offset 0
        assert!(matches!(
            DomainName::decode(&buf, 0),
            Err(ResolveError::MalformedName(_))
        ));
    }

    #[test]
    fn decode_rejects_forward_pointer() {
        // Pointer at offset 0 targets offset 4, which lies ahead
        let buf = [0xC0u8, 0x04, 0, 0, 3, b'c', b'o', b'm', 0];
        assert!(matches!(
            DomainName::decode(&buf, 0),
            Err(ResolveError::MalformedName(_))
        ));
    }

    #[test]
    fn decode_rejects_pointer_cycle() {
        // Offset 0: label "a" then pointer to 6
        // Offset 6: label "b" then pointer back to 0 -> chain 6 -> 0 -> 6
        // The second hop (0 -> 6) does not move backwards and must be refused.
        let buf = [
            1u8, b'a', 0xC0, 0x06, 0, 0, // offset 0..6 (padding at 4..6)
            1, b'b', 0xC0, 0x00, // offset 6..10
        ];
        assert!(matches!(
            DomainName::decode(&buf, 6),
            Err(ResolveError::MalformedName(_))
        ));
    }

    #[test]
    fn decode_rejects_pointer_past_buffer_end() {
        let buf = [0xC0u8];
        assert!(matches!(
            DomainName::decode(&buf, 0),
            Err(ResolveError::MalformedName(_))
        ));
    }

    #[test]
    fn decode_rejects_reserved_label_type() {
        let buf = [0x40u8, 0x00];
        assert!(matches!(
            DomainName::decode(&buf, 0),
            Err(ResolveError::MalformedName(_))
        ));
    }

    #[test]
    fn decode_rejects_oversize_assembled_name() {
        // Labels that individually fit but assemble past 255 bytes
        let mut buf = Vec::new();
        for _ in 0..5 {
            buf.push(62);
            buf.extend_from_slice(&[b'x'; 62]);
        }
        buf.push(0);
        assert!(matches!(
            DomainName::decode(&buf, 0),
            Err(ResolveError::MalformedName(_))
        ));
    }

    #[test]
    fn root_name_decodes_to_zero_labels() {
        let (decoded, consumed) = DomainName::decode(&[0u8], 0).unwrap();
        assert!(decoded.labels().is_empty());
        assert_eq!(consumed, 1);
        assert_eq!(decoded.to_string(), ".");
    }

    #[test]
    fn trailing_dot_is_normalized() {
        assert_eq!(name("example.com."), name("example.com"));
    }
}
