//! DNS message construction and parsing.
//!
//! [`build_query`] produces a standard query (header + single question);
//! [`parse_response`] walks the header, question echo, answer, authority,
//! and additional sections and extracts typed answer records. Response bytes
//! come straight off the network, so every multi-byte read is bounds-checked
//! and section counts are verified against the actual buffer contents: a
//! header that declares three answers over a two-record buffer is an error,
//! never a silent partial result.

use crate::resolver::error::ResolveError;
use crate::resolver::name::DomainName;
use crate::resolver::record::{QueryResult, QueryType, RecordData, ResourceRecord, ResponseCode};

/// Fixed DNS header size in bytes.
pub const HEADER_LEN: usize = 12;

/// Recursion-desired flag bit.
const FLAG_RD: u16 = 0x0100;

/// Query/response flag bit (set in responses).
const FLAG_QR: u16 = 0x8000;

/// The Internet class; the only class this engine speaks.
const CLASS_IN: u16 = 1;

/// Fixed-size tail of a resource record after its owner name:
/// type (2) + class (2) + TTL (4) + RDLENGTH (2).
const RR_FIXED_LEN: usize = 10;

/// Parsed 12-byte message header.
#[derive(Debug, Clone, Copy)]
struct Header {
    id: u16,
    flags: u16,
    qdcount: u16,
    ancount: u16,
    nscount: u16,
    arcount: u16,
}

impl Header {
    fn parse(buffer: &[u8]) -> Result<Self, ResolveError> {
        if buffer.len() < HEADER_LEN {
            return Err(ResolveError::Truncated(format!(
                "response is {} bytes, shorter than the {HEADER_LEN}-byte header",
                buffer.len()
            )));
        }
        Ok(Header {
            id: u16::from_be_bytes([buffer[0], buffer[1]]),
            flags: u16::from_be_bytes([buffer[2], buffer[3]]),
            qdcount: u16::from_be_bytes([buffer[4], buffer[5]]),
            ancount: u16::from_be_bytes([buffer[6], buffer[7]]),
            nscount: u16::from_be_bytes([buffer[8], buffer[9]]),
            arcount: u16::from_be_bytes([buffer[10], buffer[11]]),
        })
    }

    /// 4-bit RCODE from the low bits of the flags word.
    fn rcode(&self) -> u8 {
        (self.flags & 0x000F) as u8
    }

    fn is_response(&self) -> bool {
        self.flags & FLAG_QR != 0
    }
}

/// Builds the wire bytes of a standard query for `name`/`qtype`.
///
/// Layout: `id`, flags (opcode 0, RD set), QDCOUNT=1, zero counts for the
/// other sections, then the encoded question (name + type + class IN).
/// Deterministic given the same `id`; the transaction ID is the only
/// randomized field and is drawn by the caller.
pub fn build_query(name: &DomainName, qtype: QueryType, id: u16) -> Vec<u8> {
    let encoded_name = name.encode();
    let mut buf = Vec::with_capacity(HEADER_LEN + encoded_name.len() + 4);
    buf.extend_from_slice(&id.to_be_bytes());
    buf.extend_from_slice(&FLAG_RD.to_be_bytes());
    buf.extend_from_slice(&1u16.to_be_bytes()); // QDCOUNT
    buf.extend_from_slice(&0u16.to_be_bytes()); // ANCOUNT
    buf.extend_from_slice(&0u16.to_be_bytes()); // NSCOUNT
    buf.extend_from_slice(&0u16.to_be_bytes()); // ARCOUNT
    buf.extend_from_slice(&encoded_name);
    buf.extend_from_slice(&qtype.code().to_be_bytes());
    buf.extend_from_slice(&CLASS_IN.to_be_bytes());
    buf
}

/// Parses a response buffer into a [`QueryResult`].
///
/// Answer records whose type matches `wanted` are returned; records of other
/// types (a CNAME interleaved with A answers, say) are decoded and skipped.
/// Authority and additional sections are walked to validate the declared
/// layout, then discarded.
///
/// # Errors
///
/// * `TransactionMismatch`: response ID differs from `expected_id`.
/// * `Truncated`: buffer shorter than the header, or a declared section
///   runs past the buffer end.
/// * `MalformedName` / `MalformedRecord`: undecodable names or payloads.
///
/// A nonzero RCODE is not an error: the result carries the code with an
/// empty record list.
pub fn parse_response(
    buffer: &[u8],
    expected_id: u16,
    wanted: QueryType,
) -> Result<QueryResult, ResolveError> {
    let header = Header::parse(buffer)?;
    if header.id != expected_id {
        return Err(ResolveError::TransactionMismatch {
            expected: expected_id,
            actual: header.id,
        });
    }
    if !header.is_response() {
        return Err(ResolveError::MalformedRecord(
            "QR flag not set: message is a query, not a response".to_string(),
        ));
    }

    let mut pos = HEADER_LEN;

    // Question section: the server echoes the question back; skip over it.
    for _ in 0..header.qdcount {
        let (_, name_len) = DomainName::decode(buffer, pos)?;
        pos += name_len;
        if pos + 4 > buffer.len() {
            return Err(ResolveError::Truncated(
                "question section runs past end of buffer".to_string(),
            ));
        }
        pos += 4; // QTYPE + QCLASS
    }

    let response_code = ResponseCode::from_code(header.rcode());

    let mut records = Vec::new();
    for _ in 0..header.ancount {
        let (record, consumed) = parse_record(buffer, pos, "answer")?;
        pos += consumed;
        if let Some(record) = record {
            if record.rtype == wanted {
                records.push(record);
            }
        }
    }

    // Authority and additional records are parsed to advance (and validate)
    // the buffer, but never surfaced.
    let trailing = u32::from(header.nscount) + u32::from(header.arcount);
    for _ in 0..trailing {
        let (_, consumed) = parse_record(buffer, pos, "authority/additional")?;
        pos += consumed;
    }

    Ok(QueryResult {
        records,
        response_code,
    })
}

/// Parses one resource record starting at `start`.
///
/// Returns `None` for record types this engine has no decoder for (still
/// consuming the declared RDLENGTH so the walk stays aligned).
fn parse_record(
    buffer: &[u8],
    start: usize,
    section: &str,
) -> Result<(Option<ResourceRecord>, usize), ResolveError> {
    let (name, name_len) = DomainName::decode(buffer, start)?;
    let fixed_start = start + name_len;
    if fixed_start + RR_FIXED_LEN > buffer.len() {
        return Err(ResolveError::Truncated(format!(
            "{section} record header runs past end of buffer"
        )));
    }

    let rtype_code = read_u16(buffer, fixed_start);
    let _class = read_u16(buffer, fixed_start + 2);
    let ttl = read_u32(buffer, fixed_start + 4);
    let rdlength = usize::from(read_u16(buffer, fixed_start + 8));

    let rdata_start = fixed_start + RR_FIXED_LEN;
    let rdata_end = rdata_start + rdlength;
    if rdata_end > buffer.len() {
        return Err(ResolveError::Truncated(format!(
            "{section} record data ({rdlength} bytes) runs past end of buffer"
        )));
    }
    let consumed = rdata_end - start;

    let Some(rtype) = QueryType::from_code(rtype_code) else {
        return Ok((None, consumed));
    };

    let data = decode_rdata(rtype, buffer, rdata_start, rdlength)?;
    Ok((
        Some(ResourceRecord {
            name,
            rtype,
            ttl,
            data,
        }),
        consumed,
    ))
}

/// Decodes a type-specific payload at `start..start + rdlength`.
///
/// Name-bearing payloads (MX, NS, CNAME, SOA) may compress against earlier
/// parts of the message, so the whole buffer is passed through. Whatever the
/// decoder consumes must equal the declared RDLENGTH exactly.
fn decode_rdata(
    rtype: QueryType,
    buffer: &[u8],
    start: usize,
    rdlength: usize,
) -> Result<RecordData, ResolveError> {
    match rtype {
        QueryType::A => {
            if rdlength != 4 {
                return Err(ResolveError::MalformedRecord(format!(
                    "A record data is {rdlength} bytes, expected 4"
                )));
            }
            let octets: [u8; 4] = buffer[start..start + 4].try_into().expect("length checked");
            Ok(RecordData::A(octets.into()))
        }
        QueryType::Aaaa => {
            if rdlength != 16 {
                return Err(ResolveError::MalformedRecord(format!(
                    "AAAA record data is {rdlength} bytes, expected 16"
                )));
            }
            let octets: [u8; 16] = buffer[start..start + 16]
                .try_into()
                .expect("length checked");
            Ok(RecordData::Aaaa(octets.into()))
        }
        QueryType::Ns => {
            let (name, consumed) = DomainName::decode(buffer, start)?;
            check_rdata_consumed("NS", consumed, rdlength)?;
            Ok(RecordData::Ns(name))
        }
        QueryType::Cname => {
            let (name, consumed) = DomainName::decode(buffer, start)?;
            check_rdata_consumed("CNAME", consumed, rdlength)?;
            Ok(RecordData::Cname(name))
        }
        QueryType::Mx => {
            if rdlength < 3 {
                return Err(ResolveError::MalformedRecord(format!(
                    "MX record data is {rdlength} bytes, too short for preference + exchange"
                )));
            }
            let preference = read_u16(buffer, start);
            let (exchange, consumed) = DomainName::decode(buffer, start + 2)?;
            check_rdata_consumed("MX", 2 + consumed, rdlength)?;
            Ok(RecordData::Mx {
                preference,
                exchange,
            })
        }
        QueryType::Txt => {
            let mut strings = Vec::new();
            let mut pos = start;
            let end = start + rdlength;
            while pos < end {
                let len = usize::from(buffer[pos]);
                let seg_end = pos + 1 + len;
                if seg_end > end {
                    return Err(ResolveError::MalformedRecord(
                        "TXT character string runs past record data".to_string(),
                    ));
                }
                strings.push(buffer[pos + 1..seg_end].to_vec());
                pos = seg_end;
            }
            Ok(RecordData::Txt(strings))
        }
        QueryType::Soa => {
            let (mname, mname_len) = DomainName::decode(buffer, start)?;
            let (rname, rname_len) = DomainName::decode(buffer, start + mname_len)?;
            let numbers = start + mname_len + rname_len;
            check_rdata_consumed("SOA", mname_len + rname_len + 20, rdlength)?;
            Ok(RecordData::Soa {
                mname,
                rname,
                serial: read_u32(buffer, numbers),
                refresh: read_u32(buffer, numbers + 4),
                retry: read_u32(buffer, numbers + 8),
                expire: read_u32(buffer, numbers + 12),
                minimum: read_u32(buffer, numbers + 16),
            })
        }
    }
}

fn check_rdata_consumed(rtype: &str, consumed: usize, rdlength: usize) -> Result<(), ResolveError> {
    if consumed != rdlength {
        return Err(ResolveError::MalformedRecord(format!(
            "{rtype} record data declares {rdlength} bytes but decoder consumed {consumed}"
        )));
    }
    Ok(())
}

/// Reads a big-endian u16. Callers must have bounds-checked `pos + 2`.
fn read_u16(buffer: &[u8], pos: usize) -> u16 {
    u16::from_be_bytes([buffer[pos], buffer[pos + 1]])
}

/// Reads a big-endian u32. Callers must have bounds-checked `pos + 4`.
fn read_u32(buffer: &[u8], pos: usize) -> u32 {
    u32::from_be_bytes([
        buffer[pos],
        buffer[pos + 1],
        buffer[pos + 2],
        buffer[pos + 3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::record::ResponseCode;

    fn name(s: &str) -> DomainName {
        s.parse().expect("valid name")
    }

    /// Hand-built response writer used across the parser tests.
    struct ResponseBuilder {
        buf: Vec<u8>,
        ancount: u16,
        nscount: u16,
        arcount: u16,
    }

    impl ResponseBuilder {
        fn new(id: u16, rcode: u8, question: &str, qtype: QueryType) -> Self {
            let mut buf = Vec::new();
            buf.extend_from_slice(&id.to_be_bytes());
            buf.extend_from_slice(&(0x8180u16 | u16::from(rcode)).to_be_bytes());
            buf.extend_from_slice(&1u16.to_be_bytes()); // QDCOUNT
            buf.extend_from_slice(&[0u8; 6]); // AN/NS/AR patched in finish()
            buf.extend_from_slice(&name(question).encode());
            buf.extend_from_slice(&qtype.code().to_be_bytes());
            buf.extend_from_slice(&1u16.to_be_bytes());
            ResponseBuilder {
                buf,
                ancount: 0,
                nscount: 0,
                arcount: 0,
            }
        }

        fn raw_record(&mut self, owner: &[u8], rtype: u16, ttl: u32, rdata: &[u8]) -> &mut Self {
            self.buf.extend_from_slice(owner);
            self.buf.extend_from_slice(&rtype.to_be_bytes());
            self.buf.extend_from_slice(&1u16.to_be_bytes());
            self.buf.extend_from_slice(&ttl.to_be_bytes());
            self.buf
                .extend_from_slice(&(rdata.len() as u16).to_be_bytes());
            self.buf.extend_from_slice(rdata);
            self
        }

        fn answer(&mut self, owner: &str, rtype: QueryType, ttl: u32, rdata: &[u8]) -> &mut Self {
            self.ancount += 1;
            self.raw_record(&name(owner).encode(), rtype.code(), ttl, rdata)
        }

        fn authority(&mut self, owner: &str, rtype: QueryType, ttl: u32, rdata: &[u8]) -> &mut Self {
            self.nscount += 1;
            self.raw_record(&name(owner).encode(), rtype.code(), ttl, rdata)
        }

        fn finish(&self) -> Vec<u8> {
            let mut buf = self.buf.clone();
            buf[6..8].copy_from_slice(&self.ancount.to_be_bytes());
            buf[8..10].copy_from_slice(&self.nscount.to_be_bytes());
            buf[10..12].copy_from_slice(&self.arcount.to_be_bytes());
            buf
        }

        /// Declares `extra` more answers than were actually appended.
        fn finish_overdeclared(&self, extra: u16) -> Vec<u8> {
            let mut buf = self.finish();
            buf[6..8].copy_from_slice(&(self.ancount + extra).to_be_bytes());
            buf
        }
    }

    #[test]
    fn build_query_layout() {
        let query = build_query(&name("example.com"), QueryType::A, 0xBEEF);
        assert_eq!(&query[0..2], &[0xBE, 0xEF]);
        assert_eq!(&query[2..4], &[0x01, 0x00]); // RD only
        assert_eq!(&query[4..6], &[0x00, 0x01]); // QDCOUNT = 1
        assert_eq!(&query[6..12], &[0u8; 6]); // no other sections
        let encoded_name = name("example.com").encode();
        assert_eq!(&query[12..12 + encoded_name.len()], &encoded_name[..]);
        let tail = 12 + encoded_name.len();
        assert_eq!(&query[tail..tail + 2], &[0x00, 0x01]); // type A
        assert_eq!(&query[tail + 2..tail + 4], &[0x00, 0x01]); // class IN
        assert_eq!(query.len(), tail + 4);
    }

    #[test]
    fn build_query_deterministic_given_id() {
        let a = build_query(&name("example.com"), QueryType::Mx, 42);
        let b = build_query(&name("example.com"), QueryType::Mx, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn parse_single_a_record() {
        let response = ResponseBuilder::new(7, 0, "example.com", QueryType::A)
            .answer("example.com", QueryType::A, 300, &[93, 184, 216, 34])
            .finish();
        let result = parse_response(&response, 7, QueryType::A).unwrap();
        assert_eq!(result.response_code, ResponseCode::NoError);
        assert_eq!(result.records.len(), 1);
        let record = &result.records[0];
        assert_eq!(record.ttl, 300);
        assert_eq!(record.data, RecordData::A("93.184.216.34".parse().unwrap()));
    }

    #[test]
    fn parse_aaaa_record() {
        let addr: std::net::Ipv6Addr = "2606:2800:220:1:248:1893:25c8:1946".parse().unwrap();
        let response = ResponseBuilder::new(7, 0, "example.com", QueryType::Aaaa)
            .answer("example.com", QueryType::Aaaa, 60, &addr.octets())
            .finish();
        let result = parse_response(&response, 7, QueryType::Aaaa).unwrap();
        assert_eq!(result.records[0].data, RecordData::Aaaa(addr));
    }

    #[test]
    fn parse_mx_record() {
        // Captured-shape MX payload: preference 10, exchange mail.example.com
        let mut rdata = vec![0u8, 10];
        rdata.extend_from_slice(&name("mail.example.com").encode());
        let response = ResponseBuilder::new(0x1111, 0, "example.com", QueryType::Mx)
            .answer("example.com", QueryType::Mx, 3600, &rdata)
            .finish();
        let result = parse_response(&response, 0x1111, QueryType::Mx).unwrap();
        assert_eq!(result.records.len(), 1);
        let record = &result.records[0];
        assert_eq!(record.ttl, 3600);
        assert_eq!(
            record.data,
            RecordData::Mx {
                preference: 10,
                exchange: name("mail.example.com"),
            }
        );
    }

    #[test]
    fn parse_txt_multiple_strings() {
        let rdata = [
            &[11u8][..],
            b"v=spf1 -all",
            &[5],
            b"hello",
        ]
        .concat();
        let response = ResponseBuilder::new(1, 0, "example.com", QueryType::Txt)
            .answer("example.com", QueryType::Txt, 120, &rdata)
            .finish();
        let result = parse_response(&response, 1, QueryType::Txt).unwrap();
        assert_eq!(
            result.records[0].data,
            RecordData::Txt(vec![b"v=spf1 -all".to_vec(), b"hello".to_vec()])
        );
    }

    #[test]
    fn parse_txt_preserves_non_utf8_bytes() {
        let rdata = [3u8, 0xC3, 0x28, 0xFF];
        let response = ResponseBuilder::new(15, 0, "example.com", QueryType::Txt)
            .answer("example.com", QueryType::Txt, 60, &rdata)
            .finish();
        let result = parse_response(&response, 15, QueryType::Txt).unwrap();
        assert_eq!(
            result.records[0].data,
            RecordData::Txt(vec![vec![0xC3, 0x28, 0xFF]])
        );
    }

    #[test]
    fn parse_soa_record() {
        let mut rdata = name("ns1.example.com").encode();
        rdata.extend_from_slice(&name("hostmaster.example.com").encode());
        for value in [2024010101u32, 7200, 900, 1209600, 86400] {
            rdata.extend_from_slice(&value.to_be_bytes());
        }
        let response = ResponseBuilder::new(2, 0, "example.com", QueryType::Soa)
            .answer("example.com", QueryType::Soa, 900, &rdata)
            .finish();
        let result = parse_response(&response, 2, QueryType::Soa).unwrap();
        match &result.records[0].data {
            RecordData::Soa {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => {
                assert_eq!(mname, &name("ns1.example.com"));
                assert_eq!(rname, &name("hostmaster.example.com"));
                assert_eq!(*serial, 2024010101);
                assert_eq!(*refresh, 7200);
                assert_eq!(*retry, 900);
                assert_eq!(*expire, 1209600);
                assert_eq!(*minimum, 86400);
            }
            other => panic!("expected SOA data, got {other:?}"),
        }
    }

    #[test]
    fn parse_compressed_owner_and_exchange() {
        // Owner compressed against the question name; MX exchange compressed
        // against the owner. The question name sits at offset 12.
        let mut builder = ResponseBuilder::new(9, 0, "example.com", QueryType::Mx);
        let pointer_to_question = [0xC0u8, 12];
        let mut rdata = vec![0u8, 5];
        rdata.push(4);
        rdata.extend_from_slice(b"mail");
        rdata.extend_from_slice(&pointer_to_question);
        builder.ancount += 1;
        builder.raw_record(&pointer_to_question, QueryType::Mx.code(), 60, &rdata);
        let response = builder.finish();

        let result = parse_response(&response, 9, QueryType::Mx).unwrap();
        let record = &result.records[0];
        assert_eq!(record.name, name("example.com"));
        assert_eq!(
            record.data,
            RecordData::Mx {
                preference: 5,
                exchange: name("mail.example.com"),
            }
        );
    }

    #[test]
    fn transaction_mismatch_is_rejected() {
        let response = ResponseBuilder::new(0x2222, 0, "example.com", QueryType::A)
            .answer("example.com", QueryType::A, 60, &[1, 2, 3, 4])
            .finish();
        assert!(matches!(
            parse_response(&response, 0x3333, QueryType::A),
            Err(ResolveError::TransactionMismatch {
                expected: 0x3333,
                actual: 0x2222,
            })
        ));
    }

    #[test]
    fn short_header_is_truncated() {
        assert!(matches!(
            parse_response(&[0u8; 11], 0, QueryType::A),
            Err(ResolveError::Truncated(_))
        ));
    }

    #[test]
    fn overdeclared_ancount_is_truncated() {
        // Header says 3 answers, buffer holds 2: hard error, no partials.
        let response = ResponseBuilder::new(4, 0, "example.com", QueryType::A)
            .answer("example.com", QueryType::A, 60, &[1, 2, 3, 4])
            .answer("example.com", QueryType::A, 60, &[5, 6, 7, 8])
            .finish_overdeclared(1);
        assert!(matches!(
            parse_response(&response, 4, QueryType::A),
            Err(ResolveError::Truncated(_))
        ));
    }

    #[test]
    fn wrong_rdlength_for_a_record_is_malformed() {
        let response = ResponseBuilder::new(5, 0, "example.com", QueryType::A)
            .answer("example.com", QueryType::A, 60, &[1, 2, 3])
            .finish();
        assert!(matches!(
            parse_response(&response, 5, QueryType::A),
            Err(ResolveError::MalformedRecord(_))
        ));
    }

    #[test]
    fn rdlength_disagreeing_with_name_decoder_is_malformed() {
        // CNAME whose rdata holds the name plus a trailing junk byte
        let mut rdata = name("alias.example.com").encode();
        rdata.push(0xFF);
        let response = ResponseBuilder::new(6, 0, "example.com", QueryType::Cname)
            .answer("example.com", QueryType::Cname, 60, &rdata)
            .finish();
        assert!(matches!(
            parse_response(&response, 6, QueryType::Cname),
            Err(ResolveError::MalformedRecord(_))
        ));
    }

    #[test]
    fn nxdomain_surfaces_as_data_not_error() {
        let response =
            ResponseBuilder::new(8, 3, "nonexistent-xyz.example", QueryType::A).finish();
        let result = parse_response(&response, 8, QueryType::A).unwrap();
        assert_eq!(result.response_code, ResponseCode::NxDomain);
        assert!(result.records.is_empty());
        assert!(!result.is_success());
    }

    #[test]
    fn interleaved_cname_is_skipped_for_a_query() {
        let cname_rdata = name("canonical.example.com").encode();
        let response = ResponseBuilder::new(10, 0, "www.example.com", QueryType::A)
            .answer("www.example.com", QueryType::Cname, 60, &cname_rdata)
            .answer("canonical.example.com", QueryType::A, 60, &[10, 0, 0, 1])
            .finish();
        let result = parse_response(&response, 10, QueryType::A).unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].rtype, QueryType::A);

        // Same buffer, CNAME requested: only the CNAME comes back.
        let result = parse_response(&response, 10, QueryType::Cname).unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].rtype, QueryType::Cname);
    }

    #[test]
    fn unknown_record_type_is_skipped() {
        // Type 257 (CAA) has no decoder here; the walk must stay aligned.
        let mut builder = ResponseBuilder::new(11, 0, "example.com", QueryType::A);
        builder.ancount += 2;
        builder.raw_record(&name("example.com").encode(), 257, 60, &[0, 5, b'i']);
        builder.raw_record(
            &name("example.com").encode(),
            QueryType::A.code(),
            60,
            &[10, 0, 0, 2],
        );
        let result = parse_response(&builder.finish(), 11, QueryType::A).unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].data, RecordData::A("10.0.0.2".parse().unwrap()));
    }

    #[test]
    fn authority_section_is_walked_and_discarded() {
        let mut soa_rdata = name("ns1.example.com").encode();
        soa_rdata.extend_from_slice(&name("hostmaster.example.com").encode());
        for value in [1u32, 2, 3, 4, 5] {
            soa_rdata.extend_from_slice(&value.to_be_bytes());
        }
        let response = ResponseBuilder::new(12, 0, "example.com", QueryType::A)
            .answer("example.com", QueryType::A, 60, &[10, 0, 0, 3])
            .authority("example.com", QueryType::Soa, 900, &soa_rdata)
            .finish();
        let result = parse_response(&response, 12, QueryType::A).unwrap();
        // The SOA lives in the authority section and must not surface.
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].rtype, QueryType::A);
    }

    #[test]
    fn truncated_authority_section_is_detected() {
        let mut response = ResponseBuilder::new(13, 0, "example.com", QueryType::A)
            .answer("example.com", QueryType::A, 60, &[10, 0, 0, 4])
            .finish();
        // Declare an authority record that does not exist
        response[8..10].copy_from_slice(&1u16.to_be_bytes());
        assert!(matches!(
            parse_response(&response, 13, QueryType::A),
            Err(ResolveError::Truncated(_))
        ));
    }

    #[test]
    fn txt_string_overrunning_rdata_is_malformed() {
        // Character string claims 20 bytes inside a 6-byte rdata
        let rdata = [20u8, b'a', b'b', b'c', b'd', b'e'];
        let response = ResponseBuilder::new(14, 0, "example.com", QueryType::Txt)
            .answer("example.com", QueryType::Txt, 60, &rdata)
            .finish();
        assert!(matches!(
            parse_response(&response, 14, QueryType::Txt),
            Err(ResolveError::MalformedRecord(_))
        ));
    }

    #[test]
    fn query_message_is_rejected_as_response() {
        let query = build_query(&name("example.com"), QueryType::A, 21);
        assert!(matches!(
            parse_response(&query, 21, QueryType::A),
            Err(ResolveError::MalformedRecord(_))
        ));
    }
}
