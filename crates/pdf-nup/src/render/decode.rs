//! Content stream decoding
//!
//! Imported page content is written into an unfiltered form stream, so
//! every filter in the source stream's chain has to be undone first.
//! Flate, LZW and ASCII85 go through lopdf; ASCIIHex and RunLength are
//! decoded here. Any other filter is an error rather than a silent copy of
//! encoded bytes.

use crate::types::{ImposeError, Result};
use lopdf::{Dictionary, Document, Object, Stream};

/// Fully decoded bytes of a content stream.
pub fn decode_stream(doc: &Document, stream: &Stream) -> Result<Vec<u8>> {
    let filters = filter_names(doc, &stream.dict)?;
    if filters.is_empty() {
        return Ok(stream.content.clone());
    }

    let params = stream
        .dict
        .get(b"DecodeParms")
        .or_else(|_| stream.dict.get(b"DP"))
        .ok()
        .map(|obj| resolve(doc, obj));

    let mut data = stream.content.clone();
    for (i, filter) in filters.iter().enumerate() {
        let param = match params {
            Some(Object::Array(items)) => items.get(i).map(|obj| resolve(doc, obj)),
            Some(param) if filters.len() == 1 => Some(param),
            _ => None,
        };
        data = apply_filter(filter, param, data)?;
    }

    Ok(data)
}

/// `Filter` entry as a list of names (a single name or an array).
fn filter_names(doc: &Document, dict: &Dictionary) -> Result<Vec<Vec<u8>>> {
    let Ok(filter) = dict.get(b"Filter") else {
        return Ok(Vec::new());
    };

    let name = |obj: &Object| {
        resolve(doc, obj)
            .as_name()
            .map(<[u8]>::to_vec)
            .map_err(|_| ImposeError::ContentDecode("filter is not a name".to_string()))
    };

    match resolve(doc, filter) {
        Object::Array(items) => items.iter().map(name).collect(),
        Object::Null => Ok(Vec::new()),
        single => Ok(vec![name(single)?]),
    }
}

fn apply_filter(filter: &[u8], param: Option<&Object>, data: Vec<u8>) -> Result<Vec<u8>> {
    match filter {
        b"ASCIIHexDecode" | b"AHx" => decode_ascii_hex(&data),
        b"RunLengthDecode" | b"RL" => decode_run_length(&data),
        b"FlateDecode" | b"Fl" => decode_with_lopdf(b"FlateDecode", param, data),
        b"LZWDecode" | b"LZW" => decode_with_lopdf(b"LZWDecode", param, data),
        b"ASCII85Decode" | b"A85" => decode_with_lopdf(b"ASCII85Decode", param, data),
        other => Err(ImposeError::ContentDecode(format!(
            "unsupported filter /{}",
            String::from_utf8_lossy(other)
        ))),
    }
}

/// Run one filter through lopdf's decoder.
fn decode_with_lopdf(filter: &[u8], param: Option<&Object>, data: Vec<u8>) -> Result<Vec<u8>> {
    let mut dict = Dictionary::from_iter(vec![("Filter", Object::Name(filter.to_vec()))]);
    if let Some(param) = param {
        dict.set("DecodeParms", param.clone());
    }
    Ok(Stream::new(dict, data).decompressed_content()?)
}

/// ASCIIHexDecode: whitespace is ignored, `>` ends the data and an odd
/// final digit is padded with 0.
pub fn decode_ascii_hex(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len() / 2);
    let mut high: Option<u8> = None;

    for &byte in data {
        if byte == b'>' {
            break;
        }
        if byte.is_ascii_whitespace() {
            continue;
        }

        let digit = (byte as char).to_digit(16).ok_or_else(|| {
            ImposeError::ContentDecode(format!("invalid hex digit {:?}", byte as char))
        })? as u8;

        match high.take() {
            Some(h) => out.push(h << 4 | digit),
            None => high = Some(digit),
        }
    }

    if let Some(h) = high {
        out.push(h << 4);
    }
    Ok(out)
}

/// RunLengthDecode: length byte 0..=127 copies the next n+1 bytes,
/// 129..=255 repeats the next byte 257-n times, 128 ends the data.
pub fn decode_run_length(data: &[u8]) -> Result<Vec<u8>> {
    let truncated = || ImposeError::ContentDecode("truncated run-length data".to_string());
    let mut out = Vec::new();
    let mut rest = data;

    while let Some((&length, tail)) = rest.split_first() {
        match length {
            128 => break,
            0..=127 => {
                let count = length as usize + 1;
                let literal = tail.get(..count).ok_or_else(truncated)?;
                out.extend_from_slice(literal);
                rest = &tail[count..];
            }
            _ => {
                let (&byte, tail) = tail.split_first().ok_or_else(truncated)?;
                out.extend(std::iter::repeat_n(byte, 257 - length as usize));
                rest = tail;
            }
        }
    }

    Ok(out)
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}
