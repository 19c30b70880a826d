//! LZW decoder (decompression).
//!
//! The decoder rebuilds the encoder's dictionary one entry behind it: an
//! entry is only known once the first symbol of the following phrase has
//! been seen. The single code that can refer to the entry not yet built
//! (the "KwKwK" case) is synthesized from the previous phrase.

use crate::config::{LzwConfig, bit_width};
use crate::dictionary::Dictionary;
use crate::error::{LzwError, Result};

/// Outcome of decoding one code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    /// More codes may follow.
    Continue,
    /// The stop code was read.
    Stop,
}

/// Streaming LZW decoder.
#[derive(Debug)]
pub struct LzwDecoder {
    /// Dictionary for code lookup.
    dict: Dictionary,
    /// Phrase produced by the previous code since the last reset.
    previous: Option<Vec<u8>>,
}

impl LzwDecoder {
    /// Create a new LZW decoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        let dict = Dictionary::new(config)?;
        Ok(Self {
            dict,
            previous: None,
        })
    }

    /// Width of the next code in a packed stream.
    ///
    /// Once a phrase is pending the encoder is one entry ahead of us, so
    /// its width is derived from `next_code + 1`.
    pub fn code_width(&self) -> u8 {
        let ahead = u32::from(self.previous.is_some());
        bit_width(self.dict.next_code() + ahead).min(self.dict.config().max_bits)
    }

    /// Decode a single code, appending its phrase to `output`.
    pub fn decode_code(&mut self, code: u16, output: &mut Vec<u8>) -> Result<DecodeStatus> {
        if code == self.dict.clear_code() {
            self.reset();
            return Ok(DecodeStatus::Continue);
        }
        if code == self.dict.stop_code() {
            return Ok(DecodeStatus::Stop);
        }

        // A rejected code leaves the decoder unchanged.
        let phrase = match (self.dict.reverse_lookup(code), self.previous.as_ref()) {
            (Some(phrase), _) => phrase,
            // Only the code about to be assigned may be unknown.
            (None, Some(previous)) if u32::from(code) == self.dict.next_code() => {
                let mut phrase = previous.clone();
                phrase.push(previous[0]);
                phrase
            }
            (None, _) => return Err(LzwError::InvalidCode(code)),
        };

        if let Some(mut entry) = self.previous.take() {
            entry.push(phrase[0]);
            self.dict.insert(&entry)?;
        }

        output.extend_from_slice(&phrase);
        self.previous = Some(phrase);
        Ok(DecodeStatus::Continue)
    }

    /// Decode a sequence of codes until the stop code or the end of input.
    pub fn decode(&mut self, codes: &[u16]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(codes.len() * 2);
        for &code in codes {
            if self.decode_code(code, &mut output)? == DecodeStatus::Stop {
                break;
            }
        }
        Ok(output)
    }

    /// Decode a complete stream: it must end with the stop code and
    /// nothing may follow it.
    pub fn decode_complete(&mut self, codes: &[u16]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(codes.len() * 2);
        for (i, &code) in codes.iter().enumerate() {
            if self.decode_code(code, &mut output)? == DecodeStatus::Stop {
                let trailing = codes.len() - i - 1;
                if trailing > 0 {
                    return Err(LzwError::TrailingCodes(trailing));
                }
                return Ok(output);
            }
        }
        Err(LzwError::MissingStopCode)
    }

    /// Reset the decoder to initial state.
    pub fn reset(&mut self) {
        self.dict.reset();
        self.previous = None;
    }

    /// Access the live dictionary.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::LzwEncoder;

    fn roundtrip(input: &[u8], config: LzwConfig) -> Vec<u8> {
        let mut encoder = LzwEncoder::new(config).unwrap();
        let mut codes = Vec::new();
        encoder.begin(&mut codes).unwrap();
        encoder.encode(input, &mut codes).unwrap();
        encoder.finish(&mut codes).unwrap();

        let mut decoder = LzwDecoder::new(config).unwrap();
        decoder.decode(&codes).unwrap()
    }

    #[test]
    fn test_decode_known_sequence() {
        let mut decoder = LzwDecoder::new(LzwConfig::new(2)).unwrap();
        let output = decoder.decode(&[3, 0, 1, 5, 7, 4]).unwrap();
        assert_eq!(output, vec![0, 1, 0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_decode_kwkwk() {
        // "aaaa": a (add aa=259), aa is emitted before the decoder knows it.
        let mut decoder = LzwDecoder::new(LzwConfig::new(256)).unwrap();
        let output = decoder.decode(&[257, 97, 259, 97, 258]).unwrap();
        assert_eq!(output, b"aaaa");
        assert_eq!(decoder.dictionary().reverse_lookup(259).unwrap(), b"aa");
    }

    #[test]
    fn test_decode_invalid_code() {
        let mut decoder = LzwDecoder::new(LzwConfig::new(256)).unwrap();
        let mut output = Vec::new();
        decoder.decode_code(65, &mut output).unwrap();
        let err = decoder.decode_code(300, &mut output).unwrap_err();
        assert!(matches!(err, LzwError::InvalidCode(300)));
    }

    #[test]
    fn test_decode_unknown_first_code() {
        let mut decoder = LzwDecoder::new(LzwConfig::new(256)).unwrap();
        let mut output = Vec::new();
        // The next code cannot be the first code of a stream.
        assert!(decoder.decode_code(259, &mut output).is_err());
        // Code 256 is neither a literal nor a control code.
        assert!(decoder.decode_code(256, &mut output).is_err());
    }

    #[test]
    fn test_decode_stops_at_stop_code() {
        let mut decoder = LzwDecoder::new(LzwConfig::new(256)).unwrap();
        let output = decoder.decode(&[257, 65, 258, 66, 67]).unwrap();
        assert_eq!(output, b"A");
    }

    #[test]
    fn test_rejected_code_keeps_state() {
        let mut decoder = LzwDecoder::new(LzwConfig::new(256)).unwrap();
        let mut output = Vec::new();
        decoder.decode_code(65, &mut output).unwrap();
        assert!(matches!(
            decoder.decode_code(300, &mut output),
            Err(LzwError::InvalidCode(300))
        ));
        assert_eq!(decoder.code_width(), 9);

        // Decoding resumes as if the bad code never arrived.
        decoder.decode_code(66, &mut output).unwrap();
        assert_eq!(output, b"AB");
        assert_eq!(decoder.dictionary().reverse_lookup(259).unwrap(), b"AB");
        assert_eq!(decoder.dictionary().next_code(), 260);

        decoder.decode_code(259, &mut output).unwrap();
        assert_eq!(output, b"ABAB");
    }

    #[test]
    fn test_rejected_first_code_keeps_state() {
        let mut decoder = LzwDecoder::new(LzwConfig::new(256)).unwrap();
        let mut output = Vec::new();
        assert!(decoder.decode_code(259, &mut output).is_err());
        let codes = [65, 65, 259, 258];
        for code in codes {
            decoder.decode_code(code, &mut output).unwrap();
        }
        assert_eq!(output, b"AAAA");
    }

    #[test]
    fn test_decode_complete() {
        let mut decoder = LzwDecoder::new(LzwConfig::new(256)).unwrap();
        assert_eq!(decoder.decode_complete(&[257, 65, 258]).unwrap(), b"A");

        let mut decoder = LzwDecoder::new(LzwConfig::new(256)).unwrap();
        assert!(matches!(
            decoder.decode_complete(&[257, 65, 66]),
            Err(LzwError::MissingStopCode)
        ));

        let mut decoder = LzwDecoder::new(LzwConfig::new(256)).unwrap();
        assert!(matches!(
            decoder.decode_complete(&[257, 65, 258, 66, 67]),
            Err(LzwError::TrailingCodes(2))
        ));
    }

    #[test]
    fn test_clear_resets_table() {
        let mut decoder = LzwDecoder::new(LzwConfig::new(256)).unwrap();
        let output = decoder.decode(&[65, 66, 259, 257, 67, 68, 259]).unwrap();
        assert_eq!(output, b"ABABCDCD");
        assert_eq!(decoder.dictionary().reverse_lookup(259).unwrap(), b"CD");
    }

    #[test]
    fn test_roundtrip_patterns() {
        let config = LzwConfig::new(256);
        for input in [
            &b"TOBEORNOTTOBEORTOBEORNOT"[..],
            b"ABABABABABABABABAB",
            b"A",
            b"",
        ] {
            assert_eq!(roundtrip(input, config), input);
        }
    }

    #[test]
    fn test_roundtrip_across_resets() {
        let config = LzwConfig::new(256).with_max_bits(9);
        let input: Vec<u8> = (0..5000u32).map(|i| (i * 31 % 251) as u8).collect();
        assert_eq!(roundtrip(&input, config), input);
    }

    #[test]
    fn test_width_matches_encoder() {
        let config = LzwConfig::gif(2).unwrap();
        let mut decoder = LzwDecoder::new(config).unwrap();
        let mut output = Vec::new();
        // Same stream as the encoder width test.
        let stream = [(4, 3), (0, 3), (1, 3), (2, 3), (3, 4), (6, 4), (8, 4), (5, 4)];
        for (code, width) in stream {
            assert_eq!(decoder.code_width(), width, "width before code {code}");
            decoder.decode_code(code, &mut output).unwrap();
        }
        assert_eq!(output, vec![0, 1, 2, 3, 0, 1, 2, 3]);
    }
}
