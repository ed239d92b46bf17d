//! Code stream decoding
//!
//! Rebuilds the encoder's dictionary in lockstep from the codes alone and
//! writes the decoded units to the output buffer.

use super::reader::BitReader;
use super::state::{DecodeState, Span};
use crate::common::{CODE_END_OF_STREAM, CODE_LITERAL_16, CODE_LITERAL_8};
use crate::{LzsError, Result};

/// Read the literal that introduces a stream or a new code unit
fn read_literal(reader: &mut BitReader<'_>, control: u32) -> Result<u16> {
    let width = match control {
        CODE_LITERAL_8 => 8,
        CODE_LITERAL_16 => 16,
        other => return Err(LzsError::InvalidControlCode(other)),
    };
    Ok(reader.read_bits(width)? as u16)
}

impl DecodeState {
    /// Decode a whole stream up to its end-of-stream code
    pub(crate) fn decode(reader: &mut BitReader<'_>) -> Result<Self> {
        // The width is still 2 here; the decoder has not seen any growth yet
        let control = reader.read_bits(2)?;
        let first = read_literal(reader, control)?;
        let mut state = DecodeState::new(first);

        loop {
            let code = reader.read_bits(state.num_bits)?;
            let entry = match code {
                CODE_END_OF_STREAM => return Ok(state),
                CODE_LITERAL_8 | CODE_LITERAL_16 => state.push_literal(read_literal(reader, code)?),
                code => state.resolve(code)?,
            };

            // The previous entry is immediately followed by this one in the
            // output, so phrase + entry[0] is a contiguous span
            state.entries.push(Span {
                start: state.phrase.start,
                len: state.phrase.len + 1,
            });
            state.count_code();
            state.phrase = entry;
        }
    }

    /// Register a new literal as a dictionary entry and write it out
    fn push_literal(&mut self, unit: u16) -> Span {
        let span = Span {
            start: self.output.len(),
            len: 1,
        };
        self.output.push(unit);
        self.entries.push(span);
        self.literal_count += 1;
        self.count_code();
        span
    }

    /// Write out the entry for a back-reference
    fn resolve(&mut self, code: u32) -> Result<Span> {
        let index = code as usize;
        self.reference_count += 1;

        if let Some(&span) = self.entries.get(index) {
            return Ok(self.copy_span(span));
        }
        if index == self.entries.len() {
            // The entry being defined by this very code: phrase + phrase[0]
            let copy = self.copy_span(self.phrase);
            let first = self.output[self.phrase.start];
            self.output.push(first);
            return Ok(Span {
                start: copy.start,
                len: copy.len + 1,
            });
        }
        Err(LzsError::InvalidCode {
            code,
            dict_size: self.entries.len(),
        })
    }
}
