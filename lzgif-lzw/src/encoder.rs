//! LZW encoder (compression).

use crate::config::LzwConfig;
use crate::dictionary::Dictionary;
use crate::error::{LzwError, Result};
use crate::trie::NodeId;

/// Destination for emitted codes.
///
/// Every code arrives together with the width the dictionary prescribed
/// at the moment it was emitted, so a bit packer can follow width changes
/// in lockstep with the dictionary.
pub trait CodeSink {
    /// Accept one code of `width` bits.
    fn put_code(&mut self, code: u16, width: u8) -> Result<()>;
}

impl CodeSink for Vec<u16> {
    fn put_code(&mut self, code: u16, _width: u8) -> Result<()> {
        self.push(code);
        Ok(())
    }
}

/// Observable state of an [`LzwEncoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderState {
    /// No symbol buffered yet.
    Empty,
    /// A known sequence is buffered and waiting for its next symbol.
    Building,
}

#[derive(Debug, Clone, Copy)]
enum Pending {
    Empty,
    Building(NodeId),
}

/// Streaming LZW encoder.
///
/// The buffered sequence is represented by the trie node it leads to, so
/// extending it by one symbol is a single child lookup.
#[derive(Debug)]
pub struct LzwEncoder {
    /// Dictionary for sequence lookup.
    dict: Dictionary,
    /// Sequence not yet emitted.
    pending: Pending,
}

impl LzwEncoder {
    /// Create a new LZW encoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        let dict = Dictionary::new(config)?;
        Ok(Self {
            dict,
            pending: Pending::Empty,
        })
    }

    /// Emit the leading clear code required by GIF image data.
    pub fn begin<S: CodeSink>(&mut self, sink: &mut S) -> Result<()> {
        sink.put_code(self.dict.clear_code(), self.dict.code_width())
    }

    /// Feed one input symbol.
    ///
    /// # Algorithm
    ///
    /// 1. Append the symbol to the buffered sequence
    /// 2. If the extended sequence is known, keep buffering
    /// 3. Otherwise emit the code of the buffered sequence, add the
    ///    extended sequence to the dictionary and restart from the symbol
    /// 4. When that addition used the last code, emit a clear code and
    ///    reset; the restarted symbol is a literal and survives the reset
    pub fn push<S: CodeSink>(&mut self, symbol: u8, sink: &mut S) -> Result<()> {
        let literal = self
            .dict
            .trie()
            .literal(symbol)
            .ok_or(LzwError::SymbolOutOfRange {
                symbol,
                alphabet_size: self.dict.config().alphabet_size,
            })?;

        let node = match self.pending {
            Pending::Empty => {
                self.pending = Pending::Building(literal);
                return Ok(());
            }
            Pending::Building(node) => node,
        };

        if let Some(next) = self.dict.trie().child(node, symbol) {
            self.pending = Pending::Building(next);
            return Ok(());
        }

        let code = self.dict.code_of(node)?;
        sink.put_code(code, self.dict.code_width())?;
        self.dict.extend(node, symbol);
        self.pending = Pending::Building(literal);

        if self.dict.is_full() {
            log::trace!("LZW table full, emitting clear code");
            sink.put_code(self.dict.clear_code(), self.dict.code_width())?;
            self.dict.reset();
        }

        Ok(())
    }

    /// Feed a whole buffer.
    pub fn encode<S: CodeSink>(&mut self, input: &[u8], sink: &mut S) -> Result<()> {
        for &symbol in input {
            self.push(symbol, sink)?;
        }
        Ok(())
    }

    /// Flush the buffered sequence and emit the stop code.
    ///
    /// Consumes the encoder, so the stream can only be finished once.
    pub fn finish<S: CodeSink>(mut self, sink: &mut S) -> Result<()> {
        if let Pending::Building(node) = self.pending {
            let code = self.dict.code_of(node)?;
            sink.put_code(code, self.dict.code_width())?;
            self.dict.reserve_code();
        }
        sink.put_code(self.dict.stop_code(), self.dict.code_width())
    }

    /// Current state of the encoder.
    pub fn state(&self) -> EncoderState {
        match self.pending {
            Pending::Empty => EncoderState::Empty,
            Pending::Building(_) => EncoderState::Building,
        }
    }

    /// Access the live dictionary.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }
}
