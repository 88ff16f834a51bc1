use log::{debug, info, trace, warn};

use crate::bitstream::bitreader::BitReader;
use crate::bwt_algorithms::bwt_decode::bwt_decode;
use crate::error::{ChecksumScope, DecodeError, Result};
use crate::huffman_coding::huffman_decode::huf_decode;
use crate::tools::{
    crc::{do_crc, do_stream_crc},
    rle1::rle1_decode,
    rle2_mtf_decode::rle2_mtf_decode,
};

use super::block_header::read_block_header;

const SIGNATURE: &[u8] = b"BZh";
const HEADER: u64 = 0x3141_5926_5359;
const FOOTER: u64 = 0x1772_4538_5090;

/// Decoder strictness settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Fail with ChecksumMismatch when a block or stream crc is wrong. (Otherwise only warn.)
    pub verify_crc: bool,
    /// Keep decoding when another bzip2 stream follows the end of the first one.
    pub multi_stream: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            verify_crc: true,
            multi_stream: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    StreamHeader,
    Blocks,
    Done,
}

/// Decodes a complete bzip2 buffer one block at a time.
///
/// Blocks come back in stream order, either through `next_block` or by iterating. After an error
/// the decoder is finished and yields nothing more. Dropping it between blocks is how a caller
/// cancels a long decode.
#[derive(Debug)]
pub struct Bzip2StreamDecoder<'a> {
    br: BitReader<'a>,
    opts: DecodeOptions,
    state: State,
    /// Largest pre-BWT block the current stream header allows
    block_size: usize,
    block_counter: usize,
    stream_counter: usize,
    stream_crc: u32,
}

impl<'a> Bzip2StreamDecoder<'a> {
    /// Create a decoder with default options (verify crcs, follow concatenated streams).
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, DecodeOptions::default())
    }

    pub fn with_options(data: &'a [u8], opts: DecodeOptions) -> Self {
        Self {
            br: BitReader::new(data),
            opts,
            state: State::StreamHeader,
            block_size: 0,
            block_counter: 0,
            stream_counter: 0,
            stream_crc: 0,
        }
    }

    /// Number of blocks decoded so far, across all streams.
    pub fn blocks_decoded(&self) -> usize {
        self.block_counter
    }

    /// Number of stream headers read so far.
    pub fn streams_started(&self) -> usize {
        self.stream_counter
    }

    /// Decode the next block. Returns Ok(None) once the last stream has ended.
    pub fn next_block(&mut self) -> Result<Option<Vec<u8>>> {
        let result = self.advance();
        if result.is_err() {
            self.state = State::Done;
        }
        result
    }

    /// Decode every remaining block and concatenate them.
    pub fn decode_all(mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        while let Some(mut block) = self.next_block()? {
            out.append(&mut block);
        }
        info!(
            "Decoded {} bytes from {} blocks in {} streams.",
            out.len(),
            self.block_counter,
            self.stream_counter
        );
        Ok(out)
    }

    fn advance(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            match self.state {
                State::Done => return Ok(None),
                State::StreamHeader => {
                    self.read_stream_header()?;
                    self.state = State::Blocks;
                }
                State::Blocks => {
                    // Block header (or footer) should come next.
                    let mark_loc = self.br.loc();
                    let high = u64::from(self.br.bint(24)?);
                    let magic = (high << 24) | u64::from(self.br.bint(24)?);
                    match magic {
                        HEADER => return self.decode_block().map(Some),
                        FOOTER => {
                            self.finish_stream()?;
                            self.state = if self.another_stream() {
                                State::StreamHeader
                            } else {
                                State::Done
                            };
                        }
                        other => {
                            return Err(DecodeError::corrupt(format!(
                                "invalid block magic {:#014x} at {}",
                                other, mark_loc
                            )))
                        }
                    }
                }
            }
        }
    }

    /// Look for a valid signature and block size.
    fn read_stream_header(&mut self) -> Result<()> {
        if self.br.bytes(3)? != SIGNATURE {
            return Err(DecodeError::corrupt("missing the BZh signature"));
        }
        let level = self.br.byte()?;
        if !(b'1'..=b'9').contains(&level) {
            return Err(DecodeError::corrupt(format!(
                "invalid block size code {:#04x}",
                level
            )));
        }
        self.block_size = (level - b'0') as usize * 100_000;
        self.stream_crc = 0;
        self.stream_counter += 1;
        info!(
            "Found a valid bzip2 signature for stream {} (block size {}).",
            self.stream_counter, self.block_size
        );
        Ok(())
    }

    /// Huffman decode, undo RLE2/MTF, undo the BWT, undo RLE1, then check the crc.
    fn decode_block(&mut self) -> Result<Vec<u8>> {
        self.block_counter += 1;
        let header = read_block_header(&mut self.br, self.block_size, self.block_counter)?;

        let symbols = huf_decode(
            &mut self.br,
            &header.tables,
            &header.selectors,
            header.eob(),
            self.block_size,
        )?;
        trace!(
            "Block {}: {} huffman symbols, now at {}.",
            self.block_counter,
            symbols.len(),
            self.br.loc()
        );

        let mut mtf_index = header.symbols;
        let (mtf_out, freq) = rle2_mtf_decode(&symbols, &mut mtf_index, self.block_size)?;
        let bwt_v = bwt_decode(header.origin, &mtf_out, &freq)?;
        let block = rle1_decode(&bwt_v);

        // Compute and check the CRCs
        let this_block_crc = do_crc(0, &block);
        self.stream_crc = do_stream_crc(self.stream_crc, this_block_crc);
        self.check_crc(
            ChecksumScope::Block(self.block_counter),
            header.block_crc,
            this_block_crc,
        )?;

        debug!(
            "Block {} decoded to {} bytes.",
            self.block_counter,
            block.len()
        );
        Ok(block)
    }

    fn finish_stream(&mut self) -> Result<()> {
        let final_crc = self.br.bint(32)?;
        self.check_crc(ChecksumScope::Stream, final_crc, self.stream_crc)?;
        // Streams are padded to a whole byte
        self.br.align_to_byte();
        info!("Stream {} ended at {}.", self.stream_counter, self.br.loc());
        Ok(())
    }

    /// Check whether another stream starts right after this one.
    fn another_stream(&self) -> bool {
        if self.br.at_end() {
            return false;
        }
        let mut peek = self.br.clone();
        // A new stream needs the signature and a valid block size digit
        let is_stream = matches!(
            peek.bytes(4),
            Ok(sig) if sig[..3] == *SIGNATURE && (b'1'..=b'9').contains(&sig[3])
        );
        if is_stream && self.opts.multi_stream {
            return true;
        }
        warn!(
            "Ignoring {} trailing bytes after the end of stream {}.",
            self.br.remaining() / 8,
            self.stream_counter
        );
        false
    }

    fn check_crc(&self, scope: ChecksumScope, expected: u32, actual: u32) -> Result<()> {
        if expected == actual {
            trace!("{} CRCs matched: {:#010x}.", scope, actual);
            return Ok(());
        }
        if self.opts.verify_crc {
            return Err(DecodeError::ChecksumMismatch {
                scope,
                expected,
                actual,
            });
        }
        warn!(
            "{} CRC failed! Found {:#010x} looking for {:#010x}. (Continuing...)",
            scope, actual, expected
        );
        Ok(())
    }
}

impl Iterator for Bzip2StreamDecoder<'_> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_block().transpose()
    }
}

/// Decompress a complete bzip2 buffer with default options.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    Bzip2StreamDecoder::new(data).decode_all()
}

/// Decompress a complete bzip2 buffer.
pub fn decompress_with(data: &[u8], opts: DecodeOptions) -> Result<Vec<u8>> {
    Bzip2StreamDecoder::with_options(data, opts).decode_all()
}
