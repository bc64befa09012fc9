use crate::topology::{Mode, DEFAULT_WEIGHT};
use std::collections::VecDeque;
use std::io::BufRead;
use tracing::warn;

/// One parsed edge record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRecord {
    pub src: u32,
    pub dest: u32,
    pub weight: f64,
}

/// Pulls a single edge record off a token stream.
///
/// Returns `None` when the stream cannot produce a complete, well-formed
/// record; the loader treats that as the end of its input.
pub trait Extractor {
    fn extract(&self, tokens: &mut dyn Iterator<Item = String>) -> Option<EdgeRecord>;
}

/// `src dest` records, every edge weighing [`DEFAULT_WEIGHT`].
pub struct PairExtractor;

impl Extractor for PairExtractor {
    fn extract(&self, tokens: &mut dyn Iterator<Item = String>) -> Option<EdgeRecord> {
        let src = parse_id(tokens)?;
        let dest = parse_id(tokens)?;
        Some(EdgeRecord {
            src,
            dest,
            weight: DEFAULT_WEIGHT,
        })
    }
}

/// `src dest weight` records. The weight must be a finite number; `nan`
/// and `inf` tokens count as malformed.
pub struct WeightedExtractor;

impl Extractor for WeightedExtractor {
    fn extract(&self, tokens: &mut dyn Iterator<Item = String>) -> Option<EdgeRecord> {
        let src = parse_id(tokens)?;
        let dest = parse_id(tokens)?;
        let weight = tokens
            .next()?
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite())?;
        Some(EdgeRecord { src, dest, weight })
    }
}

pub fn extractor_for(mode: Mode) -> Box<dyn Extractor> {
    match mode {
        Mode::Weighted => Box::new(WeightedExtractor),
        Mode::Unweighted => Box::new(PairExtractor),
    }
}

fn parse_id(tokens: &mut dyn Iterator<Item = String>) -> Option<u32> {
    tokens.next()?.parse::<u32>().ok()
}

/// Whitespace-separated tokens of a text stream, regardless of line breaks.
///
/// A read failure ends the stream the same way end of input does.
pub struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
    line: String,
    done: bool,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            line: String::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for Tokens<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while self.pending.is_empty() {
            if self.done {
                return None;
            }
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => self.done = true,
                Ok(_) => self
                    .pending
                    .extend(self.line.split_whitespace().map(str::to_string)),
                Err(e) => {
                    warn!("Edge list stream ended by read error: {}", e);
                    self.done = true;
                }
            }
        }
        self.pending.pop_front()
    }
}
