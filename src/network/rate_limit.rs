//! 限速流式写入
//!
//! 按固定大小分块复制字节流；每块写完后按
//! `max(0, 块大小 / 限速 - 本块实际耗时)` 休眠，得到近似的平均速率上限。
//! 块与块之间不做补偿（不是令牌桶）。

use std::io::{self, ErrorKind, Read, Write};
use std::sync::OnceLock;
use std::thread;
use std::time::{Duration, Instant};

use regex::Regex;

/// Chunk size used for single-file downloads
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Throughput ceiling of one transfer
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RateLimit {
    bytes_per_second: Option<f64>,
}

impl RateLimit {
    pub fn unlimited() -> Self {
        RateLimit {
            bytes_per_second: None,
        }
    }

    /// Non-positive or non-finite values mean "unlimited"
    pub fn bytes_per_second(value: f64) -> Self {
        RateLimit {
            bytes_per_second: Some(value).filter(|v| v.is_finite() && *v > 0.0),
        }
    }

    /// Parses `<number><unit>` where unit is k/K (KiB/s) or m/M (MiB/s)
    ///
    /// Anything that doesn't match, including a bare number, is unlimited.
    pub fn parse(input: &str) -> Self {
        static RATE_RE: OnceLock<Option<Regex>> = OnceLock::new();
        let re = RATE_RE.get_or_init(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)([kKmM])\s*$").ok());

        let Some(caps) = re.as_ref().and_then(|re| re.captures(input)) else {
            return RateLimit::unlimited();
        };

        let value: f64 = match caps[1].parse() {
            Ok(v) => v,
            Err(_) => return RateLimit::unlimited(),
        };

        let multiplier = match &caps[2] {
            "k" | "K" => 1024.0,
            _ => 1024.0 * 1024.0,
        };

        RateLimit::bytes_per_second(value * multiplier)
    }

    pub fn ceiling(&self) -> Option<f64> {
        self.bytes_per_second
    }

    pub fn is_unlimited(&self) -> bool {
        self.bytes_per_second.is_none()
    }

    /// How long `len` bytes should take at this ceiling
    pub fn expected_duration(&self, len: usize) -> Duration {
        match self.bytes_per_second {
            Some(rate) => Duration::from_secs_f64(len as f64 / rate),
            None => Duration::ZERO,
        }
    }
}

/// Which side of a copy failed
#[derive(Debug)]
pub enum StreamError {
    Read(io::Error),
    Write(io::Error),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub bytes: u64,
    pub chunks: u64,
    pub slept: Duration,
    pub elapsed: Duration,
}

#[derive(Clone, Copy, Debug)]
pub struct RateLimitedStreamer {
    limit: RateLimit,
    chunk_size: usize,
}

impl RateLimitedStreamer {
    pub fn new(limit: RateLimit) -> Self {
        RateLimitedStreamer {
            limit,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn copy<R: Read, W: Write>(
        &self,
        reader: &mut R,
        writer: &mut W,
    ) -> Result<StreamStats, StreamError> {
        let started = Instant::now();
        let mut buf = vec![0u8; self.chunk_size];
        let mut stats = StreamStats::default();

        loop {
            let chunk_started = Instant::now();

            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(StreamError::Read(e)),
            };

            writer.write_all(&buf[..n]).map_err(StreamError::Write)?;
            stats.bytes += n as u64;
            stats.chunks += 1;

            let pause = self
                .limit
                .expected_duration(n)
                .saturating_sub(chunk_started.elapsed());
            if !pause.is_zero() {
                thread::sleep(pause);
                stats.slept += pause;
            }
        }

        writer.flush().map_err(StreamError::Write)?;
        stats.elapsed = started.elapsed();

        Ok(stats)
    }
}
