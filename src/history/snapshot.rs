//! Compressed, immutable captures of one curve's data.
//!
//! Points are split into four field streams that are delta encoded against
//! the previous point:
//!
//! - frames: zigzag varint of the difference to the previous frame
//! - x, y: XOR of the IEEE-754 bit pattern against the previous value, stored
//!   as a header byte (`trailing zero bytes << 4 | significant bytes`, `0`
//!   for "same as previous") followed by the significant bytes
//! - status: run-length pairs of (status tag, varint run length)
//!
//! Every stream is bit-exact, so decoding reproduces the encoded curve field
//! for field, including signed zeros and NaN payloads.

use std::fmt;

use crate::constants::SNAPSHOT_FORMAT_VERSION;
use crate::curve::{CurveData, CurveDataPoint, PointStatus};

use super::error::{SnapshotError, ValidationError};

/// Delta-encoded curve data captured at one instant
#[derive(Clone, PartialEq, Eq)]
pub struct CompressedSnapshot {
    bytes: Box<[u8]>,
    point_count: usize,
}

impl CompressedSnapshot {
    /// Encode a curve. Fails only when a frame appears twice.
    pub fn encode(data: &CurveData) -> Result<Self, ValidationError> {
        data.validate()?;

        let points = data.points();
        let mut buf = Vec::with_capacity(points.len() * 6 + 8);
        buf.push(SNAPSHOT_FORMAT_VERSION);
        write_varint(&mut buf, points.len() as u64);

        let mut previous_frame = 0i64;
        for point in points {
            let frame = i64::from(point.frame);
            write_varint(&mut buf, zigzag_encode(frame - previous_frame));
            previous_frame = frame;
        }

        write_float_stream(&mut buf, points.iter().map(|p| p.x));
        write_float_stream(&mut buf, points.iter().map(|p| p.y));
        write_status_runs(&mut buf, points.iter().map(|p| p.status));

        Ok(Self {
            bytes: buf.into_boxed_slice(),
            point_count: points.len(),
        })
    }

    /// Reconstruct the encoded curve
    pub fn decode(&self) -> Result<CurveData, SnapshotError> {
        decode_bytes(&self.bytes)
    }

    /// Approximate memory held by this snapshot
    pub fn size_bytes(&self) -> usize {
        self.bytes.len() + std::mem::size_of::<Self>()
    }

    /// What a plain copy of the same points would occupy
    pub fn uncompressed_size_bytes(&self) -> usize {
        self.point_count * std::mem::size_of::<CurveDataPoint>()
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn is_empty(&self) -> bool {
        self.point_count == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for CompressedSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressedSnapshot")
            .field("point_count", &self.point_count)
            .field("encoded_len", &self.bytes.len())
            .finish()
    }
}

/// Decode a raw snapshot buffer
pub(crate) fn decode_bytes(bytes: &[u8]) -> Result<CurveData, SnapshotError> {
    let mut reader = ByteReader::new(bytes);

    let version = reader.read_u8()?;
    if version != SNAPSHOT_FORMAT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(version));
    }

    let count = usize::try_from(reader.read_varint()?).map_err(|_| SnapshotError::Truncated)?;
    // Every point costs at least one byte in the frame stream
    if count > reader.remaining() {
        return Err(SnapshotError::Truncated);
    }

    let mut frames = Vec::with_capacity(count);
    let mut previous_frame = 0i64;
    for _ in 0..count {
        let frame = previous_frame
            .checked_add(zigzag_decode(reader.read_varint()?))
            .ok_or(SnapshotError::FrameOutOfRange(previous_frame))?;
        let value = i32::try_from(frame).map_err(|_| SnapshotError::FrameOutOfRange(frame))?;
        frames.push(value);
        previous_frame = frame;
    }

    let xs = read_float_stream(&mut reader, count)?;
    let ys = read_float_stream(&mut reader, count)?;
    let statuses = read_status_runs(&mut reader, count)?;

    if reader.remaining() != 0 {
        return Err(SnapshotError::TrailingBytes);
    }

    Ok(frames
        .into_iter()
        .zip(xs)
        .zip(ys)
        .zip(statuses)
        .map(|(((frame, x), y), status)| CurveDataPoint { frame, x, y, status })
        .collect())
}

fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

fn write_varint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push((value as u8) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

fn write_float_stream(buf: &mut Vec<u8>, values: impl Iterator<Item = f64>) {
    let mut previous = 0u64;
    for value in values {
        let bits = value.to_bits();
        let xor = bits ^ previous;
        previous = bits;

        if xor == 0 {
            buf.push(0);
            continue;
        }

        let leading = xor.leading_zeros() / 8;
        let trailing = xor.trailing_zeros() / 8;
        let significant = 8 - leading - trailing;
        buf.push(((trailing as u8) << 4) | significant as u8);

        let shifted = xor >> (trailing * 8);
        buf.extend_from_slice(&shifted.to_le_bytes()[..significant as usize]);
    }
}

fn read_float_stream(reader: &mut ByteReader<'_>, count: usize) -> Result<Vec<f64>, SnapshotError> {
    let mut values = Vec::with_capacity(count);
    let mut previous = 0u64;
    for _ in 0..count {
        let header = reader.read_u8()?;
        if header != 0 {
            let significant = usize::from(header & 0x0f);
            let trailing = u32::from(header >> 4);
            if significant == 0 || significant + trailing as usize > 8 {
                return Err(SnapshotError::InvalidFloatHeader(header));
            }
            let mut raw = [0u8; 8];
            raw[..significant].copy_from_slice(reader.read_bytes(significant)?);
            previous ^= u64::from_le_bytes(raw) << (trailing * 8);
        }
        values.push(f64::from_bits(previous));
    }
    Ok(values)
}

fn write_status_runs(buf: &mut Vec<u8>, statuses: impl Iterator<Item = PointStatus>) {
    let mut current: Option<(PointStatus, u64)> = None;
    for status in statuses {
        current = match current {
            Some((run_status, run)) if run_status == status => Some((run_status, run + 1)),
            Some((run_status, run)) => {
                buf.push(run_status.as_byte());
                write_varint(buf, run);
                Some((status, 1))
            }
            None => Some((status, 1)),
        };
    }
    if let Some((status, run)) = current {
        buf.push(status.as_byte());
        write_varint(buf, run);
    }
}

fn read_status_runs(
    reader: &mut ByteReader<'_>,
    count: usize,
) -> Result<Vec<PointStatus>, SnapshotError> {
    let mut statuses = Vec::with_capacity(count);
    while statuses.len() < count {
        let tag = reader.read_u8()?;
        let status = PointStatus::from_byte(tag).ok_or(SnapshotError::UnknownStatus(tag))?;
        let run = usize::try_from(reader.read_varint()?).map_err(|_| SnapshotError::InvalidStatusRun)?;
        if run == 0 || run > count - statuses.len() {
            return Err(SnapshotError::InvalidStatusRun);
        }
        statuses.extend(std::iter::repeat_n(status, run));
    }
    Ok(statuses)
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn read_u8(&mut self) -> Result<u8, SnapshotError> {
        let byte = *self.bytes.get(self.pos).ok_or(SnapshotError::Truncated)?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], SnapshotError> {
        let end = self.pos.checked_add(len).ok_or(SnapshotError::Truncated)?;
        let slice = self.bytes.get(self.pos..end).ok_or(SnapshotError::Truncated)?;
        self.pos = end;
        Ok(slice)
    }

    fn read_varint(&mut self) -> Result<u64, SnapshotError> {
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self.read_u8()?;
            if shift == 63 && byte > 1 {
                return Err(SnapshotError::VarintOverflow);
            }
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
            if shift > 63 {
                return Err(SnapshotError::VarintOverflow);
            }
        }
    }
}
