//! Raw packing encoder
//!
//! Packs planar input into tight rows without compressing it. Useful for
//! loopback testing and for links fast enough to carry uncompressed
//! frames; it is also the reference implementation of the
//! [`EncoderAdapter`] polling contract. Unlike a hardware pipeline it has
//! no reorder latency: every frame yields exactly one packet and nothing
//! is buffered at flush time.

use std::collections::VecDeque;

use crate::codec::{EncoderAdapter, EncoderStats};
use crate::config::EncoderConfig;
use crate::error::CodecError;
use crate::frame::Frame;

/// Geometry of one plane: bytes per row and row count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PlaneDim {
    row_bytes: usize,
    rows: usize,
}

/// Plane geometry for the planar formats hardware encoders accept
fn pixel_layout(pixel_format: &str, width: usize, height: usize) -> Option<Vec<PlaneDim>> {
    let half_rows = height.div_ceil(2);
    let layout = match pixel_format {
        // NV12 is the default input format, like for VAAPI encoders
        "" | "nv12" => vec![
            PlaneDim { row_bytes: width, rows: height },
            PlaneDim { row_bytes: width, rows: half_rows },
        ],
        "yuv420p" => vec![
            PlaneDim { row_bytes: width, rows: height },
            PlaneDim { row_bytes: width.div_ceil(2), rows: half_rows },
            PlaneDim { row_bytes: width.div_ceil(2), rows: half_rows },
        ],
        // 10-bit semi-planar, two bytes per sample
        "p010le" | "p016le" => vec![
            PlaneDim { row_bytes: width * 2, rows: height },
            PlaneDim { row_bytes: width * 2, rows: half_rows },
        ],
        "rgb0" | "bgr0" => vec![PlaneDim { row_bytes: width * 4, rows: height }],
        _ => return None,
    };
    Some(layout)
}

/// Encoder that emits tightly-packed raw frames
pub struct RawVideoEncoder {
    layout: Vec<PlaneDim>,
    packet_size: usize,
    ready: VecDeque<Vec<u8>>,
    /// Packet handed out by the last poll, kept alive until the next call
    current: Option<Vec<u8>>,
    flushed: bool,
    frames_encoded: u64,
    bytes_produced: u64,
}

impl RawVideoEncoder {
    /// Get statistics
    pub fn stats(&self) -> EncoderStats {
        EncoderStats {
            frames_encoded: self.frames_encoded,
            bytes_produced: self.bytes_produced,
        }
    }

    /// Size in bytes of every packet this encoder produces
    pub fn packet_size(&self) -> usize {
        self.packet_size
    }
}

impl EncoderAdapter for RawVideoEncoder {
    fn open(config: &EncoderConfig) -> Result<Self, CodecError> {
        if config.width == 0 || config.height == 0 {
            return Err(CodecError::InvalidGeometry(format!(
                "{}x{}",
                config.width, config.height
            )));
        }

        let layout = pixel_layout(
            &config.pixel_format,
            config.width as usize,
            config.height as usize,
        )
        .ok_or_else(|| CodecError::UnsupportedFormat(config.pixel_format.clone()))?;

        let packet_size = layout.iter().map(|p| p.row_bytes * p.rows).sum();

        Ok(Self {
            layout,
            packet_size,
            ready: VecDeque::new(),
            current: None,
            flushed: false,
            frames_encoded: 0,
            bytes_produced: 0,
        })
    }

    fn send_frame(&mut self, frame: &Frame<'_>) -> Result<(), CodecError> {
        if self.flushed {
            return Err(CodecError::SubmitFailed("encoder already flushed".into()));
        }

        let mut packet = Vec::with_capacity(self.packet_size);
        for (i, dim) in self.layout.iter().enumerate() {
            let plane = frame.planes[i].ok_or(CodecError::MissingPlane(i))?;
            let stride = frame.linesize[i];
            if stride < dim.row_bytes {
                return Err(CodecError::InvalidGeometry(format!(
                    "plane {} stride {} below row size {}",
                    i, stride, dim.row_bytes
                )));
            }
            let needed = stride * (dim.rows - 1) + dim.row_bytes;
            if plane.len() < needed {
                return Err(CodecError::InvalidGeometry(format!(
                    "plane {} holds {} bytes, {} needed",
                    i,
                    plane.len(),
                    needed
                )));
            }
            for row in 0..dim.rows {
                let start = row * stride;
                packet.extend_from_slice(&plane[start..start + dim.row_bytes]);
            }
        }

        self.frames_encoded += 1;
        self.bytes_produced += packet.len() as u64;
        self.ready.push_back(packet);
        Ok(())
    }

    fn send_eof(&mut self) -> Result<(), CodecError> {
        // Nothing pipelined to release; just refuse further frames.
        self.flushed = true;
        Ok(())
    }

    fn receive_packet(&mut self) -> Result<Option<&[u8]>, CodecError> {
        self.current = self.ready.pop_front();
        Ok(self.current.as_deref())
    }
}
