//! Multi-channel stream coordination
//!
//! Funnels every channel of one outbound stream through a single `send`
//! entry point: video channels are driven through their encoder's
//! produce/consume cycle, auxiliary channels pass through as raw bytes.
//! The coordinator owns the transport and the encoders; everything else
//! (pixel formats, drivers, socket framing) lives behind the
//! [`EncoderAdapter`] and [`TransportClient`] seams.

use crate::codec::EncoderAdapter;
use crate::config::{EncoderConfig, NetConfig};
use crate::constants::MAX_ENCODERS;
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::network::TransportClient;

/// Coordinator statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinatorStats {
    /// Frames submitted to hardware
    pub frames_submitted: u64,
    /// Zero-length placeholder payloads sent for video channels
    pub placeholders_sent: u64,
    /// Payloads forwarded for raw channels
    pub raw_payloads_sent: u64,
    /// Encoded packets forwarded to the transport
    pub packets_forwarded: u64,
    /// Encoded packets drained but intentionally not forwarded
    pub packets_discarded: u64,
    /// Flush requests accepted
    pub flushes: u64,
}

/// Coordinates N encoded video channels plus M raw channels on one stream
///
/// Channels are indexed `0..N` for video (one encoder each, in
/// configuration order) and `N..N+M` for raw passthrough. The whole
/// object is synchronous: [`send`](Self::send) blocks until hardware
/// submission, encoder drain and every resulting network send have
/// completed or failed, with no internal buffering, threads or timeouts.
/// `&mut self` makes external serialization of calls structural; run one
/// coordinator per thread if you need concurrency.
#[derive(Debug)]
pub struct ChannelCoordinator<E, T> {
    // Dropped before the encoders, matching construction in reverse.
    transport: T,
    encoders: Vec<E>,
    aux_channels: usize,
    stats: CoordinatorStats,
}

impl<E: EncoderAdapter, T: TransportClient> ChannelCoordinator<E, T> {
    /// Open the transport and every encoder, all-or-nothing
    ///
    /// The transport learns the total channel count up front because all
    /// channels interleave on one connection. If any encoder fails to
    /// open, everything constructed so far is released before the error
    /// returns.
    pub fn init(
        net_config: &NetConfig,
        encoder_configs: &[EncoderConfig],
        aux_channels: usize,
    ) -> Result<Self> {
        if encoder_configs.len() > MAX_ENCODERS {
            tracing::error!(
                requested = encoder_configs.len(),
                max = MAX_ENCODERS,
                "the maximum number of encoders exceeded"
            );
            return Err(Error::TooManyEncoders {
                requested: encoder_configs.len(),
                max: MAX_ENCODERS,
            });
        }

        let total = encoder_configs.len() + aux_channels;
        let transport = T::connect(net_config, total).map_err(|e| {
            tracing::error!(error = %e, "failed to initialize network client");
            Error::TransportInit(e)
        })?;

        let mut encoders = Vec::with_capacity(encoder_configs.len());
        for (index, config) in encoder_configs.iter().enumerate() {
            match E::open(config) {
                Ok(encoder) => encoders.push(encoder),
                Err(source) => {
                    tracing::error!(index, error = %source, "failed to initialize hardware encoder");
                    // transport and the encoders built so far drop here
                    return Err(Error::EncoderInit { index, source });
                }
            }
        }

        tracing::info!(
            video_channels = encoders.len(),
            aux_channels,
            "stream coordinator ready"
        );

        Ok(Self {
            transport,
            encoders,
            aux_channels,
            stats: CoordinatorStats::default(),
        })
    }

    /// Send one tick's worth of data on a channel
    ///
    /// For video channels (`channel < video_channels()`):
    /// - `None` flushes the encoder and forwards at most one trailing
    ///   packet tagged with `sequence`.
    /// - A [placeholder](Frame::is_placeholder) frame sends a zero-length
    ///   payload without touching the encoder, keeping receivers that
    ///   expect one message per tick in lock-step.
    /// - Any other frame is encoded; the first ready packet is forwarded
    ///   with `sequence`, any further packets that became ready in the
    ///   same call are drained and dropped.
    ///
    /// For raw channels the first plane is forwarded verbatim; an absent
    /// or placeholder frame sends a zero-length payload ("nothing to say
    /// this tick"), which is not an error.
    ///
    /// `sequence` must be non-decreasing per video channel across the
    /// coordinator's lifetime. This is not validated here; the receiving
    /// side silently corrupts its stream if the contract is broken.
    ///
    /// On error the call is broken but the coordinator stays usable;
    /// retry policy belongs to the caller. A failed call may still have
    /// put bytes on the wire (see [`Error::Encode`]).
    pub fn send(&mut self, frame: Option<&Frame<'_>>, sequence: u16, channel: usize) -> Result<()> {
        let total = self.total_channels();
        if channel >= total {
            tracing::warn!(channel, channels = total, "channel out of range");
            return Err(Error::ChannelOutOfRange {
                channel,
                channels: total,
            });
        }

        if channel < self.encoders.len() {
            self.send_video(frame, sequence, channel)
        } else {
            self.send_raw(frame, sequence, channel)
        }
    }

    fn send_video(
        &mut self,
        frame: Option<&Frame<'_>>,
        sequence: u16,
        channel: usize,
    ) -> Result<()> {
        match frame {
            None => {
                // Flush request: release the encoder's pipelined tail.
                if let Err(e) = self.encoders[channel].send_eof() {
                    tracing::error!(channel, error = %e, "failed to send flush frame to hardware");
                    return Err(Error::HardwareSubmit(e));
                }
                self.stats.flushes += 1;
            }
            Some(f) if f.is_placeholder() => {
                self.transport.send(channel, sequence, &[]).map_err(|e| {
                    tracing::error!(channel, sequence, error = %e, "failed to send placeholder");
                    Error::TransportSend(e)
                })?;
                self.stats.placeholders_sent += 1;
                return Ok(());
            }
            Some(f) => {
                if let Err(e) = self.encoders[channel].send_frame(f) {
                    tracing::error!(channel, error = %e, "failed to send frame to hardware");
                    return Err(Error::HardwareSubmit(e));
                }
                self.stats.frames_submitted += 1;
            }
        }

        self.drain(sequence, channel)
    }

    /// Drain every packet the encoder has ready, forwarding only the first
    ///
    /// The receiving protocol accepts one payload per sequence slot per
    /// channel, so when a single call surfaces several packets (chiefly
    /// while flushing a pipeline with B-frame depth) the extras are
    /// dropped after draining. Changing this would break wire
    /// compatibility with existing receivers.
    fn drain(&mut self, sequence: u16, channel: usize) -> Result<()> {
        let mut forwarded = false;
        loop {
            match self.encoders[channel].receive_packet() {
                Ok(Some(packet)) => {
                    if forwarded {
                        self.stats.packets_discarded += 1;
                        tracing::trace!(
                            channel,
                            sequence,
                            len = packet.len(),
                            "dropping extra encoded packet"
                        );
                        continue;
                    }
                    if let Err(e) = self.transport.send(channel, sequence, packet) {
                        tracing::error!(channel, sequence, error = %e, "failed to send frame");
                        return Err(Error::TransportSend(e));
                    }
                    self.stats.packets_forwarded += 1;
                    forwarded = true;
                }
                Ok(None) => break,
                Err(e) => {
                    // Terminal encoder failure; a packet may already be on
                    // the wire for this call. Nothing is rolled back.
                    tracing::error!(channel, error = %e, "failed to encode frame");
                    return Err(Error::Encode(e));
                }
            }
        }
        Ok(())
    }

    fn send_raw(
        &mut self,
        frame: Option<&Frame<'_>>,
        sequence: u16,
        channel: usize,
    ) -> Result<()> {
        let payload = frame.map(|f| f.raw_payload()).unwrap_or(&[]);
        self.transport.send(channel, sequence, payload).map_err(|e| {
            tracing::error!(channel, sequence, error = %e, "failed to send raw payload");
            Error::TransportSend(e)
        })?;
        self.stats.raw_payloads_sent += 1;
        Ok(())
    }

    /// Number of encoded video channels
    pub fn video_channels(&self) -> usize {
        self.encoders.len()
    }

    /// Number of raw passthrough channels
    pub fn aux_channels(&self) -> usize {
        self.aux_channels
    }

    /// Total number of multiplexed channels
    pub fn total_channels(&self) -> usize {
        self.encoders.len() + self.aux_channels
    }

    /// Access the owned transport, e.g. for its statistics
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get statistics
    pub fn stats(&self) -> CoordinatorStats {
        self.stats
    }

    /// Tear the stream down: transport first, then every encoder
    ///
    /// Dropping the coordinator does the same; this form only adds the
    /// log line. Encoders flushed mid-pipeline lose their tail, so flush
    /// each video channel first if those frames matter.
    pub fn close(self) {
        tracing::debug!(
            video_channels = self.encoders.len(),
            aux_channels = self.aux_channels,
            "closing stream coordinator"
        );
    }
}
