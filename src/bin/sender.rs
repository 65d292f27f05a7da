//! Video Sender Application
//!
//! Streams synthetic test frames plus one auxiliary telemetry channel to a
//! receiver over UDP. Stands in for a camera/capture pipeline; point it at
//! a listening receiver and watch the channels arrive.

use anyhow::Result;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lan_video_streamer::{
    channels::ChannelCoordinator,
    codec::RawVideoEncoder,
    config::{EncoderConfig, NetConfig},
    constants::{DEFAULT_FRAMERATE, DEFAULT_PORT},
    frame::Frame,
    network::MultiChannelSender,
};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LAN Video Sender");

    // Usage: sender [ip] [port] [seconds]
    let mut args = std::env::args().skip(1);
    let ip = args.next().unwrap_or_else(|| "127.0.0.1".to_string());
    let port: u16 = match args.next() {
        Some(p) => p.parse()?,
        None => DEFAULT_PORT,
    };
    let seconds: u64 = match args.next() {
        Some(s) => s.parse()?,
        None => 10,
    };

    let net = NetConfig {
        ip: ip.clone(),
        port,
    };
    let encoder_config = EncoderConfig {
        width: WIDTH,
        height: HEIGHT,
        framerate: DEFAULT_FRAMERATE,
        pixel_format: "nv12".to_string(),
        ..Default::default()
    };

    // One video channel (raw packing backend) plus one telemetry channel.
    let mut streamer = ChannelCoordinator::<RawVideoEncoder, MultiChannelSender>::init(
        &net,
        &[encoder_config],
        1,
    )?;

    tracing::info!(
        "Streaming {}x{} test frames to {}:{} for {} seconds",
        WIDTH,
        HEIGHT,
        ip,
        port,
        seconds
    );

    let total_frames = seconds * DEFAULT_FRAMERATE as u64;
    let frame_interval = Duration::from_secs(1) / DEFAULT_FRAMERATE;

    // Dummy NV12 image data; a real application would take it from a
    // camera or capture pipeline.
    let mut luma = vec![0u8; (WIDTH * HEIGHT) as usize];
    let chroma = vec![128u8; (WIDTH * HEIGHT / 2) as usize]; // no color

    for f in 0..total_frames {
        // Ride through greyscale so the receiver shows motion.
        luma.fill((f % 255) as u8);
        let frame = Frame::planar(&[&luma, &chroma], &[WIDTH as usize, WIDTH as usize]);

        // The sequence number has to grow with every frame; the receiver
        // orders and drops by it.
        let sequence = f as u16;
        streamer.send(Some(&frame), sequence, 0)?;

        let telemetry = format!("frame {} brightness {}", f, f % 255);
        let aux = Frame::packed(telemetry.as_bytes());
        streamer.send(Some(&aux), sequence, 1)?;

        // Simulate a real-time source.
        std::thread::sleep(frame_interval);
    }

    // Flush whatever the encoder still pipelines.
    streamer.send(None, total_frames as u16, 0)?;

    let stats = streamer.stats();
    let net_stats = streamer.transport().stats();
    tracing::info!(
        "Done: {} frames encoded, {} payloads / {} datagrams / {:.1} KB sent",
        stats.frames_submitted,
        net_stats.payloads_sent,
        net_stats.datagrams_sent,
        net_stats.bytes_sent as f64 / 1024.0
    );

    streamer.close();
    Ok(())
}
