//! Frame extraction system
//!
//! Takes the newest frame copied out of the GPU, strips the row padding
//! and publishes it to the shared frame buffer together with timing stats.

use bevy::{prelude::*, render::renderer::RenderDevice, time::Time};
use std::time::Instant;

use crate::bevy::resources::{
    FrameBufferRes, FrameCount, FrameRateLimiter, FrameTimings, MainWorldReceiver, PerfStatsRes,
    PreRollFrames,
};
use crate::config::{performance::*, RENDER_HEIGHT, RENDER_WIDTH};

/// Extract and process frame data from the render pipeline
pub fn extract_and_process_frame(
    receiver: Res<MainWorldReceiver>,
    buffer: Option<Res<FrameBufferRes>>,
    perf_stats: Option<Res<PerfStatsRes>>,
    mut count: ResMut<FrameCount>,
    mut pre_roll: ResMut<PreRollFrames>,
    mut timings: ResMut<FrameTimings>,
    mut frame_limiter: ResMut<FrameRateLimiter>,
    time: Res<Time>,
) {
    let Some(buffer) = buffer else { return };

    // Wait for scene to be fully rendered
    if pre_roll.0 > 0 {
        while receiver.try_recv().is_ok() {}
        pre_roll.0 -= 1;
        if pre_roll.0 % 10 == 0 && pre_roll.0 > 0 {
            debug!("[Bevy] Pre-roll frames remaining: {}", pre_roll.0);
        }
        return;
    }

    if !frame_limiter.admit(Instant::now()) {
        // Too early for the next frame, drop what arrived
        while receiver.try_recv().is_ok() {}
        return;
    }

    let frame_start = Instant::now();

    // Only the newest frame matters
    let Some(image_data) = receiver.try_iter().last() else {
        return;
    };
    let receive_time = frame_start.elapsed().as_secs_f64() * 1000.0;

    let process_start = Instant::now();
    let aligned_row_bytes = RenderDevice::align_copy_bytes_per_row(RENDER_WIDTH as usize * 4);
    let Some(rgba) = remove_row_padding(&image_data, RENDER_WIDTH, RENDER_HEIGHT, aligned_row_bytes)
    else {
        warn!(
            "[Bevy] Dropping short frame: {} bytes for {}x{}",
            image_data.len(),
            RENDER_WIDTH,
            RENDER_HEIGHT
        );
        return;
    };
    let process_time = process_start.elapsed().as_secs_f64() * 1000.0;
    let data_size_kb = rgba.len() as f64 / 1024.0;

    let Ok(mut guard) = buffer.0 .0.lock() else {
        error!("[Bevy] Frame buffer lock poisoned");
        return;
    };
    *guard = Some(rgba);
    drop(guard);
    count.0 += 1;

    let total_time = frame_start.elapsed().as_secs_f64() * 1000.0;
    timings.record(total_time, FRAME_TIMING_SAMPLES);
    let avg_time = timings.average().unwrap_or(total_time);

    if let Some(perf_res) = &perf_stats {
        if let Ok(mut stats) = perf_res.0 .0.lock() {
            stats.gpu_transfer_ms = receive_time;
            stats.data_processing_ms = process_time;
            stats.frame_encoding_ms = total_time;
            stats.frame_count = count.0;
            stats.data_size_kb = data_size_kb;
            stats.bevy_fps = if avg_time > 0.0 { 1000.0 / avg_time } else { 0.0 };
        }
    }

    // Print detailed stats periodically
    let current_time = time.elapsed_secs_f64();
    if current_time - timings.last_print_time >= STATS_PRINT_INTERVAL {
        let (min_time, max_time) = timings.min_max();
        info!(
            "[Bevy] Frame {} | Receive: {:.2}ms | Process: {:.2}ms | Total: {:.2}ms | Avg: {:.2}ms (Min: {:.2}ms, Max: {:.2}ms) | Size: {:.1}KB",
            count.0,
            receive_time,
            process_time,
            total_time,
            avg_time,
            min_time,
            max_time,
            data_size_kb
        );
        timings.last_print_time = current_time;
    }
}

/// Strip GPU row alignment padding, returning tightly packed RGBA rows.
///
/// `None` if the buffer holds fewer than `height` full rows.
fn remove_row_padding(
    data: &[u8],
    width: u32,
    height: u32,
    aligned_row_bytes: usize,
) -> Option<Vec<u8>> {
    let row_bytes = width as usize * 4;
    let height = height as usize;
    if aligned_row_bytes < row_bytes || height == 0 {
        return None;
    }
    if data.len() < aligned_row_bytes * (height - 1) + row_bytes {
        return None;
    }

    if row_bytes == aligned_row_bytes {
        return Some(data[..row_bytes * height].to_vec());
    }

    Some(
        data.chunks(aligned_row_bytes)
            .take(height)
            .flat_map(|row| &row[..row_bytes])
            .copied()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_is_stripped_per_row() {
        // 2x2 frame, rows padded from 8 to 12 bytes
        let data = [
            1, 1, 1, 1, 2, 2, 2, 2, 0, 0, 0, 0, //
            3, 3, 3, 3, 4, 4, 4, 4, 0, 0, 0, 0,
        ];
        let rgba = remove_row_padding(&data, 2, 2, 12).unwrap();
        assert_eq!(
            rgba,
            [1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4]
        );
    }

    #[test]
    fn unpadded_frames_pass_through() {
        let data: Vec<u8> = (0..16).collect();
        assert_eq!(remove_row_padding(&data, 2, 2, 8).unwrap(), data);
    }

    #[test]
    fn short_buffers_are_rejected() {
        assert_eq!(remove_row_padding(&[0; 10], 2, 2, 12), None);
        assert_eq!(remove_row_padding(&[], 2, 2, 8), None);
    }
}
