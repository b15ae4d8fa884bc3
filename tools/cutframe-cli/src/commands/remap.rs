//! Build and summarize the remap table for a segment list.

use std::path::PathBuf;

use cutframe_common::clock::FrameClock;
use cutframe_common::config::ProcessingDefaults;
use cutframe_processing_core::remap::{build_time_remap_table_with, RemapConfig};
use cutframe_timeline_model::segment::expected_output_duration;

use super::load_segments;

pub fn run(path: PathBuf, dump: bool, defaults: &ProcessingDefaults) -> anyhow::Result<()> {
    let segments = load_segments(&path)?;
    let enabled = segments.iter().filter(|s| s.is_enabled).count();
    println!(
        "Segments: {} ({} enabled, {} disabled)",
        segments.len(),
        enabled,
        segments.len() - enabled
    );

    let table = build_time_remap_table_with(&segments, &RemapConfig::from(defaults));
    if table.is_identity() {
        println!("Remap: identity (no enabled segments)");
        return Ok(());
    }

    println!("Remap table:");
    println!("  Entries: {}", table.len());
    println!(
        "  Output duration: {:.3}s (without ramps: {:.3}s)",
        table.total_duration().unwrap_or(0.0),
        expected_output_duration(&segments)
    );

    let clock = FrameClock::new(defaults.output_frame_rate);
    println!(
        "  Output frames: {} at {}fps",
        clock.frame_count(table.total_duration().unwrap_or(0.0)),
        clock.fps()
    );

    let cuts = table.discontinuities(defaults.bridge_jump_threshold_secs);
    println!("  Cuts: {}", cuts.len());
    for cut in &cuts {
        println!(
            "    at {:.3}s (frame {}): source {:.3}s -> {:.3}s (skips {:.3}s)",
            cut.before.composition_time,
            clock.frame_at(cut.before.composition_time),
            cut.before.source_time,
            cut.after.source_time,
            cut.skipped_secs()
        );
    }

    if dump {
        println!();
        println!("{:>12} {:>12}", "composition", "source");
        for entry in &table.entries {
            println!(
                "{:>12.4} {:>12.4}",
                entry.composition_time, entry.source_time
            );
        }
    }

    Ok(())
}
