//! Canonical textual rendering of a volume and its telemetry.
//!
//! The emitted `Key: Value` block is an external contract: downstream
//! table/JSON layers and conformance tests parse it line by line, so field
//! order, naming, and units must not change.

use chrono::SecondsFormat;

use crate::volume::{Volume, VolumeStats};

/// Renders one volume and its counters as the canonical description block.
///
/// The block carries no leading blank line and no trailing newline. The
/// `Parent` line appears only for clones and snapshots and renders the
/// parent's id; callers needing the parent's name must resolve it
/// separately.
#[must_use]
pub fn format_volume(volume: &Volume, stats: &VolumeStats) -> String {
    let mut block = String::new();
    push_line(&mut block, "Volume", &volume.name);
    push_line(&mut block, "Name", &volume.name);
    push_line(&mut block, "Size", &human_size(volume.size_bytes));
    push_line(&mut block, "Format", volume.format.as_str());
    push_line(&mut block, "HA", &volume.ha_level.to_string());
    push_line(&mut block, "IO Priority", volume.io_priority.as_str());
    push_line(
        &mut block,
        "Creation Time",
        &volume
            .created_at
            .to_rfc3339_opts(SecondsFormat::Secs, true),
    );
    if let Some(parent_id) = volume.kind.parent_id() {
        push_line(&mut block, "Parent", parent_id);
    }
    push_line(&mut block, "Shared", if volume.shared { "yes" } else { "no" });
    push_line(&mut block, "Status", volume.status.as_str());
    push_line(&mut block, "State", volume.state.as_str());
    push_line(&mut block, "Stats", "");
    push_line(&mut block, "Reads", &stats.reads.to_string());
    push_line(&mut block, "Reads MS", &stats.reads_ms.to_string());
    push_line(&mut block, "Bytes Read", &stats.bytes_read.to_string());
    push_line(&mut block, "Writes", &stats.writes.to_string());
    push_line(&mut block, "Writes MS", &stats.writes_ms.to_string());
    push_line(&mut block, "Bytes Written", &stats.bytes_written.to_string());
    push_line(
        &mut block,
        "IOs in progress",
        &stats.ios_in_progress.to_string(),
    );
    push_line(&mut block, "Bytes used", &human_size(stats.bytes_used));
    push_line(
        &mut block,
        "Replication Status",
        volume.replication_status.as_str(),
    );
    block
}

/// Joins description blocks with a blank line, the batch form consumed by
/// the CLI framing layer.
#[must_use]
pub fn join_blocks(blocks: &[String]) -> String {
    blocks.join("\n\n")
}

/// Renders a byte count using binary units with one decimal digit,
/// truncating: `1073741824` becomes `"1.0 GiB"`. Counts below one KiB
/// render as plain bytes.
#[must_use]
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "deliberate truncation to one decimal digit"
)]
pub fn human_size(bytes: u64) -> String {
    let mut unit = "B";
    let mut divisor: u64 = 1;
    for next in ["KiB", "MiB", "GiB", "TiB"] {
        match divisor.checked_mul(1024) {
            Some(scaled) if bytes >= scaled => {
                divisor = scaled;
                unit = next;
            }
            _ => break,
        }
    }
    if divisor == 1 {
        return format!("{bytes} B");
    }
    let tenths = u128::from(bytes) * 10 / u128::from(divisor);
    format!("{}.{} {unit}", tenths / 10, tenths % 10)
}

fn push_line(block: &mut String, key: &str, value: &str) {
    if !block.is_empty() {
        block.push('\n');
    }
    block.push_str(key);
    block.push(':');
    if !value.is_empty() {
        block.push(' ');
        block.push_str(value);
    }
}
