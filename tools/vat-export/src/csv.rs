//! Per-frame mesh CSV parsing
//!
//! The export format is one tagged row per line, no header:
//!
//! ```text
//! f              start a new frame
//! p              primitive group (ignored, primitives flatten into the frame)
//! v,x,y,z        vertex position
//! n,x,y,z        vertex normal (re-normalized on load)
//! uv,u,v         texture coordinate
//! ```
//!
//! Whitespace anywhere in a row is ignored, as are trailing fields and rows
//! with unknown tags. Any numeric failure aborts the whole parse.

use glam::{Vec2, Vec3};

use crate::config::FlipAxis;
use crate::error::{BakeError, BakeResult};

/// One animation frame as exported
///
/// `positions` and `normals` are parallel; every frame of a sequence shares
/// the same topology.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
}

impl Frame {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

/// Frames in playback order; the first is the reference (bind) frame
pub type FrameSequence = Vec<Frame>;

/// Parse CSV text into frames
///
/// The last open frame is flushed at end of input, so the returned sequence
/// is complete.
pub fn parse_frames(text: &str, flip: FlipAxis) -> BakeResult<FrameSequence> {
    let mut frames = FrameSequence::new();
    let mut current: Option<Frame> = None;

    for (index, row) in text.split('\n').enumerate() {
        let line = index + 1;
        let row: String = row.chars().filter(|c| !c.is_whitespace()).collect();
        let cols: Vec<&str> = row.split(',').collect();

        match cols[0] {
            "f" => {
                if let Some(frame) = current.take() {
                    frames.push(frame);
                }
                current = Some(Frame::default());
            }
            "v" => {
                let frame = open_frame(&mut current, line, "v")?;
                let [x, y, z] = parse_fields::<3>(&cols, line, "v")?;
                frame.positions.push(flip.apply(Vec3::new(x, y, z)));
            }
            "n" => {
                let frame = open_frame(&mut current, line, "n")?;
                let [x, y, z] = parse_fields::<3>(&cols, line, "n")?;
                frame
                    .normals
                    .push(flip.apply(Vec3::new(x, y, z)).normalize_or_zero());
            }
            "uv" => {
                let frame = open_frame(&mut current, line, "uv")?;
                let [u, v] = parse_fields::<2>(&cols, line, "uv")?;
                frame.uvs.push(Vec2::new(u, v));
            }
            // "p" and anything unrecognized
            _ => {}
        }
    }

    if let Some(frame) = current.take() {
        frames.push(frame);
    }

    tracing::debug!(
        "Parsed {} frames ({} vertices in reference frame)",
        frames.len(),
        frames.first().map(Frame::vertex_count).unwrap_or(0)
    );

    Ok(frames)
}

fn open_frame<'a>(
    current: &'a mut Option<Frame>,
    line: usize,
    tag: &str,
) -> BakeResult<&'a mut Frame> {
    current
        .as_mut()
        .ok_or_else(|| BakeError::format(line, format!("'{tag}' row before any 'f' frame marker")))
}

/// Parse the `N` numeric fields following the tag; extra fields are ignored
fn parse_fields<const N: usize>(cols: &[&str], line: usize, tag: &str) -> BakeResult<[f32; N]> {
    let available = cols.len() - 1;
    if available < N {
        return Err(BakeError::format(
            line,
            format!("expected {N} numeric fields after '{tag}', found {available}"),
        ));
    }

    let mut out = [0.0f32; N];
    for (i, slot) in out.iter_mut().enumerate() {
        let field = cols[i + 1];
        let value: f32 = field.parse().map_err(|_| {
            BakeError::format(line, format!("invalid number {field:?} in '{tag}' row"))
        })?;
        if !value.is_finite() {
            return Err(BakeError::format(
                line,
                format!("non-finite number {field:?} in '{tag}' row"),
            ));
        }
        *slot = value;
    }
    Ok(out)
}
