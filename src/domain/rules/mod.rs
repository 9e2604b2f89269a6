// Domain rules - Parsing, mapping and command construction policies

use std::path::{Path, PathBuf};

use crate::domain::model::*;
use crate::utils::path::PathUtils;

/// Fields the inspection tool is asked for, in output order
pub const PROBE_ENTRIES: &str = "stream=index,channel_layout:stream_tags=language,title";

/// Minimum fields for a usable catalog row (index, layout, language)
const REQUIRED_FIELDS: usize = 3;

/// Parser for the inspection tool's `compact=p=0:nk=1` output
pub struct CatalogParser;

impl CatalogParser {
    /// Parse pipe-delimited rows into a catalog in emission order.
    ///
    /// Rows with fewer than three fields are dropped and counted, never raised.
    pub fn parse(output: &str) -> CatalogParse {
        let mut tracks = Vec::new();
        let mut dropped = 0;

        for line in output.lines() {
            let fields: Vec<&str> = line.split('|').collect();
            if !Self::is_complete_record(&fields) {
                dropped += 1;
                continue;
            }
            let mut track = TrackDescriptor::new(fields[0], fields[1], fields[2]);
            if let Some(title) = fields.get(3) {
                track = track.with_title(*title);
            }
            tracks.push(track);
        }

        CatalogParse {
            catalog: TrackCatalog::new(tracks),
            dropped,
        }
    }

    /// Predicate separating usable rows from partial ones
    pub fn is_complete_record(fields: &[&str]) -> bool {
        fields.len() >= REQUIRED_FIELDS
    }
}

/// One `-map` entry of the remux command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamSelector {
    /// Video from the original file
    Video,
    /// All subtitles from the original file, if any
    OptionalSubtitles,
    /// Audio sub-stream `n` of the original file
    OriginalAudio(usize),
    /// Audio of side-car input `n` (1-based, input 0 is the original)
    EnhancedAudio(usize),
}

impl StreamSelector {
    /// Value passed to `-map`
    pub fn map_spec(&self) -> String {
        match self {
            StreamSelector::Video => "0:v".to_string(),
            StreamSelector::OptionalSubtitles => "0:s?".to_string(),
            StreamSelector::OriginalAudio(n) => format!("0:a:{}", n),
            StreamSelector::EnhancedAudio(input) => format!("{}:a", input),
        }
    }

    fn is_audio(&self) -> bool {
        matches!(
            self,
            StreamSelector::OriginalAudio(_) | StreamSelector::EnhancedAudio(_)
        )
    }
}

/// Business rules for remux stream mapping
pub struct RemuxMapper;

impl RemuxMapper {
    /// Video, optional subtitles, then original/enhanced audio pairs in catalog order
    pub fn stream_selectors(track_count: usize) -> Vec<StreamSelector> {
        let mut selectors = vec![StreamSelector::Video, StreamSelector::OptionalSubtitles];
        for position in 0..track_count {
            selectors.push(StreamSelector::OriginalAudio(position));
            selectors.push(StreamSelector::EnhancedAudio(position + 1));
        }
        selectors
    }
}

/// Builds argument lists for each external tool
pub struct InvocationBuilder;

impl InvocationBuilder {
    /// ffprobe arguments listing every audio stream
    pub fn probe_args(input: &Path) -> Vec<String> {
        vec![
            "-loglevel".to_string(),
            "error".to_string(),
            "-select_streams".to_string(),
            "a".to_string(),
            "-show_entries".to_string(),
            PROBE_ENTRIES.to_string(),
            "-of".to_string(),
            "compact=p=0:nk=1".to_string(),
            PathUtils::to_arg(input),
        ]
    }

    /// ffmpeg arguments encoding one track into its side-car
    pub fn transcode_args(input: &Path, track: &TrackDescriptor, sidecar: &Path) -> Vec<String> {
        let settings = EncodeSettings::ENHANCED_STEREO;
        let filter = DownmixMatrix::for_class(track.layout_class()).filter_graph();

        vec![
            "-i".to_string(),
            PathUtils::to_arg(input),
            "-map".to_string(),
            format!("0:{}", track.index),
            "-af".to_string(),
            filter,
            "-acodec".to_string(),
            settings.codec.to_string(),
            "-b:a".to_string(),
            settings.bitrate.to_string(),
            "-vbr".to_string(),
            settings.vbr.to_string(),
            "-compression_level".to_string(),
            settings.compression_level.to_string(),
            "-frame_duration".to_string(),
            settings.frame_duration_ms.to_string(),
            "-application".to_string(),
            settings.application.to_string(),
            "-metadata:s:a".to_string(),
            format!("language={}", track.language),
            "-metadata:s:a".to_string(),
            format!("title={}", settings.title),
            "-y".to_string(),
            PathUtils::to_arg(sidecar),
        ]
    }

    /// ffmpeg arguments assembling the final container.
    ///
    /// `sidecars[i]` must belong to catalog position `i`.
    pub fn remux_args(input: &Path, output: &Path, sidecars: &[PathBuf]) -> Vec<String> {
        let mut args = vec!["-i".to_string(), PathUtils::to_arg(input)];
        for sidecar in sidecars {
            args.push("-i".to_string());
            args.push(PathUtils::to_arg(sidecar));
        }

        for selector in RemuxMapper::stream_selectors(sidecars.len()) {
            args.push("-map".to_string());
            args.push(selector.map_spec());
            if selector.is_audio() {
                args.push("-c:a".to_string());
                args.push("copy".to_string());
            }
        }

        args.extend(
            ["-c:v", "copy", "-c:s", "copy", "-y"]
                .iter()
                .map(|s| s.to_string()),
        );
        args.push(PathUtils::to_arg(output));
        args
    }

    /// `-map` values in command order
    pub fn map_specs(args: &[String]) -> Vec<&str> {
        args.windows(2)
            .filter(|pair| pair[0] == "-map")
            .map(|pair| pair[1].as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests;
