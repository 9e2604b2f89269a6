// Domain models - Core types and data structures

use std::fmt;
use std::path::PathBuf;

use crate::error::EnhanceError;

/// Title tag written on every enhanced stream, whatever the source title was
pub const ENHANCED_TITLE: &str = "2.1 Enhanced";

/// One audio stream discovered in the source container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    /// Stream position token as reported by the inspection tool, kept verbatim
    pub index: String,
    /// Speaker layout such as "5.1" or "7.1(wide)", empty when unknown
    pub channel_layout: String,
    /// Language tag, may be empty
    pub language: String,
    /// Title tag, empty when absent
    pub title: String,
}

impl TrackDescriptor {
    /// Create a descriptor without a title
    pub fn new(
        index: impl Into<String>,
        channel_layout: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            index: index.into(),
            channel_layout: channel_layout.into(),
            language: language.into(),
            title: String::new(),
        }
    }

    /// Attach a title tag
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Layout class used to pick the downmix
    pub fn layout_class(&self) -> LayoutClass {
        LayoutClass::from_layout(&self.channel_layout)
    }
}

impl fmt::Display for TrackDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = if self.channel_layout.is_empty() {
            "unknown"
        } else {
            &self.channel_layout
        };
        let language = if self.language.is_empty() {
            "und"
        } else {
            &self.language
        };
        write!(f, "track {} ({}, {})", self.index, layout, language)
    }
}

/// Ordered list of audio tracks.
///
/// Position in the catalog is the audio sub-stream number used at remux time,
/// so entries are never sorted, deduplicated or rewritten after extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackCatalog {
    tracks: Vec<TrackDescriptor>,
}

impl TrackCatalog {
    /// Create a catalog from tracks in source order
    pub fn new(tracks: Vec<TrackDescriptor>) -> Self {
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track at the given catalog position
    pub fn get(&self, position: usize) -> Option<&TrackDescriptor> {
        self.tracks.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrackDescriptor> {
        self.tracks.iter()
    }
}

impl FromIterator<TrackDescriptor> for TrackCatalog {
    fn from_iter<I: IntoIterator<Item = TrackDescriptor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TrackCatalog {
    type Item = &'a TrackDescriptor;
    type IntoIter = std::slice::Iter<'a, TrackDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

/// Result of parsing inspection output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogParse {
    pub catalog: TrackCatalog,
    /// Rows dropped for having fewer than three fields
    pub dropped: usize,
}

/// Channel layout class driving the filter graph choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutClass {
    /// Any layout starting with "7.1", including "7.1(wide)"
    SevenOne,
    /// 5.1 and everything else, including unknown layouts
    Default,
}

impl LayoutClass {
    pub fn from_layout(layout: &str) -> Self {
        if layout.starts_with("7.1") {
            LayoutClass::SevenOne
        } else {
            LayoutClass::Default
        }
    }
}

/// Stereo downmix weights.
///
/// Each output side is `front + center*FC + back*B? [+ side*S?] + lfe*LFE`,
/// preceded by an overall volume gain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DownmixMatrix {
    pub gain: f64,
    pub center: f64,
    pub back: f64,
    pub side: Option<f64>,
    pub lfe: f64,
}

impl DownmixMatrix {
    /// 7.1 to stereo: sides folded in at a lower weight than the rears
    pub const SEVEN_ONE: DownmixMatrix = DownmixMatrix {
        gain: 1.5,
        center: 0.707,
        back: 0.5,
        side: Some(0.3),
        lfe: 0.5,
    };

    /// 5.1 (and fallback) to stereo
    pub const DEFAULT: DownmixMatrix = DownmixMatrix {
        gain: 1.5,
        center: 0.707,
        back: 0.707,
        side: None,
        lfe: 0.5,
    };

    pub fn for_class(class: LayoutClass) -> Self {
        match class {
            LayoutClass::SevenOne => Self::SEVEN_ONE,
            LayoutClass::Default => Self::DEFAULT,
        }
    }

    /// Render as an ffmpeg `-af` expression
    pub fn filter_graph(&self) -> String {
        format!(
            "volume={}, pan=stereo|FL={}|FR={}",
            self.gain,
            self.channel_sum("FL", "BL", "SL"),
            self.channel_sum("FR", "BR", "SR"),
        )
    }

    fn channel_sum(&self, front: &str, back: &str, side: &str) -> String {
        let mut sum = format!("{}+{}*FC+{}*{}", front, self.center, self.back, back);
        if let Some(weight) = self.side {
            sum.push_str(&format!("+{}*{}", weight, side));
        }
        sum.push_str(&format!("+{}*LFE", self.lfe));
        sum
    }
}

/// Fixed encoder parameters for the enhanced side-car
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeSettings {
    pub codec: &'static str,
    pub bitrate: &'static str,
    pub vbr: &'static str,
    pub compression_level: u8,
    pub frame_duration_ms: u8,
    pub application: &'static str,
    pub title: &'static str,
}

impl EncodeSettings {
    /// High quality VBR Opus at 320 kbps
    pub const ENHANCED_STEREO: EncodeSettings = EncodeSettings {
        codec: "libopus",
        bitrate: "320k",
        vbr: "on",
        compression_level: 9,
        frame_duration_ms: 20,
        application: "audio",
        title: ENHANCED_TITLE,
    };
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self::ENHANCED_STEREO
    }
}

/// Outcome of one enhancement worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    /// Side-car written by the transcode engine
    Enhanced,
    /// Side-car already present, nothing was run
    Skipped,
    /// Engine failed to start or exited non-zero
    Failed { reason: String },
}

impl TrackOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, TrackOutcome::Failed { .. })
    }
}

/// Per-track result reported by the fan-out coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackReport {
    /// Catalog position
    pub position: usize,
    pub index: String,
    pub sidecar: PathBuf,
    pub outcome: TrackOutcome,
}

/// Summary of a full pipeline run
#[derive(Debug)]
pub struct PipelineReport {
    pub output_path: PathBuf,
    pub tracks: Vec<TrackReport>,
    /// Inspection rows dropped as malformed
    pub dropped_rows: usize,
    /// Side-cars removed before cleanup finished or stopped
    pub removed_sidecars: Vec<PathBuf>,
    /// Set when cleanup stopped early; the run still counts as successful
    pub cleanup_error: Option<EnhanceError>,
}
